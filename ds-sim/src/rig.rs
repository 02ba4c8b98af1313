use bevy::prelude::Resource;

use crate::disassembly::{self, PoseSink};
use crate::partition::{PartGroup, group_sizes};

/// Part groups of the loaded model plus the progress last applied to them.
///
/// Created once when the model is ready and kept for the rest of the session.
#[derive(Resource, Debug, Clone)]
pub struct DisassemblyRig {
    groups: Vec<PartGroup>,
    parts_count: usize,
    fallback: bool,
    last_progress: Option<f32>,
}

impl DisassemblyRig {
    pub fn new(groups: Vec<PartGroup>, parts_count: usize, fallback: bool) -> Self {
        Self {
            groups,
            parts_count,
            fallback,
            last_progress: None,
        }
    }

    pub fn groups(&self) -> &[PartGroup] {
        &self.groups
    }

    pub fn parts_count(&self) -> usize {
        self.parts_count
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn leaf_count(&self) -> usize {
        self.groups.iter().map(PartGroup::len).sum()
    }

    pub fn group_sizes(&self) -> Vec<usize> {
        group_sizes(&self.groups)
    }

    pub fn last_progress(&self) -> Option<f32> {
        self.last_progress
    }

    pub fn needs_update(&self, progress: f32) -> bool {
        self.last_progress != Some(progress)
    }

    pub fn apply(&mut self, progress: f32, sink: &mut impl PoseSink) {
        disassembly::apply(progress, &self.groups, sink);
        self.last_progress = Some(progress);
    }
}
