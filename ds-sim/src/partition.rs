use bevy::prelude::{Entity, Vec3};

use crate::direction::DirectionSource;
use crate::pose::LeafPose;

pub const PRIMARY_PARTS_COUNT: usize = 6;
/// A single group never separates spatially; only the rotation delta shows.
pub const FALLBACK_PARTS_COUNT: usize = 1;

pub const ACCENT_COLOR_HEX: u32 = 0x4facfe;
pub const NEUTRAL_COLOR_HEX: u32 = 0x808080;
pub const PART_METALLIC: f32 = 0.6;
pub const PART_ROUGHNESS: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartTint {
    Accent,
    Neutral,
}

impl PartTint {
    pub fn for_group(index: usize, parts_count: usize) -> Self {
        if index == parts_count / 2 {
            Self::Accent
        } else {
            Self::Neutral
        }
    }

    pub const fn hex(self) -> u32 {
        match self {
            Self::Accent => ACCENT_COLOR_HEX,
            Self::Neutral => NEUTRAL_COLOR_HEX,
        }
    }

    pub const fn rgb_u8(self) -> [u8; 3] {
        let hex = self.hex();
        [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
    }
}

/// Baseline snapshot of a leaf, taken once before any disassembly offset is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafRecord {
    pub leaf: Entity,
    pub baseline: LeafPose,
}

#[derive(Debug, Clone)]
pub struct PartGroup {
    pub index: usize,
    /// Unit vector, drawn once per group.
    pub direction: Vec3,
    pub tint: PartTint,
    pub records: Vec<LeafRecord>,
}

impl PartGroup {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn leaves(&self) -> impl Iterator<Item = Entity> + '_ {
        self.records.iter().map(|record| record.leaf)
    }
}

/// Deals `leaves` round-robin into at most `parts_count` groups.
///
/// Leaf `i` lands in group `i % parts_count`. Groups that would receive no leaf are not created,
/// so the returned indices are always `0..min(leaves.len(), parts_count)`. A `parts_count` of zero
/// is treated as one.
pub fn partition(
    leaves: &[(Entity, LeafPose)],
    parts_count: usize,
    directions: &mut impl DirectionSource,
) -> Vec<PartGroup> {
    let parts_count = parts_count.max(1);
    let group_count = parts_count.min(leaves.len());

    let mut groups: Vec<PartGroup> = (0..group_count)
        .map(|index| PartGroup {
            index,
            direction: directions.next_direction(),
            tint: PartTint::for_group(index, parts_count),
            records: Vec::with_capacity(leaves.len().div_ceil(parts_count)),
        })
        .collect();

    for (i, &(leaf, baseline)) in leaves.iter().enumerate() {
        groups[i % parts_count]
            .records
            .push(LeafRecord { leaf, baseline });
    }

    groups
}

pub fn group_sizes(groups: &[PartGroup]) -> Vec<usize> {
    groups.iter().map(PartGroup::len).collect()
}
