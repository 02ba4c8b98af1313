use std::collections::HashMap;
use std::f32::consts::PI;

use bevy::prelude::{Entity, Vec3};

use crate::partition::{LeafRecord, PartGroup};
use crate::pose::LeafPose;

/// Travel of group 0 at full progress, in normalized model units.
pub const MAX_DISTANCE: f32 = 0.5;
/// Extra travel per group index, as a fraction of `MAX_DISTANCE`.
pub const GROUP_STAGGER: f32 = 0.2;
pub const ROTATION_X_SPAN: f32 = PI * 0.5;
pub const ROTATION_Y_SPAN: f32 = PI * 0.3;

/// Receives the pose computed for one leaf.
pub trait PoseSink {
    fn set_pose(&mut self, leaf: Entity, pose: LeafPose);
}

impl PoseSink for HashMap<Entity, LeafPose> {
    fn set_pose(&mut self, leaf: Entity, pose: LeafPose) {
        self.insert(leaf, pose);
    }
}

pub fn group_offset(group: &PartGroup, progress: f32) -> Vec3 {
    let stagger = 1.0 + group.index as f32 * GROUP_STAGGER;
    group.direction * (progress * MAX_DISTANCE * stagger)
}

pub fn rotation_delta(progress: f32) -> Vec3 {
    Vec3::new(progress * ROTATION_X_SPAN, progress * ROTATION_Y_SPAN, 0.0)
}

/// Pose of `record` at `progress`, always derived from the baseline.
pub fn pose_at(record: &LeafRecord, group: &PartGroup, progress: f32) -> LeafPose {
    LeafPose {
        position: record.baseline.position + group_offset(group, progress),
        rotation: record.baseline.rotation + rotation_delta(progress),
    }
}

/// Poses every leaf of every group for `progress`.
///
/// `progress` is not clamped; easing overshoot slightly outside `[0, 1]` is passed through.
pub fn apply(progress: f32, groups: &[PartGroup], sink: &mut impl PoseSink) {
    for group in groups {
        for record in &group.records {
            sink.set_pose(record.leaf, pose_at(record, group, progress));
        }
    }
}
