use bevy::prelude::*;
use ds_sim::disassembly::PoseSink;
use ds_sim::pose::LeafPose;
use ds_sim::rig::DisassemblyRig;
use ds_sim::scroll::ScrollTrack;
use ds_sim::sections::{explode_progress_at, stage_at};
use ds_utils::ShowcaseConfig;
use tracing::debug;

use crate::components::{ShowcaseCamera, ShowcaseModel};

#[derive(Resource, Debug, Default)]
pub struct ShowcaseScroll {
    pub track: ScrollTrack,
}

struct LeafPoseWriter<'a, 'w, 's, 'p>(&'a mut Query<'w, 's, &'p mut LeafPose>);

impl PoseSink for LeafPoseWriter<'_, '_, '_, '_> {
    fn set_pose(&mut self, leaf: Entity, pose: LeafPose) {
        if let Ok(mut current) = self.0.get_mut(leaf) {
            current.set_if_neq(pose);
        }
    }
}

pub fn advance_scroll(
    time: Res<Time>,
    config: Res<ShowcaseConfig>,
    mut scroll: ResMut<ShowcaseScroll>,
) {
    if scroll.track.is_settled() {
        return;
    }
    scroll.track.advance(
        time.delta_secs(),
        config.smooth_scroll_seconds,
        config.scrub_seconds,
    );
}

/// Disassembly follows the raw scroll position; only the camera and model root are scrubbed.
pub fn drive_disassembly(
    scroll: Res<ShowcaseScroll>,
    mut rig: ResMut<DisassemblyRig>,
    mut poses: Query<&mut LeafPose>,
) {
    let progress = explode_progress_at(scroll.track.position());
    if !rig.needs_update(progress) {
        return;
    }
    rig.apply(progress, &mut LeafPoseWriter(&mut poses));
    debug!("disassembly progress {progress:.3}");
}

pub fn sync_leaf_transforms(mut leaves: Query<(&LeafPose, &mut Transform), Changed<LeafPose>>) {
    for (pose, mut transform) in &mut leaves {
        pose.write_to(&mut transform);
    }
}

pub fn apply_stage_timelines(
    scroll: Res<ShowcaseScroll>,
    mut cameras: Query<&mut Transform, With<ShowcaseCamera>>,
    mut models: Query<&mut Transform, (With<ShowcaseModel>, Without<ShowcaseCamera>)>,
) {
    let stage = stage_at(scroll.track.playhead());

    for mut transform in &mut cameras {
        transform.translation = stage.camera_position;
    }
    for mut transform in &mut models {
        transform.translation.y = stage.model_lift;
        transform.rotation = Quat::from_euler(
            EulerRot::XYZ,
            stage.model_rotation.x,
            stage.model_rotation.y,
            0.0,
        );
        transform.scale = Vec3::splat(stage.model_scale);
    }
}
