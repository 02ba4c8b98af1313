use bevy::prelude::*;
use ds_sim::rig::DisassemblyRig;
use ds_utils::{AppState, LoadingStatus, ViewportMetrics};

mod components;
pub mod model;
pub mod parts;
mod stage;
pub mod timeline;

pub use components::{ModelFrame, PendingPartition, ShowcaseCamera, ShowcaseModel};
pub use model::{LoadOutcome, ModelLoad};
pub use stage::StageSettings;
pub use timeline::ShowcaseScroll;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StageSettings>()
            .init_resource::<AppState>()
            .init_resource::<LoadingStatus>()
            .init_resource::<ViewportMetrics>()
            .init_resource::<ShowcaseScroll>()
            .add_systems(
                Startup,
                (
                    stage::setup_stage,
                    stage::init_viewport_metrics,
                    model::request_model,
                ),
            )
            .add_systems(
                Update,
                (
                    model::watch_model_load.run_if(resource_exists::<ModelLoad>),
                    parts::partition_pending_models.after(model::watch_model_load),
                    stage::track_viewport_resize,
                ),
            )
            .add_systems(
                Update,
                (
                    timeline::advance_scroll,
                    timeline::drive_disassembly
                        .after(timeline::advance_scroll)
                        .after(parts::partition_pending_models),
                    timeline::apply_stage_timelines.after(timeline::advance_scroll),
                    timeline::sync_leaf_transforms.after(timeline::drive_disassembly),
                )
                    .run_if(resource_exists::<DisassemblyRig>),
            );
    }
}
