use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::camera::Exposure;
use bevy::window::{PrimaryWindow, WindowResized};
use ds_sim::sections::INITIAL_CAMERA_POSITION;
use ds_utils::ViewportMetrics;
use tracing::debug;

use crate::components::ShowcaseCamera;

const LUX_PER_INTENSITY: f32 = 10_000.0;
const AMBIENT_PER_INTENSITY: f32 = 500.0;

#[derive(Resource)]
pub struct StageSettings {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Linear brightness multiplier on top of Bevy's default exposure.
    pub exposure: f32,
    pub clear_color: Color,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            fov_deg: 45.0,
            near: 0.1,
            far: 1000.0,
            exposure: 1.2,
            clear_color: Color::srgb(0.04, 0.05, 0.07),
        }
    }
}

/// EV100 that brightens the default exposure by `multiplier`; one stop doubles the light.
pub fn exposure_ev100(multiplier: f32) -> f32 {
    if multiplier > 0.0 {
        Exposure::EV100_BLENDER - multiplier.log2()
    } else {
        Exposure::EV100_BLENDER
    }
}

struct StageLight {
    color: Color,
    intensity: f32,
    position: Vec3,
}

fn stage_lights() -> [StageLight; 3] {
    [
        StageLight {
            color: Color::WHITE,
            intensity: 0.8,
            position: Vec3::new(5.0, 5.0, 5.0),
        },
        StageLight {
            color: Color::srgb_u8(0x4f, 0xac, 0xfe),
            intensity: 0.3,
            position: Vec3::new(-5.0, 0.0, -5.0),
        },
        StageLight {
            color: Color::WHITE,
            intensity: 0.5,
            position: Vec3::new(0.0, -5.0, -5.0),
        },
    ]
}

pub fn setup_stage(mut commands: Commands, settings: Res<StageSettings>) {
    commands.insert_resource(ClearColor(settings.clear_color));

    // Aimed once; the timelines only ever move the camera.
    commands.spawn((
        Camera3d::default(),
        ShowcaseCamera,
        Projection::from(PerspectiveProjection {
            fov: settings.fov_deg.to_radians(),
            near: settings.near,
            far: settings.far,
            ..default()
        }),
        Tonemapping::AcesFitted,
        Exposure {
            ev100: exposure_ev100(settings.exposure),
        },
        Transform::from_translation(INITIAL_CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.6 * AMBIENT_PER_INTENSITY,
        affects_lightmapped_meshes: true,
    });

    for light in stage_lights() {
        commands.spawn((
            DirectionalLight {
                color: light.color,
                illuminance: light.intensity * LUX_PER_INTENSITY,
                ..default()
            },
            Transform::from_translation(light.position).looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }
}

/// Seeds the metrics from the primary window before any resize event arrives.
pub fn init_viewport_metrics(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut metrics: ResMut<ViewportMetrics>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    metrics.width = window.width();
    metrics.height = window.height();
    debug!("viewport {}x{}", metrics.width, metrics.height);
}

pub fn track_viewport_resize(
    mut resized: EventReader<WindowResized>,
    mut metrics: ResMut<ViewportMetrics>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };
    metrics.width = last.width;
    metrics.height = last.height;
    debug!(
        "viewport resized to {}x{} (aspect {:.3})",
        metrics.width,
        metrics.height,
        metrics.aspect()
    );
}
