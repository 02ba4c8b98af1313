use std::path::{Path, PathBuf};

use bevy::ecs::resource::Resource;

pub mod config;
pub use config::{ConfigError, ShowcaseConfig};

pub const DRONESCROLL_ASSETS_ROOT_ENV: &str = "DRONESCROLL_ASSETS_ROOT";

pub fn dronescroll_assets_root() -> PathBuf {
    if let Ok(explicit) = std::env::var(DRONESCROLL_ASSETS_ROOT_ENV) {
        let path = PathBuf::from(explicit);
        if path.exists() {
            return path;
        }
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(exe_dir) = exe.parent()
    {
        let sibling_assets = exe_dir.join("assets");
        if sibling_assets.exists() {
            return sibling_assets;
        }
    }

    let repo_assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("../ds-client/assets");
    if repo_assets.exists() {
        return repo_assets;
    }

    PathBuf::from("assets")
}

#[derive(Resource)]
pub struct AppState(pub ShowcasePhase);

impl Default for AppState {
    fn default() -> Self {
        Self(ShowcasePhase::Loading)
    }
}

impl AppState {
    pub fn is_ready(&self) -> bool {
        matches!(self.0, ShowcasePhase::Ready { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcasePhase {
    Loading,
    /// `fallback` is set when the stand-in model replaced the real one.
    Ready { fallback: bool },
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadingStatus {
    /// `0..=1`
    pub ratio: f32,
    pub failed: bool,
}

impl LoadingStatus {
    pub fn percent(&self) -> u32 {
        (self.ratio.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl ViewportMetrics {
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}
