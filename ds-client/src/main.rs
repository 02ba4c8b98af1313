use std::path::PathBuf;
use std::process::ExitCode;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use clap::Parser;
use ds_render::RenderPlugin;
use ds_ui::UiPlugin;
use ds_utils::{ShowcaseConfig, dronescroll_assets_root};
use tracing::{error, info};

mod input;
mod plugins;

use plugins::ScrollInputPlugin;

#[derive(Parser, Debug)]
#[command(name = "dronescroll")]
#[command(about = "Scroll-driven drone showcase")]
struct Cli {
    /// TOML config file; `dronescroll.toml` in the working directory is used when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model to load, relative to the assets root
    #[arg(long)]
    model: Option<String>,

    /// Fixed seed for the part directions
    #[arg(long)]
    seed: Option<u64>,

    /// Log at debug level (twice for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    fn apply_overrides(&self, config: &mut ShowcaseConfig) {
        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(seed) = self.seed {
            config.direction_seed = Some(seed);
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .without_time()
        .compact()
        .init();

    let mut config = match ShowcaseConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut config);

    let assets_root = dronescroll_assets_root();
    info!(
        "Starting dronescroll (assets: {}, model: {})",
        assets_root.display(),
        config.model_path
    );

    let window = Window {
        title: config.window_title.clone(),
        resolution: WindowResolution::new(config.window_width, config.window_height),
        ..default()
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(window),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: assets_root.to_string_lossy().into_owned(),
                    ..default()
                }),
        )
        .insert_resource(config)
        .add_plugins((RenderPlugin, UiPlugin, ScrollInputPlugin))
        .run();

    ExitCode::SUCCESS
}
