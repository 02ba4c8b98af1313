use bevy::asset::{LoadState, RecursiveDependencyLoadState, UntypedAssetId};
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use ds_sim::fallback::{FALLBACK_PIECES, FallbackShape};
use ds_sim::partition::{
    FALLBACK_PARTS_COUNT, PART_METALLIC, PART_ROUGHNESS, PRIMARY_PARTS_COUNT, PartTint,
};
use ds_sim::pose::LeafPose;
use ds_utils::{LoadingStatus, ShowcaseConfig};
use tracing::{error, info, warn};

use crate::components::{ModelFrame, PendingPartition, ShowcaseModel};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Pending,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadProgress {
    Loading(f32),
    /// The root asset loaded but one of its dependencies did not; the scene still spawns.
    DependencyFailed(String),
    Done,
    Failed(String),
}

/// The one model request of the session and where it ended up.
#[derive(Resource)]
pub struct ModelLoad {
    pub path: String,
    pub gltf: Handle<Gltf>,
    pub scene: Handle<Scene>,
    pub root: Entity,
    pub frame: Entity,
    pub outcome: LoadOutcome,
    last_percent: Option<u32>,
    warned_dependencies: bool,
}

impl ModelLoad {
    pub fn new(
        path: String,
        gltf: Handle<Gltf>,
        scene: Handle<Scene>,
        root: Entity,
        frame: Entity,
    ) -> Self {
        Self {
            path,
            gltf,
            scene,
            root,
            frame,
            outcome: LoadOutcome::Pending,
            last_percent: None,
            warned_dependencies: false,
        }
    }
}

/// Folds asset server states into a progress ratio: the root file counts for the first half, its
/// dependencies for the second. Only the root asset itself can fail the load.
pub fn load_progress(
    state: Option<&LoadState>,
    dependencies: Option<&RecursiveDependencyLoadState>,
) -> LoadProgress {
    match (state, dependencies) {
        (Some(LoadState::Failed(err)), _) => LoadProgress::Failed(err.to_string()),
        (Some(LoadState::Loaded), Some(RecursiveDependencyLoadState::Loaded)) => LoadProgress::Done,
        (Some(LoadState::Loaded), Some(RecursiveDependencyLoadState::Failed(err))) => {
            LoadProgress::DependencyFailed(err.to_string())
        }
        (Some(LoadState::Loaded), _) => LoadProgress::Loading(0.5),
        _ => LoadProgress::Loading(0.0),
    }
}

/// Merges the glTF file and its first scene; either root failing fails the model.
pub fn merge_progress(gltf: LoadProgress, scene: LoadProgress) -> LoadProgress {
    use LoadProgress::*;
    match (gltf, scene) {
        (Failed(reason), _) | (_, Failed(reason)) => Failed(reason),
        (DependencyFailed(reason), _) | (_, DependencyFailed(reason)) => DependencyFailed(reason),
        (Done, Done) => Done,
        (Loading(a), Done) | (Done, Loading(a)) => Loading(a.max(0.5)),
        (Loading(a), Loading(b)) => Loading(a.min(b)),
    }
}

fn combined_progress(asset_server: &AssetServer, load: &ModelLoad) -> LoadProgress {
    let progress_of = |id: UntypedAssetId| {
        let states = asset_server.get_load_states(id);
        load_progress(
            states.as_ref().map(|(state, _, _)| state),
            states.as_ref().map(|(_, _, deps)| deps),
        )
    };
    merge_progress(
        progress_of(load.gltf.id().untyped()),
        progress_of(load.scene.id().untyped()),
    )
}

pub fn request_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ShowcaseConfig>,
) {
    let path = config.model_path.clone();
    info!("requesting model {path}");
    let gltf = asset_server.load::<Gltf>(path.clone());
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()));

    let root = commands
        .spawn((
            ShowcaseModel,
            Name::new("showcase_model"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();
    let frame = commands
        .spawn((ModelFrame, Name::new("model_frame"), SceneRoot(scene.clone())))
        .observe(mark_scene_ready)
        .id();
    commands.entity(root).add_child(frame);

    commands.insert_resource(ModelLoad::new(path, gltf, scene, root, frame));
}

fn mark_scene_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    mut load: ResMut<ModelLoad>,
) {
    if matches!(load.outcome, LoadOutcome::Failed(_)) {
        return;
    }
    load.outcome = LoadOutcome::Loaded;
    info!("model {} spawned", load.path);
    commands.entity(trigger.target()).insert(PendingPartition {
        parts_count: PRIMARY_PARTS_COUNT,
        fallback: false,
    });
}

pub fn watch_model_load(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut load: ResMut<ModelLoad>,
    mut status: ResMut<LoadingStatus>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if load.outcome != LoadOutcome::Pending {
        return;
    }
    let progress = combined_progress(&asset_server, &load);
    settle_model_load(
        progress,
        &mut commands,
        &mut load,
        &mut status,
        &mut meshes,
        &mut materials,
    );
}

/// Applies one poll result. A root failure swaps in the fallback drone; anything else only
/// reports progress until the scene instance is ready.
pub fn settle_model_load(
    progress: LoadProgress,
    commands: &mut Commands,
    load: &mut ModelLoad,
    status: &mut LoadingStatus,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    if load.outcome != LoadOutcome::Pending {
        return;
    }

    match progress {
        LoadProgress::Loading(ratio) => report_percent(load, status, ratio),
        LoadProgress::DependencyFailed(reason) => {
            if !load.warned_dependencies {
                load.warned_dependencies = true;
                warn!("model {} is missing a dependency: {reason}", load.path);
            }
            report_percent(load, status, 0.5);
        }
        LoadProgress::Done => report_percent(load, status, 1.0),
        LoadProgress::Failed(reason) => {
            error!("Error loading model {}: {reason}", load.path);
            status.ratio = 1.0;
            status.failed = true;
            load.outcome = LoadOutcome::Failed(reason);

            commands.entity(load.frame).despawn();
            let frame = spawn_fallback_frame(commands, meshes, materials);
            commands.entity(load.root).add_child(frame);
            load.frame = frame;
            info!("substituted fallback drone");
        }
    }
}

fn report_percent(load: &mut ModelLoad, status: &mut LoadingStatus, ratio: f32) {
    status.ratio = ratio;
    let percent = status.percent();
    if load.last_percent != Some(percent) {
        load.last_percent = Some(percent);
        info!("Loading: {percent}%");
    }
}

fn fallback_mesh(shape: FallbackShape) -> Mesh {
    match shape {
        FallbackShape::Box { size } => Mesh::from(Cuboid::from_size(size)),
        FallbackShape::Cylinder { radius, height } => Mesh::from(Cylinder::new(radius, height)),
    }
}

/// Spawns the schematic drone as a frame ready for partitioning with a single group.
pub fn spawn_fallback_frame(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let [r, g, b] = PartTint::Neutral.rgb_u8();
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(r, g, b),
        metallic: PART_METALLIC,
        perceptual_roughness: PART_ROUGHNESS,
        ..default()
    });

    commands
        .spawn((
            ModelFrame,
            Name::new("fallback_drone"),
            Transform::default(),
            Visibility::default(),
            PendingPartition {
                parts_count: FALLBACK_PARTS_COUNT,
                fallback: true,
            },
        ))
        .with_children(|parent| {
            for piece in FALLBACK_PIECES.iter() {
                let pose = LeafPose::new(piece.translation, piece.rotation);
                let mut transform = Transform::default();
                pose.write_to(&mut transform);
                parent.spawn((
                    Name::new(piece.name),
                    Mesh3d(meshes.add(fallback_mesh(piece.shape))),
                    MeshMaterial3d(material.clone()),
                    transform,
                ));
            }
        })
        .id()
}
