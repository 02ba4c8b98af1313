use std::collections::HashMap;

use bevy::math::Affine3A;
use bevy::prelude::*;
use ds_sim::bounds::{Bounds3, NORMALIZED_SIZE, Normalization};
use ds_sim::direction::RandomDirections;
use ds_sim::partition::{PART_METALLIC, PART_ROUGHNESS, PartGroup, PartTint, partition};
use ds_sim::pose::LeafPose;
use ds_sim::rig::DisassemblyRig;
use ds_utils::{AppState, LoadingStatus, ShowcaseConfig, ShowcasePhase};
use tracing::{info, warn};

use crate::components::PendingPartition;

pub struct CollectedLeaf {
    /// Entity whose transform the disassembly animates.
    pub entity: Entity,
    /// Entity carrying the mesh and material; differs from `entity` for glTF primitives.
    pub mesh_entity: Entity,
    pub mesh: Option<Handle<Mesh>>,
    /// Mesh transform relative to the frame.
    pub frame_affine: Affine3A,
}

/// Depth-first, pre-order walk of everything under `frame`, returning mesh nodes in visit order.
///
/// The glTF loader puts each primitive on an identity child of the node that carries the real
/// transform. A node whose only mesh child is that primitive is animated in its place, so part
/// offsets are applied in the node's parent space.
pub fn collect_leaves(
    frame: Entity,
    children: &Query<&Children>,
    nodes: &Query<(&Transform, Option<&Mesh3d>)>,
) -> Vec<CollectedLeaf> {
    let mut leaves = Vec::new();
    let mut stack: Vec<(Entity, Entity, Affine3A)> = Vec::new();
    push_children(frame, Affine3A::IDENTITY, children, nodes, &mut stack);

    while let Some((entity, parent, affine)) = stack.pop() {
        if let Ok((_, mesh)) = nodes.get(entity)
            && let Some(mesh) = mesh
        {
            let animated = if parent != frame && is_sole_primitive(parent, children, nodes) {
                parent
            } else {
                entity
            };
            leaves.push(CollectedLeaf {
                entity: animated,
                mesh_entity: entity,
                mesh: Some(mesh.0.clone()),
                frame_affine: affine,
            });
        }
        push_children(entity, affine, children, nodes, &mut stack);
    }
    leaves
}

/// True when `parent` has no mesh of its own and exactly one mesh child.
fn is_sole_primitive(
    parent: Entity,
    children: &Query<&Children>,
    nodes: &Query<(&Transform, Option<&Mesh3d>)>,
) -> bool {
    if !matches!(nodes.get(parent), Ok((_, None))) {
        return false;
    }
    let Ok(kids) = children.get(parent) else {
        return false;
    };
    let kids: &[Entity] = kids;
    kids.iter()
        .filter(|kid| matches!(nodes.get(**kid), Ok((_, Some(_)))))
        .count()
        == 1
}

fn push_children(
    parent: Entity,
    parent_affine: Affine3A,
    children: &Query<&Children>,
    nodes: &Query<(&Transform, Option<&Mesh3d>)>,
    stack: &mut Vec<(Entity, Entity, Affine3A)>,
) {
    let Ok(kids) = children.get(parent) else {
        return;
    };
    let kids: &[Entity] = kids;
    // Reversed so the first child is popped first.
    for &child in kids.iter().rev() {
        let local = nodes
            .get(child)
            .map(|(transform, _)| transform.compute_affine())
            .unwrap_or(Affine3A::IDENTITY);
        stack.push((child, parent, parent_affine * local));
    }
}

pub fn leaf_bounds(leaves: &[CollectedLeaf], meshes: &Assets<Mesh>) -> Option<Bounds3> {
    leaves
        .iter()
        .filter_map(|leaf| {
            let mesh = meshes.get(leaf.mesh.as_ref()?)?;
            let positions = mesh.attribute(Mesh::ATTRIBUTE_POSITION)?.as_float3()?;
            let local = Bounds3::from_points(positions.iter().map(|p| Vec3::from_array(*p)))?;
            Some(local.transformed(&leaf.frame_affine))
        })
        .reduce(Bounds3::union)
}

fn tinted_material(base: Option<&StandardMaterial>, tint: PartTint) -> StandardMaterial {
    let [r, g, b] = tint.rgb_u8();
    StandardMaterial {
        base_color: Color::srgb_u8(r, g, b),
        metallic: PART_METALLIC,
        perceptual_roughness: PART_ROUGHNESS,
        ..base.cloned().unwrap_or_default()
    }
}

/// Recolors every leaf by its group's tint. Materials shared between leaves of the same group are
/// cloned once so textures survive.
fn tint_groups(
    commands: &mut Commands,
    groups: &[PartGroup],
    mesh_entities: &HashMap<Entity, Entity>,
    leaf_materials: &Query<&MeshMaterial3d<StandardMaterial>>,
    materials: &mut Assets<StandardMaterial>,
) {
    let mut cache: HashMap<(Option<AssetId<StandardMaterial>>, PartTint), Handle<StandardMaterial>> =
        HashMap::new();
    for group in groups {
        for leaf in group.leaves() {
            let leaf = mesh_entities.get(&leaf).copied().unwrap_or(leaf);
            let source = leaf_materials.get(leaf).ok().map(|m| m.0.clone());
            let key = (source.as_ref().map(Handle::id), group.tint);
            let handle = match cache.get(&key) {
                Some(handle) => handle.clone(),
                None => {
                    let material =
                        tinted_material(source.as_ref().and_then(|h| materials.get(h)), group.tint);
                    let handle = materials.add(material);
                    cache.insert(key, handle.clone());
                    handle
                }
            };
            commands.entity(leaf).insert(MeshMaterial3d(handle));
        }
    }
}

pub fn partition_pending_models(
    mut commands: Commands,
    pending: Query<(Entity, &PendingPartition)>,
    children: Query<&Children>,
    nodes: Query<(&Transform, Option<&Mesh3d>)>,
    leaf_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    meshes: Res<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ShowcaseConfig>,
    mut app_state: ResMut<AppState>,
    mut status: ResMut<LoadingStatus>,
) {
    for (frame, request) in &pending {
        let collected = collect_leaves(frame, &children, &nodes);
        if collected.is_empty() {
            warn!("model frame {frame} has no mesh leaves");
        }

        let fit = Normalization::fit(leaf_bounds(&collected, &meshes), NORMALIZED_SIZE);
        commands.entity(frame).insert(
            Transform::from_translation(fit.translation).with_scale(Vec3::splat(fit.scale)),
        );

        // Baselines come from the untouched local transforms, before any tint or offset.
        let leaves: Vec<(Entity, LeafPose)> = collected
            .iter()
            .filter_map(|leaf| {
                let (transform, _) = nodes.get(leaf.entity).ok()?;
                Some((leaf.entity, LeafPose::from_transform(transform)))
            })
            .collect();
        for &(entity, pose) in &leaves {
            commands.entity(entity).insert(pose);
        }

        let mut directions = RandomDirections::from_seed_option(config.direction_seed);
        let groups = partition(&leaves, request.parts_count, &mut directions);
        let mesh_entities: HashMap<Entity, Entity> = collected
            .iter()
            .map(|leaf| (leaf.entity, leaf.mesh_entity))
            .collect();
        tint_groups(
            &mut commands,
            &groups,
            &mesh_entities,
            &leaf_materials,
            &mut materials,
        );

        let rig = DisassemblyRig::new(groups, request.parts_count, request.fallback);
        info!(
            "split {} leaves into {} parts {:?} (scale {:.4}, fallback: {})",
            rig.leaf_count(),
            rig.groups().len(),
            rig.group_sizes(),
            fit.scale,
            request.fallback
        );

        commands.insert_resource(rig);
        commands.entity(frame).remove::<PendingPartition>();
        app_state.0 = ShowcasePhase::Ready {
            fallback: request.fallback,
        };
        status.ratio = 1.0;
    }
}
