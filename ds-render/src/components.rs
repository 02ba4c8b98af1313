use bevy::prelude::*;

/// Root the section timelines rotate, lift and scale.
#[derive(Component)]
pub struct ShowcaseModel;

/// Holds the model content and its normalization transform.
#[derive(Component)]
pub struct ModelFrame;

#[derive(Component)]
pub struct ShowcaseCamera;

/// Marks a frame whose content is spawned and waiting to be split into parts.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingPartition {
    pub parts_count: usize,
    pub fallback: bool,
}
