use std::collections::HashMap;
use std::f32::consts::PI;

use bevy::math::Affine3A;
use bevy::prelude::{Entity, Quat, Transform, Vec3};

use super::bounds::{Bounds3, NORMALIZED_SIZE, Normalization};
use super::direction::{DirectionSource, FixedDirections, RandomDirections};
use super::disassembly::{self, MAX_DISTANCE, group_offset, pose_at};
use super::easing::Ease;
use super::fallback::{FALLBACK_PIECES, FallbackShape};
use super::partition::{
    FALLBACK_PARTS_COUNT, PRIMARY_PARTS_COUNT, PartGroup, PartTint, group_sizes, partition,
};
use super::pose::LeafPose;
use super::rig::DisassemblyRig;
use super::scroll::ScrollTrack;
use super::sections::{
    INITIAL_CAMERA_POSITION, SCROLL_LENGTH, SECTIONS, StageState, explode_progress_at,
    section_at, stage_at,
};

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-5, "{a} != {b}");
}

fn assert_vec_close(a: Vec3, b: Vec3) {
    assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
}

fn leaves(count: usize) -> Vec<(Entity, LeafPose)> {
    (0..count)
        .map(|i| {
            let f = i as f32;
            (
                Entity::from_raw(i as u32),
                LeafPose::new(
                    Vec3::new(f * 0.01, -f * 0.02, 0.003 * f * f),
                    Vec3::new(0.1 * f, -0.05 * f, 0.2),
                ),
            )
        })
        .collect()
}

fn directions() -> FixedDirections {
    FixedDirections::new([
        Vec3::X,
        Vec3::Y,
        Vec3::Z,
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, -1.0, 1.0),
        Vec3::new(-1.0, 0.5, 0.25),
    ])
}

fn live_poses(leaves: &[(Entity, LeafPose)]) -> HashMap<Entity, LeafPose> {
    leaves.iter().copied().collect()
}

fn group_of(groups: &[PartGroup], leaf: Entity) -> usize {
    groups
        .iter()
        .find(|g| g.leaves().any(|l| l == leaf))
        .map(|g| g.index)
        .expect("leaf not partitioned")
}

#[test]
fn round_robin_assignment() {
    for (count, parts) in [(1, 6), (5, 6), (6, 6), (13, 6), (40, 6), (7, 3), (9, 1)] {
        let input = leaves(count);
        let groups = partition(&input, parts, &mut directions());

        for (i, (leaf, _)) in input.iter().enumerate() {
            assert_eq!(group_of(&groups, *leaf), i % parts);
        }

        let sizes = group_sizes(&groups);
        let min = sizes.iter().copied().min().unwrap();
        let max = sizes.iter().copied().max().unwrap();
        assert!(max - min <= 1, "uneven sizes {sizes:?}");
        assert_eq!(sizes.iter().sum::<usize>(), count);
    }
}

#[test]
fn thirteen_leaves_into_six_parts() {
    let input = leaves(13);
    let groups = partition(&input, PRIMARY_PARTS_COUNT, &mut directions());

    assert_eq!(group_sizes(&groups), vec![3, 2, 2, 2, 2, 2]);
    let first: Vec<Entity> = groups[0].leaves().collect();
    assert_eq!(
        first,
        vec![Entity::from_raw(0), Entity::from_raw(6), Entity::from_raw(12)]
    );
    for group in &groups {
        let expected = if group.index == 3 {
            PartTint::Accent
        } else {
            PartTint::Neutral
        };
        assert_eq!(group.tint, expected);
    }
    assert_eq!(PartTint::Accent.rgb_u8(), [0x4f, 0xac, 0xfe]);
    assert_eq!(PartTint::Neutral.rgb_u8(), [0x80, 0x80, 0x80]);
}

#[test]
fn directions_are_drawn_once_per_group() {
    let input = leaves(13);
    let groups = partition(&input, PRIMARY_PARTS_COUNT, &mut directions());

    assert_vec_close(groups[0].direction, Vec3::X);
    assert_vec_close(groups[1].direction, Vec3::Y);
    assert_vec_close(groups[3].direction, Vec3::new(1.0, 1.0, 0.0).normalize());
    for group in &groups {
        assert_close(group.direction.length(), 1.0);
    }
}

#[test]
fn degenerate_inputs() {
    assert!(partition(&[], PRIMARY_PARTS_COUNT, &mut directions()).is_empty());

    let groups = partition(&leaves(4), PRIMARY_PARTS_COUNT, &mut directions());
    assert_eq!(groups.len(), 4);
    assert!(groups.iter().all(|g| g.len() == 1));

    let groups = partition(&leaves(5), 0, &mut directions());
    assert_eq!(group_sizes(&groups), vec![5]);
}

#[test]
fn baselines_match_pre_partition_poses() {
    let input = leaves(13);
    let groups = partition(&input, PRIMARY_PARTS_COUNT, &mut directions());
    let before = live_poses(&input);

    for group in &groups {
        for record in &group.records {
            assert_eq!(record.baseline, before[&record.leaf]);
        }
    }
}

#[test]
fn offset_arithmetic_is_exact_for_fixed_directions() {
    let input = leaves(13);
    let groups = partition(&input, PRIMARY_PARTS_COUNT, &mut directions());

    // group 2 flies along +Z with stagger 1.4
    let offset = group_offset(&groups[2], 0.5);
    assert_vec_close(offset, Vec3::new(0.0, 0.0, 0.5 * MAX_DISTANCE * 1.4));

    let record = groups[2].records[0];
    let pose = pose_at(&record, &groups[2], 0.5);
    assert_vec_close(pose.position, record.baseline.position + offset);
    assert_close(pose.rotation.x, record.baseline.rotation.x + 0.5 * PI * 0.5);
    assert_close(pose.rotation.y, record.baseline.rotation.y + 0.5 * PI * 0.3);
    assert_eq!(pose.rotation.z, record.baseline.rotation.z);
}

#[test]
fn apply_is_idempotent() {
    let input = leaves(13);
    let groups = partition(&input, PRIMARY_PARTS_COUNT, &mut directions());
    let mut live = live_poses(&input);

    disassembly::apply(0.37, &groups, &mut live);
    let once = live.clone();
    disassembly::apply(0.37, &groups, &mut live);
    assert_eq!(live, once);
}

#[test]
fn zero_progress_restores_baselines() {
    let input = leaves(13);
    let groups = partition(&input, PRIMARY_PARTS_COUNT, &mut directions());
    let mut live = live_poses(&input);
    let baseline = live.clone();

    for progress in [0.1, 0.9, 0.4, 1.03, -0.02, 0.7] {
        disassembly::apply(progress, &groups, &mut live);
    }
    assert_ne!(live, baseline);

    disassembly::apply(0.0, &groups, &mut live);
    assert_eq!(live, baseline);
}

#[test]
fn later_groups_travel_farther() {
    let input = leaves(13);
    let groups = partition(&input, PRIMARY_PARTS_COUNT, &mut directions());

    for progress in [0.05, 0.4, 0.7, 1.0] {
        let distances: Vec<f32> = groups
            .iter()
            .map(|g| group_offset(g, progress).length())
            .collect();
        for pair in distances.windows(2) {
            assert!(pair[1] >= pair[0], "{distances:?}");
        }
    }
}

#[test]
fn fallback_parts_move_together() {
    let input = leaves(9);
    let groups = partition(&input, FALLBACK_PARTS_COUNT, &mut directions());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].tint, PartTint::Accent);

    let mut live = live_poses(&input);
    disassembly::apply(0.7, &groups, &mut live);

    let a = input[0].1.position - input[5].1.position;
    let b = live[&input[0].0].position - live[&input[5].0].position;
    assert_vec_close(a, b);
    assert_close(
        live[&input[3].0].rotation.x,
        input[3].1.rotation.x + 0.7 * PI * 0.5,
    );
}

#[test]
fn scrolling_through_the_page_reassembles_exactly() {
    let input = leaves(13);
    let groups = partition(&input, PRIMARY_PARTS_COUNT, &mut directions());
    let mut rig = DisassemblyRig::new(groups, PRIMARY_PARTS_COUNT, false);
    let mut live = live_poses(&input);
    let baseline = live.clone();

    let steps = 900;
    let mut peak = 0.0f32;
    for step in 0..=steps {
        let scroll = SCROLL_LENGTH * step as f32 / steps as f32;
        let progress = explode_progress_at(scroll);
        peak = peak.max(progress);
        if rig.needs_update(progress) {
            rig.apply(progress, &mut live);
        }
    }

    assert_close(peak, 0.7);
    assert_eq!(rig.last_progress(), Some(0.0));
    assert_eq!(live, baseline);
}

#[test]
fn explode_mapping_follows_section_table() {
    assert_eq!(explode_progress_at(0.0), 0.0);
    assert_eq!(explode_progress_at(2.5), 0.0);
    assert_close(explode_progress_at(3.5), 0.2);
    assert_close(explode_progress_at(4.0), 0.4);
    assert_close(explode_progress_at(4.5), 0.55);
    assert_close(explode_progress_at(5.0), 0.7);
    assert_close(explode_progress_at(5.5), 0.35);
    assert_eq!(explode_progress_at(6.0), 0.0);
    assert_eq!(explode_progress_at(8.7), 0.0);
}

#[test]
fn stage_chain_reaches_section_targets() {
    assert_eq!(stage_at(0.0), StageState::INITIAL);

    let after_two = stage_at(2.0);
    assert_vec_close(after_two.camera_position, Vec3::new(0.2, 0.25, 0.5));
    assert_close(after_two.model_rotation.y, PI * 0.5);
    assert_close(after_two.model_rotation.x, -PI * 0.1);

    let after_six = stage_at(6.0);
    assert_vec_close(after_six.camera_position, INITIAL_CAMERA_POSITION);
    assert_close(after_six.model_rotation.y, PI * 2.0);
    assert_close(after_six.model_rotation.x, 0.0);

    assert_close(stage_at(7.0).model_scale, 0.01);

    let end = stage_at(SCROLL_LENGTH);
    assert_close(end.model_scale, 1.0);
    assert_close(end.model_rotation.y, PI * 5.0);
}

#[test]
fn tweens_start_from_previous_section_state() {
    // screen2 halfway: power1.out gives 0.75 of the way from screen1's end state
    let mid = stage_at(1.5);
    let start = PI * 0.2;
    assert_close(mid.model_rotation.y, start + (PI * 0.5 - start) * 0.75);

    // screen9 is linear
    let late = stage_at(8.5);
    assert_close(late.model_rotation.y, PI * 3.0 + (PI * 5.0 - PI * 3.0) * 0.5);
}

#[test]
fn section_cursor_tracks_anchor() {
    let cursor = section_at(0.0);
    assert_eq!((cursor.index, cursor.anchor), (0, "screen1"));

    let cursor = section_at(4.25);
    assert_eq!(cursor.anchor, "screen5");
    assert_close(cursor.local, 0.25);

    let cursor = section_at(SCROLL_LENGTH + 3.0);
    assert_eq!(cursor.anchor, "screen9");
    assert_eq!(cursor.local, 1.0);

    assert_eq!(SECTIONS.iter().filter(|s| s.explode.is_some()).count(), 3);
}

#[test]
fn easing_endpoints() {
    for ease in [Ease::None, Ease::Power1Out] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
    assert_close(Ease::Power1Out.apply(0.5), 0.75);
}

#[test]
fn scroll_track_clamps_and_settles() {
    let mut track = ScrollTrack::default();
    track.scroll_by(-2.0);
    assert_eq!(track.target(), 0.0);
    track.scroll_by(100.0);
    assert_eq!(track.target(), SCROLL_LENGTH);

    track.scroll_to(3.0);
    for _ in 0..600 {
        track.advance(1.0 / 60.0, 0.15, 1.0);
    }
    assert!(track.is_settled());
    assert_eq!(track.position(), 3.0);
    assert_eq!(track.playhead(), 3.0);
}

#[test]
fn scrub_playhead_trails_position() {
    let mut track = ScrollTrack::default();
    track.scroll_to(2.0);
    track.advance(0.1, 0.0, 1.0);
    assert_eq!(track.position(), 2.0);
    assert!(track.playhead() > 0.0 && track.playhead() < 2.0);

    track.jump_to(5.0);
    assert!(track.is_settled());
    assert_close(track.page_progress(), 5.0 / SCROLL_LENGTH);
}

#[test]
fn normalization_fits_largest_dimension() {
    let bounds = Bounds3::from_points([
        Vec3::new(2.0, -1.0, 0.0),
        Vec3::new(12.0, 3.0, 1.0),
        Vec3::new(5.0, 0.0, -1.0),
    ]);
    let fit = Normalization::fit(bounds, NORMALIZED_SIZE);
    assert_close(fit.scale, 0.04);
    assert_vec_close(fit.translation, Vec3::new(-7.0, -1.0, 0.0) * 0.04);

    let bounds = bounds.unwrap();
    let normalized = bounds.transformed(&Affine3A::from_scale_rotation_translation(
        Vec3::splat(fit.scale),
        Quat::IDENTITY,
        fit.translation,
    ));
    assert_vec_close(normalized.center(), Vec3::ZERO);
    assert_close(normalized.max_dimension(), NORMALIZED_SIZE);

    assert_eq!(Normalization::fit(None, 0.4), Normalization::IDENTITY);
    let flat = Bounds3::from_points([Vec3::ONE, Vec3::ONE]);
    assert_eq!(Normalization::fit(flat, 0.4), Normalization::IDENTITY);
}

#[test]
fn rotated_bounds_cover_corners() {
    let bounds = Bounds3 {
        min: Vec3::new(-1.0, -0.5, -0.5),
        max: Vec3::new(1.0, 0.5, 0.5),
    };
    let turned = bounds.transformed(&Affine3A::from_rotation_y(PI * 0.5));
    assert_vec_close(turned.size(), Vec3::new(1.0, 1.0, 2.0));
}

#[test]
fn random_directions_are_unit_and_reproducible() {
    let mut a = RandomDirections::seeded(7);
    let mut b = RandomDirections::seeded(7);
    for _ in 0..32 {
        let da = a.next_direction();
        assert_close(da.length(), 1.0);
        assert_eq!(da, b.next_direction());
    }
}

#[test]
fn fixed_directions_cycle_and_normalize() {
    let mut fixed = FixedDirections::new([Vec3::new(0.0, 3.0, 0.0), Vec3::new(2.0, 0.0, 0.0)]);
    assert_eq!(fixed.next_direction(), Vec3::Y);
    assert_eq!(fixed.next_direction(), Vec3::X);
    assert_eq!(fixed.next_direction(), Vec3::Y);

    let mut empty = FixedDirections::new([]);
    assert_eq!(empty.next_direction(), Vec3::Y);
}

#[test]
fn pose_round_trips_through_transform() {
    let pose = LeafPose::new(Vec3::new(0.1, 0.2, 0.3), Vec3::new(0.4, -0.3, 0.2));
    let mut transform = Transform::from_scale(Vec3::splat(2.0));
    pose.write_to(&mut transform);
    assert_eq!(transform.scale, Vec3::splat(2.0));

    let back = LeafPose::from_transform(&transform);
    assert_vec_close(back.position, pose.position);
    assert_vec_close(back.rotation, pose.rotation);
}

#[test]
fn fallback_drone_is_symmetric() {
    let boxes = FALLBACK_PIECES
        .iter()
        .filter(|p| matches!(p.shape, FallbackShape::Box { .. }))
        .count();
    assert_eq!(boxes, 1);
    assert_eq!(FALLBACK_PIECES.len(), 9);

    let sum: Vec3 = FALLBACK_PIECES.iter().map(|p| p.translation).sum();
    assert_close(sum.x, 0.0);
    assert_close(sum.z, 0.0);
}
