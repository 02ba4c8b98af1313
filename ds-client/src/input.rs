use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use ds_render::ShowcaseScroll;
use ds_utils::{ShowcaseConfig, ViewportMetrics};

/// Sections moved per arrow key press.
const ARROW_STEP: f32 = 0.1;

/// Converts one wheel event into sections. Wheel down (negative `y`) scrolls forward; pixel
/// deltas are measured against the viewport height, since each section is one screen tall.
pub fn wheel_delta(unit: MouseScrollUnit, y: f32, wheel_step: f32, viewport_height: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => -y * wheel_step,
        MouseScrollUnit::Pixel if viewport_height > 0.0 => -y / viewport_height,
        MouseScrollUnit::Pixel => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyScroll {
    By(f32),
    Start,
    End,
}

pub fn key_scroll(keys: &ButtonInput<KeyCode>) -> Option<KeyScroll> {
    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    if keys.just_pressed(KeyCode::Home) {
        Some(KeyScroll::Start)
    } else if keys.just_pressed(KeyCode::End) {
        Some(KeyScroll::End)
    } else if keys.just_pressed(KeyCode::PageDown) {
        Some(KeyScroll::By(1.0))
    } else if keys.just_pressed(KeyCode::PageUp) {
        Some(KeyScroll::By(-1.0))
    } else if keys.just_pressed(KeyCode::Space) {
        Some(KeyScroll::By(if shift { -1.0 } else { 1.0 }))
    } else if keys.just_pressed(KeyCode::ArrowDown) {
        Some(KeyScroll::By(ARROW_STEP))
    } else if keys.just_pressed(KeyCode::ArrowUp) {
        Some(KeyScroll::By(-ARROW_STEP))
    } else {
        None
    }
}

pub fn wheel_scroll_system(
    mut mouse_wheel_events: EventReader<MouseWheel>,
    config: Res<ShowcaseConfig>,
    viewport: Res<ViewportMetrics>,
    mut scroll: ResMut<ShowcaseScroll>,
) {
    let mut delta = 0.0;
    for ev in mouse_wheel_events.read() {
        delta += wheel_delta(ev.unit, ev.y, config.wheel_step, viewport.height);
    }
    if delta.abs() < f32::EPSILON {
        return;
    }
    scroll.track.scroll_by(delta);
}

pub fn key_scroll_system(keys: Res<ButtonInput<KeyCode>>, mut scroll: ResMut<ShowcaseScroll>) {
    let Some(action) = key_scroll(&keys) else {
        return;
    };
    let track = &mut scroll.track;
    match action {
        KeyScroll::By(delta) => track.scroll_by(delta),
        KeyScroll::Start => track.scroll_to(0.0),
        KeyScroll::End => {
            let end = track.length();
            track.scroll_to(end);
        }
    }
}
