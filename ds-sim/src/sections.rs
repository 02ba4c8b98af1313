//! The nine scroll sections and the tweens each one scrubs through.
//!
//! Every section spans one unit of scroll. A section's tweens start from whatever state the
//! sections before it left behind, so the whole page evaluates as one chain.

use std::f32::consts::PI;

use bevy::prelude::{Vec2, Vec3};

use crate::easing::Ease;

pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.3, 0.8);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tween {
    Camera(Vec3),
    RotationX(f32),
    RotationY(f32),
    Lift(f32),
    Scale(f32),
}

/// Maps a section's local scrub fraction onto global disassembly progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplodeMapping {
    pub base: f32,
    pub span: f32,
}

impl ExplodeMapping {
    pub fn progress(self, local: f32) -> f32 {
        self.base + local * self.span
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    pub anchor: &'static str,
    pub tweens: &'static [Tween],
    pub ease: Ease,
    pub explode: Option<ExplodeMapping>,
}

pub const SECTIONS: [SectionSpec; 9] = [
    SectionSpec {
        anchor: "screen1",
        tweens: &[Tween::RotationY(PI * 0.2), Tween::Lift(0.0)],
        ease: Ease::Power1Out,
        explode: None,
    },
    SectionSpec {
        anchor: "screen2",
        tweens: &[
            Tween::Camera(Vec3::new(0.2, 0.25, 0.5)),
            Tween::RotationY(PI * 0.5),
            Tween::RotationX(-PI * 0.1),
        ],
        ease: Ease::Power1Out,
        explode: None,
    },
    SectionSpec {
        anchor: "screen3",
        tweens: &[
            Tween::Camera(Vec3::new(-0.2, 0.2, 0.5)),
            Tween::RotationY(PI * 0.8),
            Tween::RotationX(PI * 0.1),
        ],
        ease: Ease::Power1Out,
        explode: None,
    },
    SectionSpec {
        anchor: "screen4",
        tweens: &[
            Tween::Camera(Vec3::new(0.0, 0.3, 1.2)),
            Tween::RotationY(PI * 1.2),
            Tween::RotationX(0.0),
        ],
        ease: Ease::Power1Out,
        explode: Some(ExplodeMapping {
            base: 0.0,
            span: 0.4,
        }),
    },
    SectionSpec {
        anchor: "screen5",
        tweens: &[Tween::RotationY(PI * 1.6)],
        ease: Ease::Power1Out,
        explode: Some(ExplodeMapping {
            base: 0.4,
            span: 0.3,
        }),
    },
    SectionSpec {
        anchor: "screen6",
        tweens: &[
            Tween::RotationY(PI * 2.0),
            Tween::Camera(INITIAL_CAMERA_POSITION),
        ],
        ease: Ease::Power1Out,
        explode: Some(ExplodeMapping {
            base: 0.7,
            span: -0.7,
        }),
    },
    SectionSpec {
        anchor: "screen7",
        tweens: &[Tween::Scale(0.01), Tween::RotationY(PI * 2.5)],
        ease: Ease::Power1Out,
        explode: None,
    },
    SectionSpec {
        anchor: "screen8",
        tweens: &[Tween::Scale(1.0), Tween::RotationY(PI * 3.0)],
        ease: Ease::Power1Out,
        explode: None,
    },
    SectionSpec {
        anchor: "screen9",
        tweens: &[Tween::RotationY(PI * 5.0)],
        ease: Ease::None,
        explode: None,
    },
];

pub const SECTION_COUNT: usize = SECTIONS.len();
pub const SCROLL_LENGTH: f32 = SECTION_COUNT as f32;

/// Everything the section timelines animate, apart from the model's parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageState {
    pub camera_position: Vec3,
    /// Model root rotation around X and Y, in radians.
    pub model_rotation: Vec2,
    /// Model root height.
    pub model_lift: f32,
    /// Multiplier on the normalized model size.
    pub model_scale: f32,
}

impl StageState {
    pub const INITIAL: Self = Self {
        camera_position: INITIAL_CAMERA_POSITION,
        model_rotation: Vec2::ZERO,
        model_lift: 0.0,
        model_scale: 1.0,
    };
}

impl Default for StageState {
    fn default() -> Self {
        Self::INITIAL
    }
}

fn mix(from: f32, to: f32, t: f32) -> f32 {
    if t >= 1.0 { to } else { from + (to - from) * t }
}

impl SectionSpec {
    /// State after scrubbing this section to `local`, starting from `from`.
    pub fn advance(&self, from: StageState, local: f32) -> StageState {
        let t = self.ease.apply(local.clamp(0.0, 1.0));
        let mut state = from;
        for tween in self.tweens {
            match *tween {
                Tween::Camera(to) => {
                    state.camera_position = Vec3::new(
                        mix(from.camera_position.x, to.x, t),
                        mix(from.camera_position.y, to.y, t),
                        mix(from.camera_position.z, to.z, t),
                    );
                }
                Tween::RotationX(to) => state.model_rotation.x = mix(from.model_rotation.x, to, t),
                Tween::RotationY(to) => state.model_rotation.y = mix(from.model_rotation.y, to, t),
                Tween::Lift(to) => state.model_lift = mix(from.model_lift, to, t),
                Tween::Scale(to) => state.model_scale = mix(from.model_scale, to, t),
            }
        }
        state
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionCursor {
    pub index: usize,
    pub anchor: &'static str,
    /// Scrub fraction inside the section, `0..=1`.
    pub local: f32,
}

pub fn section_at(scroll: f32) -> SectionCursor {
    let scroll = scroll.clamp(0.0, SCROLL_LENGTH);
    let index = (scroll.floor() as usize).min(SECTION_COUNT - 1);
    SectionCursor {
        index,
        anchor: SECTIONS[index].anchor,
        local: (scroll - index as f32).clamp(0.0, 1.0),
    }
}

pub fn stage_at(scroll: f32) -> StageState {
    let mut state = StageState::INITIAL;
    for (i, section) in SECTIONS.iter().enumerate() {
        let local = scroll - i as f32;
        if local <= 0.0 {
            break;
        }
        state = section.advance(state, local);
    }
    state
}

/// Disassembly progress for a scroll position.
///
/// The most recently entered section with an explode mapping decides; before the first such
/// section its mapping is held at `0`, after the last one at `1`.
pub fn explode_progress_at(scroll: f32) -> f32 {
    let mut active = None;
    for (i, section) in SECTIONS.iter().enumerate() {
        let Some(mapping) = section.explode else {
            continue;
        };
        let local = (scroll - i as f32).clamp(0.0, 1.0);
        match active {
            None => active = Some((mapping, local)),
            Some(_) if scroll >= i as f32 => active = Some((mapping, local)),
            Some(_) => break,
        }
    }
    active.map_or(0.0, |(mapping, local)| mapping.progress(local))
}
