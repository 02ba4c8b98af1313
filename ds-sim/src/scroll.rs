use crate::sections::SCROLL_LENGTH;

/// Exponential catch-up rate; about 98% of a gap closes within one lag period.
const CATCH_UP_RATE: f32 = 4.0;
const SNAP_EPSILON: f32 = 1e-4;

/// Scroll position over the section track, in section units.
///
/// `target` moves with input. `position` eases toward it the way a browser smooth-scrolls, and
/// `playhead` trails `position` by the scrub lag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrack {
    target: f32,
    position: f32,
    playhead: f32,
    length: f32,
}

impl Default for ScrollTrack {
    fn default() -> Self {
        Self::new(SCROLL_LENGTH)
    }
}

impl ScrollTrack {
    pub fn new(length: f32) -> Self {
        Self {
            target: 0.0,
            position: 0.0,
            playhead: 0.0,
            length: length.max(0.0),
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn playhead(&self) -> f32 {
        self.playhead
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Overall page progress, `0..=1`.
    pub fn page_progress(&self) -> f32 {
        if self.length > 0.0 {
            self.position / self.length
        } else {
            0.0
        }
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.target = (self.target + delta).clamp(0.0, self.length);
    }

    pub fn scroll_to(&mut self, target: f32) {
        self.target = target.clamp(0.0, self.length);
    }

    /// Moves everything to `target` immediately, without smoothing.
    pub fn jump_to(&mut self, target: f32) {
        self.scroll_to(target);
        self.position = self.target;
        self.playhead = self.target;
    }

    pub fn is_settled(&self) -> bool {
        self.position == self.target && self.playhead == self.position
    }

    pub fn advance(&mut self, dt: f32, smooth_secs: f32, scrub_secs: f32) {
        self.position = approach(self.position, self.target, dt, smooth_secs);
        self.playhead = approach(self.playhead, self.position, dt, scrub_secs);
    }
}

fn approach(current: f32, target: f32, dt: f32, lag: f32) -> f32 {
    if lag <= 0.0 || (target - current).abs() < SNAP_EPSILON {
        return target;
    }
    let k = 1.0 - (-dt.max(0.0) * CATCH_UP_RATE / lag).exp();
    let next = current + (target - current) * k;
    if (target - next).abs() < SNAP_EPSILON {
        target
    } else {
        next
    }
}
