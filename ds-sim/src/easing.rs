#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    None,
    /// Quadratic ease-out, the default for timeline tweens.
    #[default]
    Power1Out,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::None => t,
            Self::Power1Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
        }
    }
}
