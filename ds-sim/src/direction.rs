use bevy::prelude::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

const MAX_REDRAWS: usize = 8;

/// Supplies the unit direction a part group flies along when the model comes apart.
pub trait DirectionSource {
    fn next_direction(&mut self) -> Vec3;
}

/// Per-axis uniform sample in `[-1, 1)`, normalized.
pub struct RandomDirections<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDirections<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDirections<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => {
                debug!("part directions seeded with {seed}");
                Self::seeded(seed)
            }
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> DirectionSource for RandomDirections<R> {
    fn next_direction(&mut self) -> Vec3 {
        for _ in 0..MAX_REDRAWS {
            let candidate = Vec3::new(
                self.rng.gen_range(-1.0..1.0),
                self.rng.gen_range(-1.0..1.0),
                self.rng.gen_range(-1.0..1.0),
            );
            if let Some(direction) = candidate.try_normalize() {
                return direction;
            }
        }
        warn!("no usable random direction after {MAX_REDRAWS} draws, using +Y");
        Vec3::Y
    }
}

/// Cycles through a fixed list of directions.
#[derive(Debug, Clone)]
pub struct FixedDirections {
    directions: Vec<Vec3>,
    next: usize,
}

impl FixedDirections {
    pub fn new(directions: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            directions: directions
                .into_iter()
                .map(|d| d.try_normalize().unwrap_or(Vec3::Y))
                .collect(),
            next: 0,
        }
    }
}

impl DirectionSource for FixedDirections {
    fn next_direction(&mut self) -> Vec3 {
        if self.directions.is_empty() {
            return Vec3::Y;
        }
        let direction = self.directions[self.next % self.directions.len()];
        self.next += 1;
        direction
    }
}
