use bevy::math::Affine3A;
use bevy::prelude::Vec3;

/// Edge length of the largest model dimension after normalization.
pub const NORMALIZED_SIZE: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds3 {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for point in points {
            bounds.min = bounds.min.min(point);
            bounds.max = bounds.max.max(point);
        }
        Some(bounds)
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    /// Axis-aligned bounds of the eight transformed corners.
    pub fn transformed(&self, affine: &Affine3A) -> Self {
        let corners = (0..8).map(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        });
        let mut out = Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        };
        for corner in corners {
            let p = affine.transform_point3(corner);
            out.min = out.min.min(p);
            out.max = out.max.max(p);
        }
        out
    }
}

/// Recentering and uniform scale that fit a model into `NORMALIZED_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub translation: Vec3,
    pub scale: f32,
}

impl Normalization {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        scale: 1.0,
    };

    pub fn fit(bounds: Option<Bounds3>, target_size: f32) -> Self {
        let Some(bounds) = bounds else {
            return Self::IDENTITY;
        };
        let max_dim = bounds.max_dimension();
        if !max_dim.is_finite() || max_dim <= f32::EPSILON {
            return Self::IDENTITY;
        }
        let scale = target_size / max_dim;
        Self {
            translation: -bounds.center() * scale,
            scale,
        }
    }
}
