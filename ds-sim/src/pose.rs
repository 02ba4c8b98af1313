use bevy::prelude::{Component, EulerRot, Quat, Transform, Vec3};

/// Local translation plus XYZ-order Euler rotation of one model leaf.
///
/// This is the animated state of a leaf. The `Transform` is derived from it every time it
/// changes, so re-applying a pose never accumulates quaternion round-off.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct LeafPose {
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order.
    pub rotation: Vec3,
}

impl LeafPose {
    pub const fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    pub fn from_transform(transform: &Transform) -> Self {
        let (x, y, z) = transform.rotation.to_euler(EulerRot::XYZ);
        Self {
            position: transform.translation,
            rotation: Vec3::new(x, y, z),
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Writes translation and rotation, leaving scale alone.
    pub fn write_to(&self, transform: &mut Transform) {
        transform.translation = self.position;
        transform.rotation = self.quat();
    }
}
