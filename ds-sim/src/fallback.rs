//! Schematic stand-in drone, used when the real model cannot be loaded.

use std::f32::consts::FRAC_PI_2;
use std::f32::consts::FRAC_PI_4;

use bevy::prelude::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FallbackShape {
    Box { size: Vec3 },
    /// Y-aligned before rotation.
    Cylinder { radius: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackPiece {
    pub name: &'static str,
    pub shape: FallbackShape,
    pub translation: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
}

const ARM_REACH: f32 = 0.075;
const ROTOR_REACH: f32 = 0.13;
const ARM: FallbackShape = FallbackShape::Cylinder {
    radius: 0.008,
    height: 0.15,
};
const ROTOR: FallbackShape = FallbackShape::Cylinder {
    radius: 0.05,
    height: 0.004,
};

const fn arm(name: &'static str, sx: f32, sz: f32) -> FallbackPiece {
    // Lay the cylinder flat along X, then turn it onto the diagonal.
    let yaw = if sx * sz > 0.0 { -FRAC_PI_4 } else { FRAC_PI_4 };
    FallbackPiece {
        name,
        shape: ARM,
        translation: Vec3::new(sx * ARM_REACH, 0.0, sz * ARM_REACH),
        rotation: Vec3::new(0.0, yaw, FRAC_PI_2),
    }
}

const fn rotor(name: &'static str, sx: f32, sz: f32) -> FallbackPiece {
    FallbackPiece {
        name,
        shape: ROTOR,
        translation: Vec3::new(sx * ROTOR_REACH, 0.02, sz * ROTOR_REACH),
        rotation: Vec3::ZERO,
    }
}

pub const FALLBACK_PIECES: [FallbackPiece; 9] = [
    FallbackPiece {
        name: "core",
        shape: FallbackShape::Box {
            size: Vec3::new(0.12, 0.04, 0.12),
        },
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
    },
    arm("arm_front_right", 1.0, 1.0),
    arm("arm_front_left", -1.0, 1.0),
    arm("arm_back_right", 1.0, -1.0),
    arm("arm_back_left", -1.0, -1.0),
    rotor("rotor_front_right", 1.0, 1.0),
    rotor("rotor_front_left", -1.0, 1.0),
    rotor("rotor_back_right", 1.0, -1.0),
    rotor("rotor_back_left", -1.0, -1.0),
];
