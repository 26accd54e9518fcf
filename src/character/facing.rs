//! Directional input: sector mapping and facing corrections.
//!
//! A joystick angle is bucketed into one of four 90° sectors. Each sector has a
//! facing, and switching facing rotates the character by a fixed correction
//! so translation keeps following world axes.
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// One of the four 90° joystick sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
}

impl Sector {
    /// Map an angle in degrees (0° = right, 90° = forward) to its sector.
    ///
    /// Sectors are half-open `(lo, hi]`, so an angle on a boundary belongs to the
    /// sector below it. Angles outside `[0, 360)` are wrapped first. Returns
    /// `None` for non-finite input.
    #[must_use]
    pub fn from_angle(degrees: f32) -> Option<Sector> {
        if !degrees.is_finite() {
            return None;
        }
        let a = degrees.rem_euclid(360.0);
        Some(if a <= 45.0 || a > 315.0 {
            Sector::StrafeRight
        } else if a <= 135.0 {
            Sector::Forward
        } else if a <= 225.0 {
            Sector::StrafeLeft
        } else {
            Sector::Backward
        })
    }

    /// Centre angle of the sector in degrees.
    #[must_use]
    pub fn center_degrees(self) -> f32 {
        match self {
            Sector::StrafeRight => 0.0,
            Sector::Forward => 90.0,
            Sector::StrafeLeft => 180.0,
            Sector::Backward => 270.0,
        }
    }

    #[must_use]
    pub fn facing(self) -> Facing {
        match self {
            Sector::Forward => Facing::Front,
            Sector::Backward => Facing::Back,
            Sector::StrafeLeft => Facing::Left,
            Sector::StrafeRight => Facing::Right,
        }
    }
}

/// Logical orientation bucket of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Front,
    Back,
    Left,
    Right,
}

impl Facing {
    /// Heading (radians about +Y) this facing corresponds to, relative to the map.
    #[must_use]
    pub fn heading(self) -> f32 {
        match self {
            Facing::Front => 0.0,
            Facing::Left => FRAC_PI_2,
            Facing::Back => PI,
            Facing::Right => -FRAC_PI_2,
        }
    }

    /// Heading delta applied when turning from `self` to `target`.
    ///
    /// Always one of 0, ±90° or 180°.
    #[must_use]
    pub fn correction_to(self, target: Facing) -> f32 {
        wrap_angle(target.heading() - self.heading())
    }
}

/// Wrap an angle in radians into `(-PI, PI]`.
#[must_use]
pub fn wrap_angle(radians: f32) -> f32 {
    let r = (radians + PI).rem_euclid(TAU) - PI;
    if r <= -PI { r + TAU } else { r }
}

/// Translation axis for a heading; movement subtracts this vector.
#[must_use]
pub fn axis_vector(heading: f32) -> Vec3 {
    Vec3::new(heading.sin(), 0.0, heading.cos())
}
