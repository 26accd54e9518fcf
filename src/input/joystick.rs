//! Virtual joystick (touch) and gamepad stick sampling.
//!
//! Both sources reduce to a polar [`JoystickSample`]: angle in degrees with
//! 0° pointing right and 90° pointing forward, force clamped to `[0, 1]`.
use bevy::math::Vec2;
use bevy::prelude::{Resource, Timer, TimerMode};

/// One polar joystick reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickSample {
    pub angle_degrees: f32,
    pub force: f32,
}

impl JoystickSample {
    /// Convert a stick offset (`+y` = forward) into a sample.
    ///
    /// `radius` is the offset length that counts as full force. Offsets inside
    /// `deadzone` (as a fraction of full force) produce no sample.
    #[must_use]
    pub fn from_offset(offset: Vec2, radius: f32, deadzone: f32) -> Option<Self> {
        if radius <= 0.0 || !offset.is_finite() {
            return None;
        }
        let force = (offset.length() / radius).min(1.0);
        if force <= deadzone {
            return None;
        }
        let angle_degrees = offset.y.atan2(offset.x).to_degrees().rem_euclid(360.0);
        Some(Self { angle_degrees, force })
    }
}

/// Joystick state between frames.
#[derive(Resource)]
pub struct JoystickState {
    /// Whether the previous frame produced a sample.
    pub engaged: bool,
    /// Sample-rate limiter so translation speed does not depend on frame rate.
    pub sample_timer: Timer,
}

impl JoystickState {
    #[must_use]
    pub fn new(samples_per_second: f32) -> Self {
        Self {
            engaged: false,
            sample_timer: Timer::from_seconds(1.0 / samples_per_second.max(1.0), TimerMode::Repeating),
        }
    }
}

impl Default for JoystickState {
    fn default() -> Self {
        Self::new(30.0)
    }
}
