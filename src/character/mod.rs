//! Character state: mode, move catalog, pose and the state driver.
//!
//! The driver in [`driver`] is the only owner of this state. Other modules
//! read it through the driver's accessors and change it by sending input.
//!
//! # Example:
//!
//! ```
//! use flameboy::character::{Mode, Move};
//!
//! assert_eq!(Mode::Base.toggled(), Mode::Alternate);
//! assert_eq!(Move::FightIdle.file_stem(), "fight_idle");
//! ```
pub mod driver;
pub mod facing;
pub mod transition;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

pub use driver::*;
pub use facing::*;
pub use transition::*;

/// Two-valued character mode; selects the asset sub-directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Base,
    Alternate,
}

impl Mode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Mode::Base => Mode::Alternate,
            Mode::Alternate => Mode::Base,
        }
    }

    /// Directory name of this mode under the character asset root.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Mode::Base => "base",
            Mode::Alternate => "rage",
        }
    }
}

/// Animation clip identifier. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Move {
    #[default]
    Idle,
    Run,
    Kick,
    FightIdle,
    Spell1,
    Spell2,
    Spell3,
    Spell4,
    Spell5,
    Spell6,
}

impl Move {
    pub const ALL: [Move; 10] = [
        Move::Idle,
        Move::Run,
        Move::Kick,
        Move::FightIdle,
        Move::Spell1,
        Move::Spell2,
        Move::Spell3,
        Move::Spell4,
        Move::Spell5,
        Move::Spell6,
    ];

    /// File name (without extension) of the clip for this move.
    #[must_use]
    pub fn file_stem(self) -> &'static str {
        match self {
            Move::Idle => "idle",
            Move::Run => "run",
            Move::Kick => "kick",
            Move::FightIdle => "fight_idle",
            Move::Spell1 => "spell1",
            Move::Spell2 => "spell2",
            Move::Spell3 => "spell3",
            Move::Spell4 => "spell4",
            Move::Spell5 => "spell5",
            Move::Spell6 => "spell6",
        }
    }

    /// Spell move for a 1-based spell slot.
    #[must_use]
    pub fn spell(slot: u8) -> Option<Move> {
        match slot {
            1 => Some(Move::Spell1),
            2 => Some(Move::Spell2),
            3 => Some(Move::Spell3),
            4 => Some(Move::Spell4),
            5 => Some(Move::Spell5),
            6 => Some(Move::Spell6),
            _ => None,
        }
    }

    /// 1-based spell slot, or `None` for non-spell moves.
    #[must_use]
    pub fn spell_slot(self) -> Option<u8> {
        match self {
            Move::Spell1 => Some(1),
            Move::Spell2 => Some(2),
            Move::Spell3 => Some(3),
            Move::Spell4 => Some(4),
            Move::Spell5 => Some(5),
            Move::Spell6 => Some(6),
            _ => None,
        }
    }
}

/// Character placement in the world.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// World position; `y` is the ground reference the model's feet rest on.
    pub position: Vec3,
    /// Rotation about +Y in radians.
    pub heading: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_returns_to_base() {
        let mut mode = Mode::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            mode = mode.toggled();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![Mode::Alternate, Mode::Base, Mode::Alternate, Mode::Base, Mode::Alternate]
        );
    }

    #[test]
    fn spell_slots_round_trip_through_catalog() {
        for slot in 1..=6 {
            let mv = Move::spell(slot).unwrap();
            assert_eq!(mv.spell_slot(), Some(slot));
            assert_eq!(mv.file_stem(), format!("spell{slot}"));
        }
        assert_eq!(Move::spell(0), None);
        assert_eq!(Move::spell(7), None);
        assert_eq!(Move::Kick.spell_slot(), None);
    }
}
