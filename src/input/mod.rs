//! Input mapping: raw keys to driver actions.
//!
//! Bindings come from `controls.keybinds` in the settings file. Unknown
//! actions or unparsable key names fall back to the defaults below; keys
//! with no binding are ignored.
pub mod joystick;

use std::collections::HashMap;

use bevy::log::{debug, warn};
use bevy::prelude::{KeyCode, Resource};

use crate::character::{Move, Sector};
use crate::settings::Settings;

/// An input event the driver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    ToggleMode,
    Action(Move),
    /// Run one keyboard step in a direction.
    Step(Sector),
}

/// Every bindable action with its settings name and default key.
pub const BINDINGS: [(&str, InputAction, KeyCode); 12] = [
    ("mode", InputAction::ToggleMode, KeyCode::Enter),
    ("kick", InputAction::Action(Move::Kick), KeyCode::Space),
    ("spell1", InputAction::Action(Move::Spell1), KeyCode::Digit1),
    ("spell2", InputAction::Action(Move::Spell2), KeyCode::Digit2),
    ("spell3", InputAction::Action(Move::Spell3), KeyCode::Digit3),
    ("spell4", InputAction::Action(Move::Spell4), KeyCode::Digit4),
    ("spell5", InputAction::Action(Move::Spell5), KeyCode::Digit5),
    ("spell6", InputAction::Action(Move::Spell6), KeyCode::Digit6),
    ("step_forward", InputAction::Step(Sector::Forward), KeyCode::ArrowUp),
    ("step_back", InputAction::Step(Sector::Backward), KeyCode::ArrowDown),
    ("step_left", InputAction::Step(Sector::StrafeLeft), KeyCode::ArrowLeft),
    ("step_right", InputAction::Step(Sector::StrafeRight), KeyCode::ArrowRight),
];

/// Key to action table.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Keymap(HashMap<KeyCode, InputAction>);

impl Default for Keymap {
    fn default() -> Self {
        Self(BINDINGS.iter().map(|&(_, action, key)| (key, action)).collect())
    }
}

impl Keymap {
    /// Build the table from `settings.controls.keybinds`, falling back per action.
    ///
    /// When two actions resolve to the same key the one listed first in
    /// [`BINDINGS`] keeps it and the later one is left unbound.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let binds = &settings.controls.keybinds;
        let mut map = HashMap::new();
        for &(name, action, default) in &BINDINGS {
            let key = match binds.get(name) {
                Some(s) => Settings::keycode_from_str(s).unwrap_or_else(|| {
                    debug!("unknown key `{s}` bound to `{name}`, using {default:?}");
                    default
                }),
                None => default,
            };
            if let Some(taken) = map.get(&key) {
                warn!("key {key:?} for `{name}` is already bound to {taken:?}; `{name}` is unbound");
                continue;
            }
            map.insert(key, action);
        }
        Self(map)
    }

    #[must_use]
    pub fn lookup(&self, key: KeyCode) -> Option<InputAction> {
        self.0.get(&key).copied()
    }
}
