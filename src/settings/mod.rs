//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are hot-reloadable
//! using the RON watcher utilities (see `ron::setup_ron_watcher`).
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::character::RevertDurations;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Enable vertical sync to cap FPS to the display refresh rate.
    #[serde(default = "GraphicsSettings::default_shadows")]
    pub shadows: bool, // Enable/disable point light shadows
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
    fn default_shadows() -> bool { false }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            vsync: Self::default_vsync(),
            shadows: Self::default_shadows(),
        }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Map of action names to key identifiers (editable by user)
    #[serde(default = "ControlsSettings::default_joystick_radius")]
    pub joystick_radius: f32, // Touch drag distance in logical pixels that counts as full force
    #[serde(default = "ControlsSettings::default_joystick_deadzone")]
    pub joystick_deadzone: f32, // Force below which joystick input is ignored
    #[serde(default = "ControlsSettings::default_joystick_rate")]
    pub joystick_samples_per_second: f32, // How often a held joystick moves the character
}

impl ControlsSettings {
    fn default_joystick_radius() -> f32 { 80.0 }
    fn default_joystick_deadzone() -> f32 { 0.15 }
    fn default_joystick_rate() -> f32 { 30.0 }

    fn default_keybinds() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("mode".to_string(), "Enter".to_string());
        m.insert("kick".to_string(), "Space".to_string());
        for slot in 1..=6 {
            m.insert(format!("spell{slot}"), slot.to_string());
        }
        m.insert("step_forward".to_string(), "Up".to_string());
        m.insert("step_back".to_string(), "Down".to_string());
        m.insert("step_left".to_string(), "Left".to_string());
        m.insert("step_right".to_string(), "Right".to_string());
        m.insert("toggle_hud".to_string(), "F1".to_string());
        m.insert("dump_debug".to_string(), "F3".to_string());
        m
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            keybinds: Self::default_keybinds(),
            joystick_radius: Self::default_joystick_radius(),
            joystick_deadzone: Self::default_joystick_deadzone(),
            joystick_samples_per_second: Self::default_joystick_rate(),
        }
    }
}

/// World asset per character mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldAssets {
    #[serde(default = "WorldAssets::default_path")]
    pub base: String,
    #[serde(default = "WorldAssets::default_path")]
    pub alternate: String,
}

impl WorldAssets {
    fn default_path() -> String { "field.glb".to_string() }
}

impl Default for WorldAssets {
    fn default() -> Self {
        Self { base: Self::default_path(), alternate: Self::default_path() }
    }
}

/// Where models live, relative to the `assets/` directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSettings {
    #[serde(default = "AssetSettings::default_character_root")]
    pub character_root: String, // Directory holding `<mode>/<move>.<ext>` character files
    #[serde(default = "AssetSettings::default_extension")]
    pub extension: String, // File extension of character files
    #[serde(default)]
    pub world: WorldAssets,
    #[serde(default = "AssetSettings::default_character_scale")]
    pub character_scale: f32, // Uniform scale applied to every character model
    #[serde(default = "AssetSettings::default_world_scale")]
    pub world_scale: f32, // Uniform scale applied to the world model
    #[serde(default = "AssetSettings::default_model_yaw")]
    pub model_yaw_degrees: f32, // Yaw that turns a character model's own front to the map's forward (-Z)
}

impl AssetSettings {
    fn default_character_root() -> String { "flame_boy".to_string() }
    fn default_extension() -> String { "glb".to_string() }
    fn default_character_scale() -> f32 { 1.0 }
    fn default_world_scale() -> f32 { 1.0 }
    // glTF models face +Z; the driver's Front heading moves toward -Z.
    fn default_model_yaw() -> f32 { 180.0 }
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            character_root: Self::default_character_root(),
            extension: Self::default_extension(),
            world: WorldAssets::default(),
            character_scale: Self::default_character_scale(),
            world_scale: Self::default_world_scale(),
            model_yaw_degrees: Self::default_model_yaw(),
        }
    }
}

/// Durations of timed moves, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationSettings {
    #[serde(default = "AnimationSettings::default_kick")]
    pub kick_ms: u64,
    #[serde(default = "AnimationSettings::default_spells")]
    pub spell_ms: [u64; 6], // One entry per spell key, 1 through 6
    #[serde(default = "AnimationSettings::default_fight_idle_hold")]
    pub fight_idle_hold_ms: u64, // Time spent in the fighting stance before idling
    #[serde(default = "AnimationSettings::default_run")]
    pub run_ms: u64,
}

impl AnimationSettings {
    fn default_kick() -> u64 { 1000 }
    fn default_spells() -> [u64; 6] { [6500, 2167, 3333, 2600, 4333, 3250] }
    fn default_fight_idle_hold() -> u64 { 10_000 }
    fn default_run() -> u64 { 500 }

    #[must_use]
    pub fn durations(&self) -> RevertDurations {
        RevertDurations {
            kick: Duration::from_millis(self.kick_ms),
            spells: self.spell_ms.map(Duration::from_millis),
            fight_idle_hold: Duration::from_millis(self.fight_idle_hold_ms),
            run: Duration::from_millis(self.run_ms),
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            kick_ms: Self::default_kick(),
            spell_ms: Self::default_spells(),
            fight_idle_hold_ms: Self::default_fight_idle_hold(),
            run_ms: Self::default_run(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementSettings {
    #[serde(default = "MovementSettings::default_speed_scale")]
    pub speed_scale: f32, // World units moved per joystick sample at full force
    #[serde(default = "MovementSettings::default_keyboard_step")]
    pub keyboard_step: f32, // World units moved per arrow key press
}

impl MovementSettings {
    fn default_speed_scale() -> f32 { 0.1 }
    fn default_keyboard_step() -> f32 { 5.0 }
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            speed_scale: Self::default_speed_scale(),
            keyboard_step: Self::default_keyboard_step(),
        }
    }
}

/// Atmosphere settings to configure the bevy_atmosphere crate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtmosphereSettings {
    #[serde(default)]
    pub enabled: bool, // Render a procedural sky instead of a flat clear colour (restart required)
    #[serde(default = "AtmosphereSettings::default_resolution")]
    pub resolution: u32, // Resolution of each skybox face
    #[serde(default = "AtmosphereSettings::default_dithering")]
    pub dithering: bool, // Enable dithering to reduce color banding in the sky
}

impl AtmosphereSettings {
    fn default_resolution() -> u32 { 512 }
    fn default_dithering() -> bool { true }
}

impl Default for AtmosphereSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            resolution: Self::default_resolution(),
            dithering: Self::default_dithering(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub graphics: GraphicsSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub assets: AssetSettings,
    #[serde(default)]
    pub animation: AnimationSettings,
    #[serde(default)]
    pub movement: MovementSettings,
    #[serde(default)]
    pub atmosphere: AtmosphereSettings,
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Key bound to a non-driver action such as `toggle_hud`, or `default`.
    #[must_use]
    pub fn key_for(&self, action: &str, default: KeyCode) -> KeyCode {
        self.controls
            .keybinds
            .get(action)
            .and_then(|s| Settings::keycode_from_str(s))
            .unwrap_or(default)
    }

    /// Convert a string key identifier (e.g., from `controls.keybinds`) into a `KeyCode`.
    ///
    /// # Arguments
    /// * `name` - The string key identifier to convert (e.g., "W", "Space", "F1").
    ///
    /// # Returns
    /// The matching `KeyCode`, or `None` if the string does not name a known key.
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.trim().to_ascii_uppercase();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let code = match c {
                'A' => KeyCode::KeyA,
                'B' => KeyCode::KeyB,
                'C' => KeyCode::KeyC,
                'D' => KeyCode::KeyD,
                'E' => KeyCode::KeyE,
                'F' => KeyCode::KeyF,
                'G' => KeyCode::KeyG,
                'H' => KeyCode::KeyH,
                'I' => KeyCode::KeyI,
                'J' => KeyCode::KeyJ,
                'K' => KeyCode::KeyK,
                'L' => KeyCode::KeyL,
                'M' => KeyCode::KeyM,
                'N' => KeyCode::KeyN,
                'O' => KeyCode::KeyO,
                'P' => KeyCode::KeyP,
                'Q' => KeyCode::KeyQ,
                'R' => KeyCode::KeyR,
                'S' => KeyCode::KeyS,
                'T' => KeyCode::KeyT,
                'U' => KeyCode::KeyU,
                'V' => KeyCode::KeyV,
                'W' => KeyCode::KeyW,
                'X' => KeyCode::KeyX,
                'Y' => KeyCode::KeyY,
                'Z' => KeyCode::KeyZ,
                '0' => KeyCode::Digit0,
                '1' => KeyCode::Digit1,
                '2' => KeyCode::Digit2,
                '3' => KeyCode::Digit3,
                '4' => KeyCode::Digit4,
                '5' => KeyCode::Digit5,
                '6' => KeyCode::Digit6,
                '7' => KeyCode::Digit7,
                '8' => KeyCode::Digit8,
                '9' => KeyCode::Digit9,
                _ => return None,
            };
            return Some(code);
        }

        Some(match s.as_str() {
            // Function keys
            "F1" => KeyCode::F1,
            "F2" => KeyCode::F2,
            "F3" => KeyCode::F3,
            "F4" => KeyCode::F4,
            "F5" => KeyCode::F5,
            "F6" => KeyCode::F6,
            "F7" => KeyCode::F7,
            "F8" => KeyCode::F8,
            "F9" => KeyCode::F9,
            "F10" => KeyCode::F10,
            "F11" => KeyCode::F11,
            "F12" => KeyCode::F12,

            // Arrows / navigation
            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,

            // Whitespace / control
            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,
            "BACKSPACE" | "BACK" => KeyCode::Backspace,

            // Modifiers
            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,

            // Numpad
            "NUMPAD0" | "KP_0" => KeyCode::Numpad0,
            "NUMPAD1" | "KP_1" => KeyCode::Numpad1,
            "NUMPAD2" | "KP_2" => KeyCode::Numpad2,
            "NUMPAD3" | "KP_3" => KeyCode::Numpad3,
            "NUMPAD4" | "KP_4" => KeyCode::Numpad4,
            "NUMPAD5" | "KP_5" => KeyCode::Numpad5,
            "NUMPAD6" | "KP_6" => KeyCode::Numpad6,
            "NUMPAD7" | "KP_7" => KeyCode::Numpad7,
            "NUMPAD8" | "KP_8" => KeyCode::Numpad8,
            "NUMPAD9" | "KP_9" => KeyCode::Numpad9,
            "NUMPADENTER" | "KP_ENTER" => KeyCode::NumpadEnter,

            _ => return None,
        })
    }
}

pub mod loader;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_keeps_defaults_for_missing_fields() {
        let s: Settings = ron::from_str("(animation: (kick_ms: 750), movement: (keyboard_step: 2.0))")
            .expect("valid settings");
        assert_eq!(s.animation.kick_ms, 750);
        assert_eq!(s.animation.run_ms, 500);
        assert_eq!(s.movement.keyboard_step, 2.0);
        assert_eq!(s.assets.character_root, "flame_boy");
        assert_eq!(s.controls.keybinds.get("kick").map(String::as_str), Some("Space"));
    }

    #[test]
    fn key_names_are_case_insensitive() {
        assert_eq!(Settings::keycode_from_str("space"), Some(KeyCode::Space));
        assert_eq!(Settings::keycode_from_str("ArrowUp"), Some(KeyCode::ArrowUp));
        assert_eq!(Settings::keycode_from_str("k"), Some(KeyCode::KeyK));
        assert_eq!(Settings::keycode_from_str("3"), Some(KeyCode::Digit3));
        assert_eq!(Settings::keycode_from_str("hyper"), None);
        assert_eq!(Settings::keycode_from_str(""), None);
    }

    #[test]
    fn durations_come_from_milliseconds() {
        let d = AnimationSettings::default().durations();
        assert_eq!(d, RevertDurations::default());
    }
}
