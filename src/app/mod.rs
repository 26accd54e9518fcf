pub mod character;
pub mod display;
pub mod input;
pub mod settings_sync;
pub mod setup;

pub use character::{
    advance_transitions, apply_clip_playback, follow_camera, orbit_camera, poll_loads,
    start_driver, sync_character_transform, tick_animation_clock, CameraOrbit,
};
pub use display::{sync_shadow_settings, sync_vsync_settings};
pub use input::{action_bar_input, draw_joystick, joystick_input, keyboard_actions, spawn_joystick};
pub use settings_sync::sync_runtime_settings;
pub use setup::setup;
