//! Push hot-reloaded settings into the resources built from them.
use bevy::prelude::*;
use flameboy::assets::gltf::GltfProvider;
use flameboy::assets::AssetCatalog;
use flameboy::character::Tuning;
use flameboy::input::joystick::JoystickState;
use flameboy::input::Keymap;
use flameboy::scene::bevy_host::CharacterDriver;
use flameboy::settings::Settings;
use std::time::Duration;

/// Rebuild driver tuning, asset paths, the keymap, model scales and the
/// joystick sample rate whenever `Settings` changes.
///
/// New scales and paths only affect loads issued afterwards; objects already
/// on screen keep what they were built with.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_runtime_settings(
    settings: Res<Settings>,
    mut driver: ResMut<CharacterDriver>,
    mut keymap: ResMut<Keymap>,
    mut provider: ResMut<GltfProvider>,
    mut joystick: ResMut<JoystickState>,
) {
    if !settings.is_changed() {
        return;
    }

    driver.set_tuning(Tuning::from_settings(&settings));
    driver.set_catalog(AssetCatalog::from_settings(&settings.assets));
    *keymap = Keymap::from_settings(&settings);
    provider.character_scale = settings.assets.character_scale;
    provider.world_scale = settings.assets.world_scale;
    provider.character_yaw = settings.assets.model_yaw_degrees.to_radians();

    let rate = settings.controls.joystick_samples_per_second.max(1.0);
    joystick.sample_timer.set_duration(Duration::from_secs_f32(1.0 / rate));
    debug!("applied settings to driver, keymap and loader");
}
