//! Display-related systems: syncing vsync, shadows and the sky from the main
//! `Settings` resource into the running window, lights and atmosphere.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use bevy_atmosphere::prelude::AtmosphereSettings as BevyAtmosphereSettings;
use flameboy::settings::Settings;

/// Sync `Settings.graphics.vsync` into the present mode of the primary window.
///
/// # Example
/// ```ignore
/// app.add_systems(Update, crate::app::sync_vsync_settings);
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn sync_vsync_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut last: Local<Option<bool>>,
) {
    let desired = settings.graphics.vsync;
    if *last == Some(desired) {
        return;
    }

    for mut w in &mut windows {
        w.present_mode = if desired { PresentMode::Fifo } else { PresentMode::AutoNoVsync };
    }
    *last = Some(desired);
}

/// Sync `Settings.graphics.shadows` into every point and directional light.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_shadow_settings(
    settings: Res<Settings>,
    mut points: Query<&mut PointLight>,
    mut directionals: Query<&mut DirectionalLight>,
    mut last: Local<Option<bool>>,
) {
    let desired = settings.graphics.shadows;
    if *last == Some(desired) {
        return;
    }

    for mut light in &mut points {
        light.shadows_enabled = desired;
    }
    for mut light in &mut directionals {
        light.shadows_enabled = desired;
    }
    *last = Some(desired);
}

/// Sync `Settings.atmosphere` resolution and dithering into the sky renderer.
///
/// `enabled` itself is read once at startup; toggling it needs a restart.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_atmosphere_settings(
    settings: Res<Settings>,
    mut last: Local<Option<(u32, bool)>>,
    mut atmosphere: ResMut<BevyAtmosphereSettings>,
) {
    let applied = (settings.atmosphere.resolution, settings.atmosphere.dithering);
    if *last == Some(applied) {
        return;
    }
    atmosphere.resolution = applied.0;
    atmosphere.dithering = applied.1;
    *last = Some(applied);
}
