use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use bevy_atmosphere::prelude::*;
use flameboy::assets::gltf::GltfProvider;
use flameboy::assets::AssetCatalog;
use flameboy::character::{Driver, Tuning};
use flameboy::debug::DebugDumpPlugin;
use flameboy::input::joystick::JoystickState;
use flameboy::input::Keymap;
use flameboy::scene::bevy_host::CharacterDriver;
use flameboy::settings::loader::{self as settings_loader, SETTINGS_DIR};
use flameboy::ui::splash::{
    despawn_screen, fade_splash, home_input, spawn_home, spawn_splash, AppScreen, HomeRoot,
    SplashRoot,
};
use flameboy::ui::action_bar::{spawn_action_bar, ActionBar};
use flameboy::ui::{setup_hud, spawn_hud, toggle_hud, update_hud, update_notices};

mod app;
use app::{
    action_bar_input, advance_transitions, apply_clip_playback, draw_joystick, follow_camera,
    joystick_input, keyboard_actions, orbit_camera, poll_loads, setup, spawn_joystick,
    start_driver, sync_character_transform, sync_runtime_settings, sync_shadow_settings,
    sync_vsync_settings, tick_animation_clock, CameraOrbit,
};

/// Marker for the camera that follows the character.
#[derive(Component)]
struct MainCamera;

const SKY_COLOR: Color = Color::srgb(0.529, 0.808, 0.922);

fn main() {
    let settings = settings_loader::load_settings_from_dir(SETTINGS_DIR);
    let settings_watcher = settings_loader::setup_settings_watcher(SETTINGS_DIR)
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Flame Boy".into(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                present_mode: if settings.graphics.vsync {
                    PresentMode::Fifo
                } else {
                    PresentMode::AutoNoVsync
                },
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(LogDiagnosticsPlugin::default())
        .add_plugins(DebugDumpPlugin);

    if settings.atmosphere.enabled {
        app.add_plugins(AtmospherePlugin)
            .insert_resource(AtmosphereModel::default())
            .insert_resource(AtmosphereSettings {
                resolution: settings.atmosphere.resolution,
                dithering: settings.atmosphere.dithering,
                ..Default::default()
            });
    } else {
        app.insert_resource(ClearColor(SKY_COLOR));
    }

    app.init_state::<AppScreen>();

    app.insert_resource(CharacterDriver(Driver::new(
        Tuning::from_settings(&settings),
        AssetCatalog::from_settings(&settings.assets),
    )));
    app.insert_resource(GltfProvider::from_settings(&settings.assets));
    app.init_resource::<CameraOrbit>();
    app.insert_resource(Keymap::from_settings(&settings));
    app.insert_resource(JoystickState::new(settings.controls.joystick_samples_per_second));

    app.insert_resource(settings.clone());
    app.insert_resource(settings_watcher);

    app.add_systems(Startup, setup_hud);
    app.add_systems(Startup, spawn_hud);
    app.add_systems(Startup, setup);
    app.add_systems(Startup, spawn_joystick);

    app.add_systems(OnEnter(AppScreen::Splash), spawn_splash);
    app.add_systems(Update, fade_splash.run_if(in_state(AppScreen::Splash)));
    app.add_systems(OnExit(AppScreen::Splash), despawn_screen::<SplashRoot>);
    app.add_systems(OnEnter(AppScreen::Home), spawn_home);
    app.add_systems(Update, home_input.run_if(in_state(AppScreen::Home)));
    app.add_systems(OnExit(AppScreen::Home), despawn_screen::<HomeRoot>);
    app.add_systems(OnEnter(AppScreen::Playing), (start_driver, spawn_action_bar));
    app.add_systems(OnExit(AppScreen::Playing), despawn_screen::<ActionBar>);

    app.add_systems(
        Update,
        (
            keyboard_actions,
            action_bar_input,
            joystick_input,
            advance_transitions,
            poll_loads,
            tick_animation_clock,
            apply_clip_playback,
            sync_character_transform,
            orbit_camera,
            follow_camera,
        )
            .chain()
            .run_if(in_state(AppScreen::Playing)),
    );

    app.add_systems(Update, draw_joystick.run_if(in_state(AppScreen::Playing)));
    app.add_systems(Update, toggle_hud);
    app.add_systems(Update, update_hud);
    app.add_systems(Update, update_notices);

    if settings.atmosphere.enabled {
        app.add_systems(Update, crate::app::display::sync_atmosphere_settings);
    }

    app.add_systems(Update, settings_loader::check_settings_changes);
    app.add_systems(Update, sync_runtime_settings);
    app.add_systems(Update, sync_vsync_settings);
    app.add_systems(Update, sync_shadow_settings);

    app.run();
}
