//! Startup system spawning the camera and lights the scene is viewed with.
use bevy::prelude::*;
use flameboy::settings::Settings;

use crate::MainCamera;

/// Spawn the camera, a fill point light, a key directional light and the
/// ambient term.
///
/// The camera gets an `AtmosphereCamera` only when the procedural sky is
/// enabled; otherwise the flat `ClearColor` inserted in `main` shows through.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(mut commands: Commands, settings: Res<Settings>) {
    let shadows = settings.graphics.shadows;

    let mut camera = commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(1.6, 1.8, 3.0).looking_at(Vec3::Y, Vec3::Y),
            ..default()
        },
        MainCamera,
    ));
    if settings.atmosphere.enabled {
        camera.insert(bevy_atmosphere::prelude::AtmosphereCamera::default());
    }

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 400_000.0,
            range: 40.0,
            shadows_enabled: shadows,
            ..default()
        },
        transform: Transform::from_xyz(0.8, 1.4, 1.0),
        ..default()
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 4000.0,
            shadows_enabled: shadows,
            ..default()
        },
        transform: Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });
}
