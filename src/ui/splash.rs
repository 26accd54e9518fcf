//! Splash and home screens shown before the game starts.
//!
//! `Splash` is visible for three seconds, fades out over one, then `Home`
//! shows a title and a Play button. Pressing Play (or Enter) moves to
//! `Playing`, which is where the driver starts loading.
use bevy::prelude::*;

use super::BUTTON_COLOR;

pub const SPLASH_VISIBLE_SECONDS: f32 = 3.0;
pub const SPLASH_FADE_SECONDS: f32 = 1.0;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppScreen {
    #[default]
    Splash,
    Home,
    Playing,
}

#[derive(Component)]
pub struct SplashRoot;

#[derive(Component)]
pub struct HomeRoot;

#[derive(Component)]
pub struct PlayButton;

/// Time since the splash appeared.
#[derive(Resource, Default)]
pub struct SplashClock(pub f32);

/// Opacity of the splash `elapsed` seconds after it appeared.
#[must_use]
pub fn splash_alpha(elapsed: f32) -> f32 {
    if elapsed <= SPLASH_VISIBLE_SECONDS {
        1.0
    } else {
        (1.0 - (elapsed - SPLASH_VISIBLE_SECONDS) / SPLASH_FADE_SECONDS).clamp(0.0, 1.0)
    }
}

pub fn spawn_splash(mut commands: Commands) {
    commands.insert_resource(SplashClock::default());
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: Color::BLACK.into(),
                z_index: ZIndex::Global(10),
                ..default()
            },
            SplashRoot,
        ))
        .with_children(|p| {
            p.spawn(TextBundle::from_section(
                "Made By Brume in Corporation with ChatGPT",
                TextStyle { font_size: 32.0, color: Color::WHITE, ..default() },
            ));
        });
}

/// Fade the splash and hand over to the home screen when it is gone.
#[allow(clippy::needless_pass_by_value)]
pub fn fade_splash(
    time: Res<Time>,
    mut clock: ResMut<SplashClock>,
    mut backgrounds: Query<&mut BackgroundColor, With<SplashRoot>>,
    roots: Query<&Children, With<SplashRoot>>,
    mut texts: Query<&mut Text>,
    mut next: ResMut<NextState<AppScreen>>,
) {
    clock.0 += time.delta_seconds();
    let alpha = splash_alpha(clock.0);

    for mut bg in &mut backgrounds {
        bg.0.set_alpha(alpha);
    }
    for children in &roots {
        for &child in children {
            if let Ok(mut text) = texts.get_mut(child) {
                for section in &mut text.sections {
                    section.style.color.set_alpha(alpha);
                }
            }
        }
    }

    if alpha <= 0.0 {
        next.set(AppScreen::Home);
    }
}

pub fn spawn_home(mut commands: Commands) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: Color::BLACK.into(),
                z_index: ZIndex::Global(10),
                ..default()
            },
            HomeRoot,
        ))
        .with_children(|p| {
            p.spawn(TextBundle::from_section(
                "Welcome to the Game",
                TextStyle { font_size: 48.0, color: Color::WHITE, ..default() },
            ));
            p.spawn((
                ButtonBundle {
                    style: Style {
                        margin: UiRect::top(Val::Px(20.0)),
                        padding: UiRect::axes(Val::Px(30.0), Val::Px(15.0)),
                        ..default()
                    },
                    background_color: BUTTON_COLOR.into(),
                    border_radius: BorderRadius::all(Val::Px(10.0)),
                    ..default()
                },
                PlayButton,
            ))
            .with_children(|b| {
                b.spawn(TextBundle::from_section(
                    "Play",
                    TextStyle { font_size: 24.0, color: Color::WHITE, ..default() },
                ));
            });
        });
}

/// Dismiss the home screen on a Play click or Enter.
#[allow(clippy::needless_pass_by_value)]
pub fn home_input(
    buttons: Query<&Interaction, (Changed<Interaction>, With<PlayButton>)>,
    keys: Res<ButtonInput<KeyCode>>,
    mut next: ResMut<NextState<AppScreen>>,
) {
    let clicked = buttons.iter().any(|i| *i == Interaction::Pressed);
    if clicked || keys.just_pressed(KeyCode::Enter) {
        next.set(AppScreen::Playing);
    }
}

/// Despawn every entity carrying marker `T`.
pub fn despawn_screen<T: Component>(mut commands: Commands, roots: Query<Entity, With<T>>) {
    for e in &roots {
        commands.entity(e).despawn_recursive();
    }
}
