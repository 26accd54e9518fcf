//! User interface: HUD overlay, user-visible notices and the splash flow.
//!
//! The HUD shows the driver state (mode, move, facing, pose) and frame rate
//! while toggled on. Notices are shown regardless of the HUD toggle; they
//! carry non-fatal errors such as a model that failed to load.
pub mod action_bar;
pub mod splash;

use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::character::DriverSnapshot;
use crate::scene::bevy_host::CharacterDriver;
use crate::settings::Settings;

/// Fill colour of on-screen buttons.
pub const BUTTON_COLOR: Color = Color::srgb(1.0, 0.6, 0.0);

/// How long a notice stays on screen.
pub const NOTICE_SECONDS: f32 = 4.0;

/// State for the HUD overlay visibility.
#[derive(Resource, Default)]
pub struct HudState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct HudTimer(pub Timer);

/// The most recent user-facing notice.
#[derive(Resource)]
pub struct Notices {
    message: Option<String>,
    timer: Timer,
}

impl Default for Notices {
    fn default() -> Self {
        Self {
            message: None,
            timer: Timer::from_seconds(NOTICE_SECONDS, TimerMode::Once),
        }
    }
}

impl Notices {
    /// Show `message`, replacing any notice still on screen.
    pub fn push(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.timer.reset();
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Expire the notice once its time is up.
    pub fn tick(&mut self, delta: std::time::Duration) {
        if self.message.is_some() && self.timer.tick(delta).finished() {
            self.message = None;
        }
    }
}

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct NoticeText;

/// Insert HUD resources.
pub fn setup_hud(mut commands: Commands) {
    commands.insert_resource(HudTimer(Timer::from_seconds(0.25, TimerMode::Repeating)));
    commands.insert_resource(HudState::default());
    commands.insert_resource(Notices::default());
}

/// Spawn the HUD text (top left) and the notice banner (above the action bar).
pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        TextBundle {
            text: Text::from_section(
                "",
                TextStyle { font_size: 16.0, color: Color::WHITE, ..default() },
            ),
            style: Style {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                left: Val::Px(8.0),
                ..default()
            },
            ..default()
        },
        HudText,
    ));

    commands
        .spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                bottom: Val::Px(96.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            ..default()
        })
        .with_children(|p| {
            p.spawn((
                TextBundle::from_section(
                    "",
                    TextStyle {
                        font_size: 22.0,
                        color: Color::srgb(1.0, 0.6, 0.0),
                        ..default()
                    },
                ),
                NoticeText,
            ));
        });
}

/// Toggle the HUD when the `toggle_hud` key (F1 by default) is pressed.
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_hud(
    mut state: ResMut<HudState>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    if input.just_pressed(settings.key_for("toggle_hud", KeyCode::F1)) {
        state.visible = !state.visible;
    }
}

/// HUD body for a driver snapshot.
#[must_use]
pub fn hud_text(snapshot: &DriverSnapshot, fps: f64) -> String {
    let p = snapshot.pose.position;
    let pending = snapshot.pending.map_or_else(
        || "none".to_string(),
        |t| format!("{:?} at {:.1}s", t.next, t.due.as_secs_f32()),
    );
    let loading = match (snapshot.character_in_flight, snapshot.world_in_flight) {
        (false, false) => "",
        (true, false) => " (loading character)",
        (false, true) => " (loading world)",
        (true, true) => " (loading character, world)",
    };
    format!(
        "FPS: {fps:.1}\nMode: {:?} | Move: {:?}{loading}\nNext: {pending}\nFacing: {:?} | Heading: {:.0}°\nPos: ({:.1}, {:.1}, {:.1})\nClip: {}",
        snapshot.mode,
        snapshot.mv,
        snapshot.facing,
        snapshot.pose.heading.to_degrees(),
        p.x,
        p.y,
        p.z,
        if snapshot.clock_bound { "playing" } else { "none" },
    )
}

/// Refresh the HUD text every interval.
#[allow(clippy::needless_pass_by_value)]
pub fn update_hud(
    diagnostics: Res<DiagnosticsStore>,
    state: Res<HudState>,
    time: Res<Time>,
    mut timer: ResMut<HudTimer>,
    driver: Option<Res<CharacterDriver>>,
    mut query: Query<&mut Text, With<HudText>>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let Ok(mut text) = query.get_single_mut() else { return };

    let (true, Some(driver)) = (state.visible, driver) else {
        text.sections[0].value = String::new();
        return;
    };

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    text.sections[0].value = hud_text(&driver.snapshot(), fps);
}

/// Show the current notice and expire it.
#[allow(clippy::needless_pass_by_value)]
pub fn update_notices(
    time: Res<Time>,
    mut notices: ResMut<Notices>,
    mut query: Query<&mut Text, With<NoticeText>>,
) {
    notices.tick(time.delta());
    let Ok(mut text) = query.get_single_mut() else { return };
    let shown = notices.current().unwrap_or_default();
    if text.sections[0].value != shown {
        text.sections[0].value = shown.to_string();
    }
}
