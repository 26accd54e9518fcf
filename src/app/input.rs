//! Translate keyboard, touch and gamepad input into driver calls.
use bevy::input::touch::Touches;
use bevy::prelude::*;
use flameboy::assets::gltf::GltfProvider;
use flameboy::input::joystick::{JoystickSample, JoystickState};
use flameboy::input::Keymap;
use flameboy::scene::bevy_host::CharacterDriver;
use flameboy::settings::Settings;
use flameboy::ui::action_bar::ActionButton;

/// Forward every bound key pressed this frame to the driver.
#[allow(clippy::needless_pass_by_value)]
pub fn keyboard_actions(
    keys: Res<ButtonInput<KeyCode>>,
    keymap: Res<Keymap>,
    time: Res<Time>,
    mut driver: ResMut<CharacterDriver>,
    mut provider: ResMut<GltfProvider>,
) {
    let now = time.elapsed();
    for key in keys.get_just_pressed() {
        if let Some(action) = keymap.lookup(*key) {
            driver.handle_input(action, now, &mut *provider);
        }
    }
}

/// Forward action bar presses to the driver.
#[allow(clippy::needless_pass_by_value)]
pub fn action_bar_input(
    buttons: Query<(&Interaction, &ActionButton), Changed<Interaction>>,
    time: Res<Time>,
    mut driver: ResMut<CharacterDriver>,
    mut provider: ResMut<GltfProvider>,
) {
    let now = time.elapsed();
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed {
            driver.handle_input(button.0, now, &mut *provider);
        }
    }
}

/// Read the virtual joystick from the first touch, or the left stick of the
/// first gamepad outside the deadzone.
fn joystick_sample(
    touches: &Touches,
    gamepads: &Gamepads,
    axes: &Axis<GamepadAxis>,
    settings: &Settings,
) -> Option<JoystickSample> {
    let controls = &settings.controls;
    let touch = touches.iter().next().and_then(|t| {
        let drag = t.position() - t.start_position();
        // Screen y grows downward; the joystick's forward is up.
        JoystickSample::from_offset(
            Vec2::new(drag.x, -drag.y),
            controls.joystick_radius,
            controls.joystick_deadzone,
        )
    });
    touch.or_else(|| {
        gamepads.iter().find_map(|pad| {
            let x = axes.get(GamepadAxis::new(pad, GamepadAxisType::LeftStickX))?;
            let y = axes.get(GamepadAxis::new(pad, GamepadAxisType::LeftStickY))?;
            JoystickSample::from_offset(Vec2::new(x, y), 1.0, controls.joystick_deadzone)
        })
    })
}

/// Move the character while the joystick is held, once per sample period.
///
/// Releasing the joystick ends the directional gesture so the next sample
/// starts fresh.
#[allow(clippy::needless_pass_by_value)]
pub fn joystick_input(
    time: Res<Time>,
    touches: Res<Touches>,
    gamepads: Res<Gamepads>,
    axes: Res<Axis<GamepadAxis>>,
    settings: Res<Settings>,
    mut state: ResMut<JoystickState>,
    mut driver: ResMut<CharacterDriver>,
) {
    match joystick_sample(&touches, &gamepads, &axes, &settings) {
        Some(sample) => {
            state.engaged = true;
            let samples = state.sample_timer.tick(time.delta()).times_finished_this_tick();
            for _ in 0..samples {
                driver.handle_directional_input(sample.angle_degrees, sample.force);
            }
        }
        None => {
            if state.engaged {
                state.engaged = false;
                state.sample_timer.reset();
                driver.handle_directional_end();
            }
        }
    }
}

#[derive(Component)]
pub struct JoystickBase;

#[derive(Component)]
pub struct JoystickKnob;

const KNOB_FRACTION: f32 = 0.3;

/// Spawn the hidden on-screen joystick: a translucent base with a knob.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_joystick(mut commands: Commands, settings: Res<Settings>) {
    let r = settings.controls.joystick_radius;
    let knob = r * KNOB_FRACTION;
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    width: Val::Px(2.0 * r),
                    height: Val::Px(2.0 * r),
                    ..default()
                },
                background_color: Color::srgba(1.0, 1.0, 1.0, 0.15).into(),
                border_radius: BorderRadius::MAX,
                visibility: Visibility::Hidden,
                ..default()
            },
            JoystickBase,
        ))
        .with_children(|p| {
            p.spawn((
                NodeBundle {
                    style: Style {
                        position_type: PositionType::Absolute,
                        width: Val::Px(2.0 * knob),
                        height: Val::Px(2.0 * knob),
                        left: Val::Px(r - knob),
                        top: Val::Px(r - knob),
                        ..default()
                    },
                    background_color: Color::srgba(1.0, 0.6, 0.0, 0.6).into(),
                    border_radius: BorderRadius::MAX,
                    ..default()
                },
                JoystickKnob,
            ));
        });
}

/// Show the joystick under the first touch, with the knob following the drag.
#[allow(clippy::needless_pass_by_value)]
pub fn draw_joystick(
    touches: Res<Touches>,
    settings: Res<Settings>,
    mut base: Query<(&mut Style, &mut Visibility), (With<JoystickBase>, Without<JoystickKnob>)>,
    mut knobs: Query<&mut Style, With<JoystickKnob>>,
) {
    let Ok((mut style, mut visibility)) = base.get_single_mut() else { return };
    let Some(touch) = touches.iter().next() else {
        *visibility = Visibility::Hidden;
        return;
    };

    let r = settings.controls.joystick_radius;
    let knob = r * KNOB_FRACTION;
    let start = touch.start_position();
    let drag = (touch.position() - start).clamp_length_max(r);
    style.left = Val::Px(start.x - r);
    style.top = Val::Px(start.y - r);
    *visibility = Visibility::Inherited;
    for mut k in &mut knobs {
        k.left = Val::Px(r - knob + drag.x);
        k.top = Val::Px(r - knob + drag.y);
    }
}
