//! On-screen action buttons for touch play.
//!
//! A bottom-centre row with Mode, Kick and Spell 1-6, so everything the
//! keyboard does except stepping is reachable without one. Movement on touch
//! devices goes through the virtual joystick.
use bevy::prelude::*;

use super::BUTTON_COLOR;
use crate::character::Move;
use crate::input::InputAction;

/// Button labels with the action each one sends, in display order.
pub const ACTION_BUTTONS: [(&str, InputAction); 8] = [
    ("Mode", InputAction::ToggleMode),
    ("Kick", InputAction::Action(Move::Kick)),
    ("Spell 1", InputAction::Action(Move::Spell1)),
    ("Spell 2", InputAction::Action(Move::Spell2)),
    ("Spell 3", InputAction::Action(Move::Spell3)),
    ("Spell 4", InputAction::Action(Move::Spell4)),
    ("Spell 5", InputAction::Action(Move::Spell5)),
    ("Spell 6", InputAction::Action(Move::Spell6)),
];

/// Root node of the action bar.
#[derive(Component)]
pub struct ActionBar;

/// An action bar button and the input it stands for.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButton(pub InputAction);

/// Action sent by the button labelled `label`.
#[must_use]
pub fn action_for_label(label: &str) -> Option<InputAction> {
    ACTION_BUTTONS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|&(_, action)| action)
}

pub fn spawn_action_bar(mut commands: Commands) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(20.0),
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    flex_wrap: FlexWrap::Wrap,
                    ..default()
                },
                ..default()
            },
            ActionBar,
        ))
        .with_children(|bar| {
            for (label, action) in ACTION_BUTTONS {
                bar.spawn((
                    ButtonBundle {
                        style: Style {
                            margin: UiRect::all(Val::Px(5.0)),
                            padding: UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
                            ..default()
                        },
                        background_color: BUTTON_COLOR.into(),
                        border_radius: BorderRadius::all(Val::Px(10.0)),
                        ..default()
                    },
                    ActionButton(action),
                ))
                .with_children(|b| {
                    b.spawn(TextBundle::from_section(
                        label,
                        TextStyle { font_size: 16.0, color: Color::WHITE, ..default() },
                    ));
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::BINDINGS;

    #[test]
    fn labels_map_to_keyboard_actions() {
        assert_eq!(action_for_label("Mode"), Some(InputAction::ToggleMode));
        assert_eq!(action_for_label("Kick"), Some(InputAction::Action(Move::Kick)));
        assert_eq!(action_for_label("Spell 6"), Some(InputAction::Action(Move::Spell6)));
        assert_eq!(action_for_label("Run"), None);
    }

    #[test]
    fn every_non_step_binding_has_a_button() {
        for (name, action, _) in BINDINGS {
            let is_step = matches!(action, InputAction::Step(_));
            let has_button = ACTION_BUTTONS.iter().any(|&(_, a)| a == action);
            assert_eq!(has_button, !is_step, "binding `{name}`");
        }
    }
}
