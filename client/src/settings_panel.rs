//! Keyboard-driven settings overlay standing in for a slider panel.
//!
//! Tab shows/hides the panel, `[`/`]` pick a setting, `-`/`=` move it by one
//! slider step. Changes go out as [`SettingChanged`] messages.

use crate::{
    input::InputAction,
    simulation::{FrameSet, SettingChanged, SimulationResource},
};
use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use shared::{SettingField, SimulationSettings};
use std::fmt::Write;

#[derive(Resource, Debug)]
pub struct SettingsPanel {
    pub visible: bool,
    pub selected: SettingField,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self {
            visible: false,
            selected: SettingField::Gravity,
        }
    }
}

#[derive(Component)]
struct PanelRoot;

#[derive(Component)]
struct PanelText;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<SettingsPanel>();
    app.add_systems(Startup, spawn_panel);
    app.add_systems(Update, handle_panel_keys.in_set(FrameSet::Input));
    app.add_systems(Update, refresh_panel.after(FrameSet::Settings));
}

fn spawn_panel(mut commands: Commands) {
    commands.spawn((
        Name::new("Help"),
        Text::new("Space: flip   R: reset coin   Tab: settings   drag/arrows: orbit   wheel: zoom"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.3, 0.3, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));

    commands
        .spawn((
            Name::new("SettingsPanel"),
            PanelRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                right: Val::Px(12.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.85)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                PanelText,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.15, 0.15, 0.15)),
            ));
        });
}

fn handle_panel_keys(
    actions: Res<ActionState<InputAction>>,
    mut panel: ResMut<SettingsPanel>,
    sim: Res<SimulationResource>,
    mut changes: MessageWriter<SettingChanged>,
) {
    if actions.just_pressed(&InputAction::TogglePanel) {
        panel.visible = !panel.visible;
    }
    if !panel.visible {
        return;
    }

    if actions.just_pressed(&InputAction::PrevSetting) {
        panel.selected = panel.selected.prev();
    }
    if actions.just_pressed(&InputAction::NextSetting) {
        panel.selected = panel.selected.next();
    }

    let steps = match (
        actions.just_pressed(&InputAction::DecreaseSetting),
        actions.just_pressed(&InputAction::IncreaseSetting),
    ) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    };
    if steps != 0 {
        changes.write(SettingChanged(sim.settings().nudge(panel.selected, steps)));
    }
}

fn panel_text(settings: &SimulationSettings, selected: SettingField) -> String {
    let mut out = String::new();
    for field in SettingField::ALL {
        let marker = if field == selected { '>' } else { ' ' };
        let range = field.range();
        let rebuild = if field.rebuilds_environment() { " *" } else { "" };
        let _ = writeln!(
            out,
            "{marker} {:<18}{:>6.2}  [{} - {}]{rebuild}",
            field.label(),
            settings.get(field),
            range.min,
            range.max,
        );
    }
    out.push_str("\n[ ] select   - = adjust   * rebuilds box");
    out
}

fn refresh_panel(
    panel: Res<SettingsPanel>,
    sim: Res<SimulationResource>,
    mut root_q: Query<&mut Visibility, With<PanelRoot>>,
    mut text_q: Query<&mut Text, With<PanelText>>,
) {
    if let Ok(mut visibility) = root_q.single_mut() {
        let wanted = if panel.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }

    if !panel.visible {
        return;
    }
    if let Ok(mut text) = text_q.single_mut() {
        let content = panel_text(sim.settings(), panel.selected);
        if text.0 != content {
            text.0 = content;
        }
    }
}
