use crate::simulation::{FrameSet, SimulationResource};
use bevy::{
    prelude::*,
    window::{CursorIcon, PrimaryWindow, SystemCursorIcon},
};

/// Cursor icon currently applied to the primary window.
#[derive(Resource, Clone, Copy, PartialEq, Eq, Default)]
struct CurrentCursor {
    grabbing: bool,
    applied: bool,
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<CurrentCursor>();
    app.add_systems(Update, apply_cursor.after(FrameSet::Input));
}

/// Show an open hand over the scene and a closed one while orbiting.
fn apply_cursor(
    mut commands: Commands,
    window: Single<Entity, With<PrimaryWindow>>,
    sim: Res<SimulationResource>,
    mut current: ResMut<CurrentCursor>,
) {
    let grabbing = sim.camera().is_dragging();
    if current.applied && current.grabbing == grabbing {
        return;
    }

    let icon = if grabbing {
        SystemCursorIcon::Grabbing
    } else {
        SystemCursorIcon::Grab
    };
    commands.entity(*window).insert(CursorIcon::System(icon));
    *current = CurrentCursor {
        grabbing,
        applied: true,
    };
}
