//! Debug/performance tooling for native dev builds.
//!
//! Compiled only behind `dev_native` (see `main.rs`). Adds the perf overlay and
//! draws the coin's up axis, green while heads is bound and red for tails.

use crate::{coin::Coin, simulation::SimulationResource};
use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;
use shared::Face;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(PostUpdate, draw_coin_up_axis);
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn draw_coin_up_axis(
    mut gizmos: Gizmos,
    coin: Single<&Transform, With<Coin>>,
    sim: Res<SimulationResource>,
) {
    let color = match sim.bound_face() {
        Face::Heads => Color::srgb(0.1, 0.8, 0.2),
        Face::Tails => Color::srgb(0.9, 0.2, 0.1),
    };
    let start = coin.translation;
    gizmos.arrow(start, start + coin.up() * 0.75, color);
}
