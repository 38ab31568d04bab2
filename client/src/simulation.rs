use crate::{
    coin::{Coin, CoinAssets},
    config::LaunchConfig,
    convert::{point3, pose_transform},
};
use bevy::{platform::collections::HashMap, prelude::*};
use shared::{
    CoinRespawn, EnvironmentParams, EnvironmentRebuild, SettingChange, SettingOutcome, Simulation,
    rapier3d::prelude::RigidBodyHandle,
};

/// The one simulation context. Every system that touches physics goes through it.
#[derive(Resource, Deref, DerefMut)]
pub struct SimulationResource(pub Simulation);

/// Used to tie a physics body to the render entity that mirrors it.
#[derive(Resource, Default)]
pub struct BodyEntityMapping(pub HashMap<RigidBodyHandle, Entity>);

/// A slider moved (or a key nudged a setting).
#[derive(Message, Clone, Copy, Debug)]
pub struct SettingChanged(pub SettingChange);

/// The box was rebuilt; render entities must follow.
#[derive(Message, Clone, Debug)]
pub struct EnvironmentRebuilt {
    pub rebuild: EnvironmentRebuild,
    pub params: EnvironmentParams,
}

/// The coin body was replaced.
#[derive(Message, Clone, Copy, Debug)]
pub struct CoinRespawned(pub CoinRespawn);

/// Ordering of the per-frame work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Input handling and UI; writes messages and camera targets.
    Input,
    /// Setting changes reach the physics world.
    Settings,
    /// Render entities follow rebuilds and respawns.
    Mirror,
    /// Step physics and copy the result into the scene.
    Sync,
}

pub(super) fn plugin(app: &mut App) {
    let config = app
        .world()
        .get_resource::<LaunchConfig>()
        .cloned()
        .unwrap_or_default();

    app.insert_resource(SimulationResource(Simulation::new(
        config.settings,
        config.seed,
    )));
    app.init_resource::<BodyEntityMapping>();
    app.add_message::<SettingChanged>();
    app.add_message::<EnvironmentRebuilt>();
    app.add_message::<CoinRespawned>();

    app.configure_sets(
        Update,
        (
            FrameSet::Input,
            FrameSet::Settings,
            FrameSet::Mirror,
            FrameSet::Sync,
        )
            .chain(),
    );

    app.add_systems(Update, apply_setting_changes.in_set(FrameSet::Settings));
    app.add_systems(Update, advance_frame.in_set(FrameSet::Sync));
    app.add_systems(Last, cancel_on_exit);
}

fn apply_setting_changes(
    mut msgs: MessageReader<SettingChanged>,
    mut sim: ResMut<SimulationResource>,
    mut rebuilt: MessageWriter<EnvironmentRebuilt>,
) {
    for SettingChanged(change) in msgs.read() {
        match sim.apply_setting(*change) {
            Ok(SettingOutcome::Updated { field, value }) => {
                debug!("{} set to {value}", field.key());
            }
            Ok(SettingOutcome::Rebuilt {
                field,
                value,
                rebuild,
            }) => {
                info!("{} set to {value}; rebuilding box", field.key());
                rebuilt.write(EnvironmentRebuilt {
                    rebuild,
                    params: sim.settings().environment(),
                });
            }
            Err(err) => warn!("Ignoring {change:?}: {err}"),
        }
    }
}

/// One animation frame: step, mirror the coin, swap its face, move the camera.
fn advance_frame(
    time: Res<Time<Real>>,
    mut sim: ResMut<SimulationResource>,
    coin_assets: Res<CoinAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut coin_q: Query<
        (&mut Transform, &MeshMaterial3d<StandardMaterial>),
        (With<Coin>, Without<Camera3d>),
    >,
    mut camera_q: Query<&mut Transform, With<Camera3d>>,
) {
    let Some(frame) = sim.frame(time.elapsed_secs_f64()) else {
        return;
    };

    if let Ok((mut coin_tf, material)) = coin_q.single_mut() {
        if let Some(pose) = frame.coin {
            *coin_tf = pose_transform(&pose);
        }
        if let Some(face) = frame.face_swap {
            if let Some(mat) = materials.get_mut(&material.0) {
                mat.base_color_texture = Some(coin_assets.texture(face));
            }
            debug!("coin shows {face:?}");
        }
    }

    if let Ok(mut cam_tf) = camera_q.single_mut() {
        *cam_tf = Transform::from_translation(point3(&frame.camera_position))
            .looking_at(Vec3::ZERO, Vec3::Y);
    }
}

fn cancel_on_exit(mut exits: MessageReader<AppExit>, mut sim: ResMut<SimulationResource>) {
    if exits.read().next().is_some() && sim.cancel() {
        info!("Frame loop cancelled");
    }
}
