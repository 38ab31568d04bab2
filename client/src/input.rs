use crate::{
    convert::na_vec2,
    simulation::{CoinRespawned, FrameSet, SimulationResource},
};
use bevy::{
    input::{
        mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit},
        touch::Touches,
    },
    prelude::*,
};
use leafwing_input_manager::prelude::*;
use shared::{CameraNudge, PIXELS_PER_WHEEL_LINE, TouchDrag};

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    Drag,
    Flip,
    RespawnCoin,
    RotateLeft,
    RotateRight,
    RotateUp,
    RotateDown,
    TogglePanel,
    PrevSetting,
    NextSetting,
    DecreaseSetting,
    IncreaseSetting,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::Drag, MouseButton::Left);
    input_map.insert(InputAction::Flip, KeyCode::Space);
    input_map.insert(InputAction::RespawnCoin, KeyCode::KeyR);
    input_map.insert(InputAction::RotateLeft, KeyCode::ArrowLeft);
    input_map.insert(InputAction::RotateRight, KeyCode::ArrowRight);
    input_map.insert(InputAction::RotateUp, KeyCode::ArrowUp);
    input_map.insert(InputAction::RotateDown, KeyCode::ArrowDown);
    input_map.insert(InputAction::TogglePanel, KeyCode::Tab);
    input_map.insert(InputAction::PrevSetting, KeyCode::BracketLeft);
    input_map.insert(InputAction::NextSetting, KeyCode::BracketRight);
    input_map.insert(InputAction::DecreaseSetting, KeyCode::Minus);
    input_map.insert(InputAction::DecreaseSetting, KeyCode::NumpadSubtract);
    input_map.insert(InputAction::IncreaseSetting, KeyCode::Equal);
    input_map.insert(InputAction::IncreaseSetting, KeyCode::NumpadAdd);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());

    app.add_systems(
        Update,
        (
            handle_flip,
            handle_respawn,
            rotate_with_keys,
            drag_with_mouse,
            drag_with_touch,
            zoom_with_wheel,
        )
            .in_set(FrameSet::Input),
    );
}

fn handle_flip(actions: Res<ActionState<InputAction>>, mut sim: ResMut<SimulationResource>) {
    if !actions.just_pressed(&InputAction::Flip) {
        return;
    }
    match sim.flip() {
        Some(launch) => info!(
            "Flip! up impulse {:.2}, horizontal {:.2}",
            launch.up_impulse(),
            launch.horizontal_impulse()
        ),
        None => debug!("Flip ignored: no coin"),
    }
}

fn handle_respawn(
    actions: Res<ActionState<InputAction>>,
    mut sim: ResMut<SimulationResource>,
    mut respawned: MessageWriter<CoinRespawned>,
) {
    if actions.just_pressed(&InputAction::RespawnCoin) {
        respawned.write(CoinRespawned(sim.respawn_coin()));
    }
}

/// Arrow keys nudge the camera every frame they are held.
fn rotate_with_keys(actions: Res<ActionState<InputAction>>, mut sim: ResMut<SimulationResource>) {
    let nudges = [
        (InputAction::RotateLeft, CameraNudge::Left),
        (InputAction::RotateRight, CameraNudge::Right),
        (InputAction::RotateUp, CameraNudge::Up),
        (InputAction::RotateDown, CameraNudge::Down),
    ];
    for (action, nudge) in nudges {
        if actions.pressed(&action) {
            sim.camera_mut().nudge(nudge);
        }
    }
}

fn drag_with_mouse(
    actions: Res<ActionState<InputAction>>,
    motion: Res<AccumulatedMouseMotion>,
    mut sim: ResMut<SimulationResource>,
) {
    let camera = sim.camera_mut();
    if actions.just_pressed(&InputAction::Drag) {
        camera.begin_drag(na_vec2(Vec2::ZERO));
    }
    if actions.pressed(&InputAction::Drag) && motion.delta != Vec2::ZERO {
        camera.drag_by(na_vec2(motion.delta));
    }
    if actions.just_released(&InputAction::Drag) {
        camera.end_drag();
    }
}

/// Single-finger drag orbits the camera. Extra fingers are ignored.
fn drag_with_touch(
    touches: Res<Touches>,
    mut touch_drag: Local<TouchDrag>,
    mut sim: ResMut<SimulationResource>,
) {
    let fingers: Vec<_> = touches
        .iter()
        .map(|t| (t.id(), na_vec2(t.position())))
        .collect();
    touch_drag.update(sim.camera_mut(), &fingers);
}

fn zoom_with_wheel(scroll: Res<AccumulatedMouseScroll>, mut sim: ResMut<SimulationResource>) {
    if scroll.delta.y == 0.0 {
        return;
    }
    let pixels = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y * PIXELS_PER_WHEEL_LINE,
        MouseScrollUnit::Pixel => scroll.delta.y,
    };
    // Scrolling towards the user zooms out.
    sim.camera_mut().scroll(-pixels);
}
