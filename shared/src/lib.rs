pub mod camera;
pub mod constants;
pub mod environment;
pub mod launch;
pub mod orientation;
pub mod rapier;
pub mod settings;
pub mod simulation;
pub mod texture;
pub mod world;

// Re-export Rapier so the client can name handles without depending on `rapier3d` directly.
pub use rapier3d;

pub use constants::*;
pub use camera::{CameraNudge, CameraState, TouchDrag};
pub use environment::{EnvironmentParams, GroundGrid, ground_grid};
pub use launch::LaunchImpulse;
pub use orientation::{Face, FaceTracker, up_alignment};
pub use rapier::{ColliderShapeDef, StaticBodyDef, StaticRole, WallSide};
pub use settings::{SettingChange, SettingField, SimulationSettings, SliderRange};
pub use simulation::{FrameOutput, SettingOutcome, Simulation};
pub use texture::{FaceImage, render_face};
pub use world::{
    CoinPose, CoinRespawn, CoinWorld, EnvironmentRebuild, coin_shape, coin_spawn_point,
};
