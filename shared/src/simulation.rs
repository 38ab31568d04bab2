//! The owned simulation context and its per-frame loop.
//!
//! A host (the Bevy client, or a test) calls [`Simulation::frame`] once per
//! display refresh with a monotonic wall-clock timestamp and mirrors the
//! returned [`FrameOutput`] into its scene.

use crate::{
    CAMERA_START, MAX_FRAME_DELTA_SECS,
    camera::CameraState,
    launch::LaunchImpulse,
    orientation::{Face, FaceTracker},
    settings::{SettingChange, SettingField, SimulationSettings},
    world::{CoinPose, CoinRespawn, CoinWorld, EnvironmentRebuild},
};
use nalgebra::Point3;
use rand::{SeedableRng, rngs::StdRng};

/// What to do with physics on a given frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameStep {
    /// Step physics by this many seconds.
    Advance(f32),
    /// First frame, stutter, or clock going backwards.
    Skip,
}

/// Converts absolute frame timestamps into step decisions.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn tick(&mut self, now_secs: f64) -> FrameStep {
        let previous = self.last.replace(now_secs);
        let Some(previous) = previous else {
            return FrameStep::Skip;
        };
        step_for_delta(now_secs - previous)
    }
}

/// Only deltas strictly inside `(0, MAX_FRAME_DELTA_SECS)` advance physics.
#[inline]
pub fn step_for_delta(delta_secs: f64) -> FrameStep {
    if delta_secs > 0.0 && delta_secs < MAX_FRAME_DELTA_SECS {
        FrameStep::Advance(delta_secs as f32)
    } else {
        FrameStep::Skip
    }
}

/// Everything the renderer needs after one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutput {
    /// True when physics advanced and orientation was checked.
    pub stepped: bool,
    pub coin: Option<CoinPose>,
    /// Texture to bind, only on the frame the visible face changes.
    pub face_swap: Option<Face>,
    pub camera_position: Point3<f32>,
}

/// How a setting change was applied.
#[derive(Clone, Debug)]
pub enum SettingOutcome {
    /// A property was written on an existing body (or the world).
    Updated { field: SettingField, value: f32 },
    /// The ground and walls were replaced.
    Rebuilt {
        field: SettingField,
        value: f32,
        rebuild: EnvironmentRebuild,
    },
}

pub struct Simulation {
    settings: SimulationSettings,
    world: CoinWorld,
    camera: CameraState,
    camera_position: Point3<f32>,
    faces: FaceTracker,
    clock: FrameClock,
    rng: StdRng,
    cancelled: bool,
}

impl Simulation {
    /// Build the box and coin. `seed` makes flips reproducible.
    pub fn new(settings: SimulationSettings, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            world: CoinWorld::new(&settings),
            settings,
            camera: CameraState::default(),
            camera_position: Point3::from(CAMERA_START),
            faces: FaceTracker::default(),
            clock: FrameClock::default(),
            rng,
            cancelled: false,
        }
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn world(&self) -> &CoinWorld {
        &self.world
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraState {
        &mut self.camera
    }

    pub fn camera_position(&self) -> Point3<f32> {
        self.camera_position
    }

    pub fn bound_face(&self) -> Face {
        self.faces.bound()
    }

    pub fn is_running(&self) -> bool {
        !self.cancelled
    }

    /// Stop the frame loop. Returns true only for the call that stopped it.
    pub fn cancel(&mut self) -> bool {
        !std::mem::replace(&mut self.cancelled, true)
    }

    /// Run one animation frame at wall-clock time `now_secs`.
    ///
    /// Returns `None` once the loop has been cancelled.
    pub fn frame(&mut self, now_secs: f64) -> Option<FrameOutput> {
        if self.cancelled {
            return None;
        }

        let mut face_swap = None;
        let stepped = match self.clock.tick(now_secs) {
            FrameStep::Advance(dt) => {
                self.world.step(dt);
                if let Some(pose) = self.world.coin_pose() {
                    face_swap = self.faces.observe_rotation(&pose.rotation);
                }
                true
            }
            FrameStep::Skip => false,
        };

        self.camera_position = self.camera.follow(self.camera_position);

        Some(FrameOutput {
            stepped,
            coin: self.world.coin_pose(),
            face_swap,
            camera_position: self.camera_position,
        })
    }

    /// Launch the coin with fresh random impulses. No-op without a coin.
    pub fn flip(&mut self) -> Option<LaunchImpulse> {
        self.world.coin_handle()?;
        let launch = LaunchImpulse::sample(&mut self.rng);
        self.world.flip(&launch)?;
        log::debug!(
            "flip: up={:.2} horiz={:.2}",
            launch.up_impulse(),
            launch.horizontal_impulse()
        );
        Some(launch)
    }

    /// Store a setting and push it into the physics world.
    pub fn apply_setting(&mut self, change: SettingChange) -> Result<SettingOutcome, &'static str> {
        let value = self.settings.set(change)?;
        let field = change.field;

        if field.rebuilds_environment() {
            let rebuild = self.world.rebuild_environment(&self.settings);
            return Ok(SettingOutcome::Rebuilt {
                field,
                value,
                rebuild,
            });
        }

        match field {
            SettingField::Gravity => self.world.set_gravity(value),
            SettingField::Density => self.world.set_coin_mass(self.settings.coin_mass()),
            SettingField::Restitution => self.world.set_coin_restitution(value),
            SettingField::Damping => self.world.set_coin_damping(value),
            SettingField::GroundCurvature | SettingField::BoxSize => {}
        }
        Ok(SettingOutcome::Updated { field, value })
    }

    /// Replace the coin with a fresh one at the spawn point, showing heads.
    pub fn respawn_coin(&mut self) -> CoinRespawn {
        self.faces = FaceTracker::default();
        self.world.respawn_coin(&self.settings)
    }
}
