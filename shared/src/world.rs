//! Rapier world holding the coin and the box around it.
//!
//! The world owns every physics body. Callers never see Rapier sets directly;
//! they get handles back from rebuilds and respawns and use those to keep their
//! own render objects paired with bodies.

use crate::{
    COIN_ANGULAR_DAMPING, COIN_EXTRA_SOLVER_ITERATIONS, COIN_FRICTION, COIN_RADIUS,
    COIN_SPAWN_HEIGHT, COIN_THICKNESS,
    environment::environment_defs,
    launch::LaunchImpulse,
    rapier::{ColliderShapeDef, StaticBodyDef, collider_builder, fixed_body_from_def},
    settings::SimulationSettings,
};
use rapier3d::{na::UnitQuaternion, prelude::*};

/// Shape of the coin collider.
pub fn coin_shape() -> ColliderShapeDef {
    ColliderShapeDef::CylinderY {
        radius: COIN_RADIUS,
        half_height: COIN_THICKNESS / 2.0,
    }
}

/// Where a fresh coin appears: [`COIN_SPAWN_HEIGHT`] above the center, or
/// lower when the box is too small to hold it there.
pub fn coin_spawn_point(box_size: f32) -> Vector<f32> {
    let height = COIN_SPAWN_HEIGHT.min(box_size / 2.0 - COIN_RADIUS);
    vector![0.0, height, 0.0]
}

/// How far the coin's bounds may poke past an inner wall face before a rebuild
/// puts it back at the spawn point.
const CONTAINMENT_SLACK: f32 = 0.05;

/// World pose of the coin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoinPose {
    pub translation: Vector<f32>,
    pub rotation: UnitQuaternion<f32>,
}

#[derive(Clone, Copy, Debug)]
struct CoinHandles {
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

/// Bodies swapped out by an environment rebuild.
///
/// Every handle in `removed` is gone from the world before any handle in
/// `added` was created.
#[derive(Clone, Debug, Default)]
pub struct EnvironmentRebuild {
    pub removed: Vec<RigidBodyHandle>,
    pub added: Vec<(RigidBodyHandle, StaticBodyDef)>,
}

/// Result of replacing the coin.
#[derive(Clone, Copy, Debug)]
pub struct CoinRespawn {
    pub removed: Option<RigidBodyHandle>,
    pub added: RigidBodyHandle,
}

pub struct CoinWorld {
    gravity: Vector<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    coin: Option<CoinHandles>,
    environment: Vec<(RigidBodyHandle, StaticBodyDef)>,
    steps: u64,
}

impl CoinWorld {
    /// An empty world with gravity from `settings`. No coin, no box.
    pub fn empty(settings: &SimulationSettings) -> Self {
        Self {
            gravity: vector![0.0, -settings.gravity, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            coin: None,
            environment: Vec::new(),
            steps: 0,
        }
    }

    /// A world with the box and a coin at its spawn point.
    pub fn new(settings: &SimulationSettings) -> Self {
        let mut world = Self::empty(settings);
        world.rebuild_environment(settings);
        world.respawn_coin(settings);
        world
    }

    /// Advance every body by `dt` seconds in a single step.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        self.steps += 1;
    }

    /// Number of completed physics steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn gravity(&self) -> f32 {
        -self.gravity.y
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = vector![0.0, -gravity, 0.0];
        // Resting bodies would otherwise ignore the new gravity until touched.
        if let Some(body) = self.coin_body_mut() {
            body.wake_up(true);
        }
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Tear down the ground and all walls, then build them again from `settings`.
    pub fn rebuild_environment(&mut self, settings: &SimulationSettings) -> EnvironmentRebuild {
        let old = std::mem::take(&mut self.environment);
        let mut removed = Vec::with_capacity(old.len());
        for (handle, _) in old {
            self.remove_body(handle);
            removed.push(handle);
        }

        for def in environment_defs(settings.environment()) {
            let handle = self.bodies.insert(fixed_body_from_def(&def));
            self.colliders
                .insert_with_parent(collider_builder(&def.shape).build(), handle, &mut self.bodies);
            self.environment.push((handle, def));
        }

        if let Some(body) = self.coin_body_mut() {
            body.wake_up(true);
        }
        self.contain_coin(settings.box_size);

        log::debug!(
            "rebuilt environment: box_size={} curvature={} ({} bodies removed)",
            settings.box_size,
            settings.ground_curvature,
            removed.len()
        );

        EnvironmentRebuild {
            removed,
            added: self.environment.clone(),
        }
    }

    fn coin_is_inside(&self, box_size: f32) -> bool {
        let Some(collider) = self.coin.and_then(|c| self.colliders.get(c.collider)) else {
            return true;
        };
        let aabb = collider.compute_aabb();
        let limit = box_size / 2.0 + CONTAINMENT_SLACK;
        (0..3).all(|axis| aabb.mins[axis] >= -limit && aabb.maxs[axis] <= limit)
    }

    /// Put the coin back at the spawn point, at rest, if a smaller box left it
    /// outside or inside a wall. The body handle is kept.
    fn contain_coin(&mut self, box_size: f32) {
        if self.coin_is_inside(box_size) {
            return;
        }
        let Some(body) = self.coin_body_mut() else {
            return;
        };
        body.set_translation(coin_spawn_point(box_size), true);
        body.set_rotation(UnitQuaternion::identity(), true);
        body.set_linvel(Vector::zeros(), true);
        body.set_angvel(Vector::zeros(), true);
        log::debug!("coin moved back inside a {box_size} box");
    }

    /// Handles and definitions of the ground and walls currently in the world.
    pub fn environment(&self) -> &[(RigidBodyHandle, StaticBodyDef)] {
        &self.environment
    }

    /// Remove the coin (if any) and create a fresh one at the spawn point.
    pub fn respawn_coin(&mut self, settings: &SimulationSettings) -> CoinRespawn {
        let removed = self.coin.take().map(|coin| {
            self.remove_body(coin.body);
            coin.body
        });

        let rb = RigidBodyBuilder::dynamic()
            .translation(coin_spawn_point(settings.box_size))
            .linear_damping(settings.damping)
            .angular_damping(COIN_ANGULAR_DAMPING)
            .additional_solver_iterations(COIN_EXTRA_SOLVER_ITERATIONS)
            .ccd_enabled(true)
            .build();
        let body = self.bodies.insert(rb);

        let collider = collider_builder(&coin_shape())
            .mass(settings.coin_mass())
            .restitution(settings.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .friction(COIN_FRICTION)
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        self.coin = Some(CoinHandles { body, collider });
        self.refresh_coin_mass();

        log::debug!("coin spawned: {body:?}");
        CoinRespawn {
            removed,
            added: body,
        }
    }

    pub fn coin_handle(&self) -> Option<RigidBodyHandle> {
        self.coin.map(|c| c.body)
    }

    fn coin_body(&self) -> Option<&RigidBody> {
        self.bodies.get(self.coin?.body)
    }

    fn coin_body_mut(&mut self) -> Option<&mut RigidBody> {
        self.bodies.get_mut(self.coin?.body)
    }

    fn coin_collider_mut(&mut self) -> Option<&mut Collider> {
        self.colliders.get_mut(self.coin?.collider)
    }

    fn refresh_coin_mass(&mut self) {
        let Some(coin) = self.coin else {
            return;
        };
        if let Some(body) = self.bodies.get_mut(coin.body) {
            body.recompute_mass_properties_from_colliders(&self.colliders);
        }
    }

    pub fn coin_pose(&self) -> Option<CoinPose> {
        let body = self.coin_body()?;
        Some(CoinPose {
            translation: *body.translation(),
            rotation: *body.rotation(),
        })
    }

    pub fn coin_linvel(&self) -> Option<Vector<f32>> {
        self.coin_body().map(|b| *b.linvel())
    }

    pub fn coin_angvel(&self) -> Option<Vector<f32>> {
        self.coin_body().map(|b| *b.angvel())
    }

    pub fn coin_mass(&self) -> Option<f32> {
        self.coin_body().map(|b| b.mass())
    }

    /// Launch the coin. No-op without a coin.
    pub fn flip(&mut self, launch: &LaunchImpulse) -> Option<()> {
        let body = self.coin_body_mut()?;
        body.set_linvel(launch.reset_velocity, true);
        let center = Point::from(*body.translation());
        body.apply_impulse_at_point(launch.impulse, center, true);
        body.set_angvel(launch.spin, true);
        Some(())
    }

    pub fn set_coin_mass(&mut self, mass: f32) {
        if let Some(collider) = self.coin_collider_mut() {
            collider.set_mass(mass);
        }
        self.refresh_coin_mass();
        if let Some(body) = self.coin_body_mut() {
            body.wake_up(true);
        }
    }

    pub fn set_coin_restitution(&mut self, restitution: f32) {
        if let Some(collider) = self.coin_collider_mut() {
            collider.set_restitution(restitution);
        }
    }

    pub fn set_coin_damping(&mut self, damping: f32) {
        if let Some(body) = self.coin_body_mut() {
            body.set_linear_damping(damping);
        }
    }

    pub fn coin_restitution(&self) -> Option<f32> {
        let coin = self.coin?;
        self.colliders.get(coin.collider).map(|c| c.restitution())
    }

    pub fn coin_damping(&self) -> Option<f32> {
        self.coin_body().map(|b| b.linear_damping())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rapier::StaticRole;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> (SimulationSettings, CoinWorld) {
        let settings = SimulationSettings::default();
        let world = CoinWorld::new(&settings);
        (settings, world)
    }

    #[test]
    fn new_world_has_coin_ground_and_six_walls() {
        let (_, world) = world();
        assert!(world.coin_handle().is_some());
        let env = world.environment();
        assert_eq!(env.len(), 7);
        assert_eq!(
            env.iter()
                .filter(|(_, d)| matches!(d.role, StaticRole::Wall(_)))
                .count(),
            6
        );
    }

    #[test]
    fn rebuild_replaces_every_environment_body() {
        let (mut settings, mut world) = world();
        let before: Vec<_> = world.environment().iter().map(|(h, _)| *h).collect();

        settings.box_size = 8.0;
        let rebuild = world.rebuild_environment(&settings);

        assert_eq!(rebuild.removed, before);
        assert_eq!(rebuild.added.len(), 7);
        for handle in &before {
            assert!(world.bodies.get(*handle).is_none());
        }
        // Coin + ground + six walls.
        assert_eq!(world.bodies.len(), 8);
        assert_eq!(world.colliders.len(), 8);

        let floor = rebuild
            .added
            .iter()
            .find(|(_, d)| d.role == StaticRole::Wall(crate::rapier::WallSide::Floor))
            .map(|(_, d)| d.translation.y);
        assert_eq!(floor, Some(-4.0 - 0.25));
    }

    #[test]
    fn coin_settles_flat_on_the_floor() {
        let (settings, mut world) = world();
        for _ in 0..600 {
            world.step(DT);
        }
        let pose = world.coin_pose().unwrap();
        let rest_y = -settings.box_size / 2.0 + COIN_THICKNESS / 2.0;
        assert!(
            (pose.translation.y - rest_y).abs() < 0.05,
            "coin at {}",
            pose.translation.y
        );
        assert!(crate::orientation::up_alignment(&pose.rotation) > 0.99);
    }

    #[test]
    fn spawn_point_fits_every_box_size() {
        assert_eq!(coin_spawn_point(5.0).y, COIN_SPAWN_HEIGHT);
        assert_eq!(coin_spawn_point(15.0).y, COIN_SPAWN_HEIGHT);
        assert!((coin_spawn_point(2.0).y - 0.5).abs() < 1.0e-6);

        for &size in &[2.0_f32, 2.5, 3.0, 3.5, 5.0] {
            let settings = SimulationSettings {
                box_size: size,
                ..SimulationSettings::default()
            };
            let mut world = CoinWorld::new(&settings);
            for _ in 0..600 {
                world.step(DT);
            }
            let h = size / 2.0;
            let p = world.coin_pose().unwrap().translation;
            assert!(
                (p.y - (-h + COIN_THICKNESS / 2.0)).abs() < 0.05,
                "box {size}: coin at {p:?}"
            );
            assert!(p.x.abs() < h && p.z.abs() < h, "box {size}: coin at {p:?}");
        }
    }

    #[test]
    fn shrinking_the_box_puts_the_coin_back_inside() {
        let (mut settings, mut world) = world();
        for _ in 0..300 {
            world.step(DT);
        }
        let handle = world.coin_handle();

        settings.box_size = 3.0;
        world.rebuild_environment(&settings);
        assert_eq!(world.coin_handle(), handle);
        let pose = world.coin_pose().unwrap();
        assert_eq!(pose.translation, coin_spawn_point(3.0));
        assert_eq!(world.coin_linvel(), Some(Vector::zeros()));

        for _ in 0..600 {
            world.step(DT);
        }
        let y = world.coin_pose().unwrap().translation.y;
        assert!((y - (-1.5 + COIN_THICKNESS / 2.0)).abs() < 0.05, "coin at {y}");
    }

    #[test]
    fn growing_the_box_leaves_a_resting_coin_alone() {
        let (mut settings, mut world) = world();
        for _ in 0..300 {
            world.step(DT);
        }
        let before = world.coin_pose().unwrap();

        settings.box_size = 10.0;
        world.rebuild_environment(&settings);
        assert_eq!(world.coin_pose(), Some(before));
    }

    #[test]
    fn flip_launches_coin_upwards_and_sets_spin() {
        let (_, mut world) = world();
        world.step(DT);
        let start_y = world.coin_pose().unwrap().translation.y;

        let launch = LaunchImpulse {
            reset_velocity: vector![1.0, 0.0, 1.0],
            impulse: vector![1.0, 5.0, 0.0],
            spin: vector![3.0, -2.0, 1.0],
        };
        world.flip(&launch).unwrap();

        let v = world.coin_linvel().unwrap();
        assert!(v.y > 0.0);
        assert!((v.z - 1.0).abs() < 1.0e-4, "z velocity only from the reset");
        assert_eq!(world.coin_angvel().unwrap(), launch.spin);

        world.step(DT);
        assert!(world.coin_pose().unwrap().translation.y > start_y);
    }

    #[test]
    fn flip_without_coin_is_a_no_op() {
        let settings = SimulationSettings::default();
        let mut world = CoinWorld::empty(&settings);
        let launch = LaunchImpulse {
            reset_velocity: vector![0.0, 0.0, 0.0],
            impulse: vector![0.0, 5.0, 0.0],
            spin: vector![0.0, 0.0, 0.0],
        };
        assert!(world.flip(&launch).is_none());
        assert!(world.coin_pose().is_none());
    }

    #[test]
    fn cheap_setters_update_coin_in_place() {
        let (_, mut world) = world();
        let handle = world.coin_handle();

        world.set_coin_mass(0.3);
        assert!((world.coin_mass().unwrap() - 0.3).abs() < 1.0e-4);

        world.set_coin_restitution(0.9);
        assert_eq!(world.coin_restitution(), Some(0.9));

        world.set_coin_damping(0.5);
        assert_eq!(world.coin_damping(), Some(0.5));

        world.set_gravity(3.0);
        assert_eq!(world.gravity(), 3.0);

        assert_eq!(world.coin_handle(), handle);
    }

    #[test]
    fn respawn_replaces_coin_body() {
        let (settings, mut world) = world();
        let old = world.coin_handle().unwrap();
        let respawn = world.respawn_coin(&settings);
        assert_eq!(respawn.removed, Some(old));
        assert_ne!(respawn.added, old);
        assert!(world.bodies.get(old).is_none());
        assert_eq!(world.coin_handle(), Some(respawn.added));
    }
}
