use rapier3d::{
    na::{Translation3, UnitQuaternion},
    prelude::*,
};

/// Canonical, renderer-agnostic definition of a fixed body in the coin box.
///
/// The physics world builds colliders from it and the client builds meshes from
/// the very same value, so both sides always agree on size and placement.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticBodyDef {
    pub role: StaticRole,
    /// World-space translation.
    pub translation: Vector<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    /// Collider shape parameters.
    pub shape: ColliderShapeDef,
}

/// What a fixed body is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StaticRole {
    /// Collision slab under the floor.
    Ground,
    /// One of the six box sides.
    Wall(WallSide),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallSide {
    Floor,
    Ceiling,
    Front,
    Back,
    Left,
    Right,
}

impl WallSide {
    pub const ALL: [WallSide; 6] = [
        WallSide::Floor,
        WallSide::Ceiling,
        WallSide::Front,
        WallSide::Back,
        WallSide::Left,
        WallSide::Right,
    ];
}

/// Supported collider shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum ColliderShapeDef {
    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },

    /// Y-aligned cylinder (meters).
    CylinderY { radius: f32, half_height: f32 },
}

impl ColliderShapeDef {
    /// Full extents of the shape's bounding box in its local frame.
    pub fn extents(&self) -> Vector<f32> {
        match self {
            ColliderShapeDef::Cuboid { half_extents } => half_extents * 2.0,
            ColliderShapeDef::CylinderY {
                radius,
                half_height,
            } => vector![radius * 2.0, half_height * 2.0, radius * 2.0],
        }
    }
}

/// Build a Rapier collider builder from a shape definition.
///
/// The collider gets identity local transform; the pose lives on the parent rigid-body.
pub fn collider_builder(shape: &ColliderShapeDef) -> ColliderBuilder {
    match shape {
        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }

        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => ColliderBuilder::cylinder(*half_height, *radius),
    }
}

/// Build a fixed rigid-body for a static definition.
pub fn fixed_body_from_def(def: &StaticBodyDef) -> RigidBody {
    let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
    RigidBodyBuilder::fixed().pose(iso).build()
}
