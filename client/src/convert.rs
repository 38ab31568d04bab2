//! nalgebra (simulation) to glam (Bevy) conversions.

use bevy::prelude::*;
use nalgebra::{Point3, UnitQuaternion, Vector2, Vector3};
use shared::CoinPose;

#[inline]
pub fn vec3(v: &Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn point3(p: &Point3<f32>) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

#[inline]
pub fn quat(q: &UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[inline]
pub fn na_vec2(v: Vec2) -> Vector2<f32> {
    Vector2::new(v.x, v.y)
}

pub fn pose_transform(pose: &CoinPose) -> Transform {
    Transform {
        translation: vec3(&pose.translation),
        rotation: quat(&pose.rotation),
        scale: Vec3::ONE,
    }
}
