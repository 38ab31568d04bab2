//! Box layout and ground geometry derived from the environment settings.
//!
//! Everything here is pure math: the physics world and the renderer both call
//! into it so the two object sets are built from one description.

use crate::{
    GROUND_HALF_THICKNESS, GROUND_RADIUS_SCALE, WALL_THICKNESS,
    rapier::{ColliderShapeDef, StaticBodyDef, StaticRole, WallSide},
};
use rapier3d::{na::UnitQuaternion, prelude::*};

/// The two settings that shape the box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentParams {
    /// Distance between opposing inner wall faces (meters).
    pub box_size: f32,
    /// Ground curvature slider value; larger is flatter.
    pub ground_curvature: f32,
}

/// Definition of one box wall.
///
/// Walls are shifted outwards by half their thickness so the inner faces of
/// opposing walls are exactly `box_size` apart.
pub fn wall_def(side: WallSide, box_size: f32) -> StaticBodyDef {
    let size = box_size;
    let h = size / 2.0;
    let t = WALL_THICKNESS;
    let offset = h + t / 2.0;

    let (extents, translation) = match side {
        WallSide::Floor => (vector![size, t, size], vector![0.0, -offset, 0.0]),
        WallSide::Ceiling => (vector![size, t, size], vector![0.0, offset, 0.0]),
        WallSide::Front => (vector![size, size + 2.0 * t, t], vector![0.0, 0.0, -offset]),
        WallSide::Back => (vector![size, size + 2.0 * t, t], vector![0.0, 0.0, offset]),
        WallSide::Left => (
            vector![t, size + 2.0 * t, size + 2.0 * t],
            vector![-offset, 0.0, 0.0],
        ),
        WallSide::Right => (
            vector![t, size + 2.0 * t, size + 2.0 * t],
            vector![offset, 0.0, 0.0],
        ),
    };

    StaticBodyDef {
        role: StaticRole::Wall(side),
        translation,
        rotation: UnitQuaternion::identity(),
        shape: ColliderShapeDef::Cuboid {
            half_extents: extents / 2.0,
        },
    }
}

/// Definition of the flat collision ground.
///
/// It sits flush against the floor's outer face so the coin only ever touches
/// the floor wall itself.
pub fn ground_def(box_size: f32) -> StaticBodyDef {
    StaticBodyDef {
        role: StaticRole::Ground,
        translation: vector![
            0.0,
            -box_size / 2.0 - WALL_THICKNESS - GROUND_HALF_THICKNESS,
            0.0
        ],
        rotation: UnitQuaternion::identity(),
        shape: ColliderShapeDef::Cuboid {
            half_extents: vector![box_size, GROUND_HALF_THICKNESS, box_size],
        },
    }
}

/// Ground first, then the six walls in [`WallSide::ALL`] order.
pub fn environment_defs(params: EnvironmentParams) -> Vec<StaticBodyDef> {
    std::iter::once(ground_def(params.box_size))
        .chain(
            WallSide::ALL
                .iter()
                .map(|&side| wall_def(side, params.box_size)),
        )
        .collect()
}

/// Paraboloid height of the visual ground at `(x, z)` relative to its center.
#[inline]
pub fn ground_height(x: f32, z: f32, ground_curvature: f32) -> f32 {
    let radius = ground_curvature * GROUND_RADIUS_SCALE;
    (x * x + z * z) / (2.0 * radius)
}

/// Triangle-list grid for the visual ground.
#[derive(Clone, Debug, Default)]
pub struct GroundGrid {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// Build a `(2 * box_size)` square grid with `subdivisions` quads per side,
/// lifted into a paraboloid by [`ground_height`].
pub fn ground_grid(params: EnvironmentParams, subdivisions: u32) -> GroundGrid {
    let n = subdivisions.max(1);
    let side = params.box_size * 2.0;
    let step = side / n as f32;
    let half = side / 2.0;

    let verts_per_row = n + 1;
    let mut grid = GroundGrid {
        positions: Vec::with_capacity((verts_per_row * verts_per_row) as usize),
        uvs: Vec::with_capacity((verts_per_row * verts_per_row) as usize),
        indices: Vec::with_capacity((n * n * 6) as usize),
    };

    for row in 0..verts_per_row {
        for col in 0..verts_per_row {
            let x = -half + col as f32 * step;
            let z = -half + row as f32 * step;
            let y = ground_height(x, z, params.ground_curvature);
            grid.positions.push([x, y, z]);
            grid.uvs.push([col as f32 / n as f32, row as f32 / n as f32]);
        }
    }

    // Counter-clockwise when seen from +Y.
    for row in 0..n {
        for col in 0..n {
            let a = row * verts_per_row + col;
            let b = a + 1;
            let c = a + verts_per_row;
            let d = c + 1;
            grid.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-5;

    fn inner_face(def: &StaticBodyDef, axis: usize) -> (f32, f32) {
        let ColliderShapeDef::Cuboid { half_extents } = &def.shape else {
            panic!("walls are cuboids");
        };
        (
            def.translation[axis] - half_extents[axis],
            def.translation[axis] + half_extents[axis],
        )
    }

    #[test]
    fn opposing_walls_are_box_size_apart() {
        for &size in &[2.0_f32, 5.0, 7.5, 15.0] {
            let pairs = [
                (WallSide::Floor, WallSide::Ceiling, 1),
                (WallSide::Front, WallSide::Back, 2),
                (WallSide::Left, WallSide::Right, 0),
            ];
            for (low, high, axis) in pairs {
                let (_, low_inner) = inner_face(&wall_def(low, size), axis);
                let (high_inner, _) = inner_face(&wall_def(high, size), axis);
                assert!(
                    (high_inner - low_inner - size).abs() < EPS,
                    "{low:?}/{high:?} at size {size}: {}",
                    high_inner - low_inner
                );
            }
        }
    }

    #[test]
    fn environment_has_one_ground_and_six_walls() {
        let defs = environment_defs(EnvironmentParams {
            box_size: 5.0,
            ground_curvature: 10.0,
        });
        assert_eq!(defs.len(), 7);
        assert_eq!(
            defs.iter().filter(|d| d.role == StaticRole::Ground).count(),
            1
        );
        assert_eq!(
            defs.iter()
                .filter(|d| matches!(d.role, StaticRole::Wall(_)))
                .count(),
            6
        );
    }

    #[test]
    fn ground_sits_under_the_floor_wall() {
        for &size in &[2.0_f32, 5.0, 15.0] {
            let ground = ground_def(size);
            let ColliderShapeDef::Cuboid { half_extents } = ground.shape else {
                panic!("ground is a cuboid");
            };
            let top = ground.translation.y + half_extents.y;
            let (floor_outer, floor_inner) = inner_face(&wall_def(WallSide::Floor, size), 1);
            assert!((top - floor_outer).abs() < EPS, "ground top {top} at size {size}");
            // Never coplanar with the face the coin rests on.
            assert!(floor_inner - top > WALL_THICKNESS - EPS);
        }
    }

    #[test]
    fn ground_height_is_zero_at_center_and_grows_outwards() {
        assert_eq!(ground_height(0.0, 0.0, 10.0), 0.0);
        let near = ground_height(0.5, 0.0, 10.0);
        let far = ground_height(1.0, 1.0, 10.0);
        assert!(near > 0.0);
        assert!(far > near);
        // r = 10 * 0.04 = 0.4, h(1, 0) = 1 / 0.8
        assert!((ground_height(1.0, 0.0, 10.0) - 1.25).abs() < EPS);
    }

    #[test]
    fn ground_grid_has_expected_vertex_and_index_counts() {
        let grid = ground_grid(
            EnvironmentParams {
                box_size: 5.0,
                ground_curvature: 10.0,
            },
            32,
        );
        assert_eq!(grid.positions.len(), 33 * 33);
        assert_eq!(grid.uvs.len(), grid.positions.len());
        assert_eq!(grid.indices.len(), 32 * 32 * 6);
        assert!(
            grid.indices
                .iter()
                .all(|&i| (i as usize) < grid.positions.len())
        );

        let first = grid.positions[0];
        assert!((first[0] + 5.0).abs() < EPS && (first[2] + 5.0).abs() < EPS);
    }
}
