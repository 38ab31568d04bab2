use crate::FACE_UP_THRESHOLD;
use nalgebra::{UnitQuaternion, Vector3};

/// Coin face. Heads is the local `+Y` side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Face {
    #[default]
    Heads,
    Tails,
}

impl Face {
    pub fn label(self) -> char {
        match self {
            Face::Heads => 'H',
            Face::Tails => 'T',
        }
    }
}

/// Dot product of the coin's local up axis (in world space) with world up.
#[inline]
pub fn up_alignment(rotation: &UnitQuaternion<f32>) -> f32 {
    let coin_up = rotation * Vector3::y();
    coin_up.dot(&Vector3::y())
}

/// Which face an alignment clearly shows, if any.
#[inline]
pub fn face_for_alignment(dot: f32) -> Option<Face> {
    if dot > FACE_UP_THRESHOLD {
        Some(Face::Heads)
    } else if dot < -FACE_UP_THRESHOLD {
        Some(Face::Tails)
    } else {
        None
    }
}

/// Remembers which face texture is bound and reports edge-triggered swaps.
///
/// Alignments inside `[-FACE_UP_THRESHOLD, FACE_UP_THRESHOLD]` keep the current
/// face, so a coin spinning through vertical does not flicker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceTracker {
    bound: Face,
}

impl FaceTracker {
    pub fn new(bound: Face) -> Self {
        Self { bound }
    }

    pub fn bound(&self) -> Face {
        self.bound
    }

    /// Feed one frame's alignment. Returns the new face only when it changed.
    pub fn observe(&mut self, dot: f32) -> Option<Face> {
        let face = face_for_alignment(dot)?;
        if face == self.bound {
            return None;
        }
        self.bound = face;
        Some(face)
    }

    pub fn observe_rotation(&mut self, rotation: &UnitQuaternion<f32>) -> Option<Face> {
        self.observe(up_alignment(rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn level_coin_shows_heads_and_flipped_coin_shows_tails() {
        assert!((up_alignment(&UnitQuaternion::identity()) - 1.0).abs() < 1.0e-6);

        let flipped = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI);
        assert!((up_alignment(&flipped) + 1.0).abs() < 1.0e-6);

        let edge = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2);
        assert!(up_alignment(&edge).abs() < 1.0e-6);
    }

    #[test]
    fn end_to_end_dot_products() {
        let mut tracker = FaceTracker::default();
        assert_eq!(tracker.observe(1.0), None);
        assert_eq!(tracker.bound(), Face::Heads);

        assert_eq!(tracker.observe(-1.0), Some(Face::Tails));
        assert_eq!(tracker.bound(), Face::Tails);

        assert_eq!(tracker.observe(0.0), None);
        assert_eq!(tracker.bound(), Face::Tails);
    }

    #[test]
    fn swaps_once_per_crossing_and_never_inside_band() {
        let mut tracker = FaceTracker::new(Face::Heads);
        let sweep = [
            0.9, 0.71, 0.7, 0.3, 0.0, -0.5, -0.7, -0.71, -0.9, -1.0, -0.8, -0.2, 0.2, 0.69, 0.7,
            0.75, 0.9, 0.95,
        ];
        let mut swaps = Vec::new();
        for (i, &dot) in sweep.iter().enumerate() {
            let before = tracker.bound();
            if let Some(face) = tracker.observe(dot) {
                assert!(dot.abs() > FACE_UP_THRESHOLD, "swap inside band at {dot}");
                swaps.push((i, face));
            } else {
                assert_eq!(tracker.bound(), before);
            }
        }
        assert_eq!(swaps, vec![(7, Face::Tails), (15, Face::Heads)]);
    }

    #[test]
    fn boundary_values_are_inside_the_band() {
        assert_eq!(face_for_alignment(0.7), None);
        assert_eq!(face_for_alignment(-0.7), None);
        assert_eq!(face_for_alignment(0.7001), Some(Face::Heads));
        assert_eq!(face_for_alignment(-0.7001), Some(Face::Tails));
    }
}
