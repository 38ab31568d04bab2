use crate::{HORIZONTAL_IMPULSE_SPREAD, SPIN_SPREAD, UP_IMPULSE_MAX, UP_IMPULSE_MIN};
use nalgebra::Vector3;
use rand::Rng;

/// One randomized flip: everything applied to the coin when the user flips it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchImpulse {
    /// Linear velocity the coin is reset to before the impulse (m/s).
    pub reset_velocity: Vector3<f32>,
    /// Impulse applied at the coin's center (N·s). `z` is always zero.
    pub impulse: Vector3<f32>,
    /// Angular velocity that replaces any existing spin (rad/s).
    pub spin: Vector3<f32>,
}

impl LaunchImpulse {
    /// Draw a flip from `rng`.
    ///
    /// The same horizontal draw feeds x and z of the reset velocity but only
    /// x of the impulse.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        let up = rng.gen_range(UP_IMPULSE_MIN..=UP_IMPULSE_MAX);
        let horiz = rng.gen_range(-HORIZONTAL_IMPULSE_SPREAD..=HORIZONTAL_IMPULSE_SPREAD);

        let mut spin_axis = || rng.gen_range(-SPIN_SPREAD..=SPIN_SPREAD);
        let spin = Vector3::new(spin_axis(), spin_axis(), spin_axis());

        Self {
            reset_velocity: Vector3::new(horiz, 0.0, horiz),
            impulse: Vector3::new(horiz, up, 0.0),
            spin,
        }
    }

    pub fn up_impulse(&self) -> f32 {
        self.impulse.y
    }

    pub fn horizontal_impulse(&self) -> f32 {
        self.impulse.x
    }
}
