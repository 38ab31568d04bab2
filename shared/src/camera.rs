use crate::{
    CAMERA_FOLLOW_FACTOR, CAMERA_HEIGHT_OFFSET, CAMERA_ORBIT_RADIUS, DRAG_SENSITIVITY,
    KEY_ROTATION_STEP, MAX_PITCH, MAX_ZOOM, MIN_PITCH, MIN_ZOOM, WHEEL_SENSITIVITY,
};
use nalgebra::{Point3, Vector2, Vector3};

/// Orbit camera targets driven by pointer, touch and keyboard input.
///
/// Only the targets live here. The rendered camera chases them through
/// [`CameraState::follow`] once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Target yaw around world Y (radians).
    pub target_yaw: f32,
    /// Target pitch, always within `[MIN_PITCH, MAX_PITCH]` (radians).
    pub target_pitch: f32,
    /// Orbit radius multiplier, always within `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f32,
    /// Last pointer position while a drag is active.
    drag_anchor: Option<Vector2<f32>>,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            target_yaw: 0.0,
            target_pitch: 0.0,
            zoom: 1.0,
            drag_anchor: None,
        }
    }
}

/// Discrete keyboard camera actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraNudge {
    Left,
    Right,
    Up,
    Down,
}

impl CameraState {
    /// Rotate the targets by a yaw/pitch delta (radians), clamping pitch.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.target_yaw += d_yaw;
        self.target_pitch = (self.target_pitch + d_pitch).clamp(MIN_PITCH, MAX_PITCH);
    }

    pub fn nudge(&mut self, nudge: CameraNudge) {
        let s = KEY_ROTATION_STEP;
        match nudge {
            CameraNudge::Left => self.rotate(-s, 0.0),
            CameraNudge::Right => self.rotate(s, 0.0),
            CameraNudge::Up => self.rotate(0.0, -s),
            CameraNudge::Down => self.rotate(0.0, s),
        }
    }

    /// Apply a wheel delta in pixels.
    pub fn scroll(&mut self, delta_y: f32) {
        self.zoom = (self.zoom + delta_y * WHEEL_SENSITIVITY).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Start a drag at a screen position (mouse button or single touch down).
    pub fn begin_drag(&mut self, at: Vector2<f32>) {
        self.drag_anchor = Some(at);
    }

    /// Move an active drag to a new screen position. Ignored when not dragging.
    pub fn drag_to(&mut self, at: Vector2<f32>) {
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        self.drag_by(at - anchor);
        self.drag_anchor = Some(at);
    }

    /// Apply a relative drag (pixels). Ignored when not dragging.
    pub fn drag_by(&mut self, delta: Vector2<f32>) {
        if self.drag_anchor.is_none() {
            return;
        }
        self.rotate(delta.x * DRAG_SENSITIVITY, delta.y * DRAG_SENSITIVITY);
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Where the camera wants to be, on a sphere around the origin lifted by
    /// `CAMERA_HEIGHT_OFFSET`.
    pub fn target_position(&self) -> Point3<f32> {
        let (yaw, pitch) = (self.target_yaw, self.target_pitch);
        let r = CAMERA_ORBIT_RADIUS * self.zoom;
        Point3::new(
            yaw.sin() * pitch.cos() * r,
            pitch.sin() * r + CAMERA_HEIGHT_OFFSET,
            yaw.cos() * pitch.cos() * r,
        )
    }

    /// Move `current` a fixed fraction of the way toward the target.
    ///
    /// The fraction is per call, so convergence speed depends on frame rate.
    pub fn follow(&self, current: Point3<f32>) -> Point3<f32> {
        let target = self.target_position();
        let delta: Vector3<f32> = target - current;
        current + delta * CAMERA_FOLLOW_FACTOR
    }
}

/// Which finger, if any, is orbiting the camera.
///
/// A drag only runs while exactly one finger is down. Any other count ends it,
/// and a lone finger left over from a multi-touch starts a fresh drag at its
/// current position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchDrag {
    finger: Option<u64>,
}

impl TouchDrag {
    /// Feed the fingers currently down as `(id, screen position)`.
    pub fn update(&mut self, camera: &mut CameraState, fingers: &[(u64, Vector2<f32>)]) {
        match fingers {
            [(id, at)] if self.finger == Some(*id) => camera.drag_to(*at),
            [(id, at)] => {
                camera.begin_drag(*at);
                self.finger = Some(*id);
            }
            _ => {
                if self.finger.take().is_some() {
                    camera.end_drag();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const EPS: f32 = 1.0e-5;

    #[test]
    fn pitch_stays_clamped_for_any_input() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut cam = CameraState::default();
        for _ in 0..10_000 {
            cam.rotate(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
            assert!((MIN_PITCH..=MAX_PITCH).contains(&cam.target_pitch));
        }
    }

    #[test]
    fn zoom_stays_clamped_for_any_wheel_delta() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut cam = CameraState::default();
        for _ in 0..10_000 {
            cam.scroll(rng.gen_range(-5_000.0..5_000.0));
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&cam.zoom));
        }
    }

    #[test]
    fn default_target_is_behind_and_above_origin() {
        let target = CameraState::default().target_position();
        assert!((target - Point3::new(0.0, 2.0, 8.0)).norm() < EPS);
    }

    #[test]
    fn follow_covers_ten_percent_of_the_gap() {
        let cam = CameraState::default();
        let next = cam.follow(Point3::origin());
        assert!((next - Point3::new(0.0, 0.2, 0.8)).norm() < EPS);
    }

    #[test]
    fn follow_converges_toward_target() {
        let cam = CameraState::default();
        let mut pos = Point3::new(5.0, -3.0, 1.0);
        for _ in 0..200 {
            pos = cam.follow(pos);
        }
        assert!((pos - cam.target_position()).norm() < 1.0e-3);
    }

    #[test]
    fn drag_rotates_only_while_active() {
        let mut cam = CameraState::default();
        cam.drag_to(Vector2::new(100.0, 100.0));
        assert_eq!(cam.target_yaw, 0.0);

        cam.begin_drag(Vector2::new(10.0, 10.0));
        cam.drag_to(Vector2::new(60.0, 30.0));
        assert!((cam.target_yaw - 0.5).abs() < EPS);
        assert!((cam.target_pitch - 0.2).abs() < EPS);

        cam.end_drag();
        cam.drag_by(Vector2::new(100.0, 0.0));
        assert!((cam.target_yaw - 0.5).abs() < EPS);
    }

    #[test]
    fn keyboard_nudges_are_clamped_too() {
        let mut cam = CameraState::default();
        for _ in 0..100 {
            cam.nudge(CameraNudge::Down);
        }
        assert_eq!(cam.target_pitch, MAX_PITCH);
        cam.nudge(CameraNudge::Left);
        assert!((cam.target_yaw + KEY_ROTATION_STEP).abs() < EPS);
    }

    #[test]
    fn second_finger_ends_touch_drag_without_a_jump() {
        let mut cam = CameraState::default();
        let mut touch = TouchDrag::default();
        let a = Vector2::new(100.0, 100.0);
        let b = Vector2::new(400.0, 300.0);

        touch.update(&mut cam, &[(1, a)]);
        touch.update(&mut cam, &[(1, a + Vector2::new(10.0, 0.0))]);
        let yaw = cam.target_yaw;
        assert!((yaw - 10.0 * DRAG_SENSITIVITY).abs() < EPS);

        touch.update(&mut cam, &[(1, a), (2, b)]);
        assert!(!cam.is_dragging());

        // Finger 1 lifts; finger 2 stays and becomes the new anchor.
        touch.update(&mut cam, &[(2, b)]);
        assert!(cam.is_dragging());
        assert_eq!(cam.target_yaw, yaw);

        touch.update(&mut cam, &[(2, b + Vector2::new(5.0, 0.0))]);
        assert!((cam.target_yaw - yaw - 5.0 * DRAG_SENSITIVITY).abs() < EPS);

        touch.update(&mut cam, &[]);
        assert!(!cam.is_dragging());
    }

    #[test]
    fn idle_touch_tracker_leaves_mouse_drag_alone() {
        let mut cam = CameraState::default();
        let mut touch = TouchDrag::default();
        cam.begin_drag(Vector2::zeros());
        touch.update(&mut cam, &[]);
        assert!(cam.is_dragging());
    }
}
