use bevy::{
    math::{Vec2, Vec3},
    prelude::Transform,
};
use log::warn;
use thiserror::Error;

use super::{input::GameKey, snake::Snake, Difficulty, Rules};

#[derive(Error, Copy, Clone, PartialEq, Eq, Debug)]
pub enum CameraError {
    #[error("snake direction has no horizontal component; keeping the previous camera pose")]
    DegenerateDirection,
}

/// Fixed for the whole session once picked.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CameraMode {
    /// Static camera moved with W/S/A/D and zoomed with Z/X.
    OrbitZoom,
    /// Chase camera that follows the head every frame, no manual control.
    FirstPersonFollow,
}

impl From<Difficulty> for CameraMode {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => CameraMode::OrbitZoom,
            Difficulty::Hard => CameraMode::FirstPersonFollow,
        }
    }
}

/// Camera pose plus the mode-specific rules for changing it. `transform` is camera-to-world,
/// looking down its local -Z.
#[derive(Clone, Debug)]
pub struct CameraRig {
    mode: CameraMode,
    transform: Transform,
    heading: f32,
    step: f32,
    follow_offset: Vec3,
    look_ahead: f32,
}

impl CameraRig {
    pub fn new(mode: CameraMode, rules: &Rules, snake: &Snake) -> CameraRig {
        let mut rig = CameraRig {
            mode,
            transform: Transform::from_translation(rules.orbit_eye)
                .looking_at(snake.head_location(), Vec3::Y),
            heading: 0.0,
            step: rules.camera_step,
            follow_offset: rules.follow_offset,
            look_ahead: rules.follow_look_ahead,
        };
        if mode == CameraMode::FirstPersonFollow {
            // A bad start direction leaves the overview pose until the first good frame.
            if let Err(err) = rig.follow(snake) {
                warn!("{err}");
            }
        }
        rig
    }

    /// W/S/A/D slide along world X/Z, Z/X move along the camera's own Z axis.
    /// Returns whether the key did anything; everything is ignored outside `OrbitZoom`.
    pub fn handle_key(&mut self, key: GameKey) -> bool {
        if self.mode != CameraMode::OrbitZoom {
            return false;
        }
        let step = self.step;
        let forward = self.forward_axis();
        let translation = &mut self.transform.translation;
        match key {
            GameKey::CameraForward => translation.z -= step,
            GameKey::CameraBack => translation.z += step,
            GameKey::CameraLeft => translation.x -= step,
            GameKey::CameraRight => translation.x += step,
            GameKey::ZoomIn => *translation -= forward * step,
            GameKey::ZoomOut => *translation += forward * step,
            GameKey::TurnLeft | GameKey::TurnRight => return false,
        }
        true
    }

    /// Re-aim the chase camera at the snake. Does nothing in `OrbitZoom`.
    pub fn follow(&mut self, snake: &Snake) -> Result<(), CameraError> {
        if self.mode != CameraMode::FirstPersonFollow {
            return Ok(());
        }
        let direction = snake.direction();
        let flat = Vec2::new(direction.x, direction.z);
        if !flat.is_finite() || flat.length_squared() < 1e-12 {
            return Err(CameraError::DegenerateDirection);
        }
        let head = snake.head_location();
        let eye = head + direction + self.follow_offset;
        let target = head + Vec3::NEG_Z * self.look_ahead;
        self.heading = direction.z.atan2(direction.x);
        // The view always faces -Z; `heading` is kept for things that should turn with the snake.
        self.transform = Transform::from_translation(eye).looking_at(target, Vec3::Y);
        Ok(())
    }

    /// Third column of the rotation, i.e. the camera's local +Z in world space.
    pub fn forward_axis(&self) -> Vec3 {
        self.transform.rotation * Vec3::Z
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Snake heading as `atan2(z, x)` from the last successful follow update.
    pub fn heading(&self) -> f32 {
        self.heading
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use bevy::math::Quat;

    use super::*;

    fn snake_at_start() -> Snake {
        Snake::new(Vec3::new(0.0, -0.4, 0.0), Vec3::new(0.0, 0.0, 0.01))
    }

    #[test]
    fn test_orbit_starts_looking_at_snake() {
        let rules = Rules::default();
        let rig = CameraRig::new(CameraMode::OrbitZoom, &rules, &snake_at_start());
        assert_eq!(rig.transform().translation, Vec3::new(5.0, 5.0, 3.0));
        let view = -rig.forward_axis();
        let expected = (Vec3::new(0.0, -0.4, 0.0) - Vec3::new(5.0, 5.0, 3.0)).normalize();
        assert!(view.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_zoom_in_moves_against_local_z() {
        let rules = Rules::default();
        let mut rig = CameraRig::new(CameraMode::OrbitZoom, &rules, &snake_at_start());
        rig.transform = Transform::from_xyz(0.0, 1.0, 2.0).with_rotation(Quat::from_rotation_y(PI));
        let forward = rig.forward_axis();
        assert!(forward.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));

        let before = rig.transform().translation;
        assert!(rig.handle_key(GameKey::ZoomIn));
        let after = rig.transform().translation;
        assert!(after.abs_diff_eq(before - forward * 0.1, 1e-6));

        assert!(rig.handle_key(GameKey::ZoomOut));
        assert!(rig.transform().translation.abs_diff_eq(before, 1e-6));
    }

    #[test]
    fn test_zoom_in_approaches_scene_center() {
        let rules = Rules::default();
        let mut rig = CameraRig::new(CameraMode::OrbitZoom, &rules, &snake_at_start());
        let center = Vec3::new(0.0, -0.4, 0.0);
        let before = rig.transform().translation.distance(center);
        rig.handle_key(GameKey::ZoomIn);
        let after = rig.transform().translation.distance(center);
        assert!((before - after - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_wasd_moves_along_world_axes() {
        let rules = Rules::default();
        let mut rig = CameraRig::new(CameraMode::OrbitZoom, &rules, &snake_at_start());
        rig.handle_key(GameKey::CameraForward);
        rig.handle_key(GameKey::CameraLeft);
        assert!(rig.transform().translation.abs_diff_eq(Vec3::new(4.9, 5.0, 2.9), 1e-6));
        rig.handle_key(GameKey::CameraBack);
        rig.handle_key(GameKey::CameraRight);
        assert!(rig.transform().translation.abs_diff_eq(Vec3::new(5.0, 5.0, 3.0), 1e-6));
        assert!(!rig.handle_key(GameKey::TurnLeft));
    }

    #[test]
    fn test_follow_mode_ignores_keys() {
        let rules = Rules::default();
        let mut rig = CameraRig::new(CameraMode::FirstPersonFollow, &rules, &snake_at_start());
        let before = rig.transform();
        assert!(!rig.handle_key(GameKey::CameraForward));
        assert!(!rig.handle_key(GameKey::ZoomIn));
        assert_eq!(rig.transform(), before);
    }

    #[test]
    fn test_follow_tracks_head() {
        let rules = Rules::default();
        let mut snake = Snake::new(Vec3::new(1.0, -0.4, -2.0), Vec3::new(0.0, 0.0, 0.01));
        let mut rig = CameraRig::new(CameraMode::FirstPersonFollow, &rules, &snake);
        snake.turn_left();
        rig.follow(&snake).unwrap();
        let head = snake.head_location();
        let expected_eye = head + snake.direction() + Vec3::new(0.0, 0.5, 1.5);
        assert!(rig.transform().translation.abs_diff_eq(expected_eye, 1e-6));
        assert!((rig.heading() - 0.0).abs() < 1e-6);
        // Looks toward the point ahead of the head on -Z.
        let view = -rig.forward_axis();
        let expected = (head + Vec3::NEG_Z - expected_eye).normalize();
        assert!(view.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_follow_rejects_zero_direction() {
        let rules = Rules::default();
        let snake = Snake::new(Vec3::new(0.0, -0.4, 0.0), Vec3::ZERO);
        let mut rig = CameraRig::new(CameraMode::FirstPersonFollow, &rules, &snake);
        let before = rig.transform();
        assert_eq!(rig.follow(&snake), Err(CameraError::DegenerateDirection));
        assert_eq!(rig.transform(), before);
    }

    #[test]
    fn test_degenerate_start_keeps_overview_pose() {
        let rules = Rules::default();
        let snake = Snake::new(Vec3::new(0.0, -0.4, 0.0), Vec3::ZERO);
        let follow = CameraRig::new(CameraMode::FirstPersonFollow, &rules, &snake);
        let orbit = CameraRig::new(CameraMode::OrbitZoom, &rules, &snake);
        assert_eq!(follow.transform(), orbit.transform());
        assert_eq!(follow.heading(), 0.0);
    }

    #[test]
    fn test_orbit_follow_is_noop() {
        let rules = Rules::default();
        let snake = snake_at_start();
        let mut rig = CameraRig::new(CameraMode::OrbitZoom, &rules, &snake);
        let before = rig.transform();
        assert!(rig.follow(&snake).is_ok());
        assert_eq!(rig.transform(), before);
    }
}
