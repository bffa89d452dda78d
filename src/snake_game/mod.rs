//! The renderer-free core of the game: snake, apple, collisions, camera rig and the
//! session that schedules them. The `game` module mirrors this state into a Bevy scene.

use std::{fmt, time::Duration};

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

pub mod apple;
pub mod camera;
pub mod collision;
pub mod input;
pub mod scheduler;
pub mod session;
pub mod snake;

pub use apple::{Apple, AppleEaten};
pub use camera::{CameraError, CameraMode, CameraRig};
pub use collision::Arena;
pub use input::{GameKey, InputEvent, TapTarget};
pub use scheduler::{InputKind, Job, Scheduler, Task};
pub use session::{Clip, GameEvent, Phase, Session, SessionError, SnakeGame};
pub use snake::{BoundaryViolation, Snake};

/// Everything a session needs to know about timing, geometry and tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
    pub move_interval: Duration,
    pub apple_check_interval: Duration,
    pub arena_half_extent: f32,
    pub apple_spawn_extent: f32,
    pub snake_start: Vec3,
    pub initial_direction: Vec3,
    pub apple_start: Vec3,
    pub apple_y: f32,
    pub eat_threshold: f32,
    pub growth_per_apple: usize,
    pub apple_cooldown_checks: u32,
    pub camera_step: f32,
    pub orbit_eye: Vec3,
    pub follow_offset: Vec3,
    pub follow_look_ahead: f32,
    pub seed: Option<u64>,
}

impl Default for Rules {
    fn default() -> Self {
        crate::config::GameSettings::default().rules()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapKind {
    #[default]
    Ground,
    Ocean,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKind::Ground => write!(f, "Ground"),
            MapKind::Ocean => write!(f, "Ocean"),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}
