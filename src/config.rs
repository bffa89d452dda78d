//! Tunable game settings, loadable from a JSON file.

use std::{fs, path::Path, time::Duration};

use bevy::{math::Vec3, prelude::Resource};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snake_game::Rules;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("could not parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GameSettings {
    pub move_interval_ms: u64,
    pub apple_check_interval_ms: u64,
    pub arena_half_extent: f32,
    pub apple_spawn_extent: f32,
    pub snake_start: [f32; 3],
    pub snake_step: f32,
    pub apple_start: [f32; 3],
    pub apple_y: f32,
    pub eat_threshold: f32,
    pub growth_per_apple: usize,
    /// Apple checks to skip after an apple is eaten. Zero re-arms on the very next check.
    pub apple_cooldown_checks: u32,
    pub camera_step: f32,
    pub orbit_eye: [f32; 3],
    pub follow_offset: [f32; 3],
    pub follow_look_ahead: f32,
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            move_interval_ms: 20,
            apple_check_interval_ms: 100,
            arena_half_extent: 5.0,
            apple_spawn_extent: 4.0,
            snake_start: [0.0, -0.4, 0.0],
            snake_step: 0.01,
            apple_start: [2.0, -0.4, 1.0],
            apple_y: -0.4,
            eat_threshold: 0.2,
            growth_per_apple: 7,
            apple_cooldown_checks: 0,
            camera_step: 0.1,
            orbit_eye: [5.0, 5.0, 3.0],
            follow_offset: [0.0, 0.5, 1.5],
            follow_look_ahead: 1.0,
            seed: None,
        }
    }
}

impl GameSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, path.display().to_string())
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, "<inline>".to_string())
    }

    fn parse(text: &str, path: String) -> Result<Self, ConfigError> {
        let settings: Self =
            serde_json::from_str(text).map_err(|source| ConfigError::Parse { path, source })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects geometry the game cannot run with. The apple must spawn inside the walls.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &'static str| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        };
        if !self.arena_half_extent.is_finite() || self.arena_half_extent <= 0.0 {
            return invalid("arena_half_extent", "must be a positive number");
        }
        if !self.eat_threshold.is_finite() || self.eat_threshold <= 0.0 {
            return invalid("eat_threshold", "must be a positive number");
        }
        if !self.apple_spawn_extent.is_finite() || self.apple_spawn_extent < 0.0 {
            return invalid("apple_spawn_extent", "must be zero or a positive number");
        }
        if self.apple_spawn_extent > self.arena_half_extent {
            return invalid("apple_spawn_extent", "must not exceed arena_half_extent");
        }
        Ok(())
    }

    /// Converts the plain file values into the core's value types.
    pub fn rules(&self) -> Rules {
        Rules {
            move_interval: Duration::from_millis(self.move_interval_ms),
            apple_check_interval: Duration::from_millis(self.apple_check_interval_ms),
            arena_half_extent: self.arena_half_extent,
            apple_spawn_extent: self.apple_spawn_extent,
            snake_start: Vec3::from_array(self.snake_start),
            initial_direction: Vec3::new(0.0, 0.0, self.snake_step),
            apple_start: Vec3::from_array(self.apple_start),
            apple_y: self.apple_y,
            eat_threshold: self.eat_threshold,
            growth_per_apple: self.growth_per_apple,
            apple_cooldown_checks: self.apple_cooldown_checks,
            camera_step: self.camera_step,
            orbit_eye: Vec3::from_array(self.orbit_eye),
            follow_offset: Vec3::from_array(self.follow_offset),
            follow_look_ahead: self.follow_look_ahead,
            seed: self.seed,
        }
    }
}
