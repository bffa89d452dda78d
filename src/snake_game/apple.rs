use bevy::math::Vec3;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::snake::Snake;

/// Outcome of one eaten apple, returned so the caller can fire sound and score updates.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AppleEaten {
    pub segments_added: usize,
    pub new_position: Vec3,
}

#[derive(Clone, Debug)]
pub struct Apple {
    location: Vec3,
    eaten: bool,
    spawn_extent: f32,
    rng: StdRng,
}

impl Apple {
    pub fn new(start: Vec3, spawn_extent: f32, seed: Option<u64>) -> Apple {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Apple {
            location: start,
            eaten: false,
            spawn_extent,
            rng,
        }
    }

    /// Mark the apple eaten, grow the snake, then move the apple and re-arm it.
    /// Returns `None` if the apple is already marked eaten.
    pub fn on_eaten(&mut self, snake: &mut Snake, growth: usize) -> Option<AppleEaten> {
        if self.eaten {
            return None;
        }
        self.eaten = true;
        for _ in 0..growth {
            snake.add_segment();
        }
        self.reposition();
        self.eaten = false;
        info!("Apple eaten! Snake grows to {} segments", snake.length());
        Some(AppleEaten {
            segments_added: growth,
            new_position: self.location,
        })
    }

    /// Uniform in [-extent, extent] on X and Z, inset from the walls. Y is unchanged.
    pub fn reposition(&mut self) {
        let extent = self.spawn_extent;
        self.location.x = self.rng.gen_range(-extent..=extent);
        self.location.z = self.rng.gen_range(-extent..=extent);
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, location: Vec3) {
        self.location = location;
    }

    pub fn location(&self) -> Vec3 {
        self.location
    }

    pub fn is_eaten(&self) -> bool {
        self.eaten
    }
}
