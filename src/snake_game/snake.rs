use std::collections::VecDeque;

use bevy::math::Vec3;
use thiserror::Error;

use super::collision::Arena;

/// The head would have left the arena. Terminal for the session.
#[derive(Error, Copy, Clone, PartialEq, Debug)]
#[error("snake hit the border at ({:.2}, {:.2})", attempted.x, attempted.z)]
pub struct BoundaryViolation {
    pub attempted: Vec3,
}

/// A chain of segment positions, head first. Every segment sits at `fixed_y`.
#[derive(Clone, Debug)]
pub struct Snake {
    locations: VecDeque<Vec3>,
    direction: Vec3,
    fixed_y: f32,
}

impl Snake {
    pub fn new(start: Vec3, direction: Vec3) -> Snake {
        let fixed_y = start.y;
        let mut locations = VecDeque::with_capacity(256);
        locations.push_front(start);
        Snake {
            locations,
            direction: Vec3::new(direction.x, 0.0, direction.z),
            fixed_y,
        }
    }

    /// Advance the head one step along `direction` and drag the body behind it.
    /// On a wall hit nothing moves and the violation is returned instead.
    pub fn move_snake(&mut self, arena: &Arena) -> Result<(), BoundaryViolation> {
        let mut new_head = self.head_location() + self.direction;
        new_head.y = self.fixed_y;
        if arena.hits_wall(new_head) {
            return Err(BoundaryViolation { attempted: new_head });
        }
        // Each segment takes its predecessor's old spot, so dropping the tail is the shift.
        self.locations.push_front(new_head);
        self.locations.pop_back();
        Ok(())
    }

    /// Rotate +90 degrees about the vertical axis.
    pub fn turn_left(&mut self) {
        let d = self.direction;
        self.direction = Vec3::new(d.z, 0.0, -d.x);
    }

    /// Rotate -90 degrees about the vertical axis.
    pub fn turn_right(&mut self) {
        let d = self.direction;
        self.direction = Vec3::new(-d.z, 0.0, d.x);
    }

    /// New segments start stacked on the tail and spread out as the snake moves.
    pub fn add_segment(&mut self) {
        let tail = self.tail_location();
        self.locations.push_back(tail);
    }

    pub fn head_location(&self) -> Vec3 {
        self.locations[0]
    }

    pub fn tail_location(&self) -> Vec3 {
        self.locations[self.locations.len() - 1]
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn locations(&self) -> &VecDeque<Vec3> {
        &self.locations
    }

    pub fn fixed_y(&self) -> f32 {
        self.fixed_y
    }

    pub fn length(&self) -> usize {
        self.locations.len()
    }
}
