use bevy::math::Vec3;

/// The square playing field, centered on the origin in the XZ plane.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Arena {
    pub half_extent: f32,
}

impl Arena {
    pub fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    pub fn hits_wall(&self, pt: Vec3) -> bool {
        check_wall_collision(pt, self.half_extent)
    }
}

/// True once the point is strictly outside the walls. Y is ignored.
pub fn check_wall_collision(head: Vec3, half_extent: f32) -> bool {
    head.x.abs() > half_extent || head.z.abs() > half_extent
}

pub fn check_apple_collision(head: Vec3, apple: Vec3, threshold: f32) -> bool {
    head.distance(apple) < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_edges() {
        let arena = Arena::new(5.0);
        assert!(!arena.hits_wall(Vec3::new(5.0, -0.4, -5.0)));
        assert!(!arena.hits_wall(Vec3::new(4.99, -0.4, 0.01)));
        assert!(arena.hits_wall(Vec3::new(5.01, -0.4, 0.0)));
        assert!(arena.hits_wall(Vec3::new(0.0, -0.4, -5.01)));
        // Height never matters.
        assert!(!arena.hits_wall(Vec3::new(0.0, 100.0, 0.0)));
    }

    #[test]
    fn test_apple_threshold_is_strict() {
        let head = Vec3::new(1.9, -0.4, 1.0);
        assert!(check_apple_collision(head, Vec3::new(2.0, -0.4, 1.0), 0.2));
        assert!(!check_apple_collision(head, Vec3::new(2.5, -0.4, 1.0), 0.2));
        assert!(!check_apple_collision(Vec3::ZERO, Vec3::new(0.25, 0.0, 0.0), 0.25));
    }
}
