//! Axis-aligned bounding volumes for the arena walls
//!
//! Walls keep their visual transform (center, size, yaw); the AABB is
//! derived state rebuilt by `refresh` and never edited directly.

use glam::Vec3;

use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Overlap test (touching faces count as intersecting)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// A static box wall
#[derive(Debug, Clone)]
pub struct Wall {
    pub center: Vec3,
    pub size: Vec3,
    /// Rotation about +Y (radians)
    pub yaw: f32,
    bounds: Aabb,
}

impl Wall {
    pub fn new(center: Vec3, size: Vec3, yaw: f32) -> Self {
        let mut wall = Self {
            center,
            size,
            yaw,
            bounds: Aabb::from_center_size(center, size),
        };
        wall.refresh();
        wall
    }

    /// Rebuild the AABB enclosing the yawed box
    pub fn refresh(&mut self) {
        let (sin, cos) = self.yaw.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let half = self.size * 0.5;
        let extent = Vec3::new(
            cos * half.x + sin * half.z,
            half.y,
            sin * half.x + cos * half.z,
        );
        self.bounds = Aabb {
            min: self.center - extent,
            max: self.center + extent,
        };
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

/// The static walls of the arena
#[derive(Debug, Clone, Default)]
pub struct ColliderSet {
    walls: Vec<Wall>,
}

impl ColliderSet {
    /// Four boundary walls enclosing the square arena
    pub fn arena() -> Self {
        let edge = ARENA_HALF - WALL_THICKNESS / 2.0;
        let long_x = Vec3::new(ARENA_SIZE, WALL_HEIGHT, WALL_THICKNESS);
        let long_z = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, ARENA_SIZE);
        Self {
            walls: vec![
                Wall::new(Vec3::new(0.0, WALL_CENTER_Y, -edge), long_x, 0.0), // back
                Wall::new(Vec3::new(0.0, WALL_CENTER_Y, edge), long_x, 0.0),  // front
                Wall::new(Vec3::new(-edge, WALL_CENTER_Y, 0.0), long_z, 0.0), // left
                Wall::new(Vec3::new(edge, WALL_CENTER_Y, 0.0), long_z, 0.0),  // right
            ],
        }
    }

    /// Recompute every wall's bounds from its transform
    pub fn refresh(&mut self) {
        for wall in &mut self.walls {
            wall.refresh();
        }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Bounds of every wall overlapping `aabb`
    pub fn overlapping<'a>(&'a self, aabb: &'a Aabb) -> impl Iterator<Item = &'a Aabb> + 'a {
        self.walls
            .iter()
            .map(Wall::bounds)
            .filter(move |b| b.intersects(aabb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let b = Aabb::from_center_size(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(2.0));
        let c = Aabb::from_center_size(Vec3::new(3.5, 0.0, 0.0), Vec3::splat(2.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains_point(Vec3::new(0.5, -0.5, 0.9)));
        assert!(!a.contains_point(Vec3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn test_arena_walls_bound_the_floor() {
        let set = ColliderSet::arena();
        let back = set.walls()[0].bounds();
        assert!((back.min.z + ARENA_HALF).abs() < 1e-5);
        assert!((back.max.z + ARENA_HALF - WALL_THICKNESS).abs() < 1e-5);
        assert!((back.min.y + 1.0).abs() < 1e-5);
        assert!((back.max.y - 7.0).abs() < 1e-5);

        let right = set.walls()[3].bounds();
        assert!((right.max.x - ARENA_HALF).abs() < 1e-5);
    }

    #[test]
    fn test_refresh_follows_rotation() {
        let mut wall = Wall::new(Vec3::ZERO, Vec3::new(10.0, 2.0, 1.0), 0.0);
        assert!((wall.bounds().size().x - 10.0).abs() < 1e-5);

        wall.yaw = FRAC_PI_2;
        // Stale until refreshed
        assert!((wall.bounds().size().x - 10.0).abs() < 1e-5);
        wall.refresh();
        assert!((wall.bounds().size().x - 1.0).abs() < 1e-4);
        assert!((wall.bounds().size().z - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_overlapping_filters_walls() {
        let set = ColliderSet::arena();
        let near_back = Aabb::from_center_size(Vec3::new(0.0, 2.3, -28.9), Vec3::splat(1.6));
        assert_eq!(set.overlapping(&near_back).count(), 1);
        let center = Aabb::from_center_size(Vec3::new(0.0, 2.3, 0.0), Vec3::splat(1.6));
        assert_eq!(set.overlapping(&center).count(), 0);
    }
}
