//! # Collision Boxes
//!
//! Axis-aligned bounding boxes used for static obstacle collision.
//!
//! Obstacles are bounded once when they are placed in the world: a local-space
//! box is pushed through the placement matrix and re-bounded from its eight
//! transformed corners. The player is tested each frame as a fixed footprint
//! box centred on the candidate position.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use colony_explorer::gfx::collision::Aabb;
//!
//! let wall = Aabb::new(Vector3::new(-1.0, 0.0, -1.0), Vector3::new(1.0, 3.0, 1.0));
//! let player = Aabb::from_center_size(Vector3::new(0.5, 1.0, 0.5), Vector3::new(2.0, 5.0, 2.0));
//! assert!(player.intersects(&wall));
//! ```

use cgmath::{Matrix4, Vector3, Vector4, Zero};

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create an AABB centred on `center` with full extents `size`
    pub fn from_center_size(center: Vector3<f32>, size: Vector3<f32>) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Create AABB from a set of points
    pub fn from_points(points: &[Vector3<f32>]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = *first;
        let mut max = *first;

        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Self::new(min, max)
    }

    /// Centre point of the box
    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Full extents of the box
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Overlap test, inclusive of touching faces
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Apply a transformation matrix to the AABB
    ///
    /// The result bounds all eight transformed corners, so a rotated box grows
    /// rather than rotating.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let transformed: Vec<Vector3<f32>> = corners
            .iter()
            .map(|corner| {
                let p = matrix * Vector4::new(corner.x, corner.y, corner.z, 1.0);
                Vector3::new(p.x / p.w, p.y / p.w, p.z / p.w)
            })
            .collect();

        Self::from_points(&transformed)
    }
}

/// Static collidable geometry
///
/// The bounding box is fixed at placement time and never updated.
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// What was placed here, for logs and debugging
    pub label: String,
    bounds: Aabb,
}

impl Obstacle {
    pub fn new(label: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            label: label.into(),
            bounds,
        }
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

/// Returns true if `probe` overlaps any obstacle
pub fn overlaps_any(probe: &Aabb, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| probe.intersects(o.bounds()))
}
