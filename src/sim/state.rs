//! Body state and population diagnostics
//!
//! A population is a plain `Vec<Body>`; its order is the iteration order of
//! every step and must never be shuffled.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::consts::{WALL_HALF_HEIGHT, WALL_HALF_WIDTH};

/// A simulated disk
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub center: Vec2,
    /// Fixed after creation, strictly positive
    pub radius: f32,
    /// Displacement per reference frame
    pub velocity: Vec2,
    /// Always `radius * radius`
    pub mass: f32,
    /// RGBA in [0, 1], cosmetic only
    pub color: Vec4,
    /// Timestamp (seconds) of the last integration
    pub last_update_time: f32,
    /// Cached model matrix for drawing, rebuilt every step
    pub transform: Mat4,
}

impl Body {
    /// Create a body at rest in time (`last_update_time = 0`).
    ///
    /// Mass is derived here and never recomputed.
    pub fn new(center: Vec2, radius: f32, velocity: Vec2, color: Vec4) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        let mut body = Self {
            center,
            radius,
            velocity,
            mass: radius * radius,
            color,
            last_update_time: 0.0,
            transform: Mat4::IDENTITY,
        };
        body.rebuild_transform();
        body
    }

    /// translate(center) * rotate(identity) * scale(radius)
    pub fn rebuild_transform(&mut self) {
        let translate = Mat4::from_translation(self.center.extend(0.0));
        let rotate = Mat4::IDENTITY;
        let scale = Mat4::from_scale(Vec3::new(self.radius, self.radius, 1.0));
        self.transform = translate * rotate * scale;
    }

    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// True if the disk pokes out of the wall box on either axis
    pub fn crosses_wall(&self) -> bool {
        self.center.x + self.radius > WALL_HALF_WIDTH
            || self.center.x - self.radius < -WALL_HALF_WIDTH
            || self.center.y + self.radius > WALL_HALF_HEIGHT
            || self.center.y - self.radius < -WALL_HALF_HEIGHT
    }

    /// Strict disk overlap (touching is not overlapping)
    pub fn overlaps(&self, other: &Body) -> bool {
        self.center.distance(other.center) < self.radius + other.radius
    }
}

/// Aggregate snapshot of a population
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PopulationStats {
    pub count: usize,
    /// Sum of m * v
    pub momentum: Vec2,
    /// Sum of m * |v|^2 / 2
    pub kinetic_energy: f32,
    /// Unordered pairs currently interpenetrating
    pub overlapping_pairs: usize,
    /// Bodies whose disk crosses the wall box
    pub touching_walls: usize,
}

impl PopulationStats {
    pub fn measure(bodies: &[Body]) -> Self {
        let mut stats = Self {
            count: bodies.len(),
            ..Default::default()
        };

        for (i, body) in bodies.iter().enumerate() {
            stats.momentum += body.momentum();
            stats.kinetic_energy += body.kinetic_energy();
            if body.crosses_wall() {
                stats.touching_walls += 1;
            }
            stats.overlapping_pairs += bodies[i + 1..]
                .iter()
                .filter(|other| body.overlaps(other))
                .count();
        }

        stats
    }
}
