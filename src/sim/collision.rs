//! Collision detection and response
//!
//! Walls are an axis-aligned box; disks bounce off each other with a
//! mass-weighted elastic impulse along the line between their centers.
//! Neither kind of collision moves a body, only its velocity changes.

use glam::Vec2;

use super::state::Body;
use crate::consts::{WALL_HALF_HEIGHT, WALL_HALF_WIDTH};

/// New velocities for a colliding pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairResponse {
    pub velocity_a: Vec2,
    pub velocity_b: Vec2,
}

/// Reflect a body off the wall box.
///
/// An axis is flipped only while the body overlaps that wall band AND its
/// next position would be further from the origin on that axis, so a body
/// already heading back inside is left alone. Returns true if any axis flipped.
pub fn collide_walls(body: &mut Body) -> bool {
    let next = body.center + body.velocity;
    let mut flipped = false;

    let in_x_band = body.center.x + body.radius > WALL_HALF_WIDTH
        || body.center.x - body.radius < -WALL_HALF_WIDTH;
    if in_x_band && moving_outward(body.center.x, next.x) {
        body.velocity.x = -body.velocity.x;
        flipped = true;
    }

    let in_y_band = body.center.y + body.radius > WALL_HALF_HEIGHT
        || body.center.y - body.radius < -WALL_HALF_HEIGHT;
    if in_y_band && moving_outward(body.center.y, next.y) {
        body.velocity.y = -body.velocity.y;
        flipped = true;
    }

    flipped
}

#[inline]
fn moving_outward(current: f32, next: f32) -> bool {
    (current > 0.0 && next > current) || (current < 0.0 && next < current)
}

/// Elastic response for two disks, if they are touching and closing in.
///
/// Returns `None` when centers coincide, when the disks do not overlap, or
/// when their predicted next-frame distance is not smaller than the current
/// one (already separating). No positional correction is ever applied.
pub fn elastic_response(a: &Body, b: &Body) -> Option<PairResponse> {
    let normal = a.center - b.center;
    let dist_sq = normal.length_squared();
    if dist_sq == 0.0 {
        return None;
    }
    if dist_sq.sqrt() >= a.radius + b.radius {
        return None;
    }

    let next_a = a.center + a.velocity;
    let next_b = b.center + b.velocity;
    if next_a.distance_squared(next_b) >= dist_sq {
        return None;
    }

    let total_mass = a.mass + b.mass;
    let rel = a.velocity - b.velocity;

    let velocity_a =
        a.velocity - (2.0 * b.mass / total_mass) * (rel.dot(normal) / dist_sq) * normal;
    let velocity_b =
        b.velocity - (2.0 * a.mass / total_mass) * ((-rel).dot(-normal) / dist_sq) * (-normal);

    Some(PairResponse {
        velocity_a,
        velocity_b,
    })
}

/// Resolve the pair `(i, j)` in place: read both bodies, write both velocities.
///
/// Returns true if an impulse was applied.
pub fn collide_pair(bodies: &mut [Body], i: usize, j: usize) -> bool {
    if i == j {
        return false;
    }
    match elastic_response(&bodies[i], &bodies[j]) {
        Some(response) => {
            bodies[i].velocity = response.velocity_a;
            bodies[j].velocity = response.velocity_b;
            true
        }
        None => false,
    }
}
