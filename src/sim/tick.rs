//! Per-frame simulation step
//!
//! Bodies are processed strictly in population order. For each body the
//! collision phase runs first against the current positions (earlier bodies
//! have already moved this frame), then the body integrates and rebuilds its
//! transform. Pair impulses write both bodies immediately, so later bodies in
//! the same pass see the updated velocities.

use super::collision::{collide_pair, collide_walls};
use super::state::Body;
use crate::consts::REFERENCE_FPS;

/// Elapsed time between two timestamps, in reference frames.
///
/// Never negative; non-finite input yields 0.
#[inline]
pub fn frame_interval(last_update_time: f32, current_time: f32) -> f32 {
    let interval = (current_time - last_update_time) * REFERENCE_FPS;
    if interval.is_finite() { interval.max(0.0) } else { 0.0 }
}

/// Advance every body to `current_time`.
///
/// `current_time` is expected to be non-decreasing between calls. A repeated
/// or earlier timestamp moves nothing. A non-finite timestamp moves nothing
/// and is not recorded.
pub fn step(bodies: &mut [Body], current_time: f32) {
    if !current_time.is_finite() {
        log::warn!("Non-finite step time {current_time}, holding positions");
    }

    let mut wall_bounces = 0usize;
    let mut impulses = 0usize;
    let mut rewound = 0usize;

    for i in 0..bodies.len() {
        if collide_walls(&mut bodies[i]) {
            wall_bounces += 1;
        }
        for j in 0..bodies.len() {
            if collide_pair(bodies, i, j) {
                impulses += 1;
            }
        }

        let body = &mut bodies[i];
        if integrate(body, current_time) {
            rewound += 1;
        }
        body.rebuild_transform();
    }

    if rewound > 0 {
        log::warn!(
            "Time went backwards at t={current_time} for {rewound} bodies, holding position"
        );
    }
    log::trace!("Step t={current_time}: {wall_bounces} wall bounces, {impulses} impulses");
}

/// Move a body by `velocity / interval`.
///
/// Motion shrinks as the frame interval grows. A zero interval is a no-op.
/// Returns true if `current_time` was earlier than the last update.
fn integrate(body: &mut Body, current_time: f32) -> bool {
    let interval = frame_interval(body.last_update_time, current_time);
    let rewound = current_time < body.last_update_time;
    if current_time.is_finite() {
        body.last_update_time = current_time;
    }

    if interval > 0.0 {
        body.center += body.velocity / interval;
    }

    rewound
}
