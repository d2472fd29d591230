//! Initial population placement
//!
//! Bodies are generated one at a time by rejection sampling: a candidate is
//! drawn in full, then tested against every body accepted so far. An
//! overlapping candidate is thrown away and the same index is drawn again.

use glam::{Vec2, Vec4};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use std::f32::consts::PI;

use super::error::SimError;
use super::state::Body;
use crate::consts::*;

/// Upper bound on the up-front reservation; larger populations grow as they place
const RESERVE_LIMIT: usize = 4096;

/// Tunables for population generation
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationParams {
    /// Center sampling bounds (min, max)
    pub x_range: (f32, f32),
    pub y_range: (f32, f32),
    /// Radius bounds as multipliers of 1/sqrt(count)
    pub radius_scale: (f32, f32),
    /// Per-axis velocity bound
    pub max_speed: f32,
    /// Consecutive rejections allowed for one body
    pub max_attempts: u32,
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            x_range: (SPAWN_X_MIN, SPAWN_X_MAX),
            y_range: (SPAWN_Y_MIN, SPAWN_Y_MAX),
            radius_scale: (RADIUS_SCALE_MIN, RADIUS_SCALE_MAX),
            max_speed: MAX_SPAWN_SPEED,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl PopulationParams {
    pub fn validate(&self) -> Result<(), SimError> {
        // rand needs a finite width as well as finite bounds
        let ordered = |(lo, hi): (f32, f32)| {
            lo.is_finite() && hi.is_finite() && lo <= hi && (hi - lo).is_finite()
        };

        if !ordered(self.x_range) {
            return Err(SimError::InvalidParams("x_range must be finite and ordered"));
        }
        if !ordered(self.y_range) {
            return Err(SimError::InvalidParams("y_range must be finite and ordered"));
        }
        if !ordered(self.radius_scale) || self.radius_scale.0 <= 0.0 {
            return Err(SimError::InvalidParams(
                "radius_scale must be positive, finite and ordered",
            ));
        }
        if !(2.0 * self.max_speed).is_finite() || self.max_speed < 0.0 {
            return Err(SimError::InvalidParams("max_speed must be finite and >= 0"));
        }
        if self.max_attempts == 0 {
            return Err(SimError::InvalidParams("max_attempts must be non-zero"));
        }
        Ok(())
    }

    /// Radius bounds for a population of `count` bodies
    fn radius_bounds(&self, count: u32) -> (f32, f32) {
        let inv = 1.0 / (count as f32).sqrt();
        (self.radius_scale.0 * inv, self.radius_scale.1 * inv)
    }

    /// Necessary condition for placement: disks of the minimum radius around
    /// accepted centers are disjoint and lie inside the sampling box grown by
    /// that radius, so their total area cannot exceed the grown box.
    fn can_fit(&self, count: u32, min_radius: f32) -> bool {
        let width = f64::from(self.x_range.1 - self.x_range.0) + 2.0 * f64::from(min_radius);
        let height = f64::from(self.y_range.1 - self.y_range.0) + 2.0 * f64::from(min_radius);
        let disk = f64::from(PI) * f64::from(min_radius) * f64::from(min_radius);
        f64::from(count) * disk <= width * height
    }
}

/// Create `count` non-overlapping bodies with the default parameters.
///
/// Deterministic in `seed`.
pub fn create_population(seed: u64, count: u32) -> Result<Vec<Body>, SimError> {
    create_population_with(&PopulationParams::default(), seed, count)
}

/// Create `count` non-overlapping bodies.
///
/// Fails with [`SimError::PlacementInfeasible`] up front when `count` exceeds
/// [`MAX_POPULATION`] or the disks cannot fit in the sampling area, and later
/// when a single body is rejected `params.max_attempts` times in a row.
/// Nothing is returned in any of those cases.
pub fn create_population_with(
    params: &PopulationParams,
    seed: u64,
    count: u32,
) -> Result<Vec<Body>, SimError> {
    params.validate()?;

    let radius_bounds = params.radius_bounds(count.max(1));
    if count > MAX_POPULATION || !params.can_fit(count, radius_bounds.0) {
        return Err(SimError::PlacementInfeasible {
            index: 0,
            attempts: 0,
            placed: 0,
        });
    }

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut bodies: Vec<Body> = Vec::with_capacity((count as usize).min(RESERVE_LIMIT));
    let mut total_rejected: u64 = 0;

    while bodies.len() < count as usize {
        let mut attempts = 0;
        let body = loop {
            if attempts == params.max_attempts {
                return Err(SimError::PlacementInfeasible {
                    index: bodies.len(),
                    attempts,
                    placed: bodies.len(),
                });
            }
            attempts += 1;

            let candidate = sample_body(&mut rng, params, radius_bounds);
            if is_clear(&candidate, &bodies) {
                break candidate;
            }
        };
        total_rejected += u64::from(attempts - 1);
        bodies.push(body);
    }

    log::debug!(
        "Placed {} bodies (seed {}), {} candidates rejected",
        bodies.len(),
        seed,
        total_rejected
    );

    Ok(bodies)
}

/// Draw one candidate. Draw order is fixed so a seed always yields the same layout.
fn sample_body(rng: &mut Pcg32, params: &PopulationParams, radius: (f32, f32)) -> Body {
    let x = rng.random_range(params.x_range.0..=params.x_range.1);
    let y = rng.random_range(params.y_range.0..=params.y_range.1);
    let radius = rng.random_range(radius.0..=radius.1);
    let color = Vec4::new(
        rng.random_range(0.0..=1.0),
        rng.random_range(0.0..=1.0),
        rng.random_range(0.0..=1.0),
        rng.random_range(0.0..=1.0),
    );
    let speed = params.max_speed;
    let velocity = Vec2::new(
        rng.random_range(-speed..=speed),
        rng.random_range(-speed..=speed),
    );

    Body::new(Vec2::new(x, y), radius, velocity, color)
}

/// Candidate is accepted only if its distance to every placed center exceeds the radius sum
fn is_clear(candidate: &Body, placed: &[Body]) -> bool {
    placed
        .iter()
        .all(|other| candidate.center.distance(other.center) > candidate.radius + other.radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_no_overlap(bodies: &[Body]) {
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                assert!(
                    a.center.distance(b.center) > a.radius + b.radius,
                    "bodies overlap: {:?} / {:?}",
                    a.center,
                    b.center
                );
            }
        }
    }

    #[test]
    fn test_population_size_and_ranges() {
        let bodies = create_population(7, 25).unwrap();
        assert_eq!(bodies.len(), 25);

        let (r_min, r_max) = (0.3 / 5.0, 1.0 / 5.0);
        for body in &bodies {
            assert!(body.radius >= r_min - 1e-6 && body.radius <= r_max + 1e-6);
            assert!(body.center.x >= -1.6 && body.center.x <= 1.6);
            assert!(body.center.y >= -0.9 && body.center.y <= 0.9);
            assert!(body.velocity.x.abs() <= 0.002 && body.velocity.y.abs() <= 0.002);
            assert!(body.color.min_element() >= 0.0 && body.color.max_element() <= 1.0);
            assert_eq!(body.mass, body.radius * body.radius);
            assert_eq!(body.last_update_time, 0.0);
        }
        assert_no_overlap(&bodies);
    }

    #[test]
    fn test_determinism() {
        let first = create_population(42, 10).unwrap();
        let second = create_population(42, 10).unwrap();
        assert_eq!(first.len(), 10);
        let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(bits(&a.center.to_array()), bits(&b.center.to_array()));
            assert_eq!(bits(&a.velocity.to_array()), bits(&b.velocity.to_array()));
            assert_eq!(a.radius.to_bits(), b.radius.to_bits());
            assert_eq!(bits(&a.color.to_array()), bits(&b.color.to_array()));
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = create_population(1, 10).unwrap();
        let b = create_population(2, 10).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_population() {
        assert!(create_population(3, 0).unwrap().is_empty());
    }

    #[test]
    fn test_single_body() {
        let bodies = create_population(3, 1).unwrap();
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].radius >= 0.3 && bodies[0].radius <= 1.0);
    }

    #[test]
    fn test_placement_infeasible() {
        // Enough area in total, but any two centers in the box are closer than
        // the smallest radius sum, so the second body never fits
        let params = PopulationParams {
            x_range: (-0.01, 0.01),
            y_range: (-0.01, 0.01),
            radius_scale: (0.03, 0.04),
            max_attempts: 50,
            ..Default::default()
        };
        let err = create_population_with(&params, 9, 2).unwrap_err();
        assert_eq!(
            err,
            SimError::PlacementInfeasible {
                index: 1,
                attempts: 50,
                placed: 1,
            }
        );
    }

    #[test]
    fn test_area_overflow_rejected_up_front() {
        let params = PopulationParams {
            x_range: (-0.01, 0.01),
            y_range: (-0.01, 0.01),
            ..Default::default()
        };
        let err = create_population_with(&params, 9, 1000).unwrap_err();
        assert_eq!(
            err,
            SimError::PlacementInfeasible {
                index: 0,
                attempts: 0,
                placed: 0,
            }
        );
    }

    #[test]
    fn test_huge_count_rejected_without_allocating() {
        let expected = SimError::PlacementInfeasible {
            index: 0,
            attempts: 0,
            placed: 0,
        };
        assert_eq!(create_population(1, u32::MAX).unwrap_err(), expected);
        assert_eq!(create_population(1, MAX_POPULATION + 1).unwrap_err(), expected);
    }

    #[test]
    fn test_invalid_params() {
        let params = PopulationParams {
            radius_scale: (0.0, 1.0),
            ..Default::default()
        };
        assert!(matches!(
            create_population_with(&params, 1, 5),
            Err(SimError::InvalidParams(_))
        ));

        let params = PopulationParams {
            x_range: (1.0, -1.0),
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(SimError::InvalidParams(_))));

        let params = PopulationParams {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(SimError::InvalidParams(_))));

        // Finite bounds whose width overflows f32
        let wide = [
            PopulationParams {
                x_range: (-3e38, 3e38),
                ..Default::default()
            },
            PopulationParams {
                y_range: (-3e38, 3e38),
                ..Default::default()
            },
            PopulationParams {
                max_speed: 3e38,
                ..Default::default()
            },
        ];
        for params in &wide {
            assert!(matches!(params.validate(), Err(SimError::InvalidParams(_))));
            assert!(matches!(
                create_population_with(params, 1, 3),
                Err(SimError::InvalidParams(_))
            ));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_no_initial_overlap(seed in any::<u64>(), count in 1u32..40) {
            let bodies = create_population(seed, count).unwrap();
            prop_assert_eq!(bodies.len(), count as usize);
            for (i, a) in bodies.iter().enumerate() {
                prop_assert_eq!(a.mass, a.radius * a.radius);
                for b in &bodies[i + 1..] {
                    prop_assert!(a.center.distance(b.center) > a.radius + b.radius);
                }
            }
        }
    }
}
