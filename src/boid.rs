/*
 * Boid Module
 *
 * This module defines the two agent species and the behavior they share.
 * Each agent is only a position and a velocity; the steering rules are
 * pure functions of the agent and the neighbor lists handed to it:
 * 1. Separation (both species): steer away from agents inside a radius
 * 2. Alignment (prey): match the average heading of nearby prey
 * 3. Cohesion (prey): steer towards the center of nearby prey
 * 4. Repulsion (prey): flee every predator in sight
 * 5. Chase (predators): steer towards the center of nearby prey
 */

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::point::{Point, Torus};

/// Selects one of the two agent collections of a flock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Prey,
    Predator,
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Prey => f.write_str("prey"),
            Species::Predator => f.write_str("predator"),
        }
    }
}

/// Capabilities shared by prey and predators.
pub trait Boid {
    fn new(position: Point, velocity: Point) -> Self
    where
        Self: Sized;

    fn position(&self) -> Point;

    fn velocity(&self) -> Point;

    /// Signed angle in `(-π, π]` from this agent's heading to `other`.
    ///
    /// Positive when `other` lies counter-clockwise of the heading. Zero when
    /// the agent is standing still or `other` shares its position.
    fn bearing_to<B: Boid>(&self, torus: &Torus, other: &B) -> f64 {
        let heading = self.velocity();
        let offset = torus.relative_position(self.position(), other.position());

        if heading.is_zero() || offset.is_zero() {
            return 0.0;
        }

        let angle = heading.cross(offset).atan2(heading.dot(offset));
        // atan2 reports a target straight behind as -π when the cross product is -0.0
        if angle <= -PI {
            PI
        } else {
            angle
        }
    }

    /// Push away from every neighbor closer than `radius`.
    fn separation<B: Boid>(&self, torus: &Torus, strength: f64, radius: f64, neighbors: &[&B]) -> Point {
        let position = self.position();

        let crowding: Point = neighbors
            .iter()
            .map(|other| torus.relative_position(position, other.position()))
            .filter(|offset| offset.magnitude() < radius)
            .sum();

        crowding * -strength
    }
}

/// Rescale `velocity` so its length lies within `[min_speed, max_speed]`.
///
/// A zero velocity has no direction to keep, so it becomes `min_speed`
/// along the x axis. The rescaled length never lands outside the bound it
/// was scaled to, even by rounding. With `min_speed == max_speed` the length
/// may sit one ulp under `min_speed` when no vector of exactly that length
/// exists in that direction.
pub fn clamp_speed(min_speed: f64, max_speed: f64, velocity: Point) -> Point {
    assert!(
        max_speed > 0.0 && (0.0..=max_speed).contains(&min_speed),
        "invalid speed bounds: min {min_speed}, max {max_speed}"
    );
    assert!(
        velocity.x.is_finite() && velocity.y.is_finite(),
        "cannot clamp a non-finite velocity: {velocity:?}"
    );

    let speed = velocity.magnitude();
    if speed > max_speed {
        let mut scaled = velocity * (max_speed / speed);
        while scaled.magnitude() > max_speed {
            scaled = scaled * (1.0 - f64::EPSILON);
        }
        scaled
    } else if speed < min_speed {
        if speed == 0.0 {
            return Point::new(min_speed, 0.0);
        }
        // Normalize first: min_speed / speed overflows for subnormal speeds
        let mut scaled = (velocity / speed) * min_speed;
        while scaled.magnitude() < min_speed {
            scaled = scaled * (1.0 + f64::EPSILON);
        }
        scaled
    } else {
        velocity
    }
}

// Mean of the displacements from `origin` to each neighbor
fn mean_offset<B: Boid>(torus: &Torus, origin: Point, neighbors: &[&B]) -> Option<Point> {
    if neighbors.is_empty() {
        return None;
    }
    let total: Point = neighbors
        .iter()
        .map(|other| torus.relative_position(origin, other.position()))
        .sum();
    Some(total / neighbors.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prey {
    position: Point,
    velocity: Point,
}

impl Boid for Prey {
    fn new(position: Point, velocity: Point) -> Self {
        Self { position, velocity }
    }

    fn position(&self) -> Point {
        self.position
    }

    fn velocity(&self) -> Point {
        self.velocity
    }
}

impl Prey {
    // Steer towards the average velocity of nearby prey
    pub fn alignment(&self, coeff: f64, near_prey: &[&Prey]) -> Point {
        if near_prey.is_empty() {
            return Point::ZERO;
        }
        let total: Point = near_prey.iter().map(|other| other.velocity).sum();
        (total / near_prey.len() as f64 - self.velocity) * coeff
    }

    // Steer towards the center of mass of nearby prey
    pub fn cohesion(&self, torus: &Torus, coeff: f64, near_prey: &[&Prey]) -> Point {
        mean_offset(torus, self.position, near_prey).map_or(Point::ZERO, |center| center * coeff)
    }

    /// Flee every predator in the list.
    ///
    /// There is no distance threshold here: callers pass only the predators
    /// this prey can see.
    pub fn repulsion(&self, torus: &Torus, coeff: f64, near_predators: &[&Predator]) -> Point {
        let threat: Point = near_predators
            .iter()
            .map(|predator| torus.relative_position(self.position, predator.position))
            .sum();
        threat * -coeff
    }

    pub(crate) fn set_state(&mut self, position: Point, velocity: Point) {
        self.position = position;
        self.velocity = velocity;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Predator {
    position: Point,
    velocity: Point,
}

impl Boid for Predator {
    fn new(position: Point, velocity: Point) -> Self {
        Self { position, velocity }
    }

    fn position(&self) -> Point {
        self.position
    }

    fn velocity(&self) -> Point {
        self.velocity
    }
}

impl Predator {
    // Steer towards the center of the prey in sight
    pub fn chase(&self, torus: &Torus, coeff: f64, near_prey: &[&Prey]) -> Point {
        mean_offset(torus, self.position, near_prey).map_or(Point::ZERO, |center| center * coeff)
    }

    pub(crate) fn set_state(&mut self, position: Point, velocity: Point) {
        self.position = position;
        self.velocity = velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::FRAC_PI_2;

    const TORUS: Torus = Torus::new(100.0, 100.0);

    fn prey(x: f64, y: f64, vx: f64, vy: f64) -> Prey {
        Prey::new(Point::new(x, y), Point::new(vx, vy))
    }

    fn predator(x: f64, y: f64, vx: f64, vy: f64) -> Predator {
        Predator::new(Point::new(x, y), Point::new(vx, vy))
    }

    #[test]
    fn bearing_is_signed_counter_clockwise() {
        let me = prey(50.0, 50.0, 1.0, 0.0);

        assert_relative_eq!(me.bearing_to(&TORUS, &prey(60.0, 50.0, 0.0, 0.0)), 0.0);
        assert_relative_eq!(me.bearing_to(&TORUS, &prey(50.0, 60.0, 0.0, 0.0)), FRAC_PI_2);
        assert_relative_eq!(me.bearing_to(&TORUS, &prey(50.0, 40.0, 0.0, 0.0)), -FRAC_PI_2);
        assert_relative_eq!(me.bearing_to(&TORUS, &prey(40.0, 50.0, 0.0, 0.0)), PI);
    }

    #[test]
    fn bearing_uses_wrapped_offset() {
        // The neighbor at x = 95 is just behind an agent at x = 2 heading right
        let me = prey(2.0, 50.0, 1.0, 0.0);
        assert_relative_eq!(me.bearing_to(&TORUS, &predator(95.0, 50.0, 0.0, 0.0)), PI);
    }

    #[test]
    fn bearing_degenerate_cases_are_zero() {
        let still = prey(10.0, 10.0, 0.0, 0.0);
        let moving = prey(10.0, 10.0, 3.0, 4.0);
        let other = prey(20.0, 30.0, 1.0, 1.0);

        assert_eq!(still.bearing_to(&TORUS, &other), 0.0);
        assert_eq!(moving.bearing_to(&TORUS, &prey(10.0, 10.0, 0.0, 1.0)), 0.0);
    }

    #[test]
    fn empty_neighbor_lists_give_zero_forces() {
        let me = prey(10.0, 10.0, 1.0, 2.0);
        let hunter = predator(10.0, 10.0, 1.0, 2.0);

        assert_eq!(me.alignment(1.0, &[]), Point::ZERO);
        assert_eq!(me.cohesion(&TORUS, 1.0, &[]), Point::ZERO);
        assert_eq!(me.repulsion(&TORUS, 1.0, &[]), Point::ZERO);
        assert_eq!(me.separation::<Prey>(&TORUS, 1.0, 20.0, &[]), Point::ZERO);
        assert_eq!(hunter.chase(&TORUS, 1.0, &[]), Point::ZERO);
        assert_eq!(hunter.separation::<Predator>(&TORUS, 1.0, 20.0, &[]), Point::ZERO);
    }

    #[test]
    fn separation_ignores_neighbors_outside_radius() {
        let me = prey(0.0, 0.0, 1.0, 0.0);
        let close = prey(10.0, 0.0, -1.0, 0.0);
        let far = prey(0.0, 30.0, 0.0, 0.0);

        let force = me.separation(&TORUS, 0.5, 20.0, &[&close, &far]);
        assert_eq!(force, Point::new(-5.0, 0.0));
    }

    #[test]
    fn separation_points_away_across_the_seam() {
        let me = prey(1.0, 50.0, 0.0, 1.0);
        let across = prey(97.0, 50.0, 0.0, 1.0);

        let force = me.separation(&TORUS, 1.0, 20.0, &[&across]);
        assert_relative_eq!(force.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(force.y, 0.0);
    }

    #[test]
    fn alignment_steers_towards_mean_velocity() {
        let me = prey(0.0, 0.0, 1.0, 0.0);
        let a = prey(5.0, 0.0, 0.0, 2.0);
        let b = prey(0.0, 5.0, 2.0, 2.0);

        assert_eq!(me.alignment(0.5, &[&a, &b]), Point::new(0.0, 1.0));
    }

    #[test]
    fn cohesion_and_chase_target_wrapped_center() {
        let me = prey(98.0, 50.0, 1.0, 0.0);
        let a = prey(2.0, 50.0, 0.0, 0.0);
        let b = prey(6.0, 54.0, 0.0, 0.0);

        let pull = me.cohesion(&TORUS, 0.5, &[&a, &b]);
        assert_relative_eq!(pull.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(pull.y, 1.0, epsilon = 1e-12);

        let hunter = predator(98.0, 50.0, 1.0, 0.0);
        assert_eq!(hunter.chase(&TORUS, 0.5, &[&a, &b]), pull);
    }

    #[test]
    fn repulsion_sums_every_predator() {
        let me = prey(50.0, 50.0, 1.0, 0.0);
        let p1 = predator(60.0, 50.0, 0.0, 0.0);
        let p2 = predator(50.0, 90.0, 0.0, 0.0);

        assert_eq!(me.repulsion(&TORUS, 2.0, &[&p1, &p2]), Point::new(-20.0, -80.0));
    }

    #[test]
    fn clamp_speed_respects_bounds() {
        let cases = [
            Point::new(30.0, 40.0),
            Point::new(0.3, 0.4),
            Point::new(3.0, 4.0),
            Point::ZERO,
            Point::new(-1e-9, 0.0),
            Point::new(1e-320, -1e-320),
        ];
        for v in cases {
            let clamped = clamp_speed(2.0, 10.0, v);
            assert!(clamped.magnitude() >= 2.0, "{v:?} -> {clamped:?}");
            assert!(clamped.magnitude() <= 10.0, "{v:?} -> {clamped:?}");
        }
        assert_eq!(clamp_speed(2.0, 10.0, Point::ZERO), Point::new(2.0, 0.0));
        assert_eq!(clamp_speed(2.0, 10.0, Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
        assert_eq!(clamp_speed(0.0, 1.0, Point::ZERO), Point::ZERO);
    }

    #[test]
    fn clamp_speed_stays_inside_bounds_after_rounding() {
        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..200_000 {
            let v = Point::new(rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0));
            let speed = clamp_speed(7.0, 12.0, v).magnitude();
            assert!((7.0..=12.0).contains(&speed), "{v:?} -> {speed}");
        }
    }

    #[test]
    #[should_panic(expected = "non-finite velocity")]
    fn clamp_speed_rejects_nan_velocity() {
        clamp_speed(1.0, 2.0, Point::new(f64::NAN, 0.0));
    }

    #[test]
    #[should_panic(expected = "invalid speed bounds")]
    fn clamp_speed_rejects_inverted_bounds() {
        clamp_speed(5.0, 1.0, Point::new(1.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "invalid speed bounds")]
    fn clamp_speed_rejects_zero_max() {
        clamp_speed(0.0, 0.0, Point::new(1.0, 0.0));
    }
}
