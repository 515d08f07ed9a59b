/*
 * Flock Module
 *
 * The simulation engine. A Flock owns both species and advances them one
 * tick at a time:
 * - neighbor queries scan the whole target collection (sight radius plus
 *   field of view, measured on the torus)
 * - every agent's next state is computed from the frozen pre-tick state
 * - all results are committed together once every agent has been computed
 *
 * The compute phase may run on the rayon pool; the commit phase is always
 * serial, so both paths produce identical flocks.
 */

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::boid::{clamp_speed, Boid, Predator, Prey, Species};
use crate::config::{FlightParameters, FlockConfig};
use crate::error::FlockError;
use crate::point::{Point, Torus};
use crate::statistics::Statistics;

/// Read-only copy of one agent handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoidSnapshot {
    pub position: Point,
    pub velocity: Point,
    pub species: Species,
}

pub struct Flock {
    config: FlockConfig,
    torus: Torus,
    prey: Vec<Prey>,
    predators: Vec<Predator>,
    rng: SmallRng,
    parallel: bool,
    ticks: u64,
}

impl Flock {
    /// Validate `config` and populate both species at random.
    pub fn new(config: FlockConfig) -> Result<Self, FlockError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        info!(
            prey = config.prey_count,
            predators = config.predator_count,
            seed,
            "Creating flock"
        );

        let mut flock = Self {
            torus: config.torus(),
            prey: Vec::with_capacity(config.prey_count),
            predators: Vec::with_capacity(config.predator_count),
            rng: SmallRng::seed_from_u64(seed),
            parallel: false,
            ticks: 0,
            config,
        };
        flock.generate_boids();
        Ok(flock)
    }

    /// Build a flock around explicitly placed agents.
    ///
    /// The population counts of `config` are replaced by the lengths of the
    /// supplied collections. Every agent must lie inside the domain and
    /// move with a finite velocity.
    pub fn from_boids(
        mut config: FlockConfig,
        prey: Vec<Prey>,
        predators: Vec<Predator>,
    ) -> Result<Self, FlockError> {
        config.prey_count = prey.len();
        config.predator_count = predators.len();
        config.validate()?;

        let torus = config.torus();
        let outside = prey
            .iter()
            .map(Boid::position)
            .chain(predators.iter().map(Boid::position))
            .any(|p| !torus.contains(p));
        if outside {
            return Err(FlockError::InvalidConfig(
                "agent positions must lie inside the domain",
            ));
        }
        let unbounded = prey
            .iter()
            .map(Boid::velocity)
            .chain(predators.iter().map(Boid::velocity))
            .any(|v| !v.magnitude().is_finite());
        if unbounded {
            return Err(FlockError::InvalidConfig(
                "agent velocities must be finite",
            ));
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            torus,
            prey,
            predators,
            rng: SmallRng::seed_from_u64(seed),
            parallel: false,
            ticks: 0,
            config,
        })
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    pub fn prey(&self) -> &[Prey] {
        &self.prey
    }

    pub fn predators(&self) -> &[Predator] {
        &self.predators
    }

    pub fn prey_count(&self) -> usize {
        self.prey.len()
    }

    pub fn predator_count(&self) -> usize {
        self.predators.len()
    }

    pub fn flock_size(&self) -> usize {
        self.prey.len() + self.predators.len()
    }

    // Ticks completed since the last (re)generation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // [sight radius, prey separation radius, predator separation radius]
    pub fn distance_parameters(&self) -> [f64; 3] {
        [
            self.config.sight_radius,
            self.config.prey_separation_radius,
            self.config.predator_separation_radius,
        ]
    }

    pub fn flight_parameters(&self) -> FlightParameters {
        self.config.flight
    }

    pub fn set_flight_parameters(&mut self, flight: FlightParameters) -> Result<(), FlockError> {
        flight.validate()?;
        info!(?flight, "Updating flight parameters");
        self.config.flight = flight;
        Ok(())
    }

    // Run the compute phase of each tick on the rayon pool
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Replace every agent with a freshly randomized one.
    ///
    /// Positions are uniform in the domain, headings uniform in `[0, 2π)` and
    /// speeds uniform within each species' bounds.
    pub fn generate_boids(&mut self) {
        let (width, height) = (self.torus.width, self.torus.height);
        let limits = self.config.speed;
        let rng = &mut self.rng;

        let mut random_state = |species: Species| {
            let (min_speed, max_speed) = limits.bounds(species);
            let position = Point::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
            let heading = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(min_speed..=max_speed);
            // from_polar can round a hair past either bound
            let velocity = clamp_speed(min_speed, max_speed, Point::from_polar(speed, heading));
            (position, velocity)
        };

        self.prey = (0..self.config.prey_count)
            .map(|_| {
                let (position, velocity) = random_state(Species::Prey);
                Prey::new(position, velocity)
            })
            .collect();
        self.predators = (0..self.config.predator_count)
            .map(|_| {
                let (position, velocity) = random_state(Species::Predator);
                Predator::new(position, velocity)
            })
            .collect();
        self.ticks = 0;

        debug!(
            prey = self.prey.len(),
            predators = self.predators.len(),
            "Generated boids"
        );
    }

    /// Change both population sizes, then regenerate every agent.
    pub fn resize(&mut self, prey_count: usize, predator_count: usize) -> Result<(), FlockError> {
        if prey_count == 0 {
            return Err(FlockError::InvalidConfig("prey_count must be positive"));
        }
        info!(prey_count, predator_count, "Resizing flock");
        self.config.prey_count = prey_count;
        self.config.predator_count = predator_count;
        self.generate_boids();
        Ok(())
    }

    /// Prey visible to agent `i` of `species`.
    ///
    /// A prey never sees itself; another prey at the same position is
    /// still a neighbor.
    pub fn near_prey(&self, i: usize, species: Species) -> Result<Vec<&Prey>, FlockError> {
        self.check_index(i, species)?;
        Ok(self.visible_prey(i, species))
    }

    /// Predators visible to agent `i` of `species`.
    pub fn near_predators(&self, i: usize, species: Species) -> Result<Vec<&Predator>, FlockError> {
        self.check_index(i, species)?;
        Ok(self.visible_predators(i, species))
    }

    /// Next position and velocity of agent `i`, without touching the flock.
    pub fn update_boid(&self, i: usize, species: Species, dt: f64) -> Result<(Point, Point), FlockError> {
        self.check_index(i, species)?;
        Ok(self.next_state(i, species, dt))
    }

    /// Advance every agent by one tick of length `dt`.
    pub fn update_flock(&mut self, dt: f64) {
        assert!(dt.is_finite() && dt >= 0.0, "time step must be finite and non-negative, got {dt}");

        // Compute phase: every result is derived from the pre-tick state
        let prey_next = self.compute_phase(self.prey.len(), Species::Prey, dt);
        let predator_next = self.compute_phase(self.predators.len(), Species::Predator, dt);

        // Commit phase
        for (boid, (position, velocity)) in self.prey.iter_mut().zip(prey_next) {
            boid.set_state(position, velocity);
        }
        for (boid, (position, velocity)) in self.predators.iter_mut().zip(predator_next) {
            boid.set_state(position, velocity);
        }

        self.ticks += 1;
        debug!(tick = self.ticks, dt, "Flock updated");
    }

    /// Distance and speed summary of the prey.
    pub fn statistics(&self) -> Statistics {
        Statistics::from_boids(&self.torus, &self.prey)
    }

    pub fn predator_statistics(&self) -> Statistics {
        Statistics::from_boids(&self.torus, &self.predators)
    }

    // Value copies of every agent, prey first
    pub fn snapshot(&self) -> Vec<BoidSnapshot> {
        let prey = self.prey.iter().map(|boid| BoidSnapshot {
            position: boid.position(),
            velocity: boid.velocity(),
            species: Species::Prey,
        });
        let predators = self.predators.iter().map(|boid| BoidSnapshot {
            position: boid.position(),
            velocity: boid.velocity(),
            species: Species::Predator,
        });
        prey.chain(predators).collect()
    }

    fn check_index(&self, index: usize, species: Species) -> Result<(), FlockError> {
        let len = match species {
            Species::Prey => self.prey.len(),
            Species::Predator => self.predators.len(),
        };
        if index >= len {
            return Err(FlockError::IndexOutOfRange { species, index, len });
        }
        Ok(())
    }

    fn compute_phase(&self, len: usize, species: Species, dt: f64) -> Vec<(Point, Point)> {
        if self.parallel {
            (0..len)
                .into_par_iter()
                .map(|i| self.next_state(i, species, dt))
                .collect()
        } else {
            (0..len).map(|i| self.next_state(i, species, dt)).collect()
        }
    }

    fn visible_prey(&self, i: usize, species: Species) -> Vec<&Prey> {
        match species {
            Species::Prey => self.visible(&self.prey[i], Some(i), species, &self.prey),
            Species::Predator => self.visible(&self.predators[i], None, species, &self.prey),
        }
    }

    fn visible_predators(&self, i: usize, species: Species) -> Vec<&Predator> {
        match species {
            Species::Prey => self.visible(&self.prey[i], None, species, &self.predators),
            Species::Predator => self.visible(&self.predators[i], Some(i), species, &self.predators),
        }
    }

    // Targets within sight radius and inside the observer's field of view.
    // `skip` is the observer's own index when scanning its own species.
    fn visible<'a, O: Boid, T: Boid>(
        &self,
        observer: &O,
        skip: Option<usize>,
        species: Species,
        targets: &'a [T],
    ) -> Vec<&'a T> {
        let origin = observer.position();
        let sight_radius = self.config.sight_radius;
        let half_angle = self.config.sight_angle(species);

        targets
            .iter()
            .enumerate()
            .filter(|&(j, _)| Some(j) != skip)
            .map(|(_, other)| other)
            .filter(|other| self.torus.toroidal_distance(origin, other.position()) < sight_radius)
            .filter(|other| observer.bearing_to(&self.torus, *other).abs() < half_angle)
            .collect()
    }

    fn next_state(&self, i: usize, species: Species, dt: f64) -> (Point, Point) {
        let flight = &self.config.flight;
        let torus = &self.torus;
        let near_prey = self.visible_prey(i, species);
        let near_predators = self.visible_predators(i, species);
        let separation_radius = self.config.separation_radius(species);

        let (position, velocity, steering) = match species {
            Species::Prey => {
                let me = &self.prey[i];
                let steering = me.repulsion(torus, flight.repulsion, &near_predators)
                    + me.separation(torus, flight.separation, separation_radius, &near_prey)
                    + me.alignment(flight.alignment, &near_prey)
                    + me.cohesion(torus, flight.cohesion, &near_prey);
                (me.position(), me.velocity(), steering)
            }
            Species::Predator => {
                let me = &self.predators[i];
                let steering = me.separation(torus, flight.separation, separation_radius, &near_predators)
                    + me.chase(torus, flight.chase, &near_prey);
                (me.position(), me.velocity(), steering)
            }
        };

        let (min_speed, max_speed) = self.config.speed.bounds(species);
        let velocity = clamp_speed(min_speed, max_speed, velocity + steering);
        let position = torus.wrap(position + velocity * dt);
        (position, velocity)
    }
}
