/*
 * Configuration Module
 *
 * Population sizes, force coefficients, speed bounds and geometry of a flock.
 * Everything here is validated once, before any agent exists, so a rejected
 * configuration never leaves a half-built simulation behind.
 */

use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::boid::Species;
use crate::error::FlockError;
use crate::point::Torus;

/// Weights of the five steering rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightParameters {
    pub separation: f64,
    pub alignment: f64,
    pub cohesion: f64,
    pub repulsion: f64,
    pub chase: f64,
}

impl Default for FlightParameters {
    fn default() -> Self {
        Self {
            separation: 0.1,
            alignment: 0.1,
            cohesion: 0.004,
            repulsion: 0.6,
            chase: 0.008,
        }
    }
}

impl FlightParameters {
    /// Derive the predator/prey weights from the three classic flocking ones.
    ///
    /// Prey flee six times harder than they separate, and predators chase
    /// twice as hard as prey cohere.
    pub fn from_coefficients(separation: f64, alignment: f64, cohesion: f64) -> Self {
        Self {
            separation,
            alignment,
            cohesion,
            repulsion: separation * 6.0,
            chase: cohesion * 2.0,
        }
    }

    pub fn validate(&self) -> Result<(), FlockError> {
        let weights = [
            self.separation,
            self.alignment,
            self.cohesion,
            self.repulsion,
            self.chase,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(FlockError::InvalidConfig(
                "flight coefficients must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Speed bounds applied after every velocity update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedLimits {
    pub prey_min: f64,
    pub prey_max: f64,
    pub predator_min: f64,
    pub predator_max: f64,
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self {
            prey_min: 7.0,
            prey_max: 12.0,
            predator_min: 5.0,
            predator_max: 8.0,
        }
    }
}

impl SpeedLimits {
    // (min, max) for one species
    pub fn bounds(&self, species: Species) -> (f64, f64) {
        match species {
            Species::Prey => (self.prey_min, self.prey_max),
            Species::Predator => (self.predator_min, self.predator_max),
        }
    }

    pub fn validate(&self) -> Result<(), FlockError> {
        for species in [Species::Prey, Species::Predator] {
            let (min, max) = self.bounds(species);
            if !(max.is_finite() && max > 0.0) {
                return Err(FlockError::InvalidConfig("max speed must be positive"));
            }
            if !(0.0..=max).contains(&min) {
                return Err(FlockError::InvalidConfig(
                    "min speed must lie between zero and max speed",
                ));
            }
        }
        Ok(())
    }
}

/// Static configuration for a flock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    /// Width of the toroidal domain in world units.
    pub width: f64,
    /// Height of the toroidal domain in world units.
    pub height: f64,
    pub prey_count: usize,
    pub predator_count: usize,
    /// Radius within which any agent can see another.
    pub sight_radius: f64,
    pub prey_separation_radius: f64,
    pub predator_separation_radius: f64,
    /// Half-angle of the prey field of view, in radians.
    pub prey_sight_angle: f64,
    /// Half-angle of the predator field of view, in radians.
    pub predator_sight_angle: f64,
    pub flight: FlightParameters,
    pub speed: SpeedLimits,
    /// Optional RNG seed for reproducible flocks.
    pub seed: Option<u64>,
    /// Multiplier turning wall-clock frame seconds into simulation `dt`.
    pub time_scale: f64,
}

impl Default for FlockConfig {
    fn default() -> Self {
        let sight_radius = 75.0;
        Self {
            width: 1200.0,
            height: 800.0,
            prey_count: 100,
            predator_count: 5,
            sight_radius,
            prey_separation_radius: 20.0,
            predator_separation_radius: sight_radius * 0.5,
            prey_sight_angle: 2.0 / 3.0 * PI,
            predator_sight_angle: FRAC_PI_2,
            flight: FlightParameters::default(),
            speed: SpeedLimits::default(),
            seed: None,
            time_scale: 20.0,
        }
    }
}

impl FlockConfig {
    pub fn torus(&self) -> Torus {
        Torus::new(self.width, self.height)
    }

    pub fn sight_angle(&self, species: Species) -> f64 {
        match species {
            Species::Prey => self.prey_sight_angle,
            Species::Predator => self.predator_sight_angle,
        }
    }

    pub fn separation_radius(&self, species: Species) -> f64 {
        match species {
            Species::Prey => self.prey_separation_radius,
            Species::Predator => self.predator_separation_radius,
        }
    }

    pub fn validate(&self) -> Result<(), FlockError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(FlockError::InvalidConfig("width must be positive"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(FlockError::InvalidConfig("height must be positive"));
        }
        if self.prey_count == 0 {
            return Err(FlockError::InvalidConfig("prey_count must be positive"));
        }
        if !(self.sight_radius.is_finite() && self.sight_radius > 0.0) {
            return Err(FlockError::InvalidConfig("sight_radius must be positive"));
        }
        for radius in [self.prey_separation_radius, self.predator_separation_radius] {
            if !(radius.is_finite() && radius >= 0.0) {
                return Err(FlockError::InvalidConfig(
                    "separation radii must be non-negative",
                ));
            }
        }
        for angle in [self.prey_sight_angle, self.predator_sight_angle] {
            if !(angle > 0.0 && angle <= PI) {
                return Err(FlockError::InvalidConfig(
                    "sight angles must lie in (0, pi]",
                ));
            }
        }
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return Err(FlockError::InvalidConfig("time_scale must be non-negative"));
        }
        self.flight.validate()?;
        self.speed.validate()
    }

    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, FlockError> {
        let config: FlockConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FlockError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
