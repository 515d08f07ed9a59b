/*
 * Predator & Prey Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the simulation. The core
 * (point, boid, flock, statistics, config, error) knows nothing about
 * graphics; the remaining modules are the nannou viewer that configures the
 * flock and draws a snapshot of it every frame.
 */

// Re-export key components for easier access
pub use boid::{clamp_speed, Boid, Predator, Prey, Species};
pub use config::{FlightParameters, FlockConfig, SpeedLimits};
pub use error::FlockError;
pub use flock::{BoidSnapshot, Flock};
pub use point::{Point, Torus};
pub use statistics::Statistics;

// Define modules
pub mod point;
pub mod boid;
pub mod flock;
pub mod statistics;
pub mod config;
pub mod error;
pub mod params;
pub mod debug;
pub mod app;
pub mod ui;
pub mod renderer;
pub mod input;

// Constants
pub const PREY_SIZE: f32 = 5.0;
pub const PREDATOR_SIZE: f32 = 7.0;
