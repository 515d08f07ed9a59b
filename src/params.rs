/*
 * Viewer Parameters Module
 *
 * This module defines the SimulationParams struct that holds the values the
 * viewer exposes through its control panel: population sizes, the five
 * flight coefficients and a few display toggles. It also tracks what changed
 * since the previous frame so the app only reconfigures the flock when a
 * slider actually moved.
 */

use crate::config::{FlightParameters, FlockConfig};

// Parameters for the simulation that can be adjusted via UI
pub struct SimulationParams {
    pub prey_count: usize,
    pub predator_count: usize,
    pub flight: FlightParameters,
    pub time_scale: f64,
    pub show_debug: bool,
    pub pause_simulation: bool,
    pub enable_parallel: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
struct ParamSnapshot {
    prey_count: usize,
    predator_count: usize,
    flight: FlightParameters,
    enable_parallel: bool,
}

/// What moved in the control panel since the last snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub population: bool,
    pub flight: bool,
    pub parallel: bool,
}

impl SimulationParams {
    pub fn from_config(config: &FlockConfig) -> Self {
        Self {
            prey_count: config.prey_count,
            predator_count: config.predator_count,
            flight: config.flight,
            time_scale: config.time_scale,
            show_debug: false,
            pause_simulation: false,
            enable_parallel: false,
            previous_values: None,
        }
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            prey_count: self.prey_count,
            predator_count: self.predator_count,
            flight: self.flight,
            enable_parallel: self.enable_parallel,
        });
    }

    // Compare against the last snapshot; nothing has changed without one
    pub fn detect_changes(&self) -> ParamChanges {
        match &self.previous_values {
            Some(prev) => ParamChanges {
                population: self.prey_count != prev.prey_count
                    || self.predator_count != prev.predator_count,
                flight: self.flight != prev.flight,
                parallel: self.enable_parallel != prev.enable_parallel,
            },
            None => ParamChanges::default(),
        }
    }

    // Replace repulsion and chase with the values derived from the three
    // classic coefficients
    pub fn derive_predator_prey_weights(&mut self) {
        self.flight = FlightParameters::from_coefficients(
            self.flight.separation,
            self.flight.alignment,
            self.flight.cohesion,
        );
    }

    // Get parameter ranges for UI sliders
    pub fn get_prey_count_range() -> std::ops::RangeInclusive<usize> {
        1..=1000
    }

    pub fn get_predator_count_range() -> std::ops::RangeInclusive<usize> {
        0..=50
    }

    pub fn get_coefficient_range() -> std::ops::RangeInclusive<f64> {
        0.0..=1.0
    }

    pub fn get_time_scale_range() -> std::ops::RangeInclusive<f64> {
        0.0..=60.0
    }
}
