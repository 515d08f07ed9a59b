/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that collects the per-frame
 * numbers shown in the overlay:
 * - FPS (frames per second) and frame time
 * - Simulation time step and tick count
 * - Prey and predator statistics of the latest tick
 */

use std::time::Duration;

use crate::statistics::Statistics;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub dt: f64,
    pub ticks: u64,
    pub prey_statistics: Statistics,
    pub predator_statistics: Statistics,
}

impl DebugInfo {
    // Overlay lines for the statistics panel
    pub fn statistics_lines(&self) -> [String; 4] {
        let stats = &self.prey_statistics;
        [
            format!("Mean dist: {:.2}", stats.mean_distance),
            format!("Dev dist: {:.2}", stats.dev_distance),
            format!("Mean speed: {:.2}", stats.mean_speed),
            format!("Dev speed: {:.2}", stats.dev_speed),
        ]
    }
}
