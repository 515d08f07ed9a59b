/*
 * Application Module
 *
 * This module defines the viewer model and the per-frame update for the
 * predator/prey simulation. The flock is the single owner of agent state;
 * the model keeps a value snapshot of it for drawing, refreshed once per
 * tick, so the renderer never observes a flock mid-update.
 */

use std::sync::OnceLock;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{error, info, warn};

use crate::config::FlockConfig;
use crate::debug::DebugInfo;
use crate::flock::{BoidSnapshot, Flock};
use crate::input::{key_pressed, raw_window_event};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::ui;

// nannou builds the model from a plain fn pointer, so the configuration is
// parked here by `run`
static CONFIG: OnceLock<FlockConfig> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub snapshot: Vec<BoidSnapshot>,
}

impl Model {
    // Copy the committed flock state for the renderer and the overlay
    pub fn refresh_snapshot(&mut self) {
        self.snapshot = self.flock.snapshot();
        self.debug_info.ticks = self.flock.ticks();
        self.debug_info.prey_statistics = self.flock.statistics();
        self.debug_info.predator_statistics = self.flock.predator_statistics();
    }
}

/// Open the viewer window and run until it is closed.
pub fn run(config: FlockConfig) {
    if CONFIG.set(config).is_err() {
        warn!("Viewer already configured; keeping the first configuration");
    }
    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = CONFIG.get().cloned().unwrap_or_default();

    // The window is the toroidal domain
    let window_id = app
        .new_window()
        .title("Predator & Prey Flocking")
        .size(config.width as u32, config.height as u32)
        .view(view)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .unwrap_or_else(|err| {
            error!(?err, "Failed to create window");
            std::process::exit(1);
        });

    let window = app.window(window_id).unwrap_or_else(|| {
        error!("Window closed before the model was built");
        std::process::exit(1);
    });

    // Create the UI
    let egui = Egui::from_window(&window);

    let params = SimulationParams::from_config(&config);
    let flock = Flock::new(config).unwrap_or_else(|err| {
        error!(%err, "Rejected flock configuration");
        std::process::exit(1);
    });

    let mut model = Model {
        flock,
        params,
        egui,
        debug_info: DebugInfo::default(),
        snapshot: Vec::new(),
    };
    model.refresh_snapshot();
    model
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    // Update UI and check what changed
    let (should_reset_boids, changes) =
        ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if changes.flight {
        if let Err(err) = model.flock.set_flight_parameters(model.params.flight) {
            warn!(%err, "Ignoring flight parameters");
            model.params.flight = model.flock.flight_parameters();
        }
    }

    if changes.parallel {
        info!(enabled = model.params.enable_parallel, "Toggling parallel updates");
        model.flock.set_parallel(model.params.enable_parallel);
    }

    // Population changes regenerate the whole flock
    if changes.population {
        if let Err(err) = model
            .flock
            .resize(model.params.prey_count, model.params.predator_count)
        {
            warn!(%err, "Ignoring population change");
            model.params.prey_count = model.flock.prey_count();
            model.params.predator_count = model.flock.predator_count();
        }
    } else if should_reset_boids {
        info!("Regenerating boids");
        model.flock.generate_boids();
    }

    // Only update boids if simulation is not paused
    if !model.params.pause_simulation {
        let dt = model.params.time_scale * update.since_last.as_secs_f64();
        model.debug_info.dt = dt;
        model.flock.update_flock(dt);
    }

    model.refresh_snapshot();
}
