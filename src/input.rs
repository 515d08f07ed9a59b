/*
 * Input Module
 *
 * This module handles keyboard and raw window events for the viewer.
 *
 * Features:
 * - R regenerates every boid (applied between ticks)
 * - Space pauses and resumes the simulation
 * - Escape closes the application
 * - Forwarding raw events to egui
 */

use nannou::prelude::*;
use tracing::info;

use crate::app::Model;

// Key pressed event handler
pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    // Keys typed into an egui widget belong to the widget
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::R => {
            info!("Regenerating boids");
            model.flock.generate_boids();
            model.refresh_snapshot();
        }
        Key::Space => {
            model.params.pause_simulation = !model.params.pause_simulation;
        }
        Key::Escape => app.quit(),
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
