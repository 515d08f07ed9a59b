/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. The control panel edits population sizes, the five
 * flight coefficients and the simulation toggles. It also draws the
 * statistics panel in the corner of the window.
 */

use nannou::geom::Rect;
use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams};

// Update the UI and return whether the boids should be regenerated along
// with the parameter changes made this frame
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
) -> (bool, ParamChanges) {
    let mut should_reset_boids = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 140.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.prey_count, SimulationParams::get_prey_count_range())
                        .text("Prey"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.predator_count,
                        SimulationParams::get_predator_count_range(),
                    )
                    .text("Predators"),
                );

                if ui.button("Reset Boids").clicked() {
                    should_reset_boids = true;
                }
            });

            ui.collapsing("Flight Parameters", |ui| {
                let range = SimulationParams::get_coefficient_range;
                ui.add(egui::Slider::new(&mut params.flight.separation, range()).text("Separation"));
                ui.add(egui::Slider::new(&mut params.flight.alignment, range()).text("Alignment"));
                ui.add(egui::Slider::new(&mut params.flight.cohesion, range()).text("Cohesion"));
                ui.add(egui::Slider::new(&mut params.flight.repulsion, range()).text("Repulsion"));
                ui.add(egui::Slider::new(&mut params.flight.chase, range()).text("Chase"));

                if ui.button("Derive Repulsion & Chase").clicked() {
                    params.derive_predator_prey_weights();
                }
            });

            ui.collapsing("Simulation", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.time_scale, SimulationParams::get_time_scale_range())
                        .text("Time Scale"),
                );
                ui.checkbox(&mut params.enable_parallel, "Enable Parallel Processing");

                ui.separator();

                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Tick: {}", debug_info.ticks));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    (should_reset_boids, params.detect_changes())
}

// Draw the statistics panel, plus frame timings when debug is enabled
pub fn draw_statistics(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: Rect,
    show_debug: bool,
) {
    let margin = 15.0;
    let line_height = 20.0;
    let panel_width = 250.0;

    let mut lines = debug_info.statistics_lines().to_vec();
    if show_debug {
        let predators = &debug_info.predator_statistics;
        lines.push(format!("Predator mean dist: {:.2}", predators.mean_distance));
        lines.push(format!("Predator mean speed: {:.2}", predators.mean_speed));
        lines.push(format!("dt: {:.3}", debug_info.dt));
        lines.push(format!("FPS: {:.1}", debug_info.fps));
    }

    let panel_height = line_height * lines.len() as f32 + margin;
    draw.rect()
        .x_y(
            window_rect.left() + margin + panel_width / 2.0,
            window_rect.top() - margin - panel_height / 2.0,
        )
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.6));

    let text_x = window_rect.left() + margin * 2.0;
    let text_y = window_rect.top() - margin * 2.0;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Left-align by anchoring a fixed-width text box at the panel edge
        draw.text(text)
            .x_y(text_x + panel_width / 2.0 - margin, y)
            .w(panel_width - margin * 2.0)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(16);
    }
}
