/*
 * Renderer Module
 *
 * This module handles the rendering of the simulation. It only ever reads
 * the per-tick snapshot held by the model, never the live flock:
 * - prey and predators are drawn as triangles pointing along their velocity
 * - the statistics panel sits in the top-left corner
 * - debug mode outlines the sight and separation radii of the first prey
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::boid::Species;
use crate::flock::BoidSnapshot;
use crate::point::Point;
use crate::ui;
use crate::{PREDATOR_SIZE, PREY_SIZE};

// Fill and outline colors per species
fn palette(species: Species) -> (Rgb<u8>, Rgb<u8>) {
    match species {
        Species::Prey => (rgb(80, 160, 255), rgb(30, 80, 160)),
        Species::Predator => (rgb(255, 100, 100), rgb(160, 40, 40)),
    }
}

// Simulation coordinates have their origin in a corner; nannou's is the
// window center
fn to_screen(p: Point, model: &Model) -> Point2 {
    let torus = model.flock.torus();
    pt2(
        (p.x - torus.width / 2.0) as f32,
        (p.y - torus.height / 2.0) as f32,
    )
}

fn draw_boid(draw: &Draw, boid: &BoidSnapshot, model: &Model) {
    let size = match boid.species {
        Species::Prey => PREY_SIZE,
        Species::Predator => PREDATOR_SIZE,
    };
    let (fill, outline) = palette(boid.species);
    let angle = boid.velocity.y.atan2(boid.velocity.x) as f32;

    let points = [
        pt2(size, 0.0),
        pt2(-size, size / 2.0),
        pt2(-size, -size / 2.0),
    ];

    draw.polygon()
        .color(fill)
        .stroke(outline)
        .stroke_weight(1.0)
        .points(points)
        .xy(to_screen(boid.position, model))
        .rotate(angle);
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    // Clear the background
    draw.background().color(rgb(10u8, 20, 60));

    for boid in &model.snapshot {
        draw_boid(&draw, boid, model);
    }

    // Draw debug visualization if enabled
    if model.params.show_debug {
        if let Some(first) = model.snapshot.iter().find(|b| b.species == Species::Prey) {
            let [sight, prey_separation, _] = model.flock.distance_parameters();
            let center = to_screen(first.position, model);

            // Sight radius
            draw.ellipse()
                .xy(center)
                .radius(sight as f32)
                .no_fill()
                .stroke(GREEN)
                .stroke_weight(1.0);

            // Separation radius
            draw.ellipse()
                .xy(center)
                .radius(prey_separation as f32)
                .no_fill()
                .stroke(RED)
                .stroke_weight(1.0);

            // Velocity vector
            let velocity = vec2(first.velocity.x as f32, first.velocity.y as f32);
            draw.arrow()
                .start(center)
                .end(center + velocity * 5.0)
                .color(YELLOW)
                .stroke_weight(2.0);
        }
    }

    ui::draw_statistics(&draw, &model.debug_info, app.window_rect(), model.params.show_debug);

    // Finish drawing
    if let Err(err) = draw.to_frame(app, &frame) {
        tracing::warn!(?err, "Failed to draw frame");
    }

    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        tracing::warn!(?err, "Failed to draw controls");
    }
}
