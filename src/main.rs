/*
 * Predator & Prey Flocking Simulation
 *
 * Prey flock together using separation, alignment and cohesion while
 * fleeing the predators they can see; predators keep apart from each other
 * and chase the prey in sight. The world wraps around at every edge.
 *
 * Usage: predator-prey-boids [config.json]
 * Fields missing from the JSON file keep their defaults. Set RUST_LOG
 * (e.g. RUST_LOG=predator_prey_boids=debug) to control logging.
 */

use anyhow::{Context, Result};
use tracing::info;

use predator_prey_boids::{app, FlockConfig};

fn main() -> Result<()> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => FlockConfig::load(&path)
            .with_context(|| format!("failed to load configuration from {path}"))?,
        None => {
            let config = FlockConfig::default();
            config.validate().context("invalid default configuration")?;
            config
        }
    };

    info!(
        prey = config.prey_count,
        predators = config.predator_count,
        width = config.width,
        height = config.height,
        "Starting predator/prey simulation"
    );
    app::run(config);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
