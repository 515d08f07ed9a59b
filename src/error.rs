/*
 * Error Module
 *
 * Errors reported when a flock cannot be built or reconfigured.
 * Numeric degenerate cases (zero-length vectors) are not errors; they have
 * defined fallbacks in the point and boid modules.
 */

use thiserror::Error;

use crate::boid::Species;

/// Errors emitted while configuring or querying a flock.
#[derive(Debug, Error)]
pub enum FlockError {
    /// A configuration value that cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A query referenced an agent outside its species collection.
    #[error("{species} index {index} out of range (len {len})")]
    IndexOutOfRange {
        species: Species,
        index: usize,
        len: usize,
    },

    #[error("failed to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
