/*
 * Statistics Module
 *
 * Population summaries recomputed from the current flock state: the mean
 * and standard deviation of pairwise toroidal distances, and of speeds.
 */

use serde::{Deserialize, Serialize};

use crate::boid::Boid;
use crate::point::Torus;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub mean_distance: f64,
    pub dev_distance: f64,
    pub mean_speed: f64,
    pub dev_speed: f64,
}

impl Statistics {
    /// Summarize one species.
    ///
    /// Distances run over every unordered pair, so fewer than two agents
    /// give zero distance statistics. An empty slice gives all zeros.
    pub fn from_boids<B: Boid>(torus: &Torus, boids: &[B]) -> Self {
        let pair_distances = boids.iter().enumerate().flat_map(|(i, a)| {
            boids[i + 1..]
                .iter()
                .map(move |b| torus.toroidal_distance(a.position(), b.position()))
        });
        let (mean_distance, dev_distance) = mean_and_deviation(pair_distances);

        let speeds = boids.iter().map(|boid| boid.velocity().magnitude());
        let (mean_speed, dev_speed) = mean_and_deviation(speeds);

        Self {
            mean_distance,
            dev_distance,
            mean_speed,
            dev_speed,
        }
    }
}

// Population mean and standard deviation in one pass
fn mean_and_deviation(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (count, sum, sum_sq) = values.fold((0usize, 0.0, 0.0), |(n, s, s2), v| {
        (n + 1, s + v, s2 + v * v)
    });
    if count == 0 {
        return (0.0, 0.0);
    }
    let mean = sum / count as f64;
    // Rounding can push the variance a hair below zero for identical values
    let variance = (sum_sq / count as f64 - mean * mean).max(0.0);
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boid::Prey;
    use crate::point::Point;
    use approx::assert_relative_eq;

    const TORUS: Torus = Torus::new(100.0, 100.0);

    #[test]
    fn empty_and_single_flocks_are_degenerate() {
        assert_eq!(Statistics::from_boids::<Prey>(&TORUS, &[]), Statistics::default());

        let lone = [Prey::new(Point::new(5.0, 5.0), Point::new(3.0, 4.0))];
        let stats = Statistics::from_boids(&TORUS, &lone);
        assert_eq!(stats.mean_distance, 0.0);
        assert_eq!(stats.dev_distance, 0.0);
        assert_relative_eq!(stats.mean_speed, 5.0);
        assert_relative_eq!(stats.dev_speed, 0.0);
    }

    #[test]
    fn pairwise_distances_use_wraparound() {
        let flock = [
            Prey::new(Point::new(1.0, 0.0), Point::new(1.0, 0.0)),
            Prey::new(Point::new(97.0, 0.0), Point::new(3.0, 0.0)),
            Prey::new(Point::new(1.0, 10.0), Point::new(0.0, 2.0)),
        ];
        // Pair distances: 4, 10 and sqrt(4² + 10²)
        let d3 = 116.0_f64.sqrt();
        let mean = (4.0 + 10.0 + d3) / 3.0;
        let dev = ((16.0 + 100.0 + 116.0) / 3.0 - mean * mean).sqrt();

        let stats = Statistics::from_boids(&TORUS, &flock);
        assert_relative_eq!(stats.mean_distance, mean, epsilon = 1e-12);
        assert_relative_eq!(stats.dev_distance, dev, epsilon = 1e-12);
        assert_relative_eq!(stats.mean_speed, 2.0, epsilon = 1e-12);
        assert_relative_eq!(stats.dev_speed, (2.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
    }
}
