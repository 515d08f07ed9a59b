use predator_prey_boids::{
    Boid, FlightParameters, Flock, FlockConfig, Point, Predator, Prey, SpeedLimits, Species,
};

const EPS: f64 = 1e-9;

fn still_air() -> FlightParameters {
    FlightParameters {
        separation: 0.0,
        alignment: 0.0,
        cohesion: 0.0,
        repulsion: 0.0,
        chase: 0.0,
    }
}

fn two_prey_config(separation: f64) -> FlockConfig {
    FlockConfig {
        width: 100.0,
        height: 100.0,
        prey_separation_radius: 20.0,
        flight: FlightParameters {
            separation,
            ..still_air()
        },
        speed: SpeedLimits {
            prey_min: 0.0,
            prey_max: 10.0,
            ..SpeedLimits::default()
        },
        seed: Some(3),
        ..FlockConfig::default()
    }
}

fn facing_pair() -> Vec<Prey> {
    vec![
        Prey::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
        Prey::new(Point::new(10.0, 0.0), Point::new(-1.0, 0.0)),
    ]
}

fn assert_invariants(flock: &Flock) {
    let limits = flock.config().speed;
    for prey in flock.prey() {
        assert!(flock.torus().contains(prey.position()), "{:?}", prey.position());
        let speed = prey.velocity().magnitude();
        assert!(speed >= limits.prey_min && speed <= limits.prey_max, "{speed}");
    }
    for predator in flock.predators() {
        assert!(flock.torus().contains(predator.position()), "{:?}", predator.position());
        let speed = predator.velocity().magnitude();
        assert!(
            speed >= limits.predator_min && speed <= limits.predator_max,
            "{speed}"
        );
    }
}

#[test]
fn separation_pushes_a_close_pair_apart() {
    let mut forced = Flock::from_boids(two_prey_config(0.5), facing_pair(), vec![])
        .expect("valid flock");
    let mut baseline = Flock::from_boids(two_prey_config(0.0), facing_pair(), vec![])
        .expect("valid flock");

    forced.update_flock(1.0);
    baseline.update_flock(1.0);

    // The left agent is pushed towards -x and wraps to the far edge
    let left = forced.prey()[0];
    let right = forced.prey()[1];
    assert_eq!(left.velocity(), Point::new(-4.0, 0.0));
    assert_eq!(left.position(), Point::new(96.0, 0.0));
    assert_eq!(right.velocity(), Point::new(4.0, 0.0));
    assert_eq!(right.position(), Point::new(14.0, 0.0));

    let forced_distance = forced.statistics().mean_distance;
    let baseline_distance = baseline.statistics().mean_distance;
    assert!((baseline_distance - 8.0).abs() < EPS);
    assert!((forced_distance - 18.0).abs() < EPS);
    assert!(forced_distance > baseline_distance);
}

#[test]
fn lone_prey_travels_in_a_straight_line() {
    let config = FlockConfig {
        seed: Some(11),
        ..FlockConfig::default()
    };
    let start = Point::new(10.0, 20.0);
    let velocity = Point::new(8.0, 0.0);
    let mut flock = Flock::from_boids(config, vec![Prey::new(start, velocity)], vec![])
        .expect("valid flock");

    for tick in 1..=200 {
        assert!(flock
            .near_predators(0, Species::Prey)
            .expect("index in range")
            .is_empty());
        flock.update_flock(1.0);

        let expected_x = (10.0 + 8.0 * tick as f64).rem_euclid(1200.0);
        let prey = flock.prey()[0];
        assert_eq!(prey.velocity(), velocity);
        assert!((prey.position().x - expected_x).abs() < EPS);
        assert_eq!(prey.position().y, 20.0);
    }
}

#[test]
fn random_flocks_stay_inside_domain_and_speed_bounds() {
    for seed in 0..4 {
        let config = FlockConfig {
            prey_count: 120,
            predator_count: 8,
            seed: Some(seed),
            ..FlockConfig::default()
        };
        let mut flock = Flock::new(config).expect("valid config");
        assert_invariants(&flock);

        for dt in [0.0, 0.25, 1.0, 3.0, 0.5, 20.0] {
            flock.update_flock(dt);
            assert_invariants(&flock);
        }
    }
}

#[test]
fn huge_time_steps_still_wrap_into_domain() {
    let config = FlockConfig {
        prey_count: 30,
        predator_count: 3,
        seed: Some(99),
        ..FlockConfig::default()
    };
    let mut flock = Flock::new(config).expect("valid config");
    flock.update_flock(1_000.0);
    assert_invariants(&flock);
}

#[test]
fn zero_time_step_keeps_positions() {
    let config = FlockConfig {
        prey_count: 40,
        predator_count: 4,
        seed: Some(5),
        ..FlockConfig::default()
    };
    let mut flock = Flock::new(config).expect("valid config");
    let before: Vec<Point> = flock.snapshot().iter().map(|s| s.position).collect();

    flock.update_flock(0.0);
    let after: Vec<Point> = flock.snapshot().iter().map(|s| s.position).collect();
    assert_eq!(before, after);
}

#[test]
fn tick_results_do_not_depend_on_evaluation_order() {
    let config = FlockConfig {
        prey_count: 80,
        predator_count: 6,
        seed: Some(2024),
        ..FlockConfig::default()
    };
    let flock = Flock::new(config).expect("valid config");

    let forward: Vec<(Point, Point)> = (0..flock.prey_count())
        .map(|i| flock.update_boid(i, Species::Prey, 1.0).expect("index in range"))
        .collect();
    let mut backward: Vec<(Point, Point)> = (0..flock.prey_count())
        .rev()
        .map(|i| flock.update_boid(i, Species::Prey, 1.0).expect("index in range"))
        .collect();
    backward.reverse();
    assert_eq!(forward, backward);

    // Interleaving predator evaluations changes nothing either
    let interleaved: Vec<(Point, Point)> = (0..flock.prey_count())
        .map(|i| {
            let _ = flock.update_boid(i % flock.predator_count(), Species::Predator, 1.0);
            flock.update_boid(i, Species::Prey, 1.0).expect("index in range")
        })
        .collect();
    assert_eq!(forward, interleaved);
}

#[test]
fn predators_close_in_on_a_lone_prey() {
    let config = FlockConfig {
        width: 400.0,
        height: 400.0,
        flight: FlightParameters {
            chase: 0.05,
            ..still_air()
        },
        seed: Some(8),
        ..FlockConfig::default()
    };
    // The prey moves away along +x; the predator starts behind it, heading the same way
    let prey = vec![Prey::new(Point::new(200.0, 200.0), Point::new(7.0, 0.0))];
    let predators = vec![Predator::new(Point::new(160.0, 210.0), Point::new(5.0, 0.0))];
    let mut flock = Flock::from_boids(config, prey, predators).expect("valid flock");

    let torus = *flock.torus();
    let gap = |flock: &Flock| {
        let offset = torus.relative_position(flock.predators()[0].position(), flock.prey()[0].position());
        offset.y.abs()
    };

    let initial_gap = gap(&flock);
    flock.update_flock(1.0);
    assert!(gap(&flock) < initial_gap);
}

#[test]
fn snapshot_is_a_detached_copy() {
    let config = FlockConfig {
        prey_count: 10,
        predator_count: 2,
        seed: Some(42),
        ..FlockConfig::default()
    };
    let mut flock = Flock::new(config).expect("valid config");
    let snapshot = flock.snapshot();

    flock.update_flock(1.0);
    assert_ne!(snapshot, flock.snapshot());
    assert_eq!(snapshot.len(), flock.flock_size());
}

#[test]
fn corrupt_velocity_never_reaches_a_tick() {
    let prey = vec![
        Prey::new(Point::new(100.0, 100.0), Point::new(f64::NAN, 0.0)),
        Prey::new(Point::new(90.0, 100.0), Point::new(1.0, 0.0)),
    ];
    let config = FlockConfig {
        seed: Some(1),
        ..FlockConfig::default()
    };
    assert!(Flock::from_boids(config, prey, vec![]).is_err());
}
