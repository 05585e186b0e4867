//! End-to-end engine scenarios on small instances with known optima.

use rand::Rng;
use u_tour::ga::{GaConfig, GaRunner};
use u_tour::instance::{Instance, Location};
use u_tour::params::ParameterMap;
use u_tour::progress::ProgressEvent;
use u_tour::random::create_rng;
use u_tour::sa::{acceptance_probability, SaConfig, SaRunner};

const UNIT_SQUARE: &str = "1 0 0\n2 0 1\n3 1 1\n4 1 0\n";

fn unit_square() -> Instance {
    Instance::parse(UNIT_SQUARE, 4).unwrap()
}

#[test]
fn sa_finds_square_perimeter() {
    let mut sa = SaRunner::new(unit_square(), SaConfig::default().with_seed(42)).unwrap();
    let result = sa.run().unwrap();
    assert!(
        (result.best_cost - 4.0).abs() < 1e-9,
        "expected 4.0, got {}",
        result.best_cost
    );

    let tour = sa.instance().tour(&result.best);
    let mut ids = tour.ids.clone();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(tour.relative_gap(4.0).map(|g| g.abs() < 1e-9), Some(true));
}

#[test]
fn ga_finds_square_perimeter() {
    let config = GaConfig::default()
        .with_population_size(20)
        .with_max_generations(200)
        .with_seed(42);
    let result = GaRunner::new(unit_square(), config).unwrap().run().unwrap();
    assert!(
        result.best_cost <= 4.0 + 1e-9,
        "expected at most 4.0, got {}",
        result.best_cost
    );
    assert_eq!(result.cost_history.len(), 201);
}

#[test]
fn equal_cost_accepted_half_the_time() {
    let p = acceptance_probability(7.5, 7.5, 3.0);
    assert!((p - 0.5).abs() < 1e-12);
    assert_eq!(acceptance_probability(7.5, 7.0, 3.0), 1.0);

    let mut rng = create_rng(42);
    let draws = 100_000;
    let accepted = (0..draws).filter(|_| rng.random::<f64>() < p).count();
    let rate = accepted as f64 / draws as f64;
    assert!((rate - 0.5).abs() < 0.01, "acceptance rate {rate}");
}

#[test]
fn channel_observer_receives_every_frame() {
    let (mut tx, rx) = std::sync::mpsc::channel::<ProgressEvent>();
    let config = SaConfig::default()
        .with_initial_temperature(1.0)
        .with_cooling_rate(0.5)
        .with_min_temperature(0.1)
        .with_steps_per_location(5)
        .with_seed(1);
    let mut sa = SaRunner::new(unit_square(), config).unwrap();
    let result = sa.run_with_observer(&mut tx).unwrap();
    drop(tx);

    let events: Vec<ProgressEvent> = rx.into_iter().collect();
    // 1.0 -> 0.5 -> 0.25 -> 0.125 -> 0.0625
    assert_eq!(result.temperature_steps, 4);
    assert_eq!(events.len(), 5);
    assert_eq!(
        events.last(),
        Some(&ProgressEvent::Finished {
            best_cost: result.best_cost
        })
    );
}

#[test]
fn parameter_map_drives_random_instance_run() {
    let mut params = ParameterMap::for_ga();
    params.set("dimension", 12.0).unwrap();
    params.set("population", 30.0).unwrap();
    params.set("generation", 20.0).unwrap();

    let (low, high) = params.bounds().unwrap();
    let mut rng = create_rng(3);
    let instance = Instance::random(params.dimension().unwrap(), low, high, &mut rng).unwrap();
    assert!(instance
        .locations()
        .iter()
        .all(|l: &Location| (low..high).contains(&l.x()) && (low..high).contains(&l.y())));

    let config = params.to_ga_config().unwrap().with_seed(3);
    let result = GaRunner::new(instance, config).unwrap().run().unwrap();
    assert_eq!(result.generations, 20);
    assert_eq!(result.best.len(), 12);
    assert!(result.best.is_permutation());
}
