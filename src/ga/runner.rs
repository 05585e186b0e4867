//! GA generational loop.
//!
//! [`GaRunner`] evolves a fixed-size population of tours. Each generation:
//! snapshot → roulette selection → pairwise crossover → repeated
//! (mutation → elitist repair against the snapshot) → best update.

use super::config::GaConfig;
use super::selection::RouletteWheel;
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::progress::{Frame, ProgressObserver};
use crate::random::{create_rng, resolve_seed};
use crate::tour::crossover::crossover;
use crate::tour::{perturb, Candidate};
use rand::rngs::StdRng;
use rand::Rng;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best tour found during the entire run.
    pub best: Candidate,

    /// Cost of the best tour.
    pub best_cost: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Generations whose roulette wheel fell back to uniform chances.
    pub degenerate_generations: usize,

    /// Best cost of the initial population and after each generation.
    pub cost_history: Vec<f64>,

    /// Seed the run's random stream was created from.
    pub seed: u64,
}

/// Genetic Algorithm engine over closed tours.
///
/// Owns its instance and a single random stream. The population is seeded
/// uniformly at random at the start of every run and evolved for exactly
/// `max_generations` generations.
///
/// # Usage
///
/// ```
/// use u_tour::ga::{GaConfig, GaRunner};
/// use u_tour::instance::{Instance, Location};
///
/// let locations = vec![
///     Location::new(1, 0.0, 0.0),
///     Location::new(2, 0.0, 1.0),
///     Location::new(3, 1.0, 1.0),
///     Location::new(4, 1.0, 0.0),
/// ];
/// let instance = Instance::new(locations, 4).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(50)
///     .with_seed(42);
/// let result = GaRunner::new(instance, config).unwrap().run().unwrap();
/// assert!(result.best_cost <= 4.0 + 1e-9);
/// ```
#[derive(Debug)]
pub struct GaRunner {
    instance: Instance,
    config: GaConfig,
    rng: StdRng,
    seed: u64,
}

impl GaRunner {
    /// Creates an engine, validating the configuration.
    ///
    /// Crossover needs a cut strictly inside the tour, so the instance must
    /// have at least three locations.
    pub fn new(instance: Instance, config: GaConfig) -> Result<Self> {
        config.validate()?;
        if instance.dimension() < 3 {
            return Err(Error::InvalidConfig(format!(
                "GA needs at least 3 locations, got {}",
                instance.dimension()
            )));
        }
        let seed = resolve_seed(config.seed);
        log::debug!(
            "GA engine: {} locations, population {}, seed {}",
            instance.dimension(),
            config.population_size,
            seed
        );
        Ok(Self {
            instance,
            config,
            rng: create_rng(seed),
            seed,
        })
    }

    /// The instance being optimized.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The engine configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Seed of the engine's random stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs the GA optimization.
    pub fn run(&mut self) -> Result<GaResult> {
        self.run_with_observer(&mut ())
    }

    /// Runs the GA, reporting one frame per generation.
    pub fn run_with_observer<O: ProgressObserver>(
        &mut self,
        observer: &mut O,
    ) -> Result<GaResult> {
        let config = &self.config;
        let matrix = self.instance.matrix();
        let rng = &mut self.rng;

        // 1. Seed population
        let mut population: Vec<Candidate> = (0..config.population_size)
            .map(|_| Candidate::random(matrix, rng))
            .collect();

        // 2. Track best
        let mut best = find_best(&population).clone();
        let mut cost_history = Vec::with_capacity(config.max_generations + 1);
        cost_history.push(best.cost());

        let mut degenerate_generations = 0usize;

        // 3. Generational loop
        for gen in 0..config.max_generations {
            let (next, degenerate) = next_generation(&population, config, matrix, rng);
            population = next;
            if degenerate {
                degenerate_generations += 1;
                log::warn!(
                    "GA generation {}: fitness sum unusable, selected uniformly",
                    gen + 1
                );
            }

            // Update best
            let gen_best = find_best(&population);
            if gen_best.is_better_than(&best) {
                best = gen_best.clone();
            }
            cost_history.push(best.cost());

            observer.on_frame(&Frame {
                step: gen + 1,
                total_steps: config.max_generations,
                costs: population.iter().map(Candidate::cost).collect(),
                best_cost: best.cost(),
                best_order: best.order().to_vec(),
                temperature: None,
            });
        }

        debug_assert!(best.check_invariants(matrix).is_ok());
        log::info!(
            "GA finished: best={:.4} after {} generations",
            best.cost(),
            config.max_generations
        );
        observer.on_finished(best.cost());

        Ok(GaResult {
            best_cost: best.cost(),
            best,
            generations: config.max_generations,
            degenerate_generations,
            cost_history,
            seed: self.seed,
        })
    }
}

/// Produces the generation following `population`.
///
/// Returns the new population and whether the roulette wheel fell back to
/// uniform chances.
fn next_generation<R: Rng>(
    population: &[Candidate],
    config: &GaConfig,
    matrix: &DistanceMatrix,
    rng: &mut R,
) -> (Vec<Candidate>, bool) {
    // Selection
    let wheel = RouletteWheel::new(population);
    let mut next = wheel.select(population, rng);

    // Crossover
    crossover_pairs(&mut next, config.crossover_rate, matrix, rng);

    // Mutation + elitist repair against the previous generation
    for _ in 0..config.mutation_passes {
        mutate_population(&mut next, config.mutation_rate, matrix, rng);
        retain_elites(population, &mut next);
    }

    (next, wheel.is_degenerate())
}

/// Recombines consecutive pairs `(0, 1), (2, 3), ...` each with probability
/// `rate`. A trailing odd individual is left alone.
fn crossover_pairs<R: Rng>(
    population: &mut [Candidate],
    rate: f64,
    matrix: &DistanceMatrix,
    rng: &mut R,
) {
    for pair in population.chunks_exact_mut(2) {
        if rng.random::<f64>() < rate {
            let (a, b) = pair.split_at_mut(1);
            crossover(&mut a[0], &mut b[0], matrix, rng);
        }
    }
}

/// Perturbs each individual independently with probability `rate`.
fn mutate_population<R: Rng>(
    population: &mut [Candidate],
    rate: f64,
    matrix: &DistanceMatrix,
    rng: &mut R,
) {
    for individual in population.iter_mut() {
        if rng.random::<f64>() < rate {
            perturb(individual, matrix, rng);
        }
    }
}

/// Slot by slot, restores the snapshot individual where it is strictly
/// shorter than the current one.
fn retain_elites(old_generation: &[Candidate], population: &mut [Candidate]) {
    debug_assert_eq!(old_generation.len(), population.len());
    for (current, old) in population.iter_mut().zip(old_generation) {
        if old.is_better_than(current) {
            *current = old.clone();
        }
    }
}

/// Find the shortest tour in the population.
fn find_best(population: &[Candidate]) -> &Candidate {
    population
        .iter()
        .min_by(|a, b| a.cmp_cost(b))
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================
