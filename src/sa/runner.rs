//! SA execution loop.
//!
//! The engine moves through three phases:
//!
//! 1. **Initializing**: derive the initial temperature from the cost spread
//!    of a random sample of tours
//! 2. **Cooling**: at each temperature, run `steps_per_location * n` moves,
//!    then cool geometrically
//! 3. **Terminated**: return the best tour seen

use super::config::SaConfig;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::progress::{Frame, ProgressObserver};
use crate::random::{create_rng, resolve_seed};
use crate::tour::{perturb, Candidate};
use rand::rngs::StdRng;
use rand::Rng;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best tour found.
    pub best: Candidate,

    /// Cost of the best tour.
    pub best_cost: f64,

    /// Temperature the cooling phase started at.
    pub initial_temperature: f64,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Number of temperature steps executed.
    pub temperature_steps: usize,

    /// Total number of moves evaluated.
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Best cost at the start and after every temperature step.
    pub cost_history: Vec<f64>,

    /// Seed the run's random stream was created from.
    pub seed: u64,
}

/// Simulated Annealing engine over closed tours.
///
/// Owns its instance and a single random stream. Consecutive runs on the
/// same engine continue that stream.
///
/// # Usage
///
/// ```
/// use u_tour::instance::{Instance, Location};
/// use u_tour::sa::{SaConfig, SaRunner};
///
/// let locations = vec![
///     Location::new(1, 0.0, 0.0),
///     Location::new(2, 0.0, 1.0),
///     Location::new(3, 1.0, 1.0),
///     Location::new(4, 1.0, 0.0),
/// ];
/// let instance = Instance::new(locations, 4).unwrap();
/// let mut sa = SaRunner::new(instance, SaConfig::default().with_seed(42)).unwrap();
/// let result = sa.run().unwrap();
/// assert!((result.best_cost - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct SaRunner {
    instance: Instance,
    config: SaConfig,
    moves_per_step: usize,
    rng: StdRng,
    seed: u64,
}

impl SaRunner {
    /// Creates an engine, validating the configuration.
    pub fn new(instance: Instance, config: SaConfig) -> Result<Self> {
        config.validate()?;
        let moves_per_step = config
            .steps_per_location
            .checked_mul(instance.dimension())
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "{} steps per location overflow the move budget for {} locations",
                    config.steps_per_location,
                    instance.dimension()
                ))
            })?;
        let seed = resolve_seed(config.seed);
        log::debug!(
            "SA engine: {} locations, seed {}",
            instance.dimension(),
            seed
        );
        Ok(Self {
            instance,
            config,
            moves_per_step,
            rng: create_rng(seed),
            seed,
        })
    }

    /// The instance being optimized.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The engine configuration.
    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    /// Seed of the engine's random stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs SA optimization.
    pub fn run(&mut self) -> Result<SaResult> {
        self.run_with_observer(&mut ())
    }

    /// Runs SA, reporting one frame per temperature step.
    pub fn run_with_observer<O: ProgressObserver>(
        &mut self,
        observer: &mut O,
    ) -> Result<SaResult> {
        let initial_temperature = self.initial_temperature()?;

        let config = &self.config;
        let matrix = self.instance.matrix();
        let rng = &mut self.rng;

        let total_steps = temperature_steps(
            initial_temperature,
            config.min_temperature,
            config.cooling_rate,
        );
        let inner_iters = self.moves_per_step;
        log::debug!(
            "SA cooling: T0={:.4}, {} temperature steps of {} moves",
            initial_temperature,
            total_steps,
            inner_iters
        );

        let mut current = Candidate::random(matrix, rng);
        let mut best = current.clone();

        let mut temperature = initial_temperature;
        let mut step = 0usize;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        let mut cost_history = Vec::with_capacity(total_steps + 1);
        cost_history.push(best.cost());

        while temperature > config.min_temperature {
            for _ in 0..inner_iters {
                let mut neighbor = current.clone();
                perturb(&mut neighbor, matrix, rng);

                let accept = if neighbor.is_better_than(&current) {
                    improving_moves += 1;
                    true
                } else {
                    let probability =
                        acceptance_probability(current.cost(), neighbor.cost(), temperature);
                    rng.random::<f64>() < probability
                };

                if accept {
                    current = neighbor;
                    accepted_moves += 1;

                    if current.is_better_than(&best) {
                        best = current.clone();
                    }
                }

                iterations += 1;
            }

            step += 1;
            cost_history.push(best.cost());
            observer.on_frame(&Frame {
                step,
                total_steps,
                costs: vec![current.cost()],
                best_cost: best.cost(),
                best_order: best.order().to_vec(),
                temperature: Some(temperature),
            });

            temperature *= config.cooling_rate;
        }

        debug_assert!(best.check_invariants(matrix).is_ok());
        log::info!(
            "SA finished: best={:.4} after {} steps ({} moves, {} accepted)",
            best.cost(),
            step,
            iterations,
            accepted_moves
        );
        observer.on_finished(best.cost());

        Ok(SaResult {
            best_cost: best.cost(),
            best,
            initial_temperature,
            final_temperature: temperature,
            temperature_steps: step,
            iterations,
            accepted_moves,
            improving_moves,
            cost_history,
            seed: self.seed,
        })
    }

    /// Determines the starting temperature.
    ///
    /// Uses the configured value if set. Otherwise samples `M` random tours
    /// (`M` drawn from `sample_size_range`) and solves for the temperature
    /// at which a worsening move of size `delta = max - min` is accepted
    /// with probability `target_acceptance`:
    /// `T0 = -delta / ln(1 / p - 1)`.
    ///
    /// A zero spread (up to rounding) falls back to `degenerate_temperature`.
    /// A result that is not finite and positive is an
    /// [`Error::InvalidTemperature`].
    pub fn initial_temperature(&mut self) -> Result<f64> {
        let t0 = match self.config.initial_temperature {
            Some(t) => t,
            None => {
                let matrix = self.instance.matrix();
                let (lo, hi) = self.config.sample_size_range;
                let samples = self.rng.random_range(lo..hi);

                let mut min_cost = f64::INFINITY;
                let mut max_cost = f64::NEG_INFINITY;
                for _ in 0..samples {
                    let cost = Candidate::random(matrix, &mut self.rng).cost();
                    min_cost = min_cost.min(cost);
                    max_cost = max_cost.max(cost);
                }

                let delta = max_cost - min_cost;
                if delta > 1e-12 * max_cost.abs().max(1.0) {
                    let p = self.config.target_acceptance;
                    -delta / (1.0 / p - 1.0).ln()
                } else {
                    log::warn!(
                        "SA: {} sampled tours share one cost; using T0={}",
                        samples,
                        self.config.degenerate_temperature
                    );
                    self.config.degenerate_temperature
                }
            }
        };

        if !(t0.is_finite() && t0 > 0.0) {
            return Err(Error::InvalidTemperature(t0));
        }
        if t0 <= self.config.min_temperature {
            log::warn!(
                "SA: T0={} is not above min_temperature={}; no cooling steps will run",
                t0,
                self.config.min_temperature
            );
        }
        Ok(t0)
    }
}

/// Probability of moving from a tour of `current_cost` to one of
/// `candidate_cost` at `temperature`.
///
/// Strict improvements are always accepted. Otherwise the logistic law
/// `1 / (1 + exp(-(current - candidate) / T))` applies, which gives exactly
/// one half for equal costs and tends to zero for large deteriorations.
pub fn acceptance_probability(current_cost: f64, candidate_cost: f64, temperature: f64) -> f64 {
    if candidate_cost < current_cost {
        return 1.0;
    }
    1.0 / (1.0 + (-(current_cost - candidate_cost) / temperature).exp())
}

/// Number of temperature steps geometric cooling takes from `initial`
/// until the temperature is no longer above `min`.
pub fn temperature_steps(initial: f64, min: f64, cooling_rate: f64) -> usize {
    let mut temperature = initial;
    let mut steps = 0usize;
    while temperature > min {
        steps += 1;
        temperature *= cooling_rate;
    }
    steps
}
