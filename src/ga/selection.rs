//! Fitness-proportionate (roulette wheel) selection.
//!
//! Fitness is the inverse tour length, so shorter tours get proportionally
//! larger slices of the wheel. Each spin draws `u` in `[0, 1)` and walks
//! the slices, subtracting each chance from `u` until the remainder drops
//! to zero or below. If rounding leaves a positive remainder after the last
//! slice, the last individual is selected, so a spin always yields an index.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::tour::Candidate;
use rand::Rng;

/// Selection chances for one generation.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    chances: Vec<f64>,
    degenerate: bool,
}

impl RouletteWheel {
    /// Builds the wheel for `population`.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn new(population: &[Candidate]) -> Self {
        let costs: Vec<f64> = population.iter().map(Candidate::cost).collect();
        Self::from_costs(&costs)
    }

    /// Builds the wheel from tour costs.
    ///
    /// When the inverse costs do not form a usable distribution (a zero or
    /// non-finite cost, or a non-finite sum), every individual gets the same
    /// chance and the wheel is marked degenerate.
    ///
    /// # Panics
    /// Panics if `costs` is empty.
    pub fn from_costs(costs: &[f64]) -> Self {
        assert!(!costs.is_empty(), "cannot select from empty population");
        let n = costs.len();

        let fitness: Vec<f64> = costs.iter().map(|&c| 1.0 / c).collect();
        let total: f64 = fitness.iter().sum();
        let usable =
            total.is_finite() && total > 0.0 && fitness.iter().all(|f| f.is_finite() && *f > 0.0);

        if usable {
            Self {
                chances: fitness.iter().map(|f| f / total).collect(),
                degenerate: false,
            }
        } else {
            Self {
                chances: vec![1.0 / n as f64; n],
                degenerate: true,
            }
        }
    }

    /// Whether the wheel fell back to uniform chances.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Selection chance of every individual, in population order.
    pub fn chances(&self) -> &[f64] {
        &self.chances
    }

    /// Index selected by the draw `pick` in `[0, 1)`.
    pub fn index_for(&self, pick: f64) -> usize {
        let mut remaining = pick;
        for (i, &chance) in self.chances.iter().enumerate() {
            remaining -= chance;
            if remaining <= 0.0 {
                return i;
            }
        }
        self.chances.len() - 1 // floating-point fallback
    }

    /// Spins the wheel once.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        self.index_for(rng.random::<f64>())
    }

    /// Draws a full new population with replacement.
    ///
    /// Always returns exactly `population.len()` value copies.
    pub fn select<R: Rng>(&self, population: &[Candidate], rng: &mut R) -> Vec<Candidate> {
        debug_assert_eq!(population.len(), self.chances.len());
        (0..population.len())
            .map(|_| population[self.spin(rng)].clone())
            .collect()
    }
}
