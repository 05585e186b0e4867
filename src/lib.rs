//! Metaheuristic search for the symmetric Euclidean travelling-salesman problem.
//!
//! Two engines optimize closed tours over a fixed set of planar locations:
//!
//! - **Simulated Annealing (SA)**: Single-tour trajectory search with a
//!   logistic acceptance law, a sampled initial temperature, and geometric
//!   cooling.
//! - **Genetic Algorithm (GA)**: Generational search with roulette
//!   selection, one-point crossover with permutation repair, neighborhood
//!   mutation, and slot-wise elitism.
//!
//! Both share the same building blocks:
//!
//! - [`instance`]: Locations, the problem instance, and decoded tours
//! - [`distance`]: Precomputed pairwise Euclidean distances
//! - [`tour`]: The [`tour::Candidate`] permutation, neighborhood moves, and
//!   crossover repair
//! - [`progress`]: Per-step observer hooks for charts and logs
//! - [`params`]: Flat name/number parameter table converted into typed configs
//!
//! # Example
//!
//! ```
//! use u_tour::instance::Instance;
//! use u_tour::sa::{SaConfig, SaRunner};
//!
//! let text = "1 0 0\n2 0 1\n3 1 1\n4 1 0\n";
//! let instance = Instance::parse(text, 4).unwrap();
//! let config = SaConfig::default().with_seed(42);
//! let mut sa = SaRunner::new(instance, config).unwrap();
//! let result = sa.run().unwrap();
//! let tour = sa.instance().tour(&result.best);
//! assert_eq!(tour.ids.len(), 4);
//! ```
//!
//! # Logging
//!
//! Engines report through the [`log`] facade; install any logger to see
//! per-step and completion messages.

pub mod distance;
pub mod error;
pub mod ga;
pub mod instance;
pub mod params;
pub mod progress;
pub mod random;
pub mod sa;
pub mod tour;

pub use error::{Error, Result};
