//! Genetic Algorithm over closed tours.
//!
//! A generational GA with fitness-proportionate selection, one-point
//! crossover with permutation repair, neighborhood-move mutation, and
//! slot-wise elitism against the previous generation.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population size, generation count, operator rates
//! - [`GaRunner`]: Executes the generational loop
//! - [`GaResult`]: Best tour found with run statistics
//! - [`RouletteWheel`]: Inverse-cost selection with a uniform fallback
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod selection;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::RouletteWheel;
