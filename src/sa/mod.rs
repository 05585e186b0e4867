//! Simulated Annealing (SA).
//!
//! A single-solution trajectory search over tours. Worsening moves are
//! accepted with a logistic probability that shrinks as the temperature
//! decays geometrically, letting the search escape local optima early on
//! and settle later.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{acceptance_probability, temperature_steps, SaResult, SaRunner};
