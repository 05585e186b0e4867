//! Tour representation and the variation operators shared by both engines.
//!
//! - [`Candidate`]: a permutation with its cached length
//! - [`operators`]: in-place neighborhood moves (swap, reverse, rotate)
//! - [`crossover`]: one-point suffix exchange with permutation repair

mod candidate;
pub mod crossover;
pub mod operators;

pub use candidate::Candidate;
pub use operators::{perturb, Move};
