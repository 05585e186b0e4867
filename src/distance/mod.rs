//! Pairwise distances between locations.

mod matrix;

pub use matrix::{DistanceMatrix, DIAGONAL_SENTINEL};
