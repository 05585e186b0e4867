//! Neighborhood moves on tours.
//!
//! A single perturbation primitive shared by the annealing trajectory and
//! the GA mutation pass. Two positions `i <= j` are drawn uniformly from
//! `0..n`; if they coincide nothing happens. Otherwise one of three moves is
//! chosen uniformly:
//!
//! - [`Move::Swap`]: exchange positions `i` and `j`, O(1)
//! - [`Move::Reverse`]: reverse the closed segment `[i, j]` (2-opt), O(j - i)
//! - [`Move::Rotate`]: rotate `[i, j]` right by one, so the element at `j`
//!   moves to `i`, O(j - i). Skipped when `j` is the last position.
//!
//! The candidate's cost is recomputed in full, O(n), after a move that
//! changed the tour.
//!
//! # References
//!
//! - Lin (1965), "Computer Solutions of the Traveling Salesman Problem"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use super::candidate::Candidate;
use crate::distance::DistanceMatrix;
use rand::Rng;

/// The three move variants of the neighborhood operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Exchange two positions.
    Swap,
    /// Reverse a closed segment.
    Reverse,
    /// Rotate a closed segment right by one.
    Rotate,
}

impl Move {
    /// All variants, in selection order.
    pub const ALL: [Move; 3] = [Move::Swap, Move::Reverse, Move::Rotate];

    /// Applies this move to positions `i <= j` of `order`.
    ///
    /// Returns `false` (leaving `order` untouched) when the move is a no-op:
    /// `i == j`, or a rotation ending at the last position.
    ///
    /// # Panics
    /// Panics if `i > j` or `j >= order.len()`.
    pub fn apply(self, order: &mut [usize], i: usize, j: usize) -> bool {
        assert!(i <= j && j < order.len(), "invalid segment [{i}, {j}]");
        if i == j {
            return false;
        }
        match self {
            Move::Swap => order.swap(i, j),
            Move::Reverse => order[i..=j].reverse(),
            Move::Rotate => {
                if j == order.len() - 1 {
                    return false;
                }
                order[i..=j].rotate_right(1);
            }
        }
        true
    }
}

/// Perturbs `candidate` in place with one random neighborhood move.
///
/// Returns the move that changed the tour, or `None` for a no-op draw.
/// The cached cost is up to date on return either way.
pub fn perturb<R: Rng>(
    candidate: &mut Candidate,
    matrix: &DistanceMatrix,
    rng: &mut R,
) -> Option<Move> {
    let n = candidate.len();
    if n < 2 {
        return None;
    }
    let (i, j) = random_positions(n, rng);
    if i == j {
        return None;
    }
    let mv = Move::ALL[rng.random_range(0..Move::ALL.len())];
    if !mv.apply(candidate.order_mut(), i, j) {
        return None;
    }
    candidate.recompute_cost(matrix);
    Some(mv)
}

/// Draws two positions in `0..n`, ordered so that the first is not larger.
fn random_positions<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
