//! Tour candidates.

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

/// A closed tour over all locations, with its cached length.
///
/// The order is a permutation of `0..n` indexing into the instance's
/// locations. The cached cost always equals
/// [`DistanceMatrix::tour_cost`] of the order: every mutation in this
/// crate goes through an operator that recomputes it.
///
/// Cloning copies the whole order. Snapshots never share storage with
/// the live candidate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    order: Vec<usize>,
    cost: f64,
}

impl Candidate {
    /// Creates a uniformly random tour.
    pub fn random<R: Rng>(matrix: &DistanceMatrix, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..matrix.size()).collect();
        order.shuffle(rng);
        let cost = matrix.tour_cost(&order);
        Self { order, cost }
    }

    /// Creates a candidate from an explicit visiting order.
    ///
    /// Fails with [`Error::InvariantViolation`] unless `order` is a
    /// permutation of `0..matrix.size()`.
    pub fn from_order(order: Vec<usize>, matrix: &DistanceMatrix) -> Result<Self> {
        check_permutation(&order, matrix.size())?;
        let cost = matrix.tour_cost(&order);
        Ok(Self { order, cost })
    }

    /// Visiting order as location indices.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Cached tour length.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of locations in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` for a tour with no locations.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total order by ascending cost.
    pub fn cmp_cost(&self, other: &Candidate) -> Ordering {
        self.cost.total_cmp(&other.cost)
    }

    /// Strict improvement test.
    pub fn is_better_than(&self, other: &Candidate) -> bool {
        self.cost < other.cost
    }

    /// Returns `true` if the order is a permutation of `0..len`.
    pub fn is_permutation(&self) -> bool {
        check_permutation(&self.order, self.order.len()).is_ok()
    }

    /// Verifies the permutation invariant and that the cached cost matches
    /// a fresh recomputation.
    pub fn check_invariants(&self, matrix: &DistanceMatrix) -> Result<()> {
        check_permutation(&self.order, matrix.size())?;
        let fresh = matrix.tour_cost(&self.order);
        if (fresh - self.cost).abs() > 1e-9 * fresh.abs().max(1.0) {
            return Err(Error::InvariantViolation(format!(
                "cached cost {} differs from recomputed cost {fresh}",
                self.cost
            )));
        }
        Ok(())
    }

    /// Mutable access for operators. Callers must restore the permutation
    /// and call [`recompute_cost`](Self::recompute_cost) before returning.
    pub(crate) fn order_mut(&mut self) -> &mut [usize] {
        &mut self.order
    }

    pub(crate) fn recompute_cost(&mut self, matrix: &DistanceMatrix) {
        debug_assert!(self.is_permutation(), "tour is not a permutation: {:?}", self.order);
        self.cost = matrix.tour_cost(&self.order);
    }
}

/// Checks that `order` is a permutation of `0..n`.
pub(crate) fn check_permutation(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(Error::InvariantViolation(format!(
            "expected {n} locations, got {}",
            order.len()
        )));
    }
    let mut seen = vec![false; n];
    for &v in order {
        if v >= n {
            return Err(Error::InvariantViolation(format!(
                "location index {v} out of range 0..{n}"
            )));
        }
        if seen[v] {
            return Err(Error::InvariantViolation(format!(
                "location index {v} visited twice"
            )));
        }
        seen[v] = true;
    }
    Ok(())
}
