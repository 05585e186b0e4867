//! Dense distance matrix.

use crate::error::{Error, Result};
use crate::instance::Location;

/// Value stored on the diagonal.
///
/// No closed tour connects a location to itself, so this entry is never
/// part of a tour cost. Debug builds assert that it is not read.
pub const DIAGONAL_SENTINEL: f64 = f64::INFINITY;

/// A dense n×n Euclidean distance matrix stored in row-major order.
///
/// Built once from the loaded locations and read-only afterwards.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::instance::Location;
///
/// let locations = vec![
///     Location::new(1, 0.0, 0.0),
///     Location::new(2, 3.0, 4.0),
///     Location::new(3, 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations).unwrap();
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the pairwise Euclidean distances between `locations`.
    ///
    /// Fails with [`Error::InvalidConfig`] for fewer than two locations.
    pub fn from_locations(locations: &[Location]) -> Result<Self> {
        let n = locations.len();
        if n < 2 {
            return Err(Error::InvalidConfig(format!(
                "a tour needs at least 2 locations, got {n}"
            )));
        }

        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = DIAGONAL_SENTINEL;
            for j in (i + 1)..n {
                let d = locations[i].distance_to(&locations[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Ok(Self { data, size: n })
    }

    /// Returns the distance between two distinct locations.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds. Debug builds also panic
    /// when `from == to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        debug_assert_ne!(from, to, "diagonal entry of the distance matrix read");
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total length of the closed tour visiting `order` and returning to
    /// its first location.
    ///
    /// `order` must hold `size()` distinct indices.
    pub fn tour_cost(&self, order: &[usize]) -> f64 {
        debug_assert_eq!(order.len(), self.size, "tour length mismatch");
        let open: f64 = order.windows(2).map(|w| self.get(w[0], w[1])).sum();
        match (order.first(), order.last()) {
            (Some(&first), Some(&last)) if order.len() > 1 => open + self.get(last, first),
            _ => open,
        }
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
