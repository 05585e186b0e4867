//! Problem instances: locations, their distance matrix, and reported tours.

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::tour::Candidate;
use rand::Rng;
use std::collections::HashSet;

/// A location to visit: an external identifier and a planar coordinate.
///
/// # Examples
///
/// ```
/// use u_tour::instance::Location;
///
/// let a = Location::new(1, 0.0, 0.0);
/// let b = Location::new(2, 3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    id: usize,
    x: f64,
    y: f64,
}

impl Location {
    /// Creates a location.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// External identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A validated problem instance.
///
/// Holds the loaded locations and the distance matrix built from them.
/// Tour positions refer to locations by index into [`locations`](Self::locations).
#[derive(Debug, Clone)]
pub struct Instance {
    locations: Vec<Location>,
    matrix: DistanceMatrix,
}

impl Instance {
    /// Builds an instance from exactly `dimension` locations.
    ///
    /// Fails with [`Error::LocationCount`] if the record count differs from
    /// the configured dimension.
    pub fn new(locations: Vec<Location>, dimension: usize) -> Result<Self> {
        if locations.len() != dimension {
            return Err(Error::LocationCount {
                expected: dimension,
                actual: locations.len(),
            });
        }
        if let Some(bad) = locations
            .iter()
            .find(|l| !l.x.is_finite() || !l.y.is_finite())
        {
            return Err(Error::InvalidConfig(format!(
                "location {} has a non-finite coordinate",
                bad.id
            )));
        }
        let matrix = DistanceMatrix::from_locations(&locations)?;
        Ok(Self { locations, matrix })
    }

    /// Parses whitespace-separated `id x y` records, one per line.
    ///
    /// Blank lines are skipped. The number of records must equal `dimension`,
    /// and identifiers must be unique.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tour::instance::Instance;
    ///
    /// let text = "1 0 0\n2 0 1\n3 1 1\n4 1 0\n";
    /// let instance = Instance::parse(text, 4).unwrap();
    /// assert_eq!(instance.dimension(), 4);
    /// assert!(Instance::parse(text, 5).is_err());
    /// ```
    pub fn parse(text: &str, dimension: usize) -> Result<Self> {
        let mut locations = Vec::with_capacity(dimension);
        let mut seen_ids = HashSet::with_capacity(dimension);
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let mut fields = line.split_whitespace();
            let Some(id) = fields.next() else {
                continue;
            };
            let malformed = |reason: String| Error::MalformedRecord {
                line: line_no,
                reason,
            };
            let id: usize = id
                .parse()
                .map_err(|_| malformed(format!("invalid identifier `{id}`")))?;
            let mut coord = |axis: &str| -> Result<f64> {
                let raw = fields
                    .next()
                    .ok_or_else(|| malformed(format!("missing {axis} coordinate")))?;
                raw.parse::<f64>()
                    .map_err(|_| malformed(format!("invalid {axis} coordinate `{raw}`")))
            };
            let x = coord("x")?;
            let y = coord("y")?;
            if let Some(extra) = fields.next() {
                return Err(malformed(format!("unexpected field `{extra}` after coordinates")));
            }
            if !seen_ids.insert(id) {
                return Err(malformed(format!("duplicate identifier {id}")));
            }
            locations.push(Location::new(id, x, y));
        }
        Self::new(locations, dimension)
    }

    /// Generates `dimension` locations uniformly inside the square
    /// `[low, high) × [low, high)`, identified `1..=dimension`.
    pub fn random<R: Rng>(dimension: usize, low: f64, high: f64, rng: &mut R) -> Result<Self> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(Error::InvalidConfig(format!(
                "bounding box [{low}, {high}) is empty"
            )));
        }
        let locations = (1..=dimension)
            .map(|id| {
                Location::new(
                    id,
                    rng.random_range(low..high),
                    rng.random_range(low..high),
                )
            })
            .collect();
        Self::new(locations, dimension)
    }

    /// Number of locations.
    pub fn dimension(&self) -> usize {
        self.locations.len()
    }

    /// The loaded locations, in load order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The distance matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Translates a candidate into external identifiers.
    pub fn tour(&self, candidate: &Candidate) -> Tour {
        Tour {
            ids: candidate
                .order()
                .iter()
                .map(|&i| self.locations[i].id)
                .collect(),
            cost: candidate.cost(),
        }
    }
}

/// A reported tour: location identifiers in visiting order and total length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    /// Location identifiers in visiting order. The tour closes back to the first.
    pub ids: Vec<usize>,
    /// Total length including the closing edge.
    pub cost: f64,
}

impl Tour {
    /// Relative gap `(cost - reference) / reference` against a known optimum.
    ///
    /// Returns `None` if `reference` is not a positive finite number.
    pub fn relative_gap(&self, reference: f64) -> Option<f64> {
        if reference.is_finite() && reference > 0.0 {
            Some((self.cost - reference) / reference)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_count_mismatch_fails() {
        let locations = vec![Location::new(1, 0.0, 0.0), Location::new(2, 1.0, 0.0)];
        let err = Instance::new(locations, 3).unwrap_err();
        assert_eq!(
            err,
            Error::LocationCount {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_parse_short_input() {
        let err = Instance::parse("1 0 0\n2 1 1\n", 130).unwrap_err();
        assert!(matches!(
            err,
            Error::LocationCount {
                expected: 130,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_parse_malformed() {
        let err = Instance::parse("1 0 0\n2 abc 1\n", 2).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 2, .. }));

        let err = Instance::parse("1 0\n", 1).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_extra_fields() {
        let err = Instance::parse("1 0 0\n2 0 1 7\n3 1 1\n", 3).unwrap_err();
        assert!(
            matches!(err, Error::MalformedRecord { line: 2, .. }),
            "expected line 2 to be rejected, got {err:?}"
        );
    }

    #[test]
    fn test_parse_rejects_duplicate_ids() {
        let err = Instance::parse("1 0 0\n2 0 1\n1 1 1\n", 3).unwrap_err();
        assert!(
            matches!(err, Error::MalformedRecord { line: 3, .. }),
            "expected line 3 to be rejected, got {err:?}"
        );
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let text = "\n1 0 0\n\n2 3 4\n   \n3 6 8\n";
        let instance = Instance::parse(text, 3).unwrap();
        assert_eq!(instance.locations()[2].id(), 3);
        assert!((instance.matrix().get(0, 1) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let locations = vec![Location::new(1, 0.0, 0.0), Location::new(2, f64::NAN, 0.0)];
        assert!(matches!(
            Instance::new(locations, 2),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_random_within_bounds() {
        let mut rng = create_rng(42);
        let instance = Instance::random(50, -100.0, 100.0, &mut rng).unwrap();
        assert_eq!(instance.dimension(), 50);
        for loc in instance.locations() {
            assert!((-100.0..100.0).contains(&loc.x()));
            assert!((-100.0..100.0).contains(&loc.y()));
        }
    }

    #[test]
    fn test_random_empty_box() {
        let mut rng = create_rng(42);
        assert!(Instance::random(10, 5.0, 5.0, &mut rng).is_err());
    }

    #[test]
    fn test_tour_maps_ids() {
        let locations = vec![
            Location::new(10, 0.0, 0.0),
            Location::new(20, 0.0, 1.0),
            Location::new(30, 1.0, 1.0),
        ];
        let instance = Instance::new(locations, 3).unwrap();
        let candidate = Candidate::from_order(vec![2, 0, 1], instance.matrix()).unwrap();
        let tour = instance.tour(&candidate);
        assert_eq!(tour.ids, vec![30, 10, 20]);
        assert!((tour.cost - candidate.cost()).abs() < 1e-12);
    }

    #[test]
    fn test_relative_gap() {
        let tour = Tour {
            ids: vec![1, 2, 3],
            cost: 6721.0,
        };
        let gap = tour.relative_gap(6110.0).unwrap();
        assert!((gap - 0.1).abs() < 1e-12);
        assert!(tour.relative_gap(0.0).is_none());
    }
}
