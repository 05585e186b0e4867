//! One-point crossover with two-pointer permutation repair.
//!
//! # Algorithm
//!
//! 1. Pick a cut `k` uniformly in `[1, n - 2]`
//! 2. Exchange the suffixes `[k, n)` of both parents. Each child now
//!    generally holds some values twice and misses others.
//! 3. Scan both children with independent indices, each with its own
//!    `seen` set. Advance the first child's index while it points at an
//!    unseen value, otherwise advance the second's. When both point at
//!    values already seen in their own child, exchange those two values
//!    and advance both.
//!
//! Every value occurs exactly twice across the two children, so a value
//! repeated in one child is absent from the other. Step 3 therefore always
//! swaps a second occurrence in one child for a value the other child is
//! missing, and both children end as permutations.

use super::candidate::Candidate;
use crate::distance::DistanceMatrix;
use rand::Rng;

/// Recombines `a` and `b` in place at a random cut.
///
/// Returns the cut used, or `None` when tours are too short to cut
/// (fewer than three locations), in which case both are left untouched.
pub fn crossover<R: Rng>(
    a: &mut Candidate,
    b: &mut Candidate,
    matrix: &DistanceMatrix,
    rng: &mut R,
) -> Option<usize> {
    let n = a.len();
    assert_eq!(n, b.len(), "parents must have equal length");
    if n < 3 {
        return None;
    }
    let cut = rng.random_range(1..=n - 2);
    crossover_at(a, b, cut, matrix);
    Some(cut)
}

/// Recombines `a` and `b` in place at a fixed cut and recomputes both costs.
///
/// # Panics
/// Panics if the parents differ in length or `cut` is outside `1..len`.
pub fn crossover_at(a: &mut Candidate, b: &mut Candidate, cut: usize, matrix: &DistanceMatrix) {
    exchange_and_repair(a.order_mut(), b.order_mut(), cut);
    a.recompute_cost(matrix);
    b.recompute_cost(matrix);
}

/// Exchanges the suffixes `[cut, n)` of two permutations of `0..n`, then
/// repairs both back into permutations.
///
/// # Panics
/// Panics if the slices differ in length or `cut` is outside `1..n`.
pub fn exchange_and_repair(a: &mut [usize], b: &mut [usize], cut: usize) {
    let n = a.len();
    assert_eq!(n, b.len(), "parents must have equal length");
    assert!(cut >= 1 && cut < n, "cut {cut} outside 1..{n}");

    a[cut..].swap_with_slice(&mut b[cut..]);

    let mut seen_a = vec![false; n];
    let mut seen_b = vec![false; n];
    let (mut i, mut j) = (0, 0);

    while i < n || j < n {
        if i < n && !seen_a[a[i]] {
            seen_a[a[i]] = true;
            i += 1;
        } else if j < n && !seen_b[b[j]] {
            seen_b[b[j]] = true;
            j += 1;
        } else {
            // One child fully scanned means it is a permutation, which
            // forces the other to be one too; a stall needs both indices.
            assert!(i < n && j < n, "crossover repair stalled at ({i}, {j})");
            std::mem::swap(&mut a[i], &mut b[j]);
            seen_a[a[i]] = true;
            seen_b[b[j]] = true;
            i += 1;
            j += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Location;
    use crate::random::create_rng;
    use crate::tour::candidate::check_permutation;

    /// All permutations of `0..n` (Heap's algorithm).
    fn permutations(n: usize) -> Vec<Vec<usize>> {
        fn heap(k: usize, perm: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
            if k <= 1 {
                out.push(perm.clone());
                return;
            }
            for i in 0..k {
                heap(k - 1, perm, out);
                if k % 2 == 0 {
                    perm.swap(i, k - 1);
                } else {
                    perm.swap(0, k - 1);
                }
            }
        }
        let mut perm: Vec<usize> = (0..n).collect();
        let mut out = Vec::new();
        heap(n, &mut perm, &mut out);
        out
    }

    #[test]
    fn test_permutation_helper() {
        assert_eq!(permutations(4).len(), 24);
        assert_eq!(permutations(5).len(), 120);
    }

    #[test]
    fn test_repair_exhaustive_small() {
        for n in 3..=5 {
            let perms = permutations(n);
            for p in &perms {
                for q in &perms {
                    for cut in 1..=n - 2 {
                        let mut a = p.clone();
                        let mut b = q.clone();
                        exchange_and_repair(&mut a, &mut b, cut);
                        assert!(
                            check_permutation(&a, n).is_ok() && check_permutation(&b, n).is_ok(),
                            "repair failed for {p:?} x {q:?} at cut {cut}: {a:?} / {b:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_repair_example() {
        let mut a = vec![0, 1, 2, 3, 4];
        let mut b = vec![1, 3, 0, 4, 2];
        exchange_and_repair(&mut a, &mut b, 2);
        // after the exchange: a = [0, 1, 0, 4, 2], b = [1, 3, 2, 3, 4]
        assert_eq!(a, vec![0, 1, 3, 4, 2]);
        assert_eq!(b, vec![1, 3, 2, 0, 4]);
    }

    #[test]
    fn test_identical_parents_unchanged() {
        let p = vec![3, 0, 4, 1, 2];
        for cut in 1..=3 {
            let mut a = p.clone();
            let mut b = p.clone();
            exchange_and_repair(&mut a, &mut b, cut);
            assert_eq!(a, p);
            assert_eq!(b, p);
        }
    }

    #[test]
    fn test_crossover_updates_costs() {
        let locations: Vec<Location> = (0..15)
            .map(|i| Location::new(i + 1, (i * 3 % 11) as f64, (i * 5 % 13) as f64))
            .collect();
        let dm = DistanceMatrix::from_locations(&locations).unwrap();
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let mut a = Candidate::random(&dm, &mut rng);
            let mut b = Candidate::random(&dm, &mut rng);
            let cut = crossover(&mut a, &mut b, &dm, &mut rng).unwrap();
            assert!((1..=13).contains(&cut));
            a.check_invariants(&dm).unwrap();
            b.check_invariants(&dm).unwrap();
        }
    }

    #[test]
    fn test_crossover_too_short() {
        let dm = DistanceMatrix::from_locations(&[
            Location::new(1, 0.0, 0.0),
            Location::new(2, 1.0, 0.0),
        ])
        .unwrap();
        let mut rng = create_rng(42);
        let mut a = Candidate::from_order(vec![0, 1], &dm).unwrap();
        let mut b = Candidate::from_order(vec![1, 0], &dm).unwrap();
        assert_eq!(crossover(&mut a, &mut b, &dm, &mut rng), None);
        assert_eq!(a.order(), &[0, 1]);
    }
}
