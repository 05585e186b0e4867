//! Property tests: every operator keeps tours valid permutations with a
//! consistent cached cost.

use proptest::prelude::*;
use u_tour::distance::DistanceMatrix;
use u_tour::ga::RouletteWheel;
use u_tour::instance::Instance;
use u_tour::random::create_rng;
use u_tour::tour::crossover::{crossover, exchange_and_repair};
use u_tour::tour::{perturb, Candidate};

fn is_permutation(order: &[usize]) -> bool {
    let mut seen = vec![false; order.len()];
    order.iter().all(|&v| v < seen.len() && !std::mem::replace(&mut seen[v], true))
}

fn shuffled(n: usize) -> impl Strategy<Value = Vec<usize>> {
    Just((0..n).collect::<Vec<usize>>()).prop_shuffle()
}

/// Two independent permutations of the same length.
fn parent_pair() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    (2usize..=40).prop_flat_map(|n| (shuffled(n), shuffled(n)))
}

fn random_matrix(n: usize, seed: u64) -> DistanceMatrix {
    let mut rng = create_rng(seed);
    Instance::random(n, -100.0, 100.0, &mut rng)
        .unwrap()
        .matrix()
        .clone()
}

proptest! {
    #[test]
    fn repair_yields_permutations_at_every_cut((a, b) in parent_pair()) {
        let n = a.len();
        for cut in 1..n {
            let (mut x, mut y) = (a.clone(), b.clone());
            exchange_and_repair(&mut x, &mut y, cut);
            prop_assert!(is_permutation(&x), "child a {:?} at cut {}", x, cut);
            prop_assert!(is_permutation(&y), "child b {:?} at cut {}", y, cut);
            prop_assert_eq!(&x[..cut], &a[..cut]);
            prop_assert_eq!(&y[..cut], &b[..cut]);
        }
    }

    #[test]
    fn perturb_keeps_invariants(n in 2usize..=40, seed in any::<u64>(), moves in 1usize..50) {
        let matrix = random_matrix(n, seed);
        let mut rng = create_rng(seed.wrapping_add(1));
        let mut candidate = Candidate::random(&matrix, &mut rng);
        for _ in 0..moves {
            perturb(&mut candidate, &matrix, &mut rng);
            prop_assert!(candidate.check_invariants(&matrix).is_ok());
        }
    }

    #[test]
    fn crossover_keeps_invariants(n in 3usize..=40, seed in any::<u64>()) {
        let matrix = random_matrix(n, seed);
        let mut rng = create_rng(seed.wrapping_add(1));
        let mut a = Candidate::random(&matrix, &mut rng);
        let mut b = Candidate::random(&matrix, &mut rng);
        let cut = crossover(&mut a, &mut b, &matrix, &mut rng);
        prop_assert!(cut.is_some_and(|c| (1..n - 1).contains(&c)));
        prop_assert!(a.check_invariants(&matrix).is_ok());
        prop_assert!(b.check_invariants(&matrix).is_ok());
    }

    #[test]
    fn roulette_always_selects_in_range(
        costs in prop::collection::vec(0.001f64..1e6, 1..60),
        pick in 0.0f64..1.0,
    ) {
        let wheel = RouletteWheel::from_costs(&costs);
        let total: f64 = wheel.chances().iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(wheel.index_for(pick) < costs.len());
    }
}
