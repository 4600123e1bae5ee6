//! DE/rand/1 mutation and binomial crossover.

use rand::seq::index;
use rand::Rng;

/// Picks `count` distinct indices from `0..pool_size`, none equal to `exclude`.
///
/// Uniform without replacement.
pub(crate) fn distinct_indices<R: Rng + ?Sized>(
    exclude: usize,
    count: usize,
    pool_size: usize,
    rng: &mut R,
) -> Vec<usize> {
    debug_assert!(exclude < pool_size);
    debug_assert!(count < pool_size);
    index::sample(rng, pool_size - 1, count)
        .into_iter()
        .map(|idx| if idx >= exclude { idx + 1 } else { idx })
        .collect()
}

/// `pop[r1] + f * (pop[r2] - pop[r3])` with three distinct donors other than `i`.
pub(crate) fn mutant_rand1<R: Rng + ?Sized>(
    i: usize,
    pop: &[Vec<f64>],
    f: f64,
    rng: &mut R,
) -> Vec<f64> {
    let idxs = distinct_indices(i, 3, pop.len(), rng);
    let (x1, x2, x3) = (&pop[idxs[0]], &pop[idxs[1]], &pop[idxs[2]]);

    x1.iter()
        .zip(x2)
        .zip(x3)
        .map(|((&a, &b), &c)| a + f * (b - c))
        .collect()
}

/// Takes each coordinate from `mutant` with probability `cr`, and always at
/// one randomly chosen position; the rest come from `target`.
pub(crate) fn binomial_crossover<R: Rng + ?Sized>(
    target: &[f64],
    mutant: &[f64],
    cr: f64,
    rng: &mut R,
) -> Vec<f64> {
    let n = target.len();
    let jrand = rng.random_range(0..n);
    target
        .iter()
        .zip(mutant)
        .enumerate()
        .map(|(j, (&t, &m))| {
            if j == jrand || rng.random::<f64>() < cr {
                m
            } else {
                t
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    #[test]
    fn test_distinct_indices_excludes_target() {
        let mut rng = create_rng(11);
        for exclude in 0..6 {
            for _ in 0..200 {
                let idxs = distinct_indices(exclude, 3, 6, &mut rng);
                assert_eq!(idxs.len(), 3);
                assert!(!idxs.contains(&exclude));
                assert!(idxs.iter().all(|&i| i < 6));
                let unique: HashSet<_> = idxs.iter().collect();
                assert_eq!(unique.len(), 3);
            }
        }
    }

    #[test]
    fn test_distinct_indices_covers_pool() {
        let mut rng = create_rng(2);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.extend(distinct_indices(0, 3, 5, &mut rng));
        }
        let expected: HashSet<usize> = (1..5).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_mutant_with_identical_donors() {
        // All donors equal: the difference vanishes and the mutant is the base.
        let pop = vec![vec![1.0, 2.0]; 5];
        let mut rng = create_rng(0);
        let m = mutant_rand1(0, &pop, 0.5, &mut rng);
        assert_eq!(m, vec![1.0, 2.0]);
    }

    #[test]
    fn test_mutant_formula() {
        // Target 0 is excluded, donors are rows 1..=3 in some order; with
        // rows (0, 10, 20, 30) every combination stays in the span.
        let pop = vec![vec![0.0], vec![10.0], vec![20.0], vec![30.0]];
        let mut rng = create_rng(4);
        for _ in 0..50 {
            let m = mutant_rand1(0, &pop, 0.5, &mut rng)[0];
            let candidates = [
                10.0 + 0.5 * (20.0 - 30.0),
                10.0 + 0.5 * (30.0 - 20.0),
                20.0 + 0.5 * (10.0 - 30.0),
                20.0 + 0.5 * (30.0 - 10.0),
                30.0 + 0.5 * (10.0 - 20.0),
                30.0 + 0.5 * (20.0 - 10.0),
            ];
            assert!(candidates.iter().any(|&c| (c - m).abs() < 1e-12), "{m}");
        }
    }

    #[test]
    fn test_crossover_rate_zero_takes_one_mutant_gene() {
        let target = vec![0.0; 8];
        let mutant = vec![1.0; 8];
        let mut rng = create_rng(5);
        for _ in 0..50 {
            let trial = binomial_crossover(&target, &mutant, 0.0, &mut rng);
            assert_eq!(trial.iter().filter(|&&x| x == 1.0).count(), 1);
        }
    }

    #[test]
    fn test_crossover_rate_one_takes_mutant() {
        let target = vec![0.0; 8];
        let mutant = vec![1.0; 8];
        let mut rng = create_rng(6);
        assert_eq!(binomial_crossover(&target, &mutant, 1.0, &mut rng), mutant);
    }
}
