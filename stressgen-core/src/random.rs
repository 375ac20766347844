//! Random source abstraction consumed by every generator.
//!
//! Generators never reach for a global RNG. Each generation call takes an
//! explicit `&mut R` where `R: RandomSource`, so a harness seeds one source at
//! startup and every run is replayable from that seed. Any [`rand::Rng`] is a
//! [`RandomSource`]; tests use a seeded [`rand::rngs::SmallRng`].

use rand::Rng;

/// Bounded draws, skewed draws and permutations used by the generators.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use stressgen_core::RandomSource;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let value = rng.next_int(-3, 3);
/// assert!((-3..=3).contains(&value));
///
/// let perm = rng.random_permutation(5);
/// let mut sorted = perm.clone();
/// sorted.sort_unstable();
/// assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
/// ```
pub trait RandomSource {
    /// Uniform integer in the closed range `[lo, hi]`.
    ///
    /// # Panics
    /// Panics if `lo > hi`; generators validate ranges before drawing.
    fn next_int(&mut self, lo: i64, hi: i64) -> i64;

    /// Uniform index in the half-open range `[0, upper)`.
    ///
    /// # Panics
    /// Panics if `upper == 0`.
    fn next_index(&mut self, upper: usize) -> usize;

    /// Uniform real in `[lo, hi)`. Returns `lo` when the range is empty.
    fn next_real(&mut self, lo: f64, hi: f64) -> f64;

    /// Real in `[lo, hi)` skewed by `bias`.
    ///
    /// A positive bias returns the maximum of `bias + 1` uniform draws, a
    /// negative bias the minimum of `-bias + 1` draws, and zero a plain
    /// uniform draw. Larger magnitudes push results towards the matching end
    /// of the range.
    fn weighted_next(&mut self, lo: f64, hi: f64, bias: i32) -> f64 {
        let draws = bias.unsigned_abs() as usize + 1;
        let mut picked = self.next_real(0.0, 1.0);
        for _ in 1..draws {
            let draw = self.next_real(0.0, 1.0);
            picked = if bias > 0 {
                picked.max(draw)
            } else {
                picked.min(draw)
            };
        }
        lo + (hi - lo) * picked
    }

    /// Uniform permutation of `0..n`.
    fn random_permutation(&mut self, n: usize) -> Vec<usize>
    where
        Self: Sized,
    {
        let mut values: Vec<usize> = (0..n).collect();
        self.shuffle(&mut values);
        values
    }

    /// Fisher-Yates shuffle of `items` in place.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for idx in (1..items.len()).rev() {
            let other = self.next_index(idx + 1);
            items.swap(idx, other);
        }
    }

    /// Uniformly chosen element of `items`, or `None` when it is empty.
    fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_index(items.len()))
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_int(&mut self, lo: i64, hi: i64) -> i64 {
        self.gen_range(lo..=hi)
    }

    fn next_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }

    fn next_real(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.gen_range(lo..hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(-5, 5)]
    #[case(10, 12)]
    fn next_int_stays_in_closed_range(#[case] lo: i64, #[case] hi: i64) {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let value = rng.next_int(lo, hi);
            assert!((lo..=hi).contains(&value));
        }
    }

    #[test]
    fn next_real_returns_lower_bound_for_empty_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert!((rng.next_real(0.25, 0.25) - 0.25).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(2)]
    #[case(-2)]
    #[case(0)]
    fn weighted_next_stays_in_range(#[case] bias: i32) {
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..200 {
            let value = rng.weighted_next(1.0, 3.0, bias);
            assert!((1.0..3.0).contains(&value));
        }
    }

    #[test]
    fn weighted_next_skews_towards_upper_end_for_positive_bias() {
        let mut rng = SmallRng::seed_from_u64(17);
        let rounds = 2_000;
        let high: f64 = (0..rounds).map(|_| rng.weighted_next(0.0, 1.0, 2)).sum();
        let low: f64 = (0..rounds).map(|_| rng.weighted_next(0.0, 1.0, -2)).sum();
        // Expected means are 3/4 and 1/4.
        assert!(high / f64::from(rounds) > 0.65);
        assert!(low / f64::from(rounds) < 0.35);
    }

    #[test]
    fn random_permutation_covers_every_index_once() {
        let mut rng = SmallRng::seed_from_u64(23);
        let mut perm = rng.random_permutation(64);
        perm.sort_unstable();
        assert_eq!(perm, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn choice_handles_empty_and_non_empty_slices() {
        let mut rng = SmallRng::seed_from_u64(29);
        let empty: [u8; 0] = [];
        assert!(rng.choice(&empty).is_none());
        let items = [4, 8, 15];
        let picked = rng.choice(&items).copied();
        assert!(picked.is_some_and(|value| items.contains(&value)));
    }
}
