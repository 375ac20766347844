//! Deterministic primality testing and bounded random prime search.

use tracing::{debug, instrument};

use crate::{
    error::{ConfigurationError, Result},
    random::RandomSource,
};

/// Witness set that makes Miller-Rabin exact for every 64-bit input.
const WITNESSES: [u64; 7] = [2, 325, 9_375, 28_178, 450_775, 9_780_504, 1_795_265_022];

/// Start points drawn by [`random_prime`] before it gives up.
pub const PRIME_SEARCH_ATTEMPTS: usize = 5;

/// Computes `base^exp mod modulus`.
///
/// Returns 0 when `modulus` is 1 and panics when it is 0.
#[must_use]
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    let modulus = u128::from(modulus);
    let mut base = u128::from(base) % modulus;
    let mut acc = 1 % modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }
    // Every intermediate is reduced below `modulus`, which fits in u64.
    u64::try_from(acc).unwrap_or(u64::MAX)
}

/// Deterministic Miller-Rabin test.
///
/// # Examples
/// ```
/// use stressgen_core::primes::is_prime;
///
/// assert!(is_prime(998_244_353));
/// assert!(!is_prime(561));
/// ```
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n < 3 || n % 2 == 0 {
        return n == 2;
    }
    let odd = (n - 1) >> (n - 1).trailing_zeros();
    let rounds = (n - 1).trailing_zeros();

    WITNESSES.iter().all(|&witness| {
        let witness = witness % n;
        if witness == 0 {
            return true;
        }
        let mut x = mod_pow(witness, odd, n);
        if x == 1 || x == n - 1 {
            return true;
        }
        for _ in 1..rounds {
            x = mod_pow(x, 2, n);
            if x == n - 1 {
                return true;
            }
        }
        false
    })
}

/// Random prime in `[lo, hi]`.
///
/// Draws a uniform start point and scans upwards to `hi`, retrying from a
/// fresh start point up to [`PRIME_SEARCH_ATTEMPTS`] times.
///
/// # Errors
/// Returns [`ConfigurationError::InvalidRange`] when `lo > hi` and
/// [`ConfigurationError::PrimeNotFound`] when every scan reaches `hi`
/// without finding a prime.
#[instrument(name = "primes.random", err, skip(rng))]
pub fn random_prime<R: RandomSource>(rng: &mut R, lo: i64, hi: i64) -> Result<i64> {
    if lo > hi {
        return Err(ConfigurationError::InvalidRange { lo, hi });
    }
    for attempt in 1..=PRIME_SEARCH_ATTEMPTS {
        let start = rng.next_int(lo, hi);
        let found = (start.max(2)..=hi).find(|&candidate| is_prime(candidate.unsigned_abs()));
        if let Some(prime) = found {
            debug!(attempt, prime, "prime found");
            return Ok(prime);
        }
    }
    Err(ConfigurationError::PrimeNotFound {
        lo,
        hi,
        attempts: PRIME_SEARCH_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, false)]
    #[case(2, true)]
    #[case(3, true)]
    #[case(4, false)]
    #[case(97, true)]
    #[case(561, false)]
    #[case(1_000_000_007, true)]
    #[case(3_215_031_751, false)]
    #[case(18_446_744_073_709_551_557, true)]
    #[case(18_446_744_073_709_551_615, false)]
    fn is_prime_matches_known_values(#[case] n: u64, #[case] expected: bool) {
        assert_eq!(is_prime(n), expected);
    }

    #[test]
    fn is_prime_agrees_with_trial_division() {
        let trial = |n: u64| n >= 2 && (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0);
        for n in 0..5_000 {
            assert_eq!(is_prime(n), trial(n), "disagreement at {n}");
        }
    }

    #[rstest]
    #[case(2, 10, 1_000, 24)]
    #[case(7, 3, 11, 2)]
    #[case(5, 0, 13, 1)]
    #[case(4, 5, 1, 0)]
    fn mod_pow_reduces(
        #[case] base: u64,
        #[case] exp: u64,
        #[case] modulus: u64,
        #[case] expected: u64,
    ) {
        assert_eq!(mod_pow(base, exp, modulus), expected);
    }

    #[test]
    fn random_prime_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(19);
        for _ in 0..100 {
            let prime = random_prime(&mut rng, 100, 1_000).expect("range holds primes");
            assert!((100..=1_000).contains(&prime));
            assert!(is_prime(prime.unsigned_abs()));
        }
    }

    #[test]
    fn random_prime_reports_empty_search() {
        let mut rng = SmallRng::seed_from_u64(23);
        assert_eq!(
            random_prime(&mut rng, 24, 28),
            Err(ConfigurationError::PrimeNotFound {
                lo: 24,
                hi: 28,
                attempts: PRIME_SEARCH_ATTEMPTS,
            })
        );
    }

    #[test]
    fn random_prime_rejects_inverted_range() {
        let mut rng = SmallRng::seed_from_u64(29);
        assert_eq!(
            random_prime(&mut rng, 10, 2),
            Err(ConfigurationError::InvalidRange { lo: 10, hi: 2 })
        );
    }
}
