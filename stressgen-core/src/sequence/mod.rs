//! Integer sequence construction under range, order, sum and permutation
//! constraints.
//!
//! A [`SequenceBuilder`] is an initialised, validated request for `n`
//! values; each generation method consumes it and yields a [`Sequence`].

mod fixed_sum;
#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;

use tracing::{debug, instrument};

use crate::{
    error::{ConfigurationError, Result},
    random::RandomSource,
};

/// A validated request for a sequence of `len` values.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use stressgen_core::SequenceBuilder;
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let sequence = SequenceBuilder::init(5)?
///     .constant_sum(&mut rng, 10, true, false)?;
/// assert_eq!(sequence.sum(), 10);
/// assert!(sequence.as_slice().iter().all(|value| *value >= 0));
/// # Ok::<(), stressgen_core::ConfigurationError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceBuilder {
    len: NonZeroUsize,
}

impl SequenceBuilder {
    /// Validates `len` and prepares a sequence request.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidSize`] when `len` is zero.
    pub fn init(len: usize) -> Result<Self> {
        let len = NonZeroUsize::new(len).ok_or(ConfigurationError::InvalidSize { got: len })?;
        Ok(Self { len })
    }

    /// Number of values the generated sequence will hold.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// `len` independent uniform draws in `[lo, hi]`.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidRange`] when `lo > hi`.
    pub fn basic_gen<R: RandomSource>(self, rng: &mut R, lo: i64, hi: i64) -> Result<Sequence> {
        validate_range(lo, hi)?;
        let values = (0..self.len()).map(|_| rng.next_int(lo, hi)).collect();
        Ok(Sequence { values })
    }

    /// Uniform draws from `{0, 1}`.
    #[must_use]
    pub fn binary_gen<R: RandomSource>(self, rng: &mut R) -> Sequence {
        let values = (0..self.len()).map(|_| rng.next_int(0, 1)).collect();
        Sequence { values }
    }

    /// Uniform draws in `[lo, hi]` sorted into non-decreasing order.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidRange`] when `lo > hi`.
    pub fn ascending_array<R: RandomSource>(
        self,
        rng: &mut R,
        lo: i64,
        hi: i64,
    ) -> Result<Sequence> {
        let mut sequence = self.basic_gen(rng, lo, hi)?;
        sequence.sort();
        Ok(sequence)
    }

    /// Uniform draws in `[lo, hi]` sorted into non-increasing order.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidRange`] when `lo > hi`.
    pub fn descending_array<R: RandomSource>(
        self,
        rng: &mut R,
        lo: i64,
        hi: i64,
    ) -> Result<Sequence> {
        let mut sequence = self.ascending_array(rng, lo, hi)?;
        sequence.reverse();
        Ok(sequence)
    }

    /// Values summing exactly to `sum`.
    ///
    /// Draws `len - 1` cut points, appends `sum` as the final cut and takes
    /// the difference array. Without `accept_negative` the cut points are
    /// sorted first so every gap is non-negative. Without `accept_zero` the
    /// target and draw range are shifted down by `len` and one is added back
    /// to every entry afterwards.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InfeasibleSum`] when no sequence in the
    /// requested domain reaches `sum`: a negative sum without negatives, a
    /// sum below `len` when zeros and negatives are both excluded, or a
    /// single zero-free value that must equal zero.
    #[instrument(
        name = "sequence.constant_sum",
        err,
        skip(self, rng),
        fields(len = self.len()),
    )]
    pub fn constant_sum<R: RandomSource>(
        self,
        rng: &mut R,
        sum: i64,
        accept_zero: bool,
        accept_negative: bool,
    ) -> Result<Sequence> {
        let domain = fixed_sum::SumDomain {
            accept_zero,
            accept_negative,
        };
        let values = fixed_sum::build(rng, self.len(), sum, domain)?;
        debug!(len = values.len(), "fixed-sum sequence generated");
        Ok(Sequence { values })
    }

    /// Uniform permutation of `1..=len`.
    #[must_use]
    pub fn permutation<R: RandomSource>(self, rng: &mut R) -> Sequence {
        let values = rng
            .random_permutation(self.len())
            .into_iter()
            .map(|value| to_i64(value) + 1)
            .collect();
        Sequence { values }
    }

    /// Closed-form sequence: the value at index `i` is `f(i + begin)`.
    #[must_use]
    pub fn generate_function(self, mut f: impl FnMut(i64) -> i64, begin: i64) -> Sequence {
        let values = (0..self.len()).map(|idx| f(to_i64(idx) + begin)).collect();
        Sequence { values }
    }

    /// Recurrence: the first value is `begin`, each later value is `f` of
    /// its predecessor.
    #[must_use]
    pub fn generate_iterate_function(self, mut f: impl FnMut(i64) -> i64, begin: i64) -> Sequence {
        let mut values = Vec::with_capacity(self.len());
        let mut current = begin;
        values.push(current);
        for _ in 1..self.len() {
            current = f(current);
            values.push(current);
        }
        Sequence { values }
    }
}

/// A generated integer sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    values: Vec<i64>,
}

impl Sequence {
    /// Wraps existing values, e.g. to emit or perturb a hand-written sequence.
    #[must_use]
    pub fn from_values(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the values.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Consume the sequence and return its values.
    #[must_use]
    pub fn into_vec(self) -> Vec<i64> {
        self.values
    }

    /// Sum of all values, widened so it cannot overflow.
    #[must_use]
    pub fn sum(&self) -> i128 {
        self.values.iter().map(|value| i128::from(*value)).sum()
    }

    /// Sorts into non-decreasing order.
    pub fn sort(&mut self) {
        self.values.sort_unstable();
    }

    /// Reverses the order of the values.
    pub fn reverse(&mut self) {
        self.values.reverse();
    }

    /// Shuffles the values uniformly.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.values);
    }

    /// Replaces every value with its difference from the predecessor; the
    /// first value is kept. Prefix sums of the result restore the original.
    pub fn to_difference(&mut self) {
        fixed_sum::difference_in_place(&mut self.values);
    }

    /// Adds independently drawn zero-sum noise element-wise.
    ///
    /// The noise is a signed fixed-sum sequence whose cut points lie in
    /// `[-amplitude, amplitude]`, so every value moves by at most
    /// `2 * amplitude` while the total is unchanged.
    pub fn perturbe<R: RandomSource>(&mut self, rng: &mut R, amplitude: u32) {
        let noise = fixed_sum::zero_sum_noise(rng, self.values.len(), i64::from(amplitude));
        for (value, delta) in self.values.iter_mut().zip(noise) {
            *value = value.wrapping_add(delta);
        }
    }
}

fn validate_range(lo: i64, hi: i64) -> Result<()> {
    if lo > hi {
        return Err(ConfigurationError::InvalidRange { lo, hi });
    }
    Ok(())
}

pub(crate) fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
