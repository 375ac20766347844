//! Fixed-sum construction by differencing cut points.

use crate::{
    error::{ConfigurationError, Result},
    random::RandomSource,
};

use super::to_i64;

/// Sign and zero constraints on the entries of a fixed-sum sequence.
#[derive(Clone, Copy, Debug)]
pub(super) struct SumDomain {
    pub(super) accept_zero: bool,
    pub(super) accept_negative: bool,
}

pub(super) fn build<R: RandomSource>(
    rng: &mut R,
    len: usize,
    sum: i64,
    domain: SumDomain,
) -> Result<Vec<i64>> {
    let infeasible = || ConfigurationError::InfeasibleSum {
        sum,
        size: len,
        accept_zero: domain.accept_zero,
        accept_negative: domain.accept_negative,
    };

    let shift = if domain.accept_zero { 0 } else { to_i64(len) };
    let target = sum.checked_sub(shift).ok_or_else(infeasible)?;
    if !domain.accept_negative && target < 0 {
        return Err(infeasible());
    }
    if domain.accept_negative && !domain.accept_zero && len == 1 && sum == 0 {
        return Err(infeasible());
    }

    let mut cuts = draw_cuts(rng, len, target.min(0), target.max(0));
    if !domain.accept_negative {
        cuts.sort_unstable();
    }
    cuts.push(target);
    difference_in_place(&mut cuts);

    if !domain.accept_zero {
        for value in &mut cuts {
            *value += 1;
        }
        if domain.accept_negative {
            repair_zeros(&mut cuts);
        }
    }
    Ok(cuts)
}

/// Zero-sum signed noise of length `len` with cut points in
/// `[-amplitude, amplitude]`.
pub(super) fn zero_sum_noise<R: RandomSource>(rng: &mut R, len: usize, amplitude: i64) -> Vec<i64> {
    if len == 0 {
        return Vec::new();
    }
    let mut cuts = draw_cuts(rng, len, -amplitude, amplitude);
    cuts.push(0);
    difference_in_place(&mut cuts);
    cuts
}

pub(super) fn difference_in_place(values: &mut [i64]) {
    for idx in (1..values.len()).rev() {
        values[idx] = values[idx].wrapping_sub(values[idx - 1]);
    }
}

/// Draws the `len - 1` interior cut points.
fn draw_cuts<R: RandomSource>(rng: &mut R, len: usize, lo: i64, hi: i64) -> Vec<i64> {
    let mut cuts = Vec::with_capacity(len);
    for _ in 1..len {
        cuts.push(rng.next_int(lo, hi));
    }
    cuts
}

/// Removes zero entries from a signed sequence without changing its sum.
///
/// Zeros are paired into `1, -1`. A single leftover zero is split against a
/// non-zero entry `e`, becoming `e + 1` (or `-2` when `e == -1`) while `e`
/// becomes `-1` (or `1`). Callers guarantee at least two entries whenever a
/// zero is present.
fn repair_zeros(values: &mut [i64]) {
    let zeros: Vec<usize> = values
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| (*value == 0).then_some(idx))
        .collect();

    let mut pairs = zeros.chunks_exact(2);
    for pair in pairs.by_ref() {
        values[pair[0]] = 1;
        values[pair[1]] = -1;
    }

    let Some(&lone) = pairs.remainder().first() else {
        return;
    };
    let Some(partner) = values.iter().position(|value| *value != 0) else {
        return;
    };
    let donor = values[partner];
    let moved = if donor == -1 { -2 } else { donor + 1 };
    values[lone] = moved;
    values[partner] = donor - moved;
}
