//! Unit and property tests for sequence construction.

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use crate::test_utils::suite_proptest_config;
use crate::{ConfigurationError, Sequence, SequenceBuilder};

fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

#[test]
fn init_rejects_zero_length() {
    assert_eq!(
        SequenceBuilder::init(0),
        Err(ConfigurationError::InvalidSize { got: 0 })
    );
}

#[test]
fn basic_gen_rejects_empty_range() {
    let builder = SequenceBuilder::init(3).expect("length is valid");
    let err = builder
        .basic_gen(&mut rng(1), 5, 4)
        .expect_err("lo > hi must fail");
    assert_eq!(err, ConfigurationError::InvalidRange { lo: 5, hi: 4 });
}

#[rstest]
#[case(1, -10, 10)]
#[case(50, 0, 0)]
#[case(200, -3, 7)]
fn basic_gen_respects_bounds(#[case] len: usize, #[case] lo: i64, #[case] hi: i64) {
    let sequence = SequenceBuilder::init(len)
        .and_then(|builder| builder.basic_gen(&mut rng(2), lo, hi))
        .expect("valid request");
    assert_eq!(sequence.len(), len);
    assert!(sequence.as_slice().iter().all(|value| (lo..=hi).contains(value)));
}

#[test]
fn binary_gen_only_yields_bits() {
    let sequence = SequenceBuilder::init(128)
        .expect("length is valid")
        .binary_gen(&mut rng(3));
    assert!(sequence.as_slice().iter().all(|value| *value == 0 || *value == 1));
}

#[test]
fn ascending_and_descending_arrays_are_monotonic() {
    let ascending = SequenceBuilder::init(100)
        .and_then(|builder| builder.ascending_array(&mut rng(4), -50, 50))
        .expect("valid request");
    assert!(ascending.as_slice().windows(2).all(|pair| pair[0] <= pair[1]));

    let descending = SequenceBuilder::init(100)
        .and_then(|builder| builder.descending_array(&mut rng(4), -50, 50))
        .expect("valid request");
    assert!(descending.as_slice().windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn constant_sum_example_from_five_values() {
    let sequence = SequenceBuilder::init(5)
        .and_then(|builder| builder.constant_sum(&mut rng(5), 10, true, false))
        .expect("feasible request");
    assert_eq!(sequence.len(), 5);
    assert_eq!(sequence.sum(), 10);
    assert!(sequence.as_slice().iter().all(|value| *value >= 0));
}

#[rstest]
#[case::sum_below_len(5, 4, false, false)]
#[case::negative_without_negatives(3, -1, true, false)]
#[case::single_zero_free_zero(1, 0, false, true)]
fn constant_sum_rejects_infeasible_requests(
    #[case] len: usize,
    #[case] sum: i64,
    #[case] accept_zero: bool,
    #[case] accept_negative: bool,
) {
    let err = SequenceBuilder::init(len)
        .and_then(|builder| builder.constant_sum(&mut rng(6), sum, accept_zero, accept_negative))
        .expect_err("request is infeasible");
    assert_eq!(
        err,
        ConfigurationError::InfeasibleSum {
            sum,
            size: len,
            accept_zero,
            accept_negative,
        }
    );
}

#[test]
fn constant_sum_with_sum_equal_to_len_is_all_ones() {
    let sequence = SequenceBuilder::init(7)
        .and_then(|builder| builder.constant_sum(&mut rng(7), 7, false, false))
        .expect("feasible request");
    assert_eq!(sequence.as_slice(), &[1; 7]);
}

#[test]
fn permutation_contains_one_through_len() {
    let mut values = SequenceBuilder::init(40)
        .expect("length is valid")
        .permutation(&mut rng(8))
        .into_vec();
    values.sort_unstable();
    assert_eq!(values, (1..=40).collect::<Vec<i64>>());
}

#[test]
fn generate_function_evaluates_from_begin() {
    let sequence = SequenceBuilder::init(4)
        .expect("length is valid")
        .generate_function(|x| x * x, 1);
    assert_eq!(sequence.as_slice(), &[1, 4, 9, 16]);
}

#[test]
fn generate_iterate_function_applies_recurrence() {
    let sequence = SequenceBuilder::init(5)
        .expect("length is valid")
        .generate_iterate_function(|x| 2 * x + 1, 0);
    assert_eq!(sequence.as_slice(), &[0, 1, 3, 7, 15]);
}

#[test]
fn to_difference_then_prefix_sum_restores_values() {
    let original = vec![4, 4, 9, -2, 0];
    let mut sequence = Sequence::from_values(original.clone());
    sequence.to_difference();
    let restored: Vec<i64> = sequence
        .as_slice()
        .iter()
        .scan(0, |acc, value| {
            *acc += value;
            Some(*acc)
        })
        .collect();
    assert_eq!(restored, original);
}

#[test]
fn perturbe_preserves_total_and_bounds_shift() {
    let mut sequence = SequenceBuilder::init(64)
        .and_then(|builder| builder.basic_gen(&mut rng(9), 0, 100))
        .expect("valid request");
    let before = sequence.clone();
    sequence.perturbe(&mut rng(10), 5);
    assert_eq!(sequence.sum(), before.sum());
    assert!(
        sequence
            .as_slice()
            .iter()
            .zip(before.as_slice())
            .all(|(after, original)| (after - original).abs() <= 10)
    );
    assert_ne!(sequence, before, "seeded noise should move at least one value");
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn constant_sum_meets_postconditions(
        len in 1_usize..64,
        sum in -500_i64..500,
        accept_zero in any::<bool>(),
        accept_negative in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let len_i64 = i64::try_from(len).expect("small length");
        let feasible = match (accept_zero, accept_negative) {
            (true, false) => sum >= 0,
            (false, false) => sum >= len_i64,
            (false, true) => !(len == 1 && sum == 0),
            (true, true) => true,
        };
        let result = SequenceBuilder::init(len)
            .and_then(|builder| builder.constant_sum(&mut rng(seed), sum, accept_zero, accept_negative));
        prop_assert_eq!(result.is_ok(), feasible);
        if let Ok(sequence) = result {
            prop_assert_eq!(sequence.len(), len);
            prop_assert_eq!(sequence.sum(), i128::from(sum));
            if !accept_negative {
                prop_assert!(sequence.as_slice().iter().all(|value| *value >= 0));
            }
            if !accept_zero {
                prop_assert!(sequence.as_slice().iter().all(|value| *value != 0));
            }
        }
    }
}
