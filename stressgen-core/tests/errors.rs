use std::io;

use rstest::rstest;
use stressgen_core::{ConfigurationError, ConfigurationErrorCode, OutputError, OutputErrorCode};

#[rstest]
#[case(ConfigurationError::InvalidSize { got: 0 }, ConfigurationErrorCode::InvalidSize)]
#[case(
    ConfigurationError::InvalidPercentages { chain: 0.8, flower: 0.4 },
    ConfigurationErrorCode::InvalidPercentages,
)]
#[case(
    ConfigurationError::TooManyEdges { requested: 11, maximum: 10, directed: false },
    ConfigurationErrorCode::TooManyEdges,
)]
#[case(
    ConfigurationError::InsufficientEdgeBudget { requested: 3, required: 9 },
    ConfigurationErrorCode::InsufficientEdgeBudget,
)]
#[case(
    ConfigurationError::InvalidComponentCount { components: 0, nodes: 5 },
    ConfigurationErrorCode::InvalidComponentCount,
)]
#[case(ConfigurationError::InvalidRange { lo: 3, hi: 1 }, ConfigurationErrorCode::InvalidRange)]
#[case(
    ConfigurationError::InfeasibleSum {
        sum: 2,
        size: 5,
        accept_zero: false,
        accept_negative: false,
    },
    ConfigurationErrorCode::InfeasibleSum,
)]
#[case(
    ConfigurationError::PrimeNotFound { lo: 24, hi: 28, attempts: 5 },
    ConfigurationErrorCode::PrimeNotFound,
)]
#[case(ConfigurationError::MixedDirectedness, ConfigurationErrorCode::MixedDirectedness)]
fn returns_expected_configuration_code(
    #[case] error: ConfigurationError,
    #[case] expected: ConfigurationErrorCode,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), expected.as_str());
    assert!(expected.as_str().starts_with("STRESSGEN_"));
}

#[rstest]
#[case(
    OutputError::WeightLengthMismatch { expected: 4, got: 3 },
    OutputErrorCode::WeightLengthMismatch,
)]
#[case(
    OutputError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed")),
    OutputErrorCode::Io,
)]
fn returns_expected_output_code(#[case] error: OutputError, #[case] expected: OutputErrorCode) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().to_string(), expected.as_str());
}

#[test]
fn too_many_edges_message_names_the_limit() {
    let error = ConfigurationError::TooManyEdges {
        requested: 11,
        maximum: 10,
        directed: false,
    };
    let message = error.to_string();
    assert!(message.contains("11"));
    assert!(message.contains("at most 10"));
}
