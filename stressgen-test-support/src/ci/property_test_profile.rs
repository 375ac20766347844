//! Property-test run profile read from the environment.
//!
//! Every property suite in the workspace derives its case count and fork
//! mode from the same two variables, so CI can scale the suites up or down
//! in one place.

use std::env;

/// Environment variable overriding proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable enabling proptest process forking.
pub const STRESSGEN_PBT_FORK_ENV_KEY: &str = "STRESSGEN_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads the profile from the process environment, falling back to the
    /// given defaults for missing or malformed values.
    ///
    /// # Examples
    ///
    /// ```
    /// use stressgen_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::load_with_lookup(default_cases, default_fork, |key| env::var(key).ok())
    }

    /// Loads the profile through `lookup` instead of the process environment.
    #[must_use]
    pub fn load_with_lookup<F>(default_cases: u32, default_fork: bool, lookup: F) -> Self
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let cases = parse_or_default(&lookup, PROGTEST_CASES_ENV_KEY, default_cases, parse_cases);
        let fork = parse_or_default(&lookup, STRESSGEN_PBT_FORK_ENV_KEY, default_fork, parse_flag);
        Self { cases, fork }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether each case runs in a forked subprocess.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn parse_or_default<T, F, P>(lookup: &F, key: &'static str, default: T, parse: P) -> T
where
    T: Copy,
    F: Fn(&'static str) -> Option<String>,
    P: Fn(&str) -> Result<T, String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring invalid property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("not a case count: {error}")),
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("unrecognised flag value {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn profile_from(pairs: &[(&'static str, &str)], cases: u32, fork: bool) -> ProptestRunProfile {
        ProptestRunProfile::load_with_lookup(cases, fork, |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned())
        })
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let profile = profile_from(&[], 64, false);
        assert_eq!(profile.cases(), 64);
        assert!(!profile.fork());
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn case_overrides_are_honoured(#[case] raw: &str, #[case] expected: u32) {
        let profile = profile_from(&[(PROGTEST_CASES_ENV_KEY, raw)], 64, false);
        assert_eq!(profile.cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("many")]
    fn invalid_case_overrides_fall_back(#[case] raw: &str) {
        let profile = profile_from(&[(PROGTEST_CASES_ENV_KEY, raw)], 64, false);
        assert_eq!(profile.cases(), 64);
    }

    #[rstest]
    #[case("TRUE", true)]
    #[case("on", true)]
    #[case("1", true)]
    #[case("off", false)]
    #[case("No", false)]
    fn fork_overrides_are_honoured(#[case] raw: &str, #[case] expected: bool) {
        let profile = profile_from(&[(STRESSGEN_PBT_FORK_ENV_KEY, raw)], 64, !expected);
        assert_eq!(profile.fork(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("sometimes")]
    #[case("2")]
    fn invalid_fork_overrides_fall_back(#[case] raw: &str) {
        let profile = profile_from(&[(STRESSGEN_PBT_FORK_ENV_KEY, raw)], 64, true);
        assert!(profile.fork());
    }
}
