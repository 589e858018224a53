//! Prefix validation for transformed CSS.
//!
//! The oracle is deliberately coarse: a prefix is considered present when its
//! literal text appears anywhere in the output. That is what the fixture
//! expectations are written against, so keep it substring-based.

use serde::{Deserialize, Serialize};

/// Which vendor prefixes appear in a transformed stylesheet, and whether the
/// expected set is fully covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    /// `-webkit-` appears in the output
    pub has_webkit_prefix: bool,
    /// `-moz-` appears in the output
    pub has_moz_prefix: bool,
    /// `-ms-` appears in the output
    pub has_ms_prefix: bool,
    /// `-o-` appears in the output
    pub has_o_prefix: bool,
    /// Every expected prefix was found
    pub all_expected_present: bool,
    /// Expected prefixes that did not appear
    pub missing_prefixes: Vec<String>,
}

/// Check a transformed stylesheet against a set of expected vendor prefixes.
///
/// Pure function of its inputs. Running it twice on the same pair yields the
/// same outcome, and it never touches the stylesheet.
#[must_use]
pub fn validate_output(css: &str, expected_prefixes: &[&str]) -> ValidationOutcome {
    let missing_prefixes: Vec<String> = expected_prefixes
        .iter()
        .filter(|prefix| !css.contains(**prefix))
        .map(|prefix| (*prefix).to_string())
        .collect();

    ValidationOutcome {
        has_webkit_prefix: css.contains("-webkit-"),
        has_moz_prefix: css.contains("-moz-"),
        has_ms_prefix: css.contains("-ms-"),
        has_o_prefix: css.contains("-o-"),
        all_expected_present: missing_prefixes.is_empty(),
        missing_prefixes,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_all_prefixes_detected() {
        let css = ".a { -webkit-transform: x; -moz-transform: x; -ms-transform: x; -o-transform: x; }";
        let outcome = validate_output(css, &[]);
        assert!(outcome.has_webkit_prefix);
        assert!(outcome.has_moz_prefix);
        assert!(outcome.has_ms_prefix);
        assert!(outcome.has_o_prefix);
        assert!(outcome.all_expected_present);
        assert!(outcome.missing_prefixes.is_empty());
    }

    #[test]
    fn test_no_prefixes_detected() {
        let outcome = validate_output(".a { color: red; }", &[]);
        assert!(!outcome.has_webkit_prefix);
        assert!(!outcome.has_moz_prefix);
        assert!(!outcome.has_ms_prefix);
        assert!(!outcome.has_o_prefix);
        assert!(outcome.all_expected_present);
    }

    #[test]
    fn test_missing_expected_prefix_reported() {
        let outcome = validate_output(
            ".a { -webkit-user-select: none; }",
            &["-webkit-", "-moz-", "-ms-"],
        );
        assert!(!outcome.all_expected_present);
        assert_eq!(outcome.missing_prefixes, vec!["-moz-", "-ms-"]);
    }

    #[test]
    fn test_expected_subset_present() {
        let outcome = validate_output(
            ".a { display: -webkit-box; display: -ms-flexbox; display: flex; }",
            &["-webkit-", "-ms-"],
        );
        assert!(outcome.all_expected_present);
        assert!(outcome.missing_prefixes.is_empty());
    }

    #[test]
    fn test_empty_output_with_expectations() {
        let outcome = validate_output("", &["-webkit-"]);
        assert!(!outcome.all_expected_present);
        assert_eq!(outcome.missing_prefixes, vec!["-webkit-"]);
    }

    #[test]
    fn test_idempotent() {
        let css = ".a { -webkit-filter: blur(2px); }";
        let expected = ["-webkit-", "-moz-"];
        let first = validate_output(css, &expected);
        let second = validate_output(css, &expected);
        assert_eq!(first, second);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn validation_is_pure(css in ".{0,200}", expect_webkit in proptest::bool::ANY) {
                let expected: &[&str] = if expect_webkit { &["-webkit-"] } else { &[] };
                let first = validate_output(&css, expected);
                let second = validate_output(&css, expected);
                prop_assert_eq!(&first, &second);
                // missing prefixes are always drawn from the expected set
                for missing in &first.missing_prefixes {
                    prop_assert!(expected.contains(&missing.as_str()));
                }
            }
        }
    }
}
