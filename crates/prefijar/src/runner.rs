//! Fixture suite execution.
//!
//! Runs every bundled fixture through the transform path, validates the
//! output prefixes, and folds the outcomes into a [`TestReport`]. A transform
//! error marks the fixture failed with the message recorded; nothing is
//! retried.

use crate::fixtures::{self, Fixture, BASIC_CHECK_CSS};
use crate::pipeline::Prefixer;
use crate::protocol::TransformOptions;
use crate::report::{FixtureOutcome, TestReport};
use crate::validator::validate_output;

/// Run the bundled fixtures plus the trailing basic smoke check.
#[must_use]
pub fn run_fixture_suite(prefixer: &Prefixer, prefixer_enabled: bool) -> TestReport {
    let mut details = Vec::with_capacity(fixtures::all().len() + 1);
    for fixture in fixtures::all() {
        details.push(run_fixture(prefixer, prefixer_enabled, fixture));
    }
    details.push(run_basic_check(prefixer, prefixer_enabled));
    TestReport::from_details(details, prefixer_enabled)
}

fn run_fixture(prefixer: &Prefixer, prefixer_enabled: bool, fixture: &Fixture) -> FixtureOutcome {
    let expected: Vec<String> = fixture
        .expected_prefixes
        .iter()
        .map(|p| (*p).to_string())
        .collect();

    match prefixer.process(fixture.css, &TransformOptions::default(), prefixer_enabled) {
        Ok(output) => {
            let validation = validate_output(&output.css, fixture.expected_prefixes);
            let success = validation.all_expected_present;
            let message = if success {
                "all expected prefixes present".to_string()
            } else {
                format!(
                    "missing prefixes: {}",
                    validation.missing_prefixes.join(", ")
                )
            };
            tracing::debug!(fixture = fixture.name, success, "fixture checked");
            FixtureOutcome {
                name: fixture.name.to_string(),
                description: fixture.description.to_string(),
                success,
                input: fixture.css.to_string(),
                output: Some(output.css),
                error: None,
                expected_prefixes: expected,
                validation: Some(validation),
                message,
                category: fixture.category.to_string(),
            }
        }
        Err(e) => {
            tracing::debug!(fixture = fixture.name, error = %e, "fixture transform failed");
            FixtureOutcome {
                name: fixture.name.to_string(),
                description: fixture.description.to_string(),
                success: false,
                input: fixture.css.to_string(),
                output: None,
                error: Some(format!("transform failed: {e}")),
                expected_prefixes: expected,
                validation: None,
                message: "transform failed".to_string(),
                category: fixture.category.to_string(),
            }
        }
    }
}

/// One extra entry that only checks the pipeline produces output at all.
fn run_basic_check(prefixer: &Prefixer, prefixer_enabled: bool) -> FixtureOutcome {
    let (success, output, error, message) =
        match prefixer.process(BASIC_CHECK_CSS, &TransformOptions::default(), prefixer_enabled) {
            Ok(out) if !out.css.trim().is_empty() => (
                true,
                Some(out.css),
                None,
                "pipeline produced output".to_string(),
            ),
            Ok(out) => (
                false,
                Some(out.css),
                None,
                "pipeline produced empty output".to_string(),
            ),
            Err(e) => (
                false,
                None,
                Some(format!("transform failed: {e}")),
                "transform failed".to_string(),
            ),
        };

    FixtureOutcome {
        name: "basic-transform".to_string(),
        description: "Basic transform smoke check".to_string(),
        success,
        input: BASIC_CHECK_CSS.to_string(),
        output,
        error,
        expected_prefixes: Vec::new(),
        validation: None,
        message,
        category: "basic".to_string(),
    }
}
