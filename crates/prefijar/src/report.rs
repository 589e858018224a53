//! Self-test report aggregation.
//!
//! A report is built in one pass over the per-fixture outcomes: totals,
//! success rate, and a per-category breakdown. The invariants are simple and
//! load-bearing for consumers: `passed + failed == total`, category counts
//! sum back to the summary, and `success_rate` is `0.0` for an empty run.

use crate::validator::ValidationOutcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of running a single fixture through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureOutcome {
    /// Fixture name
    pub name: String,
    /// Fixture description
    pub description: String,
    /// Whether the fixture passed (transform succeeded and all expected
    /// prefixes were found)
    pub success: bool,
    /// Input CSS
    pub input: String,
    /// Transformed CSS, when the transform succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Transform error, when it failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Prefixes the fixture expected
    pub expected_prefixes: Vec<String>,
    /// Prefix validation detail, when the transform succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationOutcome>,
    /// One-line human-readable verdict
    pub message: String,
    /// Category the fixture belongs to
    pub category: String,
}

/// Aggregate pass/fail counts for a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Number of fixtures run
    pub total: usize,
    /// Number that passed
    pub passed: usize,
    /// Number that failed
    pub failed: usize,
    /// `passed / total * 100`, rounded to two decimals; `0.0` when empty
    pub success_rate: f64,
}

/// Pass/fail counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    /// Fixtures in this category
    pub total: usize,
    /// Passed fixtures in this category
    pub passed: usize,
    /// Failed fixtures in this category
    pub failed: usize,
}

/// Full self-test report: summary, per-category breakdown, and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    /// Aggregate counts
    pub summary: ReportSummary,
    /// Per-category counts, keyed by category name
    pub categories: BTreeMap<String, CategoryStats>,
    /// Per-fixture outcomes, in run order
    pub details: Vec<FixtureOutcome>,
    /// When the report was produced (RFC 3339)
    pub timestamp: String,
    /// Whether the prefixing step was active for this run
    pub prefixer_available: bool,
}

impl TestReport {
    /// Build a report from per-fixture outcomes.
    #[must_use]
    pub fn from_details(details: Vec<FixtureOutcome>, prefixer_available: bool) -> Self {
        let total = details.len();
        let passed = details.iter().filter(|d| d.success).count();
        let failed = total - passed;

        let mut categories: BTreeMap<String, CategoryStats> = BTreeMap::new();
        for detail in &details {
            let stats = categories.entry(detail.category.clone()).or_default();
            stats.total += 1;
            if detail.success {
                stats.passed += 1;
            } else {
                stats.failed += 1;
            }
        }

        Self {
            summary: ReportSummary {
                total,
                passed,
                failed,
                success_rate: success_rate(passed, total),
            },
            categories,
            details,
            timestamp: chrono::Utc::now().to_rfc3339(),
            prefixer_available,
        }
    }
}

/// Percentage of passed fixtures, rounded to two decimal places.
fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (passed as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
}
