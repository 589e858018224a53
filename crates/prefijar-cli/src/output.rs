//! Output formatting and status reporting

use console::{style, Style, Term};
use prefijar::{TestReport, WorkerStatus};

/// Colored status-line reporter for the host controller.
///
/// Status lines go to stderr; transformed CSS goes to stdout so it can be
/// piped. Failures are printed even in quiet mode.
#[derive(Debug)]
pub struct StatusReporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl StatusReporter {
    /// Create a new status reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&styled);
    }

    /// Render a fixture suite report: failures, category table, summary line.
    pub fn render_report(&self, report: &TestReport) {
        self.header("Fixture suite");

        for detail in &report.details {
            if detail.success {
                self.success(&format!("{} ({})", detail.name, detail.category));
            } else {
                self.failure(&format!(
                    "{} ({}): {}",
                    detail.name, detail.category, detail.message
                ));
            }
        }

        self.header("Categories");
        for (category, stats) in &report.categories {
            let line = format!("{category}: {}/{} passed", stats.passed, stats.total);
            if stats.failed > 0 {
                self.failure(&line);
            } else {
                self.success(&line);
            }
        }

        self.summary(report);
    }

    /// Print the one-line suite verdict.
    pub fn summary(&self, report: &TestReport) {
        let summary = &report.summary;
        if self.quiet && summary.failed == 0 {
            return;
        }

        let _ = self.term.write_line("");

        if self.use_color {
            let passed_style = Style::new().green().bold();
            let failed_style = Style::new().red().bold();

            let status = if summary.failed > 0 {
                failed_style.apply_to("FAILED")
            } else {
                passed_style.apply_to("PASSED")
            };

            let _ = self.term.write_line(&format!(
                "{} {} fixtures ({} passed, {} failed, {:.2}%)",
                status,
                summary.total,
                passed_style.apply_to(summary.passed),
                if summary.failed > 0 {
                    failed_style.apply_to(summary.failed).to_string()
                } else {
                    summary.failed.to_string()
                },
                summary.success_rate
            ));
        } else {
            let status = if summary.failed > 0 { "FAILED" } else { "PASSED" };
            let _ = self.term.write_line(&format!(
                "{status} {} fixtures ({} passed, {} failed, {:.2}%)",
                summary.total, summary.passed, summary.failed, summary.success_rate
            ));
        }
    }

    /// Render a worker status snapshot.
    pub fn render_status(&self, status: &WorkerStatus) {
        self.header("Worker status");
        self.line("initialized", status.initialized);
        self.line("pipeline available", status.pipeline_available);
        self.line("prefix plugin available", status.prefix_plugin_available);
        match &status.config {
            Some(config) => self.info(&format!(
                "prefixer plugin enabled: {}",
                config.plugins.prefixer
            )),
            None => self.info("no configuration stored"),
        }
    }

    fn line(&self, label: &str, ok: bool) {
        if ok {
            self.success(label);
        } else {
            self.failure(label);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use prefijar::{FixtureOutcome, TestReport};

    fn sample_report(failed: bool) -> TestReport {
        let details = vec![FixtureOutcome {
            name: "flexbox-layout".to_string(),
            description: "Flexbox".to_string(),
            success: !failed,
            input: ".a { display: flex; }".to_string(),
            output: Some(".a { display: flex; }".to_string()),
            error: None,
            expected_prefixes: vec!["-webkit-".to_string()],
            validation: None,
            message: String::new(),
            category: "layout".to_string(),
        }];
        TestReport::from_details(details, true)
    }

    #[test]
    fn test_new_reporter() {
        let reporter = StatusReporter::new(true, false);
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }

    #[test]
    fn test_default_reporter() {
        let reporter = StatusReporter::default();
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }

    #[test]
    fn test_status_lines_do_not_panic() {
        let reporter = StatusReporter::new(false, false);
        reporter.success("transform complete");
        reporter.failure("transform failed");
        reporter.warning("no CSS provided");
        reporter.info("processing");
        reporter.header("Worker status");
    }

    #[test]
    fn test_render_passing_report() {
        let reporter = StatusReporter::new(false, false);
        reporter.render_report(&sample_report(false));
    }

    #[test]
    fn test_render_failing_report() {
        let reporter = StatusReporter::new(false, false);
        reporter.render_report(&sample_report(true));
    }

    #[test]
    fn test_quiet_mode_still_prints_failures() {
        let reporter = StatusReporter::new(false, true);
        reporter.success("hidden");
        reporter.warning("hidden");
        reporter.info("hidden");
        // failures always print
        reporter.failure("shown");
        reporter.summary(&sample_report(true));
    }

    #[test]
    fn test_render_status() {
        let reporter = StatusReporter::new(false, false);
        reporter.render_status(&WorkerStatus {
            initialized: true,
            config: None,
            pipeline_available: true,
            prefix_plugin_available: false,
        });
    }
}
