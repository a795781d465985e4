use std::io::{self, Write};
use colored::Colorize;
use super::result::{CheckResult, LineLevel, VerificationReport};

pub const DEFAULT_RUN_COMMAND: &str = "python src/main.py";
pub const DEFAULT_SETUP_DOCS: &str = "credentials/README.md";

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Command suggested once every check passes.
    pub run_command: String,
    /// Document pointed to when something fails.
    pub setup_docs: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            run_command: DEFAULT_RUN_COMMAND.to_string(),
            setup_docs: DEFAULT_SETUP_DOCS.to_string(),
        }
    }
}

pub fn write_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "GCP CREDENTIALS VERIFIER".bold())?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub fn write_check(out: &mut impl Write, result: &CheckResult) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Checking {}...", result.name)?;

    for line in &result.lines {
        match line.level {
            LineLevel::Ok => writeln!(out, "{} {}", "✓".green(), line.text)?,
            LineLevel::Info => writeln!(out, "   - {}", line.text)?,
            LineLevel::Warn => writeln!(out, "   {} {}", "⚠".yellow(), line.text)?,
            LineLevel::Error => writeln!(out, "{} {}", "✗".red(), line.text)?,
        }
    }

    Ok(())
}

/// Prints the PASS/FAIL table and closing message. Returns the overall result.
pub fn write_summary(
    out: &mut impl Write,
    report: &VerificationReport,
    options: &ReportOptions,
) -> io::Result<bool> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "VERIFICATION SUMMARY:")?;

    for result in report.results() {
        let status = if result.passed() {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        writeln!(out, "   {} - {}", status, result.name)?;
    }

    let all_passed = report.all_passed();

    if all_passed {
        writeln!(out)?;
        writeln!(out, "{}", "All checks passed! The service is ready to run.".green())?;
        writeln!(out)?;
        writeln!(out, "To start the service:")?;
        writeln!(out, "   {}", options.run_command)?;
    } else {
        writeln!(out)?;
        let message = format!(
            "{} of {} checks failed. Review your configuration.",
            report.failed_count(),
            report.len()
        );
        writeln!(out, "{}", message.as_str().yellow())?;
        writeln!(out)?;
        writeln!(out, "See {} for setup instructions", options.setup_docs)?;
    }

    Ok(all_passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::FailureKind;

    fn render_summary(report: &VerificationReport) -> (String, bool) {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        let ok = write_summary(&mut buf, report, &ReportOptions::default()).unwrap();
        (String::from_utf8(buf).unwrap(), ok)
    }

    #[test]
    fn test_summary_all_passed() {
        let mut report = VerificationReport::new();
        report.record(CheckResult::new("First"));
        report.record(CheckResult::new("Second"));

        let (text, ok) = render_summary(&report);
        assert!(ok);
        assert!(text.contains("PASS - First"));
        assert!(text.contains("PASS - Second"));
        assert!(text.contains(DEFAULT_RUN_COMMAND));
        assert!(!text.contains(DEFAULT_SETUP_DOCS));
    }

    #[test]
    fn test_summary_with_failure_points_to_docs() {
        let mut report = VerificationReport::new();
        report.record(CheckResult::new("First"));
        let mut failed = CheckResult::new("Second");
        failed.fail(FailureKind::MissingResource, "missing");
        report.record(failed);

        let (text, ok) = render_summary(&report);
        assert!(!ok);
        assert!(text.contains("FAIL - Second"));
        assert!(text.contains("1 of 2 checks failed"));
        assert!(text.contains(DEFAULT_SETUP_DOCS));
        assert!(!text.contains(DEFAULT_RUN_COMMAND));
    }

    #[test]
    fn test_summary_preserves_order() {
        let mut report = VerificationReport::new();
        for name in ["Zeta", "Alpha", "Mid"] {
            report.record(CheckResult::new(name));
        }
        let (text, _) = render_summary(&report);
        let zeta = text.find("Zeta").unwrap();
        let alpha = text.find("Alpha").unwrap();
        let mid = text.find("Mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[test]
    fn test_write_check_lines() {
        colored::control::set_override(false);
        let mut result = CheckResult::new("Credentials file");
        result.ok("valid");
        result.info("Type: service_account");
        result.fail(FailureKind::MalformedInput, "bad");

        let mut buf = Vec::new();
        write_check(&mut buf, &result).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Checking Credentials file..."));
        assert!(text.contains("✓ valid"));
        assert!(text.contains("   - Type: service_account"));
        assert!(text.contains("✗ bad"));
    }
}
