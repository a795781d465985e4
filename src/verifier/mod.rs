mod checks;
mod report;
mod result;

use std::io::Write;
use tracing::info;
use crate::cloud::CloudConnector;
use crate::config::Settings;
use crate::error::Result;

pub use checks::{
    check_credentials_file, check_database_configuration, check_environment_variables,
    check_messaging_connection, check_object_storage_connection,
    CREDENTIALS_CHECK, DATABASE_CHECK, ENVIRONMENT_CHECK, MESSAGING_CHECK, STORAGE_CHECK,
    REQUIRED_VARS,
};
pub use report::{write_banner, write_check, write_summary, ReportOptions, DEFAULT_RUN_COMMAND, DEFAULT_SETUP_DOCS};
pub use result::{CheckOutcome, CheckResult, DiagnosticLine, FailureKind, LineLevel, VerificationReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Environment,
    Credentials,
    Storage,
    Messaging,
    Database,
}

impl Check {
    /// The order `run_all` executes checks in.
    pub const ALL: [Check; 5] = [
        Check::Environment,
        Check::Credentials,
        Check::Storage,
        Check::Messaging,
        Check::Database,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Check::Environment => ENVIRONMENT_CHECK,
            Check::Credentials => CREDENTIALS_CHECK,
            Check::Storage => STORAGE_CHECK,
            Check::Messaging => MESSAGING_CHECK,
            Check::Database => DATABASE_CHECK,
        }
    }
}

pub struct Verifier<'a> {
    settings: &'a Settings,
    connector: &'a dyn CloudConnector,
    options: ReportOptions,
}

impl<'a> Verifier<'a> {
    pub fn new(settings: &'a Settings, connector: &'a dyn CloudConnector) -> Self {
        Self {
            settings,
            connector,
            options: ReportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs every check in `Check::ALL` order, printing each one's diagnostics as
    /// soon as it finishes. A failing check never stops the run.
    pub async fn run_all(&self, out: &mut impl Write) -> Result<VerificationReport> {
        let mut report = VerificationReport::new();

        for check in Check::ALL {
            let result = self.run_check(check).await;
            info!("{}: {}", check.name(), if result.passed() { "passed" } else { "failed" });
            write_check(out, &result)?;
            report.record(result);
        }

        Ok(report)
    }

    pub async fn run_check(&self, check: Check) -> CheckResult {
        match check {
            Check::Environment => check_environment_variables(self.settings),
            Check::Credentials => check_credentials_file(self.settings),
            Check::Storage => check_object_storage_connection(self.settings, self.connector).await,
            Check::Messaging => check_messaging_connection(self.settings, self.connector).await,
            Check::Database => check_database_configuration(self.settings),
        }
    }

    /// Prints the summary for a finished run; returns true if everything passed.
    pub fn report(&self, report: &VerificationReport, out: &mut impl Write) -> Result<bool> {
        Ok(write_summary(out, report, &self.options)?)
    }

    /// Banner, all checks and the summary. Returns the finished report.
    pub async fn run(&self, out: &mut impl Write) -> Result<VerificationReport> {
        write_banner(out)?;
        let report = self.run_all(out).await?;
        self.report(&report, out)?;
        out.flush()?;
        Ok(report)
    }
}
