use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use credcheck::{DatabaseSettings, GcpConnector, ReportOptions, Settings, Verifier};
use credcheck::verifier::{DEFAULT_RUN_COMMAND, DEFAULT_SETUP_DOCS};

#[derive(Parser)]
#[command(name = "credcheck")]
#[command(about = "Verify GCP credentials, Cloud Storage, Pub/Sub and database configuration")]
#[command(version)]
struct Cli {
    /// GCP project ID
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    project: Option<String>,

    /// Path to the service account key file
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Database host (defaults to localhost)
    #[arg(long, env = "DB_HOST")]
    db_host: Option<String>,

    /// Database port (defaults to 5432)
    #[arg(long, env = "DB_PORT")]
    db_port: Option<String>,

    /// Database name
    #[arg(long, env = "DB_NAME")]
    db_name: Option<String>,

    /// Database user
    #[arg(long, env = "DB_USER")]
    db_user: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    db_password: Option<String>,

    /// Command suggested when every check passes
    #[arg(long, default_value = DEFAULT_RUN_COMMAND)]
    run_command: String,

    /// Setup document suggested when a check fails
    #[arg(long, default_value = DEFAULT_SETUP_DOCS)]
    setup_docs: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = Settings::new().with_database(DatabaseSettings {
            host: non_empty(&self.db_host),
            port: non_empty(&self.db_port),
            name: non_empty(&self.db_name),
            user: non_empty(&self.db_user),
            password: non_empty(&self.db_password),
        });
        if let Some(project) = &self.project {
            settings = settings.with_project_id(project.as_str());
        }
        if let Some(path) = &self.credentials {
            settings = settings.with_credentials_path(path.as_path());
        }
        settings
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            run_command: self.run_command.clone(),
            setup_docs: self.setup_docs.clone(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("credcheck=debug,info")
    } else {
        EnvFilter::new("credcheck=warn,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.settings();
    debug!("Loaded settings: {:?}", settings.project_id);

    let connector = GcpConnector::new();
    let verifier = Verifier::new(&settings, &connector).with_options(cli.report_options());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match verifier.run(&mut out).await {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(e) => {
            eprintln!("\x1b[31m✗ Error:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}
