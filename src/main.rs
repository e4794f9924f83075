//! CLI entrypoint for the api-regress runner.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use api_regress::report::{render_text, RunReport};
use api_regress::{RunnerConfig, SuiteRunner};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Run a JSON-described API regression suite.
#[derive(Debug, Parser)]
#[command(name = "api-regress", version)]
#[command(about = "Declarative API regression-test runner")]
struct Cli {
    /// Path to the JSON test file.
    #[arg(long = "test-file", visible_alias = "testFile")]
    test_file: PathBuf,
    /// Write a JSON report of the run to this path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Replace the host of every test.
    #[arg(long)]
    host: Option<String>,
    /// Outbound request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,
    /// Ignore per-test wait_time pauses.
    #[arg(long)]
    skip_wait: bool,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Returns whether every test passed.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = RunnerConfig::from_env().context("loading runner configuration")?;
    if let Some(host) = cli.host {
        config = config.with_host_override(host);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    if cli.skip_wait {
        config = config.with_wait_time(false);
    }

    let mut tests = SuiteRunner::load_tests(&cli.test_file)?;
    let mut runner = SuiteRunner::new(config)?;

    let started_at = chrono::Utc::now();
    let summary = runner.run_tests(&mut tests).await;
    let finished_at = chrono::Utc::now();

    print!("{}", render_text(&tests, &summary));

    if let Some(path) = cli.report {
        RunReport::new(started_at, finished_at, &tests, runner.store()).write_json(&path)?;
    }

    Ok(summary.all_passed())
}
