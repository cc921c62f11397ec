//! CLI entrypoint for the clinical council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{AuditLogger, DiagnosticOrchestrator, NoAuditLogger};
use council_domain::Severity;
use council_infrastructure::{ConfigLoader, FileConfig, JsonlAuditLogger, gateway_for};
use council_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress, read_case};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        if let Some(path) = &cli.config
            && !path.exists()
        {
            bail!("Config file not found: {}", path.display());
        }
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    let _log_guard = init_logging(cli.verbose, config.logging.log_file.as_deref())?;
    info!("Starting clinical council");

    check_config(&config)?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    let case_path = cli.case.as_deref().context("--case is required")?;
    let case = read_case(case_path)?;

    // === Dependency Injection ===
    let gateway = gateway_for(&config.provider, cli.demo)?;

    let audit_logger: Arc<dyn AuditLogger> = match &config.logging.audit_log {
        Some(path) => match JsonlAuditLogger::open(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoAuditLogger),
        },
        None => Arc::new(NoAuditLogger),
    };

    let cancellation = CancellationToken::new();
    let ctrl_c = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling consultation");
            ctrl_c.cancel();
        }
    });

    let mut params = config.diagnosis_params();
    if cli.demo {
        params = params.with_model(council_domain::Model::Demo);
    }
    let default_rounds = params.discussion_rounds;

    let orchestrator = DiagnosticOrchestrator::new(gateway, params)
        .with_audit_logger(audit_logger)
        .with_cancellation(cancellation);

    let session_id = orchestrator
        .start_session(case, cli.specialty.as_deref())
        .await?;

    let mut session = if cli.quiet {
        orchestrator.run_diagnostic_process(session_id).await?
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        orchestrator
            .run_with_progress(session_id, &progress)
            .await?
    } else {
        orchestrator
            .run_with_progress(session_id, &SimpleProgress)
            .await?
    };

    if let Some(rounds) = cli.discussion_rounds(default_rounds) {
        session = orchestrator
            .simulate_case_discussion(session_id, rounds)
            .await?;
    }

    let format = config.output.resolve_format(cli.output.map(Into::into));
    println!("{}", ConsoleFormatter::render(&session, format));

    Ok(())
}

/// Stderr logging by verbosity, plus an optional log file.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Print config warnings; abort on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => eprintln!("{}", issue),
        }
    }
    if issues.iter().any(|issue| issue.is_error()) {
        bail!("Invalid configuration");
    }
    Ok(())
}
