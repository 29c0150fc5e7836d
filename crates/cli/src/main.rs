mod cli;
mod metrics;

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use transmirror_core::{
    load_config, validate_config, Converter, DestinationResolver, FileProcessor,
    FilesystemResolver, InputSet, LoftyTagReader, PipedConverter, ProcMountTable, TagExtractor,
    WorkDistributor, WorkQueue,
};

use cli::Args;

/// Exit status after an interrupt (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

enum RunStatus {
    Completed,
    Interrupted,
}

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    init_logging(&args);

    match run(args).await {
        Ok(RunStatus::Completed) => {}
        Ok(RunStatus::Interrupted) => std::process::exit(EXIT_INTERRUPTED),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    let json = args.log_json;
    let ansi = std::io::stderr().is_terminal();

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_ansi(ansi).with_writer(std::io::stderr)))
        .init();
}

async fn run(args: Args) -> Result<RunStatus> {
    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if args.dry_run {
        config.processor.dry_run = true;
    }
    validate_config(&config).context("Configuration validation failed")?;

    let inputs = InputSet::collect(&args.base_dir, &args.inputs).context("Invalid input paths")?;
    let output_root = std::path::absolute(&args.output)
        .with_context(|| format!("Invalid output directory {}", args.output.display()))?;

    let converter = Arc::new(PipedConverter::new(config.converter.clone()));
    if !config.processor.dry_run {
        if let Err(e) = converter.validate().await {
            warn!("{}; transcoding will fail, copies still work", e);
        }
    }

    let filesystems = FilesystemResolver::new(Arc::new(ProcMountTable::new(config.mounts.clone())));
    let destinations = DestinationResolver::new(
        inputs.base_dir().to_path_buf(),
        output_root,
        converter.target_extension(),
        config.destination.clone(),
        filesystems,
    );
    let tags = TagExtractor::new(Arc::new(LoftyTagReader::new()), config.tags.clone());
    let processor = FileProcessor::new(converter, destinations, tags)
        .with_dry_run(config.processor.dry_run);

    let files = inputs.enumerate().await;
    let workers = config.processor.worker_count(files.len(), args.jobs);
    info!(
        files = files.len(),
        workers,
        dry_run = config.processor.dry_run,
        "Starting batch"
    );

    let distributor = WorkDistributor::new(Arc::new(processor));
    let report = tokio::select! {
        report = distributor.run(WorkQueue::new(files), workers) => report,
        _ = shutdown_signal() => {
            warn!("Interrupted, exiting");
            return Ok(RunStatus::Interrupted);
        }
    };

    info!(
        transcoded = report.transcoded,
        copied = report.copied,
        skipped = report.skipped(),
        failed = report.failed,
        "{}",
        report
    );

    if let Some(path) = args.metrics_file.as_deref() {
        export_metrics(path);
    }

    Ok(RunStatus::Completed)
}

fn export_metrics(path: &Path) {
    if let Err(e) = metrics::write_metrics_file(path) {
        warn!(path = %path.display(), "Failed to write metrics file: {}", e);
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
