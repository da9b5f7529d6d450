//! AuthorCheck Server
//!
//! Scores student submissions for AI usage and serves the usage guidelines.

use anyhow::Result;
use authorcheck_server::{create_router, AppState, ServerConfig};
use clap::{Parser, ValueEnum};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "authorcheck-server")]
#[command(about = "AI-usage detection service for student submissions", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "AUTHORCHECK_CONFIG", default_value = "authorcheck.yaml")]
    config: String,

    /// Listen address
    #[arg(short = 'l', long)]
    listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_format);

    info!("Starting AuthorCheck server");

    let config = ServerConfig::load(&cli.config)?.with_overrides(cli.listen, cli.port);
    info!("Configuration loaded successfully");
    info!(
        "Thresholds: moderate={} questionable={} inadequate={}",
        config.detection.thresholds.moderate,
        config.detection.thresholds.questionable,
        config.detection.thresholds.inadequate
    );

    let metrics_handle = init_metrics()?;

    let addr: SocketAddr = config.bind_address().parse()?;
    let state = AppState::new(config, metrics_handle)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool, format: LogFormat) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("authorcheck=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("authorcheck=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "authorcheck_requests_total",
        "Total number of requests processed by endpoint"
    );
    metrics::describe_counter!(
        "authorcheck_analyses_total",
        "Total number of analyses by submission kind and category"
    );
    metrics::describe_histogram!(
        "authorcheck_analysis_latency_us",
        metrics::Unit::Microseconds,
        "Analysis latency in microseconds"
    );
    metrics::describe_counter!("authorcheck_errors_total", "Total number of errors by type");

    info!("Metrics exporter initialized");
    Ok(handle)
}
