//! ReviewPulse API server
//!
//! Loads configuration, connects to MongoDB, wires the feedback service
//! to the Groq analyzer and serves the REST API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reviewpulse_api_rest::{build_router, AppState, RouterConfig};
use reviewpulse_config::AppConfig;
use reviewpulse_feedback::FeedbackService;
use reviewpulse_integrations::groq::{GroqClient, GroqConfig};
use reviewpulse_storage::{MongoFeedbackStore, MongoStoreConfig};

#[derive(Parser)]
#[command(
    name = "reviewpulse-server",
    version,
    about = "ReviewPulse - AI-powered feedback collection and analysis API"
)]
struct Cli {
    /// Path to a YAML configuration file; environment variables
    /// (REVIEWPULSE_*) override it
    #[arg(short, long, env = "REVIEWPULSE_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.clone()).context("Failed to load configuration")?;
    init_tracing(&config.observability.log_level, cli.verbose);
    config.validate()?;

    info!(service = %config.service.name, "Starting ReviewPulse API");

    let store_config = MongoStoreConfig::new(&config.database.url, &config.database.name)
        .with_connect_timeout(Duration::from_secs(config.database.connect_timeout_secs));
    let store = MongoFeedbackStore::connect(store_config)
        .await
        .context("Database connection failed")?;

    let mut groq_config =
        GroqConfig::new(&config.llm.api_key, &config.llm.model).with_base_url(&config.llm.base_url);
    groq_config.timeout_secs = config.llm.timeout_secs;
    groq_config.max_tokens = config.llm.max_tokens;
    let analyzer = GroqClient::new(groq_config).context("Failed to build LLM client")?;

    let service = FeedbackService::new(Arc::new(store), Arc::new(analyzer));
    let state = AppState::new(
        service,
        config.service.name.clone(),
        config.auth.admin_api_key.clone(),
    );

    let router_config = RouterConfig {
        requests_per_minute: config.limits.requests_per_minute,
        request_timeout: Duration::from_secs(config.limits.request_timeout_secs),
    };
    let app = build_router(state, &router_config);

    let addr = format!("{}:{}", config.service.host, config.service.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Shut down gracefully");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Resolve on ctrl-c or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
