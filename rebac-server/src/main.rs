use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::{env, path::PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use rebac_server::{create_app, RebacServer, ServerConfig};

/// Relationship-based authorization HTTP server
#[derive(Parser, Debug)]
#[command(name = "rebac-server")]
#[command(about = "Relationship-based authorization server with an in-memory relationship store")]
struct Args {
    /// Server bind address
    #[arg(long, env = "REBAC_HOST")]
    host: Option<String>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, env = "REBAC_CONFIG")]
    config: Option<PathBuf>,

    /// Schema file
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Relationships file
    #[arg(long)]
    relationships: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose);

    let mut config = ServerConfig::load(args.config.as_deref())
        .context("Failed to load server configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(schema) = args.schema {
        config.schema_path = schema;
    }
    if let Some(relationships) = args.relationships {
        config.relationships_path = relationships;
    }

    info!("🔐 {}", "Starting REBAC authorization server".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());

    let bind_address = config.bind_address();
    let server = RebacServer::new(config).context("Failed to initialise authorization engine")?;
    info!(
        definitions = server.engine.schema().definition_count(),
        relationships = server.engine.store().len(),
        "Authorization sources loaded"
    );

    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_address))?;

    info!("🚀 {}", format!("Listening on http://{}", bind_address).bright_green());
    info!("📋 {}", format!("Health check available at: http://{}/health", bind_address).bright_blue());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let is_development = env::var("REBAC_ENV").unwrap_or_else(|_| "development".to_string()) == "development";
    let use_colors = env::var("NO_COLOR").is_err() && atty::is(atty::Stream::Stdout);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("rebac_server={level},auth_rebac={level},tower_http=info").into()
    });

    if is_development {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_colors),
            )
            .init();

        if use_colors {
            print_startup_banner();
        }
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .init();
    }
}

fn print_startup_banner() {
    println!("{}", "╔══════════════════════════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║                    🔐 REBAC AUTHORIZATION                    ║".bright_cyan());
    println!("{}", "║          schema · relationships · permission checks          ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}
