use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use voxgate::{
    create_router, AppState, Config, ConnectionDetailsSource, HttpConnectionDetails, Language,
    Selection, TokenMinter, Voice,
};

#[derive(Parser)]
#[command(name = "voxgate", version, about = "Connection gateway for the voice assistant")]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(long, default_value = "config/voxgate")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the connection-details endpoint
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Request connection details from a running server and print them
    Details {
        /// Origin the token endpoint is resolved against
        #[arg(long)]
        origin: Option<String>,
        #[arg(long, default_value_t = Language::Hindi)]
        language: Language,
        #[arg(long, default_value_t = Voice::Sarvam)]
        voice: Voice,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Serve { bind, port } => serve(cfg, bind, port).await,
        Command::Details {
            origin,
            language,
            voice,
        } => details(cfg, origin, Selection::new(language, voice)).await,
    }
}

async fn serve(cfg: Config, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let bind = bind.unwrap_or(cfg.server.bind);
    let port = port.unwrap_or(cfg.server.port);

    info!("voxgate v{}", env!("CARGO_PKG_VERSION"));
    match TokenMinter::from_config(&cfg.livekit) {
        Ok(minter) => info!(
            "Minting tokens for {} (ttl {}s)",
            minter.server_url(),
            minter.ttl().as_secs()
        ),
        Err(e) => warn!("{}; token requests will fail until configured", e),
    }

    let app = create_router(AppState::new(cfg.livekit));
    let listener = tokio::net::TcpListener::bind((bind.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", bind, port))?;

    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn details(cfg: Config, origin: Option<String>, selection: Selection) -> Result<()> {
    let origin = origin.unwrap_or(cfg.client.origin);
    let source = HttpConnectionDetails::new(&origin, &cfg.client.endpoint)?;

    let details = source
        .fetch(&selection)
        .await
        .context("Failed to fetch connection details")?;

    println!("{}", serde_json::to_string_pretty(&details)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
