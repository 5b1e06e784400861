use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tradex_api::{create_app, ApiConfig, AppState};

#[derive(Parser, Debug)]
#[command(name = "tradex-api", version, about = "HTTP API for ledger-backed market clearing runs")]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file and PORT
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Run without a ledger gateway
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if args.demo {
        config.ledger_url = None;
    }

    let bind = config.bind;
    let state = AppState::from_config(config).context("failed to set up ledger gateway")?;
    if state.ledger_configured() {
        tracing::info!(
            "Using channel {} contract {} as {}",
            state.config.session.channel,
            state.config.session.contract,
            state.config.session.identity
        );
    } else {
        tracing::warn!("No ledger gateway configured, serving demo series only");
    }

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;

    tracing::info!("Tradex API listening at http://{}", bind);

    axum::serve(listener, app).await?;
    Ok(())
}
