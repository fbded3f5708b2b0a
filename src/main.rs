use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use notemap::{
    config::Config,
    llm::{create_adapter, LLMAdapter},
    routes::create_router,
    utils::init_logger,
    AppState,
};

#[derive(Parser, Debug)]
#[command(name = "notemap", version, about = "Mind map generation API")]
struct Cli {
    /// Address to bind, overrides HOST
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides PORT
    #[arg(long)]
    port: Option<u16>,

    /// Dotenv file to load instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logger();

    let mut config = match &cli.env_file {
        Some(path) => Config::from_env_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    info!("Configuration loaded: {:?}", config.server);
    info!("LLM configuration: {:?}", config.llm);

    let llm = create_adapter(&config.llm)?;
    if config.llm.api_key_configured() {
        log_available_models(llm.as_ref()).await;
    } else {
        warn!("GOOGLE_API_KEY is not set; uploads will fail until it is configured");
    }

    let state = AppState::new(config.clone(), llm);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn log_available_models(llm: &dyn LLMAdapter) {
    info!("Fetching available Gemini models...");
    match llm.list_models().await {
        Ok(models) => {
            for name in models.iter().filter(|m| m.to_lowercase().contains("gemini")) {
                info!(model = %name, "Found Gemini model");
            }
        }
        Err(e) => warn!(error = %e, "Could not list Gemini models"),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
