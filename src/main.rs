use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use follooow_api::config::AppConfig;
use follooow_api::database::models::{GalleryDocument, InfluencerSmall, NewsDocument, UserDocument};
use follooow_api::database::{DatabaseManager, HealthCheck, Repository};
use follooow_api::media::{CloudinaryClient, MediaAdapter};
use follooow_api::services::notifier_from_config;
use follooow_api::{app, AppState};

#[derive(Debug, Parser)]
#[command(name = "follooow-api", version, about = "Content API for galleries, news, influencers and users")]
struct Args {
    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides FOLLOOOW_API_PORT / PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MONGO_URI, CLOUDINARY_*, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    info!("Starting follooow-api in {:?} mode", config.environment);

    let database = DatabaseManager::connect(&config.database)
        .await
        .context("invalid MongoDB configuration")?;
    spawn_database_setup(database.clone());

    let cloudinary = CloudinaryClient::new(config.media.clone()).context("failed to build media client")?;

    let state = AppState {
        galleries: Arc::new(Repository::<GalleryDocument>::new(&database, DatabaseManager::GALLERIES)),
        news: Arc::new(Repository::<NewsDocument>::new(&database, DatabaseManager::NEWS)),
        influencers: Arc::new(Repository::<InfluencerSmall>::new(&database, DatabaseManager::INFLUENCERS)),
        users: Arc::new(Repository::<UserDocument>::new(&database, DatabaseManager::USERS)),
        media: MediaAdapter::new(Arc::new(cloudinary), config.media.directory.clone()),
        notifier: notifier_from_config(&config.notify),
        health: Arc::new(database.clone()),
        config: Arc::new(config.clone()),
    };

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("follooow-api listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.shutdown().await;
    Ok(())
}

/// The server accepts requests before MongoDB is reachable; health reports
/// 503 until it is.
fn spawn_database_setup(database: DatabaseManager) {
    tokio::spawn(async move {
        if let Err(e) = database.ping().await {
            warn!("MongoDB not reachable yet: {}", e);
            return;
        }
        info!("Connected to MongoDB");

        if let Err(e) = database.ensure_indexes().await {
            error!("Failed to ensure indexes: {}", e);
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
    info!("Shutdown signal received");
}
