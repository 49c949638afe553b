use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payhook::config::Config;
use payhook::db::{create_pool, init_db, AppState};
use payhook::handlers;

#[derive(Parser, Debug)]
#[command(name = "payhook")]
#[command(about = "Payment-gateway webhook ingestion service")]
struct Cli {
    /// Override the listening port from the environment
    #[arg(long)]
    port: Option<u16>,

    /// Delete the database file on exit (useful for local testing)
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payhook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Credential problems are fatal: abort before binding.
    let mut config = Config::from_env().unwrap_or_else(|e| {
        tracing::error!("Configuration error: {}", e);
        std::process::exit(1);
    });
    if let Some(port) = cli.port {
        config.port = port;
    }

    let pool =
        create_pool(&config.credentials.database_path).expect("Failed to create store pool");
    {
        let conn = pool.get().expect("Failed to get store connection");
        init_db(&conn).expect("Failed to initialize store schema");
    }

    let state = AppState { db: pool };

    let app = handlers::webhooks::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Webhook listening at http://{}/webhook", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    if cli.ephemeral {
        let path = config.credentials.database_path;
        tracing::info!("Cleaning up ephemeral database...");
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!("Failed to remove {}: {}", path, e);
        }
        // Also remove WAL and SHM files if they exist
        let _ = std::fs::remove_file(format!("{}-wal", path));
        let _ = std::fs::remove_file(format!("{}-shm", path));
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
