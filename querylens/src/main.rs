use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use querylens::api::{create_router, AppState};
use querylens::config::Config;
use querylens::db::{Database, DatabaseBackend, LibSqlBackend};
use querylens::search::SearchProvider;

/// How often an embedded replica pulls from its remote primary.
const REPLICA_SYNC_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "querylens")]
#[command(about = "Self-hostable answer engine with cited sources and query history")]
struct Args {
    /// Bind address, overrides QUERYLENS_HOST
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides QUERYLENS_PORT
    #[arg(long)]
    port: Option<u16>,

    /// Print the resolved configuration (secrets redacted) and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "querylens=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if args.check_config {
        println!("{}", config.redacted_summary());
        return Ok(());
    }

    tracing::info!("Initializing database...");
    let raw_db = Database::new(&config.database).await?;
    let db: Arc<dyn DatabaseBackend> = Arc::new(LibSqlBackend::new(raw_db));

    tracing::info!("Initializing search provider: {}...", config.search.model);
    let provider = SearchProvider::new(&config.search);
    if !provider.is_available() {
        tracing::warn!("Search provider unavailable - /api/search will fail until GEMINI_API_KEY is set");
    }

    let state = AppState::new(config.clone(), db, provider);

    let cancel_token = CancellationToken::new();

    if config.database.is_embedded_replica() {
        tracing::info!("Starting replica sync... (interval={}s)", REPLICA_SYNC_INTERVAL.as_secs());
        let db = state.db.clone();
        let token = cancel_token.child_token();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::info!("Replica sync shutting down...");
                        break;
                    }
                    _ = tokio::time::sleep(REPLICA_SYNC_INTERVAL) => {
                        if let Err(e) = db.sync().await {
                            tracing::error!("Replica sync error: {}", e);
                        }
                    }
                }
            }
        });
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("QueryLens starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/health", addr);
    tracing::info!("  API docs:     http://{}/api/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/openapi.json", addr);
    if let Some(dir) = &config.server.static_dir {
        tracing::info!("  Static files: {}", dir);
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received, cancelling background tasks...");
    cancel_token.cancel();
}
