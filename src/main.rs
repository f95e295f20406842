//! Cuia - ordering backend for a Pará restaurant
//!
//! Serves the menu catalog, a rule-based ordering assistant that answers in
//! Portuguese, and order pricing and tracking over a JSON HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod config;
mod conversation;
mod core;
mod routes;

use crate::catalog::Catalog;
use crate::config::{Config, MenuFile};
use crate::core::{ChatEngine, RestaurantStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub chat_engine: Arc<ChatEngine>,
    pub store: Arc<RestaurantStore>,
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    match &config.menu_file {
        Some(path) => {
            let menu = MenuFile::from_file(path)?;
            tracing::info!(
                restaurant = %menu.restaurant.name,
                dishes = menu.dishes.len(),
                "Loaded menu from {}",
                path.display()
            );
            Ok(menu.into_catalog()?)
        }
        None => Ok(Catalog::builtin()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cuia=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let catalog = Arc::new(load_catalog(&config)?);
    tracing::info!("🍲 Catalog ready with {} dish(es)", catalog.len());

    let store = Arc::new(RestaurantStore::new(&config.database_path()).await?);

    if config.seed_on_startup {
        let report = store.seed_dishes(catalog.all()).await?;
        tracing::info!(
            created = report.created,
            updated = report.updated,
            total = report.total,
            "Seeded dishes"
        );
    }

    let chat_engine = Arc::new(ChatEngine::new(catalog.clone(), store.clone()));

    let state = AppState {
        config,
        catalog,
        chat_engine,
        store: store.clone(),
    };

    let app = Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("🔥 Cuia API running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
