//! Stockroom Storefront - catalog, cart, and order submission server.
//!
//! # Architecture
//!
//! - Axum JSON API over a static product catalog
//! - One process-wide cart, persisted through a file-backed key-value
//!   store when a data directory is configured
//! - Order submissions validated server-side and forwarded to the
//!   operator by best-effort email (Resend)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockroom_storefront::cart::CartManager;
use stockroom_storefront::catalog::Catalog;
use stockroom_storefront::config::StorefrontConfig;
use stockroom_storefront::routes;
use stockroom_storefront::services::{Notifier, ResendClient};
use stockroom_storefront::state::AppState;
use stockroom_storefront::storage::{FileStore, KeyValueStore, NullStore};

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stockroom_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Durable storage is a configured capability, not a runtime probe.
    let kv: Arc<dyn KeyValueStore> = match &config.data_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "using file-backed storage");
            Arc::new(FileStore::new(dir.clone()))
        }
        None => {
            tracing::warn!("STOREFRONT_DATA_DIR not set; cart will not survive a restart");
            Arc::new(NullStore)
        }
    };

    // Subscribe before init so the observer also sees the load
    // notification, like any other mutation.
    let mut cart = CartManager::new(kv);
    cart.subscribe(|| tracing::debug!("cart changed"));
    cart.init();

    let notifier = match (&config.resend_api_key, &config.admin_email) {
        (Some(api_key), Some(admin_email)) => {
            let client = ResendClient::new(
                api_key,
                admin_email.clone(),
                config.store_name.clone(),
                config.notify_timeout,
            )
            .expect("Failed to build email client");
            tracing::info!(admin_email = %admin_email, "order notifications enabled");
            Notifier::Resend(client)
        }
        _ => {
            tracing::info!("RESEND_API_KEY not set; order notifications will be logged only");
            Notifier::LogOnly
        }
    };

    let state = AppState::new(config.clone(), Catalog::builtin(), cart, notifier);

    let app = Router::new()
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
