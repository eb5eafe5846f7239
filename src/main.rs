// ABOUTME: Main entry point for the acronyms REST API
// ABOUTME: Sets up logging, configuration, storage, routes and graceful shutdown

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{fmt, EnvFilter};

mod acronyms;
mod auth;
mod categories;
mod config;
mod entities;
mod error;
mod middleware;
mod migration;
mod session;
mod storage;
mod types;
mod users;

#[cfg(test)]
mod integration_tests;

use config::Config;
use storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub config: Arc<Config>,
}

pub fn app(state: AppState) -> Router {
    let acronym_collection = get(acronyms::list_acronyms).post(acronyms::create_acronym);
    let user_collection = get(users::list_users).post(users::create_user);
    let category_collection = get(categories::list_categories).post(categories::create_category);

    Router::new()
        .route("/api/acronyms", acronym_collection.clone())
        .route("/api/acronyms/", acronym_collection)
        .route("/api/acronyms/first", get(acronyms::first_acronym))
        .route("/api/acronyms/sorted", get(acronyms::sorted_acronyms))
        .route(
            "/api/acronyms/:id",
            get(acronyms::get_acronym)
                .put(acronyms::update_acronym)
                .delete(acronyms::delete_acronym),
        )
        .route("/api/acronyms/:id/user", get(acronyms::get_acronym_user))
        .route(
            "/api/acronyms/:id/categories",
            get(acronyms::get_acronym_categories),
        )
        .route(
            "/api/acronyms/:id/categories/:category_id",
            post(acronyms::add_category).delete(acronyms::remove_category),
        )
        .route("/api/users", user_collection.clone())
        .route("/api/users/", user_collection)
        .route("/api/users/login", post(auth::login))
        .route("/api/users/logout", post(auth::logout))
        .route("/api/users/:id", get(users::get_user))
        .route("/api/users/:id/acronyms", get(users::get_user_acronyms))
        .route("/api/categories", category_collection.clone())
        .route("/api/categories/", category_collection)
        .route("/api/categories/:id", get(categories::get_category))
        .route(
            "/api/categories/:id/acronyms",
            get(categories::get_category_acronyms),
        )
        .layer(axum_middleware::from_fn(middleware::api_headers))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("acronyms=info,tower_http=info")),
        )
        .init();

    let config = Arc::new(Config::load()?);

    let storage = Arc::new(Storage::new(&config.database_url).await?);

    let purged = storage
        .purge_expired_tokens(config.token_max_age_secs)
        .await?;
    if purged > 0 {
        tracing::info!("Purged {} expired session tokens", purged);
    }

    let state = AppState {
        storage,
        config: config.clone(),
    };

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Server running on http://{}", address);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!("Failed to install signal handler: {}", err);
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
}
