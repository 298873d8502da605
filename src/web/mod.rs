//! JSON HTTP surface.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::error::AppError;

mod routes;
mod state;

pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(routes::home))
        .route("/home", get(routes::home))
        .route("/summoner/{name}", get(routes::summoner))
        .route("/summoner/{name}/masteries", get(routes::masteries))
        .route("/summoner/{name}/refresh", get(routes::refresh))
        .route("/leaderboard", get(routes::leaderboard))
        .route("/contact", post(routes::contact))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, bind_addr: &str) -> Result<(), AppError> {
    let app = router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    info!(bind_addr, "🌐 Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🌐 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("🌐 Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = ?e, "🌐 ❌ Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("🌐 Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = ?e, "🌐 ❌ Failed to install terminate handler");
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
