//! Axum server setup and router configuration.

use crate::api::{self, routing::Route};
use crate::shutdown::shutdown_signal;
use crate::state::AppState;
use axum::{Extension, Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Build the main application router.
///
/// Every entry of `routes` is served by the shared lookup handler with its
/// own [`RouteBehavior`](crate::api::routing::RouteBehavior).
pub fn build_router(state: AppState, routes: &[Route]) -> Router {
    let mut router = Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/inject-script.js", get(api::inject_script::inject_script));

    for route in routes {
        tracing::debug!(path = %route.path, behavior = ?route.behavior, "Registering lookup route");
        router = router.route(
            &route.path,
            get(api::order_lookup).layer(Extension(route.behavior)),
        );
    }

    router.with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Simple health check - returns OK if the server is running.
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Run the server with graceful shutdown support.
pub async fn run_server(router: Router, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
