pub mod error;
pub mod handlers;
pub mod types;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

/// Serve the HTTP surface: `POST /solve`, `POST /resume`,
/// `POST /export/:format`, `GET /health`. No auth, no persistence — this
/// domain has no user identity or historical-run storage.
pub async fn serve(host: &str, port: u16) -> Result<()> {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/solve", post(handlers::solve::solve))
        .route("/resume", post(handlers::resume::resume))
        .route("/export/{format}", post(handlers::export::export))
        .layer(cors);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    println!("cashflow-scheduler listening on {addr}");
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
