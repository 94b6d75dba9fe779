use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::state::AppState;

mod background;
mod charts;
mod config;
mod content;
mod error;
mod heatmap;
mod preferences;
mod routes;
mod session;
mod state;
mod styles;
mod summary;
mod traffic;
mod view_state;
mod views;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared::init_tracing!()?;
    let config = shared::load_server_config!()?;

    let state = Arc::new(AppState::new(config.seed));

    background::spawn_background_workers(Arc::clone(&state));

    // Fragment routes: /fragments/*
    let fragment_routes = Router::new().route(
        "/session/{id}/content",
        get(views::dashboard_content),
    );

    // JSON routes: /api/*
    let api_routes = Router::new()
        .route("/session/{id}/metrics", get(routes::session_metrics))
        .route("/session/{id}/snapshot", get(routes::session_snapshot));

    let app = Router::new()
        .route("/", get(views::index))
        .route("/theme/toggle", post(routes::toggle_theme))
        .route("/export", post(routes::export))
        .route("/styles.css", get(views::styles))
        .nest("/fragments", fragment_routes)
        .nest("/api", api_routes)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "dashboard listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
