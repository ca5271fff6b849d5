//! HTTP front end for a [`Visualization`].
//!
//! Serves the single page, its label options, and one figure per selection
//! change. All handlers read from the same immutable `Arc<Visualization>`.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use topicscope::prelude::*;
use tower_http::trace::TraceLayer;

const PAGE: &str = include_str!("page.html");

#[derive(Clone)]
struct AppState {
    vis: Arc<Visualization>,
}

/// Request payload for the figure endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct FigureRequest {
    /// Labels to highlight. Missing means none.
    #[serde(default)]
    pub selected: Vec<String>,
}

/// Response payload for the label endpoint.
#[derive(Debug, Serialize)]
pub struct LabelsResponse {
    pub options: Vec<LabelOption>,
    /// Preselected labels.
    pub selected: Vec<String>,
}

pub fn router(vis: Arc<Visualization>) -> Router {
    Router::new()
        .route("/", get(page))
        .route("/healthz", get(healthz))
        .route("/api/labels", get(labels))
        .route("/api/figure", post(figure))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { vis })
}

/// Serves `vis` on `listener` until ctrl-c.
pub async fn serve(listener: TcpListener, vis: Arc<Visualization>) -> anyhow::Result<()> {
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(vis))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn page() -> Html<&'static str> {
    Html(PAGE)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn labels(State(state): State<AppState>) -> Json<LabelsResponse> {
    Json(LabelsResponse {
        options: state.vis.label_options(),
        selected: state
            .vis
            .default_selection()
            .iter()
            .map(str::to_string)
            .collect(),
    })
}

async fn figure(
    State(state): State<AppState>,
    Json(payload): Json<FigureRequest>,
) -> Json<FigureSpec> {
    let selection = Selection::from_iter(payload.selected);
    for label in selection.unmatched(state.vis.labels()) {
        tracing::debug!(label, "selected label matches no chunk");
    }
    Json(state.vis.render(&selection))
}
