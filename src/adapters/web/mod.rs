//! Web server adapter.
//!
//! Axum server with an HTMX-driven page for adjusting factor weights, filtering
//! and re-sorting the ranking table in the browser.

mod error;
mod form;
mod handlers;
mod templates;

pub use error::WebError;
pub use form::{IntInput, RankingForm, RankingPayload, coerce_int};
pub use handlers::*;
pub use templates::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::asset::Dataset;
use crate::domain::rank_engine::FactorWeights;

/// Shared, read-only state. The dataset is loaded once before the server starts.
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub defaults: FactorWeights,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::index_submit))
        .route("/update_table", post(handlers::update_table))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(handlers::not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
