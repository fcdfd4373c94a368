//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    Form, Json,
    extract::{Query, State, rejection::JsonRejection},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::query_view::RankingQuery;

use super::form::{RankingForm, RankingPayload};
use super::templates::{IndexTemplate, RankingTableTemplate};
use super::{AppState, WebError, is_htmx_request};

fn render_table(state: &AppState, query: &RankingQuery) -> Result<String, WebError> {
    let rows = query.execute(&state.dataset);
    tracing::debug!(
        momentum = query.weights.momentum,
        low_risk = query.weights.low_risk,
        magic_formula = query.weights.magic_formula,
        filter = %query.filter,
        sort = query.sort.code(),
        rows = rows.len(),
        "ranking computed"
    );
    Ok(RankingTableTemplate { rows: &rows }.render()?)
}

fn render_page(
    state: &AppState,
    headers: &HeaderMap,
    form: RankingForm,
) -> Result<Response, WebError> {
    let query = form.into_query(state.defaults)?;
    let table = render_table(state, &query)?;

    if is_htmx_request(headers) {
        return Ok(Html(table).into_response());
    }
    let page = IndexTemplate::new(&table, &query).render()?;
    Ok(Html(page).into_response())
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(form): Query<RankingForm>,
) -> Result<Response, WebError> {
    render_page(&state, &headers, form)
}

pub async fn index_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<RankingForm>,
) -> Result<Response, WebError> {
    render_page(&state, &headers, form)
}

#[derive(Debug, serde::Serialize)]
pub struct TableResponse {
    pub html_table: String,
}

pub async fn update_table(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RankingPayload>, JsonRejection>,
) -> Result<Json<TableResponse>, WebError> {
    let Json(payload) = payload.map_err(|e| WebError::bad_request(e.body_text()))?;
    let query = payload.into_query(state.defaults)?;
    let html_table = render_table(&state, &query)?;
    Ok(Json(TableResponse { html_table }))
}

pub async fn not_found() -> WebError {
    WebError::not_found("page not found")
}
