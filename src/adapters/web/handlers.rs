//! HTTP request handlers for web adapter.
//!
//! Selection state travels in the query string, so each browser session owns
//! its own sector/ticker choice and the server keeps none of it. Storage
//! access is blocking, so each recomputation runs on the blocking pool.

use askama::Template;
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::error::DashboardError;
use crate::domain::selection::{
    DashboardView, Selection, TickerOption, compute_view, default_sector, resolve_ticker, select,
    ticker_options,
};
use crate::domain::ticker::SectorFilter;

use super::error::ErrorFormat;
use super::templates::{DashboardTemplate, PanelTemplate, PanelView};
use super::{AppState, WebError, is_htmx_request};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SelectionQuery {
    pub sector: Option<String>,
    pub ticker: Option<String>,
}

async fn run_blocking<T, F>(f: F) -> Result<T, WebError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, WebError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| WebError::internal(format!("view task failed: {e}")))?
}

/// Build the panel for one interaction. Failures after the selection is
/// known become an error panel rather than an error page, so the selectors
/// stay usable.
fn panel_for(state: &AppState, query: &SelectionQuery) -> Result<(StatusCode, PanelView), WebError> {
    let currency = &state.dashboard.currency;
    let preferred = &state.dashboard.default_sector;
    let sector = query.sector.as_deref();

    let failed = |selection: Selection, err: DashboardError| {
        tracing::warn!(error = %err, ticker = %selection.ticker, "dashboard interaction failed");
        let status = super::error::status_from_error(&err);
        (status, PanelView::failed(selection, currency, &err))
    };

    let selection = match select(&state.lookup, sector, query.ticker.as_deref(), preferred) {
        Ok(selection) => selection,
        Err(err @ DashboardError::TickerNotFound { .. }) => {
            let mut fallback = select(&state.lookup, sector, None, preferred)?;
            if let Some(requested) = &query.ticker {
                fallback.ticker = requested.trim().to_string();
            }
            return Ok(failed(fallback, err));
        }
        Err(err) => return Err(err.into()),
    };

    match compute_view(&*state.data_port, &state.lookup, selection.clone(), currency) {
        Ok(view) => Ok((StatusCode::OK, PanelView::from_view(view, currency)?)),
        Err(err) => Ok(failed(selection, err)),
    }
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<SelectionQuery>,
) -> Result<Response, WebError> {
    let htmx = is_htmx_request(&headers);
    let format = if htmx {
        ErrorFormat::Fragment
    } else {
        ErrorFormat::Page
    };

    let worker_state = state.clone();
    let (status, panel) = run_blocking(move || panel_for(&worker_state, &query))
        .await
        .map_err(|e| e.with_format(format))?;

    let html = if htmx {
        PanelTemplate { panel: &panel }.render()
    } else {
        let sectors = state.lookup.sector_options();
        DashboardTemplate {
            title: &state.dashboard.title,
            sectors: &sectors,
            panel: &panel,
        }
        .render()
    }
    .map_err(|e| WebError::from(e).with_format(format))?;

    Ok((status, Html(html)).into_response())
}

#[derive(Debug, Serialize)]
pub struct SectorsResponse {
    pub sectors: Vec<String>,
    pub default: String,
}

pub async fn api_sectors(State(state): State<Arc<AppState>>) -> Json<SectorsResponse> {
    Json(SectorsResponse {
        sectors: state.lookup.sector_options(),
        default: default_sector(&state.lookup, &state.dashboard.default_sector).to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub sector: String,
    pub options: Vec<TickerOption>,
    pub selected: Option<String>,
}

pub async fn api_options(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<OptionsResponse>, WebError> {
    let sector = match query.sector.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => SectorFilter::parse(s),
        None => default_sector(&state.lookup, &state.dashboard.default_sector),
    };
    let options = ticker_options(&state.lookup, &sector)
        .map_err(|e| WebError::from(e).with_format(ErrorFormat::Json))?;
    let selected = resolve_ticker(&options, None).map(|o| o.value.clone());

    Ok(Json(OptionsResponse {
        sector: sector.to_string(),
        options,
        selected,
    }))
}

pub async fn api_view(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<DashboardView>, WebError> {
    let view = run_blocking(move || {
        let selection = select(
            &state.lookup,
            query.sector.as_deref(),
            query.ticker.as_deref(),
            &state.dashboard.default_sector,
        )?;
        Ok(compute_view(
            &*state.data_port,
            &state.lookup,
            selection,
            &state.dashboard.currency,
        )?)
    })
    .await
    .map_err(|e| e.with_format(ErrorFormat::Json))?;

    Ok(Json(view))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tickers: usize,
    pub sectors: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        tickers: state.lookup.len(),
        sectors: state.lookup.sectors().len(),
    })
}

pub async fn not_found() -> WebError {
    WebError::not_found("Page not found")
}
