//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::DashboardError;

use super::templates::{ErrorFragmentTemplate, ErrorTemplate};

/// How an error is rendered: a full page, an HTMX fragment, or JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFormat {
    Page,
    Fragment,
    Json,
}

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
    pub format: ErrorFormat,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            format: ErrorFormat::Page,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_format(mut self, format: ErrorFormat) -> Self {
        self.format = format;
        self
    }
}

pub fn status_from_error(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::TickerNotFound { .. }
        | DashboardError::SectorNotFound { .. }
        | DashboardError::ObjectNotFound { .. } => StatusCode::NOT_FOUND,
        DashboardError::SeriesMalformed { .. }
        | DashboardError::EmptySeries { .. }
        | DashboardError::VolumeOverflow { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DashboardError::Storage { .. } => StatusCode::BAD_GATEWAY,
        DashboardError::LookupUnavailable { .. } | DashboardError::LookupMalformed { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        DashboardError::ConfigParse { .. }
        | DashboardError::ConfigMissing { .. }
        | DashboardError::ConfigInvalid { .. }
        | DashboardError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DashboardError> for WebError {
    fn from(err: DashboardError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        Self::internal(format!("template error: {err}"))
    }
}

impl From<serde_json::Error> for WebError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("serialization error: {err}"))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        } else {
            tracing::warn!(status = %self.status, message = %self.message, "request rejected");
        }

        let status_code = self.status.as_u16();
        let rendered = match self.format {
            ErrorFormat::Json => {
                let body = serde_json::json!({
                    "error": self.message,
                    "status": status_code,
                });
                return (self.status, Json(body)).into_response();
            }
            ErrorFormat::Fragment => ErrorFragmentTemplate {
                message: &self.message,
                status: status_code,
            }
            .render(),
            ErrorFormat::Page => ErrorTemplate {
                title: "Error",
                message: &self.message,
                status: status_code,
            }
            .render(),
        };

        match rendered {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, self.message).into_response(),
        }
    }
}
