//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::QuantrankError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_from_error(err: &QuantrankError) -> StatusCode {
    match err {
        QuantrankError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        QuantrankError::DatasetRead { .. }
        | QuantrankError::DatasetParse { .. }
        | QuantrankError::MissingColumn { .. }
        | QuantrankError::DuplicateAsset { .. }
        | QuantrankError::ConfigParse { .. }
        | QuantrankError::ConfigInvalid { .. }
        | QuantrankError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<QuantrankError> for WebError {
    fn from(err: QuantrankError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        Self::internal(format!("template error: {}", err))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        } else {
            tracing::warn!(status = %self.status, message = %self.message, "request rejected");
        }
        let template = super::templates::ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        };
        match template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, self.message).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_maps_to_bad_request() {
        let err: WebError = QuantrankError::InvalidInput {
            field: "sort".into(),
            value: "x".into(),
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("sort"));
    }

    #[test]
    fn dataset_errors_map_to_internal() {
        let err = QuantrankError::DuplicateAsset {
            asset_id: "PETR4".into(),
        };
        assert_eq!(status_from_error(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
