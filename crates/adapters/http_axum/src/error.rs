//! Error translation — domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use heathub_domain::error::HeatHubError;

/// Wrapper giving [`HeatHubError`] an HTTP rendering.
///
/// The body keeps the error's `Display` text verbatim so voice front ends
/// can speak it without re-mapping.
#[derive(Debug)]
pub struct ApiError(HeatHubError);

impl From<HeatHubError> for ApiError {
    fn from(err: HeatHubError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            HeatHubError::Validation(_) => StatusCode::BAD_REQUEST,
            HeatHubError::NotFound(_) => StatusCode::NOT_FOUND,
            HeatHubError::Precondition(_) => StatusCode::CONFLICT,
            HeatHubError::Configuration(_) | HeatHubError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            HeatHubError::Scheduler(_) | HeatHubError::Device(_) => StatusCode::BAD_GATEWAY,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
