use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use purge_core::{RelayError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Endpoint an error came from; each keeps its own error body shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    DeleteImages,
    DeleteFolders,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{1}")]
    Validation(Route, #[source] ValidationError),
    #[error("{source}")]
    Relay { route: Route, source: RelayError },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorBody {
    Error { error: String },
    Failure { success: bool, message: String },
}

impl AppError {
    pub fn validation(route: Route, error: ValidationError) -> Self {
        Self::Validation(route, error)
    }

    pub fn relay(route: Route, source: RelayError) -> Self {
        Self::Relay { route, source }
    }

    fn route(&self) -> Route {
        match self {
            Self::Validation(route, _) | Self::Relay { route, .. } => *route,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(..) => StatusCode::BAD_REQUEST,
            Self::Relay { source, .. } if source.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Relay { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match (self.route(), &self) {
            (Route::DeleteImages, Self::Validation(_, error)) => ErrorBody::Error {
                error: error.to_string(),
            },
            (Route::DeleteImages, Self::Relay { source, .. }) => ErrorBody::Error {
                error: format!("No se pudieron eliminar las imágenes: {source}"),
            },
            (Route::DeleteFolders, _) => ErrorBody::Failure {
                success: false,
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
