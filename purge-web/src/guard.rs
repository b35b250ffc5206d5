//! Cross-origin admission.
//!
//! The allow-list is decided here, before routing, so a rejected origin never
//! reaches a handler. `CorsLayer` only advertises the same policy to browsers
//! and answers preflights.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

pub const ALLOWED_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::DELETE];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OriginRejection {
    #[error("origin {0} is not allowed")]
    Origin(String),
    #[error("method {0} is not allowed")]
    Method(Method),
}

impl IntoResponse for OriginRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Origin(_) => (StatusCode::FORBIDDEN, "Not allowed by CORS").into_response(),
            Self::Method(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "GET, POST, DELETE")],
                "Method not allowed",
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OriginGuard {
    allowed: Arc<[String]>,
}

impl OriginGuard {
    pub fn new(allowed: Vec<String>) -> Self {
        Self {
            allowed: allowed.into(),
        }
    }

    /// Admit requests with no origin or an allow-listed one, using an allowed method
    pub fn check(&self, origin: Option<&str>, method: &Method) -> Result<(), OriginRejection> {
        if !ALLOWED_METHODS.contains(method) {
            return Err(OriginRejection::Method(method.clone()));
        }

        match origin {
            None | Some("") => Ok(()),
            Some(origin) if self.allowed.iter().any(|allowed| allowed == origin) => Ok(()),
            Some(origin) => Err(OriginRejection::Origin(origin.to_string())),
        }
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .allowed
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(ALLOWED_METHODS)
            .allow_headers(AllowHeaders::mirror_request())
    }
}

pub async fn enforce(State(guard): State<OriginGuard>, request: Request, next: Next) -> Response {
    // A non-UTF-8 origin can never match the allow-list
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .map(|value| value.to_str().unwrap_or("\u{fffd}"));

    if let Err(rejection) = guard.check(origin, request.method()) {
        tracing::warn!("Rejected cross-origin request: {}", rejection);
        return rejection.into_response();
    }

    next.run(request).await
}
