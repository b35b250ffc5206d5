use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::guard::{self, OriginGuard};
use crate::handlers;
use crate::state::AppState;

pub fn app_router(state: AppState, guard: OriginGuard) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/delete-images", post(handlers::delete_images))
        .route("/delete-folders", post(handlers::delete_folders))
        .layer(middleware::from_fn_with_state(guard.clone(), guard::enforce))
        .layer(guard.cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
