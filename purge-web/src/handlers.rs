use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use chrono::Utc;
use purge_core::request::body_object;
use purge_core::{DeleteFoldersRequest, DeleteImagesRequest, FolderOutcome};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, Route};
use crate::state::AppState;

pub const IMAGES_DELETED: &str = "Imágenes eliminadas";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteImagesResponse {
    message: &'static str,
    result: Value,
}

#[derive(Debug, Serialize)]
pub struct DeleteFoldersResponse {
    success: bool,
    results: Vec<FolderOutcome>,
}

/// Parse the body only when it is declared as JSON; anything else reads as `{}`
fn json_body(headers: &HeaderMap, body: &[u8]) -> Value {
    let declared_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));

    if declared_json {
        body_object(body)
    } else {
        Value::Object(Map::new())
    }
}

pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

/// Delete uploaded images by public id
pub async fn delete_images(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DeleteImagesResponse>, AppError> {
    let request = DeleteImagesRequest::from_value(&json_body(&headers, &body))
        .map_err(|e| AppError::validation(Route::DeleteImages, e))?;

    let result = state.relay.delete_images(&request).await.map_err(|e| {
        tracing::error!("Failed to delete images: {:?}", e);
        AppError::relay(Route::DeleteImages, e)
    })?;

    Ok(Json(DeleteImagesResponse {
        message: IMAGES_DELETED,
        result,
    }))
}

/// Delete folders together with everything stored under them
pub async fn delete_folders(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DeleteFoldersResponse>, AppError> {
    let request = DeleteFoldersRequest::from_value(&json_body(&headers, &body))
        .map_err(|e| AppError::validation(Route::DeleteFolders, e))?;

    tracing::info!("Folder deletion request: folders={:?}", request.folders());

    let results = state.relay.delete_folders(&request).await.map_err(|e| {
        tracing::error!("Failed to delete folders: {:?}", e);
        AppError::relay(Route::DeleteFolders, e)
    })?;

    Ok(Json(DeleteFoldersResponse {
        success: true,
        results,
    }))
}
