//! Validation of inbound deletion payloads.
//!
//! Bodies arrive as untyped JSON and are checked field by field before any
//! typed request exists, so a malformed body can never reach the relay.

use serde_json::{Map, Value};
use thiserror::Error;

pub const MISSING_IDS: &str = "Se requiere un array de ids";
pub const MISSING_FOLDERS: &str = "Debes enviar una lista de carpetas";
pub const INVALID_FOLDER: &str = "Las rutas de carpeta no pueden estar vacías ni contener '.' o '..'";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: &'static str,
}

impl ValidationError {
    fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Public ids of images to delete; never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteImagesRequest {
    ids: Vec<String>,
}

impl DeleteImagesRequest {
    pub fn new(ids: Vec<String>) -> Result<Self, ValidationError> {
        if ids.is_empty() {
            return Err(ValidationError::new(MISSING_IDS));
        }
        Ok(Self { ids })
    }

    pub fn from_value(body: &Value) -> Result<Self, ValidationError> {
        let ids = string_array(body, "id").ok_or(ValidationError::new(MISSING_IDS))?;
        Self::new(ids)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// Folder paths to delete recursively, in processing order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFoldersRequest {
    folders: Vec<String>,
}

impl DeleteFoldersRequest {
    /// Every path must name a concrete folder: prefix deletion and folder
    /// deletion have to address the same place
    pub fn new(folders: Vec<String>) -> Result<Self, ValidationError> {
        if !folders.iter().all(|folder| is_folder_path(folder)) {
            return Err(ValidationError::new(INVALID_FOLDER));
        }
        Ok(Self { folders })
    }

    pub fn from_value(body: &Value) -> Result<Self, ValidationError> {
        let folders = string_array(body, "folders").ok_or(ValidationError::new(MISSING_FOLDERS))?;
        Self::new(folders)
    }

    pub fn folders(&self) -> &[String] {
        &self.folders
    }
}

/// Decode a raw body into a JSON object; anything else reads as `{}`
pub fn body_object(raw: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(raw) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::Object(Map::new()),
    }
}

/// Non-blank, with no empty, `.` or `..` segments between the outer slashes
fn is_folder_path(folder: &str) -> bool {
    let inner = folder.trim_matches('/');
    !inner.trim().is_empty()
        && inner
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

fn string_array(body: &Value, field: &str) -> Option<Vec<String>> {
    body.get(field)?
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_owned))
        .collect()
}
