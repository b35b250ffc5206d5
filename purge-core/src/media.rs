use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors raised by a media backend
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media API responded {status}: {message}")]
    Api { status: u16, message: String },

    #[error("media API request failed: {0}")]
    Transport(String),

    #[error("media API returned an unreadable body: {0}")]
    Decode(String),

    #[error("folder path {0:?} does not name a single folder")]
    InvalidPath(String),
}

/// Kind of asset a deletion targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Image,
    Video,
    Raw,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Raw => "raw",
        }
    }
}

/// Storage (delivery) type of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryType {
    Upload,
    Private,
    Authenticated,
}

impl DeliveryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Private => "private",
            Self::Authenticated => "authenticated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceScope {
    pub resource_type: ResourceType,
    pub delivery_type: DeliveryType,
}

impl ResourceScope {
    /// Publicly uploaded images, the scope every relay deletion uses
    pub const UPLOADED_IMAGES: Self = Self {
        resource_type: ResourceType::Image,
        delivery_type: DeliveryType::Upload,
    };
}

impl fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type.as_str(), self.delivery_type.as_str())
    }
}

/// Remote media management operations the relay depends on.
///
/// Results are passed through untouched; the relay never inspects them.
#[async_trait]
pub trait MediaApi: Send + Sync {
    /// Delete the given public ids within `scope`
    async fn delete_resources(&self, ids: &[String], scope: ResourceScope) -> Result<Value, MediaError>;

    /// Delete every uploaded image whose public id starts with `prefix`
    async fn delete_resources_by_prefix(&self, prefix: &str) -> Result<Value, MediaError>;

    /// Delete an (empty) folder entry
    async fn delete_folder(&self, path: &str) -> Result<Value, MediaError>;
}
