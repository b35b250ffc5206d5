use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::media::{MediaApi, MediaError, ResourceScope};
use crate::request::{DeleteFoldersRequest, DeleteImagesRequest};

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote operation a relay step invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    DeleteResources,
    DeleteResourcesByPrefix,
    DeleteFolder,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DeleteResources => "delete_resources",
            Self::DeleteResourcesByPrefix => "delete_resources_by_prefix",
            Self::DeleteFolder => "delete_folder",
        })
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{operation}({target}) failed: {source}")]
    Remote {
        operation: Operation,
        target: String,
        source: MediaError,
    },

    #[error("{operation}({target}) timed out after {}s", .after.as_secs_f64())]
    Timeout {
        operation: Operation,
        target: String,
        after: Duration,
    },
}

impl RelayError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Result of deleting one folder, in request order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderOutcome {
    pub folder: String,
    pub result: Value,
}

/// Composes remote media calls to satisfy one deletion request.
///
/// Holds no per-request state; clones share the same backend.
#[derive(Clone)]
pub struct BatchRelay {
    api: Arc<dyn MediaApi>,
    call_timeout: Duration,
}

impl BatchRelay {
    pub fn new(api: Arc<dyn MediaApi>, call_timeout: Duration) -> Self {
        Self { api, call_timeout }
    }

    /// Delete uploaded images by public id in a single remote call
    pub async fn delete_images(&self, request: &DeleteImagesRequest) -> Result<Value, RelayError> {
        let ids = request.ids();
        tracing::info!("Deleting {} images", ids.len());

        let target = format!("{} ids", ids.len());
        self.bounded(
            Operation::DeleteResources,
            &target,
            self.api.delete_resources(ids, ResourceScope::UPLOADED_IMAGES),
        )
        .await
    }

    /// Delete each folder's resources, then the folder itself, one folder at a time.
    ///
    /// The first failing step aborts the batch. Deletions already performed
    /// upstream stay deleted.
    pub async fn delete_folders(
        &self,
        request: &DeleteFoldersRequest,
    ) -> Result<Vec<FolderOutcome>, RelayError> {
        let mut outcomes = Vec::with_capacity(request.folders().len());

        for folder in request.folders() {
            let resources = self
                .bounded(
                    Operation::DeleteResourcesByPrefix,
                    folder,
                    self.api.delete_resources_by_prefix(folder),
                )
                .await?;
            tracing::info!("Resources deleted in {}: {}", folder, resources);

            let result = self
                .bounded(Operation::DeleteFolder, folder, self.api.delete_folder(folder))
                .await?;
            tracing::info!("Folder {} deleted: {}", folder, result);

            outcomes.push(FolderOutcome {
                folder: folder.clone(),
                result,
            });
        }

        Ok(outcomes)
    }

    /// Await a remote call, dropping it once the call timeout elapses
    async fn bounded(
        &self,
        operation: Operation,
        target: &str,
        call: impl Future<Output = Result<Value, MediaError>>,
    ) -> Result<Value, RelayError> {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(RelayError::Remote {
                operation,
                target: target.to_string(),
                source,
            }),
            Err(_) => Err(RelayError::Timeout {
                operation,
                target: target.to_string(),
                after: self.call_timeout,
            }),
        }
    }
}
