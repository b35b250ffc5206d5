//! Recording in-memory media backend for tests.
//!
//! Every call is recorded on entry, before any scripted delay or failure.
//! Deleted ids are remembered, so repeating a deletion reports `not_found`
//! the way the live API does.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use crate::media::{MediaApi, MediaError, ResourceScope};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaCall {
    DeleteResources { ids: Vec<String>, scope: ResourceScope },
    DeleteResourcesByPrefix(String),
    DeleteFolder(String),
}

#[derive(Default)]
pub struct RecordingMediaApi {
    calls: Mutex<Vec<MediaCall>>,
    deleted: Mutex<HashSet<String>>,
    failures: Vec<(MediaCall, String)>,
    delay: Option<Duration>,
    resources_response: Option<Value>,
}

impl RecordingMediaApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `call` with an API error carrying `message`
    pub fn fail_on(mut self, call: MediaCall, message: impl Into<String>) -> Self {
        self.failures.push((call, message.into()));
        self
    }

    /// Stall every call for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fixed body for `delete_resources` instead of the computed one
    pub fn with_resources_response(mut self, response: Value) -> Self {
        self.resources_response = Some(response);
        self
    }

    pub fn calls(&self) -> Vec<MediaCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, call: MediaCall) -> Result<(), MediaError> {
        self.calls.lock().unwrap().push(call.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.failures.iter().find(|(failing, _)| *failing == call) {
            Some((_, message)) => Err(MediaError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MediaApi for RecordingMediaApi {
    async fn delete_resources(&self, ids: &[String], scope: ResourceScope) -> Result<Value, MediaError> {
        self.enter(MediaCall::DeleteResources {
            ids: ids.to_vec(),
            scope,
        })
        .await?;

        if let Some(response) = &self.resources_response {
            return Ok(response.clone());
        }

        let mut deleted_ids = self.deleted.lock().unwrap();
        let deleted: Map<String, Value> = ids
            .iter()
            .map(|id| {
                let status = if deleted_ids.insert(id.clone()) {
                    "deleted"
                } else {
                    "not_found"
                };
                (id.clone(), Value::from(status))
            })
            .collect();

        Ok(json!({ "deleted": deleted, "partial": false }))
    }

    async fn delete_resources_by_prefix(&self, prefix: &str) -> Result<Value, MediaError> {
        self.enter(MediaCall::DeleteResourcesByPrefix(prefix.to_string()))
            .await?;
        Ok(json!({ "deleted": {}, "partial": false }))
    }

    async fn delete_folder(&self, path: &str) -> Result<Value, MediaError> {
        self.enter(MediaCall::DeleteFolder(path.to_string())).await?;
        Ok(json!({ "deleted": [path] }))
    }
}
