use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::media::{MediaApi, MediaError, ResourceScope};

pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudinary.com";

/// Account credentials for the Cloudinary Admin API
#[derive(Clone, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base_url: String,
}

impl CloudinaryConfig {
    pub fn new(cloud_name: String, api_key: String, api_secret: String) -> Self {
        Self {
            cloud_name,
            api_key,
            api_secret,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct CloudinaryClient {
    client: Client,
    config: CloudinaryConfig,
    base_url: Url,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            MediaError::Transport(format!("invalid API base URL {}: {e}", config.api_base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(MediaError::Transport(format!(
                "invalid API base URL {}",
                config.api_base_url
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Build `{base}/v1_1/{cloud}/{segments...}`, percent-encoding every segment
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push("v1_1")
                .push(&self.config.cloud_name)
                .extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, MediaError> {
        let response = request
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| MediaError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MediaApi for CloudinaryClient {
    async fn delete_resources(&self, ids: &[String], scope: ResourceScope) -> Result<Value, MediaError> {
        tracing::debug!("Cloudinary DELETE resources: scope={}, count={}", scope, ids.len());

        let url = self.endpoint([
            "resources",
            scope.resource_type.as_str(),
            scope.delivery_type.as_str(),
        ]);
        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("public_ids[]", id.as_str())).collect();

        self.send(self.client.delete(url).query(&query)).await
    }

    async fn delete_resources_by_prefix(&self, prefix: &str) -> Result<Value, MediaError> {
        tracing::debug!("Cloudinary DELETE resources by prefix: prefix={}", prefix);

        let scope = ResourceScope::UPLOADED_IMAGES;
        let url = self.endpoint([
            "resources",
            scope.resource_type.as_str(),
            scope.delivery_type.as_str(),
        ]);

        self.send(self.client.delete(url).query(&[("prefix", prefix)])).await
    }

    async fn delete_folder(&self, path: &str) -> Result<Value, MediaError> {
        tracing::debug!("Cloudinary DELETE folder: path={}", path);

        // Url normalisation would drop dot segments and address another folder
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() || segments.iter().any(|s| *s == "." || *s == "..") {
            return Err(MediaError::InvalidPath(path.to_string()));
        }
        let url = self.endpoint(std::iter::once("folders").chain(segments));

        self.send(self.client.delete(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CloudinaryConfig {
        CloudinaryConfig::new("demo".into(), "key".into(), "very-secret".into())
    }

    #[test]
    fn debug_output_redacts_secret() {
        let debug_output = format!("{:?}", config());
        assert!(!debug_output.contains("very-secret"));
        assert!(debug_output.contains("[REDACTED]"));
    }

    #[test]
    fn endpoint_encodes_folder_segments() {
        let client = CloudinaryClient::new(config().with_api_base_url("http://localhost:9000/")).unwrap();
        let url = client.endpoint(["folders", "socios", "acta 2024"]);
        assert_eq!(url.as_str(), "http://localhost:9000/v1_1/demo/folders/socios/acta%202024");
    }

    #[tokio::test]
    async fn delete_folder_refuses_dot_segments_and_empty_paths() {
        let client = CloudinaryClient::new(config().with_api_base_url("http://127.0.0.1:9")).unwrap();
        for path in ["a/../b", "./a", "..", "", "/"] {
            let err = client.delete_folder(path).await.unwrap_err();
            assert!(matches!(err, MediaError::InvalidPath(ref p) if p == path), "{path:?} gave {err:?}");
        }
    }

    #[test]
    fn rejects_unusable_base_url() {
        let result = CloudinaryClient::new(config().with_api_base_url("not a url"));
        assert!(matches!(result, Err(MediaError::Transport(_))));
    }
}
