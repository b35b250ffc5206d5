use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use purge_core::{BatchRelay, CloudinaryClient, MediaApi};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub relay: BatchRelay,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let cloudinary = CloudinaryClient::new(config.cloudinary.clone())?;

        Ok(Self::with_api(Arc::new(cloudinary), config.call_timeout))
    }

    pub fn with_api(api: Arc<dyn MediaApi>, call_timeout: Duration) -> Self {
        Self {
            relay: BatchRelay::new(api, call_timeout),
        }
    }
}
