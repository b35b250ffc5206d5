pub mod delete_folders;
pub mod delete_images;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use purge_core::{BatchRelay, CloudinaryClient, CloudinaryConfig};

fn relay(config: CloudinaryConfig, timeout: Duration) -> Result<BatchRelay> {
    let client = CloudinaryClient::new(config)?;
    Ok(BatchRelay::new(Arc::new(client), timeout))
}
