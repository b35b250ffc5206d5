use std::time::Duration;

use anyhow::Result;
use purge_core::{CloudinaryConfig, DeleteImagesRequest};

pub async fn execute(config: CloudinaryConfig, timeout: Duration, ids: Vec<String>) -> Result<()> {
    tracing::info!("Deleting {} images from cloud {}", ids.len(), config.cloud_name);

    let request = DeleteImagesRequest::new(ids)?;
    let relay = super::relay(config, timeout)?;

    let result = relay.delete_images(&request).await?;

    println!("✓ Imágenes eliminadas");
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
