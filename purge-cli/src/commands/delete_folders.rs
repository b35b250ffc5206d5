use std::time::Duration;

use anyhow::Result;
use purge_core::{CloudinaryConfig, DeleteFoldersRequest};

pub async fn execute(config: CloudinaryConfig, timeout: Duration, folders: Vec<String>) -> Result<()> {
    tracing::info!("Deleting {} folders from cloud {}", folders.len(), config.cloud_name);

    let request = DeleteFoldersRequest::new(folders)?;
    let relay = super::relay(config, timeout)?;

    let outcomes = relay.delete_folders(&request).await?;

    for outcome in &outcomes {
        println!("✓ Folder deleted: {}", outcome.folder);
    }
    println!("{}", serde_json::to_string_pretty(&outcomes)?);

    Ok(())
}
