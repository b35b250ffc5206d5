mod commands;

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use purge_core::CloudinaryConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "purge")]
#[command(about = "Bulk deletion of Cloudinary images and folders", long_about = None)]
struct Cli {
    #[command(flatten)]
    account: Account,

    /// Seconds to wait for each remote call
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Account {
    /// Cloudinary cloud name
    #[arg(long, env = "CLOUDINARY_CLOUD_NAME")]
    cloud_name: String,

    /// Cloudinary API key
    #[arg(long, env = "CLOUDINARY_API_KEY")]
    api_key: String,

    /// Cloudinary API secret
    #[arg(long, env = "CLOUDINARY_API_SECRET", hide_env_values = true)]
    api_secret: String,

    /// Admin API base URL
    #[arg(long, env = "CLOUDINARY_API_BASE_URL")]
    api_base_url: Option<String>,
}

impl Account {
    fn into_config(self) -> CloudinaryConfig {
        let config = CloudinaryConfig::new(self.cloud_name, self.api_key, self.api_secret);
        match self.api_base_url {
            Some(base_url) => config.with_api_base_url(base_url),
            None => config,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Delete uploaded images by public id
    DeleteImages {
        /// Public ids to delete
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete folders and every image stored under them
    DeleteFolders {
        /// Folder paths, processed in the given order
        #[arg(required = true)]
        folders: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "purge_cli=info,purge_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.account.into_config();
    let timeout = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Commands::DeleteImages { ids } => {
            commands::delete_images::execute(config, timeout, ids).await?;
        }
        Commands::DeleteFolders { folders } => {
            commands::delete_folders::execute(config, timeout, folders).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_folder_deletion_with_explicit_account() {
        let cli = Cli::try_parse_from([
            "purge",
            "--cloud-name",
            "demo",
            "--api-key",
            "key",
            "--api-secret",
            "secret",
            "delete-folders",
            "socios/2023",
            "socios/2024",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.timeout_secs, 5);
        assert!(matches!(
            cli.command,
            Commands::DeleteFolders { ref folders } if folders == &["socios/2023", "socios/2024"]
        ));
        let config = cli.account.into_config();
        assert_eq!(config.cloud_name, "demo");
        assert_eq!(config.api_base_url, purge_core::cloudinary::DEFAULT_API_BASE_URL);
    }

    #[test]
    fn delete_images_requires_ids() {
        let result = Cli::try_parse_from([
            "purge",
            "--cloud-name",
            "demo",
            "--api-key",
            "key",
            "--api-secret",
            "secret",
            "delete-images",
        ]);

        assert!(result.is_err());
    }
}
