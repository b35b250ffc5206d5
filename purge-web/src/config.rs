use std::collections::HashMap;
use std::env;
use std::time::Duration;

use purge_core::CloudinaryConfig;
use thiserror::Error;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,https://cooperativatp.netlify.app";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Process-wide settings, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub call_timeout: Duration,
    pub cloudinary: CloudinaryConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let cloud_name = required_trimmed(&lookup, "CLOUDINARY_CLOUD_NAME")?;
        let api_key = required_trimmed(&lookup, "CLOUDINARY_API_KEY")?;
        let api_secret = required_trimmed(&lookup, "CLOUDINARY_API_SECRET")?;

        let mut cloudinary = CloudinaryConfig::new(cloud_name, api_key, api_secret);
        if let Some(base_url) = optional_trimmed(&lookup, "CLOUDINARY_API_BASE_URL") {
            if !is_http_url(&base_url) {
                return Err(ConfigError::Invalid(
                    "CLOUDINARY_API_BASE_URL must start with http:// or https://".to_string(),
                ));
            }
            cloudinary = cloudinary.with_api_base_url(base_url);
        }

        let port = value_or_default(&lookup, "PORT", "3000")
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid("PORT must be an integer in [0, 65535]".to_string()))?;

        let allowed_origins: Vec<String> =
            value_or_default(&lookup, "ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)
                .split(',')
                .map(|origin| origin.trim().trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
        if let Some(bad) = allowed_origins.iter().find(|origin| !is_http_url(origin)) {
            return Err(ConfigError::Invalid(format!(
                "ALLOWED_ORIGINS entry {bad} must start with http:// or https://"
            )));
        }

        let timeout_secs = value_or_default(&lookup, "REMOTE_CALL_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::Invalid(
                    "REMOTE_CALL_TIMEOUT_SECS must be an integer in [1, 600]".to_string(),
                )
            })?;
        if !(1..=600).contains(&timeout_secs) {
            return Err(ConfigError::Invalid(
                "REMOTE_CALL_TIMEOUT_SECS must be in [1, 600]".to_string(),
            ));
        }

        Ok(Self {
            port,
            allowed_origins,
            call_timeout: Duration::from_secs(timeout_secs),
            cloudinary,
        })
    }
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn required_trimmed(
    lookup: impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    optional_trimmed(lookup, name).ok_or(ConfigError::MissingVar(name))
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
