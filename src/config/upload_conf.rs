use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::config::ConfigError;

/// Public URL prefix under which stored uploads are served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// Local file store configuration for gift images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory uploads are written to and served from
    pub dir: PathBuf,
    /// Request body limit for multipart uploads, in bytes
    pub max_bytes: usize,
    /// Keep the previous gift image when an update carries no file
    pub keep_image_on_update: bool,
}

impl UploadConfig {
    /// Load upload configuration from environment variables
    ///
    /// - UPLOAD_DIR (defaults to `uploads`)
    /// - UPLOAD_MAX_BYTES (defaults to 10 MiB)
    /// - GIFT_KEEP_IMAGE_ON_UPDATE (`true`/`false`, defaults to `false`)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading upload configuration from environment variables");
        let defaults = UploadConfig::default();

        let dir = env::var("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.dir);
        debug!("Upload directory: {}", dir.display());

        let max_bytes = match env::var("UPLOAD_MAX_BYTES") {
            Ok(v) => v.parse::<usize>().map_err(|_| {
                error!("Invalid UPLOAD_MAX_BYTES value: {}", v);
                ConfigError::InvalidValue("Invalid UPLOAD_MAX_BYTES value".to_string())
            })?,
            Err(_) => defaults.max_bytes,
        };

        let keep_image_on_update = match env::var("GIFT_KEEP_IMAGE_ON_UPDATE") {
            Ok(v) => v.parse::<bool>().map_err(|_| {
                error!("Invalid GIFT_KEEP_IMAGE_ON_UPDATE value: {}", v);
                ConfigError::InvalidValue("GIFT_KEEP_IMAGE_ON_UPDATE must be true or false".to_string())
            })?,
            Err(_) => defaults.keep_image_on_update,
        };

        let config = UploadConfig { dir, max_bytes, keep_image_on_update };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError("Upload directory cannot be empty".to_string()));
        }
        if self.max_bytes == 0 {
            return Err(ConfigError::ValidationError("UPLOAD_MAX_BYTES must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            dir: PathBuf::from("uploads"),
            max_bytes: 10 * 1024 * 1024,
            keep_image_on_update: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UploadConfig::default();
        assert_eq!(config.dir, PathBuf::from("uploads"));
        assert!(!config.keep_image_on_update);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_limit() {
        let config = UploadConfig { max_bytes: 0, ..UploadConfig::default() };
        assert!(config.validate().is_err());
    }
}
