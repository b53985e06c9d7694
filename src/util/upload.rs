use crate::config::upload_conf::UPLOAD_URL_PREFIX;
use crate::dto::gift_dto::UploadedFile;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

/// Attempts at a free name before giving up on a busy millisecond.
const MAX_NAME_ATTEMPTS: i64 = 16;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Failed to prepare upload directory {0}: {1}")]
    Directory(String, std::io::Error),
    #[error("Failed to write upload {0}: {1}")]
    Write(String, std::io::Error),
    #[error("No free file name for upload {0}")]
    NameExhausted(String),
}

/// Local directory holding uploaded gift images.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Creates the directory if it does not exist yet.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| UploadError::Directory(dir.display().to_string(), e))?;
        info!("Upload directory ready at {}", dir.display());
        Ok(UploadStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<millis>-<original name>`, keeping only the last path component of
    /// the client-supplied name.
    pub fn stored_name(original: &str, millis: i64) -> String {
        let base = original
            .rsplit(['/', '\\'])
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .unwrap_or("upload");
        format!("{}-{}", millis, base)
    }

    pub fn public_path(stored_name: &str) -> String {
        format!("{}/{}", UPLOAD_URL_PREFIX, stored_name)
    }

    /// Writes the file and returns the public path it is served under.
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.data.len()))]
    pub async fn save(&self, file: &UploadedFile) -> Result<String, UploadError> {
        let millis = chrono::Utc::now().timestamp_millis();
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = Self::stored_name(&file.file_name, millis + attempt);
            let path = self.dir.join(&name);
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;
            let mut handle = match opened {
                Ok(handle) => handle,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("Upload name {} taken, retrying", name);
                    continue;
                }
                Err(e) => return Err(UploadError::Write(name, e)),
            };
            handle
                .write_all(&file.data)
                .await
                .map_err(|e| UploadError::Write(name.clone(), e))?;
            handle.flush().await.map_err(|e| UploadError::Write(name.clone(), e))?;
            info!("Stored upload as {}", name);
            return Ok(Self::public_path(&name));
        }
        warn!("Could not find a free name for {}", file.file_name);
        Err(UploadError::NameExhausted(file.file_name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gift-upload-{}-{}", tag, bson::oid::ObjectId::new().to_hex()))
    }

    #[test]
    fn test_stored_name_is_timestamp_prefixed() {
        assert_eq!(UploadStore::stored_name("mug.png", 1700000000000), "1700000000000-mug.png");
    }

    #[test]
    fn test_stored_name_drops_directories() {
        assert_eq!(UploadStore::stored_name("../../etc/passwd", 1), "1-passwd");
        assert_eq!(UploadStore::stored_name("C:\\photos\\mug.png", 1), "1-mug.png");
        assert_eq!(UploadStore::stored_name("..", 1), "1-upload");
    }

    #[tokio::test]
    async fn test_save_writes_file_and_returns_public_path() {
        let dir = scratch_dir("save");
        let store = UploadStore::new(&dir).await.unwrap();
        let file = UploadedFile {
            file_name: "mug.png".to_string(),
            content_type: Some("image/png".to_string()),
            data: Bytes::from_static(b"png-bytes"),
        };
        let path = store.save(&file).await.unwrap();
        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with("-mug.png"));
        let name = path.trim_start_matches("/uploads/");
        let written = tokio::fs::read(dir.join(name)).await.unwrap();
        assert_eq!(written, b"png-bytes");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_same_name_twice_does_not_overwrite() {
        let dir = scratch_dir("collide");
        let store = UploadStore::new(&dir).await.unwrap();
        let file = UploadedFile {
            file_name: "same.png".to_string(),
            content_type: None,
            data: Bytes::from_static(b"x"),
        };
        let first = store.save(&file).await.unwrap();
        let second = store.save(&file).await.unwrap();
        assert_ne!(first, second);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
