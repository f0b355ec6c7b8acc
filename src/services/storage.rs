use anyhow::Result;
use log::{debug, info};
use rand::RngCore;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::UploadConfig;
use crate::errors::ApiError;

const NAME_HEX_LEN: usize = 32;

/// Stored file as reported back to the admin panel
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoredFile {
    pub name: String,
    pub url: String,
    pub size: usize,
    pub content_type: String,
}

/// Local-disk store for uploaded images, videos and certificates.
///
/// Files are written under random names so only names this store generated
/// can ever be resolved back to a path.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    public_base_url: String,
}

impl FileStorage {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            max_file_size: config.max_file_size_bytes,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        info!("Upload directory ready at {}", self.dir.display());
        Ok(())
    }

    /// Lowercased extension of a client filename, if it is allowed
    pub fn accepted_extension(&self, filename: &str) -> Result<String, ApiError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| {
                ApiError::UnsupportedMediaType(format!("File '{}' has no extension", filename))
            })?;

        if self.allowed_extensions.iter().any(|e| *e == extension) {
            Ok(extension)
        } else {
            Err(ApiError::UnsupportedMediaType(format!(
                "Extension '.{}' is not allowed",
                extension
            )))
        }
    }

    pub fn check_size(&self, size: usize) -> Result<(), ApiError> {
        if size > self.max_file_size {
            return Err(ApiError::PayloadTooLarge(format!(
                "File exceeds the {} byte limit",
                self.max_file_size
            )));
        }
        Ok(())
    }

    fn generate_name(extension: &str) -> String {
        let mut bytes = [0u8; NAME_HEX_LEN / 2];
        rand::thread_rng().fill_bytes(&mut bytes);
        format!("{}.{}", hex::encode(bytes), extension)
    }

    /// Path for a stored name; anything that is not `<32 hex>.<ext>` is rejected
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ApiError> {
        let invalid = || ApiError::BadRequest(format!("Invalid file name '{}'", name));

        let (stem, extension) = name.split_once('.').ok_or_else(invalid)?;
        let stem_ok = stem.len() == NAME_HEX_LEN
            && stem
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        let extension_ok = !extension.is_empty()
            && extension
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());

        if !stem_ok || !extension_ok {
            return Err(invalid());
        }

        Ok(self.dir.join(name))
    }

    pub fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.public_base_url, name)
    }

    /// Write an already size-checked file and describe it
    pub async fn save(&self, extension: &str, bytes: &[u8]) -> Result<StoredFile> {
        self.check_size(bytes.len())?;

        let name = Self::generate_name(extension);
        let path = self.dir.join(&name);
        tokio::fs::write(&path, bytes).await?;
        debug!("Stored upload {} ({} bytes)", name, bytes.len());

        Ok(StoredFile {
            url: self.public_url(&name),
            size: bytes.len(),
            content_type: content_type_for(extension).to_string(),
            name,
        })
    }

    /// Read a stored file; `Ok(None)` when it does not exist
    pub async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.resolve(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a stored file; returns whether it existed
    pub async fn delete(&self, name: &str) -> Result<bool> {
        let path = self.resolve(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Deleted upload {}", name);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Extension part of a stored name
pub fn extension_of(name: &str) -> &str {
    name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_in(dir: &Path) -> FileStorage {
        FileStorage::new(&UploadConfig {
            dir: dir.to_string_lossy().into_owned(),
            max_file_size_bytes: 16,
            allowed_extensions: vec!["png".into(), ".JPG".into()],
            public_base_url: "/api/v1/uploads/".into(),
        })
    }

    #[test]
    fn test_accepted_extension() {
        let storage = storage_in(Path::new("uploads"));
        assert_eq!(storage.accepted_extension("Ring.PNG").unwrap(), "png");
        assert_eq!(storage.accepted_extension("photo.jpg").unwrap(), "jpg");
        assert!(matches!(
            storage.accepted_extension("run.exe"),
            Err(ApiError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            storage.accepted_extension("README"),
            Err(ApiError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let storage = storage_in(Path::new("uploads"));
        assert!(storage.resolve("../etc/passwd").is_err());
        assert!(storage.resolve("..%2Fsecret.png").is_err());
        assert!(storage.resolve(&format!("{}.png/..", "a".repeat(32))).is_err());
        assert!(storage.resolve(&format!("{}.png", "A".repeat(32))).is_err());
        assert!(storage.resolve(&format!("{}.png", "a".repeat(32))).is_ok());
    }

    #[test]
    fn test_size_limit() {
        let storage = storage_in(Path::new("uploads"));
        assert!(storage.check_size(16).is_ok());
        assert!(matches!(
            storage.check_size(17),
            Err(ApiError::PayloadTooLarge(_))
        ));
    }

    #[tokio::test]
    async fn test_save_read_delete() {
        let dir = std::env::temp_dir().join(format!("jewel-store-test-{}", rand::random::<u64>()));
        let storage = storage_in(&dir);
        storage.ensure_dir().await.unwrap();

        let stored = storage.save("png", b"\x89PNG fake").await.unwrap();
        assert_eq!(stored.content_type, "image/png");
        assert_eq!(stored.url, format!("/api/v1/uploads/{}", stored.name));
        assert_eq!(extension_of(&stored.name), "png");

        let bytes = storage.read(&stored.name).await.unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"\x89PNG fake"[..]));

        assert!(storage.delete(&stored.name).await.unwrap());
        assert!(!storage.delete(&stored.name).await.unwrap());
        assert!(storage.read(&stored.name).await.unwrap().is_none());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
