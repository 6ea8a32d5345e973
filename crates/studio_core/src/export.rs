use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::image_source::ImageLoader;

/// Host mechanism that delivers an image to the user's machine.
#[async_trait]
pub trait ExportTarget: Send + Sync {
    async fn deliver(&self, image_reference: &str, filename: &str) -> Result<()>;
}

/// Writes exported images into a fixed directory.
pub struct DirectoryExportTarget {
    loader: ImageLoader,
    directory: PathBuf,
}

impl DirectoryExportTarget {
    pub fn new(loader: ImageLoader, directory: impl Into<PathBuf>) -> Self {
        Self {
            loader,
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl ExportTarget for DirectoryExportTarget {
    async fn deliver(&self, image_reference: &str, filename: &str) -> Result<()> {
        let bytes = self
            .loader
            .load(image_reference)
            .await
            .context("failed to fetch design image")?;

        tokio::fs::create_dir_all(&self.directory)
            .await
            .with_context(|| {
                format!(
                    "failed to create download directory '{}'",
                    self.directory.display()
                )
            })?;
        let path = self.directory.join(filename);
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("failed to write '{}'", path.display()))?;

        info!(path = %path.display(), bytes = bytes.len(), "exported design image");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use axum::{routing::get, Router};
    use tokio::net::TcpListener;

    use super::*;

    #[tokio::test]
    async fn downloads_remote_image_into_directory() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let app = Router::new().route("/gown.jpg", get(|| async { b"jpeg-bytes".to_vec() }));
            axum::serve(listener, app).await.expect("serve");
        });

        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("studio_export_{suffix}"));
        let target = DirectoryExportTarget::new(ImageLoader::new(), &dir);

        target
            .deliver(&format!("http://{addr}/gown.jpg"), "fashion-design-1.jpg")
            .await
            .expect("deliver");

        let written = tokio::fs::read(dir.join("fashion-design-1.jpg"))
            .await
            .expect("exported file");
        assert_eq!(written, b"jpeg-bytes");
        tokio::fs::remove_dir_all(dir).await.expect("cleanup");
    }

    #[tokio::test]
    async fn missing_remote_image_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, Router::new()).await.expect("serve");
        });
        let dir = std::env::temp_dir().join("studio_export_missing");
        let target = DirectoryExportTarget::new(ImageLoader::new(), &dir);

        let result = target
            .deliver(&format!("http://{addr}/gone.jpg"), "fashion-design-2.jpg")
            .await;

        assert!(result.is_err());
        assert!(!dir.join("fashion-design-2.jpg").exists());
    }
}
