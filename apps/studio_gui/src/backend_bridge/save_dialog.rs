use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use crossbeam_channel::Sender;
use studio_core::{ExportTarget, ImageLoader};

use crate::controller::events::UiEvent;

/// Asks the user where to save, prefilled with the suggested filename.
pub struct SaveDialogExportTarget {
    loader: ImageLoader,
    ui_tx: Sender<UiEvent>,
}

impl SaveDialogExportTarget {
    pub fn new(loader: ImageLoader, ui_tx: Sender<UiEvent>) -> Self {
        Self { loader, ui_tx }
    }
}

#[async_trait]
impl ExportTarget for SaveDialogExportTarget {
    async fn deliver(&self, image_reference: &str, filename: &str) -> Result<()> {
        let suggested = filename.to_string();
        let chosen: Option<PathBuf> = tokio::task::spawn_blocking(move || {
            rfd::FileDialog::new()
                .set_file_name(&suggested)
                .add_filter("JPEG image", &["jpg", "jpeg"])
                .save_file()
        })
        .await
        .context("save dialog task failed")?;

        let Some(path) = chosen else {
            tracing::debug!("export cancelled from save dialog");
            return Ok(());
        };

        let bytes = self
            .loader
            .load(image_reference)
            .await
            .context("failed to fetch design image")?;
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("failed to write '{}'", path.display()))?;

        let _ = self.ui_tx.try_send(UiEvent::Info(format!(
            "Saved design to {}",
            path.display()
        )));
        Ok(())
    }
}
