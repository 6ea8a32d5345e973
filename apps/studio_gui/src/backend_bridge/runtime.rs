//! Runtime bridge between UI command queue and the submission controller.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use shared::domain::DesignId;
use studio_core::{gallery, DesignSubmissionController, ImageLoader, StudioError, StudioEvent};
use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};

use crate::backend_bridge::{commands::BackendCommand, save_dialog::SaveDialogExportTarget};
use crate::controller::events::UiEvent;
use crate::media::decode_preview_image;

pub fn spawn_backend_thread(
    controller: Arc<DesignSubmissionController>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let loader = ImageLoader::new();
            let exporter = Arc::new(SaveDialogExportTarget::new(loader.clone(), ui_tx.clone()));
            let forwarder = spawn_event_forwarder(&controller, loader.clone(), ui_tx.clone());

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Submit => {
                        let controller = Arc::clone(&controller);
                        // Outcome arrives as a notice through the event forwarder.
                        tokio::spawn(async move {
                            let _ = controller.submit_current().await;
                        });
                    }
                    BackendCommand::LoadPreview {
                        design_id,
                        image_reference,
                    } => spawn_preview_load(loader.clone(), design_id, image_reference, ui_tx.clone()),
                    BackendCommand::Export { design_id } => {
                        let record = match controller
                            .design(design_id)
                            .ok_or(StudioError::UnknownDesign(design_id))
                        {
                            Ok(record) => record,
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::Error(err.to_string()));
                                continue;
                            }
                        };
                        let exporter = Arc::clone(&exporter);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            if let Err(err) = gallery::export_record(&record, exporter.as_ref()).await
                            {
                                tracing::warn!(%design_id, "export failed: {err:#}");
                                let _ = ui_tx.try_send(UiEvent::Error(format!(
                                    "Download failed: {err:#}"
                                )));
                            }
                        });
                    }
                }
            }

            forwarder.abort();
            tracing::info!("ui command channel closed; backend worker stopping");
        });
    });
}

fn spawn_event_forwarder(
    controller: &DesignSubmissionController,
    loader: ImageLoader,
    ui_tx: Sender<UiEvent>,
) -> JoinHandle<()> {
    let mut events = controller.subscribe_events();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let preview = match &event {
                        StudioEvent::DesignCreated(record) => {
                            Some((record.id(), record.image_reference().to_string()))
                        }
                        _ => None,
                    };
                    let _ = ui_tx.try_send(UiEvent::Studio(event));
                    if let Some((design_id, image_reference)) = preview {
                        spawn_preview_load(loader.clone(), design_id, image_reference, ui_tx.clone());
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "ui event forwarder lagged behind controller");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn spawn_preview_load(
    loader: ImageLoader,
    design_id: DesignId,
    image_reference: String,
    ui_tx: Sender<UiEvent>,
) {
    tokio::spawn(async move {
        let decoded = match loader.load(&image_reference).await {
            Ok(bytes) => tokio::task::spawn_blocking(move || decode_preview_image(&bytes))
                .await
                .unwrap_or_else(|err| Err(format!("preview decode task failed: {err}"))),
            Err(err) => Err(err.to_string()),
        };
        let event = match decoded {
            Ok(image) => UiEvent::PreviewLoaded { design_id, image },
            Err(reason) => {
                tracing::debug!(%design_id, "preview unavailable: {reason}");
                UiEvent::PreviewFailed { design_id, reason }
            }
        };
        let _ = ui_tx.try_send(event);
    });
}
