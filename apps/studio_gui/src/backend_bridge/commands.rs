//! Backend commands queued from UI to backend worker.

use shared::domain::DesignId;

pub enum BackendCommand {
    /// Submit whatever prompt text the controller currently holds.
    Submit,
    LoadPreview {
        design_id: DesignId,
        image_reference: String,
    },
    Export {
        design_id: DesignId,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit => "submit",
            BackendCommand::LoadPreview { .. } => "load_preview",
            BackendCommand::Export { .. } => "export",
        }
    }
}
