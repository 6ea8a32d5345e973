//! Events flowing from the backend worker to the UI thread.

use shared::domain::DesignId;
use studio_core::StudioEvent;

use crate::media::PreviewImage;

pub enum UiEvent {
    Info(String),
    Error(String),
    Studio(StudioEvent),
    PreviewLoaded {
        design_id: DesignId,
        image: PreviewImage,
    },
    PreviewFailed {
        design_id: DesignId,
        reason: String,
    },
}
