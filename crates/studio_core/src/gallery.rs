//! Gallery presentation: stateless rendering of the design collection plus the
//! per-card export action.

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use shared::domain::{DesignId, DesignRecord};
use tracing::debug;

use crate::export::ExportTarget;

/// Roughly two lines of card text.
pub const PROMPT_DISPLAY_CHARS: usize = 96;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCard {
    pub design_id: DesignId,
    pub prompt_excerpt: String,
    pub created_on: String,
    pub image_reference: String,
}

pub fn render(records: &[DesignRecord]) -> Vec<GalleryCard> {
    records
        .iter()
        .map(|record| GalleryCard {
            design_id: record.id(),
            prompt_excerpt: truncate_for_display(record.prompt(), PROMPT_DISPLAY_CHARS),
            created_on: format_created_at(record.created_at()),
            image_reference: record.image_reference().to_string(),
        })
        .collect()
}

/// Collapses whitespace and clips to `max_chars` characters with an ellipsis.
pub fn truncate_for_display(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let mut clipped: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    clipped.truncate(clipped.trim_end().len());
    clipped.push('…');
    clipped
}

pub fn format_created_at(created_at: DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d")
        .to_string()
}

/// Download name for an exported design; two exports in the same
/// millisecond share a name.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("fashion-design-{}.jpg", now.timestamp_millis())
}

pub async fn export_record(record: &DesignRecord, target: &dyn ExportTarget) -> Result<()> {
    let filename = export_filename(Utc::now());
    debug!(design_id = %record.id(), %filename, "exporting design");
    target.deliver(record.image_reference(), &filename).await
}
