//! Prompt submission and design collection workflow for the fashion studio.

pub mod controller;
pub mod error;
pub mod events;
pub mod examples;
pub mod export;
pub mod gallery;
pub mod image_source;
pub mod remote;
pub mod settings;
pub mod store;

pub use controller::{DesignSubmissionController, SubmissionState};
pub use error::{ImageLoadError, StudioError};
pub use events::StudioEvent;
pub use examples::EXAMPLE_PROMPTS;
pub use export::{DirectoryExportTarget, ExportTarget};
pub use gallery::GalleryCard;
pub use image_source::ImageLoader;
pub use remote::{FunctionDesignService, RemoteDesignService};
pub use settings::Settings;
pub use store::DesignCollectionStore;
