//! UI layer: the single studio window.

pub mod app;

pub use app::StudioApp;
