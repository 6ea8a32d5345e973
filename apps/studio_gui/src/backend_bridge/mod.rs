//! Backend worker: owns the tokio runtime and everything that awaits.

pub mod commands;
pub mod runtime;
pub mod save_dialog;
