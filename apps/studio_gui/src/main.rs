use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use studio_core::{
    settings::{load_settings, DEFAULT_SETTINGS_FILE},
    DesignSubmissionController, FunctionDesignService,
};
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod media;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime::spawn_backend_thread};
use controller::events::UiEvent;
use ui::StudioApp;

#[derive(Parser, Debug)]
#[command(name = "studio_gui", about = "AI Fashion Studio desktop window")]
struct Args {
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    #[arg(long)]
    service_url: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
}

/// `RUST_LOG` directives when set and valid, else `info`.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(v) = args.service_url {
        settings.service_url = v;
    }
    if let Some(v) = args.api_key {
        settings.api_key = Some(v);
    }
    let service = FunctionDesignService::from_settings(&settings)?;
    tracing::info!(endpoint = %service.endpoint(), "design service configured");
    let controller = DesignSubmissionController::new(Arc::new(service));

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    spawn_backend_thread(Arc::clone(&controller), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AI Fashion Studio")
            .with_inner_size([1100.0, 820.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "AI Fashion Studio",
        options,
        Box::new(move |_cc| Ok(Box::new(StudioApp::new(controller, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("failed to open the studio window: {err}"))
}
