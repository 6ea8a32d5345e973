use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use studio_core::{
    settings::{load_settings, DEFAULT_SETTINGS_FILE},
    DesignSubmissionController, DirectoryExportTarget, FunctionDesignService, ImageLoader,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod repl;
mod session;

use session::{Flow, Session};

#[derive(Parser, Debug)]
#[command(name = "studio", about = "Turn fashion design prompts into images")]
struct Args {
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    #[arg(long)]
    service_url: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    download_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a single design and exit.
    Generate {
        #[arg(long)]
        prompt: String,
        /// Also download the image into the download directory.
        #[arg(long)]
        export: bool,
    },
    /// Print the example prompts.
    Examples,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(v) = args.service_url {
        settings.service_url = v;
    }
    if let Some(v) = args.api_key {
        settings.api_key = Some(v);
    }
    if let Some(v) = args.download_dir {
        settings.download_dir = Some(v);
    }

    let service = FunctionDesignService::from_settings(&settings)?;
    info!(endpoint = %service.endpoint(), "design service configured");
    let controller = DesignSubmissionController::new(Arc::new(service));
    let download_dir = settings.resolved_download_dir();
    let exporter = Arc::new(DirectoryExportTarget::new(ImageLoader::new(), &download_dir));
    let mut session = Session::new(controller, exporter);

    match args.command {
        Some(Command::Examples) => session::print_examples(),
        Some(Command::Generate { prompt, export }) => {
            session.generate_once(&prompt, export).await?;
        }
        None => run_interactive(&mut session, &download_dir).await?,
    }

    Ok(())
}

async fn run_interactive(session: &mut Session, download_dir: &std::path::Path) -> Result<()> {
    println!("AI Fashion Studio");
    println!("Transform your ideas into fashion designs. Downloads go to {}", download_dir.display());
    println!("{}", repl::HELP);
    session::print_examples();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if let Flow::Quit = session.handle(repl::parse(&line)).await {
            break;
        }
    }
    Ok(())
}
