use std::sync::Arc;

use anyhow::{bail, Context, Result};
use shared::domain::{DesignRecord, Notice, NoticeKind};
use studio_core::{
    gallery, DesignSubmissionController, ExportTarget, StudioEvent, EXAMPLE_PROMPTS,
};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;

use crate::repl::{ReplCommand, HELP};

pub enum Flow {
    Continue,
    Quit,
}

/// Terminal presenter over one controller.
pub struct Session {
    controller: Arc<DesignSubmissionController>,
    exporter: Arc<dyn ExportTarget>,
    events: broadcast::Receiver<StudioEvent>,
}

impl Session {
    pub fn new(controller: Arc<DesignSubmissionController>, exporter: Arc<dyn ExportTarget>) -> Self {
        let events = controller.subscribe_events();
        Self {
            controller,
            exporter,
            events,
        }
    }

    pub async fn handle(&mut self, command: ReplCommand) -> Flow {
        match command {
            ReplCommand::Generate(text) => {
                self.controller.set_prompt_text(text);
                self.submit().await;
            }
            ReplCommand::SubmitCurrent => self.submit().await,
            ReplCommand::ShowPrompt => {
                let prompt = self.controller.prompt_text();
                if prompt.is_empty() {
                    println!("(prompt is empty)");
                } else {
                    println!("prompt: {prompt}");
                }
            }
            ReplCommand::ListExamples => print_examples(),
            ReplCommand::UseExample(index) => match self.controller.fill_example(index) {
                Ok(true) => println!(
                    "prompt: {}\n(press enter to generate)",
                    self.controller.prompt_text()
                ),
                Ok(false) => println!("a design is still being generated"),
                Err(err) => println!("{err}"),
            },
            ReplCommand::Gallery => self.print_gallery(),
            ReplCommand::Export(index) => {
                if let Err(err) = self.export(index).await {
                    println!("Download failed: {err:#}");
                }
            }
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => return Flow::Quit,
            ReplCommand::Invalid(reason) => println!("{reason}"),
        }
        self.flush_notices();
        Flow::Continue
    }

    async fn submit(&mut self) {
        if !self.controller.prompt_text().trim().is_empty() {
            println!("Creating your design...");
        }
        if let Ok(record) = self.controller.submit_current().await {
            println!("{}", shorten_reference(record.image_reference()));
        }
    }

    /// Non-interactive run: any failure is returned so the process exits
    /// non-zero, and only a freshly created design is exported.
    pub async fn generate_once(&mut self, prompt: &str, export: bool) -> Result<DesignRecord> {
        println!("Creating your design...");
        let outcome = self.controller.submit(prompt).await;
        self.flush_notices();
        let record = outcome.context("design generation failed")?;
        println!("{}", shorten_reference(record.image_reference()));

        if export {
            gallery::export_record(&record, self.exporter.as_ref())
                .await
                .context("design download failed")?;
        }
        Ok(record)
    }

    fn print_gallery(&self) {
        let lines = self.gallery_lines();
        if lines.is_empty() {
            println!("No designs yet.");
            return;
        }
        println!("Your Designs");
        for line in lines {
            println!("{line}");
        }
    }

    fn gallery_lines(&self) -> Vec<String> {
        gallery::render(&self.controller.designs())
            .iter()
            .enumerate()
            .map(|(position, card)| {
                format!(
                    "{:>3}. [{}] {}\n     {}",
                    position + 1,
                    card.created_on,
                    card.prompt_excerpt,
                    shorten_reference(&card.image_reference)
                )
            })
            .collect()
    }

    async fn export(&self, index: usize) -> Result<()> {
        let Some(record) = self.controller.designs().into_iter().nth(index) else {
            bail!("no design #{} in the gallery", index + 1);
        };
        if let Err(err) = gallery::export_record(&record, self.exporter.as_ref()).await {
            warn!(design_id = %record.id(), "export failed: {err:#}");
            return Err(err);
        }
        Ok(())
    }

    /// Prints pending notices and returns how many there were.
    fn flush_notices(&mut self) -> usize {
        let mut printed = 0;
        loop {
            match self.events.try_recv() {
                Ok(StudioEvent::Notice(notice)) => {
                    print_notice(&notice);
                    printed += 1;
                }
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "dropped studio events");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        printed
    }
}

pub fn print_examples() {
    println!("Try these examples:");
    for (position, example) in EXAMPLE_PROMPTS.iter().enumerate() {
        println!("  {}. {example}", position + 1);
    }
}

fn print_notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Success => println!("✓ {}: {}", notice.title, notice.description),
        NoticeKind::Failure => eprintln!("✗ {}: {}", notice.title, notice.description),
    }
}

/// Inline images can be megabytes of base64; show only the head.
fn shorten_reference(reference: &str) -> String {
    const MAX: usize = 80;
    if reference.starts_with("data:") && reference.len() > MAX {
        let head: String = reference.chars().take(MAX).collect();
        format!("{head}… ({} bytes)", reference.len())
    } else {
        reference.to_string()
    }
}
