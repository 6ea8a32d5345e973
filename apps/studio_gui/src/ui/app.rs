use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, Sender};
use shared::domain::{DesignId, Notice, NoticeKind};
use studio_core::{gallery, DesignSubmissionController, GalleryCard, StudioEvent, EXAMPLE_PROMPTS};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};
use crate::media::PreviewImage;

const CARD_WIDTH: f32 = 300.0;
const TOAST_LIFETIME: Duration = Duration::from_secs(5);
const MAX_TOASTS: usize = 4;
const PROMPT_HINT: &str =
    "E.g., A flowing evening gown with intricate beadwork, deep emerald green color, vintage 1920s style...";

enum PreviewState {
    Loading,
    Ready {
        image: PreviewImage,
        texture: Option<egui::TextureHandle>,
    },
    Failed(String),
}

struct Toast {
    notice: Notice,
    shown_at: Instant,
}

pub struct StudioApp {
    controller: Arc<DesignSubmissionController>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    prompt_buffer: String,
    submit_queued: bool,
    cards: Vec<GalleryCard>,
    previews: HashMap<DesignId, PreviewState>,
    toasts: Vec<Toast>,
    status: String,
}

impl StudioApp {
    pub fn new(
        controller: Arc<DesignSubmissionController>,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let cards = gallery::render(&controller.designs());
        Self {
            prompt_buffer: controller.prompt_text(),
            controller,
            cmd_tx,
            ui_rx,
            submit_queued: false,
            cards,
            previews: HashMap::new(),
            toasts: Vec::new(),
            status: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(message) => {
                    tracing::warn!("{message}");
                    self.push_toast(Notice::failure("Something went wrong", message));
                }
                UiEvent::Studio(StudioEvent::DesignCreated(record)) => {
                    self.previews
                        .entry(record.id())
                        .or_insert(PreviewState::Loading);
                    self.cards = gallery::render(&self.controller.designs());
                }
                UiEvent::Studio(StudioEvent::Notice(notice)) => {
                    self.submit_queued = false;
                    self.push_toast(notice);
                }
                UiEvent::Studio(StudioEvent::SubmissionStateChanged { .. }) => {
                    self.submit_queued = false;
                }
                UiEvent::Studio(StudioEvent::PromptChanged(_)) => {}
                UiEvent::PreviewLoaded { design_id, image } => {
                    self.previews.insert(
                        design_id,
                        PreviewState::Ready {
                            image,
                            texture: None,
                        },
                    );
                }
                UiEvent::PreviewFailed { design_id, reason } => {
                    self.previews.insert(design_id, PreviewState::Failed(reason));
                }
            }
        }
    }

    fn push_toast(&mut self, notice: Notice) {
        self.toasts.push(Toast {
            notice,
            shown_at: Instant::now(),
        });
        if self.toasts.len() > MAX_TOASTS {
            let overflow = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..overflow);
        }
    }

    fn submit(&mut self) {
        self.submit_queued = true;
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Submit, &mut self.status);
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("studio_header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("AI Fashion Studio").strong().size(28.0));
                ui.label(
                    "Transform your ideas into stunning fashion designs with the power of AI. \
                     Describe your vision and watch it come to life.",
                );
            });
            ui.add_space(8.0);
        });
    }

    fn show_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("studio_footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small("Powered by AI • Create unlimited fashion designs");
                if !self.status.is_empty() {
                    ui.separator();
                    ui.small(self.status.as_str());
                }
            });
        });
    }

    fn show_generator(&mut self, ui: &mut egui::Ui) {
        let is_submitting = self.controller.is_submitting();
        let busy = is_submitting || self.submit_queued;
        self.prompt_buffer = self.controller.prompt_text();

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new("Describe your fashion design").strong());
            let response = ui.add_enabled(
                !is_submitting,
                egui::TextEdit::multiline(&mut self.prompt_buffer)
                    .hint_text(PROMPT_HINT)
                    .desired_rows(5)
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                self.controller.set_prompt_text(self.prompt_buffer.clone());
            }

            ui.add_space(6.0);
            ui.label("Try these examples:");
            let mut picked = None;
            ui.horizontal_wrapped(|ui| {
                for (index, example) in EXAMPLE_PROMPTS.iter().enumerate() {
                    if ui
                        .add_enabled(!is_submitting, egui::Button::new(*example).small())
                        .clicked()
                    {
                        picked = Some(index);
                    }
                }
            });
            if let Some(index) = picked {
                if let Err(err) = self.controller.fill_example(index) {
                    tracing::warn!("example selection failed: {err}");
                }
            }

            ui.add_space(6.0);
            let label = if is_submitting {
                "Creating your design..."
            } else {
                "Generate Design"
            };
            let clicked = ui
                .horizontal(|ui| {
                    if is_submitting {
                        ui.spinner();
                    }
                    ui.add_enabled(
                        !busy,
                        egui::Button::new(egui::RichText::new(label).strong())
                            .min_size(egui::vec2(ui.available_width(), 40.0)),
                    )
                    .clicked()
                })
                .inner;
            if clicked {
                self.submit();
            }
        });
    }

    fn show_gallery(&mut self, ui: &mut egui::Ui) {
        if self.cards.is_empty() {
            return;
        }

        ui.add_space(16.0);
        ui.heading("Your Designs");
        ui.add_space(8.0);

        let columns = ((ui.available_width() / (CARD_WIDTH + 16.0)).floor() as usize).clamp(1, 3);
        let cards = self.cards.clone();
        let mut commands = Vec::new();
        egui::Grid::new("design_gallery")
            .num_columns(columns)
            .spacing([16.0, 16.0])
            .show(ui, |ui| {
                for (position, card) in cards.iter().enumerate() {
                    if let Some(cmd) = self.show_card(ui, card) {
                        commands.push(cmd);
                    }
                    if (position + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });

        for cmd in commands {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
        }
    }

    fn show_card(&mut self, ui: &mut egui::Ui, card: &GalleryCard) -> Option<BackendCommand> {
        let mut command = None;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            match self.previews.get_mut(&card.design_id) {
                Some(PreviewState::Ready { image, texture }) => {
                    let texture = texture.get_or_insert_with(|| {
                        ui.ctx().load_texture(
                            format!("design_{}", card.design_id),
                            egui::ColorImage::from_rgba_unmultiplied(
                                [image.width, image.height],
                                &image.rgba,
                            ),
                            egui::TextureOptions::LINEAR,
                        )
                    });
                    let size = texture.size_vec2();
                    let scale = (CARD_WIDTH / size.x).min(1.0);
                    ui.add(egui::Image::new(&*texture).fit_to_exact_size(size * scale));
                }
                Some(PreviewState::Failed(reason)) => {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!("Preview unavailable: {reason}"),
                    );
                    if ui.small_button("Retry preview").clicked() {
                        command = Some(BackendCommand::LoadPreview {
                            design_id: card.design_id,
                            image_reference: card.image_reference.clone(),
                        });
                    }
                }
                Some(PreviewState::Loading) | None => {
                    ui.spinner();
                }
            }

            ui.add_space(4.0);
            ui.label(card.prompt_excerpt.as_str());
            ui.small(format!("📅 {}", card.created_on));
            if ui.button("⬇ Download").clicked() {
                command = Some(BackendCommand::Export {
                    design_id: card.design_id,
                });
            }
        });

        if let Some(BackendCommand::LoadPreview { design_id, .. }) = &command {
            self.previews.insert(*design_id, PreviewState::Loading);
        }
        command
    }

    fn show_toasts(&mut self, ctx: &egui::Context) {
        self.toasts
            .retain(|toast| toast.shown_at.elapsed() < TOAST_LIFETIME);
        if self.toasts.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("studio_toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -40.0])
            .show(ctx, |ui| {
                for (index, toast) in self.toasts.iter().enumerate() {
                    let accent = match toast.notice.kind {
                        NoticeKind::Success => egui::Color32::from_rgb(46, 160, 67),
                        NoticeKind::Failure => ui.visuals().error_fg_color,
                    };
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.horizontal(|ui| {
                            ui.colored_label(accent, egui::RichText::new(&toast.notice.title).strong());
                            if ui.small_button("✕").clicked() {
                                dismissed = Some(index);
                            }
                        });
                        ui.label(toast.notice.description.as_str());
                    });
                    ui.add_space(6.0);
                }
            });

        if let Some(index) = dismissed {
            self.toasts.remove(index);
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_footer(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_generator(ui);
                    self.show_gallery(ui);
                });
        });
        self.show_toasts(ctx);

        if self.controller.is_submitting() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
