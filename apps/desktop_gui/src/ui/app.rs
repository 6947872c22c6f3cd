use arboard::Clipboard;
use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use eframe::egui;

use client_core::EMPTY_SUBMISSION_MESSAGE;
use shared::domain::{format_percent, Verdict};
use shared::protocol::{PredictRequest, PredictResponse, ProbabilitySplit};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{
    category_label, UiError, UiErrorCategory, UiErrorContext, UiEvent,
};
use crate::controller::orchestration::dispatch_backend_command;

// Same accents the service's own web page uses for the two classes.
const FAKE_COLOR: egui::Color32 = egui::Color32::from_rgb(0xcc, 0x33, 0x33);
const REAL_COLOR: egui::Color32 = egui::Color32::from_rgb(0x33, 0xcc, 0x33);

/// Submission lifecycle. Exactly one request can be in flight; the submit
/// control is disabled while `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ServiceStatus {
    Checking,
    Online { status: String },
    Unreachable { reason: String },
}

/// Everything the result panel renders, derived once per response.
#[derive(Debug, Clone)]
struct VerdictCard {
    verdict: Verdict,
    confidence: f64,
    probabilities: ProbabilitySplit,
    checked_at: DateTime<Local>,
}

impl VerdictCard {
    fn from_response(response: PredictResponse, checked_at: DateTime<Local>) -> Self {
        Self {
            verdict: response.prediction.verdict(),
            confidence: response.confidence,
            probabilities: response.probabilities,
            checked_at,
        }
    }

    fn summary_line(&self) -> String {
        format!(
            "{}: confidence {}, fake {}, real {}",
            self.verdict.display_label(),
            format_percent(self.confidence),
            format_percent(self.probabilities.fake),
            format_percent(self.probabilities.real)
        )
    }
}

#[derive(Debug, Clone)]
struct ErrorBanner {
    category: UiErrorCategory,
    message: String,
}

pub struct VerifierApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,

    headline: String,
    body: String,
    url: String,

    submit_state: SubmitState,
    result: Option<VerdictCard>,
    error_banner: Option<ErrorBanner>,
    scroll_to_outcome: bool,

    service_status: ServiceStatus,
    worker_ready: bool,
    status: String,
}

impl VerifierApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: Settings,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            server_url: settings.server_url,
            headline: String::new(),
            body: String::new(),
            url: String::new(),
            submit_state: SubmitState::Idle,
            result: None,
            error_banner: None,
            scroll_to_outcome: false,
            service_status: ServiceStatus::Checking,
            worker_ready: false,
            status: "Starting backend worker...".to_string(),
        };
        // One passive probe at startup; a failure never blocks submission.
        dispatch_backend_command(&app.cmd_tx, BackendCommand::CheckHealth, &mut app.status);
        app
    }

    fn process_ui_events(&mut self) {
        loop {
            match self.ui_rx.try_recv() {
                Ok(event) => self.handle_ui_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.submit_state == SubmitState::Submitting {
                        self.submit_state = SubmitState::Idle;
                        self.show_error(UiError::from_message(
                            UiErrorContext::General,
                            "Backend worker disconnected; restart the app",
                        ));
                    }
                    break;
                }
            }
        }
    }

    fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::WorkerReady => {
                self.worker_ready = true;
                self.status = format!("Connected to {}", self.server_url);
            }
            UiEvent::VerdictReady(response) => {
                self.submit_state = SubmitState::Idle;
                self.error_banner = None;
                self.result = Some(VerdictCard::from_response(response, Local::now()));
                self.scroll_to_outcome = true;
                self.status = "Verdict received".to_string();
            }
            UiEvent::HealthOk { status } => {
                self.service_status = ServiceStatus::Online { status };
            }
            UiEvent::HealthFailed { reason } => {
                self.service_status = ServiceStatus::Unreachable { reason };
            }
            UiEvent::Error(err) => {
                if self.submit_state == SubmitState::Submitting {
                    self.submit_state = SubmitState::Idle;
                }
                self.status = match err.context() {
                    UiErrorContext::WorkerStartup => "Backend worker failed to start".to_string(),
                    _ => format!("{} error", category_label(err.category())),
                };
                self.show_error(err);
            }
        }
    }

    fn show_error(&mut self, err: UiError) {
        self.result = None;
        self.error_banner = Some(ErrorBanner {
            category: err.category(),
            message: err.message().to_string(),
        });
        self.scroll_to_outcome = true;
    }

    /// The submit path of the form. Hides prior outcome, validates, then
    /// queues the prediction; `Submitting` is entered only when the command
    /// was actually accepted by the queue.
    fn submit(&mut self) {
        if self.submit_state == SubmitState::Submitting {
            return;
        }
        self.result = None;
        self.error_banner = None;

        let request = PredictRequest::trimmed(&self.headline, &self.body, &self.url);
        if request.is_empty_submission() {
            self.show_error(UiError::new(
                UiErrorCategory::Validation,
                UiErrorContext::Predict,
                EMPTY_SUBMISSION_MESSAGE,
            ));
            return;
        }

        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Predict {
                headline: request.headline,
                body: request.body,
                url: request.url,
            },
            &mut self.status,
        );
        if queued {
            self.submit_state = SubmitState::Submitting;
            self.status = "Checking article...".to_string();
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("NewsVerify Desk");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.show_service_status(ui);
            });
        });
        ui.weak("Check a news article against the prediction service.");
        ui.add_space(6.0);
    }

    fn show_service_status(&mut self, ui: &mut egui::Ui) {
        let mut recheck = false;
        if ui
            .small_button("⟳")
            .on_hover_text("Recheck service status")
            .clicked()
        {
            recheck = true;
        }
        match &self.service_status {
            ServiceStatus::Checking => {
                ui.small("Checking service...");
                ui.add(egui::Spinner::new().size(12.0));
            }
            ServiceStatus::Online { status } => {
                ui.small(egui::RichText::new(format!("Service {status}")).color(REAL_COLOR));
            }
            ServiceStatus::Unreachable { reason } => {
                ui.small(egui::RichText::new("Service unreachable").color(FAKE_COLOR))
                    .on_hover_text(reason.as_str());
            }
        }
        if recheck {
            self.service_status = ServiceStatus::Checking;
            dispatch_backend_command(&self.cmd_tx, BackendCommand::CheckHealth, &mut self.status);
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let mut headline_buf = self.headline.clone();
        let mut body_buf = self.body.clone();
        let mut url_buf = self.url.clone();
        let is_busy = self.submit_state == SubmitState::Submitting;
        let can_submit = self.worker_ready && !is_busy;
        let mut submit_requested = false;

        egui::Frame::group(ui.style())
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(14, 12))
            .show(ui, |ui| {
                ui.style_mut().spacing.item_spacing = egui::vec2(8.0, 8.0);

                let headline_resp = labeled_singleline(
                    ui,
                    "article_headline",
                    "Headline",
                    "Paste the article headline",
                    &mut headline_buf,
                );

                ui.label(egui::RichText::new("Body").strong());
                ui.add(
                    egui::TextEdit::multiline(&mut body_buf)
                        .id_salt("article_body")
                        .hint_text("Paste the article text")
                        .desired_width(f32::INFINITY)
                        .desired_rows(10),
                );

                let url_resp = labeled_singleline(
                    ui,
                    "article_url",
                    "Source URL (optional)",
                    "https://example.com/article",
                    &mut url_buf,
                );

                // Enter submits from the single-line fields.
                let enter_pressed = ui.ctx().input(|i| i.key_pressed(egui::Key::Enter));
                if can_submit && enter_pressed && (headline_resp.has_focus() || url_resp.has_focus())
                {
                    submit_requested = true;
                }

                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    let btn = egui::Button::new(egui::RichText::new("Check article").strong())
                        .min_size(egui::vec2(150.0, 36.0));
                    if ui.add_enabled(can_submit, btn).clicked() {
                        submit_requested = true;
                    }
                    if is_busy {
                        ui.add(egui::Spinner::new().size(18.0));
                        ui.label(egui::RichText::new("Checking...").weak());
                    }
                });
            });

        self.headline = headline_buf;
        self.body = body_buf;
        self.url = url_buf;

        if submit_requested {
            self.submit();
        }
    }

    fn show_outcome(&mut self, ui: &mut egui::Ui) {
        let scroll_here = std::mem::take(&mut self.scroll_to_outcome);

        if let Some(banner) = self.error_banner.clone() {
            let mut dismissed = false;
            let response = egui::Frame::NONE
                .fill(egui::Color32::from_rgb(0x58, 0x1f, 0x1f))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(12, 10))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} error",
                                category_label(banner.category)
                            ))
                            .strong()
                            .color(egui::Color32::WHITE),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                dismissed = true;
                            }
                        });
                    });
                    ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                })
                .response;
            if scroll_here {
                response.scroll_to_me(Some(egui::Align::Min));
            }
            if dismissed {
                self.error_banner = None;
            }
            return;
        }

        let Some(card) = self.result.clone() else {
            return;
        };
        let color = verdict_color(&card.verdict, ui);
        let mut copy_text = None;

        let response = egui::Frame::group(ui.style())
            .corner_radius(10.0)
            .stroke(egui::Stroke::new(1.5, color))
            .inner_margin(egui::Margin::symmetric(16, 14))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(card.verdict.display_label())
                            .size(26.0)
                            .strong()
                            .color(color),
                    );
                    ui.label(
                        egui::RichText::new(format!(
                            "Confidence: {}",
                            format_percent(card.confidence)
                        ))
                        .size(16.0),
                    );
                });
                ui.add_space(8.0);
                ui.separator();
                ui.columns(2, |columns| {
                    columns[0].vertical_centered(|ui| {
                        ui.label(egui::RichText::new("Fake").strong());
                        ui.label(
                            egui::RichText::new(format_percent(card.probabilities.fake))
                                .size(18.0)
                                .color(FAKE_COLOR),
                        );
                    });
                    columns[1].vertical_centered(|ui| {
                        ui.label(egui::RichText::new("Real").strong());
                        ui.label(
                            egui::RichText::new(format_percent(card.probabilities.real))
                                .size(18.0)
                                .color(REAL_COLOR),
                        );
                    });
                });
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.small(format!("Checked at {}", card.checked_at.format("%H:%M:%S")));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Copy summary").clicked() {
                            copy_text = Some(card.summary_line());
                        }
                    });
                });
            })
            .response;

        if scroll_here {
            response.scroll_to_me(Some(egui::Align::Min));
        }
        if let Some(text) = copy_text {
            if let Ok(mut clipboard) = Clipboard::new() {
                let _ = clipboard.set_text(text);
                self.status = "Summary copied to clipboard".to_string();
            }
        }
    }
}

impl eframe::App for VerifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let card_width = ui.available_width().min(680.0);
                    ui.vertical_centered(|ui| {
                        ui.set_width(card_width);
                        ui.add_space(12.0);
                        self.show_header(ui);
                        self.show_form(ui);
                        ui.add_space(10.0);
                        self.show_outcome(ui);
                        ui.add_space(16.0);
                    });
                });
        });

        // Channel events arrive without input; keep repainting while waiting.
        if self.submit_state == SubmitState::Submitting
            || self.service_status == ServiceStatus::Checking
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

fn labeled_singleline(
    ui: &mut egui::Ui,
    id: &'static str,
    label: &str,
    hint: &str,
    value: &mut String,
) -> egui::Response {
    ui.label(egui::RichText::new(label).strong());
    let edit = egui::TextEdit::singleline(value)
        .id_salt(id)
        .hint_text(egui::RichText::new(hint).color(ui.visuals().weak_text_color()))
        .desired_width(f32::INFINITY);
    ui.add_sized([ui.available_width(), 30.0], edit)
}

fn verdict_color(verdict: &Verdict, ui: &egui::Ui) -> egui::Color32 {
    match verdict {
        Verdict::Fake => FAKE_COLOR,
        Verdict::Real => REAL_COLOR,
        Verdict::Other(_) => ui.visuals().strong_text_color(),
    }
}
