use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::VerifierApp;

#[derive(Parser, Debug)]
#[command(
    name = "newsverify-desk",
    about = "Desktop client for the news verification service"
)]
struct Args {
    /// Prediction service base URL; overrides newsverify.toml and environment.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let mut settings = config::load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    tracing::info!(server_url = %settings.server_url, "starting NewsVerify Desk");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("NewsVerify Desk")
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([560.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "NewsVerify Desk",
        options,
        Box::new(|_cc| Ok(Box::new(VerifierApp::new(cmd_tx, ui_rx, settings)))),
    )
}
