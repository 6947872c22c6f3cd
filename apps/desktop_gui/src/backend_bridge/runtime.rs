//! Runtime bridge: a worker thread owning a tokio runtime that serves the UI
//! command queue against the prediction service.

use std::thread;

use client_core::{PredictionApi, PredictionClient};
use crossbeam_channel::{Receiver, Sender};
use shared::protocol::PredictRequest;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the backend worker. Commands are served strictly in order, one at a
/// time; every `Predict` command produces exactly one terminal event
/// (`VerdictReady` or `Error`) so the UI can always leave its busy state.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::WorkerStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let client = match PredictionClient::new(&settings.server_url) {
                Ok(client) => client,
                Err(err) => {
                    tracing::error!("failed to construct prediction client: {err}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                        UiErrorContext::WorkerStartup,
                        &err,
                    )));
                    return;
                }
            };
            let _ = ui_tx.try_send(UiEvent::WorkerReady);

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Predict {
                        headline,
                        body,
                        url,
                    } => {
                        tracing::info!(
                            headline_len = headline.len(),
                            body_len = body.len(),
                            "backend: predict"
                        );
                        let request = PredictRequest::trimmed(&headline, &body, &url);
                        match client.predict(&request).await {
                            Ok(response) => {
                                let _ = ui_tx.try_send(UiEvent::VerdictReady(response));
                            }
                            Err(err) => {
                                tracing::warn!("backend: predict failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(
                                    UiError::from_client_error(UiErrorContext::Predict, &err),
                                ));
                            }
                        }
                    }
                    BackendCommand::CheckHealth => {
                        tracing::info!("backend: check_health");
                        match client.health().await {
                            Ok(health) => {
                                let _ = ui_tx.try_send(UiEvent::HealthOk {
                                    status: health.status,
                                });
                            }
                            Err(err) => {
                                tracing::warn!("backend: health probe failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::HealthFailed {
                                    reason: err.to_string(),
                                });
                            }
                        }
                    }
                }
            }
        });
    });
}
