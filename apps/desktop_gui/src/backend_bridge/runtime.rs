//! Backend worker: owns the tokio runtime and the maps services.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use map_core::{config::Settings, load_services, DirectionsFetcher, MapsServices};
use tokio::sync::mpsc;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::ServicesFailed(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let services = match load_services(&settings) {
                Ok(services) => services,
                Err(err) => {
                    tracing::error!("maps services unavailable: {err:#}");
                    let _ = ui_tx.try_send(UiEvent::ServicesFailed(UiError::from_anyhow(
                        UiErrorContext::BackendStartup,
                        &err,
                    )));
                    return;
                }
            };
            let _ = ui_tx.try_send(UiEvent::ServicesReady);

            let (completion_tx, mut completion_rx) = mpsc::unbounded_channel();
            let mut fetcher = DirectionsFetcher::new(Arc::clone(&services.routing), completion_tx);

            let forward_tx = ui_tx.clone();
            tokio::spawn(async move {
                while let Some(completion) = completion_rx.recv().await {
                    let _ = forward_tx.try_send(UiEvent::DirectionsFinished(completion));
                }
            });

            // Blocks this thread only; spawned work runs on the runtime's workers.
            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(cmd, &services, &mut fetcher, &ui_tx);
            }
            tracing::info!("ui command channel closed; backend worker stopping");
        });
    });
}

fn handle_command(
    cmd: BackendCommand,
    services: &MapsServices,
    fetcher: &mut DirectionsFetcher,
    ui_tx: &Sender<UiEvent>,
) {
    match cmd {
        BackendCommand::Suggest { query } => {
            let places = Arc::clone(&services.places);
            let ui_tx = ui_tx.clone();
            tokio::spawn(async move {
                let event = match places.suggest(&query).await {
                    Ok(suggestions) => UiEvent::Suggestions { query, suggestions },
                    Err(err) => {
                        tracing::warn!("place suggestions failed: {err:#}");
                        UiEvent::Error(UiError::from_anyhow(UiErrorContext::Search, &err))
                    }
                };
                let _ = ui_tx.try_send(event);
            });
        }
        BackendCommand::ResolvePlace { id, suggestion } => {
            let places = Arc::clone(&services.places);
            let ui_tx = ui_tx.clone();
            tokio::spawn(async move {
                let event = match places.resolve(&suggestion).await {
                    Ok(position) => UiEvent::PlaceResolved {
                        id,
                        description: suggestion.description,
                        position,
                    },
                    Err(err) => {
                        tracing::warn!("resolving '{}' failed: {err:#}", suggestion.description);
                        UiEvent::Error(UiError::from_anyhow(UiErrorContext::Search, &err))
                    }
                };
                let _ = ui_tx.try_send(event);
            });
        }
        BackendCommand::FetchDirections { tagged } => fetcher.start(tagged),
        BackendCommand::CancelDirections => fetcher.cancel(),
    }
}
