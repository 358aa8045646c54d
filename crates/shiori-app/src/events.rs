use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use shiori_core::language::Language;
use shiori_core::types::AppEvent;
use shiori_selection::{DocumentSession, SelectionGuard};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod click;
pub mod selection;

use click::{handle_click_at, handle_click_token};
use selection::handle_selection;

/// App's main loop. Owns the document session, so the cache needs no lock.
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let settings = state.engine.settings().clone();
    let debounce = Duration::from_millis(settings.debounce_ms);
    let mut guard = SelectionGuard::new(Duration::from_millis(settings.dedup_window_ms));
    let mut session = DocumentSession::detached(Language::Ja);
    let mut backlog = VecDeque::new();

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = match backlog.pop_front() {
            Some(event) => event,
            None => tokio::select! {
                _ = cancel.cancelled() => break,
                event = input_rx.recv() => event?,
            },
        };

        let event = match event {
            AppEvent::Select { .. } => debounce_selection(event, &input_rx, &mut backlog, debounce).await,
            other => other,
        };

        tracing::debug!("[EVENT_LOOP] {:?}", std::mem::discriminant(&event));
        match event {
            AppEvent::Shutdown => break,
            AppEvent::OpenDocument { id, language, text } => {
                if session.is_same_document(&id, language) {
                    tracing::debug!("Document {} already open", id);
                } else {
                    tracing::info!("Opened document {} ({}, {} chars)", id, language, text.chars().count());
                    session = DocumentSession::new(id, language, text);
                    guard.reset();
                }
            }
            AppEvent::ClearCache => {
                tracing::info!("Cleared {} cached selection(s)", session.cache.len());
                session.cache.clear();
            }
            AppEvent::Select { text, start, end, language } => {
                handle_selection(&state, &mut session, &mut guard, &output_tx, text, start, end, language)
                    .await?;
            }
            AppEvent::ClickToken { index } => {
                handle_click_token(&state, &session, &output_tx, index).await?;
            }
            AppEvent::ClickAt { start, end } => {
                handle_click_at(&state, &session, &output_tx, start, end).await?;
            }
            AppEvent::StatusUpdate(message) => {
                output_tx.send(AppEvent::StatusUpdate(message)).await?;
            }
            AppEvent::ShowSelection(_) | AppEvent::ShowClicked(_) => {
                // Output-only events
            }
        }
    }

    tracing::info!("[EVENT_LOOP] Stopping");
    cancel.cancel();
    Ok(())
}

/// Wait out the debounce delay and keep only the latest of the selections
/// that arrived meanwhile. Anything else that arrived is queued in order.
async fn debounce_selection(
    first: AppEvent,
    input_rx: &AsyncReceiver<AppEvent>,
    backlog: &mut VecDeque<AppEvent>,
    debounce: Duration,
) -> AppEvent {
    tokio::time::sleep(debounce).await;

    let mut latest = first;
    let mut dropped = 0;
    while let Ok(Some(event)) = input_rx.try_recv() {
        match event {
            AppEvent::Select { .. } => {
                latest = event;
                dropped += 1;
            }
            other => {
                backlog.push_back(other);
                break;
            }
        }
    }
    if dropped > 0 {
        tracing::debug!("Debounce dropped {} superseded selection(s)", dropped);
    }
    latest
}
