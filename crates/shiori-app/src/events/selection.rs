use std::time::Instant;

use kanal::AsyncSender;
use shiori_core::language::Language;
use shiori_core::types::AppEvent;
use shiori_selection::{DocumentSession, SelectionGuard};

use crate::state::AppState;

#[allow(clippy::too_many_arguments)]
pub async fn handle_selection(
    state: &AppState,
    session: &mut DocumentSession,
    guard: &mut SelectionGuard,
    output_tx: &AsyncSender<AppEvent>,
    text: String,
    start: usize,
    end: usize,
    language: Option<Language>,
) -> anyhow::Result<()> {
    let text = if text.trim().is_empty() {
        session.slice(start, end)
    } else {
        text
    };
    let radius = state.config.selection.context_radius;
    let query = session.query(&text, start, end, radius, language);

    let signature = SelectionGuard::signature(&query.text, &query.context);
    if !guard.admit(&signature, Instant::now()) {
        tracing::debug!("Ignoring repeated selection '{}'", query.text);
        return Ok(());
    }

    let result = state.engine.analyze_selection(&query, session).await;
    match &result {
        Some(result) => tracing::info!(
            "Selection '{}' -> '{}' ({}, {:.2})",
            result.query,
            result.base_form,
            result.source.as_str(),
            result.confidence
        ),
        None => tracing::info!("Selection '{}' is not a lexical item", query.text),
    }

    output_tx.send(AppEvent::ShowSelection(result)).await?;
    Ok(())
}
