use kanal::AsyncSender;
use shiori_core::types::AppEvent;
use shiori_selection::DocumentSession;

use crate::state::AppState;

pub async fn handle_click_token(
    state: &AppState,
    session: &DocumentSession,
    output_tx: &AsyncSender<AppEvent>,
    index: usize,
) -> anyhow::Result<()> {
    let word = state
        .engine
        .resolve_clicked_word(session.text(), index, session.language())
        .await;
    tracing::debug!("Clicked token {} -> '{}'", index, word.base_form);

    output_tx.send(AppEvent::ShowClicked(word)).await?;
    Ok(())
}

pub async fn handle_click_at(
    state: &AppState,
    session: &DocumentSession,
    output_tx: &AsyncSender<AppEvent>,
    start: usize,
    end: usize,
) -> anyhow::Result<()> {
    let word = state.engine.resolve_document_click(session, start, end).await;
    tracing::debug!("Clicked {}..{} -> '{}'", start, end, word.base_form);

    output_tx.send(AppEvent::ShowClicked(word)).await?;
    Ok(())
}
