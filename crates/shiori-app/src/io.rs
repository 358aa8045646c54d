//! JSON-line protocol between the reader process and the event loop.

use kanal::{AsyncReceiver, AsyncSender};
use serde::{Deserialize, Serialize};
use shiori_core::language::Language;
use shiori_core::types::{AppEvent, ClickedWord, SelectionResult};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

/// One line of input
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    Open {
        id: String,
        language: Language,
        text: String,
    },
    Select {
        #[serde(default)]
        text: String,
        #[serde(default)]
        start: usize,
        #[serde(default)]
        end: usize,
        #[serde(default)]
        language: Option<Language>,
    },
    Click {
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        start: Option<usize>,
        #[serde(default)]
        end: Option<usize>,
    },
    Clear,
}

impl From<Command> for AppEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Open { id, language, text } => AppEvent::OpenDocument { id, language, text },
            Command::Select {
                text,
                start,
                end,
                language,
            } => AppEvent::Select {
                text,
                start,
                end,
                language,
            },
            Command::Click { index: Some(index), .. } => AppEvent::ClickToken { index },
            Command::Click { start, end, .. } => {
                let start = start.unwrap_or_default();
                AppEvent::ClickAt {
                    start,
                    end: end.unwrap_or(start.saturating_add(1)),
                }
            }
            Command::Clear => AppEvent::ClearCache,
        }
    }
}

pub fn parse_command(line: &str) -> Result<AppEvent, serde_json::Error> {
    serde_json::from_str::<Command>(line).map(AppEvent::from)
}

/// One line of output
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Output<'a> {
    Selection { result: Option<&'a SelectionResult> },
    Clicked { word: &'a ClickedWord },
    Status { message: &'a str },
}

impl<'a> Output<'a> {
    pub fn from_event(event: &'a AppEvent) -> Option<Self> {
        match event {
            AppEvent::ShowSelection(result) => Some(Output::Selection {
                result: result.as_ref(),
            }),
            AppEvent::ShowClicked(word) => Some(Output::Clicked { word }),
            AppEvent::StatusUpdate(message) => Some(Output::Status { message }),
            _ => None,
        }
    }
}

/// Read commands line by line until EOF, then ask the event loop to finish
pub async fn input_io<R>(
    reader: R,
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = match parse_command(line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Invalid command: {}", e);
                AppEvent::StatusUpdate(format!("Invalid command: {e}"))
            }
        };
        event_tx.send(event).await?;
    }

    tracing::info!("Input closed");
    event_tx.send(AppEvent::Shutdown).await?;
    Ok(())
}

/// Write output events as JSON lines. After cancellation whatever is
/// still queued is written before returning.
pub async fn output_io<W>(
    mut writer: W,
    event_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = event_rx.recv() => event?,
        };
        write_event(&mut writer, &event).await?;
    }

    while let Ok(Some(event)) = event_rx.try_recv() {
        write_event(&mut writer, &event).await?;
    }
    writer.flush().await?;
    Ok(())
}

async fn write_event<W>(writer: &mut W, event: &AppEvent) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let Some(output) = Output::from_event(event) else {
        return Ok(());
    };
    let mut line = serde_json::to_string(&output)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
