use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shiori_config::Config;
use shiori_core::language::Language;
use shiori_core::preprocess::{NfkcPreprocessor, Preprocessor};
use shiori_core::types::SelectionQuery;
use shiori_selection::DocumentSession;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "shiori", about = "Selection analysis for language readers")]
struct Cli {
    /// JSON config file; environment variables are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one selection and print the result
    Analyze {
        text: String,
        /// ja, en or zh; detected from the text when omitted
        #[arg(long)]
        language: Option<Language>,
        #[arg(long, default_value = "")]
        context: String,
    },
    /// Resolve the word under a click
    Click {
        text: String,
        #[arg(long)]
        language: Option<Language>,
        /// Token index
        #[arg(long, conflicts_with_all = ["start", "end"])]
        index: Option<usize>,
        /// Char offset where the click starts
        #[arg(long)]
        start: Option<usize>,
        #[arg(long, requires = "start")]
        end: Option<usize>,
    },
    /// Read JSON-line commands from stdin and answer on stdout
    Session,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::new(),
    };
    let state = Arc::new(AppState::new(config)?);

    match cli.command {
        Command::Analyze {
            text,
            language,
            context,
        } => analyze(&state, &text, language, &context).await,
        Command::Click {
            text,
            language,
            index,
            start,
            end,
        } => click(&state, &text, language, index, start, end).await,
        Command::Session => run_session(state).await,
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn resolve_language(text: &str, language: Option<Language>) -> anyhow::Result<Language> {
    language
        .or_else(|| Language::detect(text))
        .context("Unsupported language, expected ja, en or zh")
}

async fn analyze(
    state: &AppState,
    text: &str,
    language: Option<Language>,
    context: &str,
) -> anyhow::Result<()> {
    let settings = &state.config.selection;
    let text = NfkcPreprocessor.process(text, settings.max_query_chars);
    let context = NfkcPreprocessor.process(context, settings.max_context_chars);
    let language = resolve_language(&text, language)?;

    let mut session = DocumentSession::detached(language);
    let query = SelectionQuery::new(text, language).with_context(context);
    let result = state.engine.analyze_selection(&query, &mut session).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn click(
    state: &AppState,
    text: &str,
    language: Option<Language>,
    index: Option<usize>,
    start: Option<usize>,
    end: Option<usize>,
) -> anyhow::Result<()> {
    let text = NfkcPreprocessor.process(text, usize::MAX);
    let language = resolve_language(&text, language)?;

    let word = match (index, start) {
        (Some(index), _) => state.engine.resolve_clicked_word(&text, index, language).await,
        (None, Some(start)) => {
            let end = end.unwrap_or(start.saturating_add(1));
            state.engine.resolve_click_at(&text, start, end, language).await
        }
        (None, None) => anyhow::bail!("either --index or --start is required"),
    };

    println!("{}", serde_json::to_string_pretty(&word)?);
    Ok(())
}

async fn run_session(state: Arc<AppState>) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                controller.shutdown();
            }
            joined = tasks.join_next() => {
                match joined {
                    Some(Ok(Ok(()))) => {}
                    Some(Ok(Err(e))) => {
                        tracing::error!("task failed: {e}");
                        controller.shutdown();
                    }
                    Some(Err(e)) => {
                        tracing::error!("task panicked: {e}");
                        controller.shutdown();
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}
