use clap::{Parser, Subcommand};
use docqa::config::Config;
use docqa::utils::{init_logger, LogTarget};
use std::path::PathBuf;
use tracing::info;

/// Upload PDFs to a question-answering backend and chat about them
#[derive(Debug, Parser)]
#[command(name = "docqa", version, about)]
struct Cli {
    /// Backend base URL (overrides DOCQA_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Processing status poll period in milliseconds (overrides DOCQA_POLL_INTERVAL_MS)
    #[arg(long, global = true)]
    poll_interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Tui {
        /// PDF files to upload on start
        files: Vec<PathBuf>,
    },
    /// Upload files, wait for processing and print answers
    Ask {
        /// PDF files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Question to ask; repeat for several
        #[arg(short, long = "question", required = true)]
        questions: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?.with_overrides(cli.base_url, cli.poll_interval_ms)?;

    let command = cli.command.unwrap_or(Command::Tui { files: Vec::new() });
    let target = match command {
        Command::Tui { .. } => LogTarget::File,
        Command::Ask { .. } => LogTarget::Stderr,
    };
    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = init_logger(&config.logging, target)?;
    info!("Configuration loaded: {:?}", config.api);

    match command {
        Command::Tui { files } => docqa::tui::run(config, files).await,
        Command::Ask { files, questions } => docqa::headless::run(config, files, questions).await,
    }
}
