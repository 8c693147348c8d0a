//! Headless mode
//!
//! Uploads the given files, waits for processing, asks each question in turn
//! and prints the conversation. Shares the controller with the terminal UI.

use crate::api::{DocumentApi, HttpDocumentApi};
use crate::config::Config;
use crate::controller::Controller;
use crate::models::{ChatMessage, MessageRole, ProcessingStatus, UploadedFile};
use crate::registry::DocumentRegistry;
use crate::utils::format_megabytes;
use crate::view::View;
use anyhow::bail;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Prints chat messages as plain lines; alerts go to stderr
pub struct ConsoleView<W: Write> {
    out: W,
    alerts: Vec<String>,
    listing: Vec<String>,
}

impl ConsoleView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            alerts: Vec::new(),
            listing: Vec::new(),
        }
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("Could not write to output: {}", e);
        }
    }
}

impl<W: Write> View for ConsoleView<W> {
    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
        self.alerts.push(message.to_string());
    }

    fn render_documents(&mut self, registry: &DocumentRegistry) {
        let listing: Vec<String> = registry
            .files()
            .iter()
            .map(|f| format!("  {} ({})", f.name, format_megabytes(f.size)))
            .collect();
        // Re-selection renders the same list again
        if listing == self.listing {
            return;
        }
        for entry in &listing {
            self.line(entry);
        }
        self.listing = listing;
    }

    fn render_active_document(&mut self, _document: Option<&UploadedFile>) {}

    fn append_message(&mut self, message: &ChatMessage) {
        let label = match message.sender {
            MessageRole::User => "you",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        };
        self.line(&format!("[{}] {}", label, message.text));
    }

    fn clear_messages(&mut self) {}

    fn set_input_enabled(&mut self, _enabled: bool) {}

    fn clear_input(&mut self) {}

    fn focus_input(&mut self) {}
}

/// Upload `files`, wait for processing, then ask `questions` in order
pub async fn run(config: Config, files: Vec<PathBuf>, questions: Vec<String>) -> anyhow::Result<()> {
    info!("Starting headless mode against {}", config.api.base_url);
    let api: Arc<dyn DocumentApi> = Arc::new(HttpDocumentApi::new(&config.api)?);
    let mut controller = Controller::new(api, &config, ConsoleView::stdout());
    ask(&mut controller, &files, &questions).await
}

async fn ask<W: Write>(
    controller: &mut Controller<ConsoleView<W>>,
    files: &[PathBuf],
    questions: &[String],
) -> anyhow::Result<()> {
    if !controller.open_paths(files).await {
        bail!("None of the given files can be uploaded");
    }
    controller.run_until_settled().await;

    let status = controller.status();
    if status != ProcessingStatus::Completed {
        bail!("Documents were not processed (status: {})", status);
    }

    for question in questions {
        if !controller.send_question(question) {
            warn!("Skipping blank question");
            continue;
        }
        controller.run_until_settled().await;
    }

    Ok(())
}
