//! Application Controller
//!
//! Owns the whole client state (document registry, processing status, chat
//! log, question input, poller) and exposes the transitions between
//! upload → processing → ready → querying. Network work runs on spawned tasks
//! that report back as [`AppEvent`]s; events are applied one at a time by
//! [`Controller::handle_event`], so state is only ever mutated from a single
//! sequence.

mod event;

pub use event::AppEvent;

use crate::api::DocumentApi;
use crate::chat::ChatLog;
use crate::config::Config;
use crate::models::{CandidateFile, MessageRole, ProcessingStatus, ServerStatus, UploadedFile};
use crate::poller::StatusPoller;
use crate::registry::{DocumentRegistry, Removal};
use crate::types::{AppError, AppResult};
use crate::validation::{validate_files, Rejection};
use crate::view::View;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const PROCESSING_COMPLETE: &str = "Processing complete! Ask questions now.";
const STATUS_CHECK_FAILED: &str = "Error checking processing status.";

pub struct Controller<V: View> {
    api: Arc<dyn DocumentApi>,
    max_file_size: u64,

    // Document state
    registry: DocumentRegistry,
    status: ProcessingStatus,
    batch: u64,
    poller: StatusPoller,

    // Chat state
    chat: ChatLog,
    input_enabled: bool,
    upload_in_flight: bool,
    question_in_flight: bool,

    view: V,

    // Async communication
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl<V: View> Controller<V> {
    pub fn new(api: Arc<dyn DocumentApi>, config: &Config, mut view: V) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let registry = DocumentRegistry::new();

        view.render_documents(&registry);
        view.render_active_document(None);
        view.render_status(ProcessingStatus::Idle);
        view.set_input_enabled(false);

        Self {
            api,
            max_file_size: config.upload.max_file_size_bytes,
            registry,
            status: ProcessingStatus::Idle,
            batch: 0,
            poller: StatusPoller::new(config.polling.interval()),
            chat: ChatLog::new(),
            input_enabled: false,
            upload_in_flight: false,
            question_in_flight: false,
            view,
            event_tx,
            event_rx,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }

    pub fn is_uploading(&self) -> bool {
        self.upload_in_flight
    }

    pub fn is_awaiting_answer(&self) -> bool {
        self.question_in_flight
    }

    /// Whether any upload, poll session or question is still outstanding
    pub fn is_busy(&self) -> bool {
        self.upload_in_flight || self.question_in_flight || self.poller.is_active()
    }

    /// Open files from disk. Paths that cannot be read are reported and
    /// skipped; the rest go through [`Controller::handle_files`].
    pub async fn open_paths(&mut self, paths: &[PathBuf]) -> bool {
        let mut candidates = Vec::with_capacity(paths.len());
        for path in paths {
            match CandidateFile::from_path(path).await {
                Ok(candidate) => candidates.push(candidate),
                Err(e) => {
                    warn!("Cannot open {}: {}", path.display(), e);
                    self.view
                        .alert(&format!("Could not open \"{}\": {}", path.display(), e));
                }
            }
        }
        self.handle_files(candidates)
    }

    /// Validate a selection and, if anything is admitted, start a new batch.
    ///
    /// Returns whether an upload was started. A selection with no valid file
    /// leaves all state untouched.
    pub fn handle_files(&mut self, candidates: Vec<CandidateFile>) -> bool {
        let (accepted, rejected) = validate_files(candidates, self.max_file_size);
        for rejection in &rejected {
            warn!("Rejected file: {}", rejection);
            self.view.alert(&rejection.to_string());
        }

        if accepted.is_empty() {
            debug!("No valid files in selection");
            return false;
        }

        self.clear_everything();
        self.add_message(
            MessageRole::System,
            format!("Uploading {} document(s)...", accepted.len()),
        );

        self.upload_in_flight = true;
        let batch = self.batch;
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let max_file_size = self.max_file_size;

        info!(batch, "Uploading {} file(s)", accepted.len());
        tokio::spawn(async move {
            let result = upload_batch(api.as_ref(), accepted, max_file_size).await;
            tx.send(AppEvent::UploadFinished { batch, result }).ok();
        });

        true
    }

    /// Discard everything belonging to the current batch
    pub fn clear_everything(&mut self) {
        self.batch += 1;
        self.registry.clear();
        self.chat.clear();
        self.status = ProcessingStatus::Idle;
        self.poller.cancel();
        self.upload_in_flight = false;
        self.question_in_flight = false;

        self.view.clear_messages();
        self.view.render_active_document(None);
        self.view.render_status(self.status);
        self.set_input(false);
        self.view.render_documents(&self.registry);
    }

    pub fn set_active_file(&mut self, index: usize) {
        if !self.registry.set_active(index) {
            return;
        }
        debug!(index, "Active document changed");
        self.view.render_documents(&self.registry);
        self.view.render_active_document(self.registry.active());
    }

    pub fn remove_file(&mut self, index: usize) {
        let Some(removal) = self.registry.remove(index) else {
            return;
        };
        debug!(index, ?removal, "Document removed");

        self.view.render_documents(&self.registry);
        match removal {
            Removal::Reselected(_) => self.view.render_active_document(self.registry.active()),
            Removal::Emptied => self.view.render_active_document(None),
            Removal::Unchanged => {}
        }
    }

    /// Ask a question about the current batch.
    ///
    /// No-op for blank text or while the input is disabled. Returns whether a
    /// request was sent.
    pub fn send_question(&mut self, text: &str) -> bool {
        let question = text.trim();
        if question.is_empty() {
            return false;
        }
        if !self.input_enabled {
            debug!("Question input is disabled");
            return false;
        }

        self.set_input(false);
        self.question_in_flight = true;
        self.add_message(MessageRole::User, question);
        self.view.clear_input();

        let batch = self.batch;
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let question = question.to_string();

        tokio::spawn(async move {
            let result = api.ask_question(&question).await;
            tx.send(AppEvent::AnswerReceived { batch, result }).ok();
        });

        true
    }

    /// Apply all events that are already waiting
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next event without applying it
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.event_rx.recv().await
    }

    /// Apply events until no upload, poll session or question is outstanding
    pub async fn run_until_settled(&mut self) {
        while self.is_busy() {
            match self.event_rx.recv().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::UploadFinished { batch, result } => {
                if batch != self.batch {
                    debug!(batch, current = self.batch, "Ignoring upload result of a discarded batch");
                    return;
                }
                self.upload_in_flight = false;
                self.on_upload_finished(result);
            }
            AppEvent::PollTick { session, result } => {
                if self.poller.active_session() != Some(session) {
                    debug!(session, "Ignoring tick of a canceled poll session");
                    return;
                }
                self.on_poll_tick(result);
            }
            AppEvent::AnswerReceived { batch, result } => {
                if batch != self.batch {
                    debug!(batch, current = self.batch, "Ignoring answer for a discarded batch");
                    return;
                }
                self.on_answer(result);
            }
        }
    }

    fn on_upload_finished(&mut self, result: AppResult<(Vec<UploadedFile>, serde_json::Value)>) {
        match result {
            Ok((files, body)) => {
                info!(count = files.len(), "Upload accepted: {}", body);
                self.registry.extend(files);
                self.view.render_documents(&self.registry);
                if !self.registry.is_empty() {
                    self.set_active_file(0);
                }
                self.start_polling();
            }
            Err(e) => {
                error!("Upload failed: {}", e);
                self.add_message(MessageRole::System, format!("Upload error: {}", e));
                self.add_message(MessageRole::System, format!("Error uploading files: {}", e));
            }
        }
    }

    fn start_polling(&mut self) {
        self.status = ProcessingStatus::Processing;
        self.view.render_status(self.status);
        let session = self
            .poller
            .start(Arc::clone(&self.api), self.event_tx.clone());
        info!(session, "Polling processing status every {:?}", self.poller.period());
    }

    fn on_poll_tick(&mut self, result: AppResult<crate::models::StatusResponse>) {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!("Status check failed, polling stopped: {}", e);
                self.poller.cancel();
                self.add_message(MessageRole::System, STATUS_CHECK_FAILED);
                return;
            }
        };

        match response.status {
            ServerStatus::Completed => {
                info!("Processing completed");
                self.poller.cancel();
                self.status = ProcessingStatus::Completed;
                self.view.render_status(self.status);
                self.set_input(true);
                self.add_message(MessageRole::System, PROCESSING_COMPLETE);
            }
            ServerStatus::Failed => {
                let reason = response
                    .message
                    .unwrap_or_else(|| "no reason given".to_string());
                warn!("Processing failed: {}", reason);
                self.poller.cancel();
                self.status = ProcessingStatus::Failed;
                self.view.render_status(self.status);
                self.add_message(MessageRole::System, format!("Processing failed: {}", reason));
            }
            other => {
                debug!(status = ?other, "Still processing");
            }
        }
    }

    fn on_answer(&mut self, result: AppResult<crate::models::AnswerResponse>) {
        match result {
            Ok(response) => self.add_message(MessageRole::Assistant, response.answer),
            Err(e) => {
                warn!("Question failed: {}", e);
                self.add_message(
                    MessageRole::System,
                    format!("Error processing request: {}", e),
                );
            }
        }

        self.question_in_flight = false;
        self.set_input(true);
        self.view.focus_input();
    }

    fn set_input(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.view.set_input_enabled(enabled);
    }

    fn add_message(&mut self, sender: MessageRole, text: impl Into<String>) {
        let message = self.chat.push(sender, text);
        self.view.append_message(message);
    }
}

/// Read every admitted file and send them as one request. The size limit is
/// enforced again on the bytes actually read, since a file on disk can change
/// after validation.
async fn upload_batch(
    api: &dyn DocumentApi,
    candidates: Vec<CandidateFile>,
    max_file_size: u64,
) -> AppResult<(Vec<UploadedFile>, serde_json::Value)> {
    let mut files = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let name = candidate.name.clone();
        let file = candidate
            .load(max_file_size)
            .await
            .map_err(|e| AppError::Upload(format!("Could not read \"{}\": {}", name, e)))?;
        if file.size > max_file_size {
            let rejection = Rejection::TooLarge {
                name,
                limit_mb: max_file_size / (1024 * 1024),
            };
            return Err(AppError::Upload(rejection.to_string()));
        }
        files.push(file);
    }

    let body = api.upload_pdfs(&files).await?;
    Ok((files, body))
}
