// Test doubles for the backend and the view

use crate::api::DocumentApi;
use crate::models::{AnswerResponse, ChatMessage, MessageRole, ProcessingStatus, StatusResponse, UploadedFile};
use crate::registry::DocumentRegistry;
use crate::types::AppResult;
use crate::view::View;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn status(value: &str, message: Option<&str>) -> StatusResponse {
    serde_json::from_value(serde_json::json!({ "status": value, "message": message }))
        .expect("valid status fixture")
}

pub fn answer(text: &str) -> AnswerResponse {
    AnswerResponse {
        answer: text.to_string(),
        question: None,
    }
}

/// Scripted backend. Empty queues fall back to a successful upload,
/// "processing" status and an "ok" answer.
#[derive(Default)]
pub struct FakeApi {
    uploads: Mutex<VecDeque<AppResult<serde_json::Value>>>,
    statuses: Mutex<VecDeque<AppResult<StatusResponse>>>,
    answers: Mutex<VecDeque<AppResult<AnswerResponse>>>,
    uploaded: Mutex<Vec<Vec<String>>>,
    questions: Mutex<Vec<String>>,
    status_calls: AtomicUsize,
    upload_delay: Mutex<Option<Duration>>,
    answer_delay: Mutex<Option<Duration>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_upload(&self, result: AppResult<serde_json::Value>) {
        self.uploads.lock().unwrap().push_back(result);
    }

    pub fn push_status(&self, result: AppResult<StatusResponse>) {
        self.statuses.lock().unwrap().push_back(result);
    }

    pub fn push_answer(&self, result: AppResult<AnswerResponse>) {
        self.answers.lock().unwrap().push_back(result);
    }

    pub fn delay_uploads(&self, delay: Duration) {
        *self.upload_delay.lock().unwrap() = Some(delay);
    }

    pub fn delay_answers(&self, delay: Duration) {
        *self.answer_delay.lock().unwrap() = Some(delay);
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn uploaded_batches(&self) -> Vec<Vec<String>> {
        self.uploaded.lock().unwrap().clone()
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentApi for FakeApi {
    async fn upload_pdfs(&self, files: &[UploadedFile]) -> AppResult<serde_json::Value> {
        self.uploaded
            .lock()
            .unwrap()
            .push(files.iter().map(|f| f.name.clone()).collect());
        let delay = *self.upload_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.uploads.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(serde_json::json!({ "status": "processing" })))
    }

    async fn processing_status(&self) -> AppResult<StatusResponse> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.statuses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(status("processing", None)))
    }

    async fn ask_question(&self, question: &str) -> AppResult<AnswerResponse> {
        self.questions.lock().unwrap().push(question.to_string());
        let delay = *self.answer_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.answers.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(answer("ok")))
    }
}

/// View that remembers what it was asked to show
#[derive(Debug, Default)]
pub struct RecordingView {
    pub alerts: Vec<String>,
    pub cards: Vec<(String, bool)>,
    pub list_renders: usize,
    pub header: Option<String>,
    pub messages: Vec<(MessageRole, String)>,
    pub input_enabled: bool,
    pub input_cleared: usize,
    pub focused: usize,
    pub status: ProcessingStatus,
}

impl RecordingView {
    pub fn count(&self, sender: MessageRole) -> usize {
        self.messages.iter().filter(|(s, _)| *s == sender).count()
    }

    pub fn last_message(&self) -> Option<&(MessageRole, String)> {
        self.messages.last()
    }
}

impl View for RecordingView {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn render_documents(&mut self, registry: &DocumentRegistry) {
        self.list_renders += 1;
        self.cards = registry
            .files()
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), registry.active_index() == Some(i)))
            .collect();
    }

    fn render_active_document(&mut self, document: Option<&UploadedFile>) {
        self.header = document.map(|d| d.name.clone());
    }

    fn append_message(&mut self, message: &ChatMessage) {
        self.messages.push((message.sender, message.text.clone()));
    }

    fn clear_messages(&mut self) {
        self.messages.clear();
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn clear_input(&mut self) {
        self.input_cleared += 1;
    }

    fn focus_input(&mut self) {
        self.focused += 1;
    }

    fn render_status(&mut self, status: ProcessingStatus) {
        self.status = status;
    }
}
