// Backend API abstraction layer

pub mod http;

use crate::models::{AnswerResponse, StatusResponse, UploadedFile};
use crate::types::AppResult;
use async_trait::async_trait;

pub use http::HttpDocumentApi;

/// The three calls the client makes against the question-answering backend
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// `POST /upload-pdfs/`. Resolves with the (otherwise unused) JSON body.
    async fn upload_pdfs(&self, files: &[UploadedFile]) -> AppResult<serde_json::Value>;

    /// `GET /processing-status/`
    async fn processing_status(&self) -> AppResult<StatusResponse>;

    /// `POST /ask-question/`
    async fn ask_question(&self, question: &str) -> AppResult<AnswerResponse>;
}
