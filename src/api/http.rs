// reqwest implementation of the backend API
//
// Endpoints (relative to the configured base URL):
//   POST upload-pdfs/         multipart, repeated `files` field
//   GET  processing-status/   {"status": ..., "message": ...}
//   POST ask-question/        form body question=<text> -> {"answer": ...}

use crate::api::DocumentApi;
use crate::config::ApiConfig;
use crate::models::{AnswerResponse, ErrorBody, StatusResponse, UploadedFile};
use crate::types::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info, warn};

const UPLOAD_PATH: &str = "upload-pdfs/";
const STATUS_PATH: &str = "processing-status/";
const QUESTION_PATH: &str = "ask-question/";

const UPLOAD_FAILED: &str = "Upload failed";

pub struct HttpDocumentApi {
    client: Client,
    base_url: String,
}

impl HttpDocumentApi {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Use an existing client (custom TLS, proxies, tests)
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn build_form(files: &[UploadedFile]) -> AppResult<Form> {
        let mut form = Form::new();
        for file in files {
            let part = Part::stream_with_length(file.bytes.clone(), file.size)
                .file_name(file.name.clone())
                .mime_str(mime::APPLICATION_PDF.as_ref())?;
            form = form.part("files", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl DocumentApi for HttpDocumentApi {
    async fn upload_pdfs(&self, files: &[UploadedFile]) -> AppResult<serde_json::Value> {
        let url = self.endpoint(UPLOAD_PATH);
        let form = Self::build_form(files).map_err(|e| AppError::Upload(e.to_string()))?;

        info!("Uploading {} file(s) to {}", files.len(), url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail_message())
                .unwrap_or_else(|| UPLOAD_FAILED.to_string());
            warn!("Upload rejected ({}): {}", status, message);
            return Err(AppError::Upload(message));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;
        debug!("Upload response: {}", body);
        Ok(body)
    }

    async fn processing_status(&self) -> AppResult<StatusResponse> {
        let response = self
            .client
            .get(self.endpoint(STATUS_PATH))
            .send()
            .await
            .map_err(|e| AppError::Poll(format!("Status request failed: {}", e)))?;

        // Any JSON object is a status report, whatever the HTTP code; a
        // missing or unknown `status` keeps the poll going
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Poll(format!("Failed to read status response: {}", e)))?;

        match serde_json::from_slice::<StatusResponse>(&body) {
            Ok(parsed) => {
                if !status.is_success() {
                    warn!("Status endpoint returned {} with status {:?}", status, parsed.status);
                }
                Ok(parsed)
            }
            Err(_) if !status.is_success() => {
                Err(AppError::Poll(format!("Status endpoint returned {}", status)))
            }
            Err(e) => Err(AppError::Poll(format!("Failed to parse status response: {}", e))),
        }
    }

    async fn ask_question(&self, question: &str) -> AppResult<AnswerResponse> {
        let response = self
            .client
            .post(self.endpoint(QUESTION_PATH))
            .form(&[("question", question)])
            .send()
            .await
            .map_err(|e| AppError::Question(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::QuestionStatus(status.as_u16()));
        }

        response
            .json::<AnswerResponse>()
            .await
            .map_err(|e| AppError::Question(format!("Failed to parse answer: {}", e)))
    }
}
