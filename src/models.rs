// Core client models and backend wire types

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// MIME type accepted for upload
pub const PDF_MIME: &str = "application/pdf";

/// Where the bytes of a selected file come from
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Bytes),
}

/// A file the user picked or dropped, before validation
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub source: FileSource,
}

impl CandidateFile {
    /// Describe a file on disk without reading its contents.
    ///
    /// The MIME type is guessed from the extension, which is what a browser
    /// file picker does as well.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();

        Ok(Self {
            name,
            mime_type,
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn in_memory(name: impl Into<String>, mime_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// Read the contents and turn this into an uploadable file.
    ///
    /// At most `limit + 1` bytes are read from disk, so a file that grew past
    /// the limit since it was validated comes back with `size > limit`.
    pub async fn load(self, limit: u64) -> std::io::Result<UploadedFile> {
        let bytes = match self.source {
            FileSource::Memory(bytes) => bytes,
            FileSource::Path(path) => {
                let file = tokio::fs::File::open(&path).await?;
                let mut buf = Vec::new();
                file.take(limit.saturating_add(1)).read_to_end(&mut buf).await?;
                Bytes::from(buf)
            }
        };
        Ok(UploadedFile {
            name: self.name,
            size: bytes.len() as u64,
            bytes,
        })
    }
}

/// A document held by the client after a successful upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub bytes: Bytes,
}

/// Readiness of the uploaded documents for question answering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Processing,
    Completed,
    Failed,
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStatus::Idle => write!(f, "idle"),
            ProcessingStatus::Processing => write!(f, "processing"),
            ProcessingStatus::Completed => write!(f, "completed"),
            ProcessingStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Who a chat message comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// A chat message
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub sender: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: MessageRole, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Status value reported by `GET /processing-status/`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Idle,
    Processing,
    Completed,
    Failed,
    /// Unrecognised or missing; polling carries on
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: ServerStatus,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    /// Whether polling should stop after this response
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, ServerStatus::Completed | ServerStatus::Failed)
    }
}

/// Body returned by `POST /ask-question/`
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    #[serde(default)]
    pub question: Option<String>,
}

/// Error body returned by the upload endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable detail, if the server sent one
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
