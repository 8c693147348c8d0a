use crate::models::{AnswerResponse, StatusResponse, UploadedFile};
use crate::types::AppResult;

/// Outcomes of background work, applied by the controller one at a time
#[derive(Debug)]
pub enum AppEvent {
    /// An upload batch finished (files are only kept on success)
    UploadFinished {
        batch: u64,
        result: AppResult<(Vec<UploadedFile>, serde_json::Value)>,
    },
    /// One poll tick of the given poll session
    PollTick {
        session: u64,
        result: AppResult<StatusResponse>,
    },
    /// Response to a question asked during `batch`
    AnswerReceived {
        batch: u64,
        result: AppResult<AnswerResponse>,
    },
}
