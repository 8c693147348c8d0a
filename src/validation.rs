//! File validation
//!
//! Only PDFs within the configured size limit are admitted for upload.

use crate::models::{CandidateFile, PDF_MIME};
use thiserror::Error;

/// Default per-file limit (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Why a selected file was excluded. The display text is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("\"{name}\" is not a PDF.")]
    NotPdf { name: String },

    #[error("\"{name}\" exceeds {limit_mb}MB limit.")]
    TooLarge { name: String, limit_mb: u64 },
}

/// Check a single file against the upload rules
pub fn check_file(file: &CandidateFile, max_size: u64) -> Result<(), Rejection> {
    if file.mime_type != PDF_MIME {
        return Err(Rejection::NotPdf {
            name: file.name.clone(),
        });
    }
    if file.size > max_size {
        return Err(Rejection::TooLarge {
            name: file.name.clone(),
            limit_mb: max_size / (1024 * 1024),
        });
    }
    Ok(())
}

/// Split candidates into the admitted files (order preserved) and rejections
pub fn validate_files(
    candidates: Vec<CandidateFile>,
    max_size: u64,
) -> (Vec<CandidateFile>, Vec<Rejection>) {
    let mut accepted = Vec::with_capacity(candidates.len());
    let mut rejected = Vec::new();

    for file in candidates {
        match check_file(&file, max_size) {
            Ok(()) => accepted.push(file),
            Err(rejection) => rejected.push(rejection),
        }
    }

    (accepted, rejected)
}
