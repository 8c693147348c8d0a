//! PDF Preview
//!
//! Textual stand-in for an embedded viewer: page count plus a short excerpt
//! of the first page, extracted with lopdf.

use thiserror::Error;
use tracing::warn;

/// Upper bound on excerpt length, in characters
pub const EXCERPT_CHARS: usize = 1200;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Could not read PDF: {0}")]
    Parse(#[from] lopdf::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfPreview {
    pub page_count: usize,
    pub excerpt: String,
}

impl PdfPreview {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PreviewError> {
        let document = lopdf::Document::load_mem(bytes)?;
        let pages = document.get_pages();

        let excerpt = match pages.keys().next() {
            Some(&first) => match document.extract_text(&[first]) {
                Ok(text) => summarize_text(&text, EXCERPT_CHARS),
                Err(e) => {
                    warn!("Text extraction failed: {}", e);
                    String::new()
                }
            },
            None => String::new(),
        };

        Ok(Self {
            page_count: pages.len(),
            excerpt,
        })
    }
}

/// Collapse runs of blank lines and inner whitespace, then cut to `max_chars`
pub fn summarize_text(text: &str, max_chars: usize) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect();
    let joined = lines.join("\n");

    if joined.chars().count() <= max_chars {
        return joined;
    }
    let mut cut: String = joined.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
