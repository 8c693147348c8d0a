//! Status Widget
//!
//! Displays where the current batch is: uploading, processing, ready.

use crate::models::ProcessingStatus;
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// State of a stage
#[derive(Debug, Clone, Copy, PartialEq)]
enum StageState {
    Pending,
    Active,
    Complete,
    Error,
}

impl StageState {
    fn upload(status: ProcessingStatus, uploading: bool) -> Self {
        if uploading {
            return StageState::Active;
        }
        match status {
            ProcessingStatus::Idle => StageState::Pending,
            _ => StageState::Complete,
        }
    }

    fn processing(status: ProcessingStatus, uploading: bool) -> Self {
        if uploading {
            return StageState::Pending;
        }
        match status {
            ProcessingStatus::Idle => StageState::Pending,
            ProcessingStatus::Processing => StageState::Active,
            ProcessingStatus::Completed => StageState::Complete,
            ProcessingStatus::Failed => StageState::Error,
        }
    }

    fn ready(status: ProcessingStatus, uploading: bool) -> Self {
        if uploading {
            return StageState::Pending;
        }
        match status {
            ProcessingStatus::Completed => StageState::Complete,
            ProcessingStatus::Failed => StageState::Error,
            _ => StageState::Pending,
        }
    }
}

/// Build the stage line
fn build_stage_line(status: ProcessingStatus, uploading: bool) -> Vec<Span<'static>> {
    let stages = [
        ("Upload", StageState::upload(status, uploading)),
        ("Processing", StageState::processing(status, uploading)),
        ("Ready", StageState::ready(status, uploading)),
    ];

    let mut spans = Vec::new();
    for (i, (name, state)) in stages.iter().enumerate() {
        let (icon, style) = match state {
            StageState::Complete => (Icons::COMPLETE, Theme::complete()),
            StageState::Active => (Icons::ACTIVE, Theme::active()),
            StageState::Pending => (Icons::PENDING, Theme::pending()),
            StageState::Error => (Icons::ERROR, Theme::error()),
        };

        spans.push(Span::styled(format!("{} ", icon), style));
        spans.push(Span::styled(name.to_string(), style));

        if i < stages.len() - 1 {
            spans.push(Span::styled(format!(" {} ", Icons::ARROW), Theme::text_dim()));
        }
    }

    spans
}

/// Render the stage indicator
pub fn render_status(frame: &mut Frame, area: Rect, status: ProcessingStatus, uploading: bool) {
    let paragraph = Paragraph::new(Line::from(build_stage_line(status, uploading)));
    frame.render_widget(paragraph, area);
}
