//! Preview Widget
//!
//! Header with the active document's name and size, followed by the text
//! preview of its first page.

use crate::tui::theme::Theme;
use crate::tui::view::{PreviewPane, TuiView};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the active document header and preview
pub fn render_preview(frame: &mut Frame, area: Rect, view: &TuiView) {
    let title = match &view.active_name {
        Some(name) => Line::from(vec![
            Span::raw(" "),
            Span::styled(name.clone(), Theme::heading()),
            Span::styled(format!(" ({}) ", view.active_size), Theme::text_secondary()),
        ]),
        None => Line::from(Span::styled(" No file selected ", Theme::text_dim())),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let lines: Vec<Line> = match &view.preview {
        PreviewPane::Empty => vec![Line::from(Span::styled(
            "Select a document to preview it",
            Theme::text_dim(),
        ))],
        PreviewPane::Unreadable(reason) => vec![Line::from(Span::styled(
            format!("Preview unavailable: {}", reason),
            Theme::error(),
        ))],
        PreviewPane::Ready(preview) => {
            let pages = if preview.page_count == 1 { "page" } else { "pages" };
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("{} {}", preview.page_count, pages),
                    Theme::text_secondary(),
                )),
                Line::from(""),
            ];
            if preview.excerpt.is_empty() {
                lines.push(Line::from(Span::styled(
                    "(no extractable text on the first page)",
                    Theme::text_dim(),
                )));
            } else {
                lines.extend(
                    preview
                        .excerpt
                        .lines()
                        .map(|l| Line::from(Span::styled(l.to_string(), Theme::text()))),
                );
            }
            lines
        }
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
