//! Terminal View
//!
//! Holds everything the terminal currently shows. The controller updates it
//! through the [`View`] trait and `ui::render` draws it every frame.

use crate::models::{ChatMessage, ProcessingStatus, UploadedFile};
use crate::preview::PdfPreview;
use crate::registry::DocumentRegistry;
use crate::utils::format_megabytes;
use crate::view::View;
use ratatui::layout::Rect;
use std::collections::VecDeque;
use tracing::warn;
use tui_textarea::TextArea;

const INPUT_PLACEHOLDER: &str = "Ask a question about your documents...";
const INPUT_DISABLED_PLACEHOLDER: &str = "Waiting for documents to finish processing...";

/// Which panel receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Documents,
    #[default]
    Input,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentCard {
    pub name: String,
    pub size_label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewPane {
    Empty,
    Ready(PdfPreview),
    Unreadable(String),
}

/// Screen areas of a rendered card, recorded for mouse hit testing
#[derive(Debug, Clone, Copy)]
pub struct CardArea {
    pub index: usize,
    pub card: Rect,
    pub remove: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardHit {
    Select(usize),
    Remove(usize),
}

pub struct TuiView {
    // Document panel
    pub cards: Vec<DocumentCard>,
    pub card_areas: Vec<CardArea>,

    // Detail header and preview
    pub active_name: Option<String>,
    pub active_size: String,
    pub preview: PreviewPane,

    // Chat
    pub messages: Vec<ChatMessage>,
    pub input: TextArea<'static>,
    pub input_enabled: bool,
    pub focus: Focus,
    pub scroll_offset: u16,
    pub max_scroll: u16,
    follow_latest: bool,

    pub status: ProcessingStatus,
    pub alerts: VecDeque<String>,
}

impl Default for TuiView {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiView {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            card_areas: Vec::new(),
            active_name: None,
            active_size: String::new(),
            preview: PreviewPane::Empty,
            messages: Vec::new(),
            input: new_input(INPUT_DISABLED_PLACEHOLDER),
            input_enabled: false,
            focus: Focus::Input,
            scroll_offset: 0,
            max_scroll: 0,
            follow_latest: true,
            status: ProcessingStatus::Idle,
            alerts: VecDeque::new(),
        }
    }

    pub fn input_text(&self) -> String {
        self.input.lines().join("\n")
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Documents => Focus::Input,
            Focus::Input => Focus::Documents,
        };
    }

    pub fn active_card(&self) -> Option<usize> {
        self.cards.iter().position(|c| c.active)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<CardHit> {
        let contains = |r: &Rect| {
            column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
        };
        self.card_areas.iter().find(|a| contains(&a.card)).map(|a| {
            if contains(&a.remove) {
                CardHit::Remove(a.index)
            } else {
                CardHit::Select(a.index)
            }
        })
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        self.follow_latest = false;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.max_scroll);
        self.follow_latest = self.scroll_offset == self.max_scroll;
    }

    /// Update max scroll based on content
    pub fn update_scroll_bounds(&mut self, content_height: u16, viewport_height: u16) {
        self.max_scroll = content_height.saturating_sub(viewport_height);
        if self.follow_latest || self.scroll_offset > self.max_scroll {
            self.scroll_offset = self.max_scroll;
        }
    }
}

impl View for TuiView {
    fn alert(&mut self, message: &str) {
        self.alerts.push_back(message.to_string());
    }

    fn render_documents(&mut self, registry: &DocumentRegistry) {
        let active = registry.active_index();
        self.cards = registry
            .files()
            .iter()
            .enumerate()
            .map(|(i, file)| DocumentCard {
                name: file.name.clone(),
                size_label: format_megabytes(file.size),
                active: active == Some(i),
            })
            .collect();
        self.card_areas.clear();
    }

    fn render_active_document(&mut self, document: Option<&UploadedFile>) {
        match document {
            Some(file) => {
                self.active_name = Some(file.name.clone());
                self.active_size = format_megabytes(file.size);
                self.preview = match PdfPreview::from_bytes(&file.bytes) {
                    Ok(preview) => PreviewPane::Ready(preview),
                    Err(e) => {
                        warn!("No preview for {}: {}", file.name, e);
                        PreviewPane::Unreadable(e.to_string())
                    }
                };
            }
            None => {
                self.active_name = None;
                self.active_size.clear();
                self.preview = PreviewPane::Empty;
            }
        }
    }

    fn append_message(&mut self, message: &ChatMessage) {
        self.messages.push(message.clone());
        self.follow_latest = true;
    }

    fn clear_messages(&mut self) {
        self.messages.clear();
        self.scroll_offset = 0;
        self.max_scroll = 0;
        self.follow_latest = true;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        let text = self.input_text();
        let placeholder = if enabled {
            INPUT_PLACEHOLDER
        } else {
            INPUT_DISABLED_PLACEHOLDER
        };
        self.input = new_input(placeholder);
        if !text.is_empty() {
            self.input.insert_str(text);
        }
    }

    fn clear_input(&mut self) {
        self.input = new_input(if self.input_enabled {
            INPUT_PLACEHOLDER
        } else {
            INPUT_DISABLED_PLACEHOLDER
        });
    }

    fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    fn render_status(&mut self, status: ProcessingStatus) {
        self.status = status;
    }
}

fn new_input(placeholder: &str) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_cursor_line_style(ratatui::style::Style::default());
    input.set_placeholder_text(placeholder);
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageRole;
    use bytes::Bytes;

    fn registry_with(names: &[&str]) -> DocumentRegistry {
        let mut registry = DocumentRegistry::new();
        registry.extend(names.iter().map(|n| UploadedFile {
            name: n.to_string(),
            size: 2 * 1024 * 1024,
            bytes: Bytes::new(),
        }));
        registry
    }

    #[test]
    fn test_render_documents_marks_single_active_card() {
        let mut view = TuiView::new();
        let mut registry = registry_with(&["a.pdf", "b.pdf", "c.pdf"]);
        registry.set_active(1);

        view.render_documents(&registry);
        assert_eq!(view.cards.len(), 3);
        assert_eq!(view.cards.iter().filter(|c| c.active).count(), 1);
        assert_eq!(view.active_card(), Some(1));
        assert_eq!(view.cards[0].size_label, "2.00 MB");
    }

    #[test]
    fn test_unreadable_preview_and_placeholder() {
        let mut view = TuiView::new();
        let file = UploadedFile {
            name: "broken.pdf".to_string(),
            size: 3,
            bytes: Bytes::from_static(b"abc"),
        };
        view.render_active_document(Some(&file));
        assert_eq!(view.active_name.as_deref(), Some("broken.pdf"));
        assert!(matches!(view.preview, PreviewPane::Unreadable(_)));

        view.render_active_document(None);
        assert!(view.active_name.is_none());
        assert_eq!(view.preview, PreviewPane::Empty);
        assert!(view.active_size.is_empty());
    }

    #[test]
    fn test_hit_test_distinguishes_remove_button() {
        let mut view = TuiView::new();
        view.card_areas.push(CardArea {
            index: 0,
            card: Rect::new(0, 0, 20, 4),
            remove: Rect::new(16, 1, 3, 1),
        });

        assert_eq!(view.hit_test(2, 2), Some(CardHit::Select(0)));
        assert_eq!(view.hit_test(17, 1), Some(CardHit::Remove(0)));
        assert_eq!(view.hit_test(30, 1), None);
    }

    #[test]
    fn test_new_message_follows_latest() {
        let mut view = TuiView::new();
        view.update_scroll_bounds(50, 10);
        view.scroll_up(15);
        assert_eq!(view.scroll_offset, 25);

        view.append_message(&ChatMessage::new(MessageRole::System, "hello"));
        view.update_scroll_bounds(52, 10);
        assert_eq!(view.scroll_offset, 42);
    }

    #[test]
    fn test_scroll_down_near_u16_max() {
        let mut view = TuiView::new();
        view.update_scroll_bounds(u16::MAX, 1);
        view.scroll_up(5);
        view.scroll_down(u16::MAX);
        assert_eq!(view.scroll_offset, u16::MAX - 1);
    }

    #[test]
    fn test_input_keeps_draft_across_enable() {
        let mut view = TuiView::new();
        view.set_input_enabled(true);
        view.input.insert_str("draft question");
        view.set_input_enabled(false);
        assert_eq!(view.input_text(), "draft question");
        view.clear_input();
        assert_eq!(view.input_text(), "");
    }
}
