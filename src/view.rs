//! View interface
//!
//! The controller reflects every state change through this trait, so the
//! state machine runs the same under the terminal UI, the headless console
//! output and the recording view used in tests.

use crate::models::{ChatMessage, ProcessingStatus, UploadedFile};
use crate::registry::DocumentRegistry;

pub trait View {
    /// Blocking notice for the user (rejected files, unreadable paths)
    fn alert(&mut self, message: &str);

    /// Regenerate the whole document list from the registry
    fn render_documents(&mut self, registry: &DocumentRegistry);

    /// Show the active document in the header and preview pane, or the
    /// "No file selected" placeholder for `None`
    fn render_active_document(&mut self, document: Option<&UploadedFile>);

    /// Append to the chat view and scroll to the newest message
    fn append_message(&mut self, message: &ChatMessage);

    fn clear_messages(&mut self);

    fn set_input_enabled(&mut self, enabled: bool);

    fn clear_input(&mut self);

    fn focus_input(&mut self);

    fn render_status(&mut self, _status: ProcessingStatus) {}
}
