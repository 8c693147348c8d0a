//! TUI Widgets
//!
//! Panels that make up the main screen.

mod documents;
mod preview;
mod status;

pub use documents::render_documents;
pub use preview::render_preview;
pub use status::render_status;
