// docqa - terminal client for a PDF question-answering backend

pub mod api;
pub mod chat;
pub mod config;
pub mod controller;
pub mod headless;
pub mod models;
pub mod poller;
pub mod preview;
pub mod registry;
pub mod tui;       // Terminal User Interface
pub mod types;
pub mod utils;
pub mod validation;
pub mod view;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use config::Config;
pub use controller::Controller;
pub use types::{AppError, AppResult};
