//! Terminal User Interface Module
//!
//! Interactive front end for uploading PDFs and asking questions about them.
//! Built with Ratatui for high-performance terminal rendering.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  📄 DocQA                        ✓ Upload → ● Processing → ○ Ready │
//! ├───────────────────┬─────────────────────────────────────────────┤
//! │ Documents (2)     │ report.pdf (2.00 MB)                        │
//! │ ┌───────────────┐ │  [text preview of the first page]           │
//! │ │▶ report.pdf[x]│ ├─────────────────────────────────────────────┤
//! │ │  2.00 MB      │ │ Messages                                    │
//! │ └───────────────┘ │  [scrollable chat history]                  │
//! │ ┌───────────────┐ ├─────────────────────────────────────────────┤
//! │ │  notes.pdf [x]│ │ Question                                    │
//! │ └───────────────┘ │ > Ask a question about your documents...    │
//! ├───────────────────┴─────────────────────────────────────────────┤
//! │ Processing... │ [Enter] Send [Ctrl+O] Open [Ctrl+Q] Quit [F1] Help │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod drop;
pub mod event;
pub mod theme;
pub mod ui;
pub mod view;
pub mod widgets;

pub use app::{App, Screen};
pub use event::{AppAction, EventHandler};
pub use view::TuiView;

use crate::api::{DocumentApi, HttpDocumentApi};
use crate::config::Config;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI application, optionally uploading `files` right away
pub async fn run(config: Config, files: Vec<PathBuf>) -> anyhow::Result<()> {
    info!("Starting TUI mode against {}", config.api.base_url);

    let api: Arc<dyn DocumentApi> = Arc::new(HttpDocumentApi::new(&config.api)?);
    let mut app = App::new(api, &config);
    if !files.is_empty() {
        app.controller.open_paths(&files).await;
    }

    let mut terminal = init_terminal()?;
    let mut events = EventHandler::new(std::time::Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Apply finished network work
        app.poll_events();

        // Handle user input
        if let Some(action) = events.next().await {
            app.handle_action(action).await;
        }

        if app.should_quit {
            break;
        }
    }

    info!("TUI exited normally");
    Ok(())
}
