//! Event Handling
//!
//! Handles keyboard, mouse, paste and timer events for the TUI.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Actions that can be performed in the application
#[derive(Debug, Clone)]
pub enum AppAction {
    /// Quit the application
    Quit,
    /// Force quit (Ctrl+C)
    ForceQuit,
    /// Enter key
    Submit,
    /// Open the file path prompt (Ctrl+O)
    OpenFiles,
    /// Toggle help view
    ToggleHelp,
    /// Escape - close modals, cancel
    Escape,
    /// Move focus between the document list and the question input
    FocusNext,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Scroll messages up one page
    ScrollPageUp,
    /// Scroll messages down one page
    ScrollPageDown,
    /// Mouse wheel over the messages
    WheelUp,
    WheelDown,
    /// Bracketed paste; a terminal file drop arrives this way
    Paste(String),
    /// Left mouse click at (column, row)
    Click { column: u16, row: u16 },
    /// Regular input key
    Input(KeyEvent),
    /// Timer tick
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::Receiver<AppAction>,
    _tx: mpsc::Sender<AppAction>,
}

impl EventHandler {
    /// Create a new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let tx_clone = tx.clone();

        // Spawn event polling task
        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let tick = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                tokio::select! {
                    _ = tick => {
                        if tx_clone.send(AppAction::Tick).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(evt)) = crossterm_event => {
                        if let Some(action) = map_event(evt) {
                            if tx_clone.send(action).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Wait for the next action
    pub async fn next(&mut self) -> Option<AppAction> {
        self.rx.recv().await
    }
}

/// Map a crossterm event to an app action
pub fn map_event(event: Event) -> Option<AppAction> {
    match event {
        Event::Key(key) => map_key_event(key),
        Event::Paste(text) => Some(AppAction::Paste(text)),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(AppAction::Click {
                column: mouse.column,
                row: mouse.row,
            }),
            MouseEventKind::ScrollUp => Some(AppAction::WheelUp),
            MouseEventKind::ScrollDown => Some(AppAction::WheelDown),
            _ => None,
        },
        _ => None,
    }
}

/// Map a key event to an app action
pub fn map_key_event(key: KeyEvent) -> Option<AppAction> {
    if key.kind != crossterm::event::KeyEventKind::Press {
        return None;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(AppAction::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('q')) => Some(AppAction::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('o')) => Some(AppAction::OpenFiles),

        (KeyModifiers::NONE, code) | (KeyModifiers::SHIFT, code) => match code {
            KeyCode::Esc => Some(AppAction::Escape),
            KeyCode::Enter => Some(AppAction::Submit),
            KeyCode::F(1) => Some(AppAction::ToggleHelp),
            KeyCode::Tab | KeyCode::BackTab => Some(AppAction::FocusNext),
            KeyCode::Up => Some(AppAction::Up),
            KeyCode::Down => Some(AppAction::Down),
            KeyCode::PageUp => Some(AppAction::ScrollPageUp),
            KeyCode::PageDown => Some(AppAction::ScrollPageDown),
            _ => Some(AppAction::Input(key)),
        },

        // Pass through other key combinations as input
        _ => Some(AppAction::Input(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseEvent, KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_shortcuts() {
        assert!(matches!(
            map_key_event(key(KeyCode::Char('o'), KeyModifiers::CONTROL)),
            Some(AppAction::OpenFiles)
        ));
        assert!(matches!(
            map_key_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(AppAction::Quit)
        ));
        assert!(matches!(
            map_key_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(AppAction::Submit)
        ));
        assert!(matches!(
            map_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(AppAction::Input(_))
        ));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut release = key(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(map_key_event(release).is_none());
    }

    #[test]
    fn test_paste_and_click() {
        assert!(matches!(
            map_event(Event::Paste("/tmp/a.pdf".to_string())),
            Some(AppAction::Paste(ref t)) if t == "/tmp/a.pdf"
        ));

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert!(matches!(
            map_event(click),
            Some(AppAction::Click { column: 4, row: 7 })
        ));
    }

    #[test]
    fn test_wheel_maps_to_message_scroll() {
        let wheel = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert!(matches!(
            map_event(wheel(MouseEventKind::ScrollUp)),
            Some(AppAction::WheelUp)
        ));
        assert!(matches!(
            map_event(wheel(MouseEventKind::ScrollDown)),
            Some(AppAction::WheelDown)
        ));
    }
}
