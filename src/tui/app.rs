//! Application State
//!
//! Wraps the controller with the terminal-only state (current screen, path
//! prompt) and maps user actions onto controller operations.

use crate::api::DocumentApi;
use crate::config::Config;
use crate::controller::Controller;
use crate::tui::drop::{as_file_drop, parse_dropped_paths};
use crate::tui::event::AppAction;
use crate::tui::view::{CardHit, Focus, TuiView};
use crossterm::event::KeyCode;
use std::sync::Arc;
use tracing::info;
use tui_textarea::TextArea;

const PAGE_LINES: u16 = 10;
const WHEEL_LINES: u16 = 3;

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Main,
    OpenFiles,
    Help,
}

pub struct App {
    pub controller: Controller<TuiView>,
    pub screen: Screen,
    pub open_prompt: TextArea<'static>,
    pub should_quit: bool,
}

impl App {
    pub fn new(api: Arc<dyn DocumentApi>, config: &Config) -> Self {
        Self {
            controller: Controller::new(api, config, TuiView::new()),
            screen: Screen::Main,
            open_prompt: new_prompt(),
            should_quit: false,
        }
    }

    pub fn view(&self) -> &TuiView {
        self.controller.view()
    }

    fn view_mut(&mut self) -> &mut TuiView {
        self.controller.view_mut()
    }

    /// Apply finished uploads, poll ticks and answers
    pub fn poll_events(&mut self) {
        self.controller.poll_events();
    }

    pub async fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Tick => return,
            AppAction::ForceQuit | AppAction::Quit => {
                self.should_quit = true;
                return;
            }
            // The wheel always scrolls the chat, whatever has focus
            AppAction::WheelUp => {
                self.view_mut().scroll_up(WHEEL_LINES);
                return;
            }
            AppAction::WheelDown => {
                self.view_mut().scroll_down(WHEEL_LINES);
                return;
            }
            _ => {}
        }

        // An alert blocks everything else until dismissed
        if !self.view().alerts.is_empty() {
            self.view_mut().dismiss_alert();
            return;
        }

        match self.screen {
            Screen::Help => self.screen = Screen::Main,
            Screen::OpenFiles => self.handle_prompt_action(action).await,
            Screen::Main => self.handle_main_action(action).await,
        }
    }

    async fn handle_prompt_action(&mut self, action: AppAction) {
        match action {
            AppAction::Escape => self.close_prompt(),
            AppAction::Submit => {
                let text = self.open_prompt.lines().join(" ");
                self.close_prompt();
                let paths = parse_dropped_paths(&text);
                if !paths.is_empty() {
                    self.controller.open_paths(&paths).await;
                }
            }
            AppAction::Paste(text) => {
                self.open_prompt.insert_str(text);
            }
            AppAction::Input(key) => {
                self.open_prompt.input(key);
            }
            _ => {}
        }
    }

    async fn handle_main_action(&mut self, action: AppAction) {
        let focus = self.view().focus;
        match action {
            AppAction::OpenFiles => self.screen = Screen::OpenFiles,
            AppAction::ToggleHelp => self.screen = Screen::Help,
            AppAction::FocusNext => self.view_mut().toggle_focus(),
            AppAction::Escape => self.view_mut().focus = Focus::Input,
            AppAction::Submit => match focus {
                Focus::Input => {
                    let text = self.view().input_text();
                    self.controller.send_question(&text);
                }
                Focus::Documents => self.view_mut().focus = Focus::Input,
            },
            AppAction::Up => match focus {
                Focus::Documents => self.select_relative(-1),
                Focus::Input => self.view_mut().scroll_up(1),
            },
            AppAction::Down => match focus {
                Focus::Documents => self.select_relative(1),
                Focus::Input => self.view_mut().scroll_down(1),
            },
            AppAction::ScrollPageUp => self.view_mut().scroll_up(PAGE_LINES),
            AppAction::ScrollPageDown => self.view_mut().scroll_down(PAGE_LINES),
            AppAction::Paste(text) => {
                if let Some(paths) = as_file_drop(&text) {
                    info!("{} file(s) dropped", paths.len());
                    self.controller.open_paths(&paths).await;
                } else if focus == Focus::Input && self.view().input_enabled {
                    self.view_mut().input.insert_str(text);
                }
            }
            AppAction::Click { column, row } => {
                let hit = self.view().hit_test(column, row);
                match hit {
                    Some(CardHit::Remove(index)) => self.controller.remove_file(index),
                    Some(CardHit::Select(index)) => {
                        self.controller.set_active_file(index);
                        self.view_mut().focus = Focus::Documents;
                    }
                    None => {}
                }
            }
            AppAction::Input(key) => match focus {
                Focus::Documents => {
                    if matches!(key.code, KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x')) {
                        if let Some(index) = self.controller.registry().active_index() {
                            self.controller.remove_file(index);
                        }
                    }
                }
                Focus::Input => {
                    if self.view().input_enabled {
                        self.view_mut().input.input(key);
                    }
                }
            },
            AppAction::Tick
            | AppAction::Quit
            | AppAction::ForceQuit
            | AppAction::WheelUp
            | AppAction::WheelDown => {}
        }
    }

    fn select_relative(&mut self, delta: isize) {
        let registry = self.controller.registry();
        if registry.is_empty() {
            return;
        }
        let current = registry.active_index().unwrap_or(0) as isize;
        let last = registry.len() as isize - 1;
        let next = (current + delta).clamp(0, last) as usize;
        self.controller.set_active_file(next);
    }

    fn close_prompt(&mut self) {
        self.open_prompt = new_prompt();
        self.screen = Screen::Main;
    }
}

fn new_prompt() -> TextArea<'static> {
    let mut prompt = TextArea::default();
    prompt.set_cursor_line_style(ratatui::style::Style::default());
    prompt.set_placeholder_text("/path/to/first.pdf /path/to/second.pdf");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessingStatus;
    use crate::testing::{answer, status, FakeApi};
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn app(api: &Arc<FakeApi>) -> App {
        let api: Arc<dyn DocumentApi> = api.clone();
        App::new(api, &Config::default())
    }

    fn write_pdf(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"%PDF-1.4\n%%EOF").unwrap();
        path
    }

    async fn settle(app: &mut App) {
        app.controller.run_until_settled().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_upload_and_ask() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), "drop.pdf");
        let api = Arc::new(FakeApi::new());
        api.push_status(Ok(status("completed", None)));
        api.push_answer(Ok(answer("42")));
        let mut app = app(&api);

        app.handle_action(AppAction::Paste(format!("'{}'", path.display()))).await;
        settle(&mut app).await;
        assert_eq!(app.controller.status(), ProcessingStatus::Completed);
        assert_eq!(app.view().cards.len(), 1);
        assert!(app.view().input_enabled);

        for c in "What?".chars() {
            app.handle_action(AppAction::Input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
                .await;
        }
        app.handle_action(AppAction::Submit).await;
        assert_eq!(app.view().input_text(), "");
        settle(&mut app).await;

        let last = app.view().messages.last().unwrap();
        assert_eq!(last.text, "42");
        assert_eq!(api.questions(), vec!["What?".to_string()]);
    }

    #[tokio::test]
    async fn test_typing_ignored_while_disabled() {
        let api = Arc::new(FakeApi::new());
        let mut app = app(&api);
        app.handle_action(AppAction::Input(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)))
            .await;
        assert_eq!(app.view().input_text(), "");
        app.handle_action(AppAction::Submit).await;
        assert!(api.questions().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_file_raises_blocking_alert() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"plain").unwrap();
        let api = Arc::new(FakeApi::new());
        let mut app = app(&api);

        app.handle_action(AppAction::OpenFiles).await;
        assert_eq!(app.screen, Screen::OpenFiles);
        app.handle_action(AppAction::Paste(path.display().to_string())).await;
        app.handle_action(AppAction::Submit).await;

        assert_eq!(app.screen, Screen::Main);
        assert_eq!(app.view().alerts.len(), 1);
        assert!(app.view().alerts[0].contains("is not a PDF"));
        assert!(app.controller.registry().is_empty());

        // the next key only dismisses the alert
        app.handle_action(AppAction::ToggleHelp).await;
        assert!(app.view().alerts.is_empty());
        assert_eq!(app.screen, Screen::Main);
    }

    #[tokio::test(start_paused = true)]
    async fn test_document_navigation_and_removal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_pdf(dir.path(), "a.pdf"),
            write_pdf(dir.path(), "b.pdf"),
            write_pdf(dir.path(), "c.pdf"),
        ];
        let api = Arc::new(FakeApi::new());
        let mut app = app(&api);
        app.controller.open_paths(&paths).await;
        let event = app.controller.next_event().await.unwrap();
        app.controller.handle_event(event);

        app.handle_action(AppAction::FocusNext).await;
        assert_eq!(app.view().focus, Focus::Documents);

        app.handle_action(AppAction::Down).await;
        app.handle_action(AppAction::Down).await;
        app.handle_action(AppAction::Down).await;
        assert_eq!(app.controller.registry().active_index(), Some(2));

        app.handle_action(AppAction::Input(KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE)))
            .await;
        assert_eq!(app.controller.registry().len(), 2);
        assert_eq!(app.controller.registry().active_index(), Some(1));
        assert_eq!(app.view().active_name.as_deref(), Some("b.pdf"));

        app.handle_action(AppAction::Up).await;
        assert_eq!(app.view().active_card(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wheel_scrolls_messages_not_documents() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![write_pdf(dir.path(), "a.pdf"), write_pdf(dir.path(), "b.pdf")];
        let api = Arc::new(FakeApi::new());
        let mut app = app(&api);
        app.controller.open_paths(&paths).await;
        let event = app.controller.next_event().await.unwrap();
        app.controller.handle_event(event);

        app.handle_action(AppAction::FocusNext).await;
        assert_eq!(app.view().focus, Focus::Documents);
        app.view_mut().update_scroll_bounds(40, 10);

        app.handle_action(AppAction::WheelDown).await;
        app.handle_action(AppAction::WheelUp).await;
        assert_eq!(app.controller.registry().active_index(), Some(0));
        assert_eq!(app.view().scroll_offset, 30 - WHEEL_LINES);
    }

    #[tokio::test]
    async fn test_quit() {
        let api = Arc::new(FakeApi::new());
        let mut app = app(&api);
        app.handle_action(AppAction::Quit).await;
        assert!(app.should_quit);
    }
}
