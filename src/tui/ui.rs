//! UI Rendering
//!
//! Main UI layout and rendering logic for the TUI.

use crate::models::{MessageRole, ProcessingStatus};
use crate::tui::app::{App, Screen};
use crate::tui::theme::{Icons, Theme};
use crate::tui::view::Focus;
use crate::tui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the main UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40), // Preview
            Constraint::Min(5),         // Messages
            Constraint::Length(3),      // Input
        ])
        .split(body[1]);

    render_header(frame, chunks[0], app);

    let focused = app.view().focus == Focus::Documents && app.screen == Screen::Main;
    widgets::render_documents(frame, body[0], app.controller.view_mut(), focused);
    widgets::render_preview(frame, right[0], app.view());
    render_messages(frame, right[1], app);
    render_input(frame, right[2], app);
    render_status_bar(frame, chunks[2], app);

    match app.screen {
        Screen::Help => render_help(frame),
        Screen::OpenFiles => render_open_prompt(frame, app),
        Screen::Main => {}
    }

    // Alerts sit on top of everything
    if let Some(alert) = app.view().alerts.front() {
        render_alert(frame, alert);
    }
}

/// Render the header with the processing stages
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let title = Paragraph::new(Line::from(vec![
        Span::raw("📄 "),
        Span::styled("DocQA", Theme::title()),
        Span::styled(" PDF question answering", Theme::text_secondary()),
    ]));
    frame.render_widget(title, halves[0]);

    let stages = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(36)])
        .split(halves[1]);
    widgets::render_status(
        frame,
        stages[1],
        app.view().status,
        app.controller.is_uploading(),
    );
}

/// Render the message history
fn render_messages(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .title(" Messages ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let view = app.view();
    let mut lines: Vec<Line> = Vec::new();

    if view.messages.is_empty() {
        lines.push(Line::from(Span::styled(
            "Drop PDF files here or press Ctrl+O to upload documents.",
            Theme::text_dim(),
        )));
    }

    let available_width = inner_area.width.saturating_sub(2) as usize;
    for msg in &view.messages {
        let (prefix, style) = match msg.sender {
            MessageRole::User => ("You", Theme::user_message()),
            MessageRole::Assistant => ("Assistant", Theme::assistant_message()),
            MessageRole::System => ("System", Theme::system_message()),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", prefix), style),
            Span::styled(
                msg.timestamp
                    .with_timezone(&chrono::Local)
                    .format("%H:%M")
                    .to_string(),
                Theme::text_dim(),
            ),
        ]));

        for line in msg.text.lines() {
            if line.is_empty() {
                lines.push(Line::from("  "));
                continue;
            }
            for chunk in wrap_line(line, available_width.saturating_sub(2)) {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(chunk, Theme::text()),
                ]));
            }
        }

        lines.push(Line::from("")); // Spacing
    }

    if app.controller.is_awaiting_answer() {
        lines.push(Line::from(vec![
            Span::styled("Assistant: ", Theme::assistant_message()),
            Span::styled(Icons::CURSOR, Theme::active()),
        ]));
    }

    let content_height = lines.len().min(u16::MAX as usize) as u16;
    let view = app.controller.view_mut();
    view.update_scroll_bounds(content_height, inner_area.height);

    let paragraph = Paragraph::new(lines).scroll((view.scroll_offset, 0));
    frame.render_widget(paragraph, inner_area);
}

/// Wrap one line of text to `max_width` characters, preferring to break
/// after whitespace or punctuation
pub fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![line.to_string()];
    }

    let mut out = Vec::new();
    let mut remaining = line;
    while !remaining.is_empty() {
        if remaining.chars().count() <= max_width {
            out.push(remaining.to_string());
            break;
        }

        let mut break_byte = None;
        let mut limit_byte = remaining.len();
        for (seen, (idx, ch)) in remaining.char_indices().enumerate() {
            if seen >= max_width {
                limit_byte = idx;
                break;
            }
            if ch.is_whitespace() || ch == ',' || ch == '.' || ch == ';' {
                break_byte = Some(idx + ch.len_utf8());
            }
        }
        let split_at = break_byte.unwrap_or(limit_byte);

        let (chunk, rest) = remaining.split_at(split_at);
        out.push(chunk.trim_end().to_string());
        remaining = rest.trim_start();
    }

    out
}

/// Render the question input
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.view();
    let focused = view.focus == Focus::Input && app.screen == Screen::Main;

    let title = if view.input_enabled {
        " Question "
    } else {
        " Question (disabled) "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused && view.input_enabled {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(&view.input, inner);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = if app.controller.is_uploading() {
        Span::styled("Uploading...", Theme::active())
    } else if app.controller.is_awaiting_answer() {
        Span::styled("Waiting for answer...", Theme::active())
    } else {
        match app.view().status {
            ProcessingStatus::Idle => Span::styled("Ready", Theme::text_secondary()),
            ProcessingStatus::Processing => Span::styled("Processing documents...", Theme::active()),
            ProcessingStatus::Completed => Span::styled("Documents ready", Theme::complete()),
            ProcessingStatus::Failed => Span::styled("Processing failed", Theme::error()),
        }
    };

    let shortcuts = vec![
        Span::styled(" [Enter]", Theme::shortcut_key()),
        Span::styled(" Send ", Theme::shortcut_desc()),
        Span::styled("[Ctrl+O]", Theme::shortcut_key()),
        Span::styled(" Open ", Theme::shortcut_desc()),
        Span::styled("[Tab]", Theme::shortcut_key()),
        Span::styled(" Focus ", Theme::shortcut_desc()),
        Span::styled("[Ctrl+Q]", Theme::shortcut_key()),
        Span::styled(" Quit ", Theme::shortcut_desc()),
        Span::styled("[F1]", Theme::shortcut_key()),
        Span::styled(" Help", Theme::shortcut_desc()),
    ];

    let line = Line::from(
        std::iter::once(status)
            .chain(std::iter::once(Span::raw(" │ ")))
            .chain(shortcuts)
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the path prompt opened with Ctrl+O
fn render_open_prompt(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 30, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Open PDF files ")
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let hint = Paragraph::new(Line::from(Span::styled(
        "Paths separated by spaces; quote paths that contain spaces.",
        Theme::text_secondary(),
    )))
    .wrap(Wrap { trim: true });
    frame.render_widget(hint, rows[0]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let input_inner = input_block.inner(rows[1]);
    frame.render_widget(input_block, rows[1]);
    frame.render_widget(&app.open_prompt, input_inner);

    let keys = Paragraph::new(Line::from(vec![
        Span::styled("[Enter]", Theme::shortcut_key()),
        Span::styled(" Upload  ", Theme::shortcut_desc()),
        Span::styled("[Esc]", Theme::shortcut_key()),
        Span::styled(" Cancel", Theme::shortcut_desc()),
    ]));
    frame.render_widget(keys, rows[2]);
}

/// Render a blocking alert
fn render_alert(frame: &mut Frame, message: &str) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(message.to_string(), Theme::text())),
        Line::from(""),
        Line::from(Span::styled("Press any key to continue", Theme::text_dim())),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Alert ")
                .borders(Borders::ALL)
                .border_style(Theme::error()),
        );

    frame.render_widget(paragraph, area);
}

/// Render the help modal
fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let shortcut = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:<13}", key), Theme::shortcut_key()),
            Span::styled(desc, Theme::text()),
        ])
    };

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
        shortcut("Enter", "Ask the question"),
        shortcut("Ctrl+O", "Open PDF files"),
        shortcut("Drag & drop", "Upload the dropped PDF files"),
        shortcut("Tab", "Switch between documents and question"),
        shortcut("↑/↓", "Select document / scroll messages"),
        shortcut("Del / x", "Remove the selected document"),
        shortcut("PageUp/Down", "Scroll messages"),
        shortcut("Click", "Select a document, [x] removes it"),
        shortcut("Ctrl+Q", "Quit application"),
        shortcut("Ctrl+C", "Force quit"),
        shortcut("F1", "Show this help"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Theme::text_dim())),
    ];

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
