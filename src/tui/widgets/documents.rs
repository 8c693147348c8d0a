//! Document List Widget
//!
//! One bordered card per uploaded document. Card and `[x]` areas are
//! recorded on the view so mouse clicks can be resolved after drawing.

use crate::tui::theme::{Icons, Theme};
use crate::tui::view::{CardArea, TuiView};
use crate::utils::truncate_string;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one card, borders included
pub const CARD_HEIGHT: u16 = 4;

/// Render the document panel
pub fn render_documents(frame: &mut Frame, area: Rect, view: &mut TuiView, focused: bool) {
    let block = Block::default()
        .title(format!(" Documents ({}) ", view.cards.len()))
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);
    view.card_areas.clear();

    if view.cards.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(Span::styled("No documents uploaded yet", Theme::text_dim())),
            Line::from(""),
            Line::from(Span::styled("Drop PDF files here", Theme::text_dim())),
            Line::from(Span::styled("or press Ctrl+O", Theme::text_dim())),
        ]);
        frame.render_widget(hint, inner);
        return;
    }

    let visible = (inner.height / CARD_HEIGHT).max(1) as usize;
    let first = first_visible(view.active_card().unwrap_or(0), visible, view.cards.len());

    for (slot, index) in (first..view.cards.len()).take(visible).enumerate() {
        let y = inner.y + slot as u16 * CARD_HEIGHT;
        if y + CARD_HEIGHT > inner.y + inner.height {
            break;
        }
        let card_rect = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
        let card = &view.cards[index];

        let (border, body) = if card.active {
            (Theme::card_active(), Theme::card_active_bg())
        } else {
            (Theme::border(), ratatui::style::Style::default())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .style(body);
        let card_inner = block.inner(card_rect);
        frame.render_widget(block, card_rect);

        // Name on the first line, leaving room for the marker and the remove button
        let name_width = (card_inner.width as usize).saturating_sub(6);
        let marker = if card.active { Icons::SELECTED } else { " " };
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{} ", marker), Theme::selected()),
                Span::styled(
                    truncate_string(&card.name, name_width),
                    if card.active { Theme::selected() } else { Theme::text() },
                ),
            ]),
            Line::from(Span::styled(
                format!("  {}", card.size_label),
                Theme::text_secondary(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), card_inner);

        let remove = remove_button_area(card_inner);
        frame.render_widget(
            Paragraph::new(Span::styled(Icons::REMOVE, Theme::remove_button())),
            remove,
        );

        view.card_areas.push(CardArea {
            index,
            card: card_rect,
            remove,
        });
    }
}

/// Top-right corner of a card's inner area
fn remove_button_area(inner: Rect) -> Rect {
    let width = (Icons::REMOVE.len() as u16).min(inner.width);
    Rect::new(inner.x + inner.width - width, inner.y, width, 1)
}

/// First card to draw so the active one stays on screen
fn first_visible(active: usize, visible: usize, total: usize) -> usize {
    if total <= visible || active < visible {
        0
    } else {
        (active + 1 - visible).min(total - visible)
    }
}
