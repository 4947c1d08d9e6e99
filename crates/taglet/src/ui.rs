// ABOUTME: Ratatui drawing for the demo: history, input line, status and the suggestion panel
// ABOUTME: The panel is painted from the engine's latest OverlayView

use taglet_core::{OverlayStatus, OverlayView};
use taglet_types::{Size, TriggerKind};
use tui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::App;
use crate::document::{LineDocument, ScreenLayout, Slot};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let [history_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_history(frame, history_area, app.history());

    let input_block = Block::default().borders(Borders::ALL).title(" message ");
    let inner = input_block.inner(input_area);
    frame.render_widget(input_block, input_area);

    app.document_mut().set_layout(ScreenLayout {
        origin_x: inner.x,
        origin_y: inner.y,
        screen: Size::new(f32::from(area.width), f32::from(area.height)),
    });

    let overlay = app.overlay_view();
    let decoration = overlay.as_ref().map(|view| view.decoration);
    let document = app.document();

    frame.render_widget(
        Paragraph::new(input_line(document, decoration.map(|d| (d.from, d.to)))),
        inner,
    );

    let caret_x = inner
        .x
        .saturating_add(u16::try_from(document.column_of(document.caret())).unwrap_or(u16::MAX));
    if caret_x < inner.right() {
        frame.set_cursor_position((caret_x, inner.y));
    }

    frame.render_widget(
        Paragraph::new(app.status_line()).style(Style::default().fg(Color::DarkGray)),
        status_area,
    );

    if let Some(view) = overlay {
        draw_overlay(frame, &view, area);
    }
}

fn draw_history(frame: &mut Frame, area: Rect, history: &[String]) {
    let visible = usize::from(area.height);
    let skip = history.len().saturating_sub(visible);
    let lines: Vec<Line> = history
        .iter()
        .skip(skip)
        .map(|line| Line::from(line.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// The document as styled spans; `decoration` underlines the matched text
pub fn input_line(document: &LineDocument, decoration: Option<(usize, usize)>) -> Line<'static> {
    let chips = document.chips();
    let spans: Vec<Span> = document
        .slots()
        .iter()
        .enumerate()
        .map(|(index, slot)| match slot {
            Slot::Char(ch) => {
                let decorated = decoration.is_some_and(|(from, to)| from <= index && index < to);
                let style = if decorated {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default()
                };
                Span::styled(ch.to_string(), style)
            }
            Slot::Node(node) => {
                let color = match node.kind() {
                    TriggerKind::Mention => Color::Cyan,
                    TriggerKind::Tag => Color::Magenta,
                };
                Span::styled(
                    chips.render(node),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            }
        })
        .collect();
    Line::from(spans)
}

fn draw_overlay(frame: &mut Frame, view: &OverlayView, screen: Rect) {
    let rect = overlay_rect(view, screen);
    if rect.width < 3 || rect.height < 3 {
        return;
    }

    let title = match view.kind {
        TriggerKind::Mention => " mention ",
        TriggerKind::Tag => " tag ",
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = match view.status {
        OverlayStatus::Loading => vec![ListItem::new(Line::from(Span::styled(
            "loading…",
            Style::default().fg(Color::DarkGray),
        )))],
        OverlayStatus::NoResults => vec![ListItem::new(Line::from(Span::styled(
            "no results",
            Style::default().fg(Color::DarkGray),
        )))],
        OverlayStatus::Items => view
            .rows
            .iter()
            .map(|row| {
                let mut spans = vec![Span::raw(row.label.clone())];
                if let Some(detail) = &row.detail {
                    spans.push(Span::styled(
                        format!(" {detail}"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                let item = ListItem::new(Line::from(spans));
                if row.highlighted {
                    item.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    item
                }
            })
            .collect(),
    };

    frame.render_widget(Clear, rect);
    frame.render_widget(List::new(items).block(block), rect);
}

/// Cell rectangle for the panel, clipped to the screen
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn overlay_rect(view: &OverlayView, screen: Rect) -> Rect {
    let rect = match &view.position {
        Some(position) => Rect::new(
            position.bounds.origin.x.max(0.0) as u16,
            position.bounds.origin.y.max(0.0) as u16,
            position.bounds.size.width.max(0.0) as u16,
            position.bounds.size.height.max(0.0) as u16,
        ),
        None => {
            let height = u16::try_from(view.rows.len().max(1) + 2).unwrap_or(u16::MAX);
            Rect::new(
                view.anchor.x.max(0.0) as u16,
                (view.anchor.y.max(0.0) as u16).saturating_add(1),
                32,
                height,
            )
        }
    };
    rect.intersection(screen)
}
