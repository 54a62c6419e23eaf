use super::formatters::{clamp_lines, truncate_str};
use crate::api::NewsItem;
use crate::app::{App, PLACEHOLDER_COUNT};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Outer height of a card, borders included.
pub const CARD_HEIGHT: u16 = 11;

const TITLE_LINES: usize = 2;
const SUMMARY_LINES: usize = 3;

const SKELETON_DARK: Color = Color::Rgb(70, 70, 80);
const SKELETON_LIGHT: Color = Color::Rgb(45, 45, 55);

/// Number of card columns for a given terminal width.
pub fn grid_columns(width: u16) -> usize {
    match width {
        0..60 => 1,
        60..120 => 2,
        _ => 3,
    }
}

/// Badge colors per outlet, matched ignoring case. Unknown outlets get gray.
pub fn badge_style(source: &str) -> Style {
    match source.to_lowercase().as_str() {
        "clarín" => Style::default().fg(Color::White).bg(Color::Rgb(185, 28, 28)),
        "la nación" => Style::default().fg(Color::White).bg(Color::Rgb(29, 78, 216)),
        "infobae" => Style::default().fg(Color::Black).bg(Color::Rgb(249, 115, 22)),
        "página/12" => Style::default().fg(Color::White).bg(Color::Rgb(31, 41, 55)),
        "ámbito financiero" => Style::default().fg(Color::Black).bg(Color::Rgb(16, 185, 129)),
        _ => Style::default().fg(Color::Black).bg(Color::Gray),
    }
}

fn card_lines(item: &NewsItem, width: usize) -> Vec<Line<'static>> {
    let badge = format!(" {} ", truncate_str(&item.source, width.saturating_sub(4).max(3)));
    let badge_len = badge.chars().count();
    let category = truncate_str(
        &item.category.to_uppercase(),
        width.saturating_sub(badge_len + 1).max(3),
    );
    let gap = width.saturating_sub(badge_len + category.chars().count());

    let mut lines = vec![
        Line::from(vec![
            Span::styled(badge, badge_style(&item.source).add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(gap)),
            Span::styled(category, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    let title_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    for line in clamp_lines(&item.title, width, TITLE_LINES) {
        lines.push(Line::from(Span::styled(line, title_style)));
    }
    lines.push(Line::from(""));

    for line in clamp_lines(&item.summary, width, SUMMARY_LINES) {
        lines.push(Line::from(Span::styled(line, Style::default().fg(Color::Gray))));
    }

    // Pin the link to the bottom row of the card.
    let body_rows = (CARD_HEIGHT as usize).saturating_sub(3);
    while lines.len() < body_rows {
        lines.push(Line::from(""));
    }
    lines.truncate(body_rows);
    lines.push(Line::from(Span::styled(
        "Leer noticia completa →",
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::UNDERLINED),
    )));
    lines
}

fn draw_card(frame: &mut Frame, area: Rect, item: &NewsItem, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected { BorderType::Thick } else { BorderType::Rounded })
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(card_lines(item, inner.width as usize)), inner);
}

/// Split `area` into card cells, `columns` wide, one row per `CARD_HEIGHT`.
fn grid_cells(area: Rect, columns: usize, rows: usize) -> Vec<Rect> {
    let mut cells = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        let y = area.y + row as u16 * CARD_HEIGHT;
        let row_area = Rect::new(area.x, y, area.width, CARD_HEIGHT);
        let constraints = vec![Constraint::Ratio(1, columns as u32); columns];
        let row_cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(row_area);
        cells.extend(row_cells.iter().copied());
    }
    cells
}

fn visible_rows(area: Rect) -> usize {
    (area.height / CARD_HEIGHT).max(1) as usize
}

pub fn draw_grid(frame: &mut Frame, area: Rect, app: &App) {
    let items = app.visible_news();
    let columns = grid_columns(area.width);
    let rows = visible_rows(area).min(items.len().div_ceil(columns).max(1));
    if area.height < CARD_HEIGHT {
        return;
    }

    // Scroll by whole rows so the selected card stays on screen.
    let selected_row = app.selected / columns;
    let first_row = (selected_row + 1).saturating_sub(rows);
    let offset = first_row * columns;

    for (cell, (i, item)) in grid_cells(area, columns, rows)
        .into_iter()
        .zip(items.iter().enumerate().skip(offset))
    {
        draw_card(frame, cell, item, i == app.selected);
    }
}

fn skeleton_bar(width: usize, color: Color) -> Span<'static> {
    Span::styled(" ".repeat(width), Style::default().bg(color))
}

fn placeholder_lines(width: usize) -> Vec<Line<'static>> {
    let short = (width / 4).max(1);
    vec![
        Line::from(vec![
            skeleton_bar(short, SKELETON_DARK),
            Span::raw(" ".repeat(width.saturating_sub(short * 2))),
            skeleton_bar(short, SKELETON_LIGHT),
        ]),
        Line::from(""),
        Line::from(skeleton_bar(width, SKELETON_DARK)),
        Line::from(skeleton_bar(width * 3 / 4, SKELETON_DARK)),
        Line::from(""),
        Line::from(skeleton_bar(width, SKELETON_LIGHT)),
        Line::from(skeleton_bar(width, SKELETON_LIGHT)),
        Line::from(skeleton_bar(width * 2 / 3, SKELETON_LIGHT)),
    ]
}

/// Fixed skeleton cards shown in place of the grid while loading.
pub fn draw_placeholders(frame: &mut Frame, area: Rect) {
    if area.height < CARD_HEIGHT {
        return;
    }
    let columns = grid_columns(area.width);
    let rows = visible_rows(area).min(PLACEHOLDER_COUNT.div_ceil(columns));
    for cell in grid_cells(area, columns, rows).into_iter().take(PLACEHOLDER_COUNT) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(cell);
        frame.render_widget(block, cell);
        frame.render_widget(Paragraph::new(placeholder_lines(inner.width as usize)), inner);
    }
}

pub fn draw_empty_state(frame: &mut Frame, area: Rect) {
    let top_pad = area.height.saturating_sub(4) / 2;
    let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        "No hay noticias disponibles",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Intenta actualizar la página o cambiar el filtro.",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
