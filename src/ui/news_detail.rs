use super::cards::badge_style;
use super::centered_rect;
use super::formatters::*;
use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn draw_news_detail(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(70, 60, frame.area());

    // Copy what we need out of the item so the scroll offset can be clamped below.
    let Some(item) = app.selected_news().cloned() else {
        return;
    };
    frame.render_widget(Clear, area);

    let outer_block = Block::default()
        .title(Span::styled(
            format!(" {} ", item.source),
            badge_style(&item.source).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner_area);
    let body_area = chunks[0];
    let footer_area = chunks[1];

    let inner_width = body_area.width as usize;
    let body_height = body_area.height as usize;

    let mut all_lines: Vec<Line> = Vec::new();

    for line in word_wrap(&item.title, inner_width) {
        all_lines.push(Line::from(Span::styled(
            line,
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }

    let mut meta = vec![Span::styled(
        item.category.to_uppercase(),
        Style::default().fg(Color::Yellow),
    )];
    if let Some(published) = item.published_at.as_deref().filter(|p| !p.trim().is_empty()) {
        meta.push(Span::styled(
            format!("  {}", format_published(published)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    all_lines.push(Line::from(meta));

    all_lines.push(Line::from(Span::styled(
        truncate_str(&item.url, inner_width),
        Style::default().fg(Color::LightBlue),
    )));

    all_lines.push(Line::from(Span::styled(
        "─".repeat(inner_width),
        Style::default().fg(Color::DarkGray),
    )));

    if item.summary.trim().is_empty() {
        all_lines.push(Line::from(Span::styled(
            "Sin resumen disponible.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for line in word_wrap(&item.summary, inner_width) {
            all_lines.push(Line::from(line));
        }
    }

    let max_scroll = all_lines.len().saturating_sub(body_height);
    app.detail_scroll = app.detail_scroll.min(max_scroll);

    let visible: Vec<Line> = all_lines
        .into_iter()
        .skip(app.detail_scroll)
        .take(body_height)
        .collect();
    frame.render_widget(Paragraph::new(visible), body_area);

    let footer_line = Line::from(vec![
        Span::styled("[o] ", Style::default().fg(Color::Cyan)),
        Span::styled("abrir en navegador  ", Style::default().fg(Color::DarkGray)),
        Span::styled("[↑/↓] ", Style::default().fg(Color::Cyan)),
        Span::styled("desplazar  ", Style::default().fg(Color::DarkGray)),
        Span::styled("[Esc] ", Style::default().fg(Color::Cyan)),
        Span::styled("cerrar", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(footer_line), footer_area);
}
