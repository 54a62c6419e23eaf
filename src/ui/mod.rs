mod cards;
pub mod formatters;
mod modals;
mod news_detail;

pub use cards::{CARD_HEIGHT, badge_style, grid_columns};

use crate::app::{App, FetchPhase, InputMode, SOURCE_FILTERS};
use formatters::format_updated;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Outlet dots shown in the footer legend.
const LEGEND: &[(&str, Color)] = &[
    ("Clarín", Color::Rgb(34, 197, 94)),
    ("La Nación", Color::Rgb(59, 130, 246)),
    ("Infobae", Color::Rgb(249, 115, 22)),
    ("Página/12", Color::White),
    ("Ámbito", Color::Rgb(16, 185, 129)),
];

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
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

pub fn draw(frame: &mut Frame, app: &mut App) {
    let banner_height = if app.error_message.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(4),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_filter_bar(frame, chunks[1], app);
    if let Some(message) = &app.error_message {
        draw_error_banner(frame, chunks[2], message);
    }

    let body = chunks[3];
    if app.is_loading() {
        cards::draw_placeholders(frame, body);
    } else if app.visible_news().is_empty() {
        if app.phase != FetchPhase::Idle {
            cards::draw_empty_state(frame, body);
        }
    } else {
        cards::draw_grid(frame, body, app);
    }

    draw_footer(frame, chunks[4], app);

    let mode = app.input_mode;
    match mode {
        InputMode::NewsDetail => modals::draw_news_detail(frame, app),
        InputMode::Sources => modals::draw_sources(frame, app),
        InputMode::Help => modals::draw_help(frame),
        InputMode::Normal => {}
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            " ArgenNews ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled("Monitor Real-Time Argentina ", Style::default().fg(Color::Gray)),
    ];

    if app.is_loading() {
        let frame_char = SPINNER[app.tick % SPINNER.len()];
        spans.push(Span::styled(
            format!("{} Cargando noticias...", frame_char),
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(ts) = &app.last_updated {
        spans.push(Span::styled(
            format!("[{}]", format_updated(ts)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    spans.push(Span::styled(
        format!("  {}", app.config.model),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_filter_bar(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = SOURCE_FILTERS
        .iter()
        .enumerate()
        .map(|(i, f)| Line::from(format!("{} {}", i + 1, f.label)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active_filter_index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("│", Style::default().fg(Color::DarkGray)))
        .block(Block::default().borders(Borders::ALL).title(" Medios "));
    frame.render_widget(tabs, area);
}

fn draw_error_banner(frame: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(Line::from(Span::styled(
        format!(" ⚠ {}", message),
        Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(banner, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Cyan);
    let desc = Style::default().fg(Color::DarkGray);

    // The refresh control reads as disabled while a fetch is in flight.
    let refresh_style = if app.is_loading() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    } else {
        key
    };

    let mut help = vec![
        Span::styled(" [r] Actualizar", refresh_style),
        Span::styled("  [Tab] ", key),
        Span::styled("Medio", desc),
        Span::styled("  [←↑↓→] ", key),
        Span::styled("Nav", desc),
        Span::styled("  [Enter] ", key),
        Span::styled("Detalle", desc),
        Span::styled("  [o] ", key),
        Span::styled("Abrir", desc),
        Span::styled("  [s] ", key),
        Span::styled(format!("Fuentes ({})", app.grounding_links().len()), desc),
        Span::styled("  [?] ", key),
        Span::styled("Ayuda", desc),
        Span::styled("  [q] ", key),
        Span::styled("Salir", desc),
    ];
    if let Some(msg) = &app.status_message {
        help.insert(0, Span::styled(format!(" {} |", msg), Style::default().fg(Color::Yellow)));
    }

    let mut legend = vec![Span::raw(" ")];
    for (name, color) in LEGEND {
        legend.push(Span::styled("● ", Style::default().fg(*color)));
        legend.push(Span::styled(format!("{}   ", name), desc));
    }

    let footer = Paragraph::new(vec![Line::from(help), Line::from(legend)])
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
