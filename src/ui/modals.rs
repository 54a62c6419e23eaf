use super::centered_rect;
use super::formatters::truncate_str;
use crate::app::{App, SOURCE_FILTERS};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub use super::news_detail::draw_news_detail;

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", key), Style::default().fg(Color::Cyan)),
        Span::raw(desc.to_string()),
    ])
}

fn help_content() -> Vec<Line<'static>> {
    let section = |title: &str| {
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    };
    let mut lines = vec![
        Line::from(""),
        section(" Noticias"),
        key_line("r", "Actualizar (inactivo mientras carga)"),
        key_line("←↑↓→ / hjkl", "Moverse entre tarjetas"),
        key_line("Enter", "Ver detalle"),
        key_line("o", "Abrir noticia en el navegador"),
        key_line("s", "Fuentes de búsqueda"),
        Line::from(""),
        section(" Filtros"),
        key_line("Tab / S-Tab", "Medio siguiente / anterior"),
    ];
    for (i, filter) in SOURCE_FILTERS.iter().enumerate() {
        lines.push(key_line(&format!("{}", i + 1), filter.label));
    }
    lines.extend([
        Line::from(""),
        section(" General"),
        key_line("?", "Esta ayuda"),
        key_line("Esc", "Cerrar ventana"),
        key_line("q", "Salir"),
    ]);
    lines
}

pub fn draw_help(frame: &mut Frame) {
    let area = centered_rect(50, 75, frame.area());
    frame.render_widget(Clear, area);

    let outer_block = Block::default()
        .title(" Ayuda - Atajos de teclado ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    frame.render_widget(
        Paragraph::new(help_content()).alignment(Alignment::Left),
        inner_area,
    );
}

fn sources_content(app: &App, width: usize) -> Vec<Line<'static>> {
    let links = app.grounding_links();
    if links.is_empty() {
        return vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Sin fuentes de búsqueda para esta actualización.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
    }
    let mut lines = vec![Line::from("")];
    for (i, (title, uri)) in links.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(
                truncate_str(title, width.saturating_sub(6)),
                Style::default().fg(Color::White),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("      {}", truncate_str(uri, width.saturating_sub(6))),
            Style::default().fg(Color::LightBlue),
        )));
    }
    lines
}

pub fn draw_sources(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let outer_block = Block::default()
        .title(format!(" Fuentes de búsqueda ({}) ", app.grounding_links().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .style(Style::default().bg(Color::Black));

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    frame.render_widget(
        Paragraph::new(sources_content(app, inner_area.width as usize)),
        inner_area,
    );
}
