use anyhow::Result;
use argen_news::app::{App, InputMode, SOURCE_FILTERS};
use argen_news::config::{self, Config};
use argen_news::{logging, ui};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "argen-news")]
#[command(about = "Terminal dashboard for current Argentine news", long_about = None)]
struct Cli {
    /// Gemini model used for the news search
    #[arg(short, long)]
    model: Option<String>,

    /// Log filter, e.g. "info" or "argen_news=debug"
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv = config::load_dotenv();
    let mut config = Config::load()?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    logging::init(&Config::log_path()?, &config.log_level)?;
    tracing::info!(
        model = %config.model,
        has_key = config.api_key.is_some(),
        "starting argen-news"
    );
    if let Err(e) = dotenv {
        tracing::warn!(error = %e, "ignoring unreadable .env file");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!("event loop failed: {:#}", e);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Initial load
    app.spawn_refresh(&tx);

    loop {
        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Short poll keeps the spinner moving while a fetch is pending
        let timeout = Duration::from_millis(100);
        if !event::poll(timeout)? {
            app.on_tick();
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let columns = ui::grid_columns(terminal.size()?.width);

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('r') => {
                    app.spawn_refresh(&tx);
                }
                KeyCode::Char('?') => app.show_help(),
                KeyCode::Char('s') => app.show_sources(),
                KeyCode::Char('o') => app.open_selected(),
                KeyCode::Enter => app.open_detail(),
                KeyCode::Tab => app.next_filter(),
                KeyCode::BackTab => app.prev_filter(),
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    if index < SOURCE_FILTERS.len() {
                        app.select_filter(index);
                    }
                }
                KeyCode::Left | KeyCode::Char('h') => app.move_left(),
                KeyCode::Right | KeyCode::Char('l') => app.move_right(),
                KeyCode::Up | KeyCode::Char('k') => app.move_up(columns),
                KeyCode::Down | KeyCode::Char('j') => app.move_down(columns),
                _ => {}
            },
            InputMode::NewsDetail => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_modal(),
                KeyCode::Char('o') => app.open_selected(),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_detail_up(),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_detail_down(),
                _ => {}
            },
            InputMode::Sources => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('s') => app.close_modal(),
                _ => {}
            },
            InputMode::Help => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => app.close_modal(),
                _ => {}
            },
        }
    }
}
