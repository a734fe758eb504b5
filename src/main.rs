//! Fabric Inquiry - terminal quote request wizard for a B2B fabric supplier
//!
//! Walks a buyer through a three step inquiry, keeps a draft on disk while
//! they type and hands the finished request to the submission endpoint.

mod app;
mod config;
mod logging;
mod platform;
mod state;
mod ui;
mod wizard;

use anyhow::{Context, Result};
use app::App;
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// How long to wait for input before running timers again
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("invalid configuration")?;

    // Initialize logging; keep the handle so buffered lines are flushed on exit
    let logging = logging::init_logging(&config)?;
    if let Some(path) = &logging.log_file_path {
        tracing::debug!("Logging to {}", path.display());
    }
    tracing::info!("Starting in {:?} environment", config.environment);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // The logging guard must be dropped before the process ends
    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.tick();

        if app.should_quit() {
            return Ok(());
        }
    }
}
