//! usrdesk binary entry point.
//!
//! Parses the command line, starts logging and the HTTP runtime, then runs
//! the TUI event loop and restores the terminal state on exit.
//!
use std::sync::Arc;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use usrdesk::api::{HttpUserService, UserService};
use usrdesk::app::{self, AppState, Theme, keymap::Keymap};
use usrdesk::config::{Cli, Config};
use usrdesk::error::{Context, Result};
use usrdesk::logging;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    logging::init(&config.log_file)?;
    tracing::info!(base_url = %config.base_url, route = %config.route, "starting usrdesk");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .with_ctx(|| "start async runtime".to_string())?;

    let service = HttpUserService::new(&config.base_url, config.timeout)
        .with_ctx(|| "build HTTP client".to_string())?;
    let service: Arc<dyn UserService> = Arc::new(service);

    let theme = Theme::load_or_init(&config.theme_path);
    let keymap = Keymap::load_or_init(&config.keybinds_path);
    let state = AppState::new(config.route, theme, keymap, config.base_url.clone());

    let mut terminal = init_terminal().with_ctx(|| "init terminal".to_string())?;

    let res = app::run(&mut terminal, runtime.handle().clone(), service, state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    runtime.shutdown_background();
    tracing::info!("exiting");
    Ok(())
}
