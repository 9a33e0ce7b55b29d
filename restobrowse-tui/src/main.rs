//! restobrowse TUI: browse restaurants from the terminal.
//!
//! Screens:
//! 1. List: results with search, filters, location and image upload
//! 2. Detail: one restaurant; Esc returns to the list as it was left

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use restobrowse_core::{ClientConfig, HttpApi, RestaurantApi, Route};
use restobrowse_tui::app::AppState;
use restobrowse_tui::worker::{self, WorkerCommand};
use restobrowse_tui::{input, ui};

/// Concurrent HTTP requests in flight.
const WORKER_THREADS: usize = 4;

#[derive(Parser)]
#[command(name = "restobrowse-tui", about = "Browse restaurants in the terminal")]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(long, env = "RESTOBROWSE_API_URL")]
    api_url: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = ClientConfig::load_or_default(args.config.as_deref())?
        .with_api_url(args.api_url)?;

    // The terminal is ours; logs go to a file.
    init_logging(&config)?;
    tracing::info!(api = %config.api_base_url, "starting");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let api: Arc<dyn RestaurantApi> = Arc::new(HttpApi::new(&config)?);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(api, cmd_rx, resp_tx, WORKER_THREADS)?;

    let mut app = AppState::new(
        cmd_tx.clone(),
        resp_rx,
        config.default_per_page,
        config.api_base_url.clone(),
    );
    app.navigate(Route::default());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Responses from an earlier screen mount are dropped by epoch; an
        // image verdict may queue its follow-up listing from here.
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_response(resp);
        }

        // Wait up to 50ms for a key so late responses still get drawn.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

fn init_logging(config: &ClientConfig) -> Result<()> {
    let path = config.log_file_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = File::create(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env("RESTOBROWSE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
