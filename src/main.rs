//! todayILearned - Entry Point
//!
//! Loads settings, connects to the facts store, initializes the terminal
//! and runs the UI loop.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use todayilearned::app::Session;
use todayilearned::config::{self, Backend, Settings};
use todayilearned::store::{FactStore, MemoryStore, RestStore};
use todayilearned::ui::App;

/// Target frames per second for the UI loop
const TARGET_FPS: u64 = 30;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);

/// Browse, share and vote on facts
#[derive(Debug, Parser)]
#[command(name = "til", version, about = "Today I learned: browse, share and vote on facts")]
struct Args {
    /// Settings file (defaults to settings.ron in the config directory)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Use an in-memory store with sample facts instead of the hosted one
    #[arg(long)]
    demo: bool,

    /// Store project URL, overrides settings and environment
    #[arg(long)]
    url: Option<String>,

    /// Store API key, overrides settings and environment
    #[arg(long)]
    key: Option<String>,

    /// Table holding the facts
    #[arg(long)]
    table: Option<String>,

    /// Write a settings file with default values and exit
    #[arg(long)]
    init_config: bool,
}

fn resolve_settings(args: &Args, path: &Path) -> Result<Settings> {
    let mut settings = config::load_settings(path)?;
    settings.apply_env(|name| std::env::var(name).ok());

    if let Some(url) = &args.url {
        settings.store_url = url.clone();
    }
    if let Some(key) = &args.key {
        settings.api_key = key.clone();
    }
    if let Some(table) = &args.table {
        settings.table = table.clone();
    }
    if args.demo {
        settings.backend = Backend::Memory;
    }

    settings.validate()?;
    Ok(settings)
}

fn init_logging(settings: &Settings) {
    // Log to a file so output doesn't interfere with the TUI
    let log_path = settings.log_path();
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let target = match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
    {
        Ok(file) => env_logger::Target::Pipe(Box::new(file)),
        Err(_) => env_logger::Target::Pipe(Box::new(io::sink())),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(target)
        .init();
}

fn build_store(settings: &Settings) -> Result<Arc<dyn FactStore>> {
    let store: Arc<dyn FactStore> = match settings.backend {
        Backend::Rest => Arc::new(
            RestStore::new(
                &settings.store_url,
                settings.api_key.clone(),
                &settings.table,
                settings.request_timeout(),
            )
            .context("could not set up the store client")?,
        ),
        Backend::Memory => {
            log::info!("Using in-memory store with sample facts");
            Arc::new(MemoryStore::with_sample_facts())
        }
    };
    Ok(store)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(config::config_path);

    if args.init_config {
        config::save_settings(&Settings::default(), &config_path)?;
        println!("Wrote default settings to {}", config_path.display());
        return Ok(());
    }

    let settings = resolve_settings(&args, &config_path)?;
    init_logging(&settings);
    log::info!("Starting todayILearned v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Settings: backend={:?} table={} limit={}", settings.backend, settings.table, settings.fetch_limit);

    let store = build_store(&settings)?;
    let mut session = Session::new(store, settings.fetch_limit, settings.notice_lifetime());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    session.start();

    let result = run_ui_loop(&mut terminal, &mut app, &mut session);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("todayILearned shut down cleanly");
    result
}

/// Main UI loop
fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut Session,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Handle input
        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press {
                    match app.handle_input(key, session) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => log::warn!("Input handling error: {}", e),
                    }
                }
            }
        }

        // Apply finished store requests
        session.update(frame_start);

        terminal.draw(|frame| {
            app.render(frame, session);
        })?;

        // Frame rate limiting
        let frame_time = frame_start.elapsed();
        if frame_time < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - frame_time);
        }
    }

    Ok(())
}
