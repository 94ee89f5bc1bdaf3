use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use ask_core::{AskClient, Config, Submitter};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod handler;
mod oneshot;
mod panel;
mod tui;
mod ui;

use app::App;
use oneshot::ConsoleView;
use tui::EventHandler;

/// Log filter override, e.g. `ASK_LOG=debug`
const LOG_ENV: &str = "ASK_LOG";

#[derive(Parser)]
#[command(name = "ask")]
#[command(about = "Ask the Startel telecom analytics assistant about revenue, cities and customers")]
struct Cli {
    /// Ask endpoint URL (overrides ASK_ENDPOINT and the config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Give up on a request after this many milliseconds (no timeout by default)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Ask one question, print the answer and exit instead of opening the TUI
    #[arg(short, long)]
    question: Option<String>,

    /// Remember the effective endpoint in the config file
    #[arg(long)]
    save_endpoint: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // TUI owns the terminal, so its logs go to a file
    init_logging(cli.question.is_none())?;

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "ignoring unreadable config");
        Config::new()
    });
    if cli.timeout_ms.is_some() {
        config.timeout_ms = cli.timeout_ms;
    }

    let client = match cli.endpoint.as_deref() {
        Some(endpoint) => AskClient::build(endpoint, config.timeout())?,
        None => AskClient::from_config(&config)?,
    };
    let endpoint = client.endpoint().to_string();
    info!(%endpoint, timeout_ms = ?config.timeout_ms, "using ask endpoint");

    if cli.save_endpoint {
        Config::save_endpoint(&endpoint)?;
        info!(%endpoint, "saved endpoint to config");
    }

    let submitter = Submitter::new(Arc::new(client));

    match cli.question {
        Some(question) => {
            let view = ConsoleView::new(question, io::stderr());
            let answered = oneshot::run(&submitter, &view, &mut io::stdout()).await?;
            if !answered {
                std::process::exit(1);
            }
            Ok(())
        }
        None => run_tui(submitter, endpoint).await,
    }
}

async fn run_tui(submitter: Submitter, endpoint: String) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(tui::TICK_RATE);
    let mut app = App::new(submitter, endpoint);

    let result = run_loop(&mut terminal, &mut events, &mut app).await;

    app.shutdown();
    tui::restore()?;
    result
}

async fn run_loop(terminal: &mut tui::Tui, events: &mut EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event)?,
            None => break,
        }
    }
    Ok(())
}

fn init_logging(to_file: bool) -> Result<()> {
    let default_level = if to_file { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let init = if !to_file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
    } else if let Some(log_file) = open_log_file(Config::get_config_dir().ok()) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(log_file))
            .with_ansi(false)
            .try_init()
    } else {
        // Stderr belongs to the TUI; without a log file, logs are dropped
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .try_init()
    };

    init.map_err(|err| anyhow!("Failed to initialise logging: {err}"))
}

/// Append handle on `<log_dir>/ask.log`, or `None` when it cannot be opened.
fn open_log_file(log_dir: Option<PathBuf>) -> Option<File> {
    let log_dir = log_dir?;
    std::fs::create_dir_all(&log_dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("ask.log"))
        .ok()
}
