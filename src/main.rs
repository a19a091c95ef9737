mod app;
mod bounce;
mod bounds;
mod cli;
mod config;
mod input;
mod logging;
mod menu;
mod mouse;
mod platform;
mod scheduler;
mod settings;
mod store;
mod ui;

use app::{App, Flow};
use config::Config;
use mouse::MouseSink;
use platform::{InputSink, SettingsStore, TrayIcon, ValueEntryDialog};
use settings::StoredSettings;
use store::JsonStore;
use ui::{HeadlessUi, TerminalUi};

use anyhow::{anyhow, Context, Result};

use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Longest the loops wait for input while no tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    let matches = cli::build().get_matches();

    let config = match Config::from_matches(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::setup(
        config.verbosity,
        config.headless,
        config.log_file.as_deref(),
    ) {
        eprintln!("error: failed to set up logging ({e})");
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let store = match &config.store_path {
        Some(path) => JsonStore::new(path),
        None => JsonStore::new(store::default_path()?),
    };

    let mut stored = store.load();
    stored.merge(&config.overrides);

    let sink = MouseSink::new(config.screen_bounds)
        .map_err(|e| anyhow!("failed to access the mouse ({e})"))?;

    if config.headless {
        run_headless(stored, sink)
    } else {
        run_interactive(stored, sink, &store)
    }
}

fn run_interactive(stored: StoredSettings, sink: MouseSink, store: &JsonStore) -> Result<()> {
    let ui = TerminalUi::enter().context("failed to set up the terminal")?;
    let mut app = App::start(&stored, sink, ui, Instant::now());

    loop {
        let menu = menu::build(app.settings());
        let status = status_line(&app);
        app.ui_mut().set_menu(&menu);
        app.ui_mut().render(&status)?;

        let timeout = app.next_tick_in(Instant::now()).unwrap_or(IDLE_POLL).min(IDLE_POLL);
        if let Some(event) = app.ui_mut().next_event(timeout)? {
            if app.dispatch(event, Instant::now()) == Flow::Quit {
                break;
            }
        }
        if app.poll_timer(Instant::now()) == Flow::Quit {
            break;
        }
    }

    app.save(store)
        .with_context(|| format!("failed to save settings to {}", store.path().display()))
}

fn run_headless(mut stored: StoredSettings, sink: MouseSink) -> Result<()> {
    stored.enabled = Some(true);
    let mut app = App::start(&stored, sink, HeadlessUi, Instant::now());

    loop {
        if app.poll_timer(Instant::now()) == Flow::Quit {
            return Ok(());
        }

        let wait = app.next_tick_in(Instant::now()).unwrap_or(IDLE_POLL);
        spin_sleep::sleep(wait);
    }
}

fn status_line<S, U>(app: &App<S, U>) -> String
where
    S: InputSink,
    U: TrayIcon + ValueEntryDialog,
{
    let s = app.settings();
    if !s.enabled() {
        return "paused".to_string();
    }

    format!(
        "moving by ({}) every {}, pointer at {}",
        s.vector(),
        menu::format_interval(s.interval_ms()),
        app.sink().pointer_position()
    )
}
