//! Terminal kiosk for busboard: clock, next bus departures, and the weather.

mod app;
mod config;
mod input;
mod ui;

use std::{
    fs::File,
    io,
    path::Path,
    sync::{Arc, Mutex},
    time::{Duration as StdDuration, Instant},
};

use anyhow::{Context as _, Result};
use busboard_core::{model::ResolvedForecast, ports::PortError, service::DashboardService};
use busboard_provider_jma as jma;
use chrono::Local;
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::Config;
use crate::input::Action;

const DEFAULT_CONFIG_PATH: &str = "busboard.yaml";

type RefreshResult = Result<ResolvedForecast, PortError>;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());
    let config = Config::load(&config_path)
        .with_context(|| format!("loading config from {config_path}"))?;

    init_logging(&config.log_file)?;
    info!(
        config = %config_path,
        departures = config.timetable.len(),
        "Starting busboard"
    );

    // HTTP + service setup
    let client = Client::builder().user_agent(&config.user_agent).build()?;
    let plugin = jma::plugin(client, config.weather.clone());
    let service = Arc::new(DashboardService::new(config.timetable.clone(), plugin));

    // App state
    let app = App::new(config.departures_shown);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app, &service, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Stopping busboard");
    res
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "busboard_core=info,busboard_provider_jma=info,busboard_tui=info".into()
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    service: &Arc<DashboardService>,
    config: &Config,
) -> Result<()> {
    let (tx, mut rx): (UnboundedSender<RefreshResult>, UnboundedReceiver<RefreshResult>) =
        unbounded_channel();
    let refresh_every = StdDuration::from_secs(config.forecast_refresh_secs);
    let tick = StdDuration::from_millis(config.tick_millis);

    let mut next_refresh = Instant::now();

    loop {
        if Instant::now() >= next_refresh {
            spawn_refresh(service, &tx, &mut app);
            next_refresh = Instant::now() + refresh_every;
        }

        // Apply whatever refreshes finished since the last tick, in completion order
        while let Ok(result) = rx.try_recv() {
            app.finish_refresh(result, Local::now().naive_local());
        }

        let now = Local::now().naive_local();
        let departures = service.departures(now, app.departures_shown);
        terminal.draw(|frame| ui::draw(frame, &app, now, &departures))?;

        // Poll for input; the timeout doubles as the redraw tick
        if event::poll(tick)?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key) {
                Action::Quit => break,
                Action::None => {}
                Action::RefreshWeather => {
                    spawn_refresh(service, &tx, &mut app);
                    next_refresh = Instant::now() + refresh_every;
                }
            }
        }
    }

    Ok(())
}

// In-flight refreshes are never cancelled; each one reports back when done.
fn spawn_refresh(
    service: &Arc<DashboardService>,
    tx: &UnboundedSender<RefreshResult>,
    app: &mut App,
) {
    app.begin_refresh();

    let service = Arc::clone(service);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = service.refresh_forecast().await;
        if tx.send(result).is_err() {
            debug!("Dashboard closed before the weather refresh finished");
        }
    });
}
