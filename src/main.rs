mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{StoreRequest, StoreResponse, UiEvent};
use crate::state::worker::{LoadingState, StoreWorker};
use anyhow::Context;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::error;
use std::io::Stdout;
use std::path::Path;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};
use wiffle_league::seed;
use wiffle_league::service::LeagueService;
use wiffle_league::store::LeagueStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args()? {
        return Ok(());
    }

    better_panic::install();

    // Open the league before touching the terminal so startup failures print
    // like normal errors.
    let settings = AppSettings::load();
    let store = LeagueStore::open(&settings.data_dir)
        .context("could not open the league data directory")?;
    let service = LeagueService::open(store, settings.admin_secret.clone())
        .context("could not read the league collections")?;

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Info)?;
    tui_logger::set_default_level(log::LevelFilter::Info);

    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (store_req_tx, store_req_rx) = mpsc::channel::<StoreRequest>(100);
    let (store_resp_tx, store_resp_rx) = mpsc::channel::<StoreResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Store worker thread — owns the service and serializes every mutation
    let store_worker = StoreWorker::new(service, store_req_rx, store_resp_tx);
    let store_task = tokio::spawn(store_worker.run());

    // Trigger the initial snapshot load
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, store_req_tx, store_resp_rx).await;

    input_handler.abort();
    store_task.abort();

    Ok(())
}

fn handle_cli_args() -> anyhow::Result<bool> {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return Ok(false);
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            Ok(true)
        }
        "-V" | "--version" => {
            println!("wbtui {}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
        "--import" => {
            let dir = args.next().context("--import needs a directory argument")?;
            let store = LeagueStore::open(LeagueStore::default_dir())
                .context("could not open the league data directory")?;
            let summary = seed::import_dir(&store, Path::new(&dir))
                .with_context(|| format!("import from {dir} failed"))?;
            println!(
                "Imported {} players, {} games, {} at-bats into {}",
                summary.players,
                summary.games,
                summary.atbats,
                store.dir().display()
            );
            Ok(true)
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "wbtui - wiffle ball scorekeeping terminal UI

Usage:
  wbtui
  wbtui --import <dir>
  wbtui --help
  wbtui --version

The --import form seeds the store from players.csv, games.csv and
atbats.csv in <dir>, replacing each collection a file is present for.

Environment:
  WBTUI_DATA_DIR         Directory holding the league's JSON collections
  WBTUI_ADMIN_PASSWORD   Admin secret required by the reset-all action"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    store_requests: mpsc::Sender<StoreRequest>,
    mut store_responses: mpsc::Receiver<StoreResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &store_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = store_responses.recv() => {
                let should_redraw = handle_store_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    store_requests: &mpsc::Sender<StoreRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = store_requests.send(StoreRequest::LoadSnapshot).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, store_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_store_response(
    response: StoreResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        StoreResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        StoreResponse::SnapshotLoaded { snapshot } => {
            let mut guard = app.lock().await;
            guard.on_snapshot_loaded(snapshot);
        }
        StoreResponse::MutationApplied { message, snapshot } => {
            let mut guard = app.lock().await;
            guard.on_mutation_applied(message, snapshot);
        }
        StoreResponse::Rejected { message } => {
            let mut guard = app.lock().await;
            guard.on_rejected(message);
        }
        StoreResponse::Error { message } => {
            error!("Store error: {message}");
            let mut guard = app.lock().await;
            guard.on_error(message);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide).unwrap();
    execute!(stdout, terminal::EnterAlternateScreen).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    terminal::enable_raw_mode().unwrap();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0)).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    execute!(stdout, terminal::LeaveAlternateScreen).unwrap();
    execute!(stdout, cursor::Show).unwrap();
    terminal::disable_raw_mode().unwrap();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
