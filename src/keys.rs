use crate::app::{App, MenuItem};
use crate::state::app_state::ScorebookMode;
use crate::state::messages::StoreRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    store_requests: &mpsc::Sender<StoreRequest>,
) {
    let mut guard = app.lock().await;

    // Ctrl-C quits from anywhere, including text entry.
    if let (Char('c'), KeyModifiers::CONTROL) = (key_event.code, key_event.modifiers) {
        crate::cleanup_terminal();
        std::process::exit(0);
    }

    // Text-entry sub-modes capture printable keys before anything else.
    if guard.state.active_tab == MenuItem::Scorebook {
        match guard.state.scorebook.mode {
            ScorebookMode::AddPlayer => {
                match key_event.code {
                    Char(c) => guard.state.scorebook.add_player_input.push(c),
                    KeyCode::Backspace => {
                        guard.state.scorebook.add_player_input.pop();
                    }
                    KeyCode::Enter => submit(guard, store_requests, App::add_player_request).await,
                    KeyCode::Esc => guard.scorebook_cancel_mode(),
                    _ => {}
                }
                return;
            }
            ScorebookMode::Reset => {
                match key_event.code {
                    Char(c) => guard.state.scorebook.reset_form.password.push(c),
                    KeyCode::Backspace => {
                        guard.state.scorebook.reset_form.password.pop();
                    }
                    KeyCode::Tab => {
                        guard.state.scorebook.reset_form.confirm =
                            !guard.state.scorebook.reset_form.confirm;
                    }
                    KeyCode::Enter => submit(guard, store_requests, App::reset_request).await,
                    KeyCode::Esc => guard.scorebook_cancel_mode(),
                    _ => {}
                }
                return;
            }
            _ => {}
        }
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) if !in_scorebook_subform(&guard) => {
            guard.update_tab(MenuItem::Scorebook)
        }
        (_, Char('2'), _) if !in_scorebook_subform(&guard) => guard.update_tab(MenuItem::Player),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Matchups),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Leaders),
        (_, Char('5'), _) => guard.update_tab(MenuItem::Games),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Scorebook — at-bat entry form
        (MenuItem::Scorebook, Char('j') | KeyCode::Down, _) if in_atbat_form(&guard) => {
            guard.scorebook_next_field();
        }
        (MenuItem::Scorebook, Char('k') | KeyCode::Up, _) if in_atbat_form(&guard) => {
            guard.scorebook_prev_field();
        }
        (MenuItem::Scorebook, Char('l') | KeyCode::Right, _) if in_atbat_form(&guard) => {
            guard.scorebook_adjust(true);
        }
        (MenuItem::Scorebook, Char('h') | KeyCode::Left, _) if in_atbat_form(&guard) => {
            guard.scorebook_adjust(false);
        }
        (MenuItem::Scorebook, Char(' '), _) if in_atbat_form(&guard) => {
            guard.scorebook_adjust(true);
        }
        (MenuItem::Scorebook, KeyCode::Enter, _) if in_atbat_form(&guard) => {
            submit(guard, store_requests, App::scorebook_record_request).await;
            return;
        }
        (MenuItem::Scorebook, Char('g'), _) if in_atbat_form(&guard) => {
            guard.scorebook_next_game();
        }
        (MenuItem::Scorebook, Char('n'), _) if in_atbat_form(&guard) => {
            guard.scorebook_enter_mode(ScorebookMode::StartGame);
        }
        (MenuItem::Scorebook, Char('e'), _) if in_atbat_form(&guard) => {
            guard.scorebook_enter_mode(ScorebookMode::EndGame);
        }
        (MenuItem::Scorebook, Char('u'), _) if in_atbat_form(&guard) => {
            guard.scorebook_enter_mode(ScorebookMode::UndoConfirm);
        }
        (MenuItem::Scorebook, Char('a'), _) if in_atbat_form(&guard) => {
            guard.scorebook_enter_mode(ScorebookMode::AddPlayer);
        }
        (MenuItem::Scorebook, Char('X'), _) if in_atbat_form(&guard) => {
            guard.scorebook_enter_mode(ScorebookMode::Reset);
        }

        // Scorebook — start game
        (MenuItem::Scorebook, Char('j') | KeyCode::Down, _)
            if in_mode(&guard, ScorebookMode::StartGame) =>
        {
            guard.start_game_move_cursor(true);
        }
        (MenuItem::Scorebook, Char('k') | KeyCode::Up, _)
            if in_mode(&guard, ScorebookMode::StartGame) =>
        {
            guard.start_game_move_cursor(false);
        }
        (MenuItem::Scorebook, Char('1'), _) if in_mode(&guard, ScorebookMode::StartGame) => {
            guard.start_game_toggle_side(true);
        }
        (MenuItem::Scorebook, Char('2'), _) if in_mode(&guard, ScorebookMode::StartGame) => {
            guard.start_game_toggle_side(false);
        }
        (MenuItem::Scorebook, Char('['), _) if in_mode(&guard, ScorebookMode::StartGame) => {
            guard.start_game_shift_date(-1);
        }
        (MenuItem::Scorebook, Char(']'), _) if in_mode(&guard, ScorebookMode::StartGame) => {
            guard.start_game_shift_date(1);
        }
        (MenuItem::Scorebook, KeyCode::Enter, _) if in_mode(&guard, ScorebookMode::StartGame) => {
            submit(guard, store_requests, App::start_game_request).await;
            return;
        }
        (MenuItem::Scorebook, KeyCode::Esc, _) if in_mode(&guard, ScorebookMode::StartGame) => {
            guard.scorebook_cancel_mode();
        }

        // Scorebook — end game
        (MenuItem::Scorebook, Char('j') | Char('k') | KeyCode::Down | KeyCode::Up, _)
            if in_mode(&guard, ScorebookMode::EndGame) =>
        {
            guard.state.scorebook.end_form.field = 1 - guard.state.scorebook.end_form.field;
        }
        (MenuItem::Scorebook, Char('l') | KeyCode::Right, _)
            if in_mode(&guard, ScorebookMode::EndGame) =>
        {
            guard.state.scorebook.end_form.adjust(true);
        }
        (MenuItem::Scorebook, Char('h') | KeyCode::Left, _)
            if in_mode(&guard, ScorebookMode::EndGame) =>
        {
            guard.state.scorebook.end_form.adjust(false);
        }
        (MenuItem::Scorebook, Char('c'), _) if in_mode(&guard, ScorebookMode::EndGame) => {
            guard.state.scorebook.end_form.confirm = !guard.state.scorebook.end_form.confirm;
        }
        (MenuItem::Scorebook, KeyCode::Enter, _) if in_mode(&guard, ScorebookMode::EndGame) => {
            submit(guard, store_requests, App::end_game_request).await;
            return;
        }
        (MenuItem::Scorebook, KeyCode::Esc, _) if in_mode(&guard, ScorebookMode::EndGame) => {
            guard.scorebook_cancel_mode();
        }

        // Scorebook — undo confirmation
        (MenuItem::Scorebook, Char('y'), _) if in_mode(&guard, ScorebookMode::UndoConfirm) => {
            submit(guard, store_requests, App::undo_request).await;
            return;
        }
        (MenuItem::Scorebook, Char('n') | KeyCode::Esc, _)
            if in_mode(&guard, ScorebookMode::UndoConfirm) =>
        {
            guard.scorebook_cancel_mode();
        }

        // Player dashboard
        (MenuItem::Player, Char('l') | KeyCode::Right, _) => guard.player_page_cycle(true),
        (MenuItem::Player, Char('h') | KeyCode::Left, _) => guard.player_page_cycle(false),
        (MenuItem::Player, Char('j') | KeyCode::Down, _) => {
            guard.state.player_page.scroll_offset =
                guard.state.player_page.scroll_offset.saturating_add(1);
        }
        (MenuItem::Player, Char('k') | KeyCode::Up, _) => {
            guard.state.player_page.scroll_offset =
                guard.state.player_page.scroll_offset.saturating_sub(1);
        }

        // Matchups
        (MenuItem::Matchups, KeyCode::Tab | Char('h') | Char('l') | KeyCode::Left | KeyCode::Right, _) => {
            guard.matchup_switch_focus();
        }
        (MenuItem::Matchups, Char('j') | KeyCode::Down, _) => guard.matchup_cycle(true),
        (MenuItem::Matchups, Char('k') | KeyCode::Up, _) => guard.matchup_cycle(false),

        // Leaderboards
        (MenuItem::Leaders, Char('l') | KeyCode::Right | Char('j') | KeyCode::Down, _) => {
            guard.leaders_cycle(true);
        }
        (MenuItem::Leaders, Char('h') | KeyCode::Left | Char('k') | KeyCode::Up, _) => {
            guard.leaders_cycle(false);
        }

        // Match history
        (MenuItem::Games, Char('j') | KeyCode::Down, _) => guard.game_log_move(true),
        (MenuItem::Games, Char('k') | KeyCode::Up, _) => guard.game_log_move(false),
        (MenuItem::Games, Char('y'), _) => guard.game_log_cycle_year(),
        (MenuItem::Games, Char('p') | KeyCode::Enter, _) => guard.game_log_toggle_plays(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

fn in_mode(app: &App, mode: ScorebookMode) -> bool {
    app.state.scorebook.mode == mode
}

fn in_atbat_form(app: &App) -> bool {
    in_mode(app, ScorebookMode::AtBat)
}

fn in_scorebook_subform(app: &App) -> bool {
    app.state.active_tab == MenuItem::Scorebook
        && app.state.scorebook.mode == ScorebookMode::StartGame
}

/// Build a request from the form; send it when valid, surface the reason when
/// not. The guard is released before the channel send.
async fn submit(
    mut guard: tokio::sync::MutexGuard<'_, App>,
    store_requests: &mpsc::Sender<StoreRequest>,
    build: impl Fn(&App) -> Result<StoreRequest, String>,
) {
    match build(&guard) {
        Ok(request) => {
            drop(guard);
            let _ = store_requests.send(request).await;
        }
        Err(message) => guard.set_status_error(message),
    }
}
