use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, ScorebookMode, StatusLine};
use crate::state::messages::StoreRequest;
use wiffle_league::service::AtBatEntry;
use wiffle_league::store::LeagueSnapshot;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Scorebook,
    Player,
    Matchups,
    Leaders,
    Games,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Store response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_snapshot_loaded(&mut self, snapshot: LeagueSnapshot) {
        self.state.snapshot = snapshot;
        self.state.loaded = true;
        self.state.scorebook.form.sync_rbi();
    }

    pub fn on_mutation_applied(&mut self, message: String, snapshot: LeagueSnapshot) {
        self.state.snapshot = snapshot;
        self.state.loaded = true;
        self.state.scorebook.after_mutation();
        self.state.status = Some(StatusLine { text: message, is_error: false });
    }

    pub fn on_rejected(&mut self, message: String) {
        // Input rejection: keep the form as typed so it can be corrected.
        self.state.status = Some(StatusLine { text: message, is_error: true });
    }

    pub fn on_error(&mut self, message: String) {
        self.state.status = Some(StatusLine { text: message, is_error: true });
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.status = None;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn set_status_error(&mut self, text: impl Into<String>) {
        self.state.status = Some(StatusLine { text: text.into(), is_error: true });
    }

    // -----------------------------------------------------------------------
    // Scorebook — at-bat form
    // -----------------------------------------------------------------------

    pub fn scorebook_enter_mode(&mut self, mode: ScorebookMode) {
        self.state.scorebook.mode = mode;
        self.state.status = None;
    }

    pub fn scorebook_cancel_mode(&mut self) {
        self.state.scorebook.mode = ScorebookMode::AtBat;
    }

    pub fn scorebook_next_game(&mut self) {
        let count = self.state.active_games().len();
        if count > 0 {
            self.state.scorebook.game_idx = (self.state.scorebook.game_idx + 1) % count;
            // Selections index into the previous game's rosters and innings.
            self.state.scorebook.form = Default::default();
            self.state.scorebook.form.sync_rbi();
        }
    }

    pub fn scorebook_next_field(&mut self) {
        self.state.scorebook.form.field = self.state.scorebook.form.field.next();
    }

    pub fn scorebook_prev_field(&mut self) {
        self.state.scorebook.form.field = self.state.scorebook.form.field.prev();
    }

    pub fn scorebook_adjust(&mut self, forward: bool) {
        let open_innings = self
            .state
            .selected_active_game()
            .map(|g| g.open_innings().len())
            .unwrap_or(0);
        let roster = self.state.selected_game_roster().len();
        self.state.scorebook.form.adjust(forward, open_innings, roster);
    }

    /// Build the recording request from the form, or explain what's missing.
    pub fn scorebook_record_request(&self) -> Result<StoreRequest, String> {
        let game = self
            .state
            .selected_active_game()
            .ok_or("No active game. Press n to start one.")?;
        let open = game.open_innings();
        if open.is_empty() {
            return Err("All innings have been ended for this game.".into());
        }
        let roster = self.state.selected_game_roster();
        let form = &self.state.scorebook.form;
        let inning = open[form.inning_idx.min(open.len() - 1)];
        let batter = roster[form.batter_idx.min(roster.len() - 1)].clone();
        let pitcher = roster[form.pitcher_idx.min(roster.len() - 1)].clone();

        Ok(StoreRequest::RecordAtBat {
            entry: AtBatEntry {
                game_id: game.game_id.clone(),
                inning,
                batter,
                pitcher,
                strikes: form.strikes,
                balls: form.balls,
                runners_on: form.runners_on,
                outcome: form.outcome(),
                rbi: form.rbi,
            },
            end_inning: form.end_inning,
        })
    }

    // -----------------------------------------------------------------------
    // Scorebook — satellite forms
    // -----------------------------------------------------------------------

    pub fn start_game_move_cursor(&mut self, down: bool) {
        let count = self.state.snapshot.players.len();
        if count == 0 {
            return;
        }
        let cursor = &mut self.state.scorebook.start_form.cursor;
        *cursor = if down { (*cursor + 1) % count } else { (*cursor + count - 1) % count };
    }

    pub fn start_game_toggle_side(&mut self, team1_side: bool) {
        let Some(player) = self
            .state
            .snapshot
            .players
            .get(self.state.scorebook.start_form.cursor)
            .map(|p| p.name.clone())
        else {
            return;
        };
        self.state.scorebook.start_form.toggle(&player, team1_side);
    }

    pub fn start_game_shift_date(&mut self, days: i64) {
        let form = &mut self.state.scorebook.start_form;
        if let Some(date) = form.date.checked_add_signed(chrono::Duration::days(days)) {
            form.date = date;
        }
    }

    pub fn start_game_request(&self) -> Result<StoreRequest, String> {
        let form = &self.state.scorebook.start_form;
        if form.team1.is_empty() || form.team2.is_empty() {
            return Err("You must select at least one player for each team.".into());
        }
        Ok(StoreRequest::StartGame {
            date: form.date,
            team1: form.team1.clone(),
            team2: form.team2.clone(),
        })
    }

    pub fn end_game_request(&self) -> Result<StoreRequest, String> {
        let game = self.state.selected_active_game().ok_or("No active games to end.")?;
        let form = &self.state.scorebook.end_form;
        if !form.confirm {
            return Err("Confirm the end of the game first (press c).".into());
        }
        Ok(StoreRequest::EndGame {
            game_id: game.game_id.clone(),
            team1_score: form.team1_score,
            team2_score: form.team2_score,
        })
    }

    pub fn undo_request(&self) -> Result<StoreRequest, String> {
        let game = self.state.selected_active_game().ok_or("No active game selected.")?;
        Ok(StoreRequest::UndoLastAtBat { game_id: game.game_id.clone() })
    }

    pub fn add_player_request(&self) -> Result<StoreRequest, String> {
        let name = self.state.scorebook.add_player_input.trim();
        if name.is_empty() {
            return Err("Name cannot be empty.".into());
        }
        Ok(StoreRequest::AddPlayer { name: name.to_owned() })
    }

    pub fn reset_request(&self) -> Result<StoreRequest, String> {
        let form = &self.state.scorebook.reset_form;
        if !form.confirm {
            return Err("Confirm the reset first (press Tab).".into());
        }
        Ok(StoreRequest::ResetAll { password: form.password.clone() })
    }

    // -----------------------------------------------------------------------
    // Read-only tab navigation
    // -----------------------------------------------------------------------

    pub fn player_page_cycle(&mut self, forward: bool) {
        let count = self.state.snapshot.players.len();
        if count == 0 {
            return;
        }
        let idx = &mut self.state.player_page.player_idx;
        *idx = if forward { (*idx + 1) % count } else { (*idx + count - 1) % count };
        self.state.player_page.scroll_offset = 0;
    }

    pub fn matchup_cycle(&mut self, forward: bool) {
        let count = self.state.snapshot.players.len();
        if count == 0 {
            return;
        }
        let idx = if self.state.matchup.focus == 0 {
            &mut self.state.matchup.batter_idx
        } else {
            &mut self.state.matchup.pitcher_idx
        };
        *idx = if forward { (*idx + 1) % count } else { (*idx + count - 1) % count };
    }

    pub fn matchup_switch_focus(&mut self) {
        self.state.matchup.focus = 1 - self.state.matchup.focus;
    }

    pub fn leaders_cycle(&mut self, forward: bool) {
        let stat = self.state.leaders.stat;
        self.state.leaders.stat = if forward { stat.next() } else { stat.prev() };
    }

    pub fn game_log_move(&mut self, down: bool) {
        let count = self.state.games_by_date_desc().len();
        if count == 0 {
            return;
        }
        let idx = &mut self.state.game_log.game_idx;
        *idx = if down { (*idx + 1).min(count - 1) } else { idx.saturating_sub(1) };
    }

    pub fn game_log_cycle_year(&mut self) {
        let seasons = wiffle_league::stats::seasons(&self.state.snapshot.games).len();
        self.state.game_log.year_idx = (self.state.game_log.year_idx + 1) % (seasons + 1);
        self.state.game_log.game_idx = 0;
    }

    pub fn game_log_toggle_plays(&mut self) {
        self.state.game_log.show_plays = !self.state.game_log.show_plays;
    }
}
