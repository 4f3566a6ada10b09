use crate::app::MenuItem;
use chrono::{Local, NaiveDate};
use wiffle_league::stats::LeaderStat;
use wiffle_league::store::LeagueSnapshot;
use wiffle_league::{Game, MAX_BALLS, MAX_RBI, MAX_RUNNERS_ON, MAX_STRIKES, Outcome};

// ---------------------------------------------------------------------------
// Scorebook state — the at-bat entry form and its satellite actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScorebookMode {
    /// The at-bat entry form, the tab's home view.
    #[default]
    AtBat,
    StartGame,
    EndGame,
    UndoConfirm,
    AddPlayer,
    Reset,
}

/// Field focus within the at-bat form, cycled with j/k.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AtBatField {
    #[default]
    Inning,
    Batter,
    Pitcher,
    Strikes,
    Balls,
    RunnersOn,
    Outcome,
    Rbi,
    EndInning,
}

impl AtBatField {
    const ORDER: [AtBatField; 9] = [
        AtBatField::Inning,
        AtBatField::Batter,
        AtBatField::Pitcher,
        AtBatField::Strikes,
        AtBatField::Balls,
        AtBatField::RunnersOn,
        AtBatField::Outcome,
        AtBatField::Rbi,
        AtBatField::EndInning,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AtBatField::Inning => "Inning",
            AtBatField::Batter => "Batter",
            AtBatField::Pitcher => "Pitcher",
            AtBatField::Strikes => "Strikes",
            AtBatField::Balls => "Balls",
            AtBatField::RunnersOn => "Runners on",
            AtBatField::Outcome => "Outcome",
            AtBatField::Rbi => "RBIs",
            AtBatField::EndInning => "End half-inning",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Default)]
pub struct AtBatForm {
    pub field: AtBatField,
    /// Index into the selected game's open innings.
    pub inning_idx: usize,
    /// Indices into the combined roster (team 1 first, then team 2).
    pub batter_idx: usize,
    pub pitcher_idx: usize,
    pub strikes: u8,
    pub balls: u8,
    pub runners_on: u8,
    /// Index into Outcome::ALL.
    pub outcome_idx: usize,
    pub rbi: u8,
    /// Set once the scorer adjusts RBIs by hand; until then the form tracks
    /// the outcome's suggested value.
    pub rbi_touched: bool,
    pub end_inning: bool,
}

impl AtBatForm {
    pub fn outcome(&self) -> Outcome {
        Outcome::ALL[self.outcome_idx.min(Outcome::ALL.len() - 1)]
    }

    /// Re-derive the RBI suggestion after the outcome or runner count moved.
    pub fn sync_rbi(&mut self) {
        let outcome = self.outcome();
        if !outcome.rbi_is_editable() {
            self.rbi = 0;
            self.rbi_touched = false;
        } else if !self.rbi_touched {
            self.rbi = outcome.default_rbi(self.runners_on).min(MAX_RBI);
        }
    }

    /// Cycle the focused field's value by one step in either direction.
    /// `open_innings` and `roster` bound the index fields.
    pub fn adjust(&mut self, forward: bool, open_innings: usize, roster: usize) {
        match self.field {
            AtBatField::Inning => self.inning_idx = cycle(self.inning_idx, open_innings, forward),
            AtBatField::Batter => self.batter_idx = cycle(self.batter_idx, roster, forward),
            AtBatField::Pitcher => self.pitcher_idx = cycle(self.pitcher_idx, roster, forward),
            AtBatField::Strikes => self.strikes = cycle_u8(self.strikes, MAX_STRIKES, forward),
            AtBatField::Balls => self.balls = cycle_u8(self.balls, MAX_BALLS, forward),
            AtBatField::RunnersOn => {
                self.runners_on = cycle_u8(self.runners_on, MAX_RUNNERS_ON, forward);
                self.sync_rbi();
            }
            AtBatField::Outcome => {
                self.outcome_idx = cycle(self.outcome_idx, Outcome::ALL.len(), forward);
                self.sync_rbi();
            }
            AtBatField::Rbi => {
                if self.outcome().rbi_is_editable() {
                    self.rbi = cycle_u8(self.rbi, MAX_RBI, forward);
                    self.rbi_touched = true;
                }
            }
            AtBatField::EndInning => self.end_inning = !self.end_inning,
        }
    }

    /// Back to a neutral state after a successful recording, keeping the
    /// count-independent selections (inning, batter, pitcher) in place.
    pub fn after_record(&mut self) {
        self.strikes = 0;
        self.balls = 0;
        self.rbi_touched = false;
        self.end_inning = false;
        self.sync_rbi();
    }
}

fn cycle(idx: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward { (idx + 1) % len } else { (idx + len - 1) % len }
}

fn cycle_u8(value: u8, max: u8, forward: bool) -> u8 {
    let len = usize::from(max) + 1;
    cycle(usize::from(value), len, forward) as u8
}

#[derive(Debug)]
pub struct StartGameForm {
    pub date: NaiveDate,
    /// Cursor into the players collection.
    pub cursor: usize,
    pub team1: Vec<String>,
    pub team2: Vec<String>,
}

impl Default for StartGameForm {
    fn default() -> Self {
        Self {
            date: Local::now().date_naive(),
            cursor: 0,
            team1: Vec::new(),
            team2: Vec::new(),
        }
    }
}

impl StartGameForm {
    /// Toggle a player onto one roster; a player can be on at most one side.
    pub fn toggle(&mut self, name: &str, team1_side: bool) {
        let (target, other) = if team1_side {
            (&mut self.team1, &mut self.team2)
        } else {
            (&mut self.team2, &mut self.team1)
        };
        other.retain(|n| n != name);
        if let Some(pos) = target.iter().position(|n| n == name) {
            target.remove(pos);
        } else {
            target.push(name.to_owned());
        }
    }

    pub fn side_of(&self, name: &str) -> Option<bool> {
        if self.team1.iter().any(|n| n == name) {
            Some(true)
        } else if self.team2.iter().any(|n| n == name) {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct EndGameForm {
    pub team1_score: u32,
    pub team2_score: u32,
    /// 0 = team 1 score focused, 1 = team 2.
    pub field: usize,
    pub confirm: bool,
}

impl EndGameForm {
    pub fn adjust(&mut self, forward: bool) {
        let score = if self.field == 0 { &mut self.team1_score } else { &mut self.team2_score };
        *score = if forward { (*score + 1).min(99) } else { score.saturating_sub(1) };
    }
}

#[derive(Debug, Default)]
pub struct ResetForm {
    pub password: String,
    pub confirm: bool,
}

#[derive(Debug, Default)]
pub struct ScorebookState {
    pub mode: ScorebookMode,
    /// Index into the snapshot's active games.
    pub game_idx: usize,
    pub form: AtBatForm,
    pub start_form: StartGameForm,
    pub end_form: EndGameForm,
    pub reset_form: ResetForm,
    pub add_player_input: String,
}

impl ScorebookState {
    /// Collapse all transient sub-forms once a mutation has been applied.
    pub fn after_mutation(&mut self) {
        self.mode = ScorebookMode::AtBat;
        self.start_form = StartGameForm::default();
        self.end_form = EndGameForm::default();
        self.reset_form = ResetForm::default();
        self.add_player_input.clear();
        self.form.after_record();
    }
}

// ---------------------------------------------------------------------------
// Read-only tab states
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PlayerPageState {
    pub player_idx: usize,
    pub scroll_offset: u16,
}

#[derive(Debug)]
pub struct MatchupState {
    pub batter_idx: usize,
    pub pitcher_idx: usize,
    /// 0 = left slot focused, 1 = right.
    pub focus: usize,
}

impl Default for MatchupState {
    fn default() -> Self {
        // Start the two slots on different players where possible.
        Self { batter_idx: 0, pitcher_idx: 1, focus: 0 }
    }
}

#[derive(Debug)]
pub struct LeadersState {
    pub stat: LeaderStat,
}

impl Default for LeadersState {
    fn default() -> Self {
        Self { stat: LeaderStat::Avg }
    }
}

#[derive(Debug, Default)]
pub struct GameLogState {
    /// Index into the date-descending game list.
    pub game_idx: usize,
    /// 0 = all seasons, n = seasons()[n - 1].
    pub year_idx: usize,
    pub show_plays: bool,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub status: Option<StatusLine>,
    /// The immutable collections backing this render pass; replaced wholesale
    /// by every snapshot reload.
    pub snapshot: LeagueSnapshot,
    pub loaded: bool,
    pub scorebook: ScorebookState,
    pub player_page: PlayerPageState,
    pub matchup: MatchupState,
    pub leaders: LeadersState,
    pub game_log: GameLogState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_games(&self) -> Vec<&Game> {
        self.snapshot.games.iter().filter(|g| g.is_active()).collect()
    }

    pub fn selected_active_game(&self) -> Option<&Game> {
        let games = self.active_games();
        if games.is_empty() {
            return None;
        }
        Some(games[self.scorebook.game_idx.min(games.len() - 1)])
    }

    /// Combined roster of the selected active game, team 1 first.
    pub fn selected_game_roster(&self) -> Vec<String> {
        self.selected_active_game()
            .map(|g| {
                g.team1_players
                    .iter()
                    .chain(&g.team2_players)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Games in match-history order: most recent first.
    pub fn games_by_date_desc(&self) -> Vec<&Game> {
        let mut games: Vec<&Game> = match self.game_log_year() {
            Some(year) => {
                use chrono::Datelike;
                self.snapshot.games.iter().filter(|g| g.date.year() == year).collect()
            }
            None => self.snapshot.games.iter().collect(),
        };
        games.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.game_id.cmp(&a.game_id)));
        games
    }

    pub fn game_log_year(&self) -> Option<i32> {
        if self.game_log.year_idx == 0 {
            return None;
        }
        wiffle_league::stats::seasons(&self.snapshot.games)
            .get(self.game_log.year_idx - 1)
            .copied()
    }
}
