use crate::state::worker::LoadingState;
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use wiffle_league::service::AtBatEntry;
use wiffle_league::store::LeagueSnapshot;

/// One reload or mutation against the record store. Every variant maps to a
/// single service call on the worker side.
#[derive(Debug, Clone)]
pub enum StoreRequest {
    LoadSnapshot,
    AddPlayer { name: String },
    StartGame { date: NaiveDate, team1: Vec<String>, team2: Vec<String> },
    RecordAtBat { entry: AtBatEntry, end_inning: bool },
    UndoLastAtBat { game_id: String },
    EndGame { game_id: String, team1_score: u32, team2_score: u32 },
    ResetAll { password: String },
}

#[derive(Debug)]
pub enum StoreResponse {
    LoadingStateChanged { loading_state: LoadingState },
    SnapshotLoaded { snapshot: LeagueSnapshot },
    /// A mutation went through; the snapshot is the post-write reload.
    MutationApplied { message: String, snapshot: LeagueSnapshot },
    /// Input rejection — user-correctable, nothing was written.
    Rejected { message: String },
    /// The store itself failed.
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
