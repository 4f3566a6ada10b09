//! Bulk seeding from tabular exports. Each CSV replaces its collection
//! wholesale, matching the one-shot import script the league's spreadsheets
//! came from: `players.csv`, `games.csv`, `atbats.csv`, column names per the
//! stored document schema.

use crate::store::{LeagueStore, StoreError};
use crate::{AtBat, Game, GameStatus, InningLabel, Outcome, Player};
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Debug)]
pub enum ImportError {
    Csv(csv::Error, PathBuf),
    /// A row that parsed as CSV but doesn't describe a valid document.
    Invalid(String, PathBuf),
    Store(StoreError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Csv(e, path) => write!(f, "CSV error in {}: {e}", path.display()),
            ImportError::Invalid(msg, path) => {
                write!(f, "Invalid row in {}: {msg}", path.display())
            }
            ImportError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Csv(e, _) => Some(e),
            ImportError::Invalid(_, _) => None,
            ImportError::Store(e) => Some(e),
        }
    }
}

impl From<StoreError> for ImportError {
    fn from(e: StoreError) -> Self {
        ImportError::Store(e)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportSummary {
    pub players: usize,
    pub games: usize,
    pub atbats: usize,
}

// ---------------------------------------------------------------------------
// CSV row shapes — the spreadsheet encodings, not the document ones
// ---------------------------------------------------------------------------

/// Player exports carry a pile of derived stat columns; only the name is
/// authoritative, the rest is recomputed from at-bats.
#[derive(Debug, Deserialize)]
struct PlayerRow {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GameRow {
    game_id: String,
    date: NaiveDate,
    /// Comma-joined roster, e.g. "Ava, Ben".
    team1_players: String,
    team2_players: String,
    status: GameStatus,
    #[serde(default)]
    team1_score: Option<u32>,
    #[serde(default)]
    team2_score: Option<u32>,
    /// Semicolon-joined labels, e.g. "Top 1;Bottom 3". Often empty.
    #[serde(default)]
    ended_innings: String,
}

#[derive(Debug, Deserialize)]
struct AtBatRow {
    game_id: String,
    inning: InningLabel,
    batter: String,
    pitcher: String,
    strikes: u8,
    balls: u8,
    runners_on: u8,
    outcome: Outcome,
    outs_recorded: u8,
    rbi: u8,
}

fn split_roster(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_ended_innings(joined: &str, path: &Path) -> ImportResult<Vec<InningLabel>> {
    joined
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|e| ImportError::Invalid(format!("{e}"), path.to_owned()))
        })
        .collect()
}

fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> ImportResult<Vec<T>> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| ImportError::Csv(e, path.to_owned()))?;
    reader
        .deserialize()
        .map(|row| row.map_err(|e| ImportError::Csv(e, path.to_owned())))
        .collect()
}

/// Seed the store from `players.csv`, `games.csv` and `atbats.csv` in `dir`.
/// Every collection named by a present file is replaced outright; the other
/// collections are left alone.
pub fn import_dir(store: &LeagueStore, dir: &Path) -> ImportResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    let players_path = dir.join("players.csv");
    if players_path.exists() {
        let players: Vec<Player> = read_rows::<PlayerRow>(&players_path)?
            .into_iter()
            .map(|row| Player { name: row.name })
            .collect();
        summary.players = players.len();
        store.replace_players(&players)?;
    }

    let games_path = dir.join("games.csv");
    if games_path.exists() {
        let games: Vec<Game> = read_rows::<GameRow>(&games_path)?
            .into_iter()
            .map(|row| {
                Ok(Game {
                    game_id: row.game_id,
                    date: row.date,
                    team1_players: split_roster(&row.team1_players),
                    team2_players: split_roster(&row.team2_players),
                    status: row.status,
                    team1_score: row.team1_score,
                    team2_score: row.team2_score,
                    ended_innings: parse_ended_innings(&row.ended_innings, &games_path)?,
                })
            })
            .collect::<ImportResult<_>>()?;
        summary.games = games.len();
        store.replace_games(&games)?;
    }

    let atbats_path = dir.join("atbats.csv");
    if atbats_path.exists() {
        let atbats: Vec<AtBat> = read_rows::<AtBatRow>(&atbats_path)?
            .into_iter()
            .map(|row| AtBat {
                game_id: row.game_id,
                inning: row.inning,
                batter: row.batter,
                pitcher: row.pitcher,
                strikes: row.strikes,
                balls: row.balls,
                runners_on: row.runners_on,
                outcome: row.outcome,
                outs_recorded: row.outs_recorded,
                rbi: row.rbi,
            })
            .collect();
        summary.atbats = atbats.len();
        store.replace_atbats(&atbats)?;
    }

    info!(
        "imported {} players, {} games, {} at-bats from {}",
        summary.players,
        summary.games,
        summary.atbats,
        dir.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn import_replaces_collections_from_spreadsheet_encodings() {
        let data_dir = tempfile::tempdir().unwrap();
        let csv_dir = tempfile::tempdir().unwrap();
        let store = LeagueStore::open(data_dir.path()).unwrap();
        store.insert_player(&Player { name: "Stale".into() }).unwrap();

        fs::write(
            csv_dir.path().join("players.csv"),
            "name,team,games_played\nAva,,3\nBen,,2\n",
        )
        .unwrap();
        fs::write(
            csv_dir.path().join("games.csv"),
            "game_id,date,team1_players,team2_players,status,team1_score,team2_score,ended_innings\n\
             Game_1,2025-06-14,\"Ava, Cam\",Ben,completed,5,3,Top 1;Bottom 1\n\
             Game_2,2025-06-15,Ava,Ben,active,,,\n",
        )
        .unwrap();
        fs::write(
            csv_dir.path().join("atbats.csv"),
            "game_id,inning,batter,pitcher,strikes,balls,runners_on,outcome,outs_recorded,rbi\n\
             Game_1,Top 1,Ava,Ben,2,1,1,Home Run,0,2\n\
             Game_1,Bottom 1,Ben,Ava,3,0,0,Strike Out,1,0\n",
        )
        .unwrap();

        let summary = import_dir(&store, csv_dir.path()).unwrap();
        assert_eq!(summary.players, 2);
        assert_eq!(summary.games, 2);
        assert_eq!(summary.atbats, 2);

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.players.len(), 2);
        assert!(!snapshot.players.iter().any(|p| p.name == "Stale"));

        let game1 = &snapshot.games[0];
        assert_eq!(game1.team1_players, vec!["Ava".to_string(), "Cam".to_string()]);
        assert_eq!(game1.ended_innings.len(), 2);
        assert_eq!(game1.team1_score, Some(5));
        let game2 = &snapshot.games[1];
        assert_eq!(game2.team1_score, None);
        assert!(game2.ended_innings.is_empty());

        assert_eq!(snapshot.atbats[0].outcome, Outcome::HomeRun);
        assert_eq!(snapshot.atbats[0].rbi, 2);
    }

    #[test]
    fn absent_files_leave_their_collections_untouched() {
        let data_dir = tempfile::tempdir().unwrap();
        let csv_dir = tempfile::tempdir().unwrap();
        let store = LeagueStore::open(data_dir.path()).unwrap();
        store.insert_player(&Player { name: "Keep".into() }).unwrap();

        let summary = import_dir(&store, csv_dir.path()).unwrap();
        assert_eq!(summary.players, 0);
        assert_eq!(store.players().unwrap().len(), 1);
    }

    #[test]
    fn malformed_inning_labels_fail_the_import() {
        let data_dir = tempfile::tempdir().unwrap();
        let csv_dir = tempfile::tempdir().unwrap();
        let store = LeagueStore::open(data_dir.path()).unwrap();

        fs::write(
            csv_dir.path().join("games.csv"),
            "game_id,date,team1_players,team2_players,status,team1_score,team2_score,ended_innings\n\
             Game_1,2025-06-14,Ava,Ben,active,,,Seventh Stretch\n",
        )
        .unwrap();

        assert!(matches!(
            import_dir(&store, csv_dir.path()),
            Err(ImportError::Invalid(_, _))
        ));
    }
}
