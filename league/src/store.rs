use crate::{AtBat, Game, Player};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub type StoreResult<T> = Result<T, StoreError>;

const PLAYERS_FILE: &str = "players.json";
const GAMES_FILE: &str = "games.json";
const ATBATS_FILE: &str = "atbats.json";

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error, PathBuf),
    Corrupt(serde_json::Error, PathBuf),
    NotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e, path) => write!(f, "I/O error for {}: {e}", path.display()),
            StoreError::Corrupt(e, path) => {
                write!(f, "Corrupt collection {}: {e}", path.display())
            }
            StoreError::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e, _) => Some(e),
            StoreError::Corrupt(e, _) => Some(e),
            StoreError::NotFound(_) => None,
        }
    }
}

/// Everything the store holds, re-read in full. One snapshot backs one render
/// pass; nothing mutates it in place.
#[derive(Debug, Clone, Default)]
pub struct LeagueSnapshot {
    pub players: Vec<Player>,
    pub games: Vec<Game>,
    pub atbats: Vec<AtBat>,
}

/// Document store over the three league collections, one JSON array file per
/// collection. Every write rewrites the owning collection file; every read
/// scans it. Filtering happens downstream in the stats engine.
#[derive(Debug, Clone)]
pub struct LeagueStore {
    dir: PathBuf,
}

impl LeagueStore {
    /// Open (and create, if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io(e, dir.clone()))?;
        Ok(Self { dir })
    }

    /// Default data directory:
    /// `WBTUI_DATA_DIR`, then `$XDG_DATA_HOME/wbtui`, then
    /// `~/.local/share/wbtui`, then a relative `wbtui-data`.
    pub fn default_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("WBTUI_DATA_DIR")
            && !dir.trim().is_empty()
        {
            return PathBuf::from(dir);
        }
        if let Ok(data_dir) = std::env::var("XDG_DATA_HOME")
            && !data_dir.trim().is_empty()
        {
            return PathBuf::from(data_dir).join("wbtui");
        }
        if let Ok(home) = std::env::var("HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home).join(".local").join("share").join("wbtui");
        }
        PathBuf::from("wbtui-data")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // -----------------------------------------------------------------------
    // Find-all reads
    // -----------------------------------------------------------------------

    pub fn players(&self) -> StoreResult<Vec<Player>> {
        self.read_collection(PLAYERS_FILE)
    }

    pub fn games(&self) -> StoreResult<Vec<Game>> {
        self.read_collection(GAMES_FILE)
    }

    pub fn atbats(&self) -> StoreResult<Vec<AtBat>> {
        self.read_collection(ATBATS_FILE)
    }

    /// Reload all three collections. Called after every mutation so the
    /// caller always renders from fresh data.
    pub fn snapshot(&self) -> StoreResult<LeagueSnapshot> {
        Ok(LeagueSnapshot {
            players: self.players()?,
            games: self.games()?,
            atbats: self.atbats()?,
        })
    }

    // -----------------------------------------------------------------------
    // Single-document writes
    // -----------------------------------------------------------------------

    pub fn insert_player(&self, player: &Player) -> StoreResult<()> {
        let mut rows = self.players()?;
        rows.push(player.clone());
        self.write_collection(PLAYERS_FILE, &rows)
    }

    pub fn insert_game(&self, game: &Game) -> StoreResult<()> {
        let mut rows = self.games()?;
        rows.push(game.clone());
        self.write_collection(GAMES_FILE, &rows)
    }

    pub fn insert_atbat(&self, atbat: &AtBat) -> StoreResult<()> {
        let mut rows = self.atbats()?;
        rows.push(atbat.clone());
        self.write_collection(ATBATS_FILE, &rows)
    }

    /// Replace the stored game carrying this `game_id`.
    pub fn update_game(&self, game: &Game) -> StoreResult<()> {
        let mut rows = self.games()?;
        let slot = rows
            .iter_mut()
            .find(|g| g.game_id == game.game_id)
            .ok_or_else(|| StoreError::NotFound(format!("game {}", game.game_id)))?;
        *slot = game.clone();
        self.write_collection(GAMES_FILE, &rows)
    }

    /// Remove the most recently appended at-bat of one game and return it.
    /// Other games' at-bats are untouched.
    pub fn delete_last_atbat(&self, game_id: &str) -> StoreResult<AtBat> {
        let mut rows = self.atbats()?;
        let idx = rows
            .iter()
            .rposition(|ab| ab.game_id == game_id)
            .ok_or_else(|| StoreError::NotFound(format!("at-bats for game {game_id}")))?;
        let removed = rows.remove(idx);
        self.write_collection(ATBATS_FILE, &rows)?;
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Bulk writes
    // -----------------------------------------------------------------------

    pub fn replace_players(&self, rows: &[Player]) -> StoreResult<()> {
        self.write_collection(PLAYERS_FILE, rows)
    }

    pub fn replace_games(&self, rows: &[Game]) -> StoreResult<()> {
        self.write_collection(GAMES_FILE, rows)
    }

    pub fn replace_atbats(&self, rows: &[AtBat]) -> StoreResult<()> {
        self.write_collection(ATBATS_FILE, rows)
    }

    /// Delete-all on every collection.
    pub fn reset_all(&self) -> StoreResult<()> {
        self.write_collection::<Player>(PLAYERS_FILE, &[])?;
        self.write_collection::<Game>(GAMES_FILE, &[])?;
        self.write_collection::<AtBat>(ATBATS_FILE, &[])
    }

    // -----------------------------------------------------------------------
    // File plumbing
    // -----------------------------------------------------------------------

    fn collection_path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// A collection file that doesn't exist yet reads as empty.
    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> StoreResult<Vec<T>> {
        let path = self.collection_path(file);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e, path)),
        };
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt(e, path))
    }

    fn write_collection<T: Serialize>(&self, file: &str, rows: &[T]) -> StoreResult<()> {
        let path = self.collection_path(file);
        let payload =
            serde_json::to_string_pretty(rows).map_err(|e| StoreError::Corrupt(e, path.clone()))?;
        fs::write(&path, payload).map_err(|e| StoreError::Io(e, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameStatus, Outcome};
    use chrono::NaiveDate;

    fn test_store() -> (tempfile::TempDir, LeagueStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LeagueStore::open(dir.path()).expect("open store");
        (dir, store)
    }

    fn atbat(game_id: &str, batter: &str) -> AtBat {
        AtBat {
            game_id: game_id.into(),
            inning: "Top 1".parse().unwrap(),
            batter: batter.into(),
            pitcher: "Pitch".into(),
            strikes: 0,
            balls: 0,
            runners_on: 0,
            outcome: Outcome::Single,
            outs_recorded: 0,
            rbi: 0,
        }
    }

    #[test]
    fn missing_collections_read_as_empty() {
        let (_dir, store) = test_store();
        assert!(store.players().unwrap().is_empty());
        assert!(store.games().unwrap().is_empty());
        assert!(store.atbats().unwrap().is_empty());
    }

    #[test]
    fn inserted_documents_survive_a_reload() {
        let (_dir, store) = test_store();
        store.insert_player(&Player { name: "Ava".into() }).unwrap();
        store.insert_player(&Player { name: "Ben".into() }).unwrap();

        let names: Vec<String> =
            store.players().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Ava".to_string(), "Ben".to_string()]);
    }

    #[test]
    fn update_game_replaces_only_the_matching_document() {
        let (_dir, store) = test_store();
        let mut game = Game {
            game_id: "Game_1".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            team1_players: vec!["Ava".into()],
            team2_players: vec!["Ben".into()],
            status: GameStatus::Active,
            team1_score: None,
            team2_score: None,
            ended_innings: Vec::new(),
        };
        store.insert_game(&game).unwrap();
        let other = Game { game_id: "Game_2".into(), ..game.clone() };
        store.insert_game(&other).unwrap();

        game.status = GameStatus::Completed;
        game.team1_score = Some(4);
        game.team2_score = Some(2);
        store.update_game(&game).unwrap();

        let games = store.games().unwrap();
        assert_eq!(games[0].status, GameStatus::Completed);
        assert_eq!(games[1].status, GameStatus::Active);
    }

    #[test]
    fn update_unknown_game_is_not_found() {
        let (_dir, store) = test_store();
        let game = Game {
            game_id: "Game_9".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            team1_players: vec!["Ava".into()],
            team2_players: vec!["Ben".into()],
            status: GameStatus::Active,
            team1_score: None,
            team2_score: None,
            ended_innings: Vec::new(),
        };
        assert!(matches!(store.update_game(&game), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn delete_last_atbat_removes_only_that_games_newest_row() {
        let (_dir, store) = test_store();
        store.insert_atbat(&atbat("Game_1", "Ava")).unwrap();
        store.insert_atbat(&atbat("Game_2", "Cam")).unwrap();
        store.insert_atbat(&atbat("Game_1", "Ben")).unwrap();

        let removed = store.delete_last_atbat("Game_1").unwrap();
        assert_eq!(removed.batter, "Ben");

        let remaining: Vec<String> =
            store.atbats().unwrap().into_iter().map(|ab| ab.batter).collect();
        assert_eq!(remaining, vec!["Ava".to_string(), "Cam".to_string()]);

        assert!(matches!(
            store.delete_last_atbat("Game_3"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn reset_all_empties_every_collection() {
        let (_dir, store) = test_store();
        store.insert_player(&Player { name: "Ava".into() }).unwrap();
        store.insert_atbat(&atbat("Game_1", "Ava")).unwrap();

        store.reset_all().unwrap();
        let snapshot = store.snapshot().unwrap();
        assert!(snapshot.players.is_empty());
        assert!(snapshot.games.is_empty());
        assert!(snapshot.atbats.is_empty());
    }

    #[test]
    fn corrupt_collection_files_are_reported_not_swallowed() {
        let (dir, store) = test_store();
        std::fs::write(dir.path().join("players.json"), "not json").unwrap();
        assert!(matches!(store.players(), Err(StoreError::Corrupt(_, _))));
    }
}
