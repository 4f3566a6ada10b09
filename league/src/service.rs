use crate::store::{LeagueSnapshot, LeagueStore, StoreError};
use crate::{
    AtBat, Game, GameStatus, InningLabel, MAX_BALLS, MAX_RBI, MAX_RUNNERS_ON, MAX_STRIKES, Outcome,
    Player,
};
use chrono::NaiveDate;
use log::info;
use std::fmt;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Input rejection: user-correctable, nothing was written.
    Rejected(String),
    /// The store itself failed; fatal for the current interaction.
    Store(StoreError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Rejected(reason) => write!(f, "{reason}"),
            ServiceError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Rejected(_) => None,
            ServiceError::Store(e) => Some(e),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

fn rejected(reason: impl Into<String>) -> ServiceError {
    ServiceError::Rejected(reason.into())
}

/// Scorebook input for one plate appearance. `outs_recorded` is derived, not
/// taken from the caller.
#[derive(Debug, Clone)]
pub struct AtBatEntry {
    pub game_id: String,
    pub inning: InningLabel,
    pub batter: String,
    pub pitcher: String,
    pub strikes: u8,
    pub balls: u8,
    pub runners_on: u8,
    pub outcome: Outcome,
    pub rbi: u8,
}

/// The write boundary. Every mutation is validated here before it touches the
/// store, so state-machine violations (at-bats against an ended inning or a
/// completed game) are rejected even when the caller didn't check first.
pub struct LeagueService {
    store: LeagueStore,
    admin_secret: Option<String>,
    next_game_number: u64,
}

impl LeagueService {
    /// Wrap a store. The game-ID counter resumes one past the highest
    /// existing `Game_<n>` suffix, so undone or abandoned IDs are never
    /// handed out twice within a process.
    pub fn open(store: LeagueStore, admin_secret: Option<String>) -> ServiceResult<Self> {
        let games = store.games()?;
        let next_game_number = 1 + games
            .iter()
            .filter_map(|g| g.game_id.strip_prefix("Game_"))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Ok(Self { store, admin_secret, next_game_number })
    }

    pub fn store(&self) -> &LeagueStore {
        &self.store
    }

    pub fn snapshot(&self) -> ServiceResult<LeagueSnapshot> {
        Ok(self.store.snapshot()?)
    }

    // -----------------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------------

    pub fn add_player(&self, name: &str) -> ServiceResult<Player> {
        let name = name.trim();
        if name.is_empty() {
            return Err(rejected("Name cannot be empty."));
        }
        let players = self.store.players()?;
        if players.iter().any(|p| p.name == name) {
            return Err(rejected(format!("Player '{name}' already exists.")));
        }
        let player = Player { name: name.to_owned() };
        self.store.insert_player(&player)?;
        info!("added player {name}");
        Ok(player)
    }

    // -----------------------------------------------------------------------
    // Game lifecycle
    // -----------------------------------------------------------------------

    pub fn start_game(
        &mut self,
        date: NaiveDate,
        team1_players: Vec<String>,
        team2_players: Vec<String>,
    ) -> ServiceResult<Game> {
        if team1_players.is_empty() || team2_players.is_empty() {
            return Err(rejected("You must select at least one player for each team."));
        }
        if team1_players.iter().any(|p| team2_players.contains(p)) {
            return Err(rejected("A player cannot be on both teams."));
        }

        let game = Game {
            game_id: format!("Game_{}", self.next_game_number),
            date,
            team1_players,
            team2_players,
            status: GameStatus::Active,
            team1_score: None,
            team2_score: None,
            ended_innings: Vec::new(),
        };
        self.store.insert_game(&game)?;
        self.next_game_number += 1;
        info!("started {}", game.game_id);
        Ok(game)
    }

    pub fn end_game(
        &self,
        game_id: &str,
        team1_score: u32,
        team2_score: u32,
    ) -> ServiceResult<Game> {
        let mut game = self.find_game(game_id)?;
        if game.status == GameStatus::Completed {
            return Err(rejected(format!("{game_id} has already been completed.")));
        }
        game.status = GameStatus::Completed;
        game.team1_score = Some(team1_score);
        game.team2_score = Some(team2_score);
        self.store.update_game(&game)?;
        info!("completed {game_id} {team1_score}-{team2_score}");
        Ok(game)
    }

    // -----------------------------------------------------------------------
    // At-bat recording
    // -----------------------------------------------------------------------

    pub fn record_at_bat(&self, entry: AtBatEntry, end_inning: bool) -> ServiceResult<AtBat> {
        let mut game = self.find_game(&entry.game_id)?;
        if game.status == GameStatus::Completed {
            return Err(rejected(format!(
                "{} is completed; no further at-bats can be recorded.",
                game.game_id
            )));
        }
        if game.open_innings().is_empty() {
            return Err(rejected("All innings have been ended for this game."));
        }
        if game.inning_ended(entry.inning) {
            return Err(rejected(format!(
                "{} has been ended and locked for {}.",
                entry.inning, game.game_id
            )));
        }
        if entry.batter == entry.pitcher {
            return Err(rejected("Batter and pitcher cannot be the same player."));
        }
        if entry.strikes > MAX_STRIKES
            || entry.balls > MAX_BALLS
            || entry.runners_on > MAX_RUNNERS_ON
            || entry.rbi > MAX_RBI
        {
            return Err(rejected("Count out of range."));
        }

        let atbat = AtBat {
            game_id: entry.game_id,
            inning: entry.inning,
            batter: entry.batter,
            pitcher: entry.pitcher,
            strikes: entry.strikes,
            balls: entry.balls,
            runners_on: entry.runners_on,
            outs_recorded: entry.outcome.outs_recorded(),
            outcome: entry.outcome,
            rbi: entry.rbi,
        };
        self.store.insert_atbat(&atbat)?;

        if end_inning && !game.inning_ended(atbat.inning) {
            game.ended_innings.push(atbat.inning);
            self.store.update_game(&game)?;
            info!("{}: ended {}", game.game_id, atbat.inning);
        }
        Ok(atbat)
    }

    /// Remove exactly the most recent at-bat of one game.
    pub fn undo_last_atbat(&self, game_id: &str) -> ServiceResult<AtBat> {
        // Surface "unknown game" ahead of "no at-bats yet".
        self.find_game(game_id)?;
        match self.store.delete_last_atbat(game_id) {
            Ok(removed) => {
                info!("{game_id}: undid at-bat by {}", removed.batter);
                Ok(removed)
            }
            Err(StoreError::NotFound(_)) => {
                Err(rejected(format!("No at-bats recorded for {game_id} yet.")))
            }
            Err(e) => Err(e.into()),
        }
    }

    // -----------------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------------

    /// Wipe all three collections. Refused unless the supplied secret matches
    /// the configured one; with no secret configured, always refused.
    pub fn reset_all(&mut self, supplied_secret: &str) -> ServiceResult<()> {
        match &self.admin_secret {
            None => return Err(rejected("No admin password is configured; reset is disabled.")),
            Some(secret) if supplied_secret != secret => {
                return Err(rejected("Incorrect password. Access denied."));
            }
            Some(_) => {}
        }
        self.store.reset_all()?;
        self.next_game_number = 1;
        info!("all league data reset");
        Ok(())
    }

    fn find_game(&self, game_id: &str) -> ServiceResult<Game> {
        self.store
            .games()?
            .into_iter()
            .find(|g| g.game_id == game_id)
            .ok_or_else(|| rejected(format!("No such game: {game_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service(secret: Option<&str>) -> (tempfile::TempDir, LeagueService) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LeagueStore::open(dir.path()).expect("open store");
        let service =
            LeagueService::open(store, secret.map(str::to_owned)).expect("open service");
        (dir, service)
    }

    fn started_game(service: &mut LeagueService) -> Game {
        service.add_player("Ava").unwrap();
        service.add_player("Ben").unwrap();
        service
            .start_game(
                NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
                vec!["Ava".into()],
                vec!["Ben".into()],
            )
            .unwrap()
    }

    fn entry(game: &Game, batter: &str, pitcher: &str) -> AtBatEntry {
        AtBatEntry {
            game_id: game.game_id.clone(),
            inning: "Top 1".parse().unwrap(),
            batter: batter.into(),
            pitcher: pitcher.into(),
            strikes: 1,
            balls: 0,
            runners_on: 0,
            outcome: Outcome::Single,
            rbi: 0,
        }
    }

    #[test]
    fn empty_and_duplicate_player_names_are_rejected() {
        let (_dir, service) = test_service(None);
        assert!(matches!(service.add_player("  "), Err(ServiceError::Rejected(_))));
        service.add_player("Ava").unwrap();
        assert!(matches!(service.add_player("Ava"), Err(ServiceError::Rejected(_))));
    }

    #[test]
    fn rosters_must_be_disjoint_and_non_empty() {
        let (_dir, mut service) = test_service(None);
        let date = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        assert!(matches!(
            service.start_game(date, vec![], vec!["Ben".into()]),
            Err(ServiceError::Rejected(_))
        ));
        assert!(matches!(
            service.start_game(date, vec!["Ava".into()], vec!["Ava".into(), "Ben".into()]),
            Err(ServiceError::Rejected(_))
        ));
    }

    #[test]
    fn game_ids_count_up_from_the_highest_existing_suffix() {
        let (dir, mut service) = test_service(None);
        let game = started_game(&mut service);
        assert_eq!(game.game_id, "Game_1");
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let second = service
            .start_game(date, vec!["Ava".into()], vec!["Ben".into()])
            .unwrap();
        assert_eq!(second.game_id, "Game_2");

        // A fresh service over the same data resumes past Game_2.
        let store = LeagueStore::open(dir.path()).unwrap();
        let mut reopened = LeagueService::open(store, None).unwrap();
        let third = reopened
            .start_game(date, vec!["Ava".into()], vec!["Ben".into()])
            .unwrap();
        assert_eq!(third.game_id, "Game_3");
    }

    #[test]
    fn batter_equal_to_pitcher_is_rejected_and_nothing_is_written() {
        let (_dir, mut service) = test_service(None);
        let game = started_game(&mut service);
        let result = service.record_at_bat(entry(&game, "Ava", "Ava"), false);
        assert!(matches!(result, Err(ServiceError::Rejected(_))));
        assert!(service.store().atbats().unwrap().is_empty());
    }

    #[test]
    fn recording_derives_outs_from_the_outcome() {
        let (_dir, mut service) = test_service(None);
        let game = started_game(&mut service);
        let mut double_play = entry(&game, "Ava", "Ben");
        double_play.outcome = Outcome::DoublePlay;
        let recorded = service.record_at_bat(double_play, false).unwrap();
        assert_eq!(recorded.outs_recorded, 2);
    }

    #[test]
    fn ending_an_inning_locks_only_that_label() {
        let (_dir, mut service) = test_service(None);
        let game = started_game(&mut service);
        service.record_at_bat(entry(&game, "Ava", "Ben"), true).unwrap();

        let stored = service.store().games().unwrap().remove(0);
        assert_eq!(stored.ended_innings, vec!["Top 1".parse().unwrap()]);
        assert_eq!(stored.open_innings().len(), 11);

        // The ended label is rejected at the write boundary...
        let again = service.record_at_bat(entry(&game, "Ava", "Ben"), false);
        assert!(matches!(again, Err(ServiceError::Rejected(_))));

        // ...while its sibling stays open.
        let mut bottom = entry(&game, "Ava", "Ben");
        bottom.inning = "Bottom 1".parse().unwrap();
        service.record_at_bat(bottom, false).unwrap();
    }

    #[test]
    fn completed_games_accept_no_further_at_bats() {
        let (_dir, mut service) = test_service(None);
        let game = started_game(&mut service);
        let ended = service.end_game(&game.game_id, 5, 3).unwrap();
        assert_eq!(ended.status, GameStatus::Completed);
        assert_eq!(ended.team1_score, Some(5));

        let result = service.record_at_bat(entry(&game, "Ava", "Ben"), false);
        assert!(matches!(result, Err(ServiceError::Rejected(_))));
        assert!(matches!(
            service.end_game(&game.game_id, 5, 3),
            Err(ServiceError::Rejected(_))
        ));
    }

    #[test]
    fn undo_removes_exactly_the_most_recent_at_bat() {
        let (_dir, mut service) = test_service(None);
        let game = started_game(&mut service);
        service.record_at_bat(entry(&game, "Ava", "Ben"), false).unwrap();
        let mut second = entry(&game, "Ben", "Ava");
        second.outcome = Outcome::Walk;
        service.record_at_bat(second, false).unwrap();

        let removed = service.undo_last_atbat(&game.game_id).unwrap();
        assert_eq!(removed.batter, "Ben");
        let remaining = service.store().atbats().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].batter, "Ava");

        service.undo_last_atbat(&game.game_id).unwrap();
        assert!(matches!(
            service.undo_last_atbat(&game.game_id),
            Err(ServiceError::Rejected(_))
        ));
    }

    #[test]
    fn reset_requires_the_configured_secret() {
        let (_dir, mut service) = test_service(Some("hunter2"));
        started_game(&mut service);

        assert!(matches!(service.reset_all("wrong"), Err(ServiceError::Rejected(_))));
        assert_eq!(service.store().games().unwrap().len(), 1);

        service.reset_all("hunter2").unwrap();
        let snapshot = service.snapshot().unwrap();
        assert!(snapshot.players.is_empty());
        assert!(snapshot.games.is_empty());

        // Counter restarts with the data.
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let game = service
            .start_game(date, vec!["Ava".into()], vec!["Ben".into()])
            .unwrap();
        assert_eq!(game.game_id, "Game_1");
    }

    #[test]
    fn reset_is_disabled_without_a_configured_secret() {
        let (_dir, mut service) = test_service(None);
        assert!(matches!(service.reset_all(""), Err(ServiceError::Rejected(_))));
    }
}
