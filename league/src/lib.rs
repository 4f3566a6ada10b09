pub mod seed;
pub mod service;
pub mod stats;
pub mod store;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Innings per game. A game holds Top/Bottom halves of innings 1..=6.
pub const INNINGS_PER_GAME: u8 = 6;

pub const MAX_STRIKES: u8 = 3;
pub const MAX_BALLS: u8 = 4;
pub const MAX_RUNNERS_ON: u8 = 3;
pub const MAX_RBI: u8 = 4;

// ---------------------------------------------------------------------------
// Domain types — one struct per stored document kind
// ---------------------------------------------------------------------------

/// A league member. Identity is the exact name, case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    pub date: NaiveDate,
    pub team1_players: Vec<String>,
    pub team2_players: Vec<String>,
    pub status: GameStatus,
    /// Final scores, set by the end-game action. None while the game is active.
    #[serde(default)]
    pub team1_score: Option<u32>,
    #[serde(default)]
    pub team2_score: Option<u32>,
    /// Half-innings closed to further at-bats, in the order they were ended.
    #[serde(default)]
    pub ended_innings: Vec<InningLabel>,
}

/// Which roster won a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Team1,
    Team2,
    Draw,
}

impl Game {
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    pub fn inning_ended(&self, label: InningLabel) -> bool {
        self.ended_innings.contains(&label)
    }

    /// Labels still accepting at-bats, in scorebook order (Top 1, Bottom 1, ...).
    pub fn open_innings(&self) -> Vec<InningLabel> {
        InningLabel::all().filter(|l| !self.inning_ended(*l)).collect()
    }

    /// Which side of the game a player is on, if any.
    pub fn side_of(&self, player: &str) -> Option<Decision> {
        if self.team1_players.iter().any(|p| p == player) {
            Some(Decision::Team1)
        } else if self.team2_players.iter().any(|p| p == player) {
            Some(Decision::Team2)
        } else {
            None
        }
    }

    /// Game result for a completed game. Missing scores count as 0, matching
    /// how older imported rows are read.
    pub fn decision(&self) -> Option<Decision> {
        if self.status != GameStatus::Completed {
            return None;
        }
        let team1 = self.team1_score.unwrap_or(0);
        let team2 = self.team2_score.unwrap_or(0);
        Some(if team1 > team2 {
            Decision::Team1
        } else if team2 > team1 {
            Decision::Team2
        } else {
            Decision::Draw
        })
    }
}

// ---------------------------------------------------------------------------
// Inning labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Half {
    Top,
    Bottom,
}

impl Half {
    pub fn label(&self) -> &'static str {
        match self {
            Half::Top => "Top",
            Half::Bottom => "Bottom",
        }
    }
}

/// One half-inning within a game, e.g. "Top 3". Stored as that string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InningLabel {
    pub half: Half,
    pub number: u8,
}

impl InningLabel {
    pub fn new(half: Half, number: u8) -> Self {
        Self { half, number }
    }

    /// All 12 labels in play order: Top 1, Bottom 1, Top 2, ...
    pub fn all() -> impl Iterator<Item = InningLabel> {
        (1..=INNINGS_PER_GAME)
            .flat_map(|n| [Half::Top, Half::Bottom].into_iter().map(move |h| InningLabel::new(h, n)))
    }
}

impl Ord for InningLabel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let rank = |l: &InningLabel| (l.number, matches!(l.half, Half::Bottom) as u8);
        rank(self).cmp(&rank(other))
    }
}

impl PartialOrd for InningLabel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for InningLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.half.label(), self.number)
    }
}

/// Error for wire labels that don't match any known value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLabelError {
    pub what: &'static str,
    pub value: String,
}

impl fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a valid {}: {:?}", self.what, self.value)
    }
}

impl std::error::Error for ParseLabelError {}

impl FromStr for InningLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLabelError { what: "inning label", value: s.to_owned() };
        let (half, number) = s.trim().split_once(' ').ok_or_else(err)?;
        let half = match half {
            "Top" => Half::Top,
            "Bottom" => Half::Bottom,
            _ => return Err(err()),
        };
        let number: u8 = number.trim().parse().map_err(|_| err())?;
        if number == 0 || number > INNINGS_PER_GAME {
            return Err(err());
        }
        Ok(InningLabel::new(half, number))
    }
}

impl Serialize for InningLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InningLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// At-bat outcomes and their derivation rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Single,
    Double,
    Triple,
    HomeRun,
    GroundOut,
    PopOut,
    LineOut,
    StrikeOut,
    Walk,
    FieldersChoice,
    SacrificeFly,
    DoublePlay,
    TriplePlay,
}

impl Outcome {
    pub const ALL: [Outcome; 13] = [
        Outcome::Single,
        Outcome::Double,
        Outcome::Triple,
        Outcome::HomeRun,
        Outcome::GroundOut,
        Outcome::PopOut,
        Outcome::LineOut,
        Outcome::StrikeOut,
        Outcome::Walk,
        Outcome::FieldersChoice,
        Outcome::SacrificeFly,
        Outcome::DoublePlay,
        Outcome::TriplePlay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Single => "Single",
            Outcome::Double => "Double",
            Outcome::Triple => "Triple",
            Outcome::HomeRun => "Home Run",
            Outcome::GroundOut => "Ground Out",
            Outcome::PopOut => "Pop Out",
            Outcome::LineOut => "Line Out",
            Outcome::StrikeOut => "Strike Out",
            Outcome::Walk => "Walk",
            Outcome::FieldersChoice => "Fielder's Choice",
            Outcome::SacrificeFly => "Sacrifice Fly",
            Outcome::DoublePlay => "Double Play",
            Outcome::TriplePlay => "Triple Play",
        }
    }

    /// Outs charged to the defense for this outcome.
    pub fn outs_recorded(&self) -> u8 {
        match self {
            Outcome::GroundOut
            | Outcome::PopOut
            | Outcome::LineOut
            | Outcome::StrikeOut
            | Outcome::FieldersChoice
            | Outcome::SacrificeFly => 1,
            Outcome::DoublePlay => 2,
            Outcome::TriplePlay => 3,
            Outcome::Single
            | Outcome::Double
            | Outcome::Triple
            | Outcome::HomeRun
            | Outcome::Walk => 0,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Single | Outcome::Double | Outcome::Triple | Outcome::HomeRun)
    }

    /// Whether the scorebook lets the RBI count be adjusted for this outcome.
    /// Everything else records a fixed 0.
    pub fn rbi_is_editable(&self) -> bool {
        matches!(
            self,
            Outcome::Single
                | Outcome::Double
                | Outcome::Triple
                | Outcome::HomeRun
                | Outcome::SacrificeFly
                | Outcome::FieldersChoice
                | Outcome::Walk
                | Outcome::GroundOut
        )
    }

    /// Suggested RBI count before the scorer adjusts it. A home run clears
    /// the bases, so it drives in the batter plus every runner on.
    pub fn default_rbi(&self, runners_on: u8) -> u8 {
        match self {
            Outcome::HomeRun => 1 + runners_on,
            _ => 0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Outcome {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Outcome::ALL
            .into_iter()
            .find(|o| o.label() == s.trim())
            .ok_or_else(|| ParseLabelError { what: "outcome", value: s.to_owned() })
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// At-bats
// ---------------------------------------------------------------------------

/// One plate appearance. Append-only; only the most recent at-bat of a game
/// may be removed again (the undo action).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtBat {
    pub game_id: String,
    pub inning: InningLabel,
    pub batter: String,
    pub pitcher: String,
    pub strikes: u8,
    pub balls: u8,
    pub runners_on: u8,
    pub outcome: Outcome,
    /// Derived from the outcome; persisted so the stored document is complete
    /// on its own.
    pub outs_recorded: u8,
    pub rbi: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inning_labels_round_trip_wire_form() {
        for label in InningLabel::all() {
            let parsed: InningLabel = label.to_string().parse().unwrap();
            assert_eq!(parsed, label);
        }
        assert!("Middle 3".parse::<InningLabel>().is_err());
        assert!("Top 7".parse::<InningLabel>().is_err());
        assert!("Top".parse::<InningLabel>().is_err());
    }

    #[test]
    fn inning_labels_follow_play_order() {
        let all: Vec<InningLabel> = InningLabel::all().collect();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0].to_string(), "Top 1");
        assert_eq!(all[1].to_string(), "Bottom 1");
        assert_eq!(all[11].to_string(), "Bottom 6");
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(sorted, all);
    }

    #[test]
    fn outcomes_round_trip_wire_form() {
        for outcome in Outcome::ALL {
            let parsed: Outcome = outcome.label().parse().unwrap();
            assert_eq!(parsed, outcome);
        }
        assert!("Bunt".parse::<Outcome>().is_err());
    }

    #[test]
    fn hits_and_walks_record_no_outs() {
        for outcome in [Outcome::Single, Outcome::Double, Outcome::Triple, Outcome::HomeRun, Outcome::Walk] {
            assert_eq!(outcome.outs_recorded(), 0);
        }
        assert_eq!(Outcome::StrikeOut.outs_recorded(), 1);
        assert_eq!(Outcome::DoublePlay.outs_recorded(), 2);
        assert_eq!(Outcome::TriplePlay.outs_recorded(), 3);
    }

    #[test]
    fn home_run_default_rbi_counts_batter_plus_runners() {
        assert_eq!(Outcome::HomeRun.default_rbi(0), 1);
        assert_eq!(Outcome::HomeRun.default_rbi(3), 4);
        assert_eq!(Outcome::Double.default_rbi(3), 0);
    }

    #[test]
    fn fixed_rbi_outcomes_are_not_editable() {
        assert!(!Outcome::StrikeOut.rbi_is_editable());
        assert!(!Outcome::DoublePlay.rbi_is_editable());
        assert!(Outcome::Walk.rbi_is_editable());
        assert!(Outcome::GroundOut.rbi_is_editable());
    }

    #[test]
    fn open_innings_shrink_as_labels_end() {
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
        assert_eq!(game.open_innings().len(), 12);

        let top1: InningLabel = "Top 1".parse().unwrap();
        game.ended_innings.push(top1);
        assert!(game.inning_ended(top1));
        assert!(!game.inning_ended("Bottom 1".parse().unwrap()));
        assert_eq!(game.open_innings().len(), 11);
    }

    #[test]
    fn decision_compares_final_scores() {
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
        assert_eq!(game.decision(), None);

        game.status = GameStatus::Completed;
        game.team1_score = Some(5);
        game.team2_score = Some(3);
        assert_eq!(game.decision(), Some(Decision::Team1));

        game.team2_score = Some(5);
        assert_eq!(game.decision(), Some(Decision::Draw));
    }

    #[test]
    fn atbat_documents_keep_the_original_wire_shape() {
        let atbat = AtBat {
            game_id: "Game_2".into(),
            inning: "Bottom 4".parse().unwrap(),
            batter: "Ava".into(),
            pitcher: "Ben".into(),
            strikes: 2,
            balls: 1,
            runners_on: 2,
            outcome: Outcome::HomeRun,
            outs_recorded: 0,
            rbi: 3,
        };
        let doc = serde_json::to_value(&atbat).unwrap();
        assert_eq!(doc["inning"], "Bottom 4");
        assert_eq!(doc["outcome"], "Home Run");
        let back: AtBat = serde_json::from_value(doc).unwrap();
        assert_eq!(back, atbat);
    }
}
