//! Rating and ranking data structures: session records, snapshots, config.

use crate::models::fixture::FixtureId;
use crate::models::{PlayerId, TeamName};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One player's points and rating for one date played. Immutable once
/// written; the caller replaces a date's record wholesale to correct it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSessionRecord {
    pub date: NaiveDate,
    pub team: TeamName,
    pub appearance_points: u32,
    pub match_points: u32,
    pub bonus_points: u32,
    pub knockout_points: u32,
    pub total_points: u32,
    pub elo_rating_after: f64,
}

/// Derived ranking view of a player, recomputed in full from their session
/// history each time rankings are requested.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRankingSnapshot {
    pub appearances: u32,
    pub total_points: u32,
    pub raw_average: f64,
    pub weighted_average: f64,
    pub ranking_points: f64,
    pub elo_rating: f64,
}

/// One entry in the ranking order (best first).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub player_id: PlayerId,
    pub snapshot: PlayerRankingSnapshot,
}

/// Which K-factor a set of fixtures is rated with.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    League,
    Cup,
}

/// Scoring and rating knobs, fixed per league. Passed once per computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingConfig {
    /// Flat points for being on a roster that day.
    pub appearance_points: u32,
    /// Points per fixture won / drawn.
    pub win_points: u32,
    pub draw_points: u32,
    /// Points per knockout-stage match won.
    pub knockout_win_points: u32,
    /// Bonus points range for final standing (last place gets the floor).
    pub bonus_floor: u32,
    pub bonus_ceiling: u32,
    /// Appearances needed before a player's average counts unweighted.
    pub confidence_threshold: u32,
    /// Starting ELO rating for new players, and the decay baseline.
    pub initial_rating: f64,
    /// K-factor for league fixtures / for knockout (cup) fixtures.
    pub k_league: f64,
    pub k_cup: f64,
    /// Fraction of the distance to baseline lost per full inactive week.
    pub weekly_decay: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            appearance_points: 1,
            win_points: 3,
            draw_points: 1,
            knockout_win_points: 3,
            bonus_floor: 2,
            bonus_ceiling: 8,
            confidence_threshold: 5,
            initial_rating: 1000.0,
            k_league: 10.0,
            k_cup: 7.0,
            weekly_decay: 0.02,
        }
    }
}

/// A fixture or record that could not contribute to rating computation.
/// Surfaced to the caller and logged; never aborts the computation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RatingWarning {
    /// Non-bye fixture with one or both scores missing.
    MissingScore { fixture: FixtureId },
    /// Non-bye fixture missing a team on one side.
    MalformedFixture { fixture: FixtureId },
    /// Fixture names a team with no roster that day.
    UnknownTeam { fixture: FixtureId, team: TeamName },
    /// Fixture team has an empty roster.
    EmptyRoster { fixture: FixtureId, team: TeamName },
    /// A goal is credited to a player not on the scoring team's roster.
    UnknownScorer { fixture: FixtureId, player: PlayerId },
}

impl std::fmt::Display for RatingWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingWarning::MissingScore { fixture } => {
                write!(f, "Fixture {} skipped: score not fully entered", fixture)
            }
            RatingWarning::MalformedFixture { fixture } => {
                write!(f, "Fixture {} skipped: missing a team", fixture)
            }
            RatingWarning::UnknownTeam { fixture, team } => {
                write!(f, "Fixture {} skipped: no roster for team '{}'", fixture, team)
            }
            RatingWarning::EmptyRoster { fixture, team } => {
                write!(f, "Fixture {} skipped: team '{}' has an empty roster", fixture, team)
            }
            RatingWarning::UnknownScorer { fixture, player } => {
                write!(
                    f,
                    "Fixture {}: scorer '{}' is not on the team's roster",
                    fixture, player
                )
            }
        }
    }
}

/// Result of an ELO update pass: new ratings plus any skipped-record notes.
#[derive(Clone, Debug, PartialEq)]
pub struct EloUpdate {
    pub ratings: HashMap<PlayerId, f64>,
    pub warnings: Vec<RatingWarning>,
}
