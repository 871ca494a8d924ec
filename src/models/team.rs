//! Team configuration, allocation results, and the league table row.

use crate::models::{PlayerId, TeamName};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// League-configured limits on how players may be split into teams.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamBounds {
    pub min_teams: usize,
    pub max_teams: usize,
    pub min_players_per_team: usize,
    pub max_players_per_team: usize,
}

/// A candidate partition of the eligible players into teams.
/// `team_sizes` sums to the eligible player count exactly; sizes are
/// non-increasing (teams earlier in the list absorb the remainder).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamConfiguration {
    pub team_count: usize,
    pub team_sizes: Vec<usize>,
}

/// How players are assigned to teams.
#[derive(Clone, Copy, Debug)]
pub enum AllocationMethod<'a> {
    /// Uniform shuffle, no skill signal.
    Random,
    /// Snake draft by descending quality score (ELO rating per player).
    /// Unrated players draft at `baseline`; pass the league's configured
    /// initial rating so seeding matches the rating engine.
    Seeded {
        ratings: &'a HashMap<PlayerId, f64>,
        baseline: f64,
    },
}

/// One assignment decision in draft order, recorded so a caller can replay
/// the draft visually. Never read back by the allocator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocationStep {
    pub player_id: PlayerId,
    pub team_name: TeamName,
    pub step_index: usize,
    /// Quality score as seen when the pick was made (0.0 in random mode).
    pub quality_score: f64,
}

/// Result of a team allocation: rosters by generated team name, plus the
/// optional audit trail when history recording was requested.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub teams: HashMap<TeamName, Vec<PlayerId>>,
    pub history: Option<Vec<AllocationStep>>,
}

/// One team's row in the league table for a session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub team: TeamName,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl TableRow {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// Errors that can occur during allocation or session scoring.
/// Caller-input errors: detected synchronously, never retried.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TeamError {
    /// Fewer than 2 teams requested.
    NotEnoughTeams,
    /// Requested team count falls outside the league bounds.
    TeamCountOutOfBounds {
        team_count: usize,
        min_teams: usize,
        max_teams: usize,
    },
    /// The size list does not have one entry per team.
    MalformedConfiguration { team_count: usize, size_count: usize },
    /// Team sizes do not sum to the roster length.
    SizesDoNotMatchRoster { expected: usize, actual: usize },
    /// A player id appears more than once in the roster.
    DuplicatePlayer(PlayerId),
    /// A standings entry names a team not playing that day.
    UnknownTeam(TeamName),
    /// A team playing that day has no standings position.
    MissingStanding(TeamName),
}

impl TeamError {
    /// HTTP-style status hint for the (external) transport layer to surface.
    pub fn status_hint(&self) -> u16 {
        400
    }
}

impl std::fmt::Display for TeamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamError::NotEnoughTeams => write!(f, "Need at least 2 teams"),
            TeamError::TeamCountOutOfBounds {
                team_count,
                min_teams,
                max_teams,
            } => write!(
                f,
                "Team count {} outside configured bounds [{}, {}]",
                team_count, min_teams, max_teams
            ),
            TeamError::MalformedConfiguration {
                team_count,
                size_count,
            } => write!(
                f,
                "Configuration lists {} sizes for {} teams",
                size_count, team_count
            ),
            TeamError::SizesDoNotMatchRoster { expected, actual } => write!(
                f,
                "Team sizes sum to {} but the roster has {} players",
                expected, actual
            ),
            TeamError::DuplicatePlayer(player) => {
                write!(f, "Player '{}' appears more than once", player)
            }
            TeamError::UnknownTeam(team) => {
                write!(f, "Team '{}' is not playing on this date", team)
            }
            TeamError::MissingStanding(team) => {
                write!(f, "Team '{}' has no standings position", team)
            }
        }
    }
}
