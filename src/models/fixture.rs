//! Fixture, Round, and schedule-level status.

use crate::models::{PlayerId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a fixture (used for score entry and lookups).
pub type FixtureId = Uuid;

/// A single fixture between two teams, or a bye slot for one team.
///
/// Created with null scores by the scheduler; scores are entered later by the
/// caller (both or neither). A bye has exactly one of home/away set and is
/// never scored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub home: Option<TeamId>,
    pub away: Option<TeamId>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// Goals per player on the home side, once entered.
    pub home_scorers: Option<HashMap<PlayerId, u32>>,
    pub away_scorers: Option<HashMap<PlayerId, u32>>,
    pub is_bye: bool,
}

impl Fixture {
    /// New unscored fixture. Marks itself as a bye when exactly one side is set.
    pub fn new(home: Option<TeamId>, away: Option<TeamId>) -> Self {
        let is_bye = home.is_none() != away.is_none();
        Self {
            id: Uuid::new_v4(),
            home,
            away,
            home_score: None,
            away_score: None,
            home_scorers: None,
            away_scorers: None,
            is_bye,
        }
    }

    /// Whether both scores have been entered (byes are never played).
    pub fn is_played(&self) -> bool {
        !self.is_bye && self.home_score.is_some() && self.away_score.is_some()
    }

    /// Second-leg copy: home/away swapped, fresh id, no scores.
    /// Byes keep their single side as-is.
    pub fn reversed(&self) -> Self {
        if self.is_bye {
            Self::new(self.home.clone(), self.away.clone())
        } else {
            Self::new(self.away.clone(), self.home.clone())
        }
    }
}

/// One scheduling cycle's worth of fixtures played concurrently. Append-only.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub fixtures: Vec<Fixture>,
}

/// Progress of a schedule: how many non-bye fixtures have both scores entered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStatus {
    pub is_complete: bool,
    pub played_count: usize,
    pub total_count: usize,
}

/// Errors that can occur while generating a schedule. Caller-input errors:
/// detected synchronously, never retried, no partial output.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// Need at least 2 teams to schedule fixtures.
    NotEnoughTeams,
    /// The same team id appears more than once.
    DuplicateTeam(TeamId),
    /// A team id is empty or whitespace-only.
    EmptyTeamName,
}

impl ScheduleError {
    /// HTTP-style status hint for the (external) transport layer to surface.
    pub fn status_hint(&self) -> u16 {
        400
    }
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::NotEnoughTeams => {
                write!(f, "Need at least 2 teams to generate a schedule")
            }
            ScheduleError::DuplicateTeam(team) => {
                write!(f, "Team '{}' appears more than once", team)
            }
            ScheduleError::EmptyTeamName => write!(f, "Team ids must be non-empty"),
        }
    }
}
