//! Data structures for the competition engine: fixtures, teams, ratings.

mod fixture;
mod rating;
mod team;

pub use fixture::{Fixture, FixtureId, Round, ScheduleError, ScheduleStatus};
pub use rating::{
    EloUpdate, MatchType, PlayerRankingSnapshot, PlayerSessionRecord, RankingEntry, RatingConfig,
    RatingWarning,
};
pub use team::{
    Allocation, AllocationMethod, AllocationStep, TableRow, TeamBounds, TeamConfiguration,
    TeamError,
};

/// Identifier for a player, as supplied by the caller's roster.
pub type PlayerId = String;

/// Identifier for a team taking part in a schedule.
pub type TeamId = String;

/// Display name of an allocated team (generated, unique within a session).
pub type TeamName = String;
