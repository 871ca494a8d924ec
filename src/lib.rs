//! Competition computation engine for recurring amateur sports sessions:
//! round-robin fixture scheduling, constrained team allocation, and a
//! rating/ranking system (points accounting + ELO).
//!
//! The engine is pure computation over in-memory inputs: no I/O, no shared
//! state, nothing to cancel. Storage, transport, and access control belong
//! to the caller, which persists the returned structures and feeds them back
//! in as input. Randomized operations take an `rand::Rng` so tests can pass
//! a seeded generator.

pub mod logic;
pub mod models;

pub use logic::{
    allocate, apply_weekly_decay, compute_rankings, configurations_for, extend_schedule,
    generate_double_round_robin, generate_schedule, league_table, rank_movements,
    schedule_status, score_session, scorer_warnings, update_elo, BASELINE_QUALITY,
};
pub use models::{
    Allocation, AllocationMethod, AllocationStep, EloUpdate, Fixture, FixtureId, MatchType,
    PlayerId, PlayerRankingSnapshot, PlayerSessionRecord, RankingEntry, RatingConfig,
    RatingWarning, Round, ScheduleError, ScheduleStatus, TableRow, TeamBounds,
    TeamConfiguration, TeamError, TeamId, TeamName,
};
