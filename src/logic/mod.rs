//! Competition logic: scheduling, allocation, scoring, ranking, ratings.

mod allocation;
mod elo;
mod ranking;
mod schedule;
mod scoring;

pub use allocation::{allocate, configurations_for, BASELINE_QUALITY};
pub use elo::{apply_weekly_decay, update_elo};
pub use ranking::{compute_rankings, rank_movements};
pub use schedule::{
    extend_schedule, generate_double_round_robin, generate_schedule, schedule_status,
};
pub use scoring::{league_table, score_session, scorer_warnings};
