//! Ranking: confidence-weighted ranking points from full session history.

use crate::logic::elo::apply_weekly_decay;
use crate::models::{
    PlayerId, PlayerRankingSnapshot, PlayerSessionRecord, RankingEntry, RatingConfig,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Recompute every player's ranking snapshot from their full history.
///
/// `raw_average` is all-time points per appearance. Below the confidence
/// threshold, the average is pulled toward the league-wide average by
/// `(threshold - appearances) / threshold`, so small samples cannot produce
/// extreme seeds. Ranking points multiply the weighted average by the
/// league's maximum appearance count, making the figure comparable across
/// players with different attendance.
///
/// Order: ranking points descending, total points descending, then player id
/// ascending. Players with no sessions are omitted. The snapshot's ELO
/// rating is the last recorded rating with inactivity decay applied up to
/// `as_of`.
pub fn compute_rankings(
    history: &HashMap<PlayerId, Vec<PlayerSessionRecord>>,
    as_of: NaiveDate,
    config: &RatingConfig,
) -> Vec<RankingEntry> {
    struct PlayerTotals<'a> {
        player_id: &'a PlayerId,
        appearances: u32,
        total_points: u32,
        last_record: &'a PlayerSessionRecord,
    }

    let mut totals: Vec<PlayerTotals<'_>> = Vec::with_capacity(history.len());
    let mut league_points: u64 = 0;
    let mut league_appearances: u64 = 0;
    let mut max_appearances: u32 = 0;

    for (player_id, records) in history {
        // Records are appended chronologically, but take the latest by date
        // in case the caller rewrote one out of order.
        let Some(last_record) = records.iter().max_by_key(|r| r.date) else {
            continue;
        };
        let appearances = records.len() as u32;
        let total_points: u32 = records.iter().map(|r| r.total_points).sum();
        league_points += u64::from(total_points);
        league_appearances += u64::from(appearances);
        max_appearances = max_appearances.max(appearances);
        totals.push(PlayerTotals {
            player_id,
            appearances,
            total_points,
            last_record,
        });
    }

    if league_appearances == 0 {
        return Vec::new();
    }
    let global_average = league_points as f64 / league_appearances as f64;

    let mut entries: Vec<RankingEntry> = totals
        .into_iter()
        .map(|t| {
            let raw_average = f64::from(t.total_points) / f64::from(t.appearances);
            let weighted_average = if t.appearances >= config.confidence_threshold {
                raw_average
            } else {
                let pull = f64::from(config.confidence_threshold - t.appearances)
                    / f64::from(config.confidence_threshold);
                raw_average + (global_average - raw_average) * pull
            };
            let ranking_points = weighted_average * f64::from(max_appearances);
            let elo_rating = apply_weekly_decay(
                t.last_record.elo_rating_after,
                t.last_record.date,
                as_of,
                config,
            );
            RankingEntry {
                player_id: t.player_id.clone(),
                snapshot: PlayerRankingSnapshot {
                    appearances: t.appearances,
                    total_points: t.total_points,
                    raw_average,
                    weighted_average,
                    ranking_points,
                    elo_rating,
                },
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.snapshot
            .ranking_points
            .partial_cmp(&a.snapshot.ranking_points)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.snapshot.total_points.cmp(&a.snapshot.total_points))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    entries
}

/// Rank movement between two ranking orderings: `previous_rank -
/// current_rank`, positive meaning the player moved up. Players absent from
/// the previous ordering report no movement.
pub fn rank_movements(
    previous: &[PlayerId],
    current: &[PlayerId],
) -> HashMap<PlayerId, i64> {
    let previous_rank: HashMap<&PlayerId, usize> = previous
        .iter()
        .enumerate()
        .map(|(index, player)| (player, index))
        .collect();
    current
        .iter()
        .enumerate()
        .filter_map(|(index, player)| {
            previous_rank
                .get(player)
                .map(|&prev| (player.clone(), prev as i64 - index as i64))
        })
        .collect()
}
