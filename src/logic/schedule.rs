//! Fixture scheduling: double round-robin generation via the circle method.

use crate::models::{Fixture, Round, ScheduleError, ScheduleStatus, TeamId};
use rand::Rng;
use std::collections::HashSet;

/// Generate a double round-robin schedule for the given teams.
///
/// 1. Pad with a bye slot when the team count is odd.
/// 2. Rotate the working list by `anchor_index` so the same teams do not
///    always meet in round one.
/// 3. Circle method: for `n-1` rounds, pair position `i` with `n-1-i`, then
///    keep position 0 fixed and rotate the rest by one. Home/away flips with
///    round parity, and odd rounds shift the match order by one so the
///    displayed pairings alternate too.
/// 4. Append the second leg: every first-leg fixture with home/away swapped.
pub fn generate_double_round_robin(
    team_ids: &[TeamId],
    anchor_index: usize,
) -> Result<Vec<Round>, ScheduleError> {
    validate_team_ids(team_ids)?;

    let mut slots: Vec<Option<TeamId>> = team_ids.iter().cloned().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();
    slots.rotate_left(anchor_index % n);

    let mut first_leg: Vec<Round> = Vec::with_capacity(n - 1);
    for round_index in 0..n - 1 {
        let mut fixtures = Vec::with_capacity(n / 2);
        for i in 0..n / 2 {
            let a = slots[i].clone();
            let b = slots[n - 1 - i].clone();
            let fixture = if round_index % 2 == 0 {
                Fixture::new(a, b)
            } else {
                Fixture::new(b, a)
            };
            fixtures.push(fixture);
        }
        if round_index % 2 == 1 {
            fixtures.rotate_left(1);
        }
        first_leg.push(Round { fixtures });

        // Keep slot 0 fixed, rotate all others by one position.
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    let second_leg: Vec<Round> = first_leg
        .iter()
        .map(|round| Round {
            fixtures: round.fixtures.iter().map(Fixture::reversed).collect(),
        })
        .collect();

    let mut rounds = first_leg;
    rounds.extend(second_leg);
    Ok(rounds)
}

/// Generate a schedule with the given anchor, or a random one when `None`.
/// Returns the anchor used so the schedule can be reproduced or extended.
pub fn generate_schedule(
    team_ids: &[TeamId],
    anchor: Option<usize>,
    rng: &mut impl Rng,
) -> Result<(Vec<Round>, usize), ScheduleError> {
    validate_team_ids(team_ids)?;
    let anchor_index = match anchor {
        Some(index) => index,
        None => rng.gen_range(0..team_ids.len()),
    };
    let rounds = generate_double_round_robin(team_ids, anchor_index)?;
    Ok((rounds, anchor_index))
}

/// Append one more full double round-robin cycle to an existing schedule.
/// Strict append: the existing rounds (and any recorded scores) come back
/// unchanged as the prefix of the result.
pub fn extend_schedule(
    existing: &[Round],
    team_ids: &[TeamId],
    anchor_index: usize,
) -> Result<Vec<Round>, ScheduleError> {
    let extra = generate_double_round_robin(team_ids, anchor_index)?;
    let mut rounds = existing.to_vec();
    rounds.extend(extra);
    Ok(rounds)
}

/// Count played and total fixtures across the schedule. Byes are excluded
/// from both counts; an empty schedule is never complete.
pub fn schedule_status(rounds: &[Round]) -> ScheduleStatus {
    let mut played_count = 0;
    let mut total_count = 0;
    for round in rounds {
        for fixture in &round.fixtures {
            if fixture.is_bye {
                continue;
            }
            total_count += 1;
            if fixture.is_played() {
                played_count += 1;
            }
        }
    }
    ScheduleStatus {
        is_complete: total_count > 0 && played_count == total_count,
        played_count,
        total_count,
    }
}

fn validate_team_ids(team_ids: &[TeamId]) -> Result<(), ScheduleError> {
    if team_ids.len() < 2 {
        return Err(ScheduleError::NotEnoughTeams);
    }
    let mut seen = HashSet::new();
    for id in team_ids {
        if id.trim().is_empty() {
            return Err(ScheduleError::EmptyTeamName);
        }
        if !seen.insert(id) {
            return Err(ScheduleError::DuplicateTeam(id.clone()));
        }
    }
    Ok(())
}
