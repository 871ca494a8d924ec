//! Session scoring: per-player points from a day's fixtures and standings,
//! and the league table the standings come from.

use crate::models::{
    Fixture, PlayerId, PlayerSessionRecord, RatingConfig, RatingWarning, TableRow, TeamError,
    TeamName,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Compute every rostered player's points record for one session date.
///
/// Appearance points are flat; match points come from the player's team's
/// league fixtures (win/draw/loss); bonus points from the team's final
/// standing; knockout points from knockout fixtures won. Byes and unscored
/// fixtures contribute nothing. `standings` lists team names best-first and
/// must cover exactly the teams playing that day. `elo_after` carries each
/// player's post-session rating for the record (defaults to the initial
/// rating for players never rated).
pub fn score_session(
    date: NaiveDate,
    league_fixtures: &[Fixture],
    knockout_fixtures: &[Fixture],
    teams_of_day: &HashMap<TeamName, Vec<PlayerId>>,
    standings: &[TeamName],
    elo_after: &HashMap<PlayerId, f64>,
    config: &RatingConfig,
) -> Result<HashMap<PlayerId, PlayerSessionRecord>, TeamError> {
    for team in standings {
        if !teams_of_day.contains_key(team) {
            return Err(TeamError::UnknownTeam(team.clone()));
        }
    }

    let team_count = standings.len();
    let mut records: HashMap<PlayerId, PlayerSessionRecord> = HashMap::new();

    for (team_name, roster) in teams_of_day {
        let position = standings
            .iter()
            .position(|t| t == team_name)
            .ok_or_else(|| TeamError::MissingStanding(team_name.clone()))?
            + 1;

        let (wins, draws, _losses) = team_results(league_fixtures, team_name);
        let match_points = wins * config.win_points + draws * config.draw_points;
        let bonus_points = bonus_for_position(position, team_count, config);
        let (knockout_wins, _, _) = team_results(knockout_fixtures, team_name);
        let knockout_points = knockout_wins * config.knockout_win_points;
        let total_points =
            config.appearance_points + match_points + bonus_points + knockout_points;

        for player_id in roster {
            if records.contains_key(player_id) {
                return Err(TeamError::DuplicatePlayer(player_id.clone()));
            }
            records.insert(
                player_id.clone(),
                PlayerSessionRecord {
                    date,
                    team: team_name.clone(),
                    appearance_points: config.appearance_points,
                    match_points,
                    bonus_points,
                    knockout_points,
                    total_points,
                    elo_rating_after: elo_after
                        .get(player_id)
                        .copied()
                        .unwrap_or(config.initial_rating),
                },
            );
        }
    }

    Ok(records)
}

/// Bonus points for a final standing: floor for last place, two more per
/// place gained, more teams raising the ceiling. Bounded to the configured
/// range (2-8 at defaults), monotonic in both position and team count.
fn bonus_for_position(position: usize, team_count: usize, config: &RatingConfig) -> u32 {
    let places_above_last = team_count.saturating_sub(position) as u32;
    (config.bonus_floor + 2 * places_above_last).min(config.bonus_ceiling)
}

/// (wins, draws, losses) for one team across played, non-bye fixtures.
fn team_results(fixtures: &[Fixture], team: &TeamName) -> (u32, u32, u32) {
    let mut wins = 0;
    let mut draws = 0;
    let mut losses = 0;
    for fixture in fixtures {
        if !fixture.is_played() {
            continue;
        }
        let (home_score, away_score) = match (fixture.home_score, fixture.away_score) {
            (Some(h), Some(a)) => (h, a),
            _ => continue,
        };
        let (scored, conceded) = if fixture.home.as_ref() == Some(team) {
            (home_score, away_score)
        } else if fixture.away.as_ref() == Some(team) {
            (away_score, home_score)
        } else {
            continue;
        };
        if scored > conceded {
            wins += 1;
        } else if scored == conceded {
            draws += 1;
        } else {
            losses += 1;
        }
    }
    (wins, draws, losses)
}

/// Build the league table from scored league fixtures: points, then goal
/// difference, then goals scored, then name. Byes and unscored fixtures are
/// ignored.
pub fn league_table(fixtures: &[Fixture], config: &RatingConfig) -> Vec<TableRow> {
    let mut rows: HashMap<TeamName, TableRow> = HashMap::new();
    for fixture in fixtures {
        if !fixture.is_played() {
            continue;
        }
        let (home, away) = match (&fixture.home, &fixture.away) {
            (Some(h), Some(a)) => (h, a),
            _ => continue,
        };
        let (home_score, away_score) = match (fixture.home_score, fixture.away_score) {
            (Some(h), Some(a)) => (h, a),
            _ => continue,
        };
        update_row(&mut rows, home, home_score, away_score, config);
        update_row(&mut rows, away, away_score, home_score, config);
    }

    let mut table: Vec<TableRow> = rows.into_values().collect();
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.team.cmp(&b.team))
    });
    table
}

fn update_row(
    rows: &mut HashMap<TeamName, TableRow>,
    team: &TeamName,
    scored: u32,
    conceded: u32,
    config: &RatingConfig,
) {
    let row = rows.entry(team.clone()).or_insert_with(|| TableRow {
        team: team.clone(),
        played: 0,
        won: 0,
        drawn: 0,
        lost: 0,
        goals_for: 0,
        goals_against: 0,
        points: 0,
    });
    row.played += 1;
    row.goals_for += scored;
    row.goals_against += conceded;
    if scored > conceded {
        row.won += 1;
        row.points += config.win_points;
    } else if scored == conceded {
        row.drawn += 1;
        row.points += config.draw_points;
    } else {
        row.lost += 1;
    }
}

/// Cross-check entered scorer maps against the day's rosters. Goals credited
/// to players not on the scoring team's roster are surfaced as warnings;
/// they never affect points.
pub fn scorer_warnings(
    fixtures: &[Fixture],
    teams_of_day: &HashMap<TeamName, Vec<PlayerId>>,
) -> Vec<RatingWarning> {
    let mut warnings = Vec::new();
    for fixture in fixtures {
        let sides = [
            (&fixture.home, &fixture.home_scorers),
            (&fixture.away, &fixture.away_scorers),
        ];
        for (team, scorers) in sides {
            let (Some(team), Some(scorers)) = (team, scorers) else {
                continue;
            };
            let Some(roster) = teams_of_day.get(team) else {
                continue;
            };
            for player in scorers.keys() {
                if !roster.contains(player) {
                    log::warn!(
                        "fixture {}: scorer '{}' not on roster of '{}'",
                        fixture.id,
                        player,
                        team
                    );
                    warnings.push(RatingWarning::UnknownScorer {
                        fixture: fixture.id,
                        player: player.clone(),
                    });
                }
            }
        }
    }
    warnings
}
