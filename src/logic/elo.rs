//! ELO skill ratings: per-fixture updates from team results, plus the
//! inactivity decay applied when ratings are next recomputed.

use crate::models::{
    EloUpdate, Fixture, MatchType, PlayerId, RatingConfig, RatingWarning, TeamName,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Update player ratings from one session's fixtures.
///
/// A side's effective rating is the mean of its roster's individual ratings
/// (initial rating for unrated players). Expected home score is
/// `1 / (1 + 10^((away - home) / 400))`; actual is 1.0 win, 0.5 draw, 0.0
/// loss. Every player on a side receives the same delta,
/// `K * (actual - expected)`, with K per the match type.
///
/// Malformed fixtures (missing score, unknown team, empty roster) are
/// skipped with a warning so one bad record cannot block rating the rest of
/// the league.
pub fn update_elo(
    prior: &HashMap<PlayerId, f64>,
    fixtures: &[Fixture],
    teams_of_day: &HashMap<TeamName, Vec<PlayerId>>,
    match_type: MatchType,
    config: &RatingConfig,
) -> EloUpdate {
    let k = match match_type {
        MatchType::League => config.k_league,
        MatchType::Cup => config.k_cup,
    };
    let mut ratings = prior.clone();
    let mut warnings = Vec::new();

    for fixture in fixtures {
        if fixture.is_bye {
            continue;
        }
        let (home, away) = match (&fixture.home, &fixture.away) {
            (Some(h), Some(a)) => (h, a),
            _ => {
                skip(&mut warnings, RatingWarning::MalformedFixture { fixture: fixture.id });
                continue;
            }
        };
        let (home_score, away_score) = match (fixture.home_score, fixture.away_score) {
            (Some(h), Some(a)) => (h, a),
            _ => {
                skip(&mut warnings, RatingWarning::MissingScore { fixture: fixture.id });
                continue;
            }
        };
        let Some(home_roster) = roster_for(teams_of_day, home, fixture, &mut warnings) else {
            continue;
        };
        let Some(away_roster) = roster_for(teams_of_day, away, fixture, &mut warnings) else {
            continue;
        };

        let home_avg = side_rating(&ratings, home_roster, config.initial_rating);
        let away_avg = side_rating(&ratings, away_roster, config.initial_rating);
        let expected_home = 1.0 / (1.0 + 10.0_f64.powf((away_avg - home_avg) / 400.0));
        let actual_home = if home_score > away_score {
            1.0
        } else if home_score == away_score {
            0.5
        } else {
            0.0
        };

        let home_delta = k * (actual_home - expected_home);
        let away_delta = k * ((1.0 - actual_home) - (1.0 - expected_home));
        for player in home_roster {
            *ratings.entry(player.clone()).or_insert(config.initial_rating) += home_delta;
        }
        for player in away_roster {
            *ratings.entry(player.clone()).or_insert(config.initial_rating) += away_delta;
        }
    }

    EloUpdate { ratings, warnings }
}

/// Decay a rating toward the baseline: for every full week between the last
/// appearance and `as_of`, the rating moves `weekly_decay` (2% by default)
/// closer to the initial rating, applied multiplicatively per week.
pub fn apply_weekly_decay(
    rating: f64,
    last_played: NaiveDate,
    as_of: NaiveDate,
    config: &RatingConfig,
) -> f64 {
    let days = (as_of - last_played).num_days();
    if days < 7 {
        return rating;
    }
    let weeks = (days / 7) as i32;
    let retained = (1.0 - config.weekly_decay).powi(weeks);
    config.initial_rating + (rating - config.initial_rating) * retained
}

fn side_rating(ratings: &HashMap<PlayerId, f64>, roster: &[PlayerId], initial: f64) -> f64 {
    let sum: f64 = roster
        .iter()
        .map(|p| ratings.get(p).copied().unwrap_or(initial))
        .sum();
    sum / roster.len() as f64
}

fn roster_for<'a>(
    teams_of_day: &'a HashMap<TeamName, Vec<PlayerId>>,
    team: &TeamName,
    fixture: &Fixture,
    warnings: &mut Vec<RatingWarning>,
) -> Option<&'a [PlayerId]> {
    match teams_of_day.get(team) {
        Some(roster) if !roster.is_empty() => Some(roster),
        Some(_) => {
            skip(
                warnings,
                RatingWarning::EmptyRoster {
                    fixture: fixture.id,
                    team: team.clone(),
                },
            );
            None
        }
        None => {
            skip(
                warnings,
                RatingWarning::UnknownTeam {
                    fixture: fixture.id,
                    team: team.clone(),
                },
            );
            None
        }
    }
}

fn skip(warnings: &mut Vec<RatingWarning>, warning: RatingWarning) {
    log::warn!("{warning}");
    warnings.push(warning);
}
