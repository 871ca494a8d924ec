//! Integration tests for the rating engine: ELO updates, inactivity decay,
//! and confidence-weighted rankings.

use chrono::NaiveDate;
use league_night_engine::{
    apply_weekly_decay, compute_rankings, rank_movements, update_elo, Fixture, MatchType,
    PlayerSessionRecord, RatingConfig, RatingWarning,
};
use std::collections::HashMap;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn played(home: &str, away: &str, home_score: u32, away_score: u32) -> Fixture {
    let mut fixture = Fixture::new(Some(home.to_string()), Some(away.to_string()));
    fixture.home_score = Some(home_score);
    fixture.away_score = Some(away_score);
    fixture
}

fn rosters(teams: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    teams
        .iter()
        .map(|(team, roster)| {
            (
                team.to_string(),
                roster.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect()
}

fn record(date: NaiveDate, total_points: u32, elo_rating_after: f64) -> PlayerSessionRecord {
    PlayerSessionRecord {
        date,
        team: "Reds".to_string(),
        appearance_points: 1,
        match_points: 0,
        bonus_points: 0,
        knockout_points: 0,
        total_points,
        elo_rating_after,
    }
}

#[test]
fn elo_is_zero_sum_per_fixture() {
    let teams = rosters(&[("Home", &["h"]), ("Away", &["a"])]);
    let update = update_elo(
        &HashMap::new(),
        &[played("Home", "Away", 2, 1)],
        &teams,
        MatchType::League,
        &RatingConfig::default(),
    );
    assert!(update.warnings.is_empty());

    // Equal unrated sides: expected 0.5, K=10, so a win moves each side 5.
    let home = update.ratings["h"];
    let away = update.ratings["a"];
    assert!((home - 1005.0).abs() < 1e-9);
    assert!((away - 995.0).abs() < 1e-9);
    assert!(((home - 1000.0) + (away - 1000.0)).abs() < 1e-9);
}

#[test]
fn cup_fixtures_move_ratings_less() {
    let teams = rosters(&[("Home", &["h"]), ("Away", &["a"])]);
    let update = update_elo(
        &HashMap::new(),
        &[played("Home", "Away", 2, 1)],
        &teams,
        MatchType::Cup,
        &RatingConfig::default(),
    );
    assert!((update.ratings["h"] - 1003.5).abs() < 1e-9);
    assert!((update.ratings["a"] - 996.5).abs() < 1e-9);
}

#[test]
fn side_rating_is_the_roster_mean() {
    let teams = rosters(&[("Strong", &["s1", "s2"]), ("Weak", &["w1", "w2"])]);
    let prior: HashMap<String, f64> = [
        ("s1".to_string(), 1200.0),
        ("s2".to_string(), 1000.0),
        ("w1".to_string(), 950.0),
        ("w2".to_string(), 850.0),
    ]
    .into();
    let update = update_elo(
        &prior,
        &[played("Strong", "Weak", 0, 1)],
        &teams,
        MatchType::League,
        &RatingConfig::default(),
    );

    // Sides average 1100 vs 900; the weak side's upset pays out the full
    // expected-score gap, identically for every player on the side.
    let expected_home = 1.0 / (1.0 + 10.0_f64.powf((900.0 - 1100.0) / 400.0));
    let home_delta = 10.0 * (0.0 - expected_home);
    assert!((update.ratings["s1"] - (1200.0 + home_delta)).abs() < 1e-9);
    assert!((update.ratings["s2"] - (1000.0 + home_delta)).abs() < 1e-9);
    assert!((update.ratings["w1"] - (950.0 - home_delta)).abs() < 1e-9);
    assert!((update.ratings["w2"] - (850.0 - home_delta)).abs() < 1e-9);
}

#[test]
fn draws_between_equals_change_nothing() {
    let teams = rosters(&[("Home", &["h"]), ("Away", &["a"])]);
    let update = update_elo(
        &HashMap::new(),
        &[played("Home", "Away", 1, 1)],
        &teams,
        MatchType::League,
        &RatingConfig::default(),
    );
    assert!((update.ratings["h"] - 1000.0).abs() < 1e-9);
    assert!((update.ratings["a"] - 1000.0).abs() < 1e-9);
}

#[test]
fn malformed_fixtures_warn_and_are_skipped() {
    let _ = env_logger::builder().is_test(true).try_init();
    let teams = rosters(&[("Home", &["h"]), ("Away", &["a"])]);

    let unscored = Fixture::new(Some("Home".to_string()), Some("Away".to_string()));
    let unknown_team = played("Home", "Ghosts", 1, 0);
    let good = played("Home", "Away", 1, 0);
    let update = update_elo(
        &HashMap::new(),
        &[unscored, unknown_team, good],
        &teams,
        MatchType::League,
        &RatingConfig::default(),
    );

    assert_eq!(update.warnings.len(), 2);
    assert!(matches!(update.warnings[0], RatingWarning::MissingScore { .. }));
    assert!(matches!(
        &update.warnings[1],
        RatingWarning::UnknownTeam { team, .. } if team == "Ghosts"
    ));
    // The good fixture still rated.
    assert!(update.ratings["h"] > 1000.0);
    assert!(update.ratings["a"] < 1000.0);
}

#[test]
fn byes_never_touch_ratings() {
    let teams = rosters(&[("Home", &["h"])]);
    let bye = Fixture::new(Some("Home".to_string()), None);
    let update = update_elo(
        &HashMap::new(),
        &[bye],
        &teams,
        MatchType::League,
        &RatingConfig::default(),
    );
    assert!(update.warnings.is_empty());
    assert!(update.ratings.is_empty());
}

#[test]
fn weekly_decay_pulls_toward_the_baseline() {
    let config = RatingConfig::default();
    let last = day(2026, 1, 3);

    // Less than a full week: untouched.
    assert_eq!(apply_weekly_decay(1100.0, last, day(2026, 1, 9), &config), 1100.0);
    // One full week: 2% of the distance to 1000 gone.
    let one = apply_weekly_decay(1100.0, last, day(2026, 1, 10), &config);
    assert!((one - 1098.0).abs() < 1e-9);
    // Two weeks compound multiplicatively.
    let two = apply_weekly_decay(1100.0, last, day(2026, 1, 17), &config);
    assert!((two - 1096.04).abs() < 1e-9);
    // Below-baseline ratings decay upward.
    let below = apply_weekly_decay(900.0, last, day(2026, 1, 10), &config);
    assert!((below - 902.0).abs() < 1e-9);
    // A player at the baseline stays there.
    assert_eq!(apply_weekly_decay(1000.0, last, day(2026, 6, 1), &config), 1000.0);
}

#[test]
fn confidence_weighting_pulls_small_samples_toward_the_global_average() {
    // League totals: 90 points over 15 appearances, global average 6.
    let mut history: HashMap<String, Vec<PlayerSessionRecord>> = HashMap::new();
    history.insert("newcomer".to_string(), vec![record(day(2026, 3, 7), 10, 1000.0)]);
    history.insert(
        "regular".to_string(),
        (0..4u32)
            .map(|i| record(day(2026, 2, 7 + i), 10, 1000.0))
            .collect(),
    );
    history.insert(
        "veteran".to_string(),
        (0..10u32)
            .map(|i| record(day(2026, 1, 1 + i), 4, 1000.0))
            .collect(),
    );

    let entries = compute_rankings(&history, day(2026, 3, 7), &RatingConfig::default());
    let snapshot = |id: &str| {
        &entries
            .iter()
            .find(|e| e.player_id == id)
            .expect("player ranked")
            .snapshot
    };

    let newcomer = snapshot("newcomer");
    let regular = snapshot("regular");
    let veteran = snapshot("veteran");

    // 1 appearance, raw 10, threshold 5: pulled 4/5 of the way to 6.
    assert!((newcomer.weighted_average - 6.8).abs() < 1e-9);
    assert!(newcomer.weighted_average > 6.0 && newcomer.weighted_average < 10.0);
    // 4 appearances, same raw average: pulled only 1/5 of the way.
    assert!((regular.weighted_average - 9.2).abs() < 1e-9);
    assert!(
        (newcomer.weighted_average - 6.0).abs() < (regular.weighted_average - 6.0).abs()
    );
    // At/above threshold: raw average used unweighted.
    assert!((veteran.weighted_average - 4.0).abs() < 1e-9);

    // Ranking points scale by the league's max appearances (10).
    assert!((newcomer.ranking_points - 68.0).abs() < 1e-9);
    assert!((regular.ranking_points - 92.0).abs() < 1e-9);
    assert!((veteran.ranking_points - 40.0).abs() < 1e-9);

    let order: Vec<&str> = entries.iter().map(|e| e.player_id.as_str()).collect();
    assert_eq!(order, vec!["regular", "newcomer", "veteran"]);
}

#[test]
fn more_points_never_lowers_ranking_points() {
    let base: HashMap<String, Vec<PlayerSessionRecord>> = [
        ("anchor".to_string(), vec![record(day(2026, 3, 7), 6, 1000.0); 5]),
        ("subject".to_string(), vec![record(day(2026, 3, 7), 5, 1000.0), record(day(2026, 3, 14), 5, 1000.0)]),
    ]
    .into();
    let mut boosted = base.clone();
    if let Some(records) = boosted.get_mut("subject") {
        records[1].total_points = 9;
    }

    let config = RatingConfig::default();
    let as_of = day(2026, 3, 14);
    let points_for = |entries: &[league_night_engine::RankingEntry]| {
        entries
            .iter()
            .find(|e| e.player_id == "subject")
            .map(|e| e.snapshot.ranking_points)
            .unwrap()
    };
    let before = points_for(&compute_rankings(&base, as_of, &config));
    let after = points_for(&compute_rankings(&boosted, as_of, &config));
    assert!(after >= before);
}

#[test]
fn ties_break_by_total_points_then_name() {
    // Same appearances and totals: identical ranking points, name decides.
    let history: HashMap<String, Vec<PlayerSessionRecord>> = [
        ("zoe".to_string(), vec![record(day(2026, 3, 7), 6, 1000.0); 5]),
        ("abe".to_string(), vec![record(day(2026, 3, 7), 6, 1000.0); 5]),
    ]
    .into();
    let entries = compute_rankings(&history, day(2026, 3, 7), &RatingConfig::default());
    let order: Vec<&str> = entries.iter().map(|e| e.player_id.as_str()).collect();
    assert_eq!(order, vec!["abe", "zoe"]);
}

#[test]
fn snapshot_elo_decays_with_inactivity() {
    let history: HashMap<String, Vec<PlayerSessionRecord>> = [
        ("idle".to_string(), vec![record(day(2026, 1, 3), 6, 1100.0)]),
        ("active".to_string(), vec![record(day(2026, 1, 17), 6, 1100.0)]),
    ]
    .into();
    let entries = compute_rankings(&history, day(2026, 1, 17), &RatingConfig::default());
    let elo = |id: &str| {
        entries
            .iter()
            .find(|e| e.player_id == id)
            .unwrap()
            .snapshot
            .elo_rating
    };
    assert!((elo("idle") - 1096.04).abs() < 1e-9);
    assert_eq!(elo("active"), 1100.0);
}

#[test]
fn rank_movement_is_previous_minus_current() {
    let previous = vec!["ana".to_string(), "ben".to_string(), "cal".to_string()];
    let current = vec![
        "ben".to_string(),
        "ana".to_string(),
        "cal".to_string(),
        "dee".to_string(),
    ];
    let movements = rank_movements(&previous, &current);
    assert_eq!(movements["ben"], 1); // moved up one place
    assert_eq!(movements["ana"], -1);
    assert_eq!(movements["cal"], 0);
    assert!(!movements.contains_key("dee")); // no previous rank to compare
}
