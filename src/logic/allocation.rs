//! Team allocation: valid configurations, random assignment, and the
//! seeded snake draft.

use crate::models::{
    Allocation, AllocationMethod, AllocationStep, PlayerId, TeamBounds, TeamConfiguration,
    TeamError, TeamName,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

const TEAM_COLORS: &[&str] = &[
    "Red", "Blue", "Green", "Yellow", "Orange", "Purple", "Black", "White", "Silver", "Crimson",
];
const TEAM_NOUNS: &[&str] = &[
    "Foxes", "Wolves", "Hawks", "Lions", "Sharks", "Otters", "Badgers", "Falcons", "Bears",
    "Herons",
];

/// Default neutral quality score for players with no rating yet; matches
/// `RatingConfig::default().initial_rating`.
pub const BASELINE_QUALITY: f64 = 1000.0;

/// Enumerate every valid team configuration for the given player count.
///
/// For each team count in bounds, sizes are `floor(n/t)` plus one extra for
/// the first `n mod t` teams, so size lists are non-increasing. A
/// configuration is kept only when every size falls within the per-team
/// bounds. Multiple configurations may be valid; the caller picks one.
pub fn configurations_for(
    eligible_player_count: usize,
    bounds: &TeamBounds,
) -> Vec<TeamConfiguration> {
    let mut configurations = Vec::new();
    for team_count in bounds.min_teams..=bounds.max_teams {
        if team_count < 2 || team_count > eligible_player_count {
            continue;
        }
        let base = eligible_player_count / team_count;
        let extra = eligible_player_count % team_count;
        let team_sizes: Vec<usize> = (0..team_count)
            .map(|i| if i < extra { base + 1 } else { base })
            .collect();
        let within_bounds = team_sizes
            .iter()
            .all(|&s| s >= bounds.min_players_per_team && s <= bounds.max_players_per_team);
        if within_bounds {
            configurations.push(TeamConfiguration {
                team_count,
                team_sizes,
            });
        }
    }
    configurations
}

/// Partition the roster into teams per the chosen configuration.
///
/// Random mode shuffles and slices; seeded mode snake-drafts by descending
/// quality so aggregate strength stays close across teams. When
/// `record_history` is set, every assignment decision is captured in draft
/// order for the caller to replay.
pub fn allocate(
    players: &[PlayerId],
    config: &TeamConfiguration,
    bounds: &TeamBounds,
    method: AllocationMethod<'_>,
    record_history: bool,
    rng: &mut impl Rng,
) -> Result<Allocation, TeamError> {
    validate(players, config, bounds)?;
    let names = generate_team_names(config.team_count, rng);
    let allocation = match method {
        AllocationMethod::Random => allocate_random(players, config, &names, record_history, rng),
        AllocationMethod::Seeded { ratings, baseline } => {
            allocate_seeded(players, config, &names, ratings, baseline, record_history)
        }
    };
    Ok(allocation)
}

fn validate(
    players: &[PlayerId],
    config: &TeamConfiguration,
    bounds: &TeamBounds,
) -> Result<(), TeamError> {
    if config.team_count < 2 {
        return Err(TeamError::NotEnoughTeams);
    }
    if config.team_count < bounds.min_teams || config.team_count > bounds.max_teams {
        return Err(TeamError::TeamCountOutOfBounds {
            team_count: config.team_count,
            min_teams: bounds.min_teams,
            max_teams: bounds.max_teams,
        });
    }
    if config.team_sizes.len() != config.team_count {
        return Err(TeamError::MalformedConfiguration {
            team_count: config.team_count,
            size_count: config.team_sizes.len(),
        });
    }
    let expected: usize = config.team_sizes.iter().sum();
    if expected != players.len() {
        return Err(TeamError::SizesDoNotMatchRoster {
            expected,
            actual: players.len(),
        });
    }
    let mut seen = HashSet::new();
    for player in players {
        if !seen.insert(player) {
            return Err(TeamError::DuplicatePlayer(player.clone()));
        }
    }
    Ok(())
}

/// Fresh color+noun names, unique within this allocation. Falls back to a
/// numbered suffix once the pair pool is exhausted.
fn generate_team_names(count: usize, rng: &mut impl Rng) -> Vec<TeamName> {
    let max_attempts = TEAM_COLORS.len() * TEAM_NOUNS.len() * 4;
    let mut names: Vec<TeamName> = Vec::with_capacity(count);
    let mut used: HashSet<TeamName> = HashSet::new();
    while names.len() < count {
        let mut attempts = 0;
        let name = loop {
            let color = TEAM_COLORS[rng.gen_range(0..TEAM_COLORS.len())];
            let noun = TEAM_NOUNS[rng.gen_range(0..TEAM_NOUNS.len())];
            let candidate = format!("{color} {noun}");
            if !used.contains(&candidate) {
                break candidate;
            }
            attempts += 1;
            if attempts >= max_attempts {
                break format!("{color} {noun} {}", names.len() + 1);
            }
        };
        used.insert(name.clone());
        names.push(name);
    }
    names
}

fn allocate_random(
    players: &[PlayerId],
    config: &TeamConfiguration,
    names: &[TeamName],
    record_history: bool,
    rng: &mut impl Rng,
) -> Allocation {
    let mut pool: Vec<PlayerId> = players.to_vec();
    pool.shuffle(rng);

    let mut teams: HashMap<TeamName, Vec<PlayerId>> = HashMap::new();
    let mut history: Option<Vec<AllocationStep>> =
        if record_history { Some(Vec::new()) } else { None };
    let mut step_index = 0;
    let mut offset = 0;
    for (team_index, &size) in config.team_sizes.iter().enumerate() {
        let roster: Vec<PlayerId> = pool[offset..offset + size].to_vec();
        offset += size;
        if let Some(log) = history.as_mut() {
            for player_id in &roster {
                log.push(AllocationStep {
                    player_id: player_id.clone(),
                    team_name: names[team_index].clone(),
                    step_index,
                    quality_score: 0.0,
                });
                step_index += 1;
            }
        }
        teams.insert(names[team_index].clone(), roster);
    }
    Allocation { teams, history }
}

/// Snake draft: strongest remaining player to each team in order, then the
/// next pass in reverse order, alternating direction until the pool empties.
/// Full teams are skipped so uneven sizes are respected.
fn allocate_seeded(
    players: &[PlayerId],
    config: &TeamConfiguration,
    names: &[TeamName],
    ratings: &HashMap<PlayerId, f64>,
    baseline: f64,
    record_history: bool,
) -> Allocation {
    let mut ordered: Vec<(PlayerId, f64)> = players
        .iter()
        .map(|p| (p.clone(), ratings.get(p).copied().unwrap_or(baseline)))
        .collect();
    // Descending quality; ties broken by player id so the draft is deterministic.
    ordered.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let team_count = config.team_count;
    let mut rosters: Vec<Vec<PlayerId>> = vec![Vec::new(); team_count];
    let mut history: Option<Vec<AllocationStep>> =
        if record_history { Some(Vec::new()) } else { None };
    let mut queue = ordered.into_iter();
    let mut forward = true;
    let mut step_index = 0;

    'draft: loop {
        let pass: Vec<usize> = if forward {
            (0..team_count).collect()
        } else {
            (0..team_count).rev().collect()
        };
        let mut assigned_this_pass = false;
        for team_index in pass {
            if rosters[team_index].len() >= config.team_sizes[team_index] {
                continue;
            }
            match queue.next() {
                Some((player_id, quality_score)) => {
                    if let Some(log) = history.as_mut() {
                        log.push(AllocationStep {
                            player_id: player_id.clone(),
                            team_name: names[team_index].clone(),
                            step_index,
                            quality_score,
                        });
                    }
                    rosters[team_index].push(player_id);
                    step_index += 1;
                    assigned_this_pass = true;
                }
                None => break 'draft,
            }
        }
        if !assigned_this_pass {
            break;
        }
        forward = !forward;
    }

    let teams = names
        .iter()
        .cloned()
        .zip(rosters)
        .collect::<HashMap<TeamName, Vec<PlayerId>>>();
    Allocation { teams, history }
}
