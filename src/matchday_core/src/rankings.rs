use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::compose::Distribution;
use crate::constants::RANK_CONFIDENCE;
use crate::standings::{Standing, StandingsKey};

/// Chance of finishing in one table position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionOdds {
    pub probability: f64,
    /// Half-width of the normal-approximation confidence interval
    pub margin: f64,
}

/// Finishing-position odds for one team; `positions[0]` is first place.
#[derive(Clone, Debug, PartialEq)]
pub struct TeamRanks {
    pub team: String,
    pub positions: Vec<PositionOdds>,
}

impl TeamRanks {
    /// Mean finishing position, 1-based.
    pub fn expected_position(&self) -> f64 {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, odds)| (i + 1) as f64 * odds.probability)
            .sum()
    }
}

/// League order: points, then goal difference, then team name.
pub fn table_order(a: &Standing, b: &Standing) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_diff.cmp(&a.goal_diff))
        .then(a.team.cmp(&b.team))
}

/// Teams of one table from first to last place.
pub fn ranked_teams(key: &StandingsKey) -> Vec<&str> {
    let mut rows: Vec<&Standing> = key.rows().iter().collect();
    rows.sort_by(|a, b| table_order(a, b));
    rows.into_iter().map(|r| r.team.as_str()).collect()
}

/// Per-team finishing-position probabilities over a distribution.
///
/// # Arguments
/// * `distribution` - Projected final tables
/// * `trials` - Trial count behind the distribution, used for the margins
///
/// # Returns
/// One entry per team, sorted by team name
pub fn rank_distribution(distribution: &Distribution, trials: u64) -> Vec<TeamRanks> {
    let probabilities = distribution.probabilities();
    let ranked: Vec<(Vec<&str>, f64)> = probabilities
        .iter()
        .map(|(key, &p)| (ranked_teams(key), p))
        .collect();

    let teams: BTreeSet<&str> = ranked.iter().flat_map(|(order, _)| order.iter().copied()).collect();
    let slots = ranked.iter().map(|(order, _)| order.len()).max().unwrap_or(0);

    // Constant parameters; construction cannot fail.
    let z = Normal::new(0.0, 1.0).unwrap().inverse_cdf(0.5 + RANK_CONFIDENCE / 2.0);

    teams
        .into_iter()
        .collect::<Vec<_>>()
        .par_iter()
        .map(|&team| {
            let mut position_probs = vec![0.0; slots];
            for (order, p) in &ranked {
                if let Some(pos) = order.iter().position(|&t| t == team) {
                    position_probs[pos] += p;
                }
            }

            let positions = position_probs
                .into_iter()
                .map(|probability| PositionOdds {
                    probability,
                    margin: confidence_margin(probability, trials, z),
                })
                .collect();

            TeamRanks {
                team: team.to_string(),
                positions,
            }
        })
        .collect()
}

fn confidence_margin(probability: f64, trials: u64, z: f64) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    z * (probability * (1.0 - probability) / trials as f64).sqrt()
}
