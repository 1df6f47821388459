use rand::Rng;

use crate::game::Game;
use crate::scoring::{Outcome, ScoringPolicy};
use crate::standings::{Standing, StandingsTable};

/// Two-row table for a single decided game.
///
/// Goal difference is always 0: there is no score-margin model, so unplayed
/// games only move points.
pub fn game_standings(game: &Game, outcome: Outcome, scoring: &ScoringPolicy) -> StandingsTable {
    let award = scoring.points_from_outcome(outcome);
    StandingsTable::from_rows(vec![
        Standing::new(game.team1.clone(), 0, award.team1),
        Standing::new(game.team2.clone(), 0, award.team2),
    ])
}

/// Monte Carlo trial: draw one outcome per game and sum the results.
///
/// # Arguments
/// * `games` - Unplayed games, each with probabilities summing to 1
/// * `scoring` - Points table for the league
/// * `rng` - Random source; a seeded generator makes the trial reproducible
///
/// # Returns
/// Points gained by every team that plays in `games`. Empty when `games` is.
pub fn simulate_once<R: Rng>(games: &[Game], scoring: &ScoringPolicy, rng: &mut R) -> StandingsTable {
    games
        .iter()
        .map(|game| {
            let outcome = game.sample_outcome(rng);
            game_standings(game, outcome, scoring)
        })
        .fold(StandingsTable::new(), |acc, mini| acc.merge(&mini))
}
