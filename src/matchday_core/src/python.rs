//! Python bindings, built with the `python` feature.
//!
//! Standings cross the boundary as `(team, goal_diff, points)` tuples and
//! games as `(team1, team2, prob1, prob2, probtie)` tuples.
//!
//! Log records go through the `log` facade and this module installs no
//! logger, so `verbose=True` only has a visible effect once the embedding
//! application bridges `log` into Python logging.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use crate::compose::{Distribution, OutputMode};
use crate::config::SimulationOptions;
use crate::constants::{DEFAULT_DAYS_AHEAD, DEFAULT_TRIALS};
use crate::error::MatchdayError;
use crate::game::{validate_games, Game};
use crate::matchday;
use crate::sampler::Sampler;
use crate::scoring::{self, Outcome, ScoringPolicy};
use crate::simulate;
use crate::standings::{self, Standing, StandingsKey, StandingsTable};

type StandingRow = (String, i32, u32);
type GameRow = (String, String, f64, f64, f64);

impl From<MatchdayError> for PyErr {
    fn from(err: MatchdayError) -> PyErr {
        if err.is_acquisition_failure() {
            PyIOError::new_err(err.to_string())
        } else {
            PyValueError::new_err(err.to_string())
        }
    }
}

fn to_table(rows: Vec<StandingRow>) -> StandingsTable {
    rows.into_iter()
        .map(|(team, goal_diff, points)| Standing::new(team, goal_diff, points))
        .collect()
}

fn to_rows(rows: &[Standing]) -> Vec<StandingRow> {
    rows.iter()
        .map(|r| (r.team.clone(), r.goal_diff, r.points))
        .collect()
}

fn to_games(rows: Vec<GameRow>) -> Vec<Game> {
    rows.into_iter()
        .map(|(team1, team2, prob1, prob2, probtie)| Game::new(team1, team2, prob1, prob2, probtie))
        .collect()
}

fn entries<V>(map: HashMap<StandingsKey, V>) -> Vec<(Vec<StandingRow>, V)> {
    map.into_iter().map(|(key, v)| (to_rows(key.rows()), v)).collect()
}

fn rng_from(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Standard points for an outcome: 1 = team1 wins, 0 = draw, -1 = team2 wins.
#[pyfunction]
#[pyo3(name = "points_from_outcome")]
fn py_points_from_outcome(outcome: i8) -> PyResult<(u32, u32)> {
    let outcome = match outcome {
        1 => Outcome::Team1Win,
        0 => Outcome::Tie,
        -1 => Outcome::Team2Win,
        other => return Err(PyValueError::new_err(format!("outcome must be 1, 0 or -1, got {}", other))),
    };
    let award = scoring::points_from_outcome(outcome);
    Ok((award.team1, award.team2))
}

/// Sum two tables team by team.
#[pyfunction]
#[pyo3(name = "merge_standings")]
fn py_merge_standings(a: Vec<StandingRow>, b: Vec<StandingRow>) -> Vec<StandingRow> {
    let merged = standings::merge_standings(&to_table(a), &to_table(b));
    to_rows(merged.rows())
}

/// One Monte Carlo trial under standard scoring.
#[pyfunction]
#[pyo3(name = "simulate_once", signature = (games, seed = None))]
fn py_simulate_once(games: Vec<GameRow>, seed: Option<u64>) -> PyResult<Vec<StandingRow>> {
    let games = to_games(games);
    validate_games(&games)?;
    let mut rng = rng_from(seed);
    let table = simulate::simulate_once(&games, &ScoringPolicy::STANDARD, &mut rng);
    Ok(to_rows(table.rows()))
}

/// Frequency of each distinct trial result, as `(standings, count)` pairs.
#[pyfunction]
#[pyo3(name = "sample", signature = (games, n, chunk_size = None, seed = None, parallel = false))]
fn py_sample(
    py: Python<'_>,
    games: Vec<GameRow>,
    n: usize,
    chunk_size: Option<usize>,
    seed: Option<u64>,
    parallel: bool,
) -> PyResult<Vec<(Vec<StandingRow>, u64)>> {
    let games = to_games(games);
    let frequencies = py.allow_threads(|| {
        Sampler::new(&games, ScoringPolicy::STANDARD)?
            .with_chunk_size(chunk_size)
            .with_seed(seed)
            .with_parallel(parallel)
            .run(n)
    })?;
    Ok(entries(frequencies))
}

/// Projected final tables for a league, as `(standings, count)` or
/// `(standings, probability)` pairs depending on `mode`.
///
/// `verbose` raises progress records from debug to info level; see the
/// module docs for where they go.
#[pyfunction]
#[pyo3(
    name = "compute_standings_distribution",
    signature = (
        league,
        days_ahead = DEFAULT_DAYS_AHEAD,
        n = DEFAULT_TRIALS,
        chunk_size = None,
        mode = "frequency",
        seed = None,
        verbose = false,
        parallel = false
    )
)]
#[allow(clippy::too_many_arguments)]
fn py_compute_standings_distribution(
    py: Python<'_>,
    league: &str,
    days_ahead: u32,
    n: usize,
    chunk_size: Option<usize>,
    mode: &str,
    seed: Option<u64>,
    verbose: bool,
    parallel: bool,
) -> PyResult<PyObject> {
    let options = SimulationOptions {
        trials: n,
        verbose,
        chunk_size,
        mode: mode.parse::<OutputMode>()?,
        seed,
        parallel,
    };
    let league = league.to_string();
    let distribution =
        py.allow_threads(|| matchday::compute_standings_distribution(&league, days_ahead, &options))?;

    Ok(match distribution {
        Distribution::Frequency(map) => entries(map).into_py(py),
        Distribution::Probability(map) => entries(map).into_py(py),
    })
}

#[pymodule]
fn matchday_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_points_from_outcome, m)?)?;
    m.add_function(wrap_pyfunction!(py_merge_standings, m)?)?;
    m.add_function(wrap_pyfunction!(py_simulate_once, m)?)?;
    m.add_function(wrap_pyfunction!(py_sample, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_standings_distribution, m)?)?;

    m.add("DEFAULT_TRIALS", DEFAULT_TRIALS)?;
    m.add("DEFAULT_DAYS_AHEAD", DEFAULT_DAYS_AHEAD)?;

    Ok(())
}
