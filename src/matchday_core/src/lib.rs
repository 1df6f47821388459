//! Matchday Core - Monte Carlo projection of league standings.
//!
//! Samples outcomes for a league's upcoming games from their win/draw/loss
//! probabilities, counts how often each resulting table occurs, and adds the
//! current standings to every sampled table. Python bindings via PyO3 are
//! available with the `python` feature.

pub mod compose;
pub mod config;
pub mod constants;
pub mod error;
pub mod espn;
pub mod game;
pub mod html;
pub mod http_client;
pub mod league;
pub mod matchday;
pub mod rankings;
pub mod sampler;
pub mod scoring;
pub mod simulate;
pub mod sources;
pub mod spi;
pub mod standings;
pub mod team;

#[cfg(feature = "python")]
mod python;

pub use compose::{compose, compose_frequencies, compose_probabilities, Distribution, OutputMode};
pub use config::SimulationOptions;
pub use constants::{DEFAULT_DAYS_AHEAD, DEFAULT_TRIALS, GAMES_CSV_URL};
pub use error::{MatchdayError, Result};
pub use espn::EspnStandings;
pub use game::{sample_outcome, validate_games, Game};
pub use league::League;
pub use matchday::{compute_standings_distribution, compute_with_sources};
pub use rankings::{rank_distribution, PositionOdds, TeamRanks};
pub use sampler::{merge_frequency_maps, sample, ChunkProgress, FrequencyMap, Sampler};
pub use scoring::{points_from_outcome, Outcome, PointsAward, ScoringPolicy};
pub use simulate::simulate_once;
pub use sources::{FixtureSource, StandingsSource};
pub use spi::{FixtureWindow, SpiFixtures};
pub use standings::{merge_standings, Standing, StandingsKey, StandingsTable};
