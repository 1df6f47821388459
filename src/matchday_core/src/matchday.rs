use log::Level;

use crate::compose::{compose, Distribution};
use crate::config::SimulationOptions;
use crate::error::Result;
use crate::espn::EspnStandings;
use crate::league::League;
use crate::sampler::Sampler;
use crate::sources::{FixtureSource, StandingsSource};
use crate::spi::SpiFixtures;

/// Distribution of projected final tables for `league`, simulating every
/// game in the next `days_ahead` days.
///
/// Fetches the current ESPN standings and the SPI fixture feed, then samples
/// and composes as [`compute_with_sources`] does.
pub fn compute_standings_distribution(
    league: &str,
    days_ahead: u32,
    options: &SimulationOptions,
) -> Result<Distribution> {
    compute_with_sources(&EspnStandings, &SpiFixtures::default(), league, days_ahead, options)
}

/// Same as [`compute_standings_distribution`] with caller-supplied sources.
///
/// # Errors
/// * `InvalidLeague` if `league` is not a known league code
/// * `InvalidOption` for a zero chunk size
/// * `MalformedGameProbabilities` if any fixture's probabilities don't sum to 1
/// * whatever the sources return, unchanged
pub fn compute_with_sources<S, F>(
    standings: &S,
    fixtures: &F,
    league: &str,
    days_ahead: u32,
    options: &SimulationOptions,
) -> Result<Distribution>
where
    S: StandingsSource + ?Sized,
    F: FixtureSource + ?Sized,
{
    let league: League = league.parse()?;
    options.validate()?;
    let level = if options.verbose { Level::Info } else { Level::Debug };

    let games = fixtures.fixtures(league, days_ahead)?;
    log::log!(level, "{}: {} games in the next {} days", league, games.len(), days_ahead);
    let baseline = standings.standings(league)?;
    log::log!(level, "{}: baseline standings for {} teams", league, baseline.len());

    let sampler = Sampler::new(&games, league.scoring())?
        .with_chunk_size(options.chunk_size)
        .with_seed(options.seed)
        .with_parallel(options.parallel);

    let frequencies = sampler.run_with_progress(options.trials, |progress| {
        log::log!(
            level,
            "{}: chunk {}/{} finished, {}/{} trials",
            league,
            progress.chunk + 1,
            progress.chunks,
            progress.completed_trials,
            progress.total_trials
        );
    })?;
    log::log!(
        level,
        "{}: {} trials produced {} distinct standings",
        league,
        options.trials,
        frequencies.len()
    );

    Ok(compose(&baseline, &frequencies, options.mode))
}
