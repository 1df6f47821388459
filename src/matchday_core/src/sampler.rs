use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::constants::LARGE_TRIAL_COUNT;
use crate::error::{MatchdayError, Result};
use crate::game::{validate_games, Game};
use crate::scoring::ScoringPolicy;
use crate::simulate::simulate_once;
use crate::standings::StandingsKey;

/// Number of trials that produced each distinct standings table.
pub type FrequencyMap = HashMap<StandingsKey, u64>;

/// Run `n` trials from a single random stream and count distinct results.
///
/// Counts always sum to `n`. With no games every trial yields the empty
/// table, so the map has one entry (or none when `n` is 0).
pub fn sample<R: Rng>(games: &[Game], scoring: &ScoringPolicy, n: usize, rng: &mut R) -> FrequencyMap {
    let mut frequencies = FrequencyMap::new();
    for _ in 0..n {
        let key = simulate_once(games, scoring, rng).canonical();
        *frequencies.entry(key).or_insert(0) += 1;
    }
    frequencies
}

/// Sum two frequency maps key by key.
///
/// Associative and commutative, so partial maps can be combined in any order.
pub fn merge_frequency_maps(a: FrequencyMap, b: FrequencyMap) -> FrequencyMap {
    let (mut larger, smaller) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for (key, count) in smaller {
        *larger.entry(key).or_insert(0) += count;
    }
    larger
}

/// Split `n` trials into chunks of `chunk_size`, the last one holding the
/// remainder. No zero-sized chunk is ever produced.
///
/// `chunk_size` must be positive; `Sampler` rejects 0 before getting here.
fn chunk_sizes(n: usize, chunk_size: usize) -> Vec<usize> {
    debug_assert!(chunk_size > 0, "chunk size must be positive");
    let mut sizes = vec![chunk_size; n / chunk_size];
    if n % chunk_size > 0 {
        sizes.push(n % chunk_size);
    }
    sizes
}

/// Snapshot handed to the progress observer after each chunk.
#[derive(Debug)]
pub struct ChunkProgress<'a> {
    /// Index of the chunk that just finished
    pub chunk: usize,
    pub chunks: usize,
    pub completed_trials: usize,
    pub total_trials: usize,
    /// Merged counts of every chunk finished so far
    pub frequencies: &'a FrequencyMap,
}

/// Chunked Monte Carlo sampler over a fixed set of games.
///
/// Chunk `i` draws from its own `ChaCha8Rng`, seeded with the `i`-th value of
/// a master generator. For a given seed and chunk size the result is the
/// same whether chunks run sequentially or in parallel.
#[derive(Clone, Debug)]
pub struct Sampler<'a> {
    games: &'a [Game],
    scoring: ScoringPolicy,
    chunk_size: Option<usize>,
    seed: Option<u64>,
    parallel: bool,
}

impl<'a> Sampler<'a> {
    /// Create a sampler, rejecting games whose probabilities don't sum to 1.
    pub fn new(games: &'a [Game], scoring: ScoringPolicy) -> Result<Self> {
        validate_games(games)?;
        Ok(Sampler {
            games,
            scoring,
            chunk_size: None,
            seed: None,
            parallel: false,
        })
    }

    /// Trials per chunk. `None` runs everything as one chunk.
    pub fn with_chunk_size(mut self, chunk_size: Option<usize>) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Seed the master generator. Without a seed it is seeded from entropy.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Run chunks on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run `trials` trials without a progress observer.
    pub fn run(&self, trials: usize) -> Result<FrequencyMap> {
        self.run_with_progress(trials, |_| {})
    }

    /// Run `trials` trials, calling `on_chunk` after every finished chunk.
    ///
    /// The observer only sees progress; it cannot change the result. In
    /// parallel mode chunks report in completion order.
    pub fn run_with_progress<F>(&self, trials: usize, on_chunk: F) -> Result<FrequencyMap>
    where
        F: FnMut(&ChunkProgress<'_>) + Send,
    {
        let chunk_size = match self.chunk_size {
            Some(0) => {
                return Err(MatchdayError::InvalidOption {
                    name: "chunk_size",
                    reason: "must be positive".to_string(),
                })
            }
            Some(size) => size,
            None => trials.max(1),
        };

        if trials > LARGE_TRIAL_COUNT {
            log::warn!(
                "running {} trials; memory grows with the number of distinct standings",
                trials
            );
        }

        let sizes = chunk_sizes(trials, chunk_size);
        let seeds = chunk_seeds(self.seed, sizes.len());
        let plan: Vec<(usize, usize, u64)> = sizes
            .into_iter()
            .zip(seeds)
            .enumerate()
            .map(|(index, (size, seed))| (index, size, seed))
            .collect();
        let chunks = plan.len();

        let shared = Mutex::new((FrequencyMap::new(), 0usize, on_chunk));

        let run_chunk = |&(index, size, seed): &(usize, usize, u64)| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let partial = sample(self.games, &self.scoring, size, &mut rng);

            let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
            let (frequencies, completed, observer) = &mut *guard;
            *frequencies = merge_frequency_maps(std::mem::take(frequencies), partial);
            *completed += size;

            log::debug!(
                "chunk {}/{} done ({} of {} trials, {} distinct standings)",
                index + 1,
                chunks,
                completed,
                trials,
                frequencies.len()
            );
            observer(&ChunkProgress {
                chunk: index,
                chunks,
                completed_trials: *completed,
                total_trials: trials,
                frequencies,
            });
        };

        if self.parallel {
            plan.par_iter().for_each(run_chunk);
        } else {
            plan.iter().for_each(run_chunk);
        }

        let (frequencies, _, _) = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
        Ok(frequencies)
    }
}

fn chunk_seeds(seed: Option<u64>, count: usize) -> Vec<u64> {
    let mut master = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    (0..count).map(|_| master.gen::<u64>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::Standing;

    fn make_games() -> Vec<Game> {
        vec![
            Game::new("A", "B", 0.5, 0.3, 0.2),
            Game::new("C", "D", 0.4, 0.4, 0.2),
            Game::new("A", "C", 0.35, 0.35, 0.3),
        ]
    }

    fn total(frequencies: &FrequencyMap) -> u64 {
        frequencies.values().sum()
    }

    #[test]
    fn test_counts_sum_to_n() {
        let games = make_games();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for n in [0, 1, 17, 500] {
            let frequencies = sample(&games, &ScoringPolicy::STANDARD, n, &mut rng);
            assert_eq!(total(&frequencies), n as u64);
        }
    }

    #[test]
    fn test_zero_trials_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(sample(&make_games(), &ScoringPolicy::STANDARD, 0, &mut rng).is_empty());
        assert!(sample(&[], &ScoringPolicy::STANDARD, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_no_games_collapses_to_one_key() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let frequencies = sample(&[], &ScoringPolicy::STANDARD, 25, &mut rng);
        assert_eq!(frequencies.len(), 1);
        assert_eq!(frequencies.get(&StandingsKey::default()), Some(&25));
    }

    #[test]
    fn test_certain_game_single_outcome() {
        let games = vec![Game::new("A", "B", 1.0, 0.0, 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let frequencies = sample(&games, &ScoringPolicy::STANDARD, 50, &mut rng);

        assert_eq!(frequencies.len(), 1);
        let (key, count) = frequencies.iter().next().unwrap();
        assert_eq!(*count, 50);
        assert_eq!(key.get("A"), Some(&Standing::new("A", 0, 3)));
        assert_eq!(key.get("B"), Some(&Standing::new("B", 0, 0)));
    }

    #[test]
    fn test_disjoint_batches_merge_to_combined_run() {
        let games = make_games();

        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let first = sample(&games, &ScoringPolicy::STANDARD, 120, &mut rng);
        let second = sample(&games, &ScoringPolicy::STANDARD, 80, &mut rng);
        let merged = merge_frequency_maps(first, second);

        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let combined = sample(&games, &ScoringPolicy::STANDARD, 200, &mut rng);

        assert_eq!(merged, combined);
    }

    #[test]
    fn test_merge_order_independent() {
        let games = make_games();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let a = sample(&games, &ScoringPolicy::STANDARD, 40, &mut rng);
        let b = sample(&games, &ScoringPolicy::STANDARD, 30, &mut rng);
        let c = sample(&games, &ScoringPolicy::STANDARD, 20, &mut rng);

        let left = merge_frequency_maps(merge_frequency_maps(a.clone(), b.clone()), c.clone());
        let right = merge_frequency_maps(c, merge_frequency_maps(b, a));
        assert_eq!(left, right);
        assert_eq!(total(&left), 90);
    }

    #[test]
    fn test_chunk_sizes() {
        assert_eq!(chunk_sizes(10, 3), vec![3, 3, 3, 1]);
        assert_eq!(chunk_sizes(9, 3), vec![3, 3, 3]);
        assert_eq!(chunk_sizes(5, 10), vec![5]);
        assert!(chunk_sizes(0, 4).is_empty());
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let games = make_games();
        let sampler = Sampler::new(&games, ScoringPolicy::STANDARD)
            .unwrap()
            .with_chunk_size(Some(64))
            .with_seed(Some(42));

        let sequential = sampler.run(1000).unwrap();
        let parallel = sampler.clone().with_parallel(true).run(1000).unwrap();

        assert_eq!(total(&sequential), 1000);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_progress_reports_every_chunk() {
        let games = make_games();
        let sampler = Sampler::new(&games, ScoringPolicy::STANDARD)
            .unwrap()
            .with_chunk_size(Some(30))
            .with_seed(Some(1));

        let mut seen = Vec::new();
        let frequencies = sampler
            .run_with_progress(100, |progress| {
                assert_eq!(progress.chunks, 4);
                assert_eq!(total(progress.frequencies), progress.completed_trials as u64);
                seen.push((progress.chunk, progress.completed_trials));
            })
            .unwrap();

        assert_eq!(seen, vec![(0, 30), (1, 60), (2, 90), (3, 100)]);
        assert_eq!(total(&frequencies), 100);
    }

    #[test]
    fn test_progress_observer_does_not_change_result() {
        let games = make_games();
        let sampler = Sampler::new(&games, ScoringPolicy::STANDARD)
            .unwrap()
            .with_chunk_size(Some(25))
            .with_seed(Some(77));

        let quiet = sampler.run(200).unwrap();
        let mut calls = 0;
        let observed = sampler.run_with_progress(200, |_| calls += 1).unwrap();

        assert_eq!(calls, 8);
        assert_eq!(quiet, observed);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let games = make_games();
        let sampler = Sampler::new(&games, ScoringPolicy::STANDARD)
            .unwrap()
            .with_chunk_size(Some(0));
        assert!(matches!(
            sampler.run(10),
            Err(MatchdayError::InvalidOption { name: "chunk_size", .. })
        ));
    }

    #[test]
    fn test_malformed_games_rejected() {
        let games = vec![Game::new("A", "B", 0.6, 0.6, 0.0)];
        assert!(matches!(
            Sampler::new(&games, ScoringPolicy::STANDARD),
            Err(MatchdayError::MalformedGameProbabilities { .. })
        ));
    }

    #[test]
    fn test_zero_trials_via_sampler() {
        let games = make_games();
        let sampler = Sampler::new(&games, ScoringPolicy::STANDARD).unwrap();
        let mut calls = 0;
        let frequencies = sampler.run_with_progress(0, |_| calls += 1).unwrap();
        assert!(frequencies.is_empty());
        assert_eq!(calls, 0);
    }
}
