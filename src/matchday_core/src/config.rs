//! Simulation options and their environment overrides.
//!
//! `SimulationOptions::from_env` reads `MATCHDAY_TRIALS`, `MATCHDAY_CHUNK_SIZE`,
//! `MATCHDAY_MODE`, `MATCHDAY_SEED`, `MATCHDAY_VERBOSE` and
//! `MATCHDAY_PARALLEL`, after loading a `.env` file if one exists.

use std::path::Path;
use std::str::FromStr;

use crate::compose::OutputMode;
use crate::constants::DEFAULT_TRIALS;
use crate::error::{MatchdayError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationOptions {
    /// Number of Monte Carlo trials
    pub trials: usize,
    /// Log pipeline milestones and chunk progress at info level
    pub verbose: bool,
    /// Trials per chunk; `None` runs all trials as one chunk
    pub chunk_size: Option<usize>,
    pub mode: OutputMode,
    /// Master seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Run chunks on the rayon thread pool
    pub parallel: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        SimulationOptions {
            trials: DEFAULT_TRIALS,
            verbose: false,
            chunk_size: None,
            mode: OutputMode::Frequency,
            seed: None,
            parallel: false,
        }
    }
}

impl SimulationOptions {
    /// Defaults overridden by `MATCHDAY_*` environment variables.
    ///
    /// A missing `.env` file is fine; an unreadable or malformed one is an
    /// `InvalidOption` error.
    pub fn from_env() -> Result<Self> {
        load_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`SimulationOptions::from_env`], loading the `.env` file at `path`.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        load_dotenv(dotenvy::from_path(path))?;
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = SimulationOptions::default();

        if let Some(trials) = parse_var(&lookup, "MATCHDAY_TRIALS", "trials")? {
            options.trials = trials;
        }
        if let Some(chunk_size) = parse_var(&lookup, "MATCHDAY_CHUNK_SIZE", "chunk_size")? {
            options.chunk_size = Some(chunk_size);
        }
        if let Some(raw) = lookup("MATCHDAY_MODE") {
            options.mode = raw.parse()?;
        }
        if let Some(seed) = parse_var(&lookup, "MATCHDAY_SEED", "seed")? {
            options.seed = Some(seed);
        }
        if let Some(raw) = lookup("MATCHDAY_VERBOSE") {
            options.verbose = parse_flag(&raw, "verbose")?;
        }
        if let Some(raw) = lookup("MATCHDAY_PARALLEL") {
            options.parallel = parse_flag(&raw, "parallel")?;
        }

        options.validate()?;
        Ok(options)
    }

    /// Reject a zero chunk size.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == Some(0) {
            return Err(MatchdayError::InvalidOption {
                name: "chunk_size",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

fn load_dotenv<T>(result: dotenvy::Result<T>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(MatchdayError::InvalidOption {
            name: "dotenv",
            reason: e.to_string(),
        }),
    }
}

fn parse_var<F, T>(lookup: &F, var: &str, name: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| MatchdayError::InvalidOption {
                name,
                reason: format!("{}={:?}: {}", var, raw, e),
            }),
    }
}

fn parse_flag(raw: &str, name: &'static str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(MatchdayError::InvalidOption {
            name,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let options = SimulationOptions::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(options, SimulationOptions::default());
        assert_eq!(options.trials, 10_000);
        assert_eq!(options.mode, OutputMode::Frequency);
        assert_eq!(options.chunk_size, None);
    }

    #[test]
    fn test_overrides() {
        let options = SimulationOptions::from_lookup(lookup_from(&[
            ("MATCHDAY_TRIALS", "500"),
            ("MATCHDAY_CHUNK_SIZE", "50"),
            ("MATCHDAY_MODE", "probability"),
            ("MATCHDAY_SEED", "42"),
            ("MATCHDAY_VERBOSE", "true"),
            ("MATCHDAY_PARALLEL", "1"),
        ]))
        .unwrap();

        assert_eq!(
            options,
            SimulationOptions::default()
                .with_trials(500)
                .with_chunk_size(50)
                .with_mode(OutputMode::Probability)
                .with_seed(42)
                .with_verbose(true)
                .with_parallel(true)
        );
    }

    #[test]
    fn test_invalid_values() {
        for (var, value) in [
            ("MATCHDAY_TRIALS", "many"),
            ("MATCHDAY_CHUNK_SIZE", "0"),
            ("MATCHDAY_MODE", "odds"),
            ("MATCHDAY_VERBOSE", "maybe"),
            ("MATCHDAY_SEED", "-1"),
        ] {
            let result = SimulationOptions::from_lookup(lookup_from(&[(var, value)]));
            assert!(
                matches!(result, Err(MatchdayError::InvalidOption { .. })),
                "{}={} should be rejected",
                var,
                value
            );
        }
    }

    #[test]
    fn test_malformed_env_file_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "THIS IS NOT VALID\nMATCHDAY_CHUNK_SIZE=5\n").unwrap();

        let result = SimulationOptions::from_env_file(&path);
        assert!(matches!(result, Err(MatchdayError::InvalidOption { name: "dotenv", .. })));
    }

    #[test]
    fn test_missing_env_file_is_fine() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(SimulationOptions::from_env_file(dir.path().join(".env")).is_ok());
    }
}
