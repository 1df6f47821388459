use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::MatchdayError;
use crate::sampler::FrequencyMap;
use crate::standings::{StandingsKey, StandingsTable};

/// Whether composed results carry raw counts or probabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Frequency,
    Probability,
}

impl FromStr for OutputMode {
    type Err = MatchdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frequency" => Ok(OutputMode::Frequency),
            "probability" => Ok(OutputMode::Probability),
            other => Err(MatchdayError::InvalidOption {
                name: "mode",
                reason: format!("expected 'frequency' or 'probability', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Frequency => f.write_str("frequency"),
            OutputMode::Probability => f.write_str("probability"),
        }
    }
}

/// Projected final tables, each with how often it came up.
#[derive(Clone, Debug, PartialEq)]
pub enum Distribution {
    Frequency(HashMap<StandingsKey, u64>),
    Probability(HashMap<StandingsKey, f64>),
}

impl Distribution {
    /// Number of distinct projected tables.
    pub fn len(&self) -> usize {
        match self {
            Distribution::Frequency(map) => map.len(),
            Distribution::Probability(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> OutputMode {
        match self {
            Distribution::Frequency(_) => OutputMode::Frequency,
            Distribution::Probability(_) => OutputMode::Probability,
        }
    }

    /// Probability of every projected table, whatever the mode.
    pub fn probabilities(&self) -> HashMap<StandingsKey, f64> {
        match self {
            Distribution::Probability(map) => map.clone(),
            Distribution::Frequency(map) => {
                let trials: u64 = map.values().sum();
                map.iter()
                    .map(|(key, &count)| (key.clone(), count as f64 / trials as f64))
                    .collect()
            }
        }
    }
}

/// Add the baseline table to every sampled table, keeping the counts.
///
/// Merging with a fixed baseline is a per-team sum, so distinct sampled
/// tables stay distinct and the counts still sum to the trial count.
pub fn compose_frequencies(baseline: &StandingsTable, frequencies: &FrequencyMap) -> HashMap<StandingsKey, u64> {
    let mut composed = HashMap::with_capacity(frequencies.len());
    for (sampled, &count) in frequencies {
        let key = baseline.clone().merge(&sampled.to_table()).canonical();
        *composed.entry(key).or_insert(0) += count;
    }
    composed
}

/// Like [`compose_frequencies`], with each count divided by the trial count.
///
/// Values sum to 1. An empty frequency map gives an empty result.
pub fn compose_probabilities(baseline: &StandingsTable, frequencies: &FrequencyMap) -> HashMap<StandingsKey, f64> {
    let trials: u64 = frequencies.values().sum();
    compose_frequencies(baseline, frequencies)
        .into_iter()
        .map(|(key, count)| (key, count as f64 / trials as f64))
        .collect()
}

/// Compose in the requested output mode.
pub fn compose(baseline: &StandingsTable, frequencies: &FrequencyMap, mode: OutputMode) -> Distribution {
    match mode {
        OutputMode::Frequency => Distribution::Frequency(compose_frequencies(baseline, frequencies)),
        OutputMode::Probability => Distribution::Probability(compose_probabilities(baseline, frequencies)),
    }
}
