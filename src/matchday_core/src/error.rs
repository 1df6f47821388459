use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchdayError {
    #[error("invalid league: {0}")]
    InvalidLeague(String),

    #[error("malformed probabilities for {team1} vs {team2}: prob1={prob1}, probtie={probtie}, prob2={prob2}")]
    MalformedGameProbabilities {
        team1: String,
        team2: String,
        prob1: f64,
        probtie: f64,
        prob2: f64,
    },

    #[error("invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse standings page: {0}")]
    StandingsParse(String),

    #[error("failed to parse fixture row: {0}")]
    FixtureParse(String),
}

impl MatchdayError {
    /// True for failures raised while fetching or parsing external data.
    pub fn is_acquisition_failure(&self) -> bool {
        match self {
            MatchdayError::Http(_) => true,
            MatchdayError::Csv(_) => true,
            MatchdayError::StandingsParse(_) => true,
            MatchdayError::FixtureParse(_) => true,
            MatchdayError::InvalidLeague(_) => false,
            MatchdayError::MalformedGameProbabilities { .. } => false,
            MatchdayError::InvalidOption { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchdayError>;
