/// Points for a win under standard league scoring
pub const WIN_POINTS: u32 = 3;

/// Points for a draw under standard league scoring
pub const TIE_POINTS: u32 = 1;

/// Points for a loss under standard league scoring
pub const LOSS_POINTS: u32 = 0;

/// Default number of Monte Carlo trials
pub const DEFAULT_TRIALS: usize = 10_000;

/// Default fixture window, in days from now
pub const DEFAULT_DAYS_AHEAD: u32 = 7;

/// Allowed slack when checking that a game's probabilities sum to 1
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Trial counts above this get a warning: the frequency map grows with the
/// number of distinct outcomes, which can approach the trial count.
pub const LARGE_TRIAL_COUNT: usize = 1_000_000;

/// Two-sided confidence level for rank probability margins
pub const RANK_CONFIDENCE: f64 = 0.95;

/// SPI club match predictions feed
pub const GAMES_CSV_URL: &str = "https://projects.fivethirtyeight.com/soccer-api/club/spi_matches.csv";

/// HTTP request timeout for the acquisition collaborators
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
