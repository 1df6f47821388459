use chrono::NaiveDate;
use rand::Rng;

use crate::constants::PROBABILITY_TOLERANCE;
use crate::error::{MatchdayError, Result};
use crate::scoring::Outcome;

/// An unplayed game with outcome probabilities.
///
/// `prob1`, `probtie` and `prob2` must sum to 1. The sampling functions do
/// not check this; call [`validate_games`] once before sampling.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub team1: String,
    pub team2: String,
    /// P(team1 wins)
    pub prob1: f64,
    /// P(team2 wins)
    pub prob2: f64,
    /// P(draw)
    pub probtie: f64,
    pub date: Option<NaiveDate>,
    pub proj_score1: Option<f64>,
    pub proj_score2: Option<f64>,
}

impl Game {
    pub fn new(
        team1: impl Into<String>,
        team2: impl Into<String>,
        prob1: f64,
        prob2: f64,
        probtie: f64,
    ) -> Self {
        Game {
            team1: team1.into(),
            team2: team2.into(),
            prob1,
            prob2,
            probtie,
            date: None,
            proj_score1: None,
            proj_score2: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_projected_scores(mut self, score1: f64, score2: f64) -> Self {
        self.proj_score1 = Some(score1);
        self.proj_score2 = Some(score2);
        self
    }

    /// Check that the probabilities are finite, non-negative and sum to 1.
    pub fn validate(&self) -> Result<()> {
        let probs = [self.prob1, self.probtie, self.prob2];
        let well_formed = probs.iter().all(|p| p.is_finite() && *p >= 0.0)
            && (probs.iter().sum::<f64>() - 1.0).abs() <= PROBABILITY_TOLERANCE;

        if well_formed {
            Ok(())
        } else {
            Err(MatchdayError::MalformedGameProbabilities {
                team1: self.team1.clone(),
                team2: self.team2.clone(),
                prob1: self.prob1,
                probtie: self.probtie,
                prob2: self.prob2,
            })
        }
    }

    /// Draw this game's outcome.
    pub fn sample_outcome<R: Rng>(&self, rng: &mut R) -> Outcome {
        sample_outcome(self.prob1, self.probtie, self.prob2, rng)
    }
}

/// Fail on the first game with malformed probabilities.
pub fn validate_games(games: &[Game]) -> Result<()> {
    games.iter().try_for_each(Game::validate)
}

/// Draw a win/tie/loss outcome for team1.
///
/// Draws `r` uniformly from [0, 1) and returns `Team1Win` if `r < p_win`,
/// `Tie` if `r < p_win + p_tie`, else `Team2Win`. An `r` landing exactly on
/// a cumulative boundary goes to the later outcome, so a zero-probability
/// outcome is never drawn.
///
/// Precondition: the three probabilities are non-negative and sum to 1.
pub fn sample_outcome<R: Rng>(p_win: f64, p_tie: f64, p_loss: f64, rng: &mut R) -> Outcome {
    debug_assert!((p_win + p_tie + p_loss - 1.0).abs() <= PROBABILITY_TOLERANCE);

    let r: f64 = rng.gen();
    if r < p_win {
        Outcome::Team1Win
    } else if r < p_win + p_tie {
        Outcome::Tie
    } else {
        Outcome::Team2Win
    }
}
