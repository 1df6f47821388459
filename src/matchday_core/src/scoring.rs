use crate::constants::{LOSS_POINTS, TIE_POINTS, WIN_POINTS};

/// Result of a single game, from team1's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Team1Win,
    Tie,
    Team2Win,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Team1Win, Outcome::Tie, Outcome::Team2Win];
}

/// Points handed to (team1, team2) for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointsAward {
    pub team1: u32,
    pub team2: u32,
}

/// Points table for a league.
///
/// Every league currently uses the same win/tie/loss values, but callers take
/// the policy as a value so that league-specific rules can be plugged in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub win: u32,
    pub tie: u32,
    pub loss: u32,
}

impl ScoringPolicy {
    /// Three points for a win, one for a draw, none for a loss.
    pub const STANDARD: ScoringPolicy = ScoringPolicy {
        win: WIN_POINTS,
        tie: TIE_POINTS,
        loss: LOSS_POINTS,
    };

    /// Policy with custom points for a win, a draw and a loss.
    pub fn new(win: u32, tie: u32, loss: u32) -> Self {
        ScoringPolicy { win, tie, loss }
    }

    pub fn points_from_outcome(&self, outcome: Outcome) -> PointsAward {
        match outcome {
            Outcome::Team1Win => PointsAward {
                team1: self.win,
                team2: self.loss,
            },
            Outcome::Tie => PointsAward {
                team1: self.tie,
                team2: self.tie,
            },
            Outcome::Team2Win => PointsAward {
                team1: self.loss,
                team2: self.win,
            },
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        ScoringPolicy::STANDARD
    }
}

/// Standard-scoring shorthand for [`ScoringPolicy::points_from_outcome`].
pub fn points_from_outcome(outcome: Outcome) -> PointsAward {
    ScoringPolicy::STANDARD.points_from_outcome(outcome)
}
