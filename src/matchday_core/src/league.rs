use std::fmt;
use std::str::FromStr;

use crate::error::MatchdayError;
use crate::scoring::ScoringPolicy;

/// Leagues with both a standings page and an SPI fixture feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum League {
    Premier,
    Brasileirao,
}

impl League {
    pub const ALL: [League; 2] = [League::Premier, League::Brasileirao];

    /// Code accepted by [`League::from_str`].
    pub fn code(&self) -> &'static str {
        match self {
            League::Premier => "PREMIER",
            League::Brasileirao => "BRASILEIRAO",
        }
    }

    /// League id used by the SPI fixture feed.
    pub fn spi_id(&self) -> u32 {
        match self {
            League::Premier => 2411,
            League::Brasileirao => 2105,
        }
    }

    /// ESPN standings page for the league.
    pub fn standings_url(&self) -> &'static str {
        match self {
            League::Premier => "http://www.espn.com/soccer/standings/_/league/eng.1",
            League::Brasileirao => "http://www.espn.com/soccer/standings/_/league/bra.1",
        }
    }

    pub fn scoring(&self) -> ScoringPolicy {
        // Both leagues award 3/1/0.
        ScoringPolicy::STANDARD
    }
}

impl FromStr for League {
    type Err = MatchdayError;

    /// Codes are matched exactly; `"premier"` is not a league.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        League::ALL
            .into_iter()
            .find(|league| league.code() == s)
            .ok_or_else(|| MatchdayError::InvalidLeague(s.to_string()))
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
