use crate::error::Result;
use crate::game::Game;
use crate::league::League;
use crate::standings::StandingsTable;

/// Supplies a league's current table.
pub trait StandingsSource {
    fn standings(&self, league: League) -> Result<StandingsTable>;
}

/// Supplies a league's unplayed games within the next `days_ahead` days.
pub trait FixtureSource {
    fn fixtures(&self, league: League, days_ahead: u32) -> Result<Vec<Game>>;
}
