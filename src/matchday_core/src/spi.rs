use std::io::Read;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use crate::constants::GAMES_CSV_URL;
use crate::error::{MatchdayError, Result};
use crate::game::Game;
use crate::http_client::fetch_text;
use crate::league::League;
use crate::sources::FixtureSource;

const REQUIRED_COLUMNS: [&str; 7] = ["date", "league_id", "team1", "team2", "prob1", "prob2", "probtie"];

/// Upcoming games from the SPI match predictions CSV.
#[derive(Clone, Debug)]
pub struct SpiFixtures {
    url: String,
}

impl SpiFixtures {
    pub fn new(url: impl Into<String>) -> Self {
        SpiFixtures { url: url.into() }
    }
}

impl Default for SpiFixtures {
    fn default() -> Self {
        SpiFixtures::new(GAMES_CSV_URL)
    }
}

impl FixtureSource for SpiFixtures {
    fn fixtures(&self, league: League, days_ahead: u32) -> Result<Vec<Game>> {
        let csv = fetch_text(&self.url)?;
        let window = FixtureWindow::from_now(days_ahead);
        let games = parse_fixtures_csv(csv.as_bytes(), league, &window)?;
        log::info!(
            "{}: {} games before {} from {}",
            league,
            games.len(),
            window.before,
            self.url
        );
        Ok(games)
    }
}

/// Open interval of kickoff dates to simulate.
///
/// Games are dated by day only and compared at local midnight, so a game
/// dated today is already past `after` and excluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixtureWindow {
    pub after: NaiveDateTime,
    pub before: NaiveDateTime,
}

impl FixtureWindow {
    /// From `now` until the start of the day `days_ahead + 1` days later.
    pub fn new(now: NaiveDateTime, days_ahead: u32) -> Self {
        let last_day = now.date() + Duration::days(i64::from(days_ahead) + 1);
        FixtureWindow {
            after: now,
            before: last_day.and_time(NaiveTime::MIN),
        }
    }

    pub fn from_now(days_ahead: u32) -> Self {
        FixtureWindow::new(Local::now().naive_local(), days_ahead)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let kickoff = date.and_time(NaiveTime::MIN);
        kickoff > self.after && kickoff < self.before
    }
}

#[derive(Debug, Deserialize)]
struct SpiRow {
    date: String,
    league_id: u32,
    team1: String,
    team2: String,
    prob1: Option<f64>,
    prob2: Option<f64>,
    probtie: Option<f64>,
    #[serde(default)]
    proj_score1: Option<f64>,
    #[serde(default)]
    proj_score2: Option<f64>,
}

/// Games of `league` inside `window` from an SPI matches CSV.
///
/// Rows that fail to parse, or that lack probabilities, are skipped with a
/// warning. A CSV without the expected columns is an error.
pub fn parse_fixtures_csv<R: Read>(reader: R, league: League, window: &FixtureWindow) -> Result<Vec<Game>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|&&column| !headers.iter().any(|h| h == column))
    {
        return Err(MatchdayError::FixtureParse(format!("missing column '{}'", missing)));
    }

    let league_id = league.spi_id();
    let mut games = Vec::new();
    let mut skipped = 0usize;

    for (index, record) in rdr.deserialize::<SpiRow>().enumerate() {
        let row = match record {
            Ok(row) => row,
            Err(e) => {
                skipped += 1;
                log::warn!("skipping fixture row {}: {}", index + 2, e);
                continue;
            }
        };
        if row.league_id != league_id {
            continue;
        }

        let date = match NaiveDate::parse_from_str(&row.date, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                skipped += 1;
                log::warn!("skipping fixture row {}: bad date '{}': {}", index + 2, row.date, e);
                continue;
            }
        };
        if !window.contains(date) {
            continue;
        }

        let (Some(prob1), Some(prob2), Some(probtie)) = (row.prob1, row.prob2, row.probtie) else {
            skipped += 1;
            log::warn!(
                "skipping {} vs {} on {}: missing probabilities",
                row.team1,
                row.team2,
                date
            );
            continue;
        };

        let mut game = Game::new(row.team1, row.team2, prob1, prob2, probtie).with_date(date);
        if let (Some(score1), Some(score2)) = (row.proj_score1, row.proj_score2) {
            game = game.with_projected_scores(score1, score2);
        }
        games.push(game);
    }

    if skipped > 0 {
        log::warn!("{} fixture rows skipped", skipped);
    }
    Ok(games)
}
