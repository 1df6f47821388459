use std::collections::HashSet;

use crate::error::{MatchdayError, Result};
use crate::html::{has_classes, opening_tag, strip_tags, tag_blocks};
use crate::http_client::fetch_text;
use crate::league::League;
use crate::sources::StandingsSource;
use crate::standings::{Standing, StandingsTable};
use crate::team::normalize_team_name;

const TABLE_CLASSES: [&str; 2] = ["standings", "has-team-logos"];
const TEAM_NAME_CLASS: &str = "team-names";
const GOAL_DIFF_CELL: usize = 7;
const POINTS_CELL: usize = 8;

/// Current standings scraped from ESPN's league table pages.
#[derive(Clone, Copy, Debug, Default)]
pub struct EspnStandings;

impl StandingsSource for EspnStandings {
    fn standings(&self, league: League) -> Result<StandingsTable> {
        let html = fetch_text(league.standings_url())?;
        let table = parse_standings_html(&html)?;
        log::info!("{}: {} teams in current standings", league, table.len());
        Ok(table)
    }
}

/// Read the standings table out of an ESPN standings page.
///
/// Body rows without enough cells or with non-numeric goal difference or
/// points are skipped. A page with no usable rows is an error.
pub fn parse_standings_html(html: &str) -> Result<StandingsTable> {
    let table = find_standings_table(html)
        .ok_or_else(|| MatchdayError::StandingsParse("no standings table found".to_string()))?;
    let body = tag_blocks(table, "<tbody", "</tbody>").next().unwrap_or(table);

    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for row in tag_blocks(body, "<tr", "</tr>") {
        let cells: Vec<&str> = tag_blocks(row, "<td", "</td>").collect();
        if cells.len() <= POINTS_CELL {
            continue;
        }

        let Some(standing) = parse_row(&cells) else {
            log::warn!("skipping unreadable standings row: {}", strip_tags(row));
            continue;
        };
        if !seen.insert(standing.team.clone()) {
            log::warn!("skipping duplicate standings row for {}", standing.team);
            continue;
        }
        rows.push(standing);
    }

    if rows.is_empty() {
        return Err(MatchdayError::StandingsParse("standings table has no team rows".to_string()));
    }
    Ok(StandingsTable::from_rows(rows))
}

fn find_standings_table(html: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(rel) = html[from..].find("<table") {
        let start = from + rel;
        let tag = opening_tag(html, start)?;
        if has_classes(tag, &TABLE_CLASSES) {
            let content_start = start + tag.len();
            let end = html[content_start..].find("</table>")? + content_start;
            return Some(&html[content_start..end]);
        }
        from = start + tag.len();
    }
    None
}

fn parse_row(cells: &[&str]) -> Option<Standing> {
    let team = team_name(cells[0])?;
    let goal_diff = parse_signed(&strip_tags(cells[GOAL_DIFF_CELL]))?;
    let points = strip_tags(cells[POINTS_CELL]).parse().ok()?;
    Some(Standing::new(normalize_team_name(&team), goal_diff, points))
}

fn team_name(cell: &str) -> Option<String> {
    let name = match cell.find(TEAM_NAME_CLASS) {
        Some(pos) => {
            let tag_start = cell[..pos].rfind('<')?;
            let span = &cell[tag_start..];
            let inner_start = span.find('>')? + 1;
            let inner_end = span[inner_start..].find("</span>")? + inner_start;
            strip_tags(&span[inner_start..inner_end])
        }
        None => strip_tags(cell),
    };
    (!name.is_empty()).then_some(name)
}

/// ESPN prints positive goal differences with a leading `+`.
fn parse_signed(s: &str) -> Option<i32> {
    s.strip_prefix('+').unwrap_or(s).parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(team: &str, goal_diff: &str, points: &str) -> String {
        format!(
            r#"<tr><td><span class="team-position">1</span><abbr>X</abbr><span class="team-names">{}</span></td><td>10</td><td>6</td><td>2</td><td>2</td><td>20</td><td>12</td><td>{}</td><td>{}</td></tr>"#,
            team, goal_diff, points
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            r#"<html><body><table class="other"><tr><td>nav</td></tr></table>
            <table class="standings has-team-logos"><thead><tr><th>Team</th><th>GP</th></tr></thead>
            <tbody>{}</tbody></table></body></html>"#,
            rows.join("\n")
        )
    }

    #[test]
    fn test_parse_standings_page() {
        let html = page(&[
            row("Arsenal", "+12", "30"),
            row("Chapecoense", "-4", "11"),
            row("Everton", "0", "15"),
        ]);
        let table = parse_standings_html(&html).unwrap();

        assert_eq!(
            table.rows(),
            &[
                Standing::new("Arsenal", 12, 30),
                Standing::new("Chapecoense AF", -4, 11),
                Standing::new("Everton", 0, 15),
            ]
        );
    }

    #[test]
    fn test_unreadable_rows_skipped() {
        let html = page(&[row("Arsenal", "+12", "30"), row("Burnley", "n/a", "7")]);
        let table = parse_standings_html(&html).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("Burnley").is_none());
    }

    #[test]
    fn test_missing_table() {
        let err = parse_standings_html("<html><table class=\"other\"></table></html>").unwrap_err();
        assert!(matches!(err, MatchdayError::StandingsParse(_)));
        assert!(err.is_acquisition_failure());
    }

    #[test]
    fn test_empty_table() {
        let err = parse_standings_html(&page(&[])).unwrap_err();
        assert!(matches!(err, MatchdayError::StandingsParse(_)));
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!(parse_signed("+7"), Some(7));
        assert_eq!(parse_signed("-3"), Some(-3));
        assert_eq!(parse_signed("0"), Some(0));
        assert_eq!(parse_signed(""), None);
    }
}
