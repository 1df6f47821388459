use serde::{Deserialize, Serialize};

/// One team's row in a league table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Standing {
    pub team: String,
    pub goal_diff: i32,
    pub points: u32,
}

impl Standing {
    pub fn new(team: impl Into<String>, goal_diff: i32, points: u32) -> Self {
        Standing {
            team: team.into(),
            goal_diff,
            points,
        }
    }
}

/// A league table in construction order.
///
/// Team names are unique within a table. Row order carries no meaning; use
/// [`StandingsTable::canonical`] to get a value that compares equal for equal
/// content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsTable {
    rows: Vec<Standing>,
}

impl StandingsTable {
    /// Empty table.
    pub fn new() -> Self {
        StandingsTable { rows: Vec::new() }
    }

    /// Build a table from rows whose team names are already unique.
    pub fn from_rows(rows: Vec<Standing>) -> Self {
        debug_assert!(
            {
                let mut teams: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
                teams.sort_unstable();
                teams.windows(2).all(|w| w[0] != w[1])
            },
            "duplicate team in standings"
        );
        StandingsTable { rows }
    }

    /// Rows in construction order.
    pub fn rows(&self) -> &[Standing] {
        &self.rows
    }

    /// Number of teams.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a team's row.
    pub fn get(&self, team: &str) -> Option<&Standing> {
        self.rows.iter().find(|r| r.team == team)
    }

    /// Iterate rows in construction order.
    pub fn iter(&self) -> std::slice::Iter<'_, Standing> {
        self.rows.iter()
    }

    /// Add `other` into this table, team by team.
    ///
    /// Teams already present get their goal difference and points summed;
    /// teams only in `other` are appended in `other`'s order. Takes `self` by
    /// value, so neither caller-visible input is modified.
    pub fn merge(mut self, other: &StandingsTable) -> StandingsTable {
        // One league per table, 20-30 rows.
        for row in &other.rows {
            match self.rows.iter_mut().find(|r| r.team == row.team) {
                Some(existing) => {
                    existing.goal_diff += row.goal_diff;
                    existing.points += row.points;
                }
                None => self.rows.push(row.clone()),
            }
        }
        self
    }

    /// Sort rows by team name to get an order-independent key.
    pub fn canonical(self) -> StandingsKey {
        let mut rows = self.rows;
        rows.sort_by(|a, b| a.team.cmp(&b.team));
        StandingsKey(rows)
    }
}

impl FromIterator<Standing> for StandingsTable {
    fn from_iter<I: IntoIterator<Item = Standing>>(iter: I) -> Self {
        StandingsTable::from_rows(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StandingsTable {
    type Item = &'a Standing;
    type IntoIter = std::slice::Iter<'a, Standing>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl From<StandingsKey> for StandingsTable {
    fn from(key: StandingsKey) -> Self {
        StandingsTable { rows: key.0 }
    }
}

/// A standings table in canonical (team-sorted) order.
///
/// Equal content always yields equal keys, so this is what frequency maps
/// are keyed on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StandingsKey(Vec<Standing>);

impl StandingsKey {
    /// Rows sorted by team name.
    pub fn rows(&self) -> &[Standing] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get a team's row by binary search.
    pub fn get(&self, team: &str) -> Option<&Standing> {
        self.0
            .binary_search_by(|r| r.team.as_str().cmp(team))
            .ok()
            .map(|i| &self.0[i])
    }

    /// Copy back into a table, in team order.
    pub fn to_table(&self) -> StandingsTable {
        StandingsTable { rows: self.0.clone() }
    }
}

impl From<StandingsTable> for StandingsKey {
    fn from(table: StandingsTable) -> Self {
        table.canonical()
    }
}

/// Sum two tables team by team into a new table.
///
/// Rows follow `a`'s order, then teams only in `b` in `b`'s order.
pub fn merge_standings(a: &StandingsTable, b: &StandingsTable) -> StandingsTable {
    a.clone().merge(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, i32, u32)]) -> StandingsTable {
        rows.iter()
            .map(|&(team, goal_diff, points)| Standing::new(team, goal_diff, points))
            .collect()
    }

    #[test]
    fn test_merge_empty() {
        let merged = merge_standings(&StandingsTable::new(), &StandingsTable::new());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_with_self_doubles() {
        let a = table(&[("A", 2, 10), ("B", -2, 8)]);
        let merged = merge_standings(&a, &a);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("A"), Some(&Standing::new("A", 4, 20)));
        assert_eq!(merged.get("B"), Some(&Standing::new("B", -4, 16)));
    }

    #[test]
    fn test_merge_asymmetric_teams() {
        let a = table(&[("A", 1, 4), ("B", 0, 2)]);
        let b = table(&[("C", 3, 3), ("A", -1, 1)]);
        let merged = merge_standings(&a, &b);

        let teams: Vec<&str> = merged.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(teams, vec!["A", "B", "C"]);
        assert_eq!(merged.get("A"), Some(&Standing::new("A", 0, 5)));
        assert_eq!(merged.get("B"), Some(&Standing::new("B", 0, 2)));
        assert_eq!(merged.get("C"), Some(&Standing::new("C", 3, 3)));
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let a = table(&[("A", 2, 10)]);
        let b = table(&[("A", 0, 3), ("B", 0, 0)]);
        let a_before = a.clone();
        let b_before = b.clone();

        let _ = merge_standings(&a, &b);
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_merge_commutative_up_to_order() {
        let a = table(&[("A", 2, 10), ("B", -2, 8)]);
        let b = table(&[("B", 0, 3), ("C", 0, 1)]);

        let ab = merge_standings(&a, &b).canonical();
        let ba = merge_standings(&b, &a).canonical();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_baseline_composition_scenario() {
        let baseline = table(&[("A", 2, 10), ("B", -2, 8)]);
        let sampled = table(&[("A", 0, 3), ("B", 0, 0)]);

        let composed = merge_standings(&baseline, &sampled);
        assert_eq!(composed, table(&[("A", 2, 13), ("B", -2, 8)]));
    }

    #[test]
    fn test_canonical_ignores_construction_order() {
        let x = table(&[("B", 0, 3), ("A", 0, 0), ("C", 1, 1)]);
        let y = table(&[("C", 1, 1), ("B", 0, 3), ("A", 0, 0)]);

        let kx = x.canonical();
        assert_eq!(kx, y.canonical());
        let teams: Vec<&str> = kx.rows().iter().map(|r| r.team.as_str()).collect();
        assert_eq!(teams, vec!["A", "B", "C"]);
        assert_eq!(kx.get("C"), Some(&Standing::new("C", 1, 1)));
        assert_eq!(kx.get("D"), None);
    }
}
