/// ESPN display names that differ from the names used by the SPI feed.
const ESPN_TEAM_NAMES: [(&str, &str); 5] = [
    ("Sport", "Sport Recife"),
    ("America-MG", "America Mineiro"),
    ("Atletico-MG", "Atletico Mineiro"),
    ("Atletico-PR", "Atletico Paranaense"),
    ("Chapecoense", "Chapecoense AF"),
];

/// Map an ESPN team name to the name the fixture feed uses.
///
/// Names without a known alias are returned unchanged.
pub fn normalize_team_name(name: &str) -> &str {
    let name = name.trim();
    match ESPN_TEAM_NAMES.iter().find(|(espn, _)| *espn == name) {
        Some((_, canonical)) => *canonical,
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_aliases() {
        assert_eq!(normalize_team_name("Sport"), "Sport Recife");
        assert_eq!(normalize_team_name("Atletico-PR"), "Atletico Paranaense");
        assert_eq!(normalize_team_name(" Chapecoense "), "Chapecoense AF");
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(normalize_team_name("Arsenal"), "Arsenal");
        assert_eq!(normalize_team_name("sport"), "sport");
    }
}
