//! Rank titles derived from an aura balance.

/// Thresholds and titles, highest first. The last entry is the floor title.
pub const TITLES: [(i64, &str); 17] = [
    (1_000_000, "Aura God"),
    (500_000, "Aura Overlord"),
    (100_000, "Aura Master"),
    (50_000, "Aura Legend"),
    (25_000, "Aura Virtuoso"),
    (10_000, "Aura Expert"),
    (5_000, "Aura Adept"),
    (2_500, "Aura Scholar"),
    (1_000, "Aura Apprentice"),
    (500, "Aura Novice"),
    (100, "Aura Initiate"),
    (0, "Aura Seeker"),
    (-500, "Aura Deficit"),
    (-1_000, "Aura Debtor"),
    (-5_000, "Aura Thief"),
    (-10_000, "Aura Void"),
    (-25_000, "Aura Banished"),
];

/// Returns the title of the highest threshold at or below `amount`.
///
/// Amounts below every threshold get the lowest title.
pub fn resolve_title(amount: i64) -> &'static str {
    TITLES
        .iter()
        .find(|(threshold, _)| amount >= *threshold)
        .map(|(_, title)| *title)
        .unwrap_or(TITLES[TITLES.len() - 1].1)
}

/// Titles earned at or above zero, highest requirement first.
pub fn ascension_titles() -> impl Iterator<Item = (i64, &'static str)> {
    TITLES.iter().copied().filter(|(threshold, _)| *threshold >= 0)
}

/// Titles below zero, lowest requirement first.
pub fn descent_titles() -> impl Iterator<Item = (i64, &'static str)> {
    TITLES
        .iter()
        .rev()
        .copied()
        .filter(|(threshold, _)| *threshold < 0)
}
