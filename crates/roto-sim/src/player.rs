// Player records and weighted-value scoring.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Weight applied to a category that a weight set does not mention.
pub const DEFAULT_CATEGORY_WEIGHT: f64 = 1.0;

/// A projected player as consumed by the draft and standings engines.
///
/// `weighted_value` is filled in by [`Player::calculate_weighted_value`]
/// before a draft and is treated as read-only for the rest of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Display name. Not guaranteed to be unique across the pool.
    pub name: String,
    /// Eligible position tags, in the order the source listed them.
    pub positions: Vec<String>,
    /// Category name -> projected season total (or rate).
    pub stats: HashMap<String, f64>,
    /// Composite desirability score (weighted sum of z-scores).
    #[serde(default)]
    pub weighted_value: f64,
}

impl Player {
    /// Create a player from a comma-delimited position string, e.g. `"1B,OF"`.
    pub fn new(name: impl Into<String>, positions: &str, stats: HashMap<String, f64>) -> Self {
        Player {
            name: name.into(),
            positions: parse_positions(positions),
            stats,
            weighted_value: 0.0,
        }
    }

    /// Recompute `weighted_value` as the weighted sum of the given z-scores.
    ///
    /// Only categories present in `z_scores` contribute. A category that has
    /// no entry in `weights` is weighted at [`DEFAULT_CATEGORY_WEIGHT`].
    /// Terms are summed in category-name order, so players with identical
    /// z-scores get bit-identical values.
    pub fn calculate_weighted_value(
        &mut self,
        z_scores: &BTreeMap<String, f64>,
        weights: &HashMap<String, f64>,
    ) {
        self.weighted_value = z_scores
            .iter()
            .map(|(cat, z)| z * weights.get(cat).copied().unwrap_or(DEFAULT_CATEGORY_WEIGHT))
            .sum();
    }

    /// Projected value for a category, if the player carries it.
    pub fn stat(&self, category: &str) -> Option<f64> {
        self.stats.get(category).copied()
    }

}

/// Split a comma-delimited position string into trimmed, non-empty tags.
pub fn parse_positions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|p| p.trim().to_uppercase())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn map(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn zmap(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn weighted_value_sums_weighted_zscores() {
        let mut player = Player::new("Test Player", "1B", map(&[("HR", 10.0), ("RBI", 20.0)]));
        let z_scores = zmap(&[("HR", 1.5), ("RBI", 2.0)]);
        let weights = map(&[("HR", 1.0), ("RBI", 1.0)]);
        player.calculate_weighted_value(&z_scores, &weights);
        assert!(approx_eq(player.weighted_value, 3.5, 1e-10));
    }

    #[test]
    fn weighted_value_applies_weights() {
        let mut player = Player::new("Slugger", "OF", HashMap::new());
        let z_scores = zmap(&[("HR", 2.0), ("SB", -1.0)]);
        let weights = map(&[("HR", 1.5), ("SB", 0.5)]);
        player.calculate_weighted_value(&z_scores, &weights);
        // 2.0 * 1.5 + (-1.0) * 0.5 = 2.5
        assert!(approx_eq(player.weighted_value, 2.5, 1e-10));
    }

    #[test]
    fn missing_weight_defaults_to_one() {
        let mut player = Player::new("Speedster", "OF", HashMap::new());
        let z_scores = zmap(&[("SB", 3.0), ("R", 1.0)]);
        let weights = map(&[("SB", 2.0)]);
        player.calculate_weighted_value(&z_scores, &weights);
        assert!(approx_eq(player.weighted_value, 7.0, 1e-10));
    }

    #[test]
    fn weights_without_zscores_are_ignored() {
        let mut player = Player::new("Closer", "P", HashMap::new());
        let z_scores = zmap(&[("SV", 1.0)]);
        let weights = map(&[("SV", 1.0), ("HR", 50.0)]);
        player.calculate_weighted_value(&z_scores, &weights);
        assert!(approx_eq(player.weighted_value, 1.0, 1e-10));
    }

    #[test]
    fn recalculation_replaces_previous_value() {
        let mut player = Player::new("Ace", "P", HashMap::new());
        player.weighted_value = 99.0;
        player.calculate_weighted_value(&BTreeMap::new(), &HashMap::new());
        assert!(approx_eq(player.weighted_value, 0.0, 1e-10));
    }

    #[test]
    fn positions_parsed_from_comma_list() {
        assert_eq!(parse_positions("1B,OF"), vec!["1B", "OF"]);
        assert_eq!(parse_positions(" ss , 2b "), vec!["SS", "2B"]);
        assert_eq!(parse_positions("C,,"), vec!["C"]);
        assert!(parse_positions("").is_empty());
    }

    #[test]
    fn identical_zscores_give_identical_values() {
        let categories = ["HR", "RBI", "R", "SB", "AVG"];
        let z = [0.137, -1.291, 0.842, -0.563, 1.774];
        let weights = map(&[("HR", 1.3), ("RBI", 0.7), ("R", 1.1), ("SB", 0.9), ("AVG", 1.7)]);

        let forward: BTreeMap<String, f64> =
            categories.iter().zip(z).map(|(c, v)| (c.to_string(), v)).collect();
        let backward: BTreeMap<String, f64> =
            categories.iter().zip(z).rev().map(|(c, v)| (c.to_string(), v)).collect();

        let mut a = Player::new("Twin A", "OF", HashMap::new());
        let mut b = Player::new("Twin B", "OF", HashMap::new());
        for _ in 0..50 {
            a.calculate_weighted_value(&forward, &weights);
            b.calculate_weighted_value(&backward, &weights);
            assert_eq!(a.weighted_value.to_bits(), b.weighted_value.to_bits());
        }
    }

    #[test]
    fn stat_lookup() {
        let player = Player::new("Masher", "1B", map(&[("HR", 40.0)]));
        assert_eq!(player.stat("HR"), Some(40.0));
        assert_eq!(player.stat("SB"), None);
    }
}
