// Category z-scores over the combined hitter and pitcher pool.

use std::collections::{BTreeMap, HashMap};

use crate::player::Player;
use crate::standings::ScoringCategory;

/// Spread of one category across the players that carry it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolStats {
    pub mean: f64,
    pub stdev: f64,
}

/// A category whose spread is below this is flat; every player scores 0.
const STDEV_EPSILON: f64 = 1e-9;

/// Mean and population standard deviation of `values`.
///
/// The projected pool is every player who could be drafted, not a sample of
/// them, hence the N denominator. No values gives a flat `(0, 0)`.
pub fn compute_pool_stats(values: &[f64]) -> PoolStats {
    if values.is_empty() {
        return PoolStats { mean: 0.0, stdev: 0.0 };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    PoolStats {
        mean,
        stdev: variance.sqrt(),
    }
}

/// Standard deviations above the category mean. Flat categories score 0.
pub fn compute_zscore(value: f64, stats: &PoolStats) -> f64 {
    if stats.stdev < STDEV_EPSILON {
        return 0.0;
    }
    (value - stats.mean) / stats.stdev
}

/// Per-category z-scores for one player, keyed in category-name order.
/// Categories the player does not carry are absent.
pub type CategoryZScores = BTreeMap<String, f64>;

/// Pool stats for every scoring category, taken over the players that
/// carry it (hitters for batting stats, pitchers for pitching stats).
pub fn compute_category_pool_stats(
    players: &[Player],
    categories: &[ScoringCategory],
) -> HashMap<String, PoolStats> {
    categories
        .iter()
        .map(|cat| {
            let values: Vec<f64> = players.iter().filter_map(|p| p.stat(&cat.name)).collect();
            (cat.name.clone(), compute_pool_stats(&values))
        })
        .collect()
}

/// Compute z-scores for every player, index-aligned with `players`.
///
/// Lower-is-better categories have their sign flipped so that a positive
/// z-score always means "helps the team".
pub fn compute_category_zscores(
    players: &[Player],
    categories: &[ScoringCategory],
) -> Vec<CategoryZScores> {
    let pool_stats = compute_category_pool_stats(players, categories);

    players
        .iter()
        .map(|player| {
            categories
                .iter()
                .filter_map(|cat| {
                    let value = player.stat(&cat.name)?;
                    let stats = pool_stats.get(&cat.name)?;
                    let z = compute_zscore(value, stats);
                    let z = if cat.lower_is_better { -z } else { z };
                    Some((cat.name.clone(), z))
                })
                .collect()
        })
        .collect()
}
