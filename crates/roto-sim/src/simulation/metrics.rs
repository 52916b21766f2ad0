// Placement statistics aggregated over repeated trials.

use serde::Serialize;

/// What one trial recorded about its randomly chosen test team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    pub test_team_id: usize,
    /// 1-based finishing position.
    pub position: usize,
    pub roto_points: u32,
    /// Players taken in the draft (short when the pool ran out).
    pub picks: usize,
}

/// Aggregate results for one weight set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementMetrics {
    pub scheme_index: usize,
    pub scheme_name: String,
    pub trials: usize,
    pub average_position: f64,
    pub average_roto_score: f64,
    pub percent_first_place: f64,
    pub percent_top_three: f64,
    /// Fraction of trials finishing strictly below `bottom_tier_threshold`.
    pub percent_bottom_tier: f64,
    pub bottom_tier_threshold: usize,
}

/// Fold trial outcomes into per-weight-set metrics.
///
/// Fractions are plain counts over the number of trials. An empty slice
/// yields all-zero metrics.
pub fn aggregate(
    scheme_index: usize,
    scheme_name: &str,
    outcomes: &[TrialOutcome],
    bottom_tier_threshold: usize,
) -> PlacementMetrics {
    let trials = outcomes.len();
    let ratio = |count: usize| {
        if trials == 0 {
            0.0
        } else {
            count as f64 / trials as f64
        }
    };

    let position_sum: usize = outcomes.iter().map(|o| o.position).sum();
    let points_sum: u64 = outcomes.iter().map(|o| u64::from(o.roto_points)).sum();
    let first = outcomes.iter().filter(|o| o.position == 1).count();
    let top_three = outcomes.iter().filter(|o| o.position <= 3).count();
    let bottom = outcomes
        .iter()
        .filter(|o| o.position > bottom_tier_threshold)
        .count();

    PlacementMetrics {
        scheme_index,
        scheme_name: scheme_name.to_string(),
        trials,
        average_position: ratio(position_sum),
        average_roto_score: if trials == 0 {
            0.0
        } else {
            points_sum as f64 / trials as f64
        },
        percent_first_place: ratio(first),
        percent_top_three: ratio(top_three),
        percent_bottom_tier: ratio(bottom),
        bottom_tier_threshold,
    }
}
