// Realized-season noise around projected stats.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::player::Player;
use crate::standings::ScoringCategory;

/// Copy the pool with every scoring stat redrawn around its projection.
///
/// Each stat is sampled from `Normal(value, |value| * variability)` and
/// floored at zero. Pool order and weighted values are kept, so a draft
/// over the copy still follows the projections.
pub fn realize_stats<R: Rng + ?Sized>(
    pool: &[Player],
    categories: &[ScoringCategory],
    variability: f64,
    rng: &mut R,
) -> Vec<Player> {
    pool.iter()
        .map(|player| {
            let mut realized = player.clone();
            for cat in categories {
                let Some(value) = realized.stats.get_mut(&cat.name) else {
                    continue;
                };
                let spread = value.abs() * variability;
                if spread <= 0.0 {
                    continue;
                }
                if let Ok(dist) = Normal::new(*value, spread) {
                    *value = dist.sample(rng).max(0.0);
                }
            }
            realized
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::rng::trial_rng;
    use std::collections::HashMap;

    fn pool() -> Vec<Player> {
        vec![
            Player::new(
                "Slugger",
                "1B",
                [("HR".to_string(), 40.0), ("PA".to_string(), 650.0)]
                    .into_iter()
                    .collect::<HashMap<_, _>>(),
            ),
            Player::new(
                "Ace",
                "P",
                [("ERA".to_string(), 3.20)].into_iter().collect::<HashMap<_, _>>(),
            ),
        ]
    }

    #[test]
    fn zero_variability_keeps_projections() {
        let players = pool();
        let mut rng = trial_rng(1, 0, 0);
        let realized = realize_stats(
            &players,
            &[ScoringCategory::higher("HR"), ScoringCategory::lower("ERA")],
            0.0,
            &mut rng,
        );
        assert_eq!(realized, players);
    }

    #[test]
    fn only_scoring_categories_move() {
        let players = pool();
        let mut rng = trial_rng(1, 0, 0);
        let realized = realize_stats(&players, &[ScoringCategory::higher("HR")], 0.2, &mut rng);

        assert_eq!(realized[0].stat("PA"), Some(650.0));
        assert_ne!(realized[0].stat("HR"), Some(40.0));
        assert!(realized[0].stat("HR").unwrap() >= 0.0);
        assert_eq!(realized[1].stat("ERA"), Some(3.20));
    }

    #[test]
    fn order_and_values_preserved() {
        let mut players = pool();
        players[0].weighted_value = 5.0;
        players[1].weighted_value = 2.0;
        let mut rng = trial_rng(9, 2, 4);
        let realized = realize_stats(&players, &[ScoringCategory::higher("HR")], 0.5, &mut rng);
        assert_eq!(realized[0].name, "Slugger");
        assert_eq!(realized[0].weighted_value, 5.0);
        assert_eq!(realized[1].name, "Ace");
    }

    #[test]
    fn same_seed_same_draws() {
        let players = pool();
        let cats = [ScoringCategory::higher("HR"), ScoringCategory::lower("ERA")];
        let a = realize_stats(&players, &cats, 0.1, &mut trial_rng(3, 0, 1));
        let b = realize_stats(&players, &cats, 0.1, &mut trial_rng(3, 0, 1));
        assert_eq!(a, b);
    }
}
