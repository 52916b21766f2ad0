// Rotisserie standings: per-category ranks summed into roto points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::Team;

// ---------------------------------------------------------------------------
// Categories and policies
// ---------------------------------------------------------------------------

/// A scoring category and the direction in which it is ranked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringCategory {
    pub name: String,
    /// Rank ascending (ERA, WHIP) instead of descending.
    pub lower_is_better: bool,
}

impl ScoringCategory {
    pub fn higher(name: &str) -> Self {
        ScoringCategory {
            name: name.to_string(),
            lower_is_better: false,
        }
    }

    pub fn lower(name: &str) -> Self {
        ScoringCategory {
            name: name.to_string(),
            lower_is_better: true,
        }
    }
}

pub const DEFAULT_BATTING_CATEGORIES: [&str; 5] = ["HR", "RBI", "R", "SB", "AVG"];
pub const DEFAULT_PITCHING_CATEGORIES: [&str; 5] = ["W", "SV", "K", "ERA", "WHIP"];
pub const DEFAULT_LOWER_IS_BETTER: [&str; 2] = ["ERA", "WHIP"];

/// The standard 5x5 roto categories, batting first.
pub fn default_categories() -> Vec<ScoringCategory> {
    DEFAULT_BATTING_CATEGORIES
        .iter()
        .chain(DEFAULT_PITCHING_CATEGORIES.iter())
        .map(|name| ScoringCategory {
            name: name.to_string(),
            lower_is_better: DEFAULT_LOWER_IS_BETTER.contains(name),
        })
        .collect()
}

/// What to do when no rostered player carries a scoring category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingStatPolicy {
    /// Abort scoring with [`StandingsError::MissingCategory`].
    #[default]
    Error,
    /// Treat the category as zero for every team.
    Zero,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StandingsError {
    #[error("scoring category `{category}` is not carried by any rostered player")]
    MissingCategory { category: String },
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

/// One team's line in the final standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandingsEntry {
    pub team_id: usize,
    pub roto_points: u32,
}

/// Rank teams within each category and sum the rank points.
///
/// In a league of `T` teams the best total in a category earns `T` points
/// and the worst earns 1. Equal totals keep league order, so the team that
/// appears first in `teams` takes the better rank. The result is sorted by
/// roto points descending; ties again keep league order.
pub fn compute_standings(
    teams: &[Team<'_>],
    categories: &[ScoringCategory],
    missing: MissingStatPolicy,
) -> Result<Vec<StandingsEntry>, StandingsError> {
    let num_teams = teams.len();
    let mut points = vec![0u32; num_teams];

    for category in categories {
        if missing == MissingStatPolicy::Error && !teams.iter().any(|t| t.has_category(&category.name)) {
            return Err(StandingsError::MissingCategory {
                category: category.name.clone(),
            });
        }

        // (league index, category total)
        let mut totals: Vec<(usize, f64)> = teams
            .iter()
            .enumerate()
            .map(|(idx, team)| (idx, team.category_total(&category.name)))
            .collect();
        rank_totals(&mut totals, category.lower_is_better);

        for (rank, (idx, _)) in totals.iter().enumerate() {
            points[*idx] += (num_teams - rank) as u32;
        }
    }

    let mut standings: Vec<StandingsEntry> = teams
        .iter()
        .zip(points)
        .map(|(team, roto_points)| StandingsEntry {
            team_id: team.team_id,
            roto_points,
        })
        .collect();
    standings.sort_by(|a, b| b.roto_points.cmp(&a.roto_points));

    Ok(standings)
}

/// Stable sort of category totals, best first.
fn rank_totals(totals: &mut [(usize, f64)], lower_is_better: bool) {
    if lower_is_better {
        totals.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    } else {
        totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    }
}

/// 1-based finishing position of a team, if it appears in the standings.
pub fn finishing_position(standings: &[StandingsEntry], team_id: usize) -> Option<usize> {
    standings
        .iter()
        .position(|entry| entry.team_id == team_id)
        .map(|idx| idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use std::collections::HashMap;

    fn player(stats: &[(&str, f64)]) -> Player {
        Player::new(
            "P",
            "UT",
            stats.iter().map(|(k, v)| (k.to_string(), *v)).collect::<HashMap<_, _>>(),
        )
    }

    fn cats(names: &[&str]) -> Vec<ScoringCategory> {
        names
            .iter()
            .map(|n| ScoringCategory {
                name: n.to_string(),
                lower_is_better: DEFAULT_LOWER_IS_BETTER.contains(n),
            })
            .collect()
    }

    #[test]
    fn two_team_single_category_scenario() {
        let a = player(&[("HR", 10.0)]);
        let b = player(&[("HR", 5.0)]);
        let mut teams = vec![Team::new(0), Team::new(1)];
        teams[0].draft_player(&a);
        teams[1].draft_player(&b);

        let standings = compute_standings(&teams, &cats(&["HR"]), MissingStatPolicy::Error).unwrap();
        assert_eq!(
            standings,
            vec![
                StandingsEntry { team_id: 0, roto_points: 2 },
                StandingsEntry { team_id: 1, roto_points: 1 },
            ]
        );
    }

    #[test]
    fn lower_era_ranks_higher() {
        let good = player(&[("ERA", 3.0)]);
        let bad = player(&[("ERA", 4.0)]);
        let mut teams = vec![Team::new(0), Team::new(1)];
        teams[0].draft_player(&bad);
        teams[1].draft_player(&good);

        let standings = compute_standings(&teams, &cats(&["ERA"]), MissingStatPolicy::Error).unwrap();
        assert_eq!(standings[0], StandingsEntry { team_id: 1, roto_points: 2 });
        assert_eq!(standings[1], StandingsEntry { team_id: 0, roto_points: 1 });
    }

    #[test]
    fn whip_is_ranked_ascending() {
        let low = player(&[("WHIP", 1.05)]);
        let high = player(&[("WHIP", 1.40)]);
        let mut teams = vec![Team::new(0), Team::new(1)];
        teams[0].draft_player(&high);
        teams[1].draft_player(&low);

        let standings = compute_standings(&teams, &cats(&["WHIP"]), MissingStatPolicy::Error).unwrap();
        assert_eq!(standings[0].team_id, 1);
    }

    #[test]
    fn category_points_sum_to_arithmetic_series() {
        let players: Vec<Player> = (0..7)
            .map(|i| player(&[("HR", (i * 3 % 5) as f64), ("ERA", 3.0 + (i % 2) as f64)]))
            .collect();
        for num_teams in 1..=7 {
            let mut teams: Vec<Team> = (0..num_teams).map(Team::new).collect();
            for (i, p) in players.iter().take(num_teams).enumerate() {
                teams[i].draft_player(p);
            }
            let standings =
                compute_standings(&teams, &cats(&["HR"]), MissingStatPolicy::Error).unwrap();
            let total: u32 = standings.iter().map(|e| e.roto_points).sum();
            let expected = (num_teams * (num_teams + 1) / 2) as u32;
            assert_eq!(total, expected, "T = {num_teams}");

            let both = compute_standings(&teams, &cats(&["HR", "ERA"]), MissingStatPolicy::Error).unwrap();
            let total: u32 = both.iter().map(|e| e.roto_points).sum();
            assert_eq!(total, 2 * expected, "T = {num_teams}, two categories");
        }
    }

    #[test]
    fn category_ties_go_to_earlier_team() {
        let a = player(&[("HR", 20.0)]);
        let b = player(&[("HR", 20.0)]);
        let c = player(&[("HR", 20.0)]);
        let mut teams = vec![Team::new(0), Team::new(1), Team::new(2)];
        teams[0].draft_player(&a);
        teams[1].draft_player(&b);
        teams[2].draft_player(&c);

        let standings = compute_standings(&teams, &cats(&["HR"]), MissingStatPolicy::Error).unwrap();
        let points: Vec<(usize, u32)> = standings.iter().map(|e| (e.team_id, e.roto_points)).collect();
        assert_eq!(points, vec![(0, 3), (1, 2), (2, 1)]);
    }

    #[test]
    fn final_ties_keep_league_order() {
        // Team 0 wins HR, team 1 wins SB: both finish on 3 points.
        let a = player(&[("HR", 30.0), ("SB", 1.0)]);
        let b = player(&[("HR", 10.0), ("SB", 40.0)]);
        let mut teams = vec![Team::new(0), Team::new(1)];
        teams[0].draft_player(&a);
        teams[1].draft_player(&b);

        let standings = compute_standings(&teams, &cats(&["HR", "SB"]), MissingStatPolicy::Error).unwrap();
        assert_eq!(standings[0], StandingsEntry { team_id: 0, roto_points: 3 });
        assert_eq!(standings[1], StandingsEntry { team_id: 1, roto_points: 3 });

        // Reversing league order flips the tie-break.
        let mut reversed = vec![Team::new(1), Team::new(0)];
        reversed[0].draft_player(&b);
        reversed[1].draft_player(&a);
        let standings =
            compute_standings(&reversed, &cats(&["HR", "SB"]), MissingStatPolicy::Error).unwrap();
        assert_eq!(standings[0].team_id, 1);
    }

    #[test]
    fn empty_roster_scores_as_zero() {
        let a = player(&[("HR", 10.0), ("RBI", 20.0)]);
        let mut teams = vec![Team::new(0), Team::new(1)];
        teams[0].draft_player(&a);

        let standings = compute_standings(&teams, &cats(&["HR", "RBI"]), MissingStatPolicy::Error).unwrap();
        assert_eq!(standings[0].team_id, 0);
        assert_eq!(standings[0].roto_points, 4);
        assert_eq!(standings[1].roto_points, 2);
    }

    #[test]
    fn missing_category_fails_under_error_policy() {
        let a = player(&[("HR", 10.0)]);
        let mut teams = vec![Team::new(0), Team::new(1)];
        teams[0].draft_player(&a);

        let err = compute_standings(&teams, &cats(&["HR", "SV"]), MissingStatPolicy::Error).unwrap_err();
        assert_eq!(
            err,
            StandingsError::MissingCategory {
                category: "SV".into()
            }
        );
    }

    #[test]
    fn missing_category_counts_as_zero_under_zero_policy() {
        let a = player(&[("HR", 10.0)]);
        let mut teams = vec![Team::new(0), Team::new(1)];
        teams[0].draft_player(&a);

        let standings = compute_standings(&teams, &cats(&["HR", "SV"]), MissingStatPolicy::Zero).unwrap();
        // HR: team 0 -> 2, team 1 -> 1. SV: tie at 0, team 0 -> 2, team 1 -> 1.
        assert_eq!(standings[0], StandingsEntry { team_id: 0, roto_points: 4 });
        assert_eq!(standings[1], StandingsEntry { team_id: 1, roto_points: 2 });
    }

    #[test]
    fn whole_roster_counts_toward_totals() {
        let a1 = player(&[("HR", 10.0)]);
        let a2 = player(&[("HR", 10.0)]);
        let b = player(&[("HR", 15.0)]);
        let mut teams = vec![Team::new(0), Team::new(1)];
        teams[0].draft_player(&a1);
        teams[0].draft_player(&a2);
        teams[1].draft_player(&b);

        let standings = compute_standings(&teams, &cats(&["HR"]), MissingStatPolicy::Error).unwrap();
        assert_eq!(standings[0].team_id, 0);
    }

    #[test]
    fn finishing_position_is_one_based() {
        let standings = vec![
            StandingsEntry { team_id: 4, roto_points: 9 },
            StandingsEntry { team_id: 2, roto_points: 7 },
        ];
        assert_eq!(finishing_position(&standings, 4), Some(1));
        assert_eq!(finishing_position(&standings, 2), Some(2));
        assert_eq!(finishing_position(&standings, 0), None);
    }

    #[test]
    fn default_categories_mark_era_and_whip() {
        let categories = default_categories();
        assert_eq!(categories.len(), 10);
        let lower: Vec<&str> = categories
            .iter()
            .filter(|c| c.lower_is_better)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(lower, vec!["ERA", "WHIP"]);
    }
}
