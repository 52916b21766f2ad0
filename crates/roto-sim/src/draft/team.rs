// Team rosters and weekly lineup selection.

use std::collections::HashMap;

use crate::player::Player;

/// A fantasy team for the lifetime of one simulated league.
///
/// The roster borrows players from the trial's pool copy; a team is built
/// fresh for every trial and dropped once that trial's standings are known.
#[derive(Debug, Clone)]
pub struct Team<'a> {
    /// Index of the team within its league (also its draft-order seat).
    pub team_id: usize,
    /// Drafted players in pick order.
    pub players: Vec<&'a Player>,
}

impl<'a> Team<'a> {
    pub fn new(team_id: usize) -> Self {
        Team {
            team_id,
            players: Vec::new(),
        }
    }

    /// Add a player to the roster. No positional constraints are enforced.
    pub fn draft_player(&mut self, player: &'a Player) {
        self.players.push(player);
    }

    pub fn roster_size(&self) -> usize {
        self.players.len()
    }

    /// Sum of a category across the whole roster.
    ///
    /// Players that do not carry the stat contribute nothing.
    pub fn category_total(&self, category: &str) -> f64 {
        self.players.iter().filter_map(|p| p.stat(category)).sum()
    }

    /// Whether any rostered player carries the given stat.
    pub fn has_category(&self, category: &str) -> bool {
        self.players.iter().any(|p| p.stats.contains_key(category))
    }

    /// Pick a starting lineup greedily by weighted value.
    ///
    /// `lineup_constraints` maps a position tag to its number of slots.
    /// Players are visited best-first; each one takes the first of its
    /// eligible positions that still has an open slot, or sits if none do.
    ///
    /// Standings score whole rosters, so the simulator never calls this; it
    /// is exposed for callers that want weekly lineups from a drafted team.
    pub fn select_weekly_lineup(&self, lineup_constraints: &HashMap<String, usize>) -> Vec<&'a Player> {
        let mut remaining = lineup_constraints.clone();
        let mut sorted = self.players.clone();
        sorted.sort_by(|a, b| {
            b.weighted_value
                .partial_cmp(&a.weighted_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut lineup = Vec::new();
        for player in sorted {
            let open_position = player
                .positions
                .iter()
                .find(|pos| remaining.get(pos.as_str()).is_some_and(|slots| *slots > 0));
            if let Some(slots) = open_position.and_then(|pos| remaining.get_mut(pos.as_str())) {
                *slots -= 1;
                lineup.push(player);
            }
        }
        lineup
    }
}
