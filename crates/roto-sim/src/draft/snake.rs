// Snake draft allocation.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::debug;

use super::team::Team;
use crate::player::Player;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("no players available for drafting")]
    EmptyPool,

    #[error("cannot run a draft with zero teams")]
    NoTeams,
}

/// Team index picking at `turn` within `round` of a snake draft.
///
/// Even rounds run `0..num_teams`, odd rounds run back from `num_teams - 1`.
pub fn snake_pick_index(round: usize, turn: usize, num_teams: usize) -> usize {
    if round % 2 == 0 {
        turn
    } else {
        num_teams - 1 - turn
    }
}

/// Run a snake draft, moving players from the front of `pool` onto `teams`.
///
/// The pool is consumed in order, so callers must sort it by desirability
/// first. The draft stops after `rounds` full rounds or as soon as the pool
/// runs dry; the remaining picks are skipped and some rosters end up short.
///
/// Returns the number of picks made. Fails without touching any roster if
/// the pool is empty at the start.
pub fn run_draft<'a>(
    teams: &mut [Team<'a>],
    pool: &mut VecDeque<&'a Player>,
    rounds: usize,
) -> Result<usize, DraftError> {
    if pool.is_empty() {
        return Err(DraftError::EmptyPool);
    }
    if teams.is_empty() {
        return Err(DraftError::NoTeams);
    }

    let num_teams = teams.len();
    let mut picks = 0;

    'rounds: for round in 0..rounds {
        for turn in 0..num_teams {
            let Some(player) = pool.pop_front() else {
                debug!(
                    "pool exhausted in round {} after {} picks ({} slots unfilled)",
                    round,
                    picks,
                    rounds * num_teams - picks
                );
                break 'rounds;
            };
            teams[snake_pick_index(round, turn, num_teams)].draft_player(player);
            picks += 1;
        }
    }

    debug!(
        "draft complete: {} picks across {} teams, {} players undrafted",
        picks,
        num_teams,
        pool.len()
    );
    Ok(picks)
}
