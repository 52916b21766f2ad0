// Monte Carlo evaluation of category weight sets.
//
// For each weight set the pool is scored once, then every trial drafts a
// fresh league from its own copy of that pool, scores the standings, and
// records where a randomly picked team finished.

pub mod metrics;
pub mod pool;
pub mod rng;
pub mod variance;

use std::collections::{HashMap, VecDeque};

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::draft::{run_draft, DraftError, Team};
use crate::player::Player;
use crate::standings::{
    compute_standings, default_categories, finishing_position, MissingStatPolicy, ScoringCategory,
    StandingsError,
};
use crate::valuation::zscore::{compute_category_zscores, CategoryZScores};

pub use metrics::{PlacementMetrics, TrialOutcome};
pub use pool::WorkerPool;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A named set of category weights to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    pub name: String,
    #[serde(default)]
    pub weights: HashMap<String, f64>,
}

impl WeightSet {
    pub fn new(name: &str, weights: &[(&str, f64)]) -> Self {
        WeightSet {
            name: name.to_string(),
            weights: weights.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }
}

/// Everything the harness needs to know about the league and the run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    pub num_teams: usize,
    pub rounds: usize,
    pub categories: Vec<ScoringCategory>,
    pub missing_stat_policy: MissingStatPolicy,
    /// Finishing below this place counts as a bottom-tier result.
    pub bottom_tier_threshold: usize,
    /// Relative spread of realized stats; 0.0 scores the projections as-is.
    pub stat_variability: f64,
    pub seed: u64,
    pub parallel: bool,
    /// Threads used when `parallel` is set; 0 means one per core.
    pub workers: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            num_teams: 15,
            rounds: 50,
            categories: default_categories(),
            missing_stat_policy: MissingStatPolicy::Error,
            bottom_tier_threshold: 10,
            stat_variability: 0.0,
            seed: 0,
            parallel: false,
            workers: 0,
        }
    }
}

impl SimulationSettings {
    pub fn from_config(config: &Config, seed: u64) -> Self {
        SimulationSettings {
            num_teams: config.league.num_teams,
            rounds: config.league.rounds,
            categories: config.league.scoring_categories(),
            missing_stat_policy: config.simulation.missing_stat_policy,
            bottom_tier_threshold: config.simulation.bottom_tier_threshold,
            stat_variability: config.simulation.stat_variability,
            seed,
            parallel: config.simulation.parallel,
            workers: config.simulation.workers,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum TrialError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Standings(#[from] StandingsError),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("trial count must be greater than 0, got {trials}")]
    InvalidTrialCount { trials: usize },

    #[error("weight set {scheme_index} (`{scheme_name}`), trial {trial}: {source}")]
    Trial {
        scheme_index: usize,
        scheme_name: String,
        trial: usize,
        source: TrialError,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Simulator {
    players: Vec<Player>,
    /// Index-aligned with `players`; independent of any weight set.
    zscores: Vec<CategoryZScores>,
    settings: SimulationSettings,
}

impl Simulator {
    /// Build a harness over the full projected pool. Z-scores are computed
    /// here, once, since they do not depend on the weights.
    pub fn new(players: Vec<Player>, settings: SimulationSettings) -> Self {
        let zscores = compute_category_zscores(&players, &settings.categories);
        Simulator {
            players,
            zscores,
            settings,
        }
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// A copy of the pool valued under `weights`, best player first.
    ///
    /// Players with equal value keep their input order.
    pub fn score_pool(&self, weights: &WeightSet) -> Vec<Player> {
        let mut pool: Vec<Player> = self
            .players
            .iter()
            .zip(&self.zscores)
            .map(|(player, z)| {
                let mut scored = player.clone();
                scored.calculate_weighted_value(z, &weights.weights);
                scored
            })
            .collect();
        pool.sort_by(|a, b| {
            b.weighted_value
                .partial_cmp(&a.weighted_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pool
    }

    /// Run `trials` independent leagues for every weight set.
    ///
    /// The result is indexed like `weight_sets`. Any failing trial aborts the
    /// whole evaluation; the error names the weight set and trial.
    pub fn evaluate(
        &self,
        weight_sets: &[WeightSet],
        trials: usize,
    ) -> Result<Vec<PlacementMetrics>, SimulationError> {
        if trials == 0 {
            return Err(SimulationError::InvalidTrialCount { trials });
        }

        if self.settings.parallel {
            WorkerPool::with_workers(self.settings.workers)
                .install(|| self.evaluate_all(weight_sets, trials))?
        } else {
            self.evaluate_all(weight_sets, trials)
        }
    }

    fn evaluate_all(
        &self,
        weight_sets: &[WeightSet],
        trials: usize,
    ) -> Result<Vec<PlacementMetrics>, SimulationError> {
        weight_sets
            .iter()
            .enumerate()
            .map(|(idx, set)| self.evaluate_weight_set(idx, set, trials))
            .collect()
    }

    fn evaluate_weight_set(
        &self,
        scheme_index: usize,
        weight_set: &WeightSet,
        trials: usize,
    ) -> Result<PlacementMetrics, SimulationError> {
        info!(
            "Processing weight set {} (`{}`): {} trials",
            scheme_index, weight_set.name, trials
        );
        for cat in weight_set.weights.keys() {
            if !self.settings.categories.iter().any(|c| &c.name == cat) {
                warn!(
                    "weight set `{}` weights `{}`, which is not a scoring category",
                    weight_set.name, cat
                );
            }
        }

        let pool = self.score_pool(weight_set);
        let with_context = |trial: usize, source: TrialError| SimulationError::Trial {
            scheme_index,
            scheme_name: weight_set.name.clone(),
            trial,
            source,
        };

        let outcomes: Vec<TrialOutcome> = if self.settings.parallel {
            // Gather every result in trial order first, so a failure is
            // reported for the lowest failing trial, as in a sequential run.
            let results: Vec<Result<TrialOutcome, SimulationError>> = (0..trials)
                .into_par_iter()
                .map(|trial| {
                    self.run_trial(&pool, scheme_index, trial)
                        .map_err(|e| with_context(trial, e))
                })
                .collect();
            results.into_iter().collect::<Result<_, _>>()?
        } else {
            (0..trials)
                .map(|trial| {
                    self.run_trial(&pool, scheme_index, trial)
                        .map_err(|e| with_context(trial, e))
                })
                .collect::<Result<_, _>>()?
        };

        let metrics = metrics::aggregate(
            scheme_index,
            &weight_set.name,
            &outcomes,
            self.settings.bottom_tier_threshold,
        );
        info!(
            "Weight set `{}`: average position {:.2}, average roto score {:.2}",
            weight_set.name, metrics.average_position, metrics.average_roto_score
        );
        Ok(metrics)
    }

    /// Draft and score one league from a scored, sorted pool.
    ///
    /// All mutable state (teams, the pool queue, realized stats) lives and
    /// dies inside this call; `pool` itself is only read.
    pub fn run_trial(
        &self,
        pool: &[Player],
        scheme_index: usize,
        trial: usize,
    ) -> Result<TrialOutcome, TrialError> {
        let settings = &self.settings;
        let mut rng = rng::trial_rng(settings.seed, scheme_index, trial);

        let realized;
        let league_pool: &[Player] = if settings.stat_variability > 0.0 {
            realized = variance::realize_stats(pool, &settings.categories, settings.stat_variability, &mut rng);
            &realized
        } else {
            pool
        };

        let mut teams: Vec<Team> = (0..settings.num_teams).map(Team::new).collect();
        let mut queue: VecDeque<&Player> = league_pool.iter().collect();
        let picks = run_draft(&mut teams, &mut queue, settings.rounds)?;

        // run_draft rejects an empty league, so the range is never empty.
        let test_team_id = teams[rng.gen_range(0..teams.len())].team_id;

        let standings = compute_standings(&teams, &settings.categories, settings.missing_stat_policy)?;
        let position = finishing_position(&standings, test_team_id).unwrap_or(standings.len());
        let roto_points = standings
            .iter()
            .find(|entry| entry.team_id == test_team_id)
            .map_or(0, |entry| entry.roto_points);

        debug!(
            "weight set {} trial {}: test team {} finished {} with {} points",
            scheme_index, trial, test_team_id, position, roto_points
        );

        Ok(TrialOutcome {
            test_team_id,
            position,
            roto_points,
            picks,
        })
    }
}
