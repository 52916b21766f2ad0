// Configuration loading and parsing (league.toml, simulation.toml).

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::simulation::WeightSet;
use crate::standings::{MissingStatPolicy, ScoringCategory};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub simulation: SimulationConfig,
    pub projections: ProjectionsConfig,
    pub report: ReportConfig,
    pub weight_sets: Vec<WeightSet>,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub num_teams: usize,
    pub rounds: usize,
    pub categories: CategoriesSection,
    /// Position tag -> starting slots, for [`crate::draft::Team::select_weekly_lineup`].
    /// Not used by the simulation itself.
    #[serde(default)]
    pub lineup: HashMap<String, usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesSection {
    pub batting: Vec<String>,
    pub pitching: Vec<String>,
    /// Categories ranked ascending (lowest total wins).
    #[serde(default)]
    pub lower_is_better: Vec<String>,
}

impl LeagueConfig {
    /// Batting then pitching categories, each tagged with its polarity.
    pub fn scoring_categories(&self) -> Vec<ScoringCategory> {
        self.categories
            .batting
            .iter()
            .chain(self.categories.pitching.iter())
            .map(|name| ScoringCategory {
                name: name.clone(),
                lower_is_better: self.categories.lower_is_better.contains(name),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// simulation.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire simulation.toml file.
#[derive(Debug, Clone, Deserialize)]
struct SimulationFile {
    simulation: SimulationConfig,
    projections: ProjectionsConfig,
    #[serde(default)]
    report: ReportConfig,
    #[serde(default)]
    weight_sets: Vec<WeightSet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub trials: usize,
    /// Base seed for every trial RNG. Drawn at startup when omitted.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub parallel: bool,
    /// Worker threads for parallel trials; 0 uses every core.
    #[serde(default)]
    pub workers: usize,
    #[serde(default)]
    pub missing_stat_policy: MissingStatPolicy,
    #[serde(default = "default_bottom_tier_threshold")]
    pub bottom_tier_threshold: usize,
    /// Relative standard deviation of realized stats around projections.
    #[serde(default)]
    pub stat_variability: f64,
}

fn default_bottom_tier_threshold() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionsConfig {
    pub hitters: String,
    pub pitchers: String,
    #[serde(default = "default_hitter_positions_column")]
    pub hitter_positions_column: String,
    #[serde(default = "default_pitcher_position")]
    pub pitcher_position: String,
}

fn default_hitter_positions_column() -> String {
    "YAHOO".into()
}

fn default_pitcher_position() -> String {
    "P".into()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Write metrics as JSON here in addition to the printed table.
    #[serde(default)]
    pub json_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// `config/simulation.toml`, relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    let league_path = config_dir.join("league.toml");
    let league_file: LeagueFile = parse_file(&league_path)?;

    let simulation_path = config_dir.join("simulation.toml");
    let simulation_file: SimulationFile = parse_file(&simulation_path)?;

    let config = Config {
        league: league_file.league,
        simulation: simulation_file.simulation,
        projections: simulation_file.projections,
        report: simulation_file.report,
        weight_sets: simulation_file.weight_sets,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the crate root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let league = &config.league;
    if league.num_teams == 0 {
        return Err(invalid("league.num_teams", "must be greater than 0"));
    }

    let categories = league.scoring_categories();
    if categories.is_empty() {
        return Err(invalid("league.categories", "at least one scoring category is required"));
    }
    let mut seen = HashSet::new();
    for cat in &categories {
        if !seen.insert(cat.name.as_str()) {
            return Err(invalid(
                "league.categories",
                format!("category `{}` is listed more than once", cat.name),
            ));
        }
    }
    for name in &league.categories.lower_is_better {
        if !seen.contains(name.as_str()) {
            return Err(invalid(
                "league.categories.lower_is_better",
                format!("`{name}` is not a configured scoring category"),
            ));
        }
    }

    let sim = &config.simulation;
    if sim.trials == 0 {
        return Err(invalid("simulation.trials", "must be greater than 0"));
    }
    if !sim.stat_variability.is_finite() || sim.stat_variability < 0.0 {
        return Err(invalid(
            "simulation.stat_variability",
            format!("must be a finite value >= 0, got {}", sim.stat_variability),
        ));
    }

    if config.weight_sets.is_empty() {
        return Err(invalid("weight_sets", "at least one weight set is required"));
    }
    for (idx, set) in config.weight_sets.iter().enumerate() {
        for (cat, weight) in &set.weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(invalid(
                    format!("weight_sets[{idx}].weights.{cat}"),
                    format!("must be a finite value >= 0, got {weight}"),
                ));
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
