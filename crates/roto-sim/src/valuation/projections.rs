// Projection data loading.
//
// Reads one hitters CSV and one pitchers CSV (Steamer-style exports). Every
// numeric column becomes a stat on the player; the scoring categories are
// picked out later by name.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::config::{Config, ProjectionsConfig};
use crate::player::Player;
use crate::standings::ScoringCategory;

/// Position tag given to hitters whose positions column is absent or blank.
pub const UNKNOWN_POSITION: &str = "Unknown";

const NAME_COLUMN: &str = "Name";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("missing required categories in the projection files: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Players parsed from one CSV, along with its (alias-normalized) header.
#[derive(Debug, Clone)]
pub struct ProjectionSheet {
    pub columns: Vec<String>,
    pub players: Vec<Player>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map alternate column spellings onto the category names used in scoring.
fn canonical_column(header: &str) -> String {
    match header.trim() {
        "SO" => "K".to_string(),
        "BA" => "AVG".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Reader-based loader (private, enables testing without temp files)
// ---------------------------------------------------------------------------

/// Where a sheet's players get their position tags from.
#[derive(Clone, Copy)]
enum PositionSource<'a> {
    /// Read from this column, falling back to [`UNKNOWN_POSITION`].
    Column(&'a str),
    /// Every row gets the same tag.
    Fixed(&'a str),
}

fn load_sheet_from_reader<R: Read>(rdr: R, source: PositionSource<'_>) -> Result<ProjectionSheet, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let columns: Vec<String> = reader.headers()?.iter().map(canonical_column).collect();

    let name_idx = columns.iter().position(|c| c == NAME_COLUMN);
    let pos_idx = match source {
        PositionSource::Column(col) => columns.iter().position(|c| c == col),
        PositionSource::Fixed(_) => None,
    };
    if name_idx.is_none() {
        warn!("projection file has no `{}` column; no players loaded", NAME_COLUMN);
    }

    let mut players = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed projection row {}: {}", row + 1, e);
                continue;
            }
        };

        let name = name_idx.and_then(|i| record.get(i)).map(str::trim).unwrap_or("");
        if name.is_empty() {
            warn!("skipping projection row {}: no player name", row + 1);
            continue;
        }

        let positions = match source {
            PositionSource::Fixed(tag) => tag,
            PositionSource::Column(_) => pos_idx
                .and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .unwrap_or(UNKNOWN_POSITION),
        };

        let mut stats = HashMap::new();
        for (idx, field) in record.iter().enumerate() {
            if Some(idx) == name_idx || Some(idx) == pos_idx {
                continue;
            }
            if let Ok(value) = field.trim().parse::<f64>() {
                if value.is_finite() {
                    stats.insert(columns[idx].clone(), value);
                }
            }
        }

        players.push(Player::new(name, positions, stats));
    }

    Ok(ProjectionSheet { columns, players })
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<std::fs::File, ProjectionError> {
    std::fs::File::open(path).map_err(|e| ProjectionError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load hitter projections, taking positions from `positions_column`.
pub fn load_hitter_projections(path: &Path, positions_column: &str) -> Result<ProjectionSheet, ProjectionError> {
    let file = open(path)?;
    load_sheet_from_reader(file, PositionSource::Column(positions_column)).map_err(|e| ProjectionError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load pitcher projections. Every pitcher is tagged with `position`.
pub fn load_pitcher_projections(path: &Path, position: &str) -> Result<ProjectionSheet, ProjectionError> {
    let file = open(path)?;
    load_sheet_from_reader(file, PositionSource::Fixed(position)).map_err(|e| ProjectionError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load all players using paths and categories from the config.
pub fn load_all(config: &Config) -> Result<Vec<Player>, ProjectionError> {
    load_all_from_paths(&config.projections, &config.league.scoring_categories())
}

/// Load hitters then pitchers, checking that every scoring category shows
/// up in at least one of the two files.
pub fn load_all_from_paths(
    paths: &ProjectionsConfig,
    categories: &[ScoringCategory],
) -> Result<Vec<Player>, ProjectionError> {
    let hitters = load_hitter_projections(Path::new(&paths.hitters), &paths.hitter_positions_column)?;
    let pitchers = load_pitcher_projections(Path::new(&paths.pitchers), &paths.pitcher_position)?;

    combine_sheets(hitters, pitchers, categories)
}

fn combine_sheets(
    hitters: ProjectionSheet,
    pitchers: ProjectionSheet,
    categories: &[ScoringCategory],
) -> Result<Vec<Player>, ProjectionError> {
    let missing: Vec<String> = categories
        .iter()
        .filter(|cat| !hitters.columns.contains(&cat.name) && !pitchers.columns.contains(&cat.name))
        .map(|cat| cat.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(ProjectionError::MissingColumns { missing });
    }

    if hitters.players.is_empty() && pitchers.players.is_empty() {
        return Err(ProjectionError::Validation(
            "projection files produced zero valid rows".into(),
        ));
    }

    info!(
        "Loaded {} hitters, {} pitchers",
        hitters.players.len(),
        pitchers.players.len()
    );

    let mut players = hitters.players;
    players.extend(pitchers.players);
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
