// Human-readable and JSON output for simulation results.

use std::fmt::Write as _;
use std::path::Path;

use crate::simulation::{PlacementMetrics, WeightSet};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Weights rendered as `{AVG: 1.00, HR: 1.50, ...}` with sorted keys, so the
/// output does not depend on map iteration order.
fn format_weights(set: &WeightSet) -> String {
    let mut entries: Vec<(&String, &f64)> = set.weights.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    let body: Vec<String> = entries
        .iter()
        .map(|(cat, w)| format!("{cat}: {w:.2}"))
        .collect();
    format!("{{{}}}", body.join(", "))
}

fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Render the metrics block printed at the end of a run.
///
/// `weight_sets` is looked up by `scheme_index`; a metric whose index is out
/// of range is printed without its weights.
pub fn render_report(weight_sets: &[WeightSet], metrics: &[PlacementMetrics]) -> String {
    let mut out = String::from("Simulation Metrics:\n");
    for m in metrics {
        let weights = weight_sets
            .get(m.scheme_index)
            .map(format_weights)
            .unwrap_or_default();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "Weight Set {} ({}): {}", m.scheme_index + 1, m.scheme_name, weights);
        let _ = writeln!(out, "  Average Position: {:.2}", m.average_position);
        let _ = writeln!(out, "  Average Roto Score: {:.2}", m.average_roto_score);
        let _ = writeln!(out, "  % First Place Finishes: {}", percent(m.percent_first_place));
        let _ = writeln!(out, "  % Top Three Finishes: {}", percent(m.percent_top_three));
        let _ = writeln!(
            out,
            "  % Finishing Below Place {}: {}",
            m.bottom_tier_threshold,
            percent(m.percent_bottom_tier)
        );
    }
    out
}

/// Write the metrics as a pretty-printed JSON array.
pub fn write_json(path: &Path, metrics: &[PlacementMetrics]) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(metrics)?;
    std::fs::write(path, json).map_err(|e| ReportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
