// Roto weighting simulator entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, so stdout carries only the report)
// 2. Load config
// 3. Load projections
// 4. Evaluate every weight set
// 5. Print the report, optionally write JSON

use std::path::Path;

use roto_sim::config;
use roto_sim::report;
use roto_sim::simulation::{SimulationSettings, Simulator};
use roto_sim::valuation::projections;

use anyhow::Context;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = config::load_config().context("failed to load configuration")?;
    let seed = config.simulation.seed.unwrap_or_else(rand::random);
    info!(
        "Config loaded: league={}, {} teams, {} rounds, {} trials, seed {}",
        config.league.name,
        config.league.num_teams,
        config.league.rounds,
        config.simulation.trials,
        seed
    );

    let players = projections::load_all(&config).context("failed to load projections")?;

    let simulator = Simulator::new(players, SimulationSettings::from_config(&config, seed));
    let metrics = simulator
        .evaluate(&config.weight_sets, config.simulation.trials)
        .context("simulation failed")?;

    print!("{}", report::render_report(&config.weight_sets, &metrics));

    if let Some(path) = &config.report.json_path {
        report::write_json(Path::new(path), &metrics)
            .with_context(|| format!("failed to write JSON report to {path}"))?;
        info!("JSON report written to {}", path);
    }

    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roto_sim=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    Ok(())
}
