//! home_work: households and workplaces spreading an infection.
//!
//! Every agent spends each day-long timestep at home and at one workplace.
//! Households are fully connected; workplaces are sparse random graphs with
//! a higher chance of any given contact not happening on a given day.
//!
//! ```text
//! cargo run --release -p home_work                                  # built-in defaults
//! cargo run --release -p home_work -- town.json                     # JSON overrides
//! cargo run --release -p home_work -- --num-workers 8 \
//!     --output-file-path curve.json                                 # curve to a file
//! RUST_LOG=debug cargo run -p home_work                             # per-step detail
//! ```
//!
//! The epidemic curve is written as JSON, one object per timestep, to
//! `--output-file-path` or stdout.

mod config;
mod town;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use serde::Serialize;

use epi_core::{HealthState, Timestep};
use epi_sim::{HealthCounts, SimBuilder, SimObserver, StepReport};

use config::DemoConfig;
use town::build_town;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON run configuration; built-in defaults when omitted.
    config: Option<PathBuf>,

    /// Worker threads for the location and transmission phases.
    /// Overrides `sim.num_threads` from the config.
    #[arg(long)]
    num_workers: Option<usize>,

    /// Write the epidemic curve here instead of stdout.
    #[arg(long)]
    output_file_path: Option<PathBuf>,
}

impl Cli {
    /// The run configuration after command-line overrides.
    fn resolve_config(&self) -> Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path)?,
            None => DemoConfig::default(),
        };
        if let Some(n) = self.num_workers {
            ensure!(n > 0, "--num-workers must be positive");
            config.sim.num_threads = Some(n);
        }
        config.validate()?;
        Ok(config)
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CurvePoint {
    step:           u64,
    start_unix:     i64,
    susceptible:    usize,
    exposed:        usize,
    infectious:     usize,
    recovered:      usize,
    new_infections: usize,
    contacts:       usize,
}

/// Records one [`CurvePoint`] per timestep and remembers the peak.
#[derive(Default)]
struct CurveObserver {
    points: Vec<CurvePoint>,
    peak:   Option<(u64, usize)>,
}

impl SimObserver for CurveObserver {
    fn on_timestep_end(&mut self, timestep: &Timestep, report: &StepReport) {
        let counts = &report.counts;
        let infectious = counts.get(HealthState::Infectious);
        if self.peak.is_none_or(|(_, peak)| infectious > peak) {
            self.peak = Some((report.step, infectious));
        }
        self.points.push(CurvePoint {
            step:           report.step,
            start_unix:     timestep.start_time().0,
            susceptible:    counts.get(HealthState::Susceptible),
            exposed:        counts.get(HealthState::Exposed),
            infectious,
            recovered:      counts.get(HealthState::Recovered),
            new_infections: report.new_infections,
            // Each realized contact produces two outcomes.
            contacts:       report.outcomes / 2,
        });
    }

    fn on_sim_end(&mut self, final_counts: &HealthCounts) {
        let attack = final_counts.total() - final_counts.get(HealthState::Susceptible);
        log::info!(
            "final: {final_counts}; {attack} of {} ever infected",
            final_counts.total()
        );
        if let Some((step, infectious)) = self.peak {
            log::info!("peak: {infectious} infectious at step {step}");
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    log::info!("{cli:?}");

    let config = cli.resolve_config()?;
    log::debug!("{config:#?}");

    let t0 = Instant::now();
    let town = build_town(&config).context("failed to build town")?;
    let model = config.transmission.build().context("invalid transmission model")?;
    log::info!("setup took {:.2?}", t0.elapsed());

    let mut sim = SimBuilder::new(config.sim.clone(), town.population, model, town.visits)
        .locations(town.locations)
        .progression(config.progression())
        .build()
        .context("failed to build simulation")?;

    let t1 = Instant::now();
    let mut curve = CurveObserver::default();
    sim.run(&mut curve)?;
    log::info!(
        "simulated {} timesteps in {:.2?}",
        config.sim.total_timesteps,
        t1.elapsed()
    );

    write_curve(&curve.points, cli.output_file_path.as_deref())
}

/// Write `points` as pretty JSON to `path`, or to stdout when `None`.
fn write_curve(points: &[CurvePoint], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut out, points)
                .with_context(|| format!("failed to write curve to {}", path.display()))?;
            out.flush()?;
            log::info!("wrote {} curve points to {}", points.len(), path.display());
        }
        None => {
            let mut out = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, points).context("failed to write curve")?;
            writeln!(out)?;
        }
    }
    Ok(())
}
