//! Run configuration, optionally loaded from a JSON file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use epi_core::SimConfig;
use epi_sim::Progression;
use epi_transmission::TransmissionConfig;

/// Everything the demo needs to build and run one town.
///
/// Missing keys take the values of [`DemoConfig::default`], so a file can
/// override just what it cares about:
///
/// ```json
/// { "households": 500, "transmission": { "model": "max_infectivity", "transmissibility": 0.4 } }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub sim:                  SimConfig,
    pub transmission:         TransmissionConfig,

    pub households:           usize,
    /// Household sizes are drawn uniformly from `1..=max_household_size`.
    pub max_household_size:   usize,
    pub workplaces:           usize,
    /// Probability that any two colleagues share a contact edge.
    pub workplace_edge_prob:  f64,

    pub household_drop_prob:  f64,
    pub workplace_drop_prob:  f64,

    pub initial_infections:   usize,
    pub latent_timesteps:     u64,
    pub infectious_timesteps: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let progression = Progression::default();
        Self {
            sim: SimConfig {
                start_unix_secs:           1_704_067_200, // 2024-01-01 00:00:00 UTC
                timestep_secs:             86_400,        // 1 timestep = 1 day
                total_timesteps:           120,
                seed:                      42,
                num_threads:               None,
                output_interval_timesteps: 7,
            },
            transmission:         TransmissionConfig::Bernoulli { transmissibility: 0.15 },
            households:           2_000,
            max_household_size:   5,
            workplaces:           150,
            workplace_edge_prob:  0.2,
            household_drop_prob:  0.1,
            workplace_drop_prob:  0.5,
            initial_infections:   10,
            latent_timesteps:     progression.latent_timesteps,
            infectious_timesteps: progression.infectious_timesteps,
        }
    }
}

impl DemoConfig {
    /// Read a JSON config; keys not present keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the engine crates cannot make on their own.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.households > 0, "households must be positive");
        ensure!(self.max_household_size > 0, "max_household_size must be positive");
        ensure!(self.workplaces > 0, "workplaces must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.workplace_edge_prob),
            "workplace_edge_prob {} outside [0, 1]",
            self.workplace_edge_prob
        );
        Ok(())
    }

    pub fn progression(&self) -> Progression {
        Progression {
            latent_timesteps:     self.latent_timesteps,
            infectious_timesteps: self.infectious_timesteps,
        }
    }
}
