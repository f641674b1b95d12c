//! Fluent builder for constructing a [`Sim`].

use std::collections::HashSet;

use epi_broker::Inboxes;
use epi_core::{SimConfig, Timestep};
use epi_location::Location;
use epi_transmission::TransmissionModel;

use crate::{Population, Progression, Sim, SimError, SimResult, VisitSource};

/// Fluent builder for [`Sim<M, V>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: start time, timestep length and count, seed, …
/// - [`Population`]: hosts and their RNGs
/// - `M: TransmissionModel`: e.g. [`epi_transmission::BernoulliTransmission`]
/// - `V: VisitSource`: e.g. [`FixedVisits`][crate::FixedVisits]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                          |
/// |----------------------|----------------------------------|
/// | `.location(l)`       | none; at least one is required   |
/// | `.progression(p)`    | `Progression::default()`         |
///
/// # Example
///
/// ```rust,ignore
/// let population = Population::with_size(n, config.seed);
/// let mut sim = SimBuilder::new(config, population, BernoulliTransmission::new(0.2)?, visits)
///     .locations(locations)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: TransmissionModel, V: VisitSource> {
    config:       SimConfig,
    population:   Population,
    model:        M,
    visit_source: V,
    locations:    Vec<Box<dyn Location>>,
    progression:  Option<Progression>,
}

impl<M: TransmissionModel, V: VisitSource> SimBuilder<M, V> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, population: Population, model: M, visit_source: V) -> Self {
        Self {
            config,
            population,
            model,
            visit_source,
            locations:   Vec::new(),
            progression: None,
        }
    }

    /// Register one location.
    pub fn location(mut self, location: Box<dyn Location>) -> Self {
        self.locations.push(location);
        self
    }

    /// Register several locations, in iteration order.
    pub fn locations<I>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Location>>,
    {
        self.locations.extend(locations);
        self
    }

    /// Override the within-host disease course.
    pub fn progression(mut self, progression: Progression) -> Self {
        self.progression = Some(progression);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<M, V>> {
        let timestep = self.config.first_timestep()?;
        if self.config.total_timesteps == 0 {
            return Err(SimError::Config("total_timesteps must be at least 1".into()));
        }
        let end = self.config.end_time()?;
        // The clock advances once more after the last timestep.
        Timestep::new(end, timestep.duration())?;

        // ── Validate locations ────────────────────────────────────────────
        if self.locations.is_empty() {
            return Err(SimError::NoLocations);
        }
        let mut seen = HashSet::with_capacity(self.locations.len());
        for location in &self.locations {
            if !seen.insert(location.id()) {
                return Err(SimError::DuplicateLocation(location.id()));
            }
        }

        // ── Thread pool ───────────────────────────────────────────────────
        #[cfg(feature = "parallel")]
        let pool = {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(n) = self.config.num_threads {
                builder = builder.num_threads(n);
            }
            builder
                .build()
                .map_err(|e| SimError::Config(format!("thread pool: {e}")))?
        };

        log::debug!(
            "built sim: {} hosts, {} locations, first timestep {timestep}, run ends at {end}",
            self.population.len(),
            self.locations.len()
        );

        Ok(Sim {
            config:       self.config,
            timestep,
            step:         0,
            population:   self.population,
            locations:    self.locations,
            visit_source: self.visit_source,
            model:        self.model,
            progression:  self.progression.unwrap_or_default(),
            inboxes:      Inboxes::new(),
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
