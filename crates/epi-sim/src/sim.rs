//! The `Sim` struct and its timestep loop.

use std::collections::HashMap;

use epi_broker::{Broker, ChannelBroker, Inboxes, channel};
use epi_core::{Exposure, LocationId, SimConfig, Timestep, Visit};
use epi_location::Location;
use epi_transmission::TransmissionModel;

use crate::{NoopObserver, Population, Progression, SimObserver, SimResult, StepReport, VisitSource};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The reference runner.
///
/// `Sim<M, V>` holds all run state and drives the per-timestep loop:
///
/// 1. **Visits**: ask the [`VisitSource`] for this timestep's visits; each
///    carries a copy of the host's current health state.
/// 2. **Location phase** (optionally parallel with the `parallel` feature):
///    every location processes its visits and sends one batch of
///    `InfectionOutcome`s into its own `ChannelBroker` clone.
/// 3. **Barrier**: all location calls have returned; the receiver is drained
///    into per-agent [`Inboxes`].
/// 4. **Transmission phase** (optionally parallel): every susceptible host's
///    exposures go through the [`TransmissionModel`].
/// 5. **Progression**: exposed and infectious hosts advance along their
///    course.
/// 6. `Timestep::advance()`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: TransmissionModel, V: VisitSource> {
    /// Global configuration (timestep count, seed, thread count, …).
    pub config: SimConfig,

    /// The window currently being processed.
    pub timestep: Timestep,

    /// Zero-based index of `timestep`.
    pub step: u64,

    /// Host health states and per-agent RNGs.
    pub population: Population,

    /// Every location, in registration order.
    pub locations: Vec<Box<dyn Location>>,

    pub visit_source: V,

    /// Evaluated once per susceptible host per timestep.
    pub model: M,

    pub progression: Progression,

    /// Exposures routed during the current timestep.  Empty between steps.
    pub(crate) inboxes: Inboxes,

    #[cfg(feature = "parallel")]
    pub(crate) pool: rayon::ThreadPool,
}

impl<M: TransmissionModel, V: VisitSource> Sim<M, V> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current timestep until `config.total_timesteps` have
    /// been processed.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        log::info!(
            "starting run: {} hosts, {} locations, {} timesteps of {:?}, model={}",
            self.population.len(),
            self.locations.len(),
            self.config.total_timesteps,
            self.timestep.duration(),
            self.model.name()
        );
        while self.step < self.config.total_timesteps {
            self.step_once(observer)?;
        }
        let counts = self.population.counts();
        log::info!("run finished after {} timesteps: {counts}", self.step);
        observer.on_sim_end(&counts);
        Ok(())
    }

    /// Run exactly `n` timesteps from the current position (ignores
    /// `total_timesteps`).  Useful for tests and incremental stepping.
    pub fn run_timesteps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_once(observer)?;
        }
        Ok(())
    }

    /// Process one timestep without an observer.
    pub fn step(&mut self) -> SimResult<StepReport> {
        self.step_once(&mut NoopObserver)
    }

    fn step_once<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<StepReport> {
        observer.on_timestep_start(&self.timestep);
        let report = self.process_timestep()?;
        observer.on_timestep_end(&self.timestep, &report);

        let interval = self.config.output_interval_timesteps;
        if interval > 0 && report.step % interval == 0 {
            log::info!(
                "step {} {}: {} visits, {} outcomes, {} new infections | {}",
                report.step, self.timestep, report.visits, report.outcomes,
                report.new_infections, report.counts
            );
        }

        // Everything sent during this window has been consumed.
        self.timestep.advance()?;
        self.step += 1;
        Ok(report)
    }

    // ── Core timestep processing ──────────────────────────────────────────

    fn process_timestep(&mut self) -> SimResult<StepReport> {
        // ── Phase 1: visits (health snapshot) ─────────────────────────────
        let visits = self.visit_source.visits(&self.timestep, &self.population);
        let visit_count = visits.len();
        let by_location = self.group_visits(visits);

        // ── Phase 2: location phase (produce) ─────────────────────────────
        let (broker, receiver) = channel();
        self.process_locations(&by_location, &broker)?;
        drop(broker);

        // ── Phase 3: barrier crossed, route outcomes to inboxes ───────────
        //
        // Every location call has returned, so the receiver already holds
        // every batch of this timestep.
        let mut outcomes = 0;
        for batch in receiver.drain() {
            outcomes += batch.len();
            self.inboxes.send(batch)?;
        }

        // ── Phase 4: transmission phase (consume) ─────────────────────────
        let next_step = self.step + 1;
        let new_infections = self.apply_transmission(next_step);
        let undelivered = self.inboxes.clear();
        if undelivered > 0 {
            log::warn!("step {}: {undelivered} exposures addressed to unknown agents", self.step);
        }

        // ── Phase 5: progression into the next timestep ───────────────────
        let progressed = self.population.progress(&self.progression, next_step);

        Ok(StepReport {
            step: self.step,
            visits: visit_count,
            outcomes,
            new_infections,
            progressed,
            counts: self.population.counts(),
        })
    }

    /// Bucket visits by location, dropping those addressed to a location
    /// that is not registered.
    fn group_visits(&self, visits: Vec<Visit>) -> HashMap<LocationId, Vec<Visit>> {
        let mut by_location: HashMap<LocationId, Vec<Visit>> =
            self.locations.iter().map(|l| (l.id(), Vec::new())).collect();
        let mut stray = 0usize;
        for visit in visits {
            match by_location.get_mut(&visit.location_id) {
                Some(bucket) => bucket.push(visit),
                None => stray += 1,
            }
        }
        if stray > 0 {
            log::warn!("step {}: dropped {stray} visits to unregistered locations", self.step);
        }
        by_location
    }

    /// Run `process_visits` once for every location.
    ///
    /// Each location gets its own broker clone, so writers never share a
    /// sender and no lock is taken.
    fn process_locations(
        &mut self,
        by_location: &HashMap<LocationId, Vec<Visit>>,
        broker:      &ChannelBroker<epi_core::InfectionOutcome>,
    ) -> SimResult<()> {
        let locations = &mut self.locations;

        #[cfg(not(feature = "parallel"))]
        {
            for location in locations.iter_mut() {
                let visits = by_location.get(&location.id()).map(Vec::as_slice).unwrap_or(&[]);
                let mut outcomes = broker.clone();
                location.process_visits(visits, &mut outcomes)?;
            }
            Ok(())
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.pool.install(|| {
                locations.par_iter_mut().try_for_each(|location| {
                    let visits = by_location.get(&location.id()).map(Vec::as_slice).unwrap_or(&[]);
                    let mut outcomes = broker.clone();
                    location.process_visits(visits, &mut outcomes)
                })
            })?;
            Ok(())
        }
    }

    /// Evaluate the transmission model for every susceptible host.
    ///
    /// Non-susceptible hosts' exposures are taken and discarded.  Returns the
    /// number of new infections.
    fn apply_transmission(&mut self, next_step: u64) -> usize {
        // Pre-collect inputs sequentially so the evaluation below only reads
        // immutable data besides each host's own record and RNG.
        let inputs: Vec<Vec<Exposure>> = self
            .population
            .hosts
            .iter()
            .map(|h| self.inboxes.take(h.id))
            .collect();

        let model = &self.model;
        let hosts = &mut self.population.hosts;
        let rngs = &mut self.population.rngs;

        #[cfg(not(feature = "parallel"))]
        {
            hosts
                .iter_mut()
                .zip(rngs.iter_mut())
                .zip(inputs)
                .map(|((host, rng), exposures)| infect(model, host, rng, &exposures, next_step))
                .filter(|&infected| infected)
                .count()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.pool.install(|| {
                hosts
                    .par_iter_mut()
                    .zip(rngs.par_iter_mut())
                    .zip(inputs.into_par_iter())
                    .map(|((host, rng), exposures)| infect(model, host, rng, &exposures, next_step))
                    .filter(|&infected| infected)
                    .count()
            })
        }
    }
}

/// Apply the model to one host.  `true` if the host became infected.
fn infect<M: TransmissionModel>(
    model:     &M,
    host:      &mut crate::Host,
    rng:       &mut epi_core::AgentRng,
    exposures: &[Exposure],
    next_step: u64,
) -> bool {
    if !host.health_state.is_susceptible() {
        return false;
    }
    let transition = model.get_infection_outcome(exposures, rng);
    if !transition.changes(host.health_state) {
        return false;
    }
    log::trace!(
        "{} -> {} (p={:.3}, {} exposures)",
        host.id, transition.health_state, transition.infection_probability, exposures.len()
    );
    host.health_state = transition.health_state;
    host.state_since = next_step;
    true
}
