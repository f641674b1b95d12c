//! Simulation observer trait for progress reporting and data collection.

use epi_core::Timestep;

use crate::HealthCounts;

/// What happened during one timestep.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Zero-based timestep index.
    pub step:               u64,
    /// Visits handed to locations.
    pub visits:             usize,
    /// `InfectionOutcome`s delivered to inboxes after the barrier.
    pub outcomes:           usize,
    /// Hosts moved from susceptible to exposed by the transmission model.
    pub new_infections:     usize,
    /// Hosts moved along the disease course by progression.
    pub progressed:         usize,
    /// Counts after all of the above, i.e. entering the next timestep.
    pub counts:             HealthCounts,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at timestep boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: epidemic curve
///
/// ```rust,ignore
/// struct Curve(Vec<usize>);
///
/// impl SimObserver for Curve {
///     fn on_timestep_end(&mut self, _ts: &Timestep, report: &StepReport) {
///         self.0.push(report.counts.get(HealthState::Infectious));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before any processing of `timestep`.
    fn on_timestep_start(&mut self, _timestep: &Timestep) {}

    /// Called after the barrier and both phases, before the clock advances.
    fn on_timestep_end(&mut self, _timestep: &Timestep, _report: &StepReport) {}

    /// Called once after the final timestep.
    fn on_sim_end(&mut self, _final_counts: &HealthCounts) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
