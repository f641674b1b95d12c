//! The `TransmissionModel` trait: the extension point for infection logic.

use epi_core::{AgentRng, Exposure, HealthTransition};

/// Pluggable transmission strategy.
///
/// Given every exposure one susceptible host accumulated during one timestep,
/// decide whether the host becomes infected.  The result is either
/// `HealthState::Exposed` (infected) or `HealthState::Susceptible` (no change).
///
/// # Contract
///
/// - Exposure order carries no meaning.  Callers hand exposures over sorted
///   by infectivity, but implementations must not rely on it for
///   correctness.
/// - An empty slice is valid input and must yield "no change".
/// - Every exposure contributes to the result unless the implementation
///   documents a specific omission policy (see
///   [`MaxInfectivityTransmission`][crate::MaxInfectivityTransmission]).
/// - The result is a deterministic function of `exposures` and the draws
///   taken from `rng`.  No other source of randomness is allowed.
///
/// # Thread safety
///
/// The runner may evaluate many hosts in parallel, so implementations must be
/// `Send + Sync`.  Per-host state belongs in the host, not in the model.
pub trait TransmissionModel: Send + Sync {
    fn get_infection_outcome(
        &self,
        exposures: &[Exposure],
        rng:       &mut AgentRng,
    ) -> HealthTransition;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

impl<M: TransmissionModel + ?Sized> TransmissionModel for Box<M> {
    #[inline]
    fn get_infection_outcome(&self, exposures: &[Exposure], rng: &mut AgentRng) -> HealthTransition {
        (**self).get_infection_outcome(exposures, rng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
