//! A no-op transmission model: nobody is ever infected.

use epi_core::{AgentRng, Exposure, HealthState, HealthTransition};

use crate::TransmissionModel;

/// A [`TransmissionModel`] that always returns "no change".
///
/// Useful as a placeholder in tests, or to run the contact machinery alone
/// (e.g. to measure contact volume) without disease dynamics.
pub struct NoTransmission;

impl TransmissionModel for NoTransmission {
    fn get_infection_outcome(
        &self,
        _exposures: &[Exposure],
        _rng:       &mut AgentRng,
    ) -> HealthTransition {
        HealthTransition::unchanged(HealthState::Susceptible)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
