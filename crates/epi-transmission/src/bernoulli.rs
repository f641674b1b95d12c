//! Stochastic models built on one Bernoulli draw per host per timestep.
//!
//! Both models reduce the exposure list to a single infection probability
//! `p` and then draw once:
//!
//! ```text
//! p == 0  →  no change, no draw
//! p == 1  →  infected,  no draw
//! else    →  infected with probability p
//! ```
//!
//! Skipping the draw at the extremes keeps hosts with no risky contact from
//! advancing their RNG stream.

use epi_core::{AgentRng, Exposure, HealthState, HealthTransition};

use crate::{TransmissionError, TransmissionModel, TransmissionResult};

fn check_transmissibility(t: f64) -> TransmissionResult<f64> {
    if (0.0..=1.0).contains(&t) {
        Ok(t)
    } else {
        Err(TransmissionError::Transmissibility(t))
    }
}

fn decide(probability: f64, rng: &mut AgentRng) -> HealthTransition {
    let infected = if probability <= 0.0 {
        false
    } else if probability >= 1.0 {
        true
    } else {
        rng.gen_bool(probability)
    };
    HealthTransition {
        health_state: if infected { HealthState::Exposed } else { HealthState::Susceptible },
        infection_probability: probability.clamp(0.0, 1.0),
    }
}

// ── BernoulliTransmission ─────────────────────────────────────────────────────

/// Independent per-exposure transmission combined by probabilistic union.
///
/// Each exposure transmits independently with probability
/// `transmissibility * infectivity`; the host is infected if any does:
///
/// ```text
/// p = 1 - Π (1 - transmissibility * infectivity_i)
/// ```
#[derive(Copy, Clone, Debug)]
pub struct BernoulliTransmission {
    transmissibility: f64,
}

impl BernoulliTransmission {
    pub fn new(transmissibility: f64) -> TransmissionResult<Self> {
        Ok(Self { transmissibility: check_transmissibility(transmissibility)? })
    }

    pub fn transmissibility(&self) -> f64 {
        self.transmissibility
    }

    /// The union probability for `exposures`, without drawing.
    pub fn infection_probability(&self, exposures: &[Exposure]) -> f64 {
        let escape: f64 = exposures
            .iter()
            .map(|e| 1.0 - self.transmissibility * e.infectivity() as f64)
            .product();
        1.0 - escape
    }
}

impl TransmissionModel for BernoulliTransmission {
    fn get_infection_outcome(&self, exposures: &[Exposure], rng: &mut AgentRng) -> HealthTransition {
        decide(self.infection_probability(exposures), rng)
    }

    fn name(&self) -> &'static str {
        "bernoulli"
    }
}

// ── MaxInfectivityTransmission ────────────────────────────────────────────────

/// Transmission driven by the single riskiest exposure.
///
/// Omission policy: only the maximum infectivity among the exposures is used;
/// every other exposure is ignored.  `p = transmissibility * max_i infectivity_i`.
/// Suited to settings where repeated contact with infectious agents is not
/// believed to add risk beyond the worst one.
#[derive(Copy, Clone, Debug)]
pub struct MaxInfectivityTransmission {
    transmissibility: f64,
}

impl MaxInfectivityTransmission {
    pub fn new(transmissibility: f64) -> TransmissionResult<Self> {
        Ok(Self { transmissibility: check_transmissibility(transmissibility)? })
    }

    pub fn transmissibility(&self) -> f64 {
        self.transmissibility
    }

    pub fn infection_probability(&self, exposures: &[Exposure]) -> f64 {
        let max = exposures
            .iter()
            .map(|e| e.infectivity() as f64)
            .fold(0.0, f64::max);
        self.transmissibility * max
    }
}

impl TransmissionModel for MaxInfectivityTransmission {
    fn get_infection_outcome(&self, exposures: &[Exposure], rng: &mut AgentRng) -> HealthTransition {
        decide(self.infection_probability(exposures), rng)
    }

    fn name(&self) -> &'static str {
        "max-infectivity"
    }
}
