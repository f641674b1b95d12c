//! Timestep-scoped value types exchanged between locations, brokers, and hosts.
//!
//! None of these are persisted.  A `Visit` is built by the runner, consumed by
//! one location call, and dropped; an `InfectionOutcome` lives from the
//! location's `send` until the recipient's transmission model has run.

use crate::{AgentId, EpiError, EpiResult, HealthState, LocationId};

// ── Visit ─────────────────────────────────────────────────────────────────────

/// An agent's presence at a location during the current timestep.
///
/// `health_state` is a copy taken when the visit was built.  Locations only
/// read it; they never write agent state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    pub location_id:  LocationId,
    pub agent_id:     AgentId,
    pub health_state: HealthState,
}

impl Visit {
    #[inline]
    pub fn new(location_id: LocationId, agent_id: AgentId, health_state: HealthState) -> Self {
        Self { location_id, agent_id, health_state }
    }
}

// ── Exposure ──────────────────────────────────────────────────────────────────

/// One directional risk signal derived from contact with a single source.
///
/// Deserialization goes through [`Exposure::new`], so out-of-range input is
/// rejected there too.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "UncheckedExposure"))]
pub struct Exposure {
    infectivity: f32,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedExposure {
    infectivity: f32,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedExposure> for Exposure {
    type Error = EpiError;

    fn try_from(raw: UncheckedExposure) -> EpiResult<Self> {
        Exposure::new(raw.infectivity)
    }
}

impl Exposure {
    /// Build an exposure, rejecting infectivity outside `[0, 1]` (and NaN).
    pub fn new(infectivity: f32) -> EpiResult<Self> {
        if !(0.0..=1.0).contains(&infectivity) {
            return Err(EpiError::InvalidInfectivity(infectivity));
        }
        Ok(Self { infectivity })
    }

    /// Exposure carrying the contact infectivity of a source in `source_state`.
    #[inline]
    pub fn from_source(source_state: HealthState) -> Self {
        Self { infectivity: source_state.contact_infectivity() }
    }

    #[inline]
    pub fn infectivity(&self) -> f32 {
        self.infectivity
    }
}

// ── InfectionOutcome ──────────────────────────────────────────────────────────

/// The channel an exposure arrived through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ExposureType {
    /// Mutual contact along a location's contact-graph edge.
    #[default]
    Contact,
    /// Shared-space exposure without a modelled contact edge.
    Proximity,
}

/// A message addressed to `agent_id` describing one exposure to `source_id`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "UncheckedOutcome"))]
pub struct InfectionOutcome {
    /// Recipient.
    pub agent_id:      AgentId,
    /// The other party of the contact.  Never equal to `agent_id`.
    pub source_id:     AgentId,
    pub exposure:      Exposure,
    pub exposure_type: ExposureType,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedOutcome {
    agent_id:      AgentId,
    source_id:     AgentId,
    exposure:      Exposure,
    exposure_type: ExposureType,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedOutcome> for InfectionOutcome {
    type Error = EpiError;

    fn try_from(raw: UncheckedOutcome) -> EpiResult<Self> {
        InfectionOutcome::new(raw.agent_id, raw.source_id, raw.exposure, raw.exposure_type)
    }
}

impl InfectionOutcome {
    /// Build an outcome, rejecting one addressed to its own source.
    pub fn new(
        agent_id:      AgentId,
        source_id:     AgentId,
        exposure:      Exposure,
        exposure_type: ExposureType,
    ) -> EpiResult<Self> {
        if agent_id == source_id {
            return Err(EpiError::SelfExposure(agent_id));
        }
        Ok(Self { agent_id, source_id, exposure, exposure_type })
    }

    /// Outcome for `target` caused by contact with `source` in `source_state`.
    #[inline]
    pub fn contact(target: AgentId, source: AgentId, source_state: HealthState) -> Self {
        debug_assert_ne!(target, source, "an agent cannot be exposed to itself");
        Self {
            agent_id:      target,
            source_id:     source,
            exposure:      Exposure::from_source(source_state),
            exposure_type: ExposureType::Contact,
        }
    }
}

// ── HealthTransition ──────────────────────────────────────────────────────────

/// What a transmission model decided for one host over one timestep.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthTransition {
    /// State the host enters for the next timestep.
    pub health_state: HealthState,
    /// Aggregate infection probability the model computed from the exposures.
    pub infection_probability: f64,
}

impl HealthTransition {
    /// "No change" for a host currently in `state`.
    #[inline]
    pub fn unchanged(state: HealthState) -> Self {
        Self { health_state: state, infection_probability: 0.0 }
    }

    /// `true` if the transition moves the host away from `current`.
    #[inline]
    pub fn changes(&self, current: HealthState) -> bool {
        self.health_state != current
    }
}
