//! Where visits come from.
//!
//! Deciding which locations an agent visits is a mobility concern and lives
//! outside the contact engine.  The runner only needs a [`VisitSource`] that
//! turns the current population snapshot into this timestep's visits.

use std::collections::BTreeMap;

use epi_core::{AgentId, LocationId, Timestep, Visit};

use crate::Population;

/// Produces the visits of one timestep.
///
/// Implementations must copy each host's health state into the `Visit` at
/// call time; the runner calls this before any state changes in the step.
pub trait VisitSource: Send + Sync {
    fn visits(&self, timestep: &Timestep, population: &Population) -> Vec<Visit>;
}

/// Every assigned agent visits the same locations every timestep.
///
/// E.g. a household and a workplace per agent.  Output order is ascending
/// `AgentId`, then assignment order.
#[derive(Clone, Debug, Default)]
pub struct FixedVisits {
    assignments: BTreeMap<AgentId, Vec<LocationId>>,
}

impl FixedVisits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `agent` to `location` every timestep.
    pub fn assign(&mut self, agent: AgentId, location: LocationId) -> &mut Self {
        self.assignments.entry(agent).or_default().push(location);
        self
    }

    pub fn locations_of(&self, agent: AgentId) -> &[LocationId] {
        self.assignments.get(&agent).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl VisitSource for FixedVisits {
    fn visits(&self, _timestep: &Timestep, population: &Population) -> Vec<Visit> {
        let mut out = Vec::new();
        for (&agent, locations) in &self.assignments {
            let Some(state) = population.state(agent) else {
                continue;
            };
            out.extend(locations.iter().map(|&loc| Visit::new(loc, agent, state)));
        }
        out
    }
}
