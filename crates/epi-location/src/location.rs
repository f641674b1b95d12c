//! The `Location` trait and the contact-graph location.

use epi_broker::Broker;
use epi_core::{AgentId, HealthState, InfectionOutcome, LocationId, LocationRng, Visit};

use crate::{AgentMap, ContactGraph, EdgeSampler, LocationError, LocationResult, PerEdgeSampler};

// ── Location trait ────────────────────────────────────────────────────────────

/// A place agents visit during a timestep.
///
/// # Concurrency contract
///
/// The runner may call `process_visits` for different locations on different
/// threads within one timestep, so implementations must be `Send` and must
/// not touch state shared with other locations.  A single location is never
/// processed concurrently with itself (`&mut self` enforces it).
pub trait Location: Send {
    fn id(&self) -> LocationId;

    /// Turn this timestep's visits into exposure messages.
    ///
    /// Must call `outcomes.send` exactly once, with the complete batch (which
    /// may be empty).
    fn process_visits(
        &mut self,
        visits:   &[Visit],
        outcomes: &mut dyn Broker<InfectionOutcome>,
    ) -> LocationResult<()>;
}

// ── GraphLocation ─────────────────────────────────────────────────────────────

/// A location whose potential contacts form a fixed [`ContactGraph`], of
/// which a random subset is realized each call.
///
/// Owns its graph, drop probability, sampler, and RNG exclusively; none of
/// them change after construction except the RNG state.
pub struct GraphLocation {
    id:               LocationId,
    drop_probability: f64,
    graph:            ContactGraph,
    sampler:          Box<dyn EdgeSampler>,
    rng:              LocationRng,
}

impl GraphLocation {
    /// Validate the configuration and build the location.
    ///
    /// Fails if `id` is `LocationId::INVALID`, if `drop_probability` is outside
    /// `[0, 1]` (or NaN), or if any edge is a self-loop.  Duplicate edges are
    /// merged.  The RNG is seeded from `(0, id)`; use
    /// [`with_seed`][Self::with_seed] to tie it to the run's seed.
    pub fn new<I>(id: LocationId, drop_probability: f64, edges: I) -> LocationResult<Self>
    where
        I: IntoIterator<Item = (AgentId, AgentId)>,
    {
        let graph = ContactGraph::from_edges(edges)?;
        Self::from_graph(id, drop_probability, graph)
    }

    /// Like [`new`][Self::new] for an already-built graph.
    pub fn from_graph(
        id:               LocationId,
        drop_probability: f64,
        graph:            ContactGraph,
    ) -> LocationResult<Self> {
        if !id.is_valid() {
            return Err(LocationError::InvalidId(id));
        }
        if !(0.0..=1.0).contains(&drop_probability) {
            return Err(LocationError::DropProbability(drop_probability));
        }
        Ok(Self {
            id,
            drop_probability,
            graph,
            sampler: Box::new(PerEdgeSampler),
            rng: LocationRng::new(0, id),
        })
    }

    /// Reseed this location's RNG from the run seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = LocationRng::new(seed, self.id);
        self
    }

    /// Replace the edge-retention strategy.
    pub fn with_sampler<S: EdgeSampler + 'static>(mut self, sampler: S) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    pub fn drop_probability(&self) -> f64 {
        self.drop_probability
    }

    pub fn graph(&self) -> &ContactGraph {
        &self.graph
    }

    pub fn sampler_name(&self) -> &'static str {
        self.sampler.name()
    }

    /// Present-agents lookup for this call.
    ///
    /// Visits addressed to another location are skipped.  If an agent visits
    /// twice, the later visit's health state wins.
    fn attendance(&self, visits: &[Visit]) -> AgentMap<HealthState> {
        let mut present = AgentMap::default();
        present.reserve(visits.len());
        for visit in visits {
            if visit.location_id != self.id {
                log::warn!(
                    "{}: ignoring visit by {} addressed to {}",
                    self.id, visit.agent_id, visit.location_id
                );
                continue;
            }
            present.insert(visit.agent_id, visit.health_state);
        }
        present
    }
}

impl Location for GraphLocation {
    fn id(&self) -> LocationId {
        self.id
    }

    fn process_visits(
        &mut self,
        visits:   &[Visit],
        outcomes: &mut dyn Broker<InfectionOutcome>,
    ) -> LocationResult<()> {
        let present = self.attendance(visits);

        let mut contacts = self.graph.co_present(&present);
        let candidates = contacts.len();
        self.sampler.sample(&mut contacts, self.drop_probability, &mut self.rng);

        // Two directed outcomes per realized contact.
        let mut batch = Vec::with_capacity(contacts.len() * 2);
        for c in &contacts {
            log::trace!("{}: contact {} <-> {}", self.id, c.a, c.b);
            batch.push(InfectionOutcome::contact(c.a, c.b, c.b_state));
            batch.push(InfectionOutcome::contact(c.b, c.a, c.a_state));
        }

        log::debug!(
            "{}: {} visitors, {} co-present edges, {} retained ({}), {} outcomes",
            self.id,
            present.len(),
            candidates,
            contacts.len(),
            self.sampler.name(),
            batch.len()
        );

        outcomes.send(batch)?;
        Ok(())
    }
}

/// Build a boxed [`GraphLocation`] with the default per-edge sampler.
pub fn new_graph_location<I>(
    id:               LocationId,
    drop_probability: f64,
    edges:            I,
) -> LocationResult<Box<dyn Location>>
where
    I: IntoIterator<Item = (AgentId, AgentId)>,
{
    Ok(Box::new(GraphLocation::new(id, drop_probability, edges)?))
}
