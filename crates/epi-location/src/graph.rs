//! Static contact topology of a location.
//!
//! # Data layout
//!
//! The graph is an adjacency list keyed by `AgentId`: each agent maps to the
//! sorted list of agents it can contact here.  Every undirected edge `{a, b}`
//! appears twice, once in `a`'s list and once in `b`'s.  Agents that appear
//! in no edge have no entry and are never contacted at this location.
//!
//! Finding the edges whose endpoints are both present walks the neighbor
//! lists of the visiting agents only, so the cost is proportional to the
//! visiting set (times degree), not to the full graph.

use epi_core::{AgentId, HealthState};

use crate::{AgentMap, LocationError, LocationResult};

// ── ContactGraph ──────────────────────────────────────────────────────────────

/// Undirected, deduplicated, loop-free contact graph over agent IDs.
///
/// Immutable once built; use [`ContactGraphBuilder`] or
/// [`ContactGraph::from_edges`].
#[derive(Clone, Debug, Default)]
pub struct ContactGraph {
    adjacency:  AgentMap<Vec<AgentId>>,
    edge_count: usize,
}

impl ContactGraph {
    /// Build a graph from unordered pairs.
    ///
    /// `(a, b)` and `(b, a)` name the same edge and are merged.  Fails on a
    /// self-loop or an `AgentId::INVALID` endpoint.
    pub fn from_edges<I>(edges: I) -> LocationResult<Self>
    where
        I: IntoIterator<Item = (AgentId, AgentId)>,
    {
        let mut normalized: Vec<(AgentId, AgentId)> = Vec::new();
        for (a, b) in edges {
            if a == b {
                return Err(LocationError::SelfLoop(a));
            }
            if !a.is_valid() || !b.is_valid() {
                return Err(LocationError::InvalidAgent { a, b });
            }
            normalized.push(if a < b { (a, b) } else { (b, a) });
        }
        normalized.sort_unstable();
        normalized.dedup();

        let mut adjacency: AgentMap<Vec<AgentId>> = AgentMap::default();
        for &(a, b) in &normalized {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }
        for neighbors in adjacency.values_mut() {
            neighbors.sort_unstable();
        }

        Ok(Self { adjacency, edge_count: normalized.len() })
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of agents with at least one edge.
    pub fn agent_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Sorted neighbors of `agent`; empty if the agent has no edges here.
    pub fn neighbors(&self, agent: AgentId) -> &[AgentId] {
        self.adjacency.get(&agent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_edge(&self, a: AgentId, b: AgentId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Every edge once, as `(low, high)`, in ascending order.
    pub fn edges(&self) -> Vec<(AgentId, AgentId)> {
        let mut out: Vec<(AgentId, AgentId)> = self
            .adjacency
            .iter()
            .flat_map(|(&a, neighbors)| {
                neighbors.iter().filter(move |&&b| a < b).map(move |&b| (a, b))
            })
            .collect();
        out.sort_unstable();
        out
    }

    /// All edges whose endpoints are both in `present`, in ascending `(a, b)`
    /// order with `a < b`.
    ///
    /// The fixed order matters: samplers draw one random number per contact
    /// in this order, so the sampled pattern cannot depend on the order
    /// visits arrived in.
    pub fn co_present(&self, present: &AgentMap<HealthState>) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for (&a, &a_state) in present {
            for &b in self.neighbors(a) {
                if b <= a {
                    continue;
                }
                if let Some(&b_state) = present.get(&b) {
                    contacts.push(Contact { a, a_state, b, b_state });
                }
            }
        }
        contacts.sort_unstable_by_key(|c| (c.a, c.b));
        contacts
    }
}

// ── Contact ───────────────────────────────────────────────────────────────────

/// An edge whose endpoints are both present this call, with their visit-time
/// health states.  `a < b`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    pub a:       AgentId,
    pub a_state: HealthState,
    pub b:       AgentId,
    pub b_state: HealthState,
}

// ── ContactGraphBuilder ───────────────────────────────────────────────────────

/// Incremental builder for [`ContactGraph`].
///
/// Validation happens in [`build`][Self::build], so edges can be added in any
/// order from any source (household rosters, workplace rosters, …).
#[derive(Default)]
pub struct ContactGraphBuilder {
    edges: Vec<(AgentId, AgentId)>,
}

impl ContactGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the undirected edge `{a, b}`.
    pub fn add_edge(&mut self, a: AgentId, b: AgentId) -> &mut Self {
        self.edges.push((a, b));
        self
    }

    /// Connect every pair in `members` (a clique), e.g. a household.
    pub fn add_clique(&mut self, members: &[AgentId]) -> &mut Self {
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                self.edges.push((a, b));
            }
        }
        self
    }

    pub fn build(self) -> LocationResult<ContactGraph> {
        ContactGraph::from_edges(self.edges)
    }
}
