//! `epi-location`: contact-graph locations and edge sampling.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`graph`]    | `ContactGraph` (adjacency list), `ContactGraphBuilder`, `Contact` |
//! | [`sampler`]  | `EdgeSampler` trait, `PerEdgeSampler`, `WholeGraphSampler`     |
//! | [`location`] | `Location` trait, `GraphLocation`, `new_graph_location`        |
//! | [`error`]    | `LocationError`, `LocationResult<T>`                           |
//!
//! # One call of `process_visits`
//!
//! ```text
//! visits ──► present: AgentId → HealthState
//!        ──► co-present edges, ascending (a, b)
//!        ──► EdgeSampler drops some (LocationRng)
//!        ──► 2 InfectionOutcomes per retained edge
//!        ──► broker.send(batch)            (exactly once)
//! ```
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                      |
//! |-----------|-------------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for agent-keyed maps.             |

pub mod error;
pub mod graph;
pub mod location;
pub mod sampler;

#[cfg(test)]
mod tests;

pub use error::{LocationError, LocationResult};
pub use graph::{Contact, ContactGraph, ContactGraphBuilder};
pub use location::{GraphLocation, Location, new_graph_location};
pub use sampler::{EdgeSampler, PerEdgeSampler, WholeGraphSampler};

/// Agent-keyed hash map used for adjacency and attendance.
#[cfg(feature = "fx-hash")]
pub type AgentMap<V> = rustc_hash::FxHashMap<epi_core::AgentId, V>;

/// Agent-keyed hash map used for adjacency and attendance.
#[cfg(not(feature = "fx-hash"))]
pub type AgentMap<V> = std::collections::HashMap<epi_core::AgentId, V>;
