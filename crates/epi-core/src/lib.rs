//! `epi-core`: foundational types for the epidemic contact-and-exposure engine.
//!
//! This crate is a dependency of every other `epi-*` crate.  It intentionally
//! has no `epi-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                           |
//! |-------------|--------------------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `LocationId`                                            |
//! | [`health`]  | `HealthState`, contact infectivity rule                            |
//! | [`message`] | `Visit`, `Exposure`, `ExposureType`, `InfectionOutcome`, `HealthTransition` |
//! | [`time`]    | `SimTime`, `Timestep`, `SimConfig`                                 |
//! | [`rng`]     | `AgentRng`, `LocationRng`, `SimRng`                                |
//! | [`error`]   | `EpiError`, `EpiResult`                                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod health;
pub mod ids;
pub mod message;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EpiError, EpiResult};
pub use health::HealthState;
pub use ids::{AgentId, LocationId};
pub use message::{Exposure, ExposureType, HealthTransition, InfectionOutcome, Visit};
pub use rng::{AgentRng, LocationRng, SimRng};
pub use time::{SimConfig, SimTime, Timestep};
