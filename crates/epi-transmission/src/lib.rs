//! `epi-transmission`: transmission model trait and built-in variants.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`model`]     | `TransmissionModel` trait                                     |
//! | [`noop`]      | `NoTransmission`: never infects                              |
//! | [`bernoulli`] | `BernoulliTransmission`, `MaxInfectivityTransmission`         |
//! | [`config`]    | `TransmissionConfig`: pick a variant at configuration time  |
//! | [`error`]     | `TransmissionError`, `TransmissionResult<T>`                  |
//!
//! # Where models sit in a timestep
//!
//! Locations emit `InfectionOutcome`s; the runner routes them into per-host
//! inboxes; after the timestep barrier each susceptible host hands its
//! exposures to the model and applies the returned `HealthTransition`.
//! Models never see locations, and locations never see models.

pub mod bernoulli;
pub mod config;
pub mod error;
pub mod model;
pub mod noop;


pub use bernoulli::{BernoulliTransmission, MaxInfectivityTransmission};
pub use config::TransmissionConfig;
pub use error::{TransmissionError, TransmissionResult};
pub use model::TransmissionModel;
pub use noop::NoTransmission;
