//! `epi-sim`: reference timestep runner for the epidemic contact engine.
//!
//! # Timestep loop
//!
//! ```text
//! for step in 0..config.total_timesteps:
//!   ① Visits        : VisitSource snapshots each host's health state.
//!   ② Locations     : every Location processes its visits and sends one
//!                     batch of InfectionOutcomes into its own broker clone
//!                     (parallel with the `parallel` feature).
//!   ③ Barrier       : all senders dropped; batches routed into Inboxes.
//!   ④ Transmission  : each susceptible host's exposures (sorted by
//!                     infectivity) go through the TransmissionModel with
//!                     the host's AgentRng (parallel with `parallel`).
//!   ⑤ Progression   : Exposed → Infectious → Recovered.
//!   ⑥ Advance       : Timestep::advance(); inboxes are empty again.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`host`]     | `Host`, `Population`, `Progression`, `HealthCounts`       |
//! | [`visits`]   | `VisitSource` trait, `FixedVisits`                        |
//! | [`sim`]      | `Sim`                                                     |
//! | [`builder`]  | `SimBuilder`                                              |
//! | [`observer`] | `SimObserver`, `NoopObserver`, `StepReport`               |
//! | [`error`]    | `SimError`, `SimResult<T>`                                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Runs both phases on a Rayon pool of `num_threads` workers. |
//!
//! Results are identical with and without `parallel`, for any thread count:
//! every random draw comes from a per-location or per-agent RNG and every
//! inbox is sorted before evaluation.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use epi_sim::{FixedVisits, NoopObserver, Population, SimBuilder};
//! use epi_transmission::BernoulliTransmission;
//!
//! let population = Population::with_size(1_000, config.seed);
//! let mut sim = SimBuilder::new(config, population, BernoulliTransmission::new(0.2)?, visits)
//!     .locations(locations)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod host;
pub mod observer;
pub mod sim;
pub mod visits;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use host::{HealthCounts, Host, Population, Progression};
pub use observer::{NoopObserver, SimObserver, StepReport};
pub use sim::Sim;
pub use visits::{FixedVisits, VisitSource};
