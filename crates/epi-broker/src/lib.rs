//! `epi-broker`: the message-passing substrate between locations and hosts.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`broker`]  | `Broker<T>` trait and its batch contract                        |
//! | [`collect`] | `VecBroker<T>`: collects everything, for tests and simple drivers |
//! | [`channel`] | `channel()`, `ChannelBroker<T>`, `BrokerReceiver<T>` (cross-thread) |
//! | [`inbox`]   | `Inboxes`: per-agent exposure mailboxes                        |
//! | [`error`]   | `BrokerError`, `BrokerResult<T>`                                |
//!
//! # Design notes
//!
//! Locations never share a mutable collection.  During the (possibly
//! parallel) location phase each location writes to its own `ChannelBroker`
//! clone; after the timestep barrier the runner drains the single receiver
//! into `Inboxes` on one thread.  No lock is taken on the producer path.

pub mod broker;
pub mod channel;
pub mod collect;
pub mod error;
pub mod inbox;

#[cfg(test)]
mod tests;

pub use broker::Broker;
pub use channel::{BrokerReceiver, ChannelBroker, channel};
pub use collect::VecBroker;
pub use error::{BrokerError, BrokerResult};
pub use inbox::Inboxes;
