//! The `Broker` trait implemented by every message sink.

use crate::BrokerResult;

/// A typed fan-out channel: producers hand it whole batches of `T`.
///
/// # Batch contract
///
/// All messages passed to one [`send`][Self::send] call form one batch.  An
/// implementation must make the batch available to its consumer as a unit:
/// a consumer never observes part of a batch, and never sees a later batch
/// from the same producer before an earlier one.
///
/// How and when the batch reaches its consumer (immediately, buffered, or
/// across a thread boundary) is up to the implementation.
///
/// # Thread safety
///
/// `send` takes `&mut self`, so a broker instance is single-writer.  Code
/// that fans work out across threads hands each worker its own instance
/// (e.g. a [`ChannelBroker`][crate::ChannelBroker] clone).
pub trait Broker<T> {
    /// Deliver one batch.
    fn send(&mut self, messages: Vec<T>) -> BrokerResult<()>;
}

impl<T, B: Broker<T> + ?Sized> Broker<T> for &mut B {
    #[inline]
    fn send(&mut self, messages: Vec<T>) -> BrokerResult<()> {
        (**self).send(messages)
    }
}
