//! `VecBroker`: collects every batch into one `Vec` for later inspection.

use crate::{Broker, BrokerResult};

/// A [`Broker`] that appends every message it receives to a `Vec`.
///
/// Used in tests and single-threaded drivers.  Batches are appended in send
/// order, so the batch contract holds trivially; consumers should still treat
/// the contents as an unordered multiset.
#[derive(Debug)]
pub struct VecBroker<T> {
    messages: Vec<T>,
    batches:  usize,
}

impl<T> Default for VecBroker<T> {
    fn default() -> Self {
        Self { messages: Vec::new(), batches: 0 }
    }
}

impl<T> VecBroker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[T] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<T> {
        self.messages
    }

    /// Number of `send` calls received, including empty batches.
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<T> Broker<T> for VecBroker<T> {
    fn send(&mut self, mut messages: Vec<T>) -> BrokerResult<()> {
        self.batches += 1;
        self.messages.append(&mut messages);
        Ok(())
    }
}
