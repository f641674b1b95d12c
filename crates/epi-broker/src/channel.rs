//! Cross-thread broker over `std::sync::mpsc`.
//!
//! Each `send` call travels as a single `Vec<T>` channel message, so a batch
//! can never be split or interleaved with another producer's batch.  Batches
//! from one `ChannelBroker` arrive in the order they were sent (mpsc FIFO per
//! sender).  Batches from different clones have no relative order.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::{Broker, BrokerError, BrokerResult};

/// Create a connected broker/receiver pair.
///
/// Clone the broker once per writer (per location, per worker, …); the
/// receiver stays with the consumer.
pub fn channel<T>() -> (ChannelBroker<T>, BrokerReceiver<T>) {
    let (tx, rx) = mpsc::channel();
    (ChannelBroker { tx }, BrokerReceiver { rx })
}

/// Producer half.  `Send`, cheap to clone.
pub struct ChannelBroker<T> {
    tx: Sender<Vec<T>>,
}

impl<T> Clone for ChannelBroker<T> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<T> Broker<T> for ChannelBroker<T> {
    fn send(&mut self, messages: Vec<T>) -> BrokerResult<()> {
        let len = messages.len();
        self.tx
            .send(messages)
            .map_err(|_| BrokerError::Disconnected { dropped: len })
    }
}

/// Consumer half.
pub struct BrokerReceiver<T> {
    rx: Receiver<Vec<T>>,
}

impl<T> BrokerReceiver<T> {
    /// Take every batch that has arrived so far, without blocking.
    ///
    /// The runner calls this after its end-of-timestep barrier, when every
    /// producer has returned, so "so far" means "all of this timestep".
    pub fn drain(&self) -> Vec<Vec<T>> {
        let mut batches = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(batch) => batches.push(batch),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        batches
    }

    /// Like [`drain`][Self::drain] but flattened into one message list.
    pub fn drain_messages(&self) -> Vec<T> {
        self.drain().into_iter().flatten().collect()
    }
}
