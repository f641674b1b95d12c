//! `Inboxes`: routes infection outcomes to per-agent exposure lists.
//!
//! This is the consumer end of the location → host flow: the runner drains
//! its channel after the timestep barrier and feeds every batch in here, then
//! each host takes its own exposures for transmission-model evaluation.

use std::collections::HashMap;

use epi_core::{AgentId, Exposure, InfectionOutcome};

use crate::{Broker, BrokerResult};

/// Per-recipient mailboxes of exposures accumulated during one timestep.
#[derive(Default)]
pub struct Inboxes {
    boxes: HashMap<AgentId, Vec<Exposure>>,
    total: usize,
}

impl Inboxes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one outcome to its recipient's mailbox.
    #[inline]
    pub fn deliver(&mut self, outcome: InfectionOutcome) {
        self.boxes.entry(outcome.agent_id).or_default().push(outcome.exposure);
        self.total += 1;
    }

    /// Remove and return `agent`'s exposures, sorted by infectivity.
    ///
    /// Arrival order depends on thread scheduling; sorting makes any
    /// aggregation over the list independent of it.  Agents with no mail get
    /// an empty `Vec`.
    pub fn take(&mut self, agent: AgentId) -> Vec<Exposure> {
        let Some(mut exposures) = self.boxes.remove(&agent) else {
            return Vec::new();
        };
        self.total -= exposures.len();
        exposures.sort_by(|a, b| a.infectivity().total_cmp(&b.infectivity()));
        exposures
    }

    /// Number of exposures queued for `agent`.
    pub fn count_for(&self, agent: AgentId) -> usize {
        self.boxes.get(&agent).map_or(0, Vec::len)
    }

    /// Number of agents with at least one queued exposure.
    pub fn recipients(&self) -> usize {
        self.boxes.len()
    }

    /// Total queued exposures across all agents.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Drop everything not yet taken.  Returns how many exposures were discarded.
    pub fn clear(&mut self) -> usize {
        let dropped = self.total;
        if dropped > 0 {
            log::debug!(
                "discarding {dropped} undelivered exposures for {} agents",
                self.boxes.len()
            );
        }
        self.boxes.clear();
        self.total = 0;
        dropped
    }
}

impl Broker<InfectionOutcome> for Inboxes {
    fn send(&mut self, messages: Vec<InfectionOutcome>) -> BrokerResult<()> {
        self.boxes.reserve(messages.len());
        for outcome in messages {
            self.deliver(outcome);
        }
        Ok(())
    }
}
