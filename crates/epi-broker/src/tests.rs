//! Unit tests for epi-broker.

use epi_core::{AgentId, HealthState, InfectionOutcome};

fn outcome(agent: u64, source: u64, state: HealthState) -> InfectionOutcome {
    InfectionOutcome::contact(AgentId(agent), AgentId(source), state)
}

// ── VecBroker ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vec_broker {
    use super::*;
    use crate::{Broker, VecBroker};

    #[test]
    fn collects_all_batches() {
        let mut broker = VecBroker::new();
        broker.send(vec![1, 2, 3]).unwrap();
        broker.send(vec![]).unwrap();
        broker.send(vec![4]).unwrap();
        assert_eq!(broker.messages(), &[1, 2, 3, 4]);
        assert_eq!(broker.batches(), 3);
    }

    fn send_one<B: Broker<InfectionOutcome>>(mut broker: B, msg: InfectionOutcome) {
        broker.send(vec![msg]).unwrap();
    }

    #[test]
    fn usable_through_dyn_and_mut_ref() {
        let mut broker: VecBroker<InfectionOutcome> = VecBroker::new();
        {
            let dyn_broker: &mut dyn Broker<InfectionOutcome> = &mut broker;
            dyn_broker.send(vec![outcome(0, 1, HealthState::Infectious)]).unwrap();
        }
        send_one(&mut broker, outcome(1, 0, HealthState::Susceptible));
        assert_eq!(broker.into_messages().len(), 2);
    }
}

// ── ChannelBroker ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod channel_broker {
    use std::thread;

    use crate::{Broker, BrokerError, channel};

    #[test]
    fn batches_arrive_whole_and_in_order() {
        let (mut tx, rx) = channel();
        tx.send(vec![1, 2]).unwrap();
        tx.send(vec![3]).unwrap();
        tx.send(vec![]).unwrap();
        assert_eq!(rx.drain(), vec![vec![1, 2], vec![3], vec![]]);
        assert!(rx.drain().is_empty());
    }

    #[test]
    fn concurrent_writers_never_interleave_batches() {
        let (tx, rx) = channel::<(u32, u32)>();
        let handles: Vec<_> = (0..8u32)
            .map(|writer| {
                let mut tx = tx.clone();
                thread::spawn(move || {
                    for batch in 0..50u32 {
                        let msgs = (0..10).map(|_| (writer, batch)).collect();
                        tx.send(msgs).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        drop(tx);

        let batches = rx.drain();
        assert_eq!(batches.len(), 8 * 50);

        let mut last_seen = [None::<u32>; 8];
        for batch in &batches {
            assert_eq!(batch.len(), 10);
            let (writer, seq) = batch[0];
            assert!(batch.iter().all(|&m| m == (writer, seq)), "batch was split");
            // Per-producer FIFO.
            if let Some(prev) = last_seen[writer as usize] {
                assert!(seq > prev);
            }
            last_seen[writer as usize] = Some(seq);
        }
    }

    #[test]
    fn send_after_receiver_dropped_errors() {
        let (mut tx, rx) = channel::<u8>();
        drop(rx);
        match tx.send(vec![1, 2, 3]) {
            Err(BrokerError::Disconnected { dropped }) => assert_eq!(dropped, 3),
            other => panic!("expected Disconnected, got {other:?}"),
        }
    }

    #[test]
    fn drain_messages_flattens() {
        let (mut tx, rx) = channel();
        tx.send(vec!['a', 'b']).unwrap();
        tx.send(vec!['c']).unwrap();
        assert_eq!(rx.drain_messages(), vec!['a', 'b', 'c']);
    }
}

// ── Inboxes ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod inboxes {
    use super::*;
    use crate::{Broker, Inboxes};

    #[test]
    fn routes_by_recipient() {
        let mut inboxes = Inboxes::new();
        inboxes
            .send(vec![
                outcome(0, 2, HealthState::Infectious),
                outcome(2, 0, HealthState::Susceptible),
                outcome(0, 4, HealthState::Susceptible),
            ])
            .unwrap();
        assert_eq!(inboxes.len(), 3);
        assert_eq!(inboxes.recipients(), 2);
        assert_eq!(inboxes.count_for(AgentId(0)), 2);
        assert_eq!(inboxes.count_for(AgentId(2)), 1);
        assert_eq!(inboxes.count_for(AgentId(9)), 0);
    }

    #[test]
    fn take_sorts_and_removes() {
        let mut inboxes = Inboxes::new();
        inboxes.deliver(outcome(0, 1, HealthState::Infectious));
        inboxes.deliver(outcome(0, 2, HealthState::Susceptible));
        inboxes.deliver(outcome(0, 3, HealthState::Infectious));

        let taken = inboxes.take(AgentId(0));
        let infectivities: Vec<f32> = taken.iter().map(|e| e.infectivity()).collect();
        assert_eq!(infectivities, vec![0.0, 1.0, 1.0]);
        assert!(inboxes.is_empty());
        assert!(inboxes.take(AgentId(0)).is_empty());
    }

    #[test]
    fn clear_reports_dropped() {
        let mut inboxes = Inboxes::new();
        inboxes.deliver(outcome(5, 6, HealthState::Infectious));
        inboxes.deliver(outcome(6, 5, HealthState::Susceptible));
        assert_eq!(inboxes.clear(), 2);
        assert_eq!(inboxes.recipients(), 0);
        assert_eq!(inboxes.clear(), 0);
    }
}
