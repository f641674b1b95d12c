//! Unit tests for epi-location.
//!
//! All tests use hand-written graphs and a collecting broker.

#[cfg(test)]
mod helpers {
    use epi_broker::VecBroker;
    use epi_core::{AgentId, HealthState, InfectionOutcome, LocationId, Visit};

    pub const LOCATION: LocationId = LocationId(1);

    /// Six agents in two triangles-with-a-gap:
    /// (0,2) (0,4) (1,3) (1,5) (2,4) (3,5)
    pub fn scenario_edges() -> Vec<(AgentId, AgentId)> {
        [(0, 2), (0, 4), (1, 3), (1, 5), (2, 4), (3, 5)]
            .into_iter()
            .map(|(a, b)| (AgentId(a), AgentId(b)))
            .collect()
    }

    pub fn visit(agent: u64, state: HealthState) -> Visit {
        Visit::new(LOCATION, AgentId(agent), state)
    }

    /// Agent 3 stays home.
    pub fn scenario_visits() -> Vec<Visit> {
        vec![
            visit(0, HealthState::Susceptible),
            visit(1, HealthState::Susceptible),
            visit(2, HealthState::Infectious),
            visit(4, HealthState::Susceptible),
            visit(5, HealthState::Infectious),
        ]
    }

    /// `(agent, source, infectivity)` triples, sorted for order-independent
    /// comparison of outcome multisets.
    pub fn triples(outcomes: &[InfectionOutcome]) -> Vec<(u64, u64, f32)> {
        let mut v: Vec<_> = outcomes
            .iter()
            .map(|o| (o.agent_id.0, o.source_id.0, o.exposure.infectivity()))
            .collect();
        v.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)).then(x.2.total_cmp(&y.2)));
        v
    }

    pub fn sorted(mut v: Vec<(u64, u64, f32)>) -> Vec<(u64, u64, f32)> {
        v.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)).then(x.2.total_cmp(&y.2)));
        v
    }

    pub fn run(
        location: &mut dyn crate::Location,
        visits: &[Visit],
    ) -> VecBroker<InfectionOutcome> {
        let mut broker = VecBroker::new();
        location.process_visits(visits, &mut broker).unwrap();
        broker
    }
}

// ── ContactGraph ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use epi_core::{AgentId, HealthState};

    use crate::{AgentMap, ContactGraph, ContactGraphBuilder, LocationError};

    #[test]
    fn deduplicates_undirected_edges() {
        let g = ContactGraph::from_edges([
            (AgentId(1), AgentId(2)),
            (AgentId(2), AgentId(1)),
            (AgentId(1), AgentId(2)),
            (AgentId(2), AgentId(3)),
        ])
        .unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.agent_count(), 3);
        assert_eq!(g.neighbors(AgentId(2)), &[AgentId(1), AgentId(3)]);
        assert!(g.contains_edge(AgentId(3), AgentId(2)));
        assert!(!g.contains_edge(AgentId(1), AgentId(3)));
        assert_eq!(
            g.edges(),
            vec![(AgentId(1), AgentId(2)), (AgentId(2), AgentId(3))]
        );
    }

    #[test]
    fn rejects_self_loop() {
        let err = ContactGraph::from_edges([(AgentId(1), AgentId(2)), (AgentId(4), AgentId(4))])
            .unwrap_err();
        assert!(matches!(err, LocationError::SelfLoop(AgentId(4))));
    }

    #[test]
    fn rejects_invalid_agent() {
        let err = ContactGraph::from_edges([(AgentId(1), AgentId::INVALID)]).unwrap_err();
        assert!(matches!(err, LocationError::InvalidAgent { .. }));
    }

    #[test]
    fn unknown_agent_has_no_neighbors() {
        let g = ContactGraph::from_edges([(AgentId(1), AgentId(2))]).unwrap();
        assert!(g.neighbors(AgentId(99)).is_empty());
        assert!(ContactGraph::default().is_empty());
    }

    #[test]
    fn clique_builder() {
        let mut b = ContactGraphBuilder::new();
        b.add_clique(&[AgentId(0), AgentId(1), AgentId(2), AgentId(3)])
            .add_edge(AgentId(3), AgentId(4));
        let g = b.build().unwrap();
        assert_eq!(g.edge_count(), 6 + 1);
        assert_eq!(g.neighbors(AgentId(3)).len(), 4);
    }

    #[test]
    fn co_present_is_sorted_and_gated() {
        let g = ContactGraph::from_edges([
            (AgentId(5), AgentId(1)),
            (AgentId(3), AgentId(1)),
            (AgentId(3), AgentId(5)),
            (AgentId(7), AgentId(1)),
        ])
        .unwrap();
        let mut present = AgentMap::default();
        present.insert(AgentId(5), HealthState::Infectious);
        present.insert(AgentId(1), HealthState::Susceptible);
        present.insert(AgentId(3), HealthState::Exposed);

        let pairs: Vec<_> = g.co_present(&present).iter().map(|c| (c.a.0, c.b.0)).collect();
        assert_eq!(pairs, vec![(1, 3), (1, 5), (3, 5)]);

        let c = g.co_present(&present)[1];
        assert_eq!(c.a_state, HealthState::Susceptible);
        assert_eq!(c.b_state, HealthState::Infectious);
    }
}

// ── GraphLocation: construction ───────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use epi_core::{AgentId, LocationId};

    use super::helpers::*;
    use crate::{GraphLocation, Location, LocationError, new_graph_location};

    #[test]
    fn self_loop_fails_construction() {
        let mut edges = scenario_edges();
        edges.push((AgentId(3), AgentId(3)));
        assert!(matches!(
            GraphLocation::new(LOCATION, 0.0, edges),
            Err(LocationError::SelfLoop(AgentId(3)))
        ));
    }

    #[test]
    fn drop_probability_out_of_range_fails() {
        for p in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    GraphLocation::new(LOCATION, p, scenario_edges()),
                    Err(LocationError::DropProbability(_))
                ),
                "p = {p}"
            );
        }
        assert!(GraphLocation::new(LOCATION, 0.0, scenario_edges()).is_ok());
        assert!(GraphLocation::new(LOCATION, 1.0, scenario_edges()).is_ok());
    }

    #[test]
    fn invalid_location_id_fails() {
        assert!(matches!(
            new_graph_location(LocationId::INVALID, 0.5, scenario_edges()),
            Err(LocationError::InvalidId(_))
        ));
    }

    #[test]
    fn accessors() {
        let loc = GraphLocation::new(LOCATION, 0.25, scenario_edges()).unwrap();
        assert_eq!(loc.id(), LOCATION);
        assert_eq!(loc.drop_probability(), 0.25);
        assert_eq!(loc.graph().edge_count(), 6);
        assert_eq!(loc.sampler_name(), "per-edge");
    }
}

// ── GraphLocation: process_visits ─────────────────────────────────────────────

#[cfg(test)]
mod process_visits {
    use epi_core::{AgentId, ExposureType, HealthState, LocationId, Visit};

    use super::helpers::*;
    use crate::{GraphLocation, new_graph_location};

    #[test]
    fn complete_sample_generated() {
        let mut loc = new_graph_location(LOCATION, 0.0, scenario_edges()).unwrap();
        let broker = run(loc.as_mut(), &scenario_visits());
        assert_eq!(
            triples(broker.messages()),
            sorted(vec![
                (0, 2, 1.0),
                (2, 0, 0.0),
                (0, 4, 0.0),
                (4, 0, 0.0),
                (1, 5, 1.0),
                (5, 1, 0.0),
                (2, 4, 0.0),
                (4, 2, 1.0),
            ])
        );
        assert!(broker.messages().iter().all(|o| o.exposure_type == ExposureType::Contact));
    }

    #[test]
    fn all_samples_dropped() {
        let mut loc = new_graph_location(LOCATION, 1.0, scenario_edges()).unwrap();
        let broker = run(loc.as_mut(), &scenario_visits());
        assert!(broker.is_empty());
        assert_eq!(broker.batches(), 1, "empty batch is still sent");
    }

    #[test]
    fn absent_endpoint_produces_nothing() {
        let mut loc = new_graph_location(LOCATION, 0.0, scenario_edges()).unwrap();
        let broker = run(loc.as_mut(), &scenario_visits());
        for o in broker.messages() {
            assert_ne!(o.agent_id, AgentId(3));
            assert_ne!(o.source_id, AgentId(3));
            assert_ne!(o.agent_id, o.source_id);
        }
    }

    #[test]
    fn every_co_present_edge_is_symmetric() {
        let mut loc = new_graph_location(LOCATION, 0.0, scenario_edges()).unwrap();
        let broker = run(loc.as_mut(), &scenario_visits());
        let msgs = broker.messages();
        assert_eq!(msgs.len(), 8);
        for o in msgs {
            let reverse = msgs
                .iter()
                .filter(|r| r.agent_id == o.source_id && r.source_id == o.agent_id)
                .count();
            assert_eq!(reverse, 1, "{o:?} has no single mirror");
        }
    }

    #[test]
    fn infectivity_follows_source_state() {
        let states = [
            HealthState::Susceptible,
            HealthState::Exposed,
            HealthState::Infectious,
            HealthState::Recovered,
            HealthState::Removed,
        ];
        // Star around agent 0 so every state appears as a source.
        let edges: Vec<_> = (1..=5).map(|i| (AgentId(0), AgentId(i))).collect();
        let mut visits = vec![visit(0, HealthState::Susceptible)];
        for (i, &s) in states.iter().enumerate() {
            visits.push(visit(i as u64 + 1, s));
        }
        let mut loc = new_graph_location(LOCATION, 0.0, edges).unwrap();
        let broker = run(loc.as_mut(), &visits);

        for o in broker.messages() {
            let source_state = visits
                .iter()
                .find(|v| v.agent_id == o.source_id)
                .map(|v| v.health_state)
                .unwrap();
            let expected = if source_state == HealthState::Infectious { 1.0 } else { 0.0 };
            assert_eq!(o.exposure.infectivity(), expected);
        }
    }

    #[test]
    fn single_visitor_produces_nothing() {
        let mut loc = new_graph_location(LOCATION, 0.0, scenario_edges()).unwrap();
        let broker = run(loc.as_mut(), &[visit(2, HealthState::Infectious)]);
        assert!(broker.is_empty());
        let broker = run(loc.as_mut(), &[]);
        assert!(broker.is_empty());
        assert_eq!(broker.batches(), 1);
    }

    #[test]
    fn foreign_visits_ignored() {
        let mut visits = scenario_visits();
        visits.push(Visit::new(LocationId(2), AgentId(3), HealthState::Infectious));
        let mut loc = new_graph_location(LOCATION, 0.0, scenario_edges()).unwrap();
        let broker = run(loc.as_mut(), &visits);
        assert_eq!(broker.messages().len(), 8);
    }

    #[test]
    fn idempotent_reconstruction() {
        for p in [0.0, 1.0] {
            let mut a = new_graph_location(LOCATION, p, scenario_edges()).unwrap();
            let mut b = new_graph_location(LOCATION, p, scenario_edges()).unwrap();
            let mut visits = scenario_visits();
            let first = triples(run(a.as_mut(), &visits).messages());
            visits.reverse();
            let second = triples(run(b.as_mut(), &visits).messages());
            assert_eq!(first, second, "p = {p}");
        }
    }

    #[test]
    fn seeded_sampling_reproducible_and_visit_order_independent() {
        let edges: Vec<_> = (0..40u64)
            .flat_map(|a| ((a + 1)..40).map(move |b| (AgentId(a), AgentId(b))))
            .collect();
        let visits: Vec<Visit> = (0..40)
            .map(|i| visit(i, if i % 7 == 0 { HealthState::Infectious } else { HealthState::Susceptible }))
            .collect();
        let mut reversed = visits.clone();
        reversed.reverse();

        let mut a = GraphLocation::new(LOCATION, 0.5, edges.clone()).unwrap().with_seed(11);
        let mut b = GraphLocation::new(LOCATION, 0.5, edges).unwrap().with_seed(11);
        for _ in 0..5 {
            let x = triples(run(&mut a, &visits).messages());
            let y = triples(run(&mut b, &reversed).messages());
            assert_eq!(x, y);
        }
    }
}

// ── Samplers ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod samplers {
    use epi_core::{AgentId, HealthState, LocationId, LocationRng};

    use super::helpers::*;
    use crate::{Contact, EdgeSampler, GraphLocation, PerEdgeSampler, WholeGraphSampler};

    fn contacts(n: u64) -> Vec<Contact> {
        (0..n)
            .map(|i| Contact {
                a:       AgentId(2 * i),
                a_state: HealthState::Susceptible,
                b:       AgentId(2 * i + 1),
                b_state: HealthState::Infectious,
            })
            .collect()
    }

    #[test]
    fn extremes_are_deterministic() {
        let mut rng = LocationRng::new(5, LocationId(0));
        for sampler in [&PerEdgeSampler as &dyn EdgeSampler, &WholeGraphSampler] {
            let mut keep = contacts(50);
            sampler.sample(&mut keep, 0.0, &mut rng);
            assert_eq!(keep.len(), 50, "{}", sampler.name());
            let mut drop = contacts(50);
            sampler.sample(&mut drop, 1.0, &mut rng);
            assert!(drop.is_empty(), "{}", sampler.name());
        }
    }

    #[test]
    fn per_edge_retains_about_one_minus_p() {
        let mut rng = LocationRng::new(17, LocationId(3));
        let mut kept = 0;
        let rounds = 200;
        for _ in 0..rounds {
            let mut c = contacts(100);
            PerEdgeSampler.sample(&mut c, 0.3, &mut rng);
            kept += c.len();
        }
        let rate = kept as f64 / (rounds * 100) as f64;
        assert!((rate - 0.7).abs() < 0.02, "retain rate {rate}");
    }

    #[test]
    fn per_edge_mixes_within_one_call() {
        let mut rng = LocationRng::new(1, LocationId(1));
        let mut c = contacts(200);
        PerEdgeSampler.sample(&mut c, 0.5, &mut rng);
        assert!(!c.is_empty() && c.len() < 200);
    }

    #[test]
    fn whole_graph_is_all_or_nothing() {
        let mut rng = LocationRng::new(2, LocationId(9));
        let (mut all, mut none) = (0, 0);
        for _ in 0..200 {
            let mut c = contacts(20);
            WholeGraphSampler.sample(&mut c, 0.5, &mut rng);
            match c.len() {
                20 => all += 1,
                0 => none += 1,
                n => panic!("partial retention: {n}"),
            }
        }
        assert!(all > 50 && none > 50, "all={all} none={none}");
    }

    #[test]
    fn location_uses_swapped_sampler() {
        let mut loc = GraphLocation::new(LOCATION, 0.0, scenario_edges())
            .unwrap()
            .with_sampler(WholeGraphSampler);
        assert_eq!(loc.sampler_name(), "whole-graph");
        assert_eq!(run(&mut loc, &scenario_visits()).messages().len(), 8);
    }
}
