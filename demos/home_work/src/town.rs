//! Synthetic town: households are cliques, workplaces are random graphs.

use anyhow::Result;

use epi_core::{AgentId, HealthState, LocationId, SimRng};
use epi_location::{ContactGraphBuilder, GraphLocation, Location};
use epi_sim::{FixedVisits, Population};

use crate::config::DemoConfig;

/// A fully built town, ready to hand to `SimBuilder`.
pub struct Town {
    pub population: Population,
    pub visits:     FixedVisits,
    pub locations:  Vec<Box<dyn Location>>,
}

/// Build the town described by `config`.
///
/// Location ids: households are `0..households`, workplaces follow.  Every
/// agent visits its household and one workplace each timestep.
pub fn build_town(config: &DemoConfig) -> Result<Town> {
    let seed = config.sim.seed;
    let mut rng = SimRng::new(seed);

    // ── Households ────────────────────────────────────────────────────────
    let mut visits = FixedVisits::new();
    let mut locations: Vec<Box<dyn Location>> =
        Vec::with_capacity(config.households + config.workplaces);
    let mut next_agent = 0u64;

    for h in 0..config.households {
        let size = rng.gen_range(1..=config.max_household_size) as u64;
        let members: Vec<AgentId> = (next_agent..next_agent + size).map(AgentId).collect();
        next_agent += size;

        let id = LocationId(h as u64);
        for &agent in &members {
            visits.assign(agent, id);
        }
        let mut graph = ContactGraphBuilder::new();
        graph.add_clique(&members);
        let location = GraphLocation::from_graph(id, config.household_drop_prob, graph.build()?)?
            .with_seed(seed);
        locations.push(Box::new(location));
    }
    let agent_count = next_agent;

    // ── Workplaces ────────────────────────────────────────────────────────
    let mut staff: Vec<Vec<AgentId>> = vec![Vec::new(); config.workplaces];
    for agent in (0..agent_count).map(AgentId) {
        staff[rng.gen_range(0..config.workplaces)].push(agent);
    }

    for (w, members) in staff.iter().enumerate() {
        let id = LocationId((config.households + w) as u64);
        let mut graph = ContactGraphBuilder::new();
        for (i, &a) in members.iter().enumerate() {
            visits.assign(a, id);
            for &b in &members[i + 1..] {
                if rng.gen_bool(config.workplace_edge_prob) {
                    graph.add_edge(a, b);
                }
            }
        }
        let graph = graph.build()?;
        log::debug!("workplace {id}: {} staff, {} edges", members.len(), graph.edge_count());
        let location = GraphLocation::from_graph(id, config.workplace_drop_prob, graph)?
            .with_seed(seed);
        locations.push(Box::new(location));
    }

    // ── Hosts and seeded infections ───────────────────────────────────────
    let mut population = Population::with_size(agent_count, seed);
    let target = config.initial_infections.min(population.len());
    let mut seeded = 0;
    while seeded < target {
        let agent = AgentId(rng.gen_range(0..agent_count));
        if population.state(agent) == Some(HealthState::Susceptible) {
            population.set_state(agent, HealthState::Infectious, 0)?;
            seeded += 1;
        }
    }

    log::info!(
        "town: {agent_count} agents, {} households, {} workplaces, {seeded} initial infections",
        config.households,
        config.workplaces
    );
    Ok(Town { population, visits, locations })
}
