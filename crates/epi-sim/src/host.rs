//! Per-agent host state: health, time in state, and deterministic RNG.
//!
//! # Why `hosts` and `rngs` are separate vectors
//!
//! The transmission phase needs `&mut AgentRng` for each host while also
//! writing that host's state.  Keeping RNGs in their own `Vec` (indexed the
//! same way as `hosts`) lets the runner zip the two mutably, sequentially or
//! with Rayon, without fighting the borrow checker.

use std::collections::HashMap;
use std::fmt;

use epi_core::{AgentId, AgentRng, HealthState};

use crate::{SimError, SimResult};

// ── Host ──────────────────────────────────────────────────────────────────────

/// One agent's health record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Host {
    pub id:           AgentId,
    pub health_state: HealthState,
    /// Index of the first timestep spent in `health_state`.
    pub state_since:  u64,
}

// ── Progression ───────────────────────────────────────────────────────────────

/// Deterministic within-host disease course after infection:
///
/// ```text
/// Exposed ──latent_timesteps──► Infectious ──infectious_timesteps──► Recovered
/// ```
///
/// A host moves at most one stage per timestep.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Progression {
    pub latent_timesteps:     u64,
    pub infectious_timesteps: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Self { latent_timesteps: 3, infectious_timesteps: 7 }
    }
}

impl Progression {
    /// State `host` should be in at timestep `step`, if it changes.
    pub fn next_state(&self, host: &Host, step: u64) -> Option<HealthState> {
        let elapsed = step.saturating_sub(host.state_since);
        match host.health_state {
            HealthState::Exposed if elapsed >= self.latent_timesteps => Some(HealthState::Infectious),
            HealthState::Infectious if elapsed >= self.infectious_timesteps => Some(HealthState::Recovered),
            _ => None,
        }
    }
}

// ── HealthCounts ──────────────────────────────────────────────────────────────

/// Number of hosts in each [`HealthState`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HealthCounts([usize; HealthState::ALL.len()]);

impl HealthCounts {
    #[inline]
    pub fn get(&self, state: HealthState) -> usize {
        self.0[state.ordinal()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    fn add(&mut self, state: HealthState) {
        self.0[state.ordinal()] += 1;
    }
}

impl fmt::Display for HealthCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S={} E={} I={} R={} D={}",
            self.get(HealthState::Susceptible),
            self.get(HealthState::Exposed),
            self.get(HealthState::Infectious),
            self.get(HealthState::Recovered),
            self.get(HealthState::Removed),
        )
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// All hosts of a run, in ascending `AgentId` order, plus their RNGs.
pub struct Population {
    pub(crate) hosts: Vec<Host>,
    pub(crate) rngs:  Vec<AgentRng>,
    index:            HashMap<AgentId, usize>,
}

impl Population {
    /// Create susceptible hosts for `agents`.
    ///
    /// Fails on a duplicate or `AgentId::INVALID`.  RNGs are seeded from
    /// `(seed, agent_id)`.
    pub fn new<I>(agents: I, seed: u64) -> SimResult<Self>
    where
        I: IntoIterator<Item = AgentId>,
    {
        let mut ids: Vec<AgentId> = agents.into_iter().collect();
        ids.sort_unstable();
        if let Some(w) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(SimError::DuplicateAgent(w[0]));
        }
        if ids.last().is_some_and(|id| !id.is_valid()) {
            return Err(SimError::InvalidAgent);
        }

        let hosts: Vec<Host> = ids
            .iter()
            .map(|&id| Host { id, health_state: HealthState::Susceptible, state_since: 0 })
            .collect();
        let rngs = ids.iter().map(|&id| AgentRng::new(seed, id)).collect();
        let index = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Ok(Self { hosts, rngs, index })
    }

    /// Agents `0..count`.
    pub fn with_size(count: u64, seed: u64) -> Self {
        let hosts: Vec<Host> = (0..count)
            .map(|i| Host { id: AgentId(i), health_state: HealthState::Susceptible, state_since: 0 })
            .collect();
        let rngs = (0..count).map(|i| AgentRng::new(seed, AgentId(i))).collect();
        let index = (0..count).map(|i| (AgentId(i), i as usize)).collect();
        Self { hosts, rngs, index }
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn host(&self, agent: AgentId) -> Option<&Host> {
        self.index.get(&agent).map(|&i| &self.hosts[i])
    }

    pub fn state(&self, agent: AgentId) -> Option<HealthState> {
        self.host(agent).map(|h| h.health_state)
    }

    /// Force `agent` into `state` starting at timestep `since` (seeding
    /// initial infections, interventions).
    pub fn set_state(&mut self, agent: AgentId, state: HealthState, since: u64) -> SimResult<()> {
        let &i = self.index.get(&agent).ok_or(SimError::UnknownAgent(agent))?;
        self.hosts[i].health_state = state;
        self.hosts[i].state_since = since;
        Ok(())
    }

    pub fn counts(&self) -> HealthCounts {
        let mut counts = HealthCounts::default();
        for h in &self.hosts {
            counts.add(h.health_state);
        }
        counts
    }

    /// Apply `progression` for the hosts entering timestep `step`.
    /// Returns how many hosts changed state.
    pub fn progress(&mut self, progression: &Progression, step: u64) -> usize {
        let mut changed = 0;
        for host in &mut self.hosts {
            if let Some(next) = progression.next_state(host, step) {
                host.health_state = next;
                host.state_since = step;
                changed += 1;
            }
        }
        changed
    }
}
