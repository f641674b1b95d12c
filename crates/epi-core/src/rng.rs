//! Deterministic per-agent, per-location, and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Every location and every agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive IDs uniformly across the seed space.  Locations
//! use a second constant so location 7 and agent 7 never share a stream.
//! This means:
//!
//! - Edge sampling at a location depends only on the seed, the location ID,
//!   and the visits it has processed, not on which worker ran it or when.
//! - Adding locations or agents does not disturb the streams of existing ones.
//! - All RNG calls are local to the owning thread; no synchronisation needed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, LocationId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Second mixing constant (splitmix64 multiplier) for location streams.
const LOCATION_MIXING_CONSTANT: u64 = 0xbf58_476d_1ce4_e5b9;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG, used by stochastic transmission models.
///
/// Create one per agent at population init.  The type is `!Sync` to prevent
/// accidental sharing across threads.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ agent.0.wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── LocationRng ───────────────────────────────────────────────────────────────

/// Per-location deterministic RNG, owned by the location that draws from it.
///
/// Each location is processed by exactly one worker per timestep, so owning
/// the stream makes the sampled contact pattern independent of the worker
/// count.
pub struct LocationRng(SmallRng);

impl LocationRng {
    /// Seed deterministically from the run's global seed and a location ID.
    pub fn new(global_seed: u64, location: LocationId) -> Self {
        let seed = global_seed ^ location.0.wrapping_add(1).wrapping_mul(LOCATION_MIXING_CONSTANT);
        LocationRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p`.
    ///
    /// Exact at the extremes: `p == 0.0` is always `false` and `p == 1.0`
    /// always `true`.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (population setup, graph
/// generation, seeding children).
///
/// Used only in single-threaded contexts.  If you need parallel randomness,
/// give each worker its own `SimRng` derived with [`child`][Self::child].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
