//! Simulation time model.
//!
//! # Design
//!
//! Absolute time is a `SimTime` in whole seconds since the Unix epoch, and a
//! `Timestep` is the half-open window `[start, start + duration)` the runner
//! is currently processing.  Integer seconds keep window arithmetic exact, so
//! successive windows are contiguous with no floating-point drift:
//!
//! ```text
//! advance():  start ← start + duration      (== previous end)
//! ```

use std::fmt;
use std::time::Duration;

use crate::{EpiError, EpiResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation instant, in seconds since the Unix epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub i64);

impl SimTime {
    /// `self + duration`, or `None` if `duration` has a fractional second or
    /// the result does not fit in an `i64`.
    pub fn checked_add(self, duration: Duration) -> Option<SimTime> {
        if duration.subsec_nanos() != 0 {
            return None;
        }
        let secs = i64::try_from(duration.as_secs()).ok()?;
        self.0.checked_add(secs).map(SimTime)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}s", self.0)
    }
}

// ── Timestep ──────────────────────────────────────────────────────────────────

/// The simulation window for a single step.
///
/// `end` is cached at construction and kept in sync by [`advance`][Self::advance];
/// equality ignores it since it is derivable from `start` and `duration`.
#[derive(Copy, Clone, Debug)]
pub struct Timestep {
    start:    SimTime,
    duration: Duration,
    end:      SimTime,
}

impl Timestep {
    /// Create the window `[start, start + duration)`.
    ///
    /// Fails unless `duration` is a positive whole number of seconds (the
    /// clock's resolution), or if the end does not fit in a `SimTime`.
    pub fn new(start: SimTime, duration: Duration) -> EpiResult<Self> {
        if duration.as_secs() == 0 || duration.subsec_nanos() != 0 {
            return Err(EpiError::Config(format!(
                "timestep duration must be a positive whole number of seconds, got {duration:?}"
            )));
        }
        let end = end_of(start, duration)?;
        Ok(Self { start, duration, end })
    }

    #[inline]
    pub fn start_time(&self) -> SimTime {
        self.start
    }

    #[inline]
    pub fn end_time(&self) -> SimTime {
        self.end
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Move the window forward by exactly one `duration`.
    ///
    /// The runner must only call this after every outcome of the current
    /// window has been delivered and consumed.  Fails, leaving the window
    /// unchanged, if the next end would overflow.
    pub fn advance(&mut self) -> EpiResult<()> {
        let end = end_of(self.end, self.duration)?;
        self.start = self.end;
        self.end = end;
        Ok(())
    }

    /// `true` if `t` falls inside `[start, end)`.
    #[inline]
    pub fn contains(&self, t: SimTime) -> bool {
        self.start <= t && t < self.end
    }
}

fn end_of(start: SimTime, duration: Duration) -> EpiResult<SimTime> {
    start.checked_add(duration).ok_or_else(|| {
        EpiError::Config(format!("timestep end {start} + {duration:?} overflows"))
    })
}

impl PartialEq for Timestep {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.duration == other.duration
    }
}

impl Eq for Timestep {}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.0, self.end.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation runner.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Unix timestamp at which the first timestep starts.
    pub start_unix_secs: i64,

    /// Seconds per timestep.  Default in the demos: 86 400 (one day).
    pub timestep_secs: u64,

    /// Number of timesteps to simulate.
    pub total_timesteps: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    /// Ignored without the `parallel` feature of `epi-sim`.
    pub num_threads: Option<usize>,

    /// Report counts every N timesteps.  0 disables periodic reports.
    pub output_interval_timesteps: u64,
}

impl SimConfig {
    /// The first window of the run.
    pub fn first_timestep(&self) -> EpiResult<Timestep> {
        Timestep::new(
            SimTime(self.start_unix_secs),
            Duration::from_secs(self.timestep_secs),
        )
    }

    /// Absolute end of the run (exclusive).
    ///
    /// Fails if `timestep_secs * total_timesteps` past the start does not fit
    /// in a `SimTime`.
    pub fn end_time(&self) -> EpiResult<SimTime> {
        let start = SimTime(self.start_unix_secs);
        self.timestep_secs
            .checked_mul(self.total_timesteps)
            .and_then(|secs| start.checked_add(Duration::from_secs(secs)))
            .ok_or_else(|| {
                EpiError::Config(format!(
                    "{} timesteps of {} s from {start} overflow the clock",
                    self.total_timesteps, self.timestep_secs
                ))
            })
    }
}
