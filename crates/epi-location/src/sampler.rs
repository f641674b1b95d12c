//! Edge-retention strategies.
//!
//! A location asks its [`EdgeSampler`] which of this call's co-present
//! contacts actually happen.  Both built-in samplers agree exactly at the
//! deterministic extremes (`drop_probability` 0 keeps everything, 1 drops
//! everything); they differ in how drops are correlated in between.

use epi_core::LocationRng;

use crate::Contact;

/// Pluggable edge-retention policy.
///
/// # Thread safety
///
/// Samplers are stateless and shared by reference with the location that
/// owns them, which may run on any worker thread, so they must be
/// `Send + Sync`.  All randomness comes from the `rng` argument.
pub trait EdgeSampler: Send + Sync {
    /// Remove the contacts that do not happen this call, in place.
    ///
    /// `contacts` arrives in ascending `(a, b)` order; implementations must
    /// draw from `rng` in that order to stay reproducible.
    fn sample(&self, contacts: &mut Vec<Contact>, drop_probability: f64, rng: &mut LocationRng);

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Independent Bernoulli trial per contact, retained with probability
/// `1 - drop_probability`.  The default.
#[derive(Copy, Clone, Debug, Default)]
pub struct PerEdgeSampler;

impl EdgeSampler for PerEdgeSampler {
    fn sample(&self, contacts: &mut Vec<Contact>, drop_probability: f64, rng: &mut LocationRng) {
        if drop_probability <= 0.0 {
            return;
        }
        if drop_probability >= 1.0 {
            contacts.clear();
            return;
        }
        let retain = 1.0 - drop_probability;
        contacts.retain(|_| rng.gen_bool(retain));
    }

    fn name(&self) -> &'static str {
        "per-edge"
    }
}

/// One Bernoulli trial per call: either every contact happens or none does.
///
/// No draw is made when there are no contacts, so empty calls do not advance
/// the location's stream.
#[derive(Copy, Clone, Debug, Default)]
pub struct WholeGraphSampler;

impl EdgeSampler for WholeGraphSampler {
    fn sample(&self, contacts: &mut Vec<Contact>, drop_probability: f64, rng: &mut LocationRng) {
        if contacts.is_empty() || drop_probability <= 0.0 {
            return;
        }
        if drop_probability >= 1.0 || !rng.gen_bool(1.0 - drop_probability) {
            contacts.clear();
        }
    }

    fn name(&self) -> &'static str {
        "whole-graph"
    }
}
