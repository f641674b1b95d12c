//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `EpiError` as one variant
//! via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `epi-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EpiError {
    #[error("infectivity {0} is outside [0, 1]")]
    InvalidInfectivity(f32),

    #[error("{0} cannot be exposed to itself")]
    SelfExposure(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `epi-core`.
pub type EpiResult<T> = Result<T, EpiError>;
