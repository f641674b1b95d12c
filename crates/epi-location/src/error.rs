//! Location-subsystem error type.

use thiserror::Error;

use epi_broker::BrokerError;
use epi_core::{AgentId, LocationId};

/// Errors produced by `epi-location`.
///
/// Every variant except `Broker` is a configuration error raised at
/// construction; `process_visits` itself only fails if delivery fails.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("invalid location id {0}")]
    InvalidId(LocationId),

    #[error("drop probability {0} is outside [0, 1]")]
    DropProbability(f64),

    #[error("self-loop edge on {0}")]
    SelfLoop(AgentId),

    #[error("edge ({a}, {b}) names an invalid agent id")]
    InvalidAgent { a: AgentId, b: AgentId },

    #[error("outcome delivery failed: {0}")]
    Broker(#[from] BrokerError),
}

pub type LocationResult<T> = Result<T, LocationError>;
