use thiserror::Error;

use epi_broker::BrokerError;
use epi_core::{AgentId, EpiError, LocationId};
use epi_location::LocationError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] EpiError),

    #[error("no locations registered")]
    NoLocations,

    #[error("location {0} registered twice")]
    DuplicateLocation(LocationId),

    #[error("agent {0} listed twice in the population")]
    DuplicateAgent(AgentId),

    #[error("population contains AgentId::INVALID")]
    InvalidAgent,

    #[error("agent {0} is not in the population")]
    UnknownAgent(AgentId),

    #[error("location phase failed: {0}")]
    Location(#[from] LocationError),

    #[error("outcome routing failed: {0}")]
    Broker(#[from] BrokerError),
}

pub type SimResult<T> = Result<T, SimError>;
