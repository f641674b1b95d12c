use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("broker receiver disconnected; {dropped} messages not delivered")]
    Disconnected { dropped: usize },
}

pub type BrokerResult<T> = Result<T, BrokerError>;
