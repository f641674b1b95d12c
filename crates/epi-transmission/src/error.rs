use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransmissionError {
    #[error("transmissibility {0} is outside [0, 1]")]
    Transmissibility(f64),
}

pub type TransmissionResult<T> = Result<T, TransmissionError>;
