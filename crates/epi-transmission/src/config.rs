//! Configuration-time selection of a transmission model variant.

use crate::{
    BernoulliTransmission, MaxInfectivityTransmission, NoTransmission, TransmissionModel,
    TransmissionResult,
};

/// Which [`TransmissionModel`] to run, with its parameters.
///
/// Typically deserialized from the application's config file and turned into
/// a model once, at startup, with [`build`][Self::build].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "model", rename_all = "snake_case"))]
pub enum TransmissionConfig {
    /// [`NoTransmission`].
    None,
    /// [`BernoulliTransmission`].
    Bernoulli { transmissibility: f64 },
    /// [`MaxInfectivityTransmission`].
    MaxInfectivity { transmissibility: f64 },
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        TransmissionConfig::Bernoulli { transmissibility: 0.1 }
    }
}

impl TransmissionConfig {
    /// Validate parameters and instantiate the model.
    pub fn build(&self) -> TransmissionResult<Box<dyn TransmissionModel>> {
        let model: Box<dyn TransmissionModel> = match *self {
            TransmissionConfig::None => Box::new(NoTransmission),
            TransmissionConfig::Bernoulli { transmissibility } => {
                Box::new(BernoulliTransmission::new(transmissibility)?)
            }
            TransmissionConfig::MaxInfectivity { transmissibility } => {
                Box::new(MaxInfectivityTransmission::new(transmissibility)?)
            }
        };
        log::debug!("transmission model: {} ({self:?})", model.name());
        Ok(model)
    }
}
