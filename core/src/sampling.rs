use crate::error::{ConfigError, SimError};
use crate::points::StationId;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp, Normal};

/// Normal(mean, variance) service duration source for one service point.
#[derive(Debug, Clone)]
pub struct ServiceSampler {
    point: StationId,
    dist: Normal<f64>,
}

impl ServiceSampler {
    pub fn new(point: StationId, mean: f64, variance: f64) -> Result<Self, ConfigError> {
        if mean <= 0.0 {
            return Err(ConfigError::NonPositiveMean { point, value: mean });
        }
        if variance <= 0.0 {
            return Err(ConfigError::NonPositiveVariance {
                point,
                value: variance,
            });
        }
        // Normal takes the standard deviation, the config carries variance.
        let dist = Normal::new(mean, variance.sqrt()).map_err(|_| {
            ConfigError::NonPositiveVariance {
                point,
                value: variance,
            }
        })?;
        Ok(Self { point, dist })
    }

    /// Draw one service duration. A draw from the negative tail of the
    /// distribution aborts the run.
    pub fn sample(&self, rng: &mut StdRng) -> Result<f64, SimError> {
        let value = self.dist.sample(rng);
        if value < 0.0 {
            return Err(SimError::NegativeServiceTime {
                point: self.point,
                value,
            });
        }
        Ok(value)
    }
}

/// NegExp(mean) inter-arrival source.
#[derive(Debug, Clone)]
pub struct ArrivalSampler {
    dist: Exp<f64>,
}

impl ArrivalSampler {
    pub fn new(channel: &'static str, mean: f64) -> Result<Self, ConfigError> {
        if mean <= 0.0 {
            return Err(ConfigError::NonPositiveArrivalMean {
                channel,
                value: mean,
            });
        }
        let dist = Exp::new(1.0 / mean).map_err(|_| ConfigError::NonPositiveArrivalMean {
            channel,
            value: mean,
        })?;
        Ok(Self { dist })
    }

    pub fn sample(&self, rng: &mut StdRng) -> f64 {
        self.dist.sample(rng)
    }
}
