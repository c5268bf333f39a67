use crate::error::ConfigError;
use crate::points::kitchen::{Competency, MAX_COOKS};
use crate::points::StationId;
use serde::{Deserialize, Serialize};

/// Service time distribution of one point, Normal(mean, variance) in
/// simulated time units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub mean: f64,
    pub variance: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            mean: 5.0,
            variance: 1.0,
        }
    }
}

/// Full simulation setup. Built once, validated in [`Simulation::new`] and
/// never mutated during a run.
///
/// [`Simulation::new`]: crate::engine::Simulation::new
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation horizon in simulated time units.
    pub simulation_time: f64,
    /// Best-effort wall-clock pause between engine steps. Observation aid
    /// only; zero disables pacing and never changes outcomes.
    pub speed_delay_ms: u64,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Mean inter-arrival time of walk-in customers.
    pub walk_in_mean: f64,
    /// Mean inter-arrival time of call-in customers.
    pub call_in_mean: f64,
    pub reception: ServiceConfig,
    pub kitchen: ServiceConfig,
    pub counter: ServiceConfig,
    pub delivery: ServiceConfig,
    /// Kitchen roster, one entry per cook.
    pub cooks: Vec<Competency>,
    /// Chance that a clean order fails payment at reception and requeues.
    pub payment_failure_probability: f64,
    /// Chance that an inexperienced cook botches an order.
    pub cook_failure_probability: f64,
    /// Chance that a faulty walk-in order at the counter goes back to the
    /// kitchen rather than to reception for a refund.
    pub counter_remake_probability: f64,
    /// Chance that a refused delivery is remade rather than written off.
    pub delivery_remake_probability: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulation_time: 1000.0,
            speed_delay_ms: 0,
            seed: None,
            walk_in_mean: 15.0,
            call_in_mean: 10.0,
            reception: ServiceConfig::default(),
            kitchen: ServiceConfig::default(),
            counter: ServiceConfig::default(),
            delivery: ServiceConfig::default(),
            cooks: vec![Competency::Expert, Competency::Inexperienced],
            payment_failure_probability: 0.1,
            cook_failure_probability: 0.15,
            counter_remake_probability: 0.5,
            delivery_remake_probability: 0.5,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation_time <= 0.0 {
            return Err(ConfigError::NonPositiveSimulationTime {
                value: self.simulation_time,
            });
        }
        for (point, service) in [
            (StationId::Reception, self.reception),
            (StationId::Kitchen, self.kitchen),
            (StationId::Counter, self.counter),
            (StationId::Delivery, self.delivery),
        ] {
            if service.mean <= 0.0 {
                return Err(ConfigError::NonPositiveMean {
                    point,
                    value: service.mean,
                });
            }
            if service.variance <= 0.0 {
                return Err(ConfigError::NonPositiveVariance {
                    point,
                    value: service.variance,
                });
            }
        }
        if self.walk_in_mean <= 0.0 {
            return Err(ConfigError::NonPositiveArrivalMean {
                channel: "walk-in",
                value: self.walk_in_mean,
            });
        }
        if self.call_in_mean <= 0.0 {
            return Err(ConfigError::NonPositiveArrivalMean {
                channel: "call-in",
                value: self.call_in_mean,
            });
        }
        for (name, value) in [
            (
                "payment_failure_probability",
                self.payment_failure_probability,
            ),
            ("cook_failure_probability", self.cook_failure_probability),
            (
                "counter_remake_probability",
                self.counter_remake_probability,
            ),
            (
                "delivery_remake_probability",
                self.delivery_remake_probability,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        if self.cooks.is_empty() || self.cooks.len() > MAX_COOKS {
            return Err(ConfigError::InvalidCookCount {
                got: self.cooks.len(),
                max: MAX_COOKS,
            });
        }
        Ok(())
    }
}
