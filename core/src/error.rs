use crate::clock::SimTime;
use crate::points::StationId;
use thiserror::Error;

/// Invalid configuration, rejected before the simulation is built. Nothing
/// is clamped or repaired mid-run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{point}: service time mean must be positive, got {value}")]
    NonPositiveMean { point: StationId, value: f64 },

    #[error("{point}: service time variance must be positive, got {value}")]
    NonPositiveVariance { point: StationId, value: f64 },

    #[error("{channel} inter-arrival mean must be positive, got {value}")]
    NonPositiveArrivalMean { channel: &'static str, value: f64 },

    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("kitchen needs 1 to {max} cooks, got {got}")]
    InvalidCookCount { got: usize, max: usize },

    #[error("simulation time must be positive, got {value}")]
    NonPositiveSimulationTime { value: f64 },
}

/// Fatal scheduling fault. A run that hits one of these aborts; there is no
/// retry path.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("event queue empty before the simulation horizon")]
    EmptyEventQueue,

    #[error("clock cannot move backwards: {from} -> {to}")]
    ClockRegression { from: SimTime, to: SimTime },

    #[error("{point} sampled a negative service time: {value}")]
    NegativeServiceTime { point: StationId, value: f64 },
}
