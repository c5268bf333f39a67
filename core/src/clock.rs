use crate::error::SimError;

/// Simulated time, in the same abstract unit the configured means use.
pub type SimTime = f64;

/// The simulation's own clock. Time never flows on its own; the engine moves
/// it to the due time of the next event and nothing else touches it.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    time: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self { time: 0.0 }
    }

    pub fn now(&self) -> SimTime {
        self.time
    }

    /// Jump forward to `time`. Moving backwards is a scheduling fault.
    pub fn advance_to(&mut self, time: SimTime) -> Result<(), SimError> {
        if time < self.time {
            return Err(SimError::ClockRegression {
                from: self.time,
                to: time,
            });
        }
        self.time = time;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}
