use crate::clock::SimTime;
use serde::{Deserialize, Serialize};

pub type CustomerId = u64;

/// How the order entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    WalkIn,
    CallIn,
    /// A delivery order on its second pass through the kitchen. Behaves like
    /// a call-in from the counter onwards.
    Remake,
}

/// One order moving through the pizzeria. Owned by whichever station queue
/// it currently waits in.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub channel: Channel,
    pub arrival_time: SimTime,
    pub service_start_time: Option<SimTime>,
    pub removal_time: Option<SimTime>,
    /// When the customer joined the queue of the current station.
    pub stage_arrival_time: SimTime,
    pub faulty: bool,
    pub in_preparation: bool,
}

impl Customer {
    pub fn new(id: CustomerId, channel: Channel, now: SimTime) -> Self {
        Self {
            id,
            channel,
            arrival_time: now,
            service_start_time: None,
            removal_time: None,
            stage_arrival_time: now,
            faulty: false,
            in_preparation: false,
        }
    }

    /// Total time in the system, known once the customer has left.
    pub fn response_time(&self) -> Option<SimTime> {
        self.removal_time.map(|removed| removed - self.arrival_time)
    }
}
