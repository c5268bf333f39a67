use crate::clock::SimTime;
use crate::customer::Channel;
use crate::error::ConfigError;
use crate::events::{Event, EventKind, EventQueue};
use crate::sampling::ArrivalSampler;
use rand::rngs::StdRng;

/// Self-renewing arrival source for one customer channel. Processing an
/// arrival event schedules that channel's next one, so each process keeps
/// exactly one pending arrival in the queue.
pub struct ArrivalProcess {
    kind: EventKind,
    channel: Channel,
    sampler: ArrivalSampler,
}

impl ArrivalProcess {
    pub fn walk_in(mean: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            kind: EventKind::WalkInArrival,
            channel: Channel::WalkIn,
            sampler: ArrivalSampler::new("walk-in", mean)?,
        })
    }

    pub fn call_in(mean: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            kind: EventKind::CallInArrival,
            channel: Channel::CallIn,
            sampler: ArrivalSampler::new("call-in", mean)?,
        })
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Schedule this channel's next arrival.
    pub fn generate_next(&self, now: SimTime, events: &mut EventQueue, rng: &mut StdRng) {
        let delay = self.sampler.sample(rng);
        events.push(Event {
            kind: self.kind,
            due_time: now + delay,
            customer: None,
        });
    }
}
