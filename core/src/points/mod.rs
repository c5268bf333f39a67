use crate::clock::SimTime;
use crate::customer::Customer;
use crate::error::SimError;
use crate::events::{Event, EventKind, EventQueue};
use crate::observer::SimulationObserver;
use crate::sampling::ServiceSampler;
use crate::stats::{PointStats, SystemStats};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

pub mod counter;
pub mod delivery;
pub mod kitchen;
pub mod reception;

/// The four stages of the service network. Declaration order is the order
/// the engine offers idle capacity each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationId {
    Reception,
    Kitchen,
    Counter,
    Delivery,
}

impl StationId {
    pub const ALL: [StationId; 4] = [
        StationId::Reception,
        StationId::Kitchen,
        StationId::Counter,
        StationId::Delivery,
    ];
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StationId::Reception => "reception",
            StationId::Kitchen => "kitchen",
            StationId::Counter => "counter",
            StationId::Delivery => "delivery",
        };
        f.write_str(name)
    }
}

/// Engine-owned state a point borrows while handling one event. Points hold
/// no references of their own to the clock, queue, RNG or sinks.
pub struct ServiceCtx<'a> {
    pub now: SimTime,
    pub events: &'a mut EventQueue,
    pub rng: &'a mut StdRng,
    pub stats: &'a mut SystemStats,
    pub sink: &'a mut dyn SimulationObserver,
}

/// Queue, reservation flag, duration sampler and counters shared by every
/// concrete point.
pub struct Station {
    pub id: StationId,
    pub queue: VecDeque<Customer>,
    /// True while exactly one customer is in active service. The kitchen
    /// never sets it; its capacity is the cook pool.
    pub reserved: bool,
    pub sampler: ServiceSampler,
    pub stats: PointStats,
}

impl Station {
    pub fn new(id: StationId, sampler: ServiceSampler, stats: PointStats) -> Self {
        Self {
            id,
            queue: VecDeque::new(),
            reserved: false,
            sampler,
            stats,
        }
    }

    /// Append a customer and count the arrival at this point.
    pub fn enqueue(&mut self, mut customer: Customer, now: SimTime) {
        customer.stage_arrival_time = now;
        self.stats.record_arrival();
        self.queue.push_back(customer);
    }

    /// The head customer leaves: clears the reservation and accumulates the
    /// customer's time at this point.
    pub fn pop_departed(&mut self, now: SimTime) -> Option<Customer> {
        let mut customer = self.queue.pop_front()?;
        self.reserved = false;
        self.stats.record_departure(now - customer.stage_arrival_time);
        customer.in_preparation = false;
        Some(customer)
    }

    /// Terminal variant of [`pop_departed`]: the customer leaves the whole
    /// system and the response time is recorded.
    ///
    /// [`pop_departed`]: Station::pop_departed
    pub fn complete_exit(&mut self, ctx: &mut ServiceCtx<'_>) -> Option<Customer> {
        let mut customer = self.pop_departed(ctx.now)?;
        customer.removal_time = Some(ctx.now);
        ctx.stats.record_completion(ctx.now - customer.arrival_time);
        Some(customer)
    }

    /// Single-server begin: reserve the head customer, sample a duration and
    /// schedule `kind` at its end. Sampling happens first so a failed draw
    /// leaves the station untouched.
    pub fn start_head(&mut self, kind: EventKind, ctx: &mut ServiceCtx<'_>) -> Result<(), SimError> {
        let duration = self.sampler.sample(ctx.rng)?;
        let Some(head) = self.queue.front_mut() else {
            return Ok(());
        };
        head.service_start_time = Some(ctx.now);
        let id = head.id;
        self.reserved = true;
        self.stats.record_busy(duration);
        ctx.events.push(Event {
            kind,
            due_time: ctx.now + duration,
            customer: Some(id),
        });
        log::trace!(
            "t={:.3} {} starts customer {} for {:.3} -> {:?}",
            ctx.now,
            self.id,
            id,
            duration,
            kind
        );
        ctx.sink.on_service_begin(ctx.now, self.id, id);
        Ok(())
    }

    pub fn reset_runtime(&mut self) {
        self.queue.clear();
        self.reserved = false;
        self.stats.reset_runtime();
    }
}

/// One stage of the service network. Concrete points share their queueing
/// state through [`Station`] and differ in capacity rules and in the
/// departure kinds they emit.
pub trait ServicePoint: Send {
    fn station(&self) -> &Station;
    fn station_mut(&mut self) -> &mut Station;

    /// Take the next customer into service if the point has capacity,
    /// scheduling whichever departure event this point decides on. A no-op
    /// when there is nothing to do.
    fn begin_service(&mut self, ctx: &mut ServiceCtx<'_>) -> Result<(), SimError>;

    /// React to one of this point's departure events. Returns the customer
    /// when they move on inside the system, `None` when they leave it.
    fn handle_departure(&mut self, kind: EventKind, ctx: &mut ServiceCtx<'_>) -> Option<Customer>;

    /// Where `kind` hands the customer next. `None` means the customer
    /// exits the system.
    fn route_departure(&self, kind: EventKind) -> Option<StationId>;

    fn id(&self) -> StationId {
        self.station().id
    }

    fn is_reserved(&self) -> bool {
        self.station().reserved
    }

    fn has_queue(&self) -> bool {
        !self.station().queue.is_empty()
    }

    fn queue_len(&self) -> usize {
        self.station().queue.len()
    }

    fn enqueue(&mut self, customer: Customer, now: SimTime) {
        self.station_mut().enqueue(customer, now);
    }

    /// Clear queue, reservation and runtime counters between runs.
    fn reset_runtime(&mut self) {
        self.station_mut().reset_runtime();
    }
}
