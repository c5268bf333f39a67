use crate::clock::SimTime;
use crate::customer::CustomerId;
use crate::points::StationId;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Everything that can happen in the pizzeria. Arrivals come from the two
/// customer channels; every other kind is a departure owned by one service
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    WalkInArrival,
    CallInArrival,
    ReceptionDeparture,
    PaymentFailed,
    MoneyReturned,
    KitchenDeparture,
    CounterCheckout,
    CounterToDelivery,
    CounterErrorToKitchen,
    CounterErrorToReception,
    DeliveryCompleted,
    DeliveryRefused,
    RemakeOrder,
}

impl EventKind {
    /// The point this departure belongs to. Arrival kinds have none.
    pub fn station(self) -> Option<StationId> {
        match self {
            EventKind::WalkInArrival | EventKind::CallInArrival => None,
            EventKind::ReceptionDeparture
            | EventKind::PaymentFailed
            | EventKind::MoneyReturned => Some(StationId::Reception),
            EventKind::KitchenDeparture => Some(StationId::Kitchen),
            EventKind::CounterCheckout
            | EventKind::CounterToDelivery
            | EventKind::CounterErrorToKitchen
            | EventKind::CounterErrorToReception => Some(StationId::Counter),
            EventKind::DeliveryCompleted
            | EventKind::DeliveryRefused
            | EventKind::RemakeOrder => Some(StationId::Delivery),
        }
    }
}

/// One scheduled occurrence. Events reference customers by id; the station
/// queues own the customers themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub due_time: SimTime,
    pub customer: Option<CustomerId>,
}

#[derive(Debug, Clone)]
struct ScheduledEvent {
    event: Event,
    seq: u64,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.event.due_time == other.event.due_time && self.seq == other.seq
    }
}
impl Eq for ScheduledEvent {}
impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.event
            .due_time
            .total_cmp(&other.event.due_time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Pending events ordered by due time. Events due at the same instant pop in
/// the order they were pushed.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<ScheduledEvent>>,
    seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn push(&mut self, event: Event) {
        self.heap.push(Reverse(ScheduledEvent {
            event,
            seq: self.seq,
        }));
        self.seq += 1;
    }

    pub fn pop_min(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(scheduled)| scheduled.event)
    }

    pub fn peek_min_time(&self) -> Option<SimTime> {
        self.heap
            .peek()
            .map(|Reverse(scheduled)| scheduled.event.due_time)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}
