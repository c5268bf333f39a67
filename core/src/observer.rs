use crate::clock::SimTime;
use crate::customer::{Channel, CustomerId};
use crate::events::EventKind;
use crate::points::StationId;

/// Notification sink for simulation transitions. Every method defaults to a
/// no-op, so implementors subscribe only to what they need. The engine never
/// depends on a sink succeeding; implementations own their error handling.
pub trait SimulationObserver: Send {
    /// A new customer entered the system.
    fn on_arrival(&mut self, _now: SimTime, _channel: Channel, _customer: CustomerId) {}

    /// A point took a customer into service.
    fn on_service_begin(&mut self, _now: SimTime, _point: StationId, _customer: CustomerId) {}

    /// A customer left a point on the regular path. `next` is `None` when
    /// the customer left the system.
    fn on_departure(
        &mut self,
        _now: SimTime,
        _point: StationId,
        _customer: CustomerId,
        _next: Option<StationId>,
    ) {
    }

    /// A customer left a point on a failure or rework path.
    fn on_special_departure(
        &mut self,
        _now: SimTime,
        _point: StationId,
        _customer: CustomerId,
        _kind: EventKind,
    ) {
    }

    /// A customer's order was fulfilled (including refunds being paid out).
    fn on_served(&mut self, _now: SimTime, _customer: CustomerId) {}

    /// A customer left without being served.
    fn on_not_served(&mut self, _now: SimTime, _customer: CustomerId, _reason: &str) {}
}

/// Discards every notification. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SimulationObserver for NullObserver {}
