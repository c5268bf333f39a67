use crate::config::ServiceConfig;
use crate::customer::{Channel, Customer};
use crate::error::{ConfigError, SimError};
use crate::events::EventKind;
use crate::points::{ServiceCtx, ServicePoint, Station, StationId};
use crate::sampling::ServiceSampler;
use crate::stats::PointStats;
use rand::distributions::{Bernoulli, Distribution};

/// Hand-over desk. Walk-ins collect here; anything else moves on to
/// delivery. A faulty walk-in order either goes back to the kitchen for a
/// remake or to reception for a refund.
pub struct Counter {
    pub station: Station,
    remake: Bernoulli,
}

impl Counter {
    pub fn new(service: ServiceConfig, remake_probability: f64) -> Result<Self, ConfigError> {
        let sampler = ServiceSampler::new(StationId::Counter, service.mean, service.variance)?;
        let stats = PointStats::new(service.mean, service.variance);
        let remake = Bernoulli::new(remake_probability).map_err(|_| {
            ConfigError::ProbabilityOutOfRange {
                name: "counter_remake_probability",
                value: remake_probability,
            }
        })?;
        Ok(Self {
            station: Station::new(StationId::Counter, sampler, stats),
            remake,
        })
    }
}

impl ServicePoint for Counter {
    fn station(&self) -> &Station {
        &self.station
    }

    fn station_mut(&mut self) -> &mut Station {
        &mut self.station
    }

    fn begin_service(&mut self, ctx: &mut ServiceCtx<'_>) -> Result<(), SimError> {
        if self.station.reserved || self.station.queue.is_empty() {
            return Ok(());
        }
        let head = &self.station.queue[0];
        let kind = if head.channel != Channel::WalkIn {
            EventKind::CounterToDelivery
        } else if head.faulty {
            if self.remake.sample(ctx.rng) {
                EventKind::CounterErrorToKitchen
            } else {
                EventKind::CounterErrorToReception
            }
        } else {
            EventKind::CounterCheckout
        };
        self.station.start_head(kind, ctx)
    }

    fn handle_departure(&mut self, kind: EventKind, ctx: &mut ServiceCtx<'_>) -> Option<Customer> {
        match kind {
            EventKind::CounterCheckout => {
                let customer = self.station.complete_exit(ctx)?;
                ctx.sink
                    .on_departure(ctx.now, StationId::Counter, customer.id, None);
                ctx.sink.on_served(ctx.now, customer.id);
                None
            }
            EventKind::CounterToDelivery => {
                let customer = self.station.pop_departed(ctx.now)?;
                ctx.sink.on_departure(
                    ctx.now,
                    StationId::Counter,
                    customer.id,
                    Some(StationId::Delivery),
                );
                Some(customer)
            }
            // The fault flag stays set; the next preparation rewrites it.
            EventKind::CounterErrorToKitchen => {
                let customer = self.station.pop_departed(ctx.now)?;
                ctx.stats.record_remake();
                ctx.sink
                    .on_special_departure(ctx.now, StationId::Counter, customer.id, kind);
                Some(customer)
            }
            EventKind::CounterErrorToReception => {
                let customer = self.station.pop_departed(ctx.now)?;
                ctx.sink
                    .on_special_departure(ctx.now, StationId::Counter, customer.id, kind);
                Some(customer)
            }
            _ => None,
        }
    }

    fn route_departure(&self, kind: EventKind) -> Option<StationId> {
        match kind {
            EventKind::CounterToDelivery => Some(StationId::Delivery),
            EventKind::CounterErrorToKitchen => Some(StationId::Kitchen),
            EventKind::CounterErrorToReception => Some(StationId::Reception),
            _ => None,
        }
    }
}
