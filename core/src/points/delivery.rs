use crate::config::ServiceConfig;
use crate::customer::{Channel, Customer};
use crate::error::{ConfigError, SimError};
use crate::events::EventKind;
use crate::points::{ServiceCtx, ServicePoint, Station, StationId};
use crate::sampling::ServiceSampler;
use crate::stats::PointStats;
use rand::distributions::{Bernoulli, Distribution};

/// Last stage for call-in orders. A clean order is delivered; a faulty one
/// is either sent back for a remake or refused outright.
pub struct Delivery {
    pub station: Station,
    remake: Bernoulli,
}

impl Delivery {
    pub fn new(service: ServiceConfig, remake_probability: f64) -> Result<Self, ConfigError> {
        let sampler = ServiceSampler::new(StationId::Delivery, service.mean, service.variance)?;
        let stats = PointStats::new(service.mean, service.variance);
        let remake = Bernoulli::new(remake_probability).map_err(|_| {
            ConfigError::ProbabilityOutOfRange {
                name: "delivery_remake_probability",
                value: remake_probability,
            }
        })?;
        Ok(Self {
            station: Station::new(StationId::Delivery, sampler, stats),
            remake,
        })
    }
}

impl ServicePoint for Delivery {
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
        let kind = if !self.station.queue[0].faulty {
            EventKind::DeliveryCompleted
        } else if self.remake.sample(ctx.rng) {
            EventKind::RemakeOrder
        } else {
            EventKind::DeliveryRefused
        };
        self.station.start_head(kind, ctx)
    }

    fn handle_departure(&mut self, kind: EventKind, ctx: &mut ServiceCtx<'_>) -> Option<Customer> {
        match kind {
            EventKind::DeliveryCompleted => {
                let customer = self.station.complete_exit(ctx)?;
                ctx.sink
                    .on_departure(ctx.now, StationId::Delivery, customer.id, None);
                ctx.sink.on_served(ctx.now, customer.id);
                None
            }
            EventKind::DeliveryRefused => {
                let customer = self.station.complete_exit(ctx)?;
                ctx.stats.record_refusal();
                ctx.sink
                    .on_special_departure(ctx.now, StationId::Delivery, customer.id, kind);
                ctx.sink
                    .on_not_served(ctx.now, customer.id, "Delivery refused");
                None
            }
            // The remade order goes back clean and re-enters the kitchen as
            // a remake, not a walk-in.
            EventKind::RemakeOrder => {
                let mut customer = self.station.pop_departed(ctx.now)?;
                customer.faulty = false;
                customer.channel = Channel::Remake;
                ctx.stats.record_remake();
                ctx.sink
                    .on_special_departure(ctx.now, StationId::Delivery, customer.id, kind);
                Some(customer)
            }
            _ => None,
        }
    }

    fn route_departure(&self, kind: EventKind) -> Option<StationId> {
        match kind {
            EventKind::RemakeOrder => Some(StationId::Kitchen),
            _ => None,
        }
    }
}
