use crate::config::ServiceConfig;
use crate::customer::Customer;
use crate::error::{ConfigError, SimError};
use crate::events::EventKind;
use crate::points::{ServiceCtx, ServicePoint, Station, StationId};
use crate::sampling::ServiceSampler;
use crate::stats::PointStats;
use rand::distributions::{Bernoulli, Distribution};

/// First stop for every order. Faulty orders brought back here get a refund;
/// clean orders either pass to the kitchen or bounce on a failed payment and
/// rejoin the queue.
pub struct Reception {
    pub station: Station,
    payment_failure: Bernoulli,
}

impl Reception {
    pub fn new(service: ServiceConfig, payment_failure_probability: f64) -> Result<Self, ConfigError> {
        let sampler = ServiceSampler::new(StationId::Reception, service.mean, service.variance)?;
        let stats = PointStats::new(service.mean, service.variance);
        let payment_failure = Bernoulli::new(payment_failure_probability).map_err(|_| {
            ConfigError::ProbabilityOutOfRange {
                name: "payment_failure_probability",
                value: payment_failure_probability,
            }
        })?;
        Ok(Self {
            station: Station::new(StationId::Reception, sampler, stats),
            payment_failure,
        })
    }
}

impl ServicePoint for Reception {
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
        let kind = if self.station.queue[0].faulty {
            EventKind::MoneyReturned
        } else if self.payment_failure.sample(ctx.rng) {
            EventKind::PaymentFailed
        } else {
            EventKind::ReceptionDeparture
        };
        self.station.start_head(kind, ctx)
    }

    fn handle_departure(&mut self, kind: EventKind, ctx: &mut ServiceCtx<'_>) -> Option<Customer> {
        match kind {
            EventKind::ReceptionDeparture => {
                let customer = self.station.pop_departed(ctx.now)?;
                ctx.sink.on_departure(
                    ctx.now,
                    StationId::Reception,
                    customer.id,
                    Some(StationId::Kitchen),
                );
                Some(customer)
            }
            // The customer rejoins this queue; re-entry counts as a fresh
            // arrival at reception but not a new system arrival.
            EventKind::PaymentFailed => {
                let customer = self.station.pop_departed(ctx.now)?;
                ctx.sink
                    .on_special_departure(ctx.now, StationId::Reception, customer.id, kind);
                Some(customer)
            }
            EventKind::MoneyReturned => {
                let customer = self.station.complete_exit(ctx)?;
                ctx.stats.record_refund();
                ctx.sink
                    .on_special_departure(ctx.now, StationId::Reception, customer.id, kind);
                ctx.sink.on_served(ctx.now, customer.id);
                None
            }
            _ => None,
        }
    }

    fn route_departure(&self, kind: EventKind) -> Option<StationId> {
        match kind {
            EventKind::ReceptionDeparture => Some(StationId::Kitchen),
            EventKind::PaymentFailed => Some(StationId::Reception),
            _ => None,
        }
    }
}
