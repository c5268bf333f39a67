use crate::config::ServiceConfig;
use crate::customer::Customer;
use crate::error::{ConfigError, SimError};
use crate::events::{Event, EventKind};
use crate::points::{ServiceCtx, ServicePoint, Station, StationId};
use crate::sampling::ServiceSampler;
use crate::stats::PointStats;
use rand::distributions::{Bernoulli, Distribution};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const MAX_COOKS: usize = 4;

/// Preparation time multiplier for expert cooks.
pub const EXPERT_TIME_FACTOR: f64 = 0.7;
/// Preparation time multiplier for inexperienced cooks.
pub const INEXPERIENCED_TIME_FACTOR: f64 = 1.3;

/// Cook skill level. Experts are faster and never botch an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Competency {
    Expert,
    Inexperienced,
}

impl Competency {
    pub fn time_factor(self) -> f64 {
        match self {
            Competency::Expert => EXPERT_TIME_FACTOR,
            Competency::Inexperienced => INEXPERIENCED_TIME_FACTOR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cook {
    pub competency: Competency,
    pub busy: bool,
    /// Due time of the departure event that frees this cook.
    pub finish_time: f64,
}

impl Cook {
    fn new(competency: Competency) -> Self {
        Self {
            competency,
            busy: false,
            finish_time: 0.0,
        }
    }
}

/// The multi-cook stage. Capacity is the cook pool rather than a single
/// reservation: each engine step assigns at most one free cook to the first
/// queued customer not already in preparation, so preparation order can run
/// ahead of queue order. Departures still pop the head, whichever
/// preparation actually finished.
pub struct Kitchen {
    pub station: Station,
    pub cooks: Vec<Cook>,
    order_failure: Bernoulli,
}

impl Kitchen {
    pub fn new(
        service: ServiceConfig,
        roster: &[Competency],
        cook_failure_probability: f64,
    ) -> Result<Self, ConfigError> {
        if roster.is_empty() || roster.len() > MAX_COOKS {
            return Err(ConfigError::InvalidCookCount {
                got: roster.len(),
                max: MAX_COOKS,
            });
        }
        let sampler = ServiceSampler::new(StationId::Kitchen, service.mean, service.variance)?;
        let stats = PointStats::new(service.mean, service.variance);
        let order_failure = Bernoulli::new(cook_failure_probability).map_err(|_| {
            ConfigError::ProbabilityOutOfRange {
                name: "cook_failure_probability",
                value: cook_failure_probability,
            }
        })?;
        Ok(Self {
            station: Station::new(StationId::Kitchen, sampler, stats),
            cooks: roster.iter().copied().map(Cook::new).collect(),
            order_failure,
        })
    }

    pub fn busy_cooks(&self) -> usize {
        self.cooks.iter().filter(|cook| cook.busy).count()
    }
}

impl ServicePoint for Kitchen {
    fn station(&self) -> &Station {
        &self.station
    }

    fn station_mut(&mut self) -> &mut Station {
        &mut self.station
    }

    fn begin_service(&mut self, ctx: &mut ServiceCtx<'_>) -> Result<(), SimError> {
        if self.station.queue.is_empty() {
            return Ok(());
        }
        // Free cooks are drawn in shuffled order so neither roster slot is
        // systematically favoured.
        let mut order: Vec<usize> = (0..self.cooks.len()).collect();
        order.shuffle(ctx.rng);
        let Some(cook_idx) = order.into_iter().find(|&idx| !self.cooks[idx].busy) else {
            return Ok(());
        };
        let Some(customer_idx) = self
            .station
            .queue
            .iter()
            .position(|customer| !customer.in_preparation)
        else {
            return Ok(());
        };

        let base = self.station.sampler.sample(ctx.rng)?;
        let competency = self.cooks[cook_idx].competency;
        let duration = base * competency.time_factor();
        // Every preparation rewrites the fault flag; experts never fail.
        let failed =
            competency == Competency::Inexperienced && self.order_failure.sample(ctx.rng);

        let customer = &mut self.station.queue[customer_idx];
        customer.in_preparation = true;
        customer.service_start_time = Some(ctx.now);
        customer.faulty = failed;
        let id = customer.id;

        let cook = &mut self.cooks[cook_idx];
        cook.busy = true;
        cook.finish_time = ctx.now + duration;

        self.station.stats.record_busy(duration);
        ctx.events.push(Event {
            kind: EventKind::KitchenDeparture,
            due_time: ctx.now + duration,
            customer: Some(id),
        });
        log::trace!(
            "t={:.3} kitchen cook {:?} starts customer {} for {:.3} (faulty={})",
            ctx.now,
            competency,
            id,
            duration,
            failed
        );
        ctx.sink.on_service_begin(ctx.now, StationId::Kitchen, id);
        Ok(())
    }

    fn handle_departure(&mut self, kind: EventKind, ctx: &mut ServiceCtx<'_>) -> Option<Customer> {
        if kind != EventKind::KitchenDeparture {
            return None;
        }
        // The head leaves even when a later customer's preparation is the
        // one that finished.
        let customer = self.station.pop_departed(ctx.now)?;
        for cook in &mut self.cooks {
            if cook.busy && cook.finish_time == ctx.now {
                cook.busy = false;
            }
        }
        ctx.sink.on_departure(
            ctx.now,
            StationId::Kitchen,
            customer.id,
            Some(StationId::Counter),
        );
        Some(customer)
    }

    fn route_departure(&self, kind: EventKind) -> Option<StationId> {
        match kind {
            EventKind::KitchenDeparture => Some(StationId::Counter),
            _ => None,
        }
    }

    fn reset_runtime(&mut self) {
        self.station.reset_runtime();
        for cook in &mut self.cooks {
            cook.busy = false;
            cook.finish_time = 0.0;
        }
    }
}
