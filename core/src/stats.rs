use crate::clock::SimTime;
use crate::points::StationId;
use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Counters for one service point. Derived figures are computed on demand
/// from these and the elapsed simulation time; they are never stored.
#[derive(Debug, Clone)]
pub struct PointStats {
    mean: f64,
    variance: f64,
    arrived: u64,
    serviced: u64,
    busy_time: f64,
    waiting_time: f64,
}

impl PointStats {
    pub fn new(mean: f64, variance: f64) -> Self {
        Self {
            mean,
            variance,
            arrived: 0,
            serviced: 0,
            busy_time: 0.0,
            waiting_time: 0.0,
        }
    }

    pub fn record_arrival(&mut self) {
        self.arrived += 1;
    }

    /// A customer left the point after spending `waited` time units in it.
    pub fn record_departure(&mut self, waited: SimTime) {
        self.serviced += 1;
        self.waiting_time += waited;
    }

    pub fn record_busy(&mut self, duration: SimTime) {
        self.busy_time += duration;
    }

    pub fn arrived(&self) -> u64 {
        self.arrived
    }
    pub fn serviced(&self) -> u64 {
        self.serviced
    }
    pub fn busy_time(&self) -> f64 {
        self.busy_time
    }
    pub fn waiting_time(&self) -> f64 {
        self.waiting_time
    }
    pub fn mean(&self) -> f64 {
        self.mean
    }
    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn utilization(&self, elapsed: SimTime) -> f64 {
        ratio(self.busy_time, elapsed)
    }

    pub fn throughput(&self, elapsed: SimTime) -> f64 {
        ratio(self.serviced as f64, elapsed)
    }

    pub fn avg_service_time(&self) -> f64 {
        ratio(self.busy_time, self.serviced as f64)
    }

    /// Time-averaged number of customers at the point, by Little's law.
    pub fn avg_queue_length(&self, elapsed: SimTime) -> f64 {
        ratio(self.waiting_time, elapsed)
    }

    /// Zero the run counters. The configured distribution parameters stay.
    pub fn reset_runtime(&mut self) {
        self.arrived = 0;
        self.serviced = 0;
        self.busy_time = 0.0;
        self.waiting_time = 0.0;
    }

    pub fn snapshot(&self, point: StationId, elapsed: SimTime) -> PointReport {
        PointReport {
            point,
            mean: self.mean,
            variance: self.variance,
            arrived: self.arrived,
            serviced: self.serviced,
            busy_time: self.busy_time,
            utilization: self.utilization(elapsed),
            throughput: self.throughput(elapsed),
            avg_service_time: self.avg_service_time(),
            avg_queue_length: self.avg_queue_length(elapsed),
        }
    }
}

/// System-wide totals plus a response time histogram for percentiles.
/// The histogram stores response times scaled by 1000 to keep three
/// significant figures in integer buckets.
#[derive(Clone)]
pub struct SystemStats {
    total_arrived: u64,
    total_serviced: u64,
    refused_deliveries: u64,
    refunds: u64,
    remakes: u64,
    total_waiting_time: f64,
    response_times: Histogram<u64>,
}

impl SystemStats {
    pub fn new() -> Self {
        let mut response_times = Histogram::<u64>::new(3).unwrap();
        response_times.auto(true);
        Self {
            total_arrived: 0,
            total_serviced: 0,
            refused_deliveries: 0,
            refunds: 0,
            remakes: 0,
            total_waiting_time: 0.0,
            response_times,
        }
    }

    pub fn record_arrival(&mut self) {
        self.total_arrived += 1;
    }

    /// A customer reached a terminal departure after `response_time` units
    /// in the system.
    pub fn record_completion(&mut self, response_time: SimTime) {
        self.total_serviced += 1;
        self.total_waiting_time += response_time;
        let _ = self.response_times.record((response_time * 1000.0) as u64);
    }

    pub fn record_refusal(&mut self) {
        self.refused_deliveries += 1;
    }

    pub fn record_refund(&mut self) {
        self.refunds += 1;
    }

    pub fn record_remake(&mut self) {
        self.remakes += 1;
    }

    pub fn total_arrived(&self) -> u64 {
        self.total_arrived
    }
    pub fn total_serviced(&self) -> u64 {
        self.total_serviced
    }
    pub fn refused_deliveries(&self) -> u64 {
        self.refused_deliveries
    }
    pub fn refunds(&self) -> u64 {
        self.refunds
    }
    pub fn remakes(&self) -> u64 {
        self.remakes
    }

    pub fn system_throughput(&self, elapsed: SimTime) -> f64 {
        ratio(self.total_serviced as f64, elapsed)
    }

    pub fn avg_response_time(&self) -> f64 {
        ratio(self.total_waiting_time, self.total_serviced as f64)
    }

    /// Response time at quantile `q` in [0, 1], in seconds.
    pub fn response_percentile(&self, q: f64) -> f64 {
        self.response_times.value_at_quantile(q) as f64 / 1000.0
    }

    pub fn reset_runtime(&mut self) {
        self.total_arrived = 0;
        self.total_serviced = 0;
        self.refused_deliveries = 0;
        self.refunds = 0;
        self.remakes = 0;
        self.total_waiting_time = 0.0;
        self.response_times.reset();
    }

    pub fn snapshot(&self, elapsed: SimTime) -> SystemTotals {
        SystemTotals {
            elapsed,
            total_arrived: self.total_arrived,
            total_serviced: self.total_serviced,
            refused_deliveries: self.refused_deliveries,
            refunds: self.refunds,
            remakes: self.remakes,
            system_throughput: self.system_throughput(elapsed),
            avg_response_time: self.avg_response_time(),
            response_p50: self.response_percentile(0.50),
            response_p95: self.response_percentile(0.95),
            response_p99: self.response_percentile(0.99),
        }
    }
}

impl Default for SystemStats {
    fn default() -> Self {
        Self::new()
    }
}

/// System overview in the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemTotals {
    pub elapsed: f64,
    pub total_arrived: u64,
    pub total_serviced: u64,
    pub refused_deliveries: u64,
    pub refunds: u64,
    pub remakes: u64,
    pub system_throughput: f64,
    pub avg_response_time: f64,
    pub response_p50: f64,
    pub response_p95: f64,
    pub response_p99: f64,
}

/// Per-point figures in the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointReport {
    pub point: StationId,
    pub mean: f64,
    pub variance: f64,
    pub arrived: u64,
    pub serviced: u64,
    pub busy_time: f64,
    pub utilization: f64,
    pub throughput: f64,
    pub avg_service_time: f64,
    pub avg_queue_length: f64,
}

/// End-of-run snapshot handed to whoever stores or displays results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub overview: SystemTotals,
    pub points: Vec<PointReport>,
}
