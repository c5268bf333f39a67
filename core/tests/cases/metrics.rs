use rand::rngs::StdRng;
use rand::SeedableRng;
use slice_core::{
    Channel, Customer, EventQueue, NullObserver, PointStats, ServiceCtx, ServiceSampler, Station,
    StationId, SystemStats,
};

#[test]
fn test_derived_metrics_are_zero_before_any_activity() {
    let stats = PointStats::new(5.0, 1.0);
    assert_eq!(stats.utilization(0.0), 0.0);
    assert_eq!(stats.throughput(0.0), 0.0);
    assert_eq!(stats.avg_service_time(), 0.0);
    assert_eq!(stats.avg_queue_length(0.0), 0.0);

    let system = SystemStats::new();
    assert_eq!(system.system_throughput(0.0), 0.0);
    assert_eq!(system.avg_response_time(), 0.0);
}

#[test]
fn test_point_counters_feed_derived_metrics() {
    let mut stats = PointStats::new(5.0, 1.0);
    stats.record_arrival();
    stats.record_arrival();
    stats.record_busy(4.0);
    stats.record_departure(6.0);

    assert_eq!(stats.arrived(), 2);
    assert_eq!(stats.serviced(), 1);
    assert_eq!(stats.utilization(10.0), 0.4);
    assert_eq!(stats.throughput(10.0), 0.1);
    assert_eq!(stats.avg_service_time(), 4.0);
    assert_eq!(stats.avg_queue_length(10.0), 0.6);
}

#[test]
fn test_reset_keeps_distribution_parameters() {
    let mut stats = PointStats::new(7.5, 2.0);
    stats.record_arrival();
    stats.record_busy(3.0);
    stats.record_departure(3.0);
    stats.reset_runtime();

    assert_eq!(stats.arrived(), 0);
    assert_eq!(stats.serviced(), 0);
    assert_eq!(stats.busy_time(), 0.0);
    assert_eq!(stats.waiting_time(), 0.0);
    assert_eq!(stats.mean(), 7.5);
    assert_eq!(stats.variance(), 2.0);
}

#[test]
fn test_response_percentiles_come_from_recorded_completions() {
    let mut system = SystemStats::new();
    for i in 1..=100u64 {
        system.record_completion(i as f64);
    }

    assert_eq!(system.total_serviced(), 100);
    assert_eq!(system.avg_response_time(), 50.5);

    let p50 = system.response_percentile(0.50);
    assert!((45.0..=55.0).contains(&p50), "p50 was {p50}");
    let p99 = system.response_percentile(0.99);
    assert!((95.0..=100.5).contains(&p99), "p99 was {p99}");
}

#[test]
fn test_exit_stamps_removal_time_and_records_response() {
    let sampler = ServiceSampler::new(StationId::Counter, 5.0, 1.0).unwrap();
    let mut station = Station::new(StationId::Counter, sampler, PointStats::new(5.0, 1.0));
    let mut events = EventQueue::new();
    let mut rng = StdRng::seed_from_u64(0);
    let mut stats = SystemStats::new();
    let mut sink = NullObserver;

    // Arrived in the system at t=2, joined this queue at t=4, leaves at t=9.
    station.enqueue(Customer::new(7, Channel::WalkIn, 2.0), 4.0);
    let mut ctx = ServiceCtx {
        now: 9.0,
        events: &mut events,
        rng: &mut rng,
        stats: &mut stats,
        sink: &mut sink,
    };
    let customer = station.complete_exit(&mut ctx).unwrap();

    assert_eq!(customer.removal_time, Some(9.0));
    assert_eq!(customer.response_time(), Some(7.0));
    assert!(!customer.faulty);
    assert_eq!(stats.total_serviced(), 1);
    assert_eq!(stats.avg_response_time(), 7.0);
    assert_eq!(station.stats.serviced(), 1);
    assert_eq!(station.stats.waiting_time(), 5.0);
}

#[test]
fn test_snapshot_of_idle_point_is_all_zeros() {
    let stats = PointStats::new(5.0, 1.0);
    let report = stats.snapshot(StationId::Counter, 0.0);

    assert_eq!(report.point, StationId::Counter);
    assert_eq!(report.arrived, 0);
    assert_eq!(report.serviced, 0);
    assert_eq!(report.utilization, 0.0);
    assert_eq!(report.throughput, 0.0);
    assert_eq!(report.avg_service_time, 0.0);
    assert_eq!(report.avg_queue_length, 0.0);
    assert_eq!(report.mean, 5.0);
    assert_eq!(report.variance, 1.0);
}
