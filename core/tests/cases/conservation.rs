use crate::common::TestHarness;
use slice_core::{Simulation, SimulationConfig, StationId};

#[test]
fn test_no_point_serves_more_than_arrived() {
    let mut harness = TestHarness::new_with_seed(50);
    let report = harness.run();

    for point in &report.points {
        assert!(
            point.arrived >= point.serviced,
            "{} served more customers than reached it",
            point.point
        );
    }
}

#[test]
fn test_conservation_holds_after_every_step() {
    let mut sim = Simulation::new(SimulationConfig {
        seed: Some(53),
        simulation_time: 150.0,
        ..SimulationConfig::default()
    })
    .unwrap();

    sim.start();
    for _ in 0..400 {
        sim.step().expect("stepping should not fault");
        // Each arrival channel re-arms itself, so its next event is always
        // pending.
        assert!(sim.pending_events() >= 2);
        for &id in StationId::ALL.iter() {
            let stats = sim.point_stats(id);
            assert!(
                stats.arrived() >= stats.serviced(),
                "{} served more customers than reached it at t={}",
                id,
                sim.now()
            );
        }
        if sim.now() >= 150.0 {
            break;
        }
    }
}

#[test]
fn test_customers_are_neither_created_nor_lost() {
    let mut harness = TestHarness::new_with_seed(51);
    let report = harness.run();

    // Whoever is not in a queue at the horizon has left through an exit.
    let in_system: usize = StationId::ALL
        .iter()
        .map(|&id| harness.sim.queue_len(id))
        .sum();
    assert_eq!(
        report.overview.total_arrived,
        report.overview.total_serviced + in_system as u64
    );
}

#[test]
fn test_terminal_departures_match_observer_counts() {
    let mut harness = TestHarness::new_with_seed(52);
    let report = harness.run();
    let trace = harness.trace();

    assert_eq!(report.overview.total_arrived as usize, trace.arrivals.len());
    assert_eq!(
        report.overview.total_serviced as usize,
        trace.served.len() + trace.not_served.len()
    );
    assert_eq!(
        report.overview.refused_deliveries as usize,
        trace.not_served.len()
    );
}
