use crate::common::{self, TestHarness};
use slice_core::{Competency, EventKind, StationId};

#[test]
fn test_walk_in_clean_path_checks_out_at_counter() {
    let mut config = common::walk_in_only(11);
    config.payment_failure_probability = 0.0;
    config.cooks = vec![Competency::Expert];
    let mut harness = TestHarness::new(config);

    harness.run();
    let trace = harness.trace();

    // The first customer rides reception -> kitchen -> counter and leaves served.
    let path: Vec<(StationId, Option<StationId>)> = trace
        .departures
        .iter()
        .filter(|(_, _, id, _)| *id == 1)
        .map(|(_, point, _, next)| (*point, *next))
        .collect();
    assert_eq!(
        path,
        vec![
            (StationId::Reception, Some(StationId::Kitchen)),
            (StationId::Kitchen, Some(StationId::Counter)),
            (StationId::Counter, None),
        ]
    );
    assert!(trace.served.contains(&1));
    assert!(trace.not_served.is_empty());
    assert!(trace.specials.is_empty(), "no failure path was configured");
}

#[test]
fn test_faulty_call_in_is_refused_when_remake_is_off() {
    let mut config = common::call_in_only(13);
    config.payment_failure_probability = 0.0;
    config.cooks = vec![Competency::Inexperienced];
    config.cook_failure_probability = 1.0;
    config.delivery_remake_probability = 0.0;
    let mut harness = TestHarness::new(config);

    let report = harness.run();
    let trace = harness.trace();

    assert!(report.overview.refused_deliveries > 0);
    assert!(trace
        .not_served
        .iter()
        .any(|(id, reason)| *id == 1 && reason == "Delivery refused"));
    // The first customer is refused exactly once.
    let refusals = trace
        .specials
        .iter()
        .filter(|(_, point, id, kind)| {
            *point == StationId::Delivery && *id == 1 && *kind == EventKind::DeliveryRefused
        })
        .count();
    assert_eq!(refusals, 1);
    // A refusal is still a terminal departure.
    assert_eq!(
        report.overview.total_serviced as usize,
        trace.served.len() + trace.not_served.len()
    );
}

#[test]
fn test_failed_payment_requeues_the_same_customer() {
    let mut config = common::walk_in_only(17);
    config.payment_failure_probability = 1.0;
    config.simulation_time = 100.0;
    let mut harness = TestHarness::new(config);

    let report = harness.run();
    let trace = harness.trace();

    let requeues = trace
        .specials
        .iter()
        .filter(|(_, point, id, kind)| {
            *point == StationId::Reception && *id == 1 && *kind == EventKind::PaymentFailed
        })
        .count();
    assert!(requeues > 1, "customer 1 should bounce repeatedly");

    // A requeue counts as a reception arrival but not as a system arrival.
    let reception = report
        .points
        .iter()
        .find(|p| p.point == StationId::Reception)
        .unwrap();
    assert!(reception.arrived > report.overview.total_arrived);
    assert_eq!(report.overview.total_arrived as usize, trace.arrivals.len());

    // Nobody ever gets past reception.
    assert_eq!(report.overview.total_serviced, 0);
    assert!(trace.served.is_empty());
}

#[test]
fn test_faulty_walk_in_goes_back_to_kitchen_when_remake_wins() {
    let mut config = common::walk_in_only(19);
    config.payment_failure_probability = 0.0;
    config.cooks = vec![Competency::Inexperienced];
    config.cook_failure_probability = 1.0;
    config.counter_remake_probability = 1.0;
    config.simulation_time = 120.0;
    let mut harness = TestHarness::new(config);

    let report = harness.run();
    let trace = harness.trace();

    assert!(trace.specials.iter().any(|(_, point, id, kind)| {
        *point == StationId::Counter && *id == 1 && *kind == EventKind::CounterErrorToKitchen
    }));
    assert!(report.overview.remakes > 0);
    // Every preparation fails, so the remake loop never lets anyone check out.
    assert!(trace.served.is_empty());
}

#[test]
fn test_faulty_walk_in_gets_refund_when_remake_loses() {
    let mut config = common::walk_in_only(23);
    config.payment_failure_probability = 0.0;
    config.cooks = vec![Competency::Inexperienced];
    config.cook_failure_probability = 1.0;
    config.counter_remake_probability = 0.0;
    let mut harness = TestHarness::new(config);

    let report = harness.run();
    let trace = harness.trace();

    assert!(trace.specials.iter().any(|(_, point, id, kind)| {
        *point == StationId::Counter && *id == 1 && *kind == EventKind::CounterErrorToReception
    }));
    assert!(trace.specials.iter().any(|(_, point, id, kind)| {
        *point == StationId::Reception && *id == 1 && *kind == EventKind::MoneyReturned
    }));
    assert!(report.overview.refunds > 0);
    // A refund is a terminal departure and reports as served.
    assert!(trace.served.contains(&1));
}

#[test]
fn test_faulty_delivery_is_remade_clean_and_retried() {
    let mut config = common::call_in_only(29);
    config.payment_failure_probability = 0.0;
    config.cooks = vec![Competency::Inexperienced];
    config.cook_failure_probability = 1.0;
    config.delivery_remake_probability = 1.0;
    config.simulation_time = 150.0;
    let mut harness = TestHarness::new(config);

    let report = harness.run();
    let trace = harness.trace();

    assert!(trace.specials.iter().any(|(_, point, id, kind)| {
        *point == StationId::Delivery && *id == 1 && *kind == EventKind::RemakeOrder
    }));
    assert!(report.overview.remakes > 0);
    assert_eq!(report.overview.refused_deliveries, 0);
}

#[test]
fn test_experts_never_botch_orders() {
    let mut config = common::walk_in_only(31);
    config.payment_failure_probability = 0.0;
    config.cooks = vec![Competency::Expert, Competency::Expert];
    config.cook_failure_probability = 1.0;
    let mut harness = TestHarness::new(config);

    let report = harness.run();
    let trace = harness.trace();

    assert!(report.overview.total_serviced > 0);
    assert_eq!(report.overview.refunds, 0);
    assert!(trace.specials.is_empty(), "experts never produce faulty orders");
}
