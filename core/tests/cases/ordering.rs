use slice_core::{Event, EventKind, EventQueue, SimClock, SimError, Simulation, SimulationConfig};

#[test]
fn test_events_pop_in_due_time_order() {
    let mut queue = EventQueue::new();
    queue.push(Event {
        kind: EventKind::WalkInArrival,
        due_time: 5.0,
        customer: None,
    });
    queue.push(Event {
        kind: EventKind::CallInArrival,
        due_time: 1.0,
        customer: None,
    });
    queue.push(Event {
        kind: EventKind::KitchenDeparture,
        due_time: 3.0,
        customer: Some(1),
    });

    assert_eq!(queue.peek_min_time(), Some(1.0));
    assert_eq!(queue.pop_min().unwrap().due_time, 1.0);
    assert_eq!(queue.pop_min().unwrap().due_time, 3.0);
    assert_eq!(queue.pop_min().unwrap().due_time, 5.0);
    assert!(queue.pop_min().is_none());
}

#[test]
fn test_simultaneous_events_pop_in_insertion_order() {
    let mut queue = EventQueue::new();
    for id in 0..10u64 {
        queue.push(Event {
            kind: EventKind::KitchenDeparture,
            due_time: 2.5,
            customer: Some(id),
        });
    }
    for id in 0..10u64 {
        assert_eq!(
            queue.pop_min().unwrap().customer,
            Some(id),
            "tie broken out of insertion order"
        );
    }
}

#[test]
fn test_clock_rejects_regression() {
    let mut clock = SimClock::new();
    clock.advance_to(10.0).unwrap();
    assert_eq!(clock.now(), 10.0);
    // Advancing to the current instant is allowed.
    clock.advance_to(10.0).unwrap();

    let err = clock.advance_to(9.0).unwrap_err();
    assert!(matches!(err, SimError::ClockRegression { .. }));
    assert_eq!(clock.now(), 10.0, "a rejected advance must not move time");
}

#[test]
fn test_clock_is_monotonic_across_steps() {
    let mut sim = Simulation::new(SimulationConfig {
        seed: Some(3),
        simulation_time: 100.0,
        ..SimulationConfig::default()
    })
    .unwrap();

    sim.start();
    let mut last = sim.now();
    for _ in 0..200 {
        sim.step().expect("stepping should not fault");
        assert!(sim.now() >= last, "clock moved backwards");
        last = sim.now();
        if sim.now() >= 100.0 {
            break;
        }
    }
    assert!(last > 0.0, "no events were processed");
}

#[test]
fn test_stepping_an_unprimed_engine_is_a_fault() {
    let mut sim = Simulation::new(SimulationConfig {
        seed: Some(1),
        ..SimulationConfig::default()
    })
    .unwrap();

    let err = sim.step().unwrap_err();
    assert!(matches!(err, SimError::EmptyEventQueue));
}
