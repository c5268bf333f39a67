use crate::arrivals::ArrivalProcess;
use crate::clock::{SimClock, SimTime};
use crate::config::SimulationConfig;
use crate::customer::{Customer, CustomerId};
use crate::error::{ConfigError, SimError};
use crate::events::{Event, EventKind, EventQueue};
use crate::observer::{NullObserver, SimulationObserver};
use crate::points::counter::Counter;
use crate::points::delivery::Delivery;
use crate::points::kitchen::Kitchen;
use crate::points::reception::Reception;
use crate::points::{ServiceCtx, ServicePoint, StationId};
use crate::stats::{PointStats, SimulationReport, SystemStats};
use rand::prelude::*;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct ControlState {
    paused: bool,
    stopped: bool,
    speed_delay_ms: u64,
}

/// Cloneable remote control for a simulation worker. Pause parks the worker
/// at the top of its loop; stop aborts the run outright.
#[derive(Clone)]
pub struct ControlHandle {
    inner: Arc<(Mutex<ControlState>, Condvar)>,
}

impl ControlHandle {
    fn new(speed_delay_ms: u64) -> Self {
        Self {
            inner: Arc::new((
                Mutex::new(ControlState {
                    paused: false,
                    stopped: false,
                    speed_delay_ms,
                }),
                Condvar::new(),
            )),
        }
    }

    pub fn pause(&self) {
        let (lock, _) = &*self.inner;
        lock.lock().unwrap().paused = true;
    }

    pub fn resume(&self) {
        let (lock, cvar) = &*self.inner;
        lock.lock().unwrap().paused = false;
        cvar.notify_all();
    }

    pub fn is_paused(&self) -> bool {
        let (lock, _) = &*self.inner;
        lock.lock().unwrap().paused
    }

    /// Abort the run. The worker exits without producing a report.
    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        lock.lock().unwrap().stopped = true;
        cvar.notify_all();
    }

    /// Adjust the per-step pacing delay of a running worker.
    pub fn set_speed_delay(&self, ms: u64) {
        let (lock, _) = &*self.inner;
        lock.lock().unwrap().speed_delay_ms = ms;
    }

    fn clear(&self) {
        let (lock, _) = &*self.inner;
        let mut state = lock.lock().unwrap();
        state.paused = false;
        state.stopped = false;
    }

    /// Worker side: block while paused. Returns false once stopped.
    fn wait_if_paused(&self) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut state = lock.lock().unwrap();
        while state.paused && !state.stopped {
            state = cvar.wait(state).unwrap();
        }
        !state.stopped
    }

    /// Worker side: best-effort pacing sleep, cut short by stop. Returns
    /// false once stopped.
    fn pace(&self) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut state = lock.lock().unwrap();
        if state.speed_delay_ms == 0 {
            return !state.stopped;
        }
        let deadline = Instant::now() + Duration::from_millis(state.speed_delay_ms);
        while !state.stopped {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let (next, wait) = cvar.wait_timeout(state, deadline - now).unwrap();
            state = next;
            if wait.timed_out() {
                break;
            }
        }
        !state.stopped
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The horizon was reached; final report attached.
    Completed(SimulationReport),
    /// Stopped from the control handle. No report is produced.
    Interrupted,
}

/// The discrete-event engine. Owns the clock, the event queue, the four
/// service points, both arrival processes, the RNG and the statistics, and
/// is the only thing that mutates any of them.
pub struct Simulation {
    config: SimulationConfig,
    clock: SimClock,
    events: EventQueue,
    points: Vec<Box<dyn ServicePoint>>,
    arrivals: Vec<ArrivalProcess>,
    rng: StdRng,
    stats: SystemStats,
    observer: Box<dyn SimulationObserver>,
    control: ControlHandle,
    next_customer_id: CustomerId,
    started: bool,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::with_observer(config, Box::new(NullObserver))
    }

    pub fn with_observer(
        config: SimulationConfig,
        observer: Box<dyn SimulationObserver>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        // Construction order matches StationId, which indexes this vec.
        let points: Vec<Box<dyn ServicePoint>> = vec![
            Box::new(Reception::new(
                config.reception,
                config.payment_failure_probability,
            )?),
            Box::new(Kitchen::new(
                config.kitchen,
                &config.cooks,
                config.cook_failure_probability,
            )?),
            Box::new(Counter::new(
                config.counter,
                config.counter_remake_probability,
            )?),
            Box::new(Delivery::new(
                config.delivery,
                config.delivery_remake_probability,
            )?),
        ];
        let arrivals = vec![
            ArrivalProcess::walk_in(config.walk_in_mean)?,
            ArrivalProcess::call_in(config.call_in_mean)?,
        ];
        let rng = Self::seeded_rng(config.seed);
        let control = ControlHandle::new(config.speed_delay_ms);
        Ok(Self {
            clock: SimClock::new(),
            events: EventQueue::new(),
            points,
            arrivals,
            rng,
            stats: SystemStats::new(),
            observer,
            control,
            next_customer_id: 1,
            started: false,
            config,
        })
    }

    fn seeded_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// A handle for pausing, resuming and stopping this engine, usable from
    /// any thread.
    pub fn control(&self) -> ControlHandle {
        self.control.clone()
    }

    pub fn stats(&self) -> &SystemStats {
        &self.stats
    }

    pub fn point_stats(&self, id: StationId) -> &PointStats {
        &self.points[id as usize].station().stats
    }

    pub fn queue_len(&self, id: StationId) -> usize {
        self.points[id as usize].queue_len()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Schedule the first arrival of each channel. Called by [`run`], or
    /// directly when stepping the engine by hand.
    ///
    /// [`run`]: Simulation::run
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let Simulation {
            arrivals,
            clock,
            events,
            rng,
            ..
        } = self;
        let now = clock.now();
        for process in arrivals.iter() {
            process.generate_next(now, events, rng);
        }
    }

    /// Advance to the next event time and process everything due there,
    /// then offer service to every idle point with waiting customers.
    pub fn step(&mut self) -> Result<(), SimError> {
        let next_time = self
            .events
            .peek_min_time()
            .ok_or(SimError::EmptyEventQueue)?;
        self.clock.advance_to(next_time)?;
        self.run_due_events();
        self.offer_service()
    }

    /// Drive the loop to the horizon on the calling thread.
    pub fn run(&mut self) -> Result<RunOutcome, SimError> {
        self.start();
        log::info!(
            "running simulation for {:.1} time units",
            self.config.simulation_time
        );
        while self.clock.now() < self.config.simulation_time {
            if !self.control.wait_if_paused() || !self.control.pace() {
                log::info!("simulation stopped at t={:.3}", self.clock.now());
                return Ok(RunOutcome::Interrupted);
            }
            self.step()?;
        }
        let report = self.report();
        log::info!(
            "simulation finished at t={:.3}: {} arrived, {} served, {} refused",
            self.clock.now(),
            report.overview.total_arrived,
            report.overview.total_serviced,
            report.overview.refused_deliveries
        );
        Ok(RunOutcome::Completed(report))
    }

    /// Move the engine onto a worker thread. The returned handle controls
    /// the run; join the worker for the outcome.
    pub fn spawn(mut self) -> (ControlHandle, JoinHandle<Result<RunOutcome, SimError>>) {
        let control = self.control.clone();
        let worker = thread::spawn(move || self.run());
        (control, worker)
    }

    /// Rewind to the pre-run state: clock, queues, runtime statistics and
    /// the customer id counter start over and the RNG is re-seeded from the
    /// configured seed. The configuration itself is untouched.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.events.clear();
        for point in &mut self.points {
            point.reset_runtime();
        }
        self.stats.reset_runtime();
        self.rng = Self::seeded_rng(self.config.seed);
        self.next_customer_id = 1;
        self.started = false;
        self.control.clear();
    }

    /// Snapshot the current statistics with derived metrics computed from
    /// elapsed simulation time.
    pub fn report(&self) -> SimulationReport {
        let elapsed = self.clock.now();
        SimulationReport {
            overview: self.stats.snapshot(elapsed),
            points: self
                .points
                .iter()
                .map(|point| point.station().stats.snapshot(point.id(), elapsed))
                .collect(),
        }
    }

    fn run_due_events(&mut self) {
        while let Some(next) = self.events.peek_min_time() {
            if next > self.clock.now() {
                break;
            }
            let Some(event) = self.events.pop_min() else {
                break;
            };
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: Event) {
        log::debug!(
            "t={:.3} event {:?} customer={:?}",
            self.clock.now(),
            event.kind,
            event.customer
        );
        match event.kind {
            EventKind::WalkInArrival | EventKind::CallInArrival => {
                self.process_arrival(event.kind)
            }
            _ => self.process_departure(event),
        }
    }

    /// A new customer enters at reception and the channel re-arms itself.
    fn process_arrival(&mut self, kind: EventKind) {
        let Simulation {
            arrivals,
            clock,
            events,
            rng,
            points,
            stats,
            observer,
            next_customer_id,
            ..
        } = self;
        let Some(process) = arrivals.iter().find(|p| p.kind() == kind) else {
            return;
        };
        let now = clock.now();
        let id = *next_customer_id;
        *next_customer_id += 1;
        let customer = Customer::new(id, process.channel(), now);
        stats.record_arrival();
        observer.on_arrival(now, process.channel(), id);
        points[StationId::Reception as usize].enqueue(customer, now);
        process.generate_next(now, events, rng);
    }

    fn process_departure(&mut self, event: Event) {
        let Some(station) = event.kind.station() else {
            return;
        };
        let Simulation {
            points,
            events,
            rng,
            stats,
            observer,
            clock,
            ..
        } = self;
        let now = clock.now();
        let mut ctx = ServiceCtx {
            now,
            events: &mut *events,
            rng: &mut *rng,
            stats: &mut *stats,
            sink: observer.as_mut(),
        };
        let departed = points[station as usize].handle_departure(event.kind, &mut ctx);
        if let Some(customer) = departed {
            if let Some(dest) = points[station as usize].route_departure(event.kind) {
                points[dest as usize].enqueue(customer, now);
            }
        }
    }

    /// The begin-service scan: idle capacity is re-offered work every step,
    /// not only on departures. The kitchen relies on this to pull one cook
    /// assignment per step.
    fn offer_service(&mut self) -> Result<(), SimError> {
        let Simulation {
            points,
            events,
            rng,
            stats,
            observer,
            clock,
            ..
        } = self;
        let now = clock.now();
        for point in points.iter_mut() {
            if point.is_reserved() || !point.has_queue() {
                continue;
            }
            let mut ctx = ServiceCtx {
                now,
                events: &mut *events,
                rng: &mut *rng,
                stats: &mut *stats,
                sink: observer.as_mut(),
            };
            point.begin_service(&mut ctx)?;
        }
        Ok(())
    }
}
