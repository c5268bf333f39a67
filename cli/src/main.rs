use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use slice_core::{
    Channel, CustomerId, EventKind, NullObserver, RunOutcome, SimTime, Simulation,
    SimulationConfig, SimulationObserver, SimulationReport, StationId,
};

/// Pizzeria service network simulator
#[derive(Parser, Debug)]
#[command(name = "slice", about, version)]
struct Args {
    /// Path to a JSON configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Write the final report as JSON to this path
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Override the random seed
    #[arg(long, short)]
    seed: Option<u64>,

    /// Override the simulated horizon
    #[arg(long, short)]
    time: Option<f64>,

    /// Slow the run down to this many milliseconds per step
    #[arg(long)]
    delay: Option<u64>,

    /// Log every customer transition
    #[arg(long, short)]
    verbose: bool,
}

fn init_logger(level: LevelFilter) {
    Builder::new()
        .filter(None, level)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

/// Logs each customer transition the engine reports.
struct TraceObserver;

impl SimulationObserver for TraceObserver {
    fn on_arrival(&mut self, now: SimTime, channel: Channel, customer: CustomerId) {
        log::info!("[{now:9.2}] customer {customer} arrived ({channel:?})");
    }

    fn on_service_begin(&mut self, now: SimTime, point: StationId, customer: CustomerId) {
        log::info!("[{now:9.2}] {point} starts serving customer {customer}");
    }

    fn on_departure(
        &mut self,
        now: SimTime,
        point: StationId,
        customer: CustomerId,
        next: Option<StationId>,
    ) {
        match next {
            Some(next) => {
                log::info!("[{now:9.2}] customer {customer} moves from {point} to {next}")
            }
            None => log::info!("[{now:9.2}] customer {customer} leaves {point}"),
        }
    }

    fn on_special_departure(
        &mut self,
        now: SimTime,
        point: StationId,
        customer: CustomerId,
        kind: EventKind,
    ) {
        log::info!("[{now:9.2}] customer {customer} at {point}: {kind:?}");
    }

    fn on_served(&mut self, now: SimTime, customer: CustomerId) {
        log::info!("[{now:9.2}] customer {customer} served");
    }

    fn on_not_served(&mut self, now: SimTime, customer: CustomerId, reason: &str) {
        log::info!("[{now:9.2}] customer {customer} not served: {reason}");
    }
}

fn load_config(args: &Args) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(time) = args.time {
        config.simulation_time = time;
    }
    if let Some(delay) = args.delay {
        config.speed_delay_ms = delay;
    }
    Ok(config)
}

fn print_report(report: &SimulationReport) {
    let overview = &report.overview;
    log::info!("simulated {:.2} time units", overview.elapsed);
    log::info!(
        "customers: {} arrived, {} left ({} refused, {} refunded, {} remakes)",
        overview.total_arrived,
        overview.total_serviced,
        overview.refused_deliveries,
        overview.refunds,
        overview.remakes
    );
    log::info!(
        "response time: avg {:.2}, p50 {:.2}, p95 {:.2}, p99 {:.2}",
        overview.avg_response_time,
        overview.response_p50,
        overview.response_p95,
        overview.response_p99
    );
    log::info!(
        "throughput: {:.4} customers per time unit",
        overview.system_throughput
    );
    for point in &report.points {
        log::info!(
            "{:<9}  arrived {:>5}  serviced {:>5}  utilization {:>6.1}%  avg queue {:>6.2}  avg service {:>6.2}",
            point.point.to_string(),
            point.arrived,
            point.serviced,
            point.utilization * 100.0,
            point.avg_queue_length,
            point.avg_service_time
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let config = load_config(&args)?;
    let observer: Box<dyn SimulationObserver> = if args.verbose {
        Box::new(TraceObserver)
    } else {
        Box::new(NullObserver)
    };

    let mut sim = Simulation::with_observer(config, observer)?;
    match sim.run()? {
        RunOutcome::Completed(report) => {
            print_report(&report);
            if let Some(path) = &args.output {
                serde_json::to_writer_pretty(File::create(path)?, &report)?;
                log::info!("report written to {}", path.display());
            }
        }
        RunOutcome::Interrupted => log::warn!("run interrupted before the horizon"),
    }
    Ok(())
}
