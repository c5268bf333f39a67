pub mod arrivals;
pub mod clock;
pub mod config;
pub mod customer;
pub mod engine;
pub mod error;
pub mod events;
pub mod observer;
pub mod points;
pub mod sampling;
pub mod stats;

pub use arrivals::ArrivalProcess;
pub use clock::{SimClock, SimTime};
pub use config::{ServiceConfig, SimulationConfig};
pub use customer::{Channel, Customer, CustomerId};
pub use engine::{ControlHandle, RunOutcome, Simulation};
pub use error::{ConfigError, SimError};
pub use events::{Event, EventKind, EventQueue};
pub use observer::{NullObserver, SimulationObserver};
pub use points::counter::Counter;
pub use points::delivery::Delivery;
pub use points::kitchen::{Competency, Cook, Kitchen, MAX_COOKS};
pub use points::reception::Reception;
pub use points::{ServiceCtx, ServicePoint, Station, StationId};
pub use sampling::{ArrivalSampler, ServiceSampler};
pub use stats::{PointReport, PointStats, SimulationReport, SystemStats, SystemTotals};
