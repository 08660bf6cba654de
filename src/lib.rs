#![doc = include_str!("../README.md")]

mod config;
mod device;
mod error;
mod queue;
mod registry;
mod scheduler;
mod stats;

pub use config::ElevatorConfig;
pub use device::DeviceQueue;
pub use error::{ElevatorError, Result};
pub use queue::{Direction, Request, RequestId, Sector};
pub use registry::{Constructor, Registry};
pub use scheduler::{Elevator, Greedy, Noop};
pub use stats::{ElevatorStats, SeekHistogram, SEEK_BUCKETS};
