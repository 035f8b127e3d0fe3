//! Domain types for the rail network.
//!
//! This module contains the core domain model types that represent
//! validated network data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod error;
mod line;
mod schedule;
mod station;
mod time;
mod train;

pub use error::DomainError;
pub use line::{Direction, Line, LineCode};
pub use schedule::{Schedule, ScheduleStop};
pub use station::{District, InvalidStationCode, StationCode};
pub use time::{TimeError, TimeOfDay};
pub use train::{SeatCapacity, Train, TrainStatus, UnknownTrainStatus};
