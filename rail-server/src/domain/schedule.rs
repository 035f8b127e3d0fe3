//! Scheduled runs of a line.
//!
//! A `Schedule` is one concrete, timed traversal of a line in one direction.
//! Its stops follow the line's station order for that direction.

use super::error::DomainError;
use super::{LineCode, StationCode, TimeOfDay};

/// A station stop on a scheduled run.
///
/// The last stop of a segment a rider travels has no departure: they get
/// off there, so only the arrival is meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleStop {
    pub station: StationCode,
    pub arrival: TimeOfDay,
    pub departure: Option<TimeOfDay>,
}

impl ScheduleStop {
    pub fn new(station: StationCode, arrival: TimeOfDay, departure: Option<TimeOfDay>) -> Self {
        Self {
            station,
            arrival,
            departure,
        }
    }

    /// The same stop without its departure time.
    pub fn alighting(&self) -> Self {
        Self {
            departure: None,
            ..self.clone()
        }
    }
}

/// One timed run of a line in one direction.
///
/// `id` is both identity and the ordering key used to enumerate successive
/// departures: later runs of the same line carry larger ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id: u64,
    pub line: LineCode,
    stops: Vec<ScheduleStop>,
}

impl Schedule {
    pub fn new(id: u64, line: LineCode, stops: Vec<ScheduleStop>) -> Result<Self, DomainError> {
        if stops.is_empty() {
            return Err(DomainError::EmptySchedule(id));
        }
        Ok(Self { id, line, stops })
    }

    pub fn stops(&self) -> &[ScheduleStop] {
        &self.stops
    }

    /// Index of the first stop at `station`, if the run calls there.
    pub fn stop_index(&self, station: &StationCode) -> Option<usize> {
        self.stops.iter().position(|s| &s.station == station)
    }
}
