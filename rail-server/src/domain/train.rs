//! Train roster types.

use std::fmt;
use std::str::FromStr;

use super::{LineCode, StationCode};

/// Operational status reported for a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainStatus {
    AtStation,
    InTransit,
    Stopped,
}

impl TrainStatus {
    /// The status as written in the roster ("at station", "in transit", "stopped").
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainStatus::AtStation => "at station",
            TrainStatus::InTransit => "in transit",
            TrainStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown train status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown train status: {0:?}")]
pub struct UnknownTrainStatus(pub String);

impl FromStr for TrainStatus {
    type Err = UnknownTrainStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "at station" => Ok(TrainStatus::AtStation),
            "in transit" => Ok(TrainStatus::InTransit),
            "stopped" => Ok(TrainStatus::Stopped),
            _ => Err(UnknownTrainStatus(s.to_string())),
        }
    }
}

/// Seat capacity of one class on a train. Read-only roster metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeatCapacity {
    pub available: u32,
    pub taken: u32,
}

/// A train assigned to one direction of a line.
///
/// The route search only uses `name`, to label the line segments it
/// returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub name: String,
    pub line: LineCode,
    pub status: TrainStatus,
    pub current_station: Option<StationCode>,
    pub economy_seats: SeatCapacity,
    pub first_class_seats: SeatCapacity,
}

impl Train {
    /// A stopped train with no position and the given seat counts.
    pub fn new(name: impl Into<String>, line: LineCode, economy: u32, first_class: u32) -> Self {
        Self {
            name: name.into(),
            line,
            status: TrainStatus::Stopped,
            current_station: None,
            economy_seats: SeatCapacity {
                available: economy,
                taken: 0,
            },
            first_class_seats: SeatCapacity {
                available: first_class,
                taken: 0,
            },
        }
    }
}
