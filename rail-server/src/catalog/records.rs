//! Catalog JSON records.
//!
//! These types map directly to the catalog documents (`lines.json`,
//! `schedules.json`, `trains.json`, `districts.json`). They are also the
//! wire format of the catalog browsing endpoints. Fields that some
//! producers omit are defaulted rather than rejected.

use serde::{Deserialize, Serialize};

/// A line entry in `lines.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    #[serde(default)]
    pub id: u64,

    /// Undirected line code, e.g. "LINE-RED".
    pub code: String,

    #[serde(default)]
    pub name: String,

    /// Station codes in stored order.
    pub stations: Vec<String>,

    #[serde(default)]
    pub length: f64,
}

/// A stop within a scheduled run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRecord {
    pub station: String,

    /// "HH:MM:SS"
    pub arrival: String,

    /// "HH:MM:SS"; absent at a rider's final stop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
}

/// A scheduled run in `schedules.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub id: u64,

    /// Direction-tagged line code, e.g. "LINE-RED-REV".
    pub line_code: String,

    pub stops: Vec<StopRecord>,
}

/// Seat counts for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeatsRecord {
    pub available: u32,
    pub taken: u32,
}

/// A train in `trains.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRecord {
    pub name: String,

    /// Direction-tagged line code this train runs.
    pub line: String,

    #[serde(default)]
    pub economy_seats: SeatsRecord,

    #[serde(default)]
    pub first_class_seats: SeatsRecord,

    /// "at station", "in transit" or "stopped".
    #[serde(default = "default_status")]
    pub status: String,

    /// Station code, or "none".
    #[serde(default = "no_station")]
    pub current_station: String,
}

/// A district in `districts.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictRecord {
    pub code: String,
    pub name: String,
}

fn default_status() -> String {
    "stopped".to_string()
}

fn no_station() -> String {
    "none".to_string()
}
