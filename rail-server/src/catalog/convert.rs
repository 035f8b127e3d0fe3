//! Conversion between catalog records and domain types.
//!
//! Loading converts every record it can and skips the rest with a warning,
//! so one bad schedule does not take the whole network down. The reverse
//! direction (domain to record) is used when serving or writing catalogs.

use tracing::warn;

use crate::domain::{
    District, DomainError, Line, LineCode, Schedule, ScheduleStop, SeatCapacity, StationCode,
    TimeOfDay, Train, TrainStatus,
};

use super::records::{
    DistrictRecord, LineRecord, ScheduleRecord, SeatsRecord, StopRecord, TrainRecord,
};

/// Error converting a single catalog record.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// A line record failed validation
    #[error("line {code}: {source}")]
    Line { code: String, source: DomainError },

    /// A schedule record failed validation
    #[error("schedule {id}: {source}")]
    Schedule { id: u64, source: DomainError },

    /// A train record failed validation
    #[error("train {name}: {message}")]
    Train { name: String, message: String },

    /// A district record failed validation
    #[error("district {code}: {source}")]
    District { code: String, source: DomainError },
}

/// Convert one line record.
pub fn convert_line(record: &LineRecord) -> Result<Line, ConversionError> {
    let wrap = |source: DomainError| ConversionError::Line {
        code: record.code.clone(),
        source,
    };

    let stations = record
        .stations
        .iter()
        .map(|s| StationCode::parse(s))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| wrap(e.into()))?;

    Line::new(
        record.id,
        record.code.clone(),
        record.name.clone(),
        stations,
        record.length,
    )
    .map_err(wrap)
}

/// Convert one schedule record.
pub fn convert_schedule(record: &ScheduleRecord) -> Result<Schedule, ConversionError> {
    let wrap = |source: DomainError| ConversionError::Schedule {
        id: record.id,
        source,
    };

    let line = LineCode::parse(&record.line_code).map_err(wrap)?;
    let stops = record
        .stops
        .iter()
        .map(convert_stop)
        .collect::<Result<Vec<_>, _>>()
        .map_err(wrap)?;

    Schedule::new(record.id, line, stops).map_err(wrap)
}

fn convert_stop(record: &StopRecord) -> Result<ScheduleStop, DomainError> {
    let station = StationCode::parse(&record.station)?;
    let arrival = TimeOfDay::parse(&record.arrival)?;
    let departure = record
        .departure
        .as_deref()
        .map(TimeOfDay::parse)
        .transpose()?;
    Ok(ScheduleStop::new(station, arrival, departure))
}

/// Convert one train record.
pub fn convert_train(record: &TrainRecord) -> Result<Train, ConversionError> {
    let wrap = |message: String| ConversionError::Train {
        name: record.name.clone(),
        message,
    };

    let line = LineCode::parse(&record.line).map_err(|e| wrap(e.to_string()))?;
    let status = record
        .status
        .parse::<TrainStatus>()
        .map_err(|e| wrap(e.to_string()))?;
    let current_station = match record.current_station.as_str() {
        "" | "none" => None,
        code => Some(StationCode::parse(code).map_err(|e| wrap(e.to_string()))?),
    };

    Ok(Train {
        name: record.name.clone(),
        line,
        status,
        current_station,
        economy_seats: seats(record.economy_seats),
        first_class_seats: seats(record.first_class_seats),
    })
}

fn seats(record: SeatsRecord) -> SeatCapacity {
    SeatCapacity {
        available: record.available,
        taken: record.taken,
    }
}

/// Convert one district record.
pub fn convert_district(record: &DistrictRecord) -> Result<District, ConversionError> {
    let code = StationCode::parse(&record.code).map_err(|e| ConversionError::District {
        code: record.code.clone(),
        source: e.into(),
    })?;
    Ok(District::new(code, record.name.clone()))
}

/// Convert every record with `convert`, logging and skipping failures.
pub fn convert_all<R, T>(
    records: &[R],
    kind: &'static str,
    convert: impl Fn(&R) -> Result<T, ConversionError>,
) -> Vec<T> {
    let mut converted = Vec::with_capacity(records.len());
    for record in records {
        match convert(record) {
            Ok(value) => converted.push(value),
            Err(e) => warn!(kind, error = %e, "skipping invalid catalog record"),
        }
    }
    converted
}

impl From<&Line> for LineRecord {
    fn from(line: &Line) -> Self {
        Self {
            id: line.id,
            code: line.code.clone(),
            name: line.name.clone(),
            stations: line.stations().iter().map(|s| s.to_string()).collect(),
            length: line.length,
        }
    }
}

impl From<&ScheduleStop> for StopRecord {
    fn from(stop: &ScheduleStop) -> Self {
        Self {
            station: stop.station.to_string(),
            arrival: stop.arrival.to_string(),
            departure: stop.departure.map(|t| t.to_string()),
        }
    }
}

impl From<&Schedule> for ScheduleRecord {
    fn from(schedule: &Schedule) -> Self {
        Self {
            id: schedule.id,
            line_code: schedule.line.to_string(),
            stops: schedule.stops().iter().map(StopRecord::from).collect(),
        }
    }
}

impl From<&Train> for TrainRecord {
    fn from(train: &Train) -> Self {
        Self {
            name: train.name.clone(),
            line: train.line.to_string(),
            economy_seats: SeatsRecord {
                available: train.economy_seats.available,
                taken: train.economy_seats.taken,
            },
            first_class_seats: SeatsRecord {
                available: train.first_class_seats.available,
                taken: train.first_class_seats.taken,
            },
            status: train.status.to_string(),
            current_station: train
                .current_station
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".to_string()),
        }
    }
}

impl From<&District> for DistrictRecord {
    fn from(district: &District) -> Self {
        Self {
            code: district.code.to_string(),
            name: district.name.clone(),
        }
    }
}
