//! Timetable and roster generation.
//!
//! Builds a regular timetable for a line catalog: every line runs in both
//! directions at each configured start time, calling at every station with
//! a fixed dwell and a fixed hop between stations.

use chrono::Duration;

use crate::domain::{Direction, Line, LineCode, Schedule, ScheduleStop, TimeOfDay, Train};

/// Seats fitted to every generated train.
const ECONOMY_SEATS: u32 = 200;
const FIRST_CLASS_SEATS: u32 = 100;

/// Parameters for [`generate_schedules`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Time each run arrives at its first station.
    pub start_times: Vec<TimeOfDay>,
    /// Time spent standing at each station.
    pub dwell: Duration,
    /// Travel time between adjacent stations.
    pub hop: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let start_times = [8, 11, 14, 17, 20, 23]
            .into_iter()
            .filter_map(|hour| TimeOfDay::from_hms(hour, 0, 0).ok())
            .collect();

        Self {
            start_times,
            dwell: Duration::minutes(10),
            hop: Duration::seconds(10),
        }
    }
}

/// Generate runs for every line.
///
/// For each line and each start time, a forward run is emitted followed by
/// a reverse run. Ids are sequential from 0 in emission order, so later runs
/// of a line always carry larger ids.
pub fn generate_schedules(lines: &[Line], config: &GeneratorConfig) -> Vec<Schedule> {
    let mut schedules = Vec::with_capacity(lines.len() * config.start_times.len() * 2);
    let mut next_id = 0u64;

    for line in lines {
        for &start in &config.start_times {
            for direction in [Direction::Forward, Direction::Reverse] {
                let run = generate_run(next_id, line, direction, start, config);
                schedules.extend(run);
                next_id += 1;
            }
        }
    }

    schedules
}

fn generate_run(
    id: u64,
    line: &Line,
    direction: Direction,
    start: TimeOfDay,
    config: &GeneratorConfig,
) -> Option<Schedule> {
    let mut stations = line.stations().to_vec();
    if direction == Direction::Reverse {
        stations.reverse();
    }

    let mut arrival = start;
    let stops = stations
        .into_iter()
        .map(|station| {
            let departure = arrival + config.dwell;
            let stop = ScheduleStop::new(station, arrival, Some(departure));
            arrival = departure + config.hop;
            stop
        })
        .collect();

    // Lines always have stations, so this only fails on an empty line
    Schedule::new(id, LineCode::new(line.code.clone(), direction), stops).ok()
}

/// Two trains per line: `<ID>-01` runs forward, `<ID>-02` in reverse.
pub fn generate_roster(lines: &[Line]) -> Vec<Train> {
    lines
        .iter()
        .flat_map(|line| {
            let id = train_identifier(&line.code);
            [
                Train::new(
                    format!("{id}-01"),
                    LineCode::forward(line.code.clone()),
                    ECONOMY_SEATS,
                    FIRST_CLASS_SEATS,
                ),
                Train::new(
                    format!("{id}-02"),
                    LineCode::new(line.code.clone(), Direction::Reverse),
                    ECONOMY_SEATS,
                    FIRST_CLASS_SEATS,
                ),
            ]
        })
        .collect()
}

/// Short identifier for a line: the part after the last `-`, at most three
/// characters long. `LINE-RED` gives `RED`.
fn train_identifier(code: &str) -> String {
    let tail = code.rsplit('-').next().unwrap_or(code);
    tail.chars().take(3).collect()
}
