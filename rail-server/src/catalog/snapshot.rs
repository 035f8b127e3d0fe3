//! Immutable catalog snapshot.
//!
//! A `Catalog` is everything the route search reads: lines, scheduled runs,
//! the train roster and the district directory. Lookup indices are built once
//! when the snapshot is created so routing never scans lists by code.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::{District, Line, LineCode, Schedule, StationCode, Train};
use crate::planner::{Hop, StationGraph};

/// One consistent version of the network data.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    lines: Vec<Line>,
    schedules: Vec<Schedule>,
    trains: Vec<Train>,
    districts: Vec<District>,

    graph: StationGraph,
    line_index: HashMap<String, usize>,
    train_by_line: HashMap<LineCode, usize>,
    train_by_name: HashMap<String, usize>,
    district_index: HashMap<StationCode, usize>,
}

impl Catalog {
    /// Build a snapshot and its indices.
    ///
    /// Lines with a code already seen are dropped with a warning. For the
    /// roster and districts, the first entry for a key wins.
    pub fn new(
        lines: Vec<Line>,
        schedules: Vec<Schedule>,
        trains: Vec<Train>,
        districts: Vec<District>,
    ) -> Self {
        let mut line_index = HashMap::with_capacity(lines.len());
        let mut unique_lines = Vec::with_capacity(lines.len());
        for line in lines {
            if line_index.contains_key(&line.code) {
                warn!(code = %line.code, "duplicate line code, keeping the first");
                continue;
            }
            line_index.insert(line.code.clone(), unique_lines.len());
            unique_lines.push(line);
        }

        let mut train_by_line = HashMap::with_capacity(trains.len());
        let mut train_by_name = HashMap::with_capacity(trains.len());
        for (idx, train) in trains.iter().enumerate() {
            train_by_line.entry(train.line.clone()).or_insert(idx);
            train_by_name.entry(train.name.clone()).or_insert(idx);
        }

        let mut district_index = HashMap::with_capacity(districts.len());
        for (idx, district) in districts.iter().enumerate() {
            district_index.entry(district.code).or_insert(idx);
        }

        let graph = StationGraph::build(&unique_lines);

        Self {
            lines: unique_lines,
            schedules,
            trains,
            districts,
            graph,
            line_index,
            train_by_line,
            train_by_name,
            district_index,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Scheduled runs in catalog order.
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// Look up a line by its undirected code.
    pub fn line(&self, code: &str) -> Option<&Line> {
        self.line_index.get(code).map(|&i| &self.lines[i])
    }

    /// Stations one stop away from `station` on any line.
    pub fn hops(&self, station: StationCode) -> impl Iterator<Item = Hop<'_>> {
        self.graph.hops(&self.lines, station)
    }

    /// The train assigned to a direction-tagged line code.
    pub fn train_for(&self, line: &LineCode) -> Option<&Train> {
        self.train_by_line.get(line).map(|&i| &self.trains[i])
    }

    pub fn train_by_name(&self, name: &str) -> Option<&Train> {
        self.train_by_name.get(name).map(|&i| &self.trains[i])
    }

    /// Runs of one direction-tagged line, in catalog order.
    pub fn schedules_for_line<'a>(
        &'a self,
        line: &'a LineCode,
    ) -> impl Iterator<Item = &'a Schedule> + 'a {
        self.schedules.iter().filter(move |s| &s.line == line)
    }

    pub fn district(&self, code: &StationCode) -> Option<&District> {
        self.district_index.get(code).map(|&i| &self.districts[i])
    }

    /// Whether any line serves `station`.
    pub fn serves(&self, station: &StationCode) -> bool {
        self.graph.contains(station)
    }
}

/// Districts for every station named by `lines`, in first-seen order,
/// with placeholder names.
pub fn derive_districts(lines: &[Line]) -> Vec<District> {
    let mut seen = std::collections::HashSet::new();
    lines
        .iter()
        .flat_map(|line| line.stations().iter().copied())
        .filter(|station| seen.insert(*station))
        .map(District::unnamed)
        .collect()
}
