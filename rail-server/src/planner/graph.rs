//! Station adjacency graph.
//!
//! The network is never stored as an explicit edge list. Instead we index,
//! for every station, the lines that call there; a station's neighbours are
//! then the stations either side of it on each of those lines.

use std::collections::HashMap;

use crate::domain::{Line, StationCode};

/// A neighbouring station reached along one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hop<'a> {
    pub line: &'a Line,
    pub to: StationCode,
}

/// Index from station to the lines calling there.
///
/// Built once per catalog snapshot. Line references are indices into the
/// catalog's line list, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct StationGraph {
    lines_at: HashMap<StationCode, Vec<usize>>,
}

impl StationGraph {
    /// Record every station of every line against that line.
    ///
    /// A station listed twice on one line (a loop) is recorded once.
    pub fn build(lines: &[Line]) -> Self {
        let mut lines_at: HashMap<StationCode, Vec<usize>> = HashMap::new();

        for (idx, line) in lines.iter().enumerate() {
            for station in line.stations() {
                let entry = lines_at.entry(*station).or_default();
                if !entry.contains(&idx) {
                    entry.push(idx);
                }
            }
        }

        Self { lines_at }
    }

    /// Indices of the lines calling at `station`, in catalog order.
    pub fn lines_at(&self, station: &StationCode) -> &[usize] {
        self.lines_at.get(station).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any line calls at `station`.
    pub fn contains(&self, station: &StationCode) -> bool {
        self.lines_at.contains_key(station)
    }

    /// Stations adjacent to `station`, line by line in catalog order; for
    /// each line the previous station comes before the next one.
    pub fn hops<'a>(
        &'a self,
        lines: &'a [Line],
        station: StationCode,
    ) -> impl Iterator<Item = Hop<'a>> + 'a {
        self.lines_at(&station)
            .iter()
            .filter_map(move |&idx| lines.get(idx))
            .flat_map(move |line| {
                let neighbours = line
                    .position(&station)
                    .map(|pos| line.neighbours(pos).collect::<Vec<_>>())
                    .unwrap_or_default();
                neighbours.into_iter().map(move |to| Hop { line, to })
            })
    }
}
