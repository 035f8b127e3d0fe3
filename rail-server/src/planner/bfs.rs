//! Breadth-first path discovery.
//!
//! Explores the station graph from the start station one hop at a time,
//! collecting every simple path that reaches the target. Paths come out in
//! non-decreasing hop count; among equal lengths, in the order the graph
//! yields neighbours.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use super::config::{RouteConfig, VisitPolicy};
use crate::catalog::Catalog;
use crate::domain::{Line, StationCode};

/// A partial or complete path through the network.
///
/// `lines[i]` is the line used to travel from `stations[i]` to
/// `stations[i + 1]`, so there is always one fewer line than station.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPath<'a> {
    stations: Vec<StationCode>,
    lines: Vec<&'a Line>,
}

impl<'a> RawPath<'a> {
    /// The zero-hop path at `start`.
    pub fn seed(start: StationCode) -> Self {
        Self {
            stations: vec![start],
            lines: Vec::new(),
        }
    }

    /// A copy of this path extended by one hop.
    pub fn extend(&self, line: &'a Line, to: StationCode) -> Self {
        let mut stations = Vec::with_capacity(self.stations.len() + 1);
        stations.extend_from_slice(&self.stations);
        stations.push(to);

        let mut lines = Vec::with_capacity(self.lines.len() + 1);
        lines.extend_from_slice(&self.lines);
        lines.push(line);

        Self { stations, lines }
    }

    pub fn stations(&self) -> &[StationCode] {
        &self.stations
    }

    pub fn lines(&self) -> &[&'a Line] {
        &self.lines
    }

    /// The station the path currently ends at.
    pub fn last(&self) -> StationCode {
        // A path is never empty: it starts from a seed
        self.stations[self.stations.len() - 1]
    }

    pub fn hop_count(&self) -> usize {
        self.lines.len()
    }

    pub fn contains(&self, station: &StationCode) -> bool {
        self.stations.contains(station)
    }

    /// The directed hop that produced this path, if it has one.
    fn last_hop(&self) -> Option<HopKey<'a>> {
        let line = self.lines.last()?;
        let n = self.stations.len();
        Some((self.stations[n - 2], self.stations[n - 1], line.code.as_str()))
    }
}

/// A directed hop: (from, to, line code).
type HopKey<'a> = (StationCode, StationCode, &'a str);

/// Tracks which work items have already been expanded.
enum Visited<'a> {
    Stations(HashSet<StationCode>),
    Hops {
        seed_expanded: bool,
        hops: HashSet<HopKey<'a>>,
    },
}

impl<'a> Visited<'a> {
    fn new(policy: VisitPolicy) -> Self {
        match policy {
            VisitPolicy::Station => Visited::Stations(HashSet::new()),
            VisitPolicy::Edge => Visited::Hops {
                seed_expanded: false,
                hops: HashSet::new(),
            },
        }
    }

    /// Mark `path` as expanded. Returns false if it (or its end station,
    /// under the station policy) was expanded before.
    fn first_visit(&mut self, path: &RawPath<'a>) -> bool {
        match self {
            Visited::Stations(stations) => stations.insert(path.last()),
            Visited::Hops {
                seed_expanded,
                hops,
            } => match path.last_hop() {
                Some(key) => hops.insert(key),
                None => !std::mem::replace(seed_expanded, true),
            },
        }
    }
}

/// Find every path from `start` to `end` allowed by the visit policy.
///
/// A path reaching `end` is complete and is not extended further. If
/// `start == end` the result is the single zero-hop path.
pub fn discover_paths<'a>(
    catalog: &'a Catalog,
    start: StationCode,
    end: StationCode,
    config: &RouteConfig,
) -> Vec<RawPath<'a>> {
    let mut completed = Vec::new();
    let mut queue = VecDeque::from([RawPath::seed(start)]);
    let mut visited = Visited::new(config.visit_policy);

    while let Some(path) = queue.pop_front() {
        let current = path.last();

        if current == end {
            completed.push(path);
            continue;
        }

        if !visited.first_visit(&path) {
            continue;
        }

        if config.max_hops.is_some_and(|max| path.hop_count() >= max) {
            continue;
        }

        for hop in catalog.hops(current) {
            if path.contains(&hop.to) {
                continue;
            }
            trace!(from = %current, to = %hop.to, line = %hop.line.code, "expanding");
            queue.push_back(path.extend(hop.line, hop.to));
        }
    }

    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn station(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn line(code: &str, stations: &[&str]) -> Line {
        Line::new(
            0,
            code,
            code,
            stations.iter().map(|s| station(s)).collect(),
            0.0,
        )
        .unwrap()
    }

    fn network(lines: Vec<Line>) -> Catalog {
        Catalog::new(lines, vec![], vec![], vec![])
    }

    fn routes(paths: &[RawPath<'_>]) -> Vec<String> {
        paths
            .iter()
            .map(|p| {
                p.stations()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect()
    }

    fn config(policy: VisitPolicy) -> RouteConfig {
        RouteConfig {
            visit_policy: policy,
            ..RouteConfig::default()
        }
    }

    /// A-B on L1, A-C-B on L2, B-D on L3.
    fn two_ways_into_b() -> Catalog {
        network(vec![
            line("L1", &["A", "B"]),
            line("L2", &["A", "C", "B"]),
            line("L3", &["B", "D"]),
        ])
    }

    #[test]
    fn extend_copies_and_records_line() {
        let l1 = line("L1", &["A", "B"]);
        let seed = RawPath::seed(station("A"));
        let next = seed.extend(&l1, station("B"));

        assert_eq!(seed.hop_count(), 0);
        assert_eq!(next.hop_count(), 1);
        assert_eq!(next.last(), station("B"));
        assert_eq!(next.lines()[0].code, "L1");
        assert_eq!(next.last_hop(), Some((station("A"), station("B"), "L1")));
        assert_eq!(seed.last_hop(), None);
    }

    #[test]
    fn simple_line_has_one_path() {
        let catalog = network(vec![line("L1", &["A", "B", "C", "D", "E"])]);
        for policy in [VisitPolicy::Station, VisitPolicy::Edge] {
            let paths = discover_paths(&catalog, station("A"), station("E"), &config(policy));
            assert_eq!(routes(&paths), vec!["A,B,C,D,E"], "{policy}");
        }
    }

    #[test]
    fn same_start_and_end_is_zero_hop_path() {
        let catalog = network(vec![line("L1", &["A", "B"])]);
        let paths = discover_paths(&catalog, station("A"), station("A"), &config(VisitPolicy::Station));
        assert_eq!(routes(&paths), vec!["A"]);
        assert_eq!(paths[0].hop_count(), 0);
    }

    #[test]
    fn disconnected_stations_have_no_paths() {
        let catalog = network(vec![line("L1", &["A", "B"]), line("L2", &["C", "D"])]);
        let paths = discover_paths(&catalog, station("A"), station("D"), &config(VisitPolicy::Station));
        assert!(paths.is_empty());
    }

    #[test]
    fn unknown_station_has_no_paths() {
        let catalog = network(vec![line("L1", &["A", "B"])]);
        let paths = discover_paths(&catalog, station("A"), station("Z"), &config(VisitPolicy::Station));
        assert!(paths.is_empty());
    }

    #[test]
    fn diamond_finds_both_branches_in_hop_order() {
        // A-B-D on L1, A-C-D on L2
        let catalog = network(vec![line("L1", &["A", "B", "D"]), line("L2", &["A", "C", "D"])]);
        for policy in [VisitPolicy::Station, VisitPolicy::Edge] {
            let paths = discover_paths(&catalog, station("A"), station("D"), &config(policy));
            assert_eq!(routes(&paths), vec!["A,B,D", "A,C,D"], "{policy}");
        }
    }

    #[test]
    fn station_policy_expands_each_station_once() {
        let catalog = two_ways_into_b();
        let paths = discover_paths(&catalog, station("A"), station("D"), &config(VisitPolicy::Station));
        // B is expanded via A-B first, so A-C-B never continues to D
        assert_eq!(routes(&paths), vec!["A,B,D"]);
    }

    #[test]
    fn edge_policy_admits_second_approach() {
        let catalog = two_ways_into_b();
        let paths = discover_paths(&catalog, station("A"), station("D"), &config(VisitPolicy::Edge));
        assert_eq!(routes(&paths), vec!["A,B,D", "A,C,B,D"]);
    }

    #[test]
    fn max_hops_prunes_long_paths() {
        let catalog = network(vec![line("L1", &["A", "B", "D"]), line("L2", &["A", "C", "E", "D"])]);
        let config = RouteConfig {
            max_hops: Some(2),
            ..RouteConfig::default()
        };
        let paths = discover_paths(&catalog, station("A"), station("D"), &config);
        assert_eq!(routes(&paths), vec!["A,B,D"]);
    }

    #[test]
    fn paths_never_revisit_a_station() {
        let catalog = network(vec![
            line("L1", &["A", "B", "C", "D"]),
            line("L2", &["B", "E", "C"]),
            line("L3", &["A", "E", "D"]),
        ]);
        let paths = discover_paths(&catalog, station("A"), station("D"), &config(VisitPolicy::Edge));
        assert!(!paths.is_empty());
        for path in &paths {
            let unique: HashSet<_> = path.stations().iter().collect();
            assert_eq!(unique.len(), path.stations().len());
            assert_eq!(path.stations()[0], station("A"));
            assert_eq!(path.last(), station("D"));
        }
    }
}
