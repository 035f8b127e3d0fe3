//! Transfer and direction derivation for a discovered path.

use super::bfs::RawPath;
use crate::domain::{Direction, Line, LineCode, StationCode};

/// A run of a path's stations ridden on one line in one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment<'a> {
    pub line: &'a Line,
    /// Direction-tagged code for this segment's own direction of travel,
    /// used to look up runs.
    pub code: LineCode,
    pub stations: Vec<StationCode>,
}

impl PathSegment<'_> {
    pub fn first(&self) -> StationCode {
        self.stations[0]
    }

    pub fn last(&self) -> StationCode {
        self.stations[self.stations.len() - 1]
    }
}

/// Internal stations where the arriving line differs from the departing line.
pub fn transfers(path: &RawPath<'_>) -> Vec<StationCode> {
    let stations = path.stations();
    let lines = path.lines();

    (1..stations.len().saturating_sub(1))
        .filter(|&i| lines[i - 1].code != lines[i].code)
        .map(|i| stations[i])
        .collect()
}

/// Split a path into segments at its transfer stations.
///
/// A transfer station ends one segment and starts the next. Each segment
/// is tagged with the direction it actually travels. A zero-hop path has no
/// segments.
pub fn split_segments<'a>(path: &RawPath<'a>) -> Vec<PathSegment<'a>> {
    let stations = path.stations();
    let lines = path.lines();
    if lines.is_empty() {
        return Vec::new();
    }

    let mut bounds = Vec::new();
    let mut start = 0;
    for i in 1..lines.len() {
        if lines[i - 1].code != lines[i].code {
            bounds.push((start, i));
            start = i;
        }
    }
    bounds.push((start, stations.len() - 1));

    bounds
        .into_iter()
        .map(|(from, to)| {
            let line = lines[from];
            let direction = traversal_direction(line, stations[from], stations[to]);

            PathSegment {
                line,
                code: LineCode::new(line.code.clone(), direction),
                stations: stations[from..=to].to_vec(),
            }
        })
        .collect()
}

/// Direction of travel from `from` to `to` in the line's stored order.
fn traversal_direction(line: &Line, from: StationCode, to: StationCode) -> Direction {
    line.direction_code(&from, &to)
        .map(|code| code.direction())
        .unwrap_or(Direction::Forward)
}

#[cfg(test)]
mod tests {
    use super::*;

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

    /// Walk `hops` of (line, station) from `start`.
    fn path<'a>(start: &str, hops: &[(&'a Line, &str)]) -> RawPath<'a> {
        hops.iter()
            .fold(RawPath::seed(station(start)), |p, (l, s)| p.extend(l, station(s)))
    }

    fn codes(segments: &[PathSegment<'_>]) -> Vec<String> {
        segments.iter().map(|s| s.code.to_string()).collect()
    }

    #[test]
    fn single_line_is_one_segment() {
        let l1 = line("L1", &["A", "B", "C"]);
        let p = path("A", &[(&l1, "B"), (&l1, "C")]);

        assert!(transfers(&p).is_empty());
        let segments = split_segments(&p);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].stations, vec![station("A"), station("B"), station("C")]);
        assert_eq!(codes(&segments), vec!["L1"]);
    }

    #[test]
    fn transfer_station_shared_by_both_segments() {
        let l1 = line("L1", &["A", "B", "C"]);
        let l2 = line("L2", &["C", "D", "E"]);
        let p = path("A", &[(&l1, "B"), (&l1, "C"), (&l2, "D"), (&l2, "E")]);

        assert_eq!(transfers(&p), vec![station("C")]);
        let segments = split_segments(&p);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].last(), station("C"));
        assert_eq!(segments[1].first(), station("C"));
        assert_eq!(segments[1].last(), station("E"));
    }

    #[test]
    fn reverse_traversal_is_tagged() {
        let l1 = line("L1", &["A", "B", "C"]);
        let l2 = line("L2", &["E", "D", "C"]);
        let p = path("A", &[(&l1, "B"), (&l1, "C"), (&l2, "D"), (&l2, "E")]);

        assert_eq!(codes(&split_segments(&p)), vec!["L1", "L2-REV"]);
    }

    #[test]
    fn repeated_line_keeps_each_direction() {
        let l1 = line("L1", &["A", "B", "C", "D"]);
        let l2 = line("L2", &["B", "X", "D"]);
        // A->B on L1 forward, B->X->D on L2, then D->C on L1 against stored order
        let p = path("A", &[(&l1, "B"), (&l2, "X"), (&l2, "D"), (&l1, "C")]);

        let segments = split_segments(&p);
        assert_eq!(transfers(&p), vec![station("B"), station("D")]);
        assert_eq!(codes(&segments), vec!["L1", "L2", "L1-REV"]);
    }

    #[test]
    fn zero_hop_path_has_no_segments() {
        let p = RawPath::seed(station("A"));
        assert!(transfers(&p).is_empty());
        assert!(split_segments(&p).is_empty());
    }
}
