//! Schedule resolution and chaining.
//!
//! Each segment of a path is matched to a concrete run so that every run
//! picks the rider up no earlier than the previous one set them down.
//! Successive chains for the same path are found by raising an id floor on
//! the first segment's run.

use tracing::trace;

use super::segments::PathSegment;
use crate::catalog::Catalog;
use crate::domain::{LineCode, Schedule, ScheduleStop, StationCode, TimeOfDay};

/// One segment matched to a run, with the stops the rider sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSegment {
    pub line: LineCode,
    pub schedule_id: u64,
    /// Stops at the segment's stations; the last has no departure.
    pub stops: Vec<ScheduleStop>,
}

/// A time-consistent assignment of one run per segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleChain {
    pub segments: Vec<ResolvedSegment>,
}

impl ScheduleChain {
    /// Id of the run ridden on the first segment.
    pub fn first_run_id(&self) -> Option<u64> {
        self.segments.first().map(|s| s.schedule_id)
    }
}

/// A run selected for one segment.
struct Match<'c> {
    run: &'c Schedule,
    board: usize,
    alight: usize,
}

/// First run in catalog order for `line` that calls at `from` and later at
/// `to`, reaches `from` no earlier than `not_before`, and has an id of at
/// least `min_id` when given.
fn find_next_run<'c>(
    catalog: &'c Catalog,
    line: &'c LineCode,
    from: &StationCode,
    to: &StationCode,
    not_before: TimeOfDay,
    min_id: Option<u64>,
) -> Option<Match<'c>> {
    catalog.schedules_for_line(line).find_map(|run| {
        if min_id.is_some_and(|floor| run.id < floor) {
            return None;
        }
        let board = run.stop_index(from)?;
        let alight = run.stop_index(to)?;
        if alight <= board || run.stops()[board].arrival < not_before {
            return None;
        }
        Some(Match { run, board, alight })
    })
}

/// Resolve one chain, applying `min_id` to the first segment only.
///
/// Returns `None` if any segment has no suitable run.
pub fn resolve_chain(
    catalog: &Catalog,
    segments: &[PathSegment<'_>],
    min_id: u64,
) -> Option<ScheduleChain> {
    let mut current_time = TimeOfDay::midnight();
    let mut resolved = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        let floor = (i == 0).then_some(min_id);
        let Some(m) = find_next_run(
            catalog,
            &segment.code,
            &segment.first(),
            &segment.last(),
            current_time,
            floor,
        ) else {
            trace!(line = %segment.code, after = %current_time, "no run for segment");
            return None;
        };

        current_time = m.run.stops()[m.alight].arrival;
        resolved.push(ResolvedSegment {
            line: segment.code.clone(),
            schedule_id: m.run.id,
            stops: segment_stops(m.run, m.board, m.alight, segment),
        });
    }

    Some(ScheduleChain { segments: resolved })
}

/// Stops of `run` between boarding and alighting at the segment's
/// stations, with the alighting stop's departure removed.
fn segment_stops(
    run: &Schedule,
    board: usize,
    alight: usize,
    segment: &PathSegment<'_>,
) -> Vec<ScheduleStop> {
    let mut stops: Vec<ScheduleStop> = run.stops()[board..=alight]
        .iter()
        .filter(|stop| segment.stations.contains(&stop.station))
        .cloned()
        .collect();

    if let Some(last) = stops.last_mut() {
        *last = last.alighting();
    }
    stops
}

/// Every chain for a path, earliest first run first, up to `max_chains`.
pub fn resolve_chains(
    catalog: &Catalog,
    segments: &[PathSegment<'_>],
    max_chains: usize,
) -> Vec<ScheduleChain> {
    let mut chains = Vec::new();
    if segments.is_empty() {
        return chains;
    }

    let mut min_id = 0;
    while chains.len() < max_chains {
        let Some(chain) = resolve_chain(catalog, segments, min_id) else {
            break;
        };
        let next_floor = chain.first_run_id().and_then(|id| id.checked_add(1));
        chains.push(chain);
        match next_floor {
            Some(floor) => min_id = floor,
            None => break,
        }
    }

    chains
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Line;
    use crate::planner::bfs::RawPath;
    use crate::planner::segments::split_segments;

    fn station(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn time(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
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

    /// A run calling at each (station, arrival) with a one-minute dwell.
    fn run(id: u64, line: &str, calls: &[(&str, &str)]) -> Schedule {
        let stops = calls
            .iter()
            .map(|(s, arr)| {
                let arrival = time(arr);
                ScheduleStop::new(station(s), arrival, Some(arrival + chrono::Duration::minutes(1)))
            })
            .collect();
        Schedule::new(id, LineCode::parse(line).unwrap(), stops).unwrap()
    }

    fn two_line_catalog(runs: Vec<Schedule>) -> Catalog {
        Catalog::new(
            vec![line("L1", &["A", "B", "C"]), line("L2", &["C", "D", "E"])],
            runs,
            vec![],
            vec![],
        )
    }

    fn a_to_e(catalog: &Catalog) -> Vec<PathSegment<'_>> {
        let l1 = catalog.line("L1").unwrap();
        let l2 = catalog.line("L2").unwrap();
        let path = RawPath::seed(station("A"))
            .extend(l1, station("B"))
            .extend(l1, station("C"))
            .extend(l2, station("D"))
            .extend(l2, station("E"));
        split_segments(&path)
    }

    #[test]
    fn connects_second_segment_after_first_arrival() {
        let catalog = two_line_catalog(vec![
            run(0, "L1", &[("A", "08:00:00"), ("B", "08:10:00"), ("C", "08:20:00")]),
            // Leaves C before the L1 run gets there
            run(1, "L2", &[("C", "08:15:00"), ("D", "08:25:00"), ("E", "08:35:00")]),
            run(2, "L2", &[("C", "08:30:00"), ("D", "08:40:00"), ("E", "08:50:00")]),
        ]);
        let segments = a_to_e(&catalog);

        let chain = resolve_chain(&catalog, &segments, 0).unwrap();
        let ids: Vec<u64> = chain.segments.iter().map(|s| s.schedule_id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn trims_stops_and_drops_final_departure() {
        let catalog = two_line_catalog(vec![
            run(0, "L1", &[("A", "08:00:00"), ("B", "08:10:00"), ("C", "08:20:00")]),
            run(1, "L2", &[("C", "08:30:00"), ("D", "08:40:00"), ("E", "08:50:00")]),
        ]);
        let segments = a_to_e(&catalog);

        let chain = resolve_chain(&catalog, &segments, 0).unwrap();
        let first = &chain.segments[0];
        assert_eq!(first.stops.len(), 3);
        assert!(first.stops[0].departure.is_some());
        assert_eq!(first.stops[2].departure, None);
        assert_eq!(first.stops[2].arrival, time("08:20:00"));
        assert_eq!(chain.segments[1].line.to_string(), "L2");
    }

    #[test]
    fn id_floor_applies_to_first_segment_only() {
        let catalog = two_line_catalog(vec![
            run(0, "L2", &[("C", "09:00:00"), ("D", "09:10:00"), ("E", "09:20:00")]),
            run(5, "L1", &[("A", "08:00:00"), ("B", "08:10:00"), ("C", "08:20:00")]),
        ]);
        let segments = a_to_e(&catalog);

        let chain = resolve_chain(&catalog, &segments, 3).unwrap();
        assert_eq!(chain.first_run_id(), Some(5));
        assert_eq!(chain.segments[1].schedule_id, 0);
    }

    #[test]
    fn enumerates_successive_chains() {
        let catalog = two_line_catalog(vec![
            run(0, "L1", &[("A", "08:00:00"), ("B", "08:10:00"), ("C", "08:20:00")]),
            run(1, "L2", &[("C", "08:30:00"), ("D", "08:40:00"), ("E", "08:50:00")]),
            run(2, "L1", &[("A", "11:00:00"), ("B", "11:10:00"), ("C", "11:20:00")]),
            run(3, "L2", &[("C", "11:30:00"), ("D", "11:40:00"), ("E", "11:50:00")]),
        ]);
        let segments = a_to_e(&catalog);

        let chains = resolve_chains(&catalog, &segments, 64);
        let firsts: Vec<Option<u64>> = chains.iter().map(|c| c.first_run_id()).collect();
        assert_eq!(firsts, vec![Some(0), Some(2)]);
        assert_eq!(chains[1].segments[1].schedule_id, 3);
    }

    #[test]
    fn max_chains_caps_enumeration() {
        let runs = (0..10)
            .map(|i| {
                let hour = format!("{:02}:00:00", 8 + i);
                let next = format!("{:02}:10:00", 8 + i);
                run(i, "L1", &[("A", hour.as_str()), ("B", next.as_str())])
            })
            .collect();
        let catalog = Catalog::new(vec![line("L1", &["A", "B"])], runs, vec![], vec![]);
        let l1 = catalog.line("L1").unwrap();
        let path = RawPath::seed(station("A")).extend(l1, station("B"));
        let segments = split_segments(&path);

        assert_eq!(resolve_chains(&catalog, &segments, 3).len(), 3);
        assert_eq!(resolve_chains(&catalog, &segments, 64).len(), 10);
    }

    #[test]
    fn run_calling_in_wrong_order_is_skipped() {
        // Tagged forward but calls at C before A
        let catalog = Catalog::new(
            vec![line("L1", &["A", "B", "C"])],
            vec![run(0, "L1", &[("C", "08:00:00"), ("B", "08:10:00"), ("A", "08:20:00")])],
            vec![],
            vec![],
        );
        let l1 = catalog.line("L1").unwrap();
        let path = RawPath::seed(station("A"))
            .extend(l1, station("B"))
            .extend(l1, station("C"));

        assert!(resolve_chains(&catalog, &split_segments(&path), 64).is_empty());
    }

    #[test]
    fn no_segments_no_chains() {
        let catalog = two_line_catalog(vec![]);
        assert!(resolve_chains(&catalog, &[], 64).is_empty());
    }

    #[test]
    fn line_ridden_back_uses_reverse_runs() {
        let catalog = Catalog::new(
            vec![line("L1", &["A", "B", "C", "D"]), line("L2", &["B", "X", "D"])],
            vec![
                run(0, "L1", &[("A", "08:00:00"), ("B", "08:10:00"), ("C", "08:20:00"), ("D", "08:30:00")]),
                run(1, "L2", &[("B", "08:15:00"), ("X", "08:25:00"), ("D", "08:35:00")]),
                run(2, "L1-REV", &[("D", "08:40:00"), ("C", "08:50:00"), ("B", "09:00:00"), ("A", "09:10:00")]),
            ],
            vec![],
            vec![],
        );
        let l1 = catalog.line("L1").unwrap();
        let l2 = catalog.line("L2").unwrap();
        let path = RawPath::seed(station("A"))
            .extend(l1, station("B"))
            .extend(l2, station("X"))
            .extend(l2, station("D"))
            .extend(l1, station("C"));
        let segments = split_segments(&path);

        let chains = resolve_chains(&catalog, &segments, 64);
        assert_eq!(chains.len(), 1);
        let ids: Vec<u64> = chains[0].segments.iter().map(|s| s.schedule_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(chains[0].segments[2].line.to_string(), "L1-REV");
    }

    #[test]
    fn largest_run_id_ends_enumeration() {
        let catalog = Catalog::new(
            vec![line("L1", &["A", "B"])],
            vec![run(u64::MAX, "L1", &[("A", "08:00:00"), ("B", "08:10:00")])],
            vec![],
            vec![],
        );
        let l1 = catalog.line("L1").unwrap();
        let path = RawPath::seed(station("A")).extend(l1, station("B"));

        let chains = resolve_chains(&catalog, &split_segments(&path), 64);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].first_run_id(), Some(u64::MAX));
    }
}
