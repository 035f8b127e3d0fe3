//! Grouping resolved paths into itineraries.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::config::FareTable;
use super::resolve::{ResolvedSegment, ScheduleChain};
use super::segments::PathSegment;
use crate::catalog::Catalog;
use crate::domain::{Direction, LineCode, StationCode};

/// A line ridden on an itinerary, labelled for display.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLabel {
    /// Undirected line code.
    pub name: String,
    pub direction: Direction,
    pub train_name: Option<String>,
    pub segment: Vec<StationCode>,
}

/// A schedule chain numbered within its itinerary, from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedChain {
    pub id: usize,
    pub segments: Vec<ResolvedSegment>,
}

/// All schedule options found for one station path.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub route: Vec<StationCode>,
    pub lines: Vec<LineLabel>,
    pub transfer: Vec<StationCode>,
    pub stations_count: usize,
    pub prices: FareTable,
    pub schedules: Vec<NumberedChain>,
}

/// Collects itineraries keyed by station sequence, in first-seen order.
#[derive(Debug, Default)]
pub struct ItineraryBuilder {
    by_route: IndexMap<Vec<StationCode>, Itinerary>,
    total_chains: usize,
}

impl ItineraryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the chains resolved for one path.
    ///
    /// The first path with chains for a station sequence fixes the
    /// itinerary's labels; later ones only contribute chains. A path with no
    /// chains contributes nothing.
    pub fn add(
        &mut self,
        catalog: &Catalog,
        route: &[StationCode],
        segments: &[PathSegment<'_>],
        transfer: Vec<StationCode>,
        fares: FareTable,
        chains: Vec<ScheduleChain>,
    ) {
        if chains.is_empty() {
            return;
        }

        let itinerary = self
            .by_route
            .entry(route.to_vec())
            .or_insert_with(|| Itinerary {
                route: route.to_vec(),
                lines: line_labels(catalog, segments),
                transfer,
                stations_count: route.len(),
                prices: fares,
                schedules: Vec::new(),
            });

        self.total_chains += chains.len();
        for chain in chains {
            let id = itinerary.schedules.len() + 1;
            itinerary.schedules.push(NumberedChain {
                id,
                segments: chain.segments,
            });
        }
    }

    pub fn route_count(&self) -> usize {
        self.by_route.len()
    }

    pub fn chain_count(&self) -> usize {
        self.total_chains
    }

    pub fn finish(self) -> Vec<Itinerary> {
        self.by_route.into_values().collect()
    }
}

/// Labels for a path's segments. A line ridden more than once is labelled
/// with the direction of its first segment throughout.
fn line_labels(catalog: &Catalog, segments: &[PathSegment<'_>]) -> Vec<LineLabel> {
    let mut first_direction: HashMap<&str, Direction> = HashMap::new();

    segments
        .iter()
        .map(|segment| {
            let base = segment.code.base();
            let direction = *first_direction
                .entry(base)
                .or_insert_with(|| segment.code.direction());
            let code = LineCode::new(base, direction);

            LineLabel {
                name: base.to_string(),
                direction,
                train_name: catalog.train_for(&code).map(|t| t.name.clone()),
                segment: segment.stations.clone(),
            }
        })
        .collect()
}
