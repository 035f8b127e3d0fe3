//! The route engine.

use tracing::{debug, info};

use super::bfs::{RawPath, discover_paths};
use super::config::RouteConfig;
use super::itinerary::{Itinerary, ItineraryBuilder};
use super::resolve::{ScheduleChain, resolve_chains};
use super::segments::{split_segments, transfers};
use crate::catalog::Catalog;
use crate::domain::StationCode;

/// Finds itineraries between two stations over one catalog snapshot.
///
/// Borrowing the snapshot keeps a search consistent even if the shared
/// catalog is refreshed while it runs.
pub struct RouteEngine<'a> {
    catalog: &'a Catalog,
    config: &'a RouteConfig,
}

impl<'a> RouteEngine<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a RouteConfig) -> Self {
        Self { catalog, config }
    }

    /// Every itinerary from `start` to `end`, in discovery order.
    ///
    /// A journey from a station to itself is not a route and yields nothing,
    /// as do unknown or unconnected stations.
    pub fn find_routes(&self, start: StationCode, end: StationCode) -> Vec<Itinerary> {
        if start == end {
            debug!(%start, "start and end are the same station");
            return Vec::new();
        }

        if !self.catalog.serves(&start) || !self.catalog.serves(&end) {
            debug!(%start, %end, "station not served by any line");
            return Vec::new();
        }

        let mut builder = ItineraryBuilder::new();

        for path in self.discover_paths(start, end) {
            let segments = split_segments(&path);
            let chains =
                resolve_chains(self.catalog, &segments, self.config.max_chains_per_path);
            debug!(
                route = %format_route(path.stations()),
                segments = segments.len(),
                chains = chains.len(),
                "resolved path"
            );

            builder.add(
                self.catalog,
                path.stations(),
                &segments,
                transfers(&path),
                self.config.fares,
                chains,
            );
        }

        info!(
            "found {} unique routes with {} total schedules",
            builder.route_count(),
            builder.chain_count()
        );

        builder.finish()
    }

    /// Raw station paths from `start` to `end`.
    pub fn discover_paths(&self, start: StationCode, end: StationCode) -> Vec<RawPath<'a>> {
        discover_paths(self.catalog, start, end, self.config)
    }

    /// Schedule chains for one path.
    pub fn resolve_chains(&self, path: &RawPath<'a>) -> Vec<ScheduleChain> {
        let segments = split_segments(path);
        resolve_chains(self.catalog, &segments, self.config.max_chains_per_path)
    }
}

fn format_route(stations: &[StationCode]) -> String {
    stations
        .iter()
        .map(StationCode::as_str)
        .collect::<Vec<_>>()
        .join("-")
}
