//! Route discovery and schedule resolution.
//!
//! This module implements the core routing algorithm that answers:
//! "Which ways can I travel from this station to that one, and which
//! timetabled runs can I ride to do it?"
//!
//! Paths are found by breadth-first search over the station graph, split
//! into direction-tagged line segments at transfers, matched to connecting
//! runs, and grouped into itineraries by station sequence.

mod bfs;
mod config;
mod engine;
mod graph;
mod itinerary;
mod resolve;
mod segments;


pub use bfs::{RawPath, discover_paths};
pub use config::{FareTable, RouteConfig, UnknownVisitPolicy, VisitPolicy};
pub use engine::RouteEngine;
pub use graph::{Hop, StationGraph};
pub use itinerary::{Itinerary, ItineraryBuilder, LineLabel, NumberedChain};
pub use resolve::{ResolvedSegment, ScheduleChain, resolve_chain, resolve_chains};
pub use segments::{PathSegment, split_segments, transfers};
