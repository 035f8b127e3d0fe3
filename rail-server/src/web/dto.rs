//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::catalog::StopRecord;
use crate::planner::{Itinerary, LineLabel, NumberedChain, ResolvedSegment};

/// Query for a route search.
#[derive(Debug, Deserialize)]
pub struct FindRoutesRequest {
    /// Start station code
    pub start: Option<String>,

    /// End station code
    pub end: Option<String>,
}

/// Optional filters on the train roster.
#[derive(Debug, Default, Deserialize)]
pub struct TrainQuery {
    /// Direction-tagged line code, e.g. "LINE-RED-REV"
    pub line: Option<String>,

    /// "at station", "in transit" or "stopped"
    pub status: Option<String>,
}

/// One itinerary in a route search response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResult {
    pub route: Vec<String>,
    pub lines: Vec<LineResult>,
    pub transfer: Vec<String>,
    pub stations_count: usize,
    pub prices: PricesResult,
    pub schedules: Vec<ChainResult>,
}

/// A line ridden on an itinerary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResult {
    /// Undirected line code
    pub name: String,

    /// "forward" or "reverse"
    pub direction: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_name: Option<String>,

    pub segment: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricesResult {
    pub economy: f64,
    pub first_class: f64,
}

/// One numbered schedule option.
#[derive(Debug, Serialize)]
pub struct ChainResult {
    pub id: usize,
    pub segments: Vec<SegmentResult>,
}

/// A segment of a schedule option, on one run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResult {
    /// Direction-tagged line code
    pub line: String,
    pub schedule_id: u64,
    pub stops: Vec<StopRecord>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl ItineraryResult {
    /// Create from a planner Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            route: itinerary.route.iter().map(|s| s.to_string()).collect(),
            lines: itinerary.lines.iter().map(LineResult::from_label).collect(),
            transfer: itinerary.transfer.iter().map(|s| s.to_string()).collect(),
            stations_count: itinerary.stations_count,
            prices: PricesResult {
                economy: itinerary.prices.economy,
                first_class: itinerary.prices.first_class,
            },
            schedules: itinerary
                .schedules
                .iter()
                .map(ChainResult::from_chain)
                .collect(),
        }
    }
}

impl LineResult {
    fn from_label(label: &LineLabel) -> Self {
        Self {
            name: label.name.clone(),
            direction: label.direction.as_str(),
            train_name: label.train_name.clone(),
            segment: label.segment.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ChainResult {
    fn from_chain(chain: &NumberedChain) -> Self {
        Self {
            id: chain.id,
            segments: chain
                .segments
                .iter()
                .map(SegmentResult::from_segment)
                .collect(),
        }
    }
}

impl SegmentResult {
    fn from_segment(segment: &ResolvedSegment) -> Self {
        Self {
            line: segment.line.to_string(),
            schedule_id: segment.schedule_id,
            stops: segment.stops.iter().map(StopRecord::from).collect(),
        }
    }
}
