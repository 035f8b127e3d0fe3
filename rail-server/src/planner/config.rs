//! Route search configuration.

use std::fmt;
use std::str::FromStr;

/// Which BFS work items count as already explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitPolicy {
    /// A station is expanded at most once, however it was reached.
    #[default]
    Station,
    /// A directed hop `(from, to, line)` is expanded at most once. Admits
    /// paths that reach a station by a second line.
    Edge,
}

impl VisitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitPolicy::Station => "station",
            VisitPolicy::Edge => "edge",
        }
    }
}

impl fmt::Display for VisitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown visit policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown visit policy {0:?} (expected \"station\" or \"edge\")")]
pub struct UnknownVisitPolicy(pub String);

impl FromStr for VisitPolicy {
    type Err = UnknownVisitPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "station" => Ok(VisitPolicy::Station),
            "edge" => Ok(VisitPolicy::Edge),
            _ => Err(UnknownVisitPolicy(s.to_string())),
        }
    }
}

/// Fixed fares quoted on every itinerary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareTable {
    pub economy: f64,
    pub first_class: f64,
}

impl Default for FareTable {
    fn default() -> Self {
        Self {
            economy: 120.0,
            first_class: 400.0,
        }
    }
}

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    pub visit_policy: VisitPolicy,

    /// Maximum number of schedule chains resolved for one path.
    /// Bounds the work a catalog with very many runs can cause.
    pub max_chains_per_path: usize,

    /// Maximum number of hops in a discovered path. `None` means unbounded.
    pub max_hops: Option<usize>,

    pub fares: FareTable,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            visit_policy: VisitPolicy::Station,
            max_chains_per_path: 64,
            max_hops: None,
            fares: FareTable::default(),
        }
    }
}
