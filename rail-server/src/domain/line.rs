//! Lines and direction-tagged line codes.
//!
//! A line is stored once, as an ordered list of stations, but trains run it
//! both ways. Timetables and the train roster therefore talk about
//! direction-tagged codes: `L1` for the stored order, `L1-REV` for the
//! reverse.

use std::fmt;

use super::StationCode;
use super::error::DomainError;

/// Suffix marking the reverse direction of a line code.
const REVERSE_SUFFIX: &str = "-REV";

/// Which way a train runs along a line's stored station order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Stored station order.
    Forward,
    /// Reverse of the stored station order.
    Reverse,
}

impl Direction {
    /// Direction of travel from stored index `from` to stored index `to`.
    pub fn between(from: usize, to: usize) -> Self {
        if to > from {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

/// A direction-tagged line code, e.g. `L1` or `L1-REV`.
///
/// # Examples
///
/// ```
/// use rail_server::domain::{Direction, LineCode};
///
/// let code = LineCode::parse("RED-REV").unwrap();
/// assert_eq!(code.base(), "RED");
/// assert_eq!(code.direction(), Direction::Reverse);
/// assert_eq!(code.to_string(), "RED-REV");
///
/// let fwd = LineCode::forward("RED");
/// assert_eq!(LineCode::new(fwd.base(), Direction::Reverse), code);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineCode {
    base: String,
    direction: Direction,
}

impl LineCode {
    /// Create a code for `base` in the given direction.
    pub fn new(base: impl Into<String>, direction: Direction) -> Self {
        Self {
            base: base.into(),
            direction,
        }
    }

    pub fn forward(base: impl Into<String>) -> Self {
        Self::new(base, Direction::Forward)
    }

    /// Parse a direction-tagged code. A trailing `-REV` selects the reverse direction.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let (base, direction) = match s.strip_suffix(REVERSE_SUFFIX) {
            Some(base) => (base, Direction::Reverse),
            None => (s, Direction::Forward),
        };

        if base.is_empty() {
            return Err(DomainError::InvalidLineCode(s.to_string()));
        }

        Ok(Self::new(base, direction))
    }

    /// The undirected line code.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Forward => f.write_str(&self.base),
            Direction::Reverse => write!(f, "{}{REVERSE_SUFFIX}", self.base),
        }
    }
}

/// A line: a named, ordered sequence of stations.
///
/// Invariants (checked by [`Line::new`]): the station list is not empty and
/// no two adjacent entries are the same station.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: u64,
    /// Undirected code, unique within a catalog.
    pub code: String,
    pub name: String,
    stations: Vec<StationCode>,
    /// Nominal length, as published. Not used for routing.
    pub length: f64,
}

impl Line {
    pub fn new(
        id: u64,
        code: impl Into<String>,
        name: impl Into<String>,
        stations: Vec<StationCode>,
        length: f64,
    ) -> Result<Self, DomainError> {
        let code = code.into();

        if code.is_empty() || code.ends_with(REVERSE_SUFFIX) {
            return Err(DomainError::InvalidLineCode(code));
        }

        if stations.is_empty() {
            return Err(DomainError::InvalidLine {
                code,
                reason: "no stations",
            });
        }

        if stations.windows(2).any(|w| w[0] == w[1]) {
            return Err(DomainError::InvalidLine {
                code,
                reason: "identical adjacent stations",
            });
        }

        Ok(Self {
            id,
            code,
            name: name.into(),
            stations,
            length,
        })
    }

    /// Stations in stored order.
    pub fn stations(&self) -> &[StationCode] {
        &self.stations
    }

    /// Stored index of a station on this line.
    pub fn position(&self, station: &StationCode) -> Option<usize> {
        self.stations.iter().position(|s| s == station)
    }

    /// Stations immediately before and after `index` in stored order.
    pub fn neighbours(&self, index: usize) -> impl Iterator<Item = StationCode> + '_ {
        let before = index.checked_sub(1).and_then(|i| self.stations.get(i));
        let after = self.stations.get(index + 1);
        before.into_iter().chain(after).copied()
    }

    /// Direction-tagged code for travelling from `from` to `to` on this line.
    ///
    /// Returns `None` if either station is not on the line.
    pub fn direction_code(&self, from: &StationCode, to: &StationCode) -> Option<LineCode> {
        let start = self.position(from)?;
        let end = self.position(to)?;
        Some(LineCode::new(
            self.code.clone(),
            Direction::between(start, end),
        ))
    }
}
