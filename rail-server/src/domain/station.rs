//! Station code types.

use std::fmt;

/// Longest station code we accept.
const MAX_LEN: usize = 8;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid station code.
///
/// Station codes are short identifiers (1 to 8 characters) made of
/// uppercase ASCII letters and digits, e.g. `A` or `KGX`. The code is
/// stored inline so the type is `Copy` and cheap to hash, which matters
/// because the route search clones paths of these constantly.
///
/// # Examples
///
/// ```
/// use rail_server::domain::StationCode;
///
/// let a = StationCode::parse("A").unwrap();
/// assert_eq!(a.as_str(), "A");
///
/// // Lowercase is rejected by `parse`...
/// assert!(StationCode::parse("a").is_err());
///
/// // ...but accepted by `parse_normalized`
/// assert_eq!(StationCode::parse_normalized(" a ").unwrap(), a);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode {
    bytes: [u8; MAX_LEN],
    len: u8,
}

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be 1 to 8 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let input = s.as_bytes();

        if input.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        if input.len() > MAX_LEN {
            return Err(InvalidStationCode {
                reason: "must be at most 8 characters",
            });
        }

        let mut bytes = [0u8; MAX_LEN];
        for (slot, &b) in bytes.iter_mut().zip(input) {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidStationCode {
                    reason: "must be uppercase ASCII letters A-Z or digits",
                });
            }
            *slot = b;
        }

        Ok(StationCode {
            bytes,
            len: input.len() as u8,
        })
    }

    /// Parse a station code after trimming whitespace and uppercasing.
    ///
    /// Used for codes coming from users, where `a` and `A` mean the same station.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII letters and digits are ever stored.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A district served by the network: a station code with a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct District {
    pub code: StationCode,
    pub name: String,
}

impl District {
    pub fn new(code: StationCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    /// The placeholder district used when no directory is supplied.
    pub fn unnamed(code: StationCode) -> Self {
        Self::new(code, format!("District {code}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StationCode::parse("A").is_ok());
        assert!(StationCode::parse("Y").is_ok());
        assert!(StationCode::parse("KGX").is_ok());
        assert!(StationCode::parse("ST12").is_ok());
        assert!(StationCode::parse("ABCDEFGH").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(StationCode::parse("a").is_err());
        assert!(StationCode::parse("Kgx").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(StationCode::parse("").is_err());
        assert!(StationCode::parse("ABCDEFGHI").is_err());
    }

    #[test]
    fn reject_punctuation() {
        assert!(StationCode::parse("A-B").is_err());
        assert!(StationCode::parse("A B").is_err());
        assert!(StationCode::parse("Ä").is_err());
    }

    #[test]
    fn normalized_trims_and_uppercases() {
        let c = StationCode::parse_normalized("  kgx\n").unwrap();
        assert_eq!(c.as_str(), "KGX");
        assert!(StationCode::parse_normalized("   ").is_err());
    }

    #[test]
    fn display_and_debug() {
        let c = StationCode::parse("C").unwrap();
        assert_eq!(format!("{c}"), "C");
        assert_eq!(format!("{c:?}"), "StationCode(C)");
    }

    #[test]
    fn codes_of_different_length_differ() {
        let a = StationCode::parse("A").unwrap();
        let aa = StationCode::parse("AA").unwrap();
        assert_ne!(a, aa);
        assert!(a < aa);
    }

    #[test]
    fn unnamed_district() {
        let d = District::unnamed(StationCode::parse("Q").unwrap());
        assert_eq!(d.name, "District Q");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Z0-9]{1,8}") {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Lowercase letters are always rejected
        #[test]
        fn lowercase_rejected(s in "[a-z]{1,8}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }

        /// Normalization accepts any casing of a valid code
        #[test]
        fn normalized_accepts_any_case(s in "[a-zA-Z]{1,8}") {
            let code = StationCode::parse_normalized(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.to_ascii_uppercase());
        }
    }
}
