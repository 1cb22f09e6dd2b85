//! Global station identifier type.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static GLOBAL_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Literal pattern; compilation cannot fail.
    Regex::new(r"^de:[0-9]{2,5}:[0-9]+$").unwrap()
});

/// Error returned when parsing an invalid global station id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid global station id {input:?}: expected de:<area>:<station>")]
pub struct InvalidStationId {
    input: String,
}

impl InvalidStationId {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Returns true if `id` is a syntactically valid global station id.
///
/// The check is purely syntactic and never touches the network. Use
/// [`MvgApi::station_exists`](crate::mvg::MvgApi::station_exists) to also
/// check that the station is known upstream.
pub fn is_valid_station_id(id: &str) -> bool {
    GLOBAL_ID_PATTERN.is_match(id)
}

/// A VDV-432 style global station id, e.g. `de:09162:70`.
///
/// The id is made of the country code `de`, an area of 2 to 5 digits and a
/// station number of at least one digit. Any `GlobalStationId` value is
/// valid by construction.
///
/// # Examples
///
/// ```
/// use mvg_api::domain::GlobalStationId;
///
/// let uni = GlobalStationId::parse("de:09162:70").unwrap();
/// assert_eq!(uni.as_str(), "de:09162:70");
///
/// // Station names are not ids
/// assert!(GlobalStationId::parse("Universität, München").is_err());
///
/// // Area must have 2 to 5 digits
/// assert!(GlobalStationId::parse("de:9:70").is_err());
/// assert!(GlobalStationId::parse("de:091620:70").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlobalStationId(String);

impl GlobalStationId {
    /// Parse a global station id. Surrounding whitespace is not accepted.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if !is_valid_station_id(s) {
            return Err(InvalidStationId {
                input: s.to_string(),
            });
        }
        Ok(GlobalStationId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GlobalStationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GlobalStationId({})", self.0)
    }
}

impl fmt::Display for GlobalStationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for GlobalStationId {
    type Err = InvalidStationId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
