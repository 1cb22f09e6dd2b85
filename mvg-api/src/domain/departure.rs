//! Departure records.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::TransportType;

/// How full a vehicle is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Occupancy {
    Low,
    Medium,
    High,
    /// Not reported, or a level this client doesn't know.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A single entry of a departure board.
///
/// Times are Unix timestamps in whole seconds. Boards keep the order the API
/// returned them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Departure {
    /// Real-time (expected) departure.
    pub time: i64,

    /// Planned departure.
    pub planned: i64,

    /// Line label, e.g. `U3`.
    pub line: String,

    pub destination: String,

    pub transport_type: TransportType,

    pub cancelled: bool,

    /// Rider messages, passed through as sent.
    pub messages: Vec<String>,

    /// Whether `time` is based on live data rather than the timetable.
    pub realtime: bool,

    /// Delay as reported by the API.
    pub delay_minutes: Option<i64>,

    pub occupancy: Occupancy,

    pub platform: Option<String>,
}

impl Departure {
    /// Display name of the transport type, e.g. `U-Bahn`.
    pub fn type_name(&self) -> &'static str {
        self.transport_type.name()
    }

    pub fn icon(&self) -> &'static str {
        self.transport_type.icon()
    }

    /// Actual minus planned departure.
    pub fn delay(&self) -> Duration {
        Duration::seconds(self.time - self.planned)
    }

    /// Real-time departure as a UTC datetime.
    pub fn time_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }

    /// Planned departure as a UTC datetime.
    pub fn planned_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.planned, 0)
    }
}
