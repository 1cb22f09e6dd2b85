//! MVG API response DTOs.
//!
//! These types map directly to the JSON of the current API revision and are
//! the only place that knows its field names. Fields the client doesn't
//! strictly need are `Option` or defaulted so that a missing one doesn't
//! reject the whole response.

use serde::Deserialize;

use crate::domain::Occupancy;

/// Location type marking a station in search results.
pub const LOCATION_TYPE_STATION: &str = "STATION";

/// One result of `/locations`.
///
/// Non-station results (addresses, points of interest) carry different
/// fields, so only the chosen result is decoded into this type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    #[serde(rename = "type")]
    pub location_type: String,

    /// Global station id; only present for stations.
    pub global_id: Option<String>,

    pub name: String,
    pub place: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One result of `/stations/nearby`, ordered by distance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStationDto {
    pub global_id: String,
    pub name: String,
    pub place: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Transport type codes serving the station, e.g. `["UBAHN", "BUS"]`.
    pub transport_types: Vec<String>,
}

/// One entry of `/departures`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDto {
    /// Planned departure, Unix epoch in milliseconds.
    pub planned_departure_time: i64,

    /// Expected departure, Unix epoch in milliseconds.
    pub realtime_departure_time: i64,

    /// Line label, e.g. "U3".
    pub label: String,

    pub destination: String,

    /// Transport type code, e.g. "UBAHN".
    pub transport_type: String,

    pub cancelled: bool,

    pub messages: Vec<String>,

    #[serde(default)]
    pub realtime: bool,

    pub delay_in_minutes: Option<i64>,

    #[serde(default)]
    pub occupancy: Occupancy,

    /// Platform number (numeric for rail, absent for most buses).
    pub platform: Option<serde_json::Value>,
}

/// One entry of the station directory `/stations`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStationDto {
    pub id: String,
    pub name: String,
    pub place: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Transport type codes serving the station.
    #[serde(default)]
    pub products: Vec<String>,
}

/// One entry of the line directory `/lines`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    #[serde(alias = "name")]
    pub label: String,

    pub transport_type: String,

    pub network: Option<String>,

    /// Numeric in some revisions, string in others.
    pub diva_id: Option<serde_json::Value>,
}
