//! Departure boards.

use tracing::debug;

use crate::domain::{Departure, GlobalStationId, TransportType, join_codes};

use super::client::MvgApi;
use super::convert::{convert_departures, distinct_sorted};
use super::endpoint::Endpoint;
use super::error::MvgError;

/// Default number of departures (the API caps requests at 100).
pub const DEFAULT_LIMIT: u32 = 10;

/// Board size used to collect the lines and destinations serving a station.
pub const SERVED_LOOKAHEAD: u32 = 50;

impl MvgApi {
    /// Get the next departures for a station.
    ///
    /// # Arguments
    ///
    /// * `station_id` - Global station id, e.g. `de:09162:70`
    /// * `limit` - Number of departures to request
    /// * `offset_minutes` - Skip departures in the next N minutes (e.g. walking
    ///   time to the station)
    /// * `transport_types` - Only these types; [`TransportType::all`] for the
    ///   default
    ///
    /// The API applies `limit` and `offset_minutes`; the board is returned
    /// in the API's order without further filtering. A malformed
    /// `station_id` fails before any request is made.
    pub async fn departures(
        &self,
        station_id: &str,
        limit: u32,
        offset_minutes: i32,
        transport_types: &[TransportType],
    ) -> Result<Vec<Departure>, MvgError> {
        let station_id = GlobalStationId::parse(station_id)?;

        let value = self
            .call(
                Endpoint::Departures,
                &[
                    ("globalId", station_id.to_string()),
                    ("limit", limit.to_string()),
                    ("offsetInMinutes", offset_minutes.to_string()),
                    ("transportTypes", join_codes(transport_types)),
                ],
            )
            .await?;

        let departures = convert_departures(value)?;
        debug!(%station_id, count = departures.len(), "fetched departures");
        Ok(departures)
    }

    /// Lines departing from a station, sorted and de-duplicated.
    ///
    /// Collected from the next [`SERVED_LOOKAHEAD`] departures, so lines
    /// that don't run soon are missing.
    pub async fn served_lines(&self, station_id: &str) -> Result<Vec<String>, MvgError> {
        let board = self
            .departures(station_id, SERVED_LOOKAHEAD, 0, &TransportType::all())
            .await?;
        Ok(distinct_sorted(board.iter().map(|d| d.line.as_str())))
    }

    /// Final destinations of departures from a station, sorted and
    /// de-duplicated.
    pub async fn served_destinations(&self, station_id: &str) -> Result<Vec<String>, MvgError> {
        let board = self
            .departures(station_id, SERVED_LOOKAHEAD, 0, &TransportType::all())
            .await?;
        Ok(distinct_sorted(board.iter().map(|d| d.destination.as_str())))
    }
}
