//! Station resolver and directory lookups.

use tracing::debug;

use crate::domain::{Line, Station, TransportType, is_valid_station_id};

use super::client::MvgApi;
use super::convert::{
    convert_directory_stations, convert_lines, convert_location_search, convert_nearby_stations,
    convert_station_ids,
};
use super::endpoint::Endpoint;
use super::error::MvgError;

impl MvgApi {
    /// Find a station by name and place or by global station id.
    ///
    /// For a name like `"Universität, München"` the first station in the
    /// search results is returned. For an id like `"de:09162:70"` the id is
    /// kept and name, place and coordinates are looked up. Returns `Ok(None)`
    /// if nothing matches.
    pub async fn resolve_station(&self, query: &str) -> Result<Option<Station>, MvgError> {
        let query = query.trim();
        let value = self
            .call(Endpoint::Locations, &[("query", query.to_string())])
            .await?;
        let station = convert_location_search(value, query)?;
        debug!(query, found = ?station.as_ref().map(|s| &s.id), "resolved station");
        Ok(station)
    }

    /// Find the nearest station served by any of `transport_types`.
    ///
    /// Coordinates are passed through unchecked. Use [`TransportType::all`]
    /// for the default filter.
    pub async fn resolve_nearby_station(
        &self,
        latitude: f64,
        longitude: f64,
        transport_types: &[TransportType],
    ) -> Result<Option<Station>, MvgError> {
        let stations = self
            .resolve_nearby_stations(latitude, longitude, transport_types, Some(1))
            .await?;
        Ok(stations.into_iter().next())
    }

    /// Find stations near a coordinate, nearest first.
    ///
    /// Only stations served by at least one of `transport_types` are kept.
    /// `limit` caps the number of results; `None` returns all of them.
    pub async fn resolve_nearby_stations(
        &self,
        latitude: f64,
        longitude: f64,
        transport_types: &[TransportType],
        limit: Option<usize>,
    ) -> Result<Vec<Station>, MvgError> {
        let value = self
            .call(
                Endpoint::NearbyStations,
                &[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                ],
            )
            .await?;
        Ok(convert_nearby_stations(value, transport_types, limit)?)
    }

    /// All known global station ids, sorted.
    pub async fn station_ids(&self) -> Result<Vec<String>, MvgError> {
        let value = self.call(Endpoint::StationIds, &[]).await?;
        Ok(convert_station_ids(value)?)
    }

    /// Check that `station_id` is well formed and known to the API.
    ///
    /// Malformed ids return `Ok(false)` without a request.
    pub async fn station_exists(&self, station_id: &str) -> Result<bool, MvgError> {
        if !is_valid_station_id(station_id) {
            return Ok(false);
        }
        let ids = self.station_ids().await?;
        Ok(ids.binary_search_by(|id| id.as_str().cmp(station_id)).is_ok())
    }

    /// The full station directory.
    pub async fn stations(&self) -> Result<Vec<Station>, MvgError> {
        let value = self.call(Endpoint::Stations, &[]).await?;
        Ok(convert_directory_stations(value)?)
    }

    /// The full line directory.
    pub async fn lines(&self) -> Result<Vec<Line>, MvgError> {
        let value = self.call(Endpoint::Lines, &[]).await?;
        Ok(convert_lines(value)?)
    }
}
