//! Client bound to a single station.

use crate::domain::{Departure, GlobalStationId, Station, TransportType};
use crate::mvg::{MvgApi, MvgError};

/// An [`MvgApi`] bound to one resolved station.
///
/// Construction checks the id format and looks the station up, so a value of
/// this type always refers to a station the API knows about.
#[derive(Debug, Clone)]
pub struct MvgClient {
    api: MvgApi,
    station_id: GlobalStationId,
    station: Station,
}

impl MvgClient {
    /// Bind `api` to the station with global id `station_id`.
    ///
    /// Fails with [`MvgError::InvalidStationId`] if the id is malformed and
    /// with [`MvgError::StationNotFound`] if the lookup finds nothing.
    pub async fn new(api: MvgApi, station_id: &str) -> Result<Self, MvgError> {
        let station_id = GlobalStationId::parse(station_id.trim())?;
        let station = api
            .resolve_station(station_id.as_str())
            .await?
            .ok_or_else(|| MvgError::StationNotFound(station_id.to_string()))?;

        Ok(Self {
            api,
            station_id,
            station,
        })
    }

    pub fn station_id(&self) -> &GlobalStationId {
        &self.station_id
    }

    /// The station as resolved at construction.
    pub fn station(&self) -> &Station {
        &self.station
    }

    pub fn api(&self) -> &MvgApi {
        &self.api
    }

    /// Next departures from this station. See [`MvgApi::departures`].
    pub async fn departures(
        &self,
        limit: u32,
        offset_minutes: i32,
        transport_types: &[TransportType],
    ) -> Result<Vec<Departure>, MvgError> {
        self.api
            .departures(
                self.station_id.as_str(),
                limit,
                offset_minutes,
                transport_types,
            )
            .await
    }

    /// Lines departing from this station soon.
    pub async fn lines(&self) -> Result<Vec<String>, MvgError> {
        self.api.served_lines(self.station_id.as_str()).await
    }

    /// Destinations of departures from this station soon.
    pub async fn destinations(&self) -> Result<Vec<String>, MvgError> {
        self.api.served_destinations(self.station_id.as_str()).await
    }
}
