//! Endpoint registry for the MVG API.
//!
//! This table pins the client to one API revision. Paths and parameter
//! names have changed before (`/location` became `/locations`,
//! `/station/nearby` became `/stations/nearby`), so a future upstream change
//! should only need an edit here and in [`super::types`].

/// Production base URL of the search/departure service.
pub const DEFAULT_FIB_BASE_URL: &str = "https://www.mvg.de/api/bgw-pt/v3";

/// Production base URL of the station/line directory.
pub const DEFAULT_ZDM_BASE_URL: &str = "https://www.mvg.de/.rest/zdm";

/// The two services the API is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// Location search, nearby stations, departures.
    Fib,
    /// Station and line directory.
    Zdm,
}

/// A logical API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Free-text location search, also used to look up a station by id.
    Locations,
    /// Stations near a coordinate, nearest first.
    NearbyStations,
    /// Departure board of one station.
    Departures,
    /// Every known global station id.
    StationIds,
    /// The station directory.
    Stations,
    /// The line directory.
    Lines,
}

impl Endpoint {
    /// Which service hosts the endpoint.
    pub fn base(&self) -> Base {
        match self {
            Endpoint::Locations | Endpoint::NearbyStations | Endpoint::Departures => Base::Fib,
            Endpoint::StationIds | Endpoint::Stations | Endpoint::Lines => Base::Zdm,
        }
    }

    /// Path relative to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Locations => "/locations",
            Endpoint::NearbyStations => "/stations/nearby",
            Endpoint::Departures => "/departures",
            Endpoint::StationIds => "/mvgStationGlobalIds",
            Endpoint::Stations => "/stations",
            Endpoint::Lines => "/lines",
        }
    }

    /// Query parameters the endpoint accepts.
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            Endpoint::Locations => &["query"],
            Endpoint::NearbyStations => &["latitude", "longitude"],
            Endpoint::Departures => &["globalId", "limit", "offsetInMinutes", "transportTypes"],
            Endpoint::StationIds | Endpoint::Stations | Endpoint::Lines => &[],
        }
    }

    /// Whether `param` is one of [`Endpoint::params`].
    pub fn accepts(&self, param: &str) -> bool {
        self.params().contains(&param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bases() {
        assert_eq!(Endpoint::Departures.base(), Base::Fib);
        assert_eq!(Endpoint::Locations.base(), Base::Fib);
        assert_eq!(Endpoint::NearbyStations.base(), Base::Fib);
        assert_eq!(Endpoint::StationIds.base(), Base::Zdm);
        assert_eq!(Endpoint::Lines.base(), Base::Zdm);
    }

    #[test]
    fn departure_params() {
        assert!(Endpoint::Departures.accepts("globalId"));
        assert!(Endpoint::Departures.accepts("offsetInMinutes"));
        assert!(!Endpoint::Departures.accepts("query"));
        assert!(!Endpoint::Stations.accepts("query"));
    }

    #[test]
    fn paths_are_absolute() {
        for e in [
            Endpoint::Locations,
            Endpoint::NearbyStations,
            Endpoint::Departures,
            Endpoint::StationIds,
            Endpoint::Stations,
            Endpoint::Lines,
        ] {
            assert!(e.path().starts_with('/'), "{e:?}");
        }
    }
}
