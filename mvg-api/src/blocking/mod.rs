//! Blocking wrappers around the async client.
//!
//! Every call runs the matching async operation to completion and returns
//! its result or error unchanged. This works from plain threads and from
//! inside a Tokio runtime; see [`Executor`] for how.
//!
//! ```no_run
//! use mvg_api::MvgConfig;
//! use mvg_api::blocking::BlockingMvgApi;
//! use mvg_api::domain::TransportType;
//!
//! let api = BlockingMvgApi::new(MvgConfig::new())?;
//! if let Some(station) = api.resolve_station("Universität, München")? {
//!     for departure in api.departures(&station.id, 5, 0, &TransportType::all())? {
//!         println!("{} {} {}", departure.time, departure.line, departure.destination);
//!     }
//! }
//! # Ok::<(), mvg_api::MvgError>(())
//! ```

mod executor;
mod worker;

use std::sync::Arc;

pub use executor::Executor;
pub use worker::BackgroundWorker;

use crate::client::MvgClient;
use crate::domain::{Departure, GlobalStationId, Line, Station, TransportType};
use crate::mvg::{MvgApi, MvgConfig, MvgError};

/// Blocking counterpart of [`MvgApi`].
#[derive(Debug, Clone)]
pub struct BlockingMvgApi {
    api: MvgApi,
    executor: Executor,
}

impl BlockingMvgApi {
    /// Create a client using the process-wide background worker.
    ///
    /// Connection pooling is turned off, since calls made outside a runtime
    /// each get a runtime of their own.
    pub fn new(config: MvgConfig) -> Result<Self, MvgError> {
        Self::with_worker(config, BackgroundWorker::shared())
    }

    /// Create a client that falls back to `worker` inside async contexts.
    pub fn with_worker(config: MvgConfig, worker: Arc<BackgroundWorker>) -> Result<Self, MvgError> {
        let api = MvgApi::new(config.with_connection_reuse(false))?;
        Ok(Self {
            api,
            executor: Executor::new(worker),
        })
    }

    /// The async client behind this one.
    pub fn api(&self) -> &MvgApi {
        &self.api
    }

    pub fn worker(&self) -> &Arc<BackgroundWorker> {
        self.executor.worker()
    }

    /// See [`MvgApi::resolve_station`].
    pub fn resolve_station(&self, query: &str) -> Result<Option<Station>, MvgError> {
        let api = self.api.clone();
        let query = query.to_string();
        self.executor
            .run(async move { api.resolve_station(&query).await })
    }

    /// See [`MvgApi::resolve_nearby_station`].
    pub fn resolve_nearby_station(
        &self,
        latitude: f64,
        longitude: f64,
        transport_types: &[TransportType],
    ) -> Result<Option<Station>, MvgError> {
        let api = self.api.clone();
        let types = transport_types.to_vec();
        self.executor.run(async move {
            api.resolve_nearby_station(latitude, longitude, &types)
                .await
        })
    }

    /// See [`MvgApi::resolve_nearby_stations`].
    pub fn resolve_nearby_stations(
        &self,
        latitude: f64,
        longitude: f64,
        transport_types: &[TransportType],
        limit: Option<usize>,
    ) -> Result<Vec<Station>, MvgError> {
        let api = self.api.clone();
        let types = transport_types.to_vec();
        self.executor.run(async move {
            api.resolve_nearby_stations(latitude, longitude, &types, limit)
                .await
        })
    }

    pub fn station_ids(&self) -> Result<Vec<String>, MvgError> {
        let api = self.api.clone();
        self.executor.run(async move { api.station_ids().await })
    }

    pub fn station_exists(&self, station_id: &str) -> Result<bool, MvgError> {
        let api = self.api.clone();
        let station_id = station_id.to_string();
        self.executor
            .run(async move { api.station_exists(&station_id).await })
    }

    pub fn stations(&self) -> Result<Vec<Station>, MvgError> {
        let api = self.api.clone();
        self.executor.run(async move { api.stations().await })
    }

    pub fn lines(&self) -> Result<Vec<Line>, MvgError> {
        let api = self.api.clone();
        self.executor.run(async move { api.lines().await })
    }

    /// See [`MvgApi::departures`].
    pub fn departures(
        &self,
        station_id: &str,
        limit: u32,
        offset_minutes: i32,
        transport_types: &[TransportType],
    ) -> Result<Vec<Departure>, MvgError> {
        let api = self.api.clone();
        let station_id = station_id.to_string();
        let types = transport_types.to_vec();
        self.executor.run(async move {
            api.departures(&station_id, limit, offset_minutes, &types)
                .await
        })
    }

    pub fn served_lines(&self, station_id: &str) -> Result<Vec<String>, MvgError> {
        let api = self.api.clone();
        let station_id = station_id.to_string();
        self.executor
            .run(async move { api.served_lines(&station_id).await })
    }

    pub fn served_destinations(&self, station_id: &str) -> Result<Vec<String>, MvgError> {
        let api = self.api.clone();
        let station_id = station_id.to_string();
        self.executor
            .run(async move { api.served_destinations(&station_id).await })
    }
}

/// Blocking counterpart of [`MvgClient`].
#[derive(Debug, Clone)]
pub struct BlockingMvgClient {
    client: MvgClient,
    executor: Executor,
}

impl BlockingMvgClient {
    /// Bind to the station with global id `station_id`. See [`MvgClient::new`].
    pub fn new(api: &BlockingMvgApi, station_id: &str) -> Result<Self, MvgError> {
        let inner = api.api.clone();
        let station_id = station_id.to_string();
        let client = api
            .executor
            .run(async move { MvgClient::new(inner, &station_id).await })?;
        Ok(Self {
            client,
            executor: api.executor.clone(),
        })
    }

    pub fn station_id(&self) -> &GlobalStationId {
        self.client.station_id()
    }

    pub fn station(&self) -> &Station {
        self.client.station()
    }

    pub fn departures(
        &self,
        limit: u32,
        offset_minutes: i32,
        transport_types: &[TransportType],
    ) -> Result<Vec<Departure>, MvgError> {
        let client = self.client.clone();
        let types = transport_types.to_vec();
        self.executor
            .run(async move { client.departures(limit, offset_minutes, &types).await })
    }

    pub fn lines(&self) -> Result<Vec<String>, MvgError> {
        let client = self.client.clone();
        self.executor.run(async move { client.lines().await })
    }

    pub fn destinations(&self) -> Result<Vec<String>, MvgError> {
        let client = self.client.clone();
        self.executor.run(async move { client.destinations().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvg::ErrorKind;
    use mockito::{Matcher, Server, ServerGuard};

    fn config_for(server: &ServerGuard) -> MvgConfig {
        MvgConfig::new()
            .with_base_url(server.url())
            .with_env_proxy(false)
    }

    const LOCATIONS: &str = r#"[{"type": "STATION", "globalId": "de:09162:70",
        "name": "Universität", "place": "München", "latitude": 48.15007, "longitude": 11.581}]"#;

    fn board(label: &str) -> String {
        format!(
            r#"[{{"plannedDepartureTime": 1668524460000, "realtimeDepartureTime": 1668524580000,
                 "transportType": "UBAHN", "label": "{label}", "destination": "Moosach",
                 "cancelled": false, "messages": []}}]"#
        )
    }

    #[test]
    fn works_without_runtime() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/locations")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LOCATIONS)
            .create();
        let worker = Arc::new(BackgroundWorker::new());
        let api = BlockingMvgApi::with_worker(config_for(&server), worker.clone()).unwrap();

        let station = api
            .resolve_station("Universität, München")
            .unwrap()
            .unwrap();

        assert_eq!(station.id, "de:09162:70");
        assert!(!worker.is_running());
    }

    #[test]
    fn errors_are_preserved_without_runtime() {
        let server = Server::new();
        let api = BlockingMvgApi::with_worker(
            config_for(&server),
            Arc::new(BackgroundWorker::new()),
        )
        .unwrap();

        let err = api
            .departures("not-an-id", 10, 0, &TransportType::all())
            .unwrap_err();

        assert!(matches!(err, MvgError::InvalidStationId(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_calls_inside_runtime_share_one_worker() {
        let mut server = Server::new_async().await;
        let mut mocks = Vec::new();
        for (id, label) in [("de:09162:70", "U3"), ("de:09162:6", "U4")] {
            let mock = server
                .mock("GET", "/departures")
                .match_query(Matcher::UrlEncoded("globalId".into(), id.into()))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(board(label))
                .create_async()
                .await;
            mocks.push(mock);
        }
        let worker = Arc::new(BackgroundWorker::new());
        let api = BlockingMvgApi::with_worker(config_for(&server), worker.clone()).unwrap();

        let first = {
            let api = api.clone();
            tokio::spawn(async move {
                api.departures("de:09162:70", 10, 0, &TransportType::all())
            })
        };
        let second = {
            let api = api.clone();
            tokio::spawn(async move {
                api.departures("de:09162:6", 10, 0, &TransportType::all())
            })
        };

        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();

        assert_eq!(first[0].line, "U3");
        assert_eq!(second[0].line, "U4");
        assert_eq!(worker.launches(), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn works_inside_current_thread_runtime() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/mvgStationGlobalIds")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"["de:09162:70"]"#)
            .create_async()
            .await;
        let worker = Arc::new(BackgroundWorker::new());
        let api = BlockingMvgApi::with_worker(config_for(&server), worker.clone()).unwrap();

        assert!(api.station_exists("de:09162:70").unwrap());
        assert_eq!(worker.launches(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn errors_are_preserved_inside_runtime() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/departures")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        let api = BlockingMvgApi::with_worker(
            config_for(&server),
            Arc::new(BackgroundWorker::new()),
        )
        .unwrap();

        let err = api
            .departures("de:09162:70", 10, 0, &TransportType::all())
            .unwrap_err();

        assert!(matches!(err, MvgError::Status { .. }));
        assert_eq!(err.kind(), ErrorKind::Communication);
    }

    #[test]
    fn bound_client() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/locations")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LOCATIONS)
            .create();
        let _mock = server
            .mock("GET", "/departures")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(board("U6"))
            .expect(2)
            .create();
        let api = BlockingMvgApi::with_worker(
            config_for(&server),
            Arc::new(BackgroundWorker::new()),
        )
        .unwrap();

        let client = BlockingMvgClient::new(&api, "de:09162:70").unwrap();

        assert_eq!(client.station().name, "Universität");
        assert_eq!(client.departures(1, 0, &[TransportType::UBahn]).unwrap().len(), 1);
        assert_eq!(client.lines().unwrap(), vec!["U6"]);
    }
}
