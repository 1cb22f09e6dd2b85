//! MVG HTTP transport.
//!
//! One GET per call, no retries. A response is only accepted with status 200
//! and a JSON content type; everything else becomes a communication error
//! carrying the URL.

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, warn};

use super::endpoint::{Base, DEFAULT_FIB_BASE_URL, DEFAULT_ZDM_BASE_URL, Endpoint};
use super::error::MvgError;

/// Default User-Agent header.
const DEFAULT_USER_AGENT: &str = concat!("mvg-api/", env!("CARGO_PKG_VERSION"));

/// How much of an error body to keep for diagnostics.
const ERROR_BODY_CHARS: usize = 500;

/// Configuration for the MVG client.
#[derive(Debug, Clone)]
pub struct MvgConfig {
    /// Base URL of the search/departure service
    pub fib_base_url: String,
    /// Base URL of the station/line directory
    pub zdm_base_url: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub use_env_proxy: bool,
    /// Keep idle connections open between calls
    pub reuse_connections: bool,
}

impl MvgConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            fib_base_url: DEFAULT_FIB_BASE_URL.to_string(),
            zdm_base_url: DEFAULT_ZDM_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            use_env_proxy: true,
            reuse_connections: true,
        }
    }

    /// Set a custom base URL for the search/departure service (for testing).
    pub fn with_fib_base_url(mut self, url: impl Into<String>) -> Self {
        self.fib_base_url = url.into();
        self
    }

    /// Set a custom base URL for the directory service (for testing).
    pub fn with_zdm_base_url(mut self, url: impl Into<String>) -> Self {
        self.zdm_base_url = url.into();
        self
    }

    /// Point both services at the same base URL (for testing).
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.with_fib_base_url(url.clone()).with_zdm_base_url(url)
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable proxies taken from the environment.
    pub fn with_env_proxy(mut self, enabled: bool) -> Self {
        self.use_env_proxy = enabled;
        self
    }

    /// Enable or disable the idle connection pool.
    ///
    /// Pooled connections belong to the runtime that opened them, so a
    /// client whose calls each run on a short-lived runtime should not pool.
    pub fn with_connection_reuse(mut self, enabled: bool) -> Self {
        self.reuse_connections = enabled;
        self
    }
}

impl Default for MvgConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Async MVG API client.
///
/// Cheap to clone; clones share the connection pool. The station resolver
/// and departure normalizer are implemented on this type in
/// [`super::stations`] and [`super::departures`].
#[derive(Debug, Clone)]
pub struct MvgApi {
    http: reqwest::Client,
    fib_base_url: String,
    zdm_base_url: String,
}

impl MvgApi {
    /// Create a new client with the given configuration.
    pub fn new(config: MvgConfig) -> Result<Self, MvgError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        if !config.reuse_connections {
            builder = builder.pool_max_idle_per_host(0);
        }
        let http = builder.build().map_err(|source| MvgError::Http {
            url: String::new(),
            source,
        })?;

        Ok(Self {
            http,
            fib_base_url: config.fib_base_url,
            zdm_base_url: config.zdm_base_url,
        })
    }

    /// Base URL currently used for `base`.
    pub fn base_url(&self, base: Base) -> &str {
        match base {
            Base::Fib => &self.fib_base_url,
            Base::Zdm => &self.zdm_base_url,
        }
    }

    /// Full URL of `endpoint`, without query string.
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.base_url(endpoint.base()).trim_end_matches('/'),
            endpoint.path()
        )
    }

    /// Call `endpoint` with the given query parameters and return the JSON.
    ///
    /// Parameters the endpoint doesn't accept are dropped.
    pub async fn call(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<Value, MvgError> {
        let url = self.url(endpoint);

        let query: Vec<(&str, &str)> = params
            .iter()
            .filter(|(name, _)| {
                let accepted = endpoint.accepts(name);
                if !accepted {
                    warn!(?endpoint, param = *name, "dropping unsupported query parameter");
                }
                accepted
            })
            .map(|(name, value)| (*name, value.as_str()))
            .collect();

        debug!(%url, ?query, "calling MVG API");

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(&query);
        }

        let response = request.send().await.map_err(|source| MvgError::Http {
            url: url.clone(),
            source,
        })?;

        let url = response.url().to_string();
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "MVG API returned an error status");
            return Err(MvgError::Status {
                status: status.as_u16(),
                url,
                body: body.chars().take(ERROR_BODY_CHARS).collect(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !is_json(&content_type) {
            warn!(%url, %content_type, "MVG API returned a non-JSON response");
            return Err(MvgError::ContentType {
                content_type: if content_type.is_empty() {
                    "<none>".to_string()
                } else {
                    content_type
                },
                url,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| MvgError::Http { url, source })
    }
}

/// Whether a Content-Type header names `application/json`, ignoring
/// parameters such as `charset`.
fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvg::ErrorKind;
    use mockito::{Matcher, Server, ServerGuard};

    fn api_for(server: &ServerGuard) -> MvgApi {
        MvgApi::new(MvgConfig::new().with_base_url(server.url()).with_env_proxy(false)).unwrap()
    }

    #[test]
    fn config_builder() {
        let config = MvgConfig::new()
            .with_fib_base_url("http://localhost:8080/fib")
            .with_zdm_base_url("http://localhost:8080/zdm")
            .with_user_agent("test-agent")
            .with_env_proxy(false)
            .with_connection_reuse(false);

        assert_eq!(config.fib_base_url, "http://localhost:8080/fib");
        assert_eq!(config.zdm_base_url, "http://localhost:8080/zdm");
        assert_eq!(config.user_agent, "test-agent");
        assert!(!config.use_env_proxy);
        assert!(!config.reuse_connections);
    }

    #[test]
    fn config_defaults() {
        let config = MvgConfig::default();

        assert_eq!(config.fib_base_url, DEFAULT_FIB_BASE_URL);
        assert_eq!(config.zdm_base_url, DEFAULT_ZDM_BASE_URL);
        assert!(config.user_agent.starts_with("mvg-api/"));
        assert!(config.use_env_proxy);
        assert!(config.reuse_connections);
    }

    #[test]
    fn urls_from_registry() {
        let api = MvgApi::new(MvgConfig::new().with_fib_base_url("http://localhost:1234/v3/"))
            .unwrap();

        assert_eq!(
            api.url(Endpoint::Departures),
            "http://localhost:1234/v3/departures"
        );
        assert_eq!(
            api.url(Endpoint::StationIds),
            "https://www.mvg.de/.rest/zdm/mvgStationGlobalIds"
        );
    }

    #[test]
    fn json_content_types() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("Application/JSON"));
        assert!(!is_json("text/html"));
        assert!(!is_json("application/jsonp"));
        assert!(!is_json(""));
    }

    #[tokio::test]
    async fn call_returns_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/stations/nearby")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("latitude".into(), "48.1".into()),
                Matcher::UrlEncoded("longitude".into(), "11.5".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"globalId": "de:09162:1480"}]"#)
            .create_async()
            .await;

        let value = api_for(&server)
            .call(
                Endpoint::NearbyStations,
                &[("latitude", "48.1".into()), ("longitude", "11.5".into())],
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(value[0]["globalId"], "de:09162:1480");
    }

    #[tokio::test]
    async fn unsupported_params_are_dropped() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/locations")
            .match_query(Matcher::Exact("query=Marienplatz".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        api_for(&server)
            .call(
                Endpoint::Locations,
                &[("query", "Marienplatz".into()), ("limit", "5".into())],
            )
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_is_communication_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/lines")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = api_for(&server).call(Endpoint::Lines, &[]).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Communication);
        match err {
            MvgError::Status { status, url, body } => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/lines"));
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_is_communication_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/stations")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html></html>")
            .create_async()
            .await;

        let err = api_for(&server)
            .call(Endpoint::Stations, &[])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Communication);
        assert!(err.to_string().contains("text/html"));
        assert!(err.to_string().contains("/stations"));
    }

    #[tokio::test]
    async fn json_with_charset_is_accepted() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/mvgStationGlobalIds")
            .with_status(200)
            .with_header("content-type", "application/json;charset=UTF-8")
            .with_body(r#"["de:09162:70"]"#)
            .create_async()
            .await;

        let value = api_for(&server)
            .call(Endpoint::StationIds, &[])
            .await
            .unwrap();

        assert_eq!(value, serde_json::json!(["de:09162:70"]));
    }

    #[tokio::test]
    async fn broken_json_is_communication_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/lines")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[{")
            .create_async()
            .await;

        let err = api_for(&server).call(Endpoint::Lines, &[]).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Communication);
        assert!(matches!(err, MvgError::Http { .. }));
    }

    #[tokio::test]
    async fn connection_failure_is_communication_error() {
        // Nothing listens on port 1
        let api = MvgApi::new(
            MvgConfig::new()
                .with_base_url("http://127.0.0.1:1")
                .with_env_proxy(false),
        )
        .unwrap();

        let err = api.call(Endpoint::Lines, &[]).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Communication);
        assert!(err.to_string().contains("http://127.0.0.1:1/lines"));
    }
}
