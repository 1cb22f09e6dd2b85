//! MVG client error types.

use crate::domain::InvalidStationId;

use super::convert::ConversionError;

/// Broad classes of failure, so callers can tell "bad input" from "could not
/// reach the service" from "reached the service but it changed shape".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied something unusable. Raised before any request.
    CallerInput,
    /// The API could not be reached or answered with an unexpected status or
    /// content type.
    Communication,
    /// The API answered, but the payload didn't have the expected shape.
    DataParsing,
    /// The blocking facade could not drive the request to completion.
    Executor,
}

/// Errors from the MVG client.
#[derive(Debug, thiserror::Error)]
pub enum MvgError {
    /// Station id doesn't match `de:<area>:<station>`
    #[error(transparent)]
    InvalidStationId(#[from] InvalidStationId),

    /// Station id is well formed but the API doesn't know it
    #[error("station not found: {0}")]
    StationNotFound(String),

    /// API answered with a status other than 200
    #[error("bad API call: got response ({status}) from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// API answered with something other than JSON
    #[error("bad API call: got content type {content_type} from {url}")]
    ContentType { content_type: String, url: String },

    /// Request failed (network error, timeout, undecodable body, etc.)
    #[error("bad API call: got {} error from {url}", describe(.source))]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response JSON didn't match the expected shape
    #[error("bad API call: could not parse {context}: {message}")]
    Parse {
        context: &'static str,
        message: String,
    },

    /// Blocking facade failure (runtime start-up, worker task died)
    #[error("executor error: {0}")]
    Executor(String),
}

impl MvgError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MvgError::InvalidStationId(_) | MvgError::StationNotFound(_) => {
                ErrorKind::CallerInput
            }
            MvgError::Status { .. } | MvgError::ContentType { .. } | MvgError::Http { .. } => {
                ErrorKind::Communication
            }
            MvgError::Parse { .. } => ErrorKind::DataParsing,
            MvgError::Executor(_) => ErrorKind::Executor,
        }
    }

    pub(crate) fn parse(context: &'static str, err: impl std::fmt::Display) -> Self {
        MvgError::Parse {
            context,
            message: err.to_string(),
        }
    }
}

impl From<ConversionError> for MvgError {
    fn from(err: ConversionError) -> Self {
        MvgError::parse(err.context(), err)
    }
}

/// Short name for the class of a reqwest failure.
fn describe(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_redirect() {
        "redirect"
    } else if err.is_decode() {
        "decode"
    } else if err.is_body() {
        "body"
    } else if err.is_builder() {
        "builder"
    } else {
        "request"
    }
}
