//! MVG API client.
//!
//! This module provides an async HTTP client for the public API of the
//! Münchner Verkehrsgesellschaft (MVG) at <https://www.mvg.de>.
//!
//! Key characteristics of the API:
//! - It is split into a search/departure service and a station/line
//!   directory, with different base URLs
//! - Paths and field names change between revisions; both are pinned in
//!   [`endpoint`] and [`types`]
//! - Departure times are Unix epochs in milliseconds

mod client;
mod convert;
mod departures;
pub mod endpoint;
mod error;
mod stations;
pub mod types;

pub use client::{MvgApi, MvgConfig};
pub use convert::{ConversionError, millis_to_secs};
pub use departures::{DEFAULT_LIMIT, SERVED_LOOKAHEAD};
pub use endpoint::{Base, Endpoint};
pub use error::{ErrorKind, MvgError};
