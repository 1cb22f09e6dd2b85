//! Client for the public API of the Münchner Verkehrsgesellschaft (MVG).
//!
//! Finds stations by name, id or coordinates and fetches their departure
//! boards. [`MvgApi`] is the async client; [`blocking`] wraps it for
//! synchronous callers.

pub mod blocking;
pub mod client;
pub mod domain;
pub mod mvg;

pub use blocking::{BlockingMvgApi, BlockingMvgClient};
pub use client::MvgClient;
pub use domain::{
    Departure, GlobalStationId, Line, Occupancy, Station, TransportType, is_valid_station_id,
};
pub use mvg::{ErrorKind, MvgApi, MvgConfig, MvgError};
