//! Domain types for the MVG client.
//!
//! These are the normalized records handed to callers. They don't know the
//! field names of any API revision; that mapping lives in [`crate::mvg`].

mod departure;
mod line;
mod station;
mod station_id;
mod transport_type;

pub use departure::{Departure, Occupancy};
pub use line::Line;
pub use station::Station;
pub use station_id::{GlobalStationId, InvalidStationId, is_valid_station_id};
pub use transport_type::{TransportType, UnknownTransportType, join_codes};
