//! Station records.

use serde::Serialize;

use super::TransportType;

/// A station as returned by the station resolver.
///
/// Stations compare equal by `id` only; the other fields are descriptive.
#[derive(Debug, Clone, Serialize)]
pub struct Station {
    /// Global station id, e.g. `de:09162:70`.
    pub id: String,

    /// Station name, e.g. `Universität`.
    pub name: String,

    /// Place (town), e.g. `München`.
    pub place: String,

    pub latitude: f64,
    pub longitude: f64,

    /// Transport types serving this station, when the API reports them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_types: Option<Vec<TransportType>>,
}

impl Station {
    /// Display names of the serving transport types (empty if unknown).
    pub fn type_names(&self) -> Vec<&'static str> {
        self.transport_types
            .iter()
            .flatten()
            .map(|t| t.name())
            .collect()
    }

    /// Whether any of the station's transport types is in `filter`.
    pub fn is_served_by_any(&self, filter: &[TransportType]) -> bool {
        self.transport_types
            .iter()
            .flatten()
            .any(|t| filter.contains(t))
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl std::hash::Hash for Station {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
