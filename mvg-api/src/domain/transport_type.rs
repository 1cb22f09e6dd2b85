//! Transport type catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when the API reports a transport type code we don't know.
///
/// This means the upstream contract changed, so callers should not try to
/// recover from it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport type code: {0:?}")]
pub struct UnknownTransportType(pub String);

/// A category of vehicle as defined by the MVG API.
///
/// Each variant carries its upstream code, a display name and an icon name
/// (Material Design Icons). Ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransportType {
    Bahn,
    SBahn,
    UBahn,
    Tram,
    Bus,
    RegionalBus,
    /// Schienenersatzverkehr: rail replacement service.
    Sev,
    Schiff,
}

impl TransportType {
    /// Every declared variant, in declaration order.
    pub const VARIANTS: [TransportType; 8] = [
        TransportType::Bahn,
        TransportType::SBahn,
        TransportType::UBahn,
        TransportType::Tram,
        TransportType::Bus,
        TransportType::RegionalBus,
        TransportType::Sev,
        TransportType::Schiff,
    ];

    /// The default filter: every variant except [`TransportType::Sev`].
    ///
    /// Each type appears exactly once, in declaration order. `Sev` is not a
    /// vehicle category of its own and must be requested explicitly.
    pub fn all() -> Vec<TransportType> {
        Self::VARIANTS
            .into_iter()
            .filter(|t| *t != TransportType::Sev)
            .collect()
    }

    /// The code used by the API, e.g. `UBAHN`.
    pub fn code(&self) -> &'static str {
        match self {
            TransportType::Bahn => "BAHN",
            TransportType::SBahn => "SBAHN",
            TransportType::UBahn => "UBAHN",
            TransportType::Tram => "TRAM",
            TransportType::Bus => "BUS",
            TransportType::RegionalBus => "REGIONAL_BUS",
            TransportType::Sev => "SEV",
            TransportType::Schiff => "SCHIFF",
        }
    }

    /// Human readable name, e.g. `U-Bahn`.
    pub fn name(&self) -> &'static str {
        match self {
            TransportType::Bahn => "Bahn",
            TransportType::SBahn => "S-Bahn",
            TransportType::UBahn => "U-Bahn",
            TransportType::Tram => "Tram",
            TransportType::Bus => "Bus",
            TransportType::RegionalBus => "Regionalbus",
            TransportType::Sev => "SEV",
            TransportType::Schiff => "Schiff",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TransportType::Bahn => "mdi:train",
            TransportType::SBahn => "mdi:subway-variant",
            TransportType::UBahn => "mdi:subway",
            TransportType::Tram => "mdi:tram",
            TransportType::Bus | TransportType::RegionalBus => "mdi:bus",
            TransportType::Sev => "mdi:taxi",
            TransportType::Schiff => "mdi:ferry",
        }
    }

    /// Look up a transport type by its API code.
    pub fn from_code(code: &str) -> Result<Self, UnknownTransportType> {
        Self::VARIANTS
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| UnknownTransportType(code.to_string()))
    }
}

/// Join transport type codes for a query parameter, dropping duplicates.
pub fn join_codes(types: &[TransportType]) -> String {
    let mut seen = Vec::with_capacity(types.len());
    for t in types {
        if !seen.contains(t) {
            seen.push(*t);
        }
    }
    seen.iter().map(|t| t.code()).collect::<Vec<_>>().join(",")
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransportType {
    type Err = UnknownTransportType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl Serialize for TransportType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for TransportType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::from_code(&code).map_err(serde::de::Error::custom)
    }
}
