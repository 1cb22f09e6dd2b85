//! Line records from the line directory.

use serde::Serialize;

use super::TransportType;

/// A line of the network, e.g. `U3` or `X30`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub label: String,
    pub transport_type: TransportType,
    pub network: Option<String>,
    pub diva_id: Option<String>,
}

impl Line {
    pub fn type_name(&self) -> &'static str {
        self.transport_type.name()
    }

    pub fn icon(&self) -> &'static str {
        self.transport_type.icon()
    }
}
