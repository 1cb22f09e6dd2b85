//! Conversion from MVG API JSON to domain types.
//!
//! Every function here takes the raw `serde_json::Value` returned by the
//! transport and either produces normalized records or a
//! [`ConversionError`] describing how the payload deviated from the
//! expected shape. Not finding anything is never an error.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use crate::domain::{
    Departure, Line, Station, TransportType, UnknownTransportType, is_valid_station_id,
};

use super::types::{
    DepartureDto, DirectoryStationDto, LOCATION_TYPE_STATION, LineDto, LocationDto,
    NearbyStationDto,
};

pub(crate) const STATION_DATA: &str = "station data";
pub(crate) const DEPARTURE_DATA: &str = "departure data";
pub(crate) const LINE_DATA: &str = "line data";

/// Error during JSON to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Top-level payload was not a list
    #[error("expected a JSON list")]
    NotAList(&'static str),

    /// Missing field or wrong field type
    #[error("{message}")]
    Shape {
        context: &'static str,
        message: String,
    },

    /// Transport type code outside the catalog
    #[error("{source}")]
    UnknownTransportType {
        context: &'static str,
        #[source]
        source: UnknownTransportType,
    },
}

impl ConversionError {
    /// What was being parsed, e.g. "departure data".
    pub fn context(&self) -> &'static str {
        match self {
            ConversionError::NotAList(context)
            | ConversionError::Shape { context, .. }
            | ConversionError::UnknownTransportType { context, .. } => context,
        }
    }
}

fn as_list(value: Value, context: &'static str) -> Result<Vec<Value>, ConversionError> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(ConversionError::NotAList(context)),
    }
}

fn decode<T: DeserializeOwned>(value: Value, context: &'static str) -> Result<T, ConversionError> {
    serde_json::from_value(value).map_err(|e| ConversionError::Shape {
        context,
        message: e.to_string(),
    })
}

fn decode_list<T: DeserializeOwned>(
    value: Value,
    context: &'static str,
) -> Result<Vec<T>, ConversionError> {
    as_list(value, context)?
        .into_iter()
        .map(|item| decode(item, context))
        .collect()
}

fn transport_type(code: &str, context: &'static str) -> Result<TransportType, ConversionError> {
    TransportType::from_code(code)
        .map_err(|source| ConversionError::UnknownTransportType { context, source })
}

fn transport_types(
    codes: &[String],
    context: &'static str,
) -> Result<Vec<TransportType>, ConversionError> {
    codes.iter().map(|c| transport_type(c, context)).collect()
}

/// Render a scalar that is numeric in some revisions and a string in others.
fn scalar_to_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Convert an epoch in milliseconds to whole seconds, truncating.
pub fn millis_to_secs(millis: i64) -> i64 {
    millis / 1000
}

/// Pick the station for `query` out of a `/locations` response.
///
/// If `query` is itself a global station id, the first result describes that
/// station and the supplied id is kept as is. Otherwise the first result of
/// type `STATION` wins.
pub fn convert_location_search(
    value: Value,
    query: &str,
) -> Result<Option<Station>, ConversionError> {
    let locations = as_list(value, STATION_DATA)?;

    if is_valid_station_id(query) {
        let Some(first) = locations.into_iter().next() else {
            return Ok(None);
        };
        let location: LocationDto = decode(first, STATION_DATA)?;
        return Ok(Some(Station {
            id: query.to_string(),
            name: location.name,
            place: location.place,
            latitude: location.latitude,
            longitude: location.longitude,
            transport_types: None,
        }));
    }

    for item in locations {
        let location_type = item
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ConversionError::Shape {
                context: STATION_DATA,
                message: "location without `type`".to_string(),
            })?;

        if location_type != LOCATION_TYPE_STATION {
            trace!(location_type, "skipping non-station location");
            continue;
        }

        let location: LocationDto = decode(item, STATION_DATA)?;
        let id = location.global_id.ok_or_else(|| ConversionError::Shape {
            context: STATION_DATA,
            message: "station without `globalId`".to_string(),
        })?;

        return Ok(Some(Station {
            id,
            name: location.name,
            place: location.place,
            latitude: location.latitude,
            longitude: location.longitude,
            transport_types: None,
        }));
    }

    Ok(None)
}

/// Convert a `/stations/nearby` response, keeping stations served by any of
/// `filter` in upstream (distance) order, at most `limit` of them.
///
/// Every station's transport codes are parsed before filtering, so an
/// unknown code fails the whole response whatever `limit` is.
pub fn convert_nearby_stations(
    value: Value,
    filter: &[TransportType],
    limit: Option<usize>,
) -> Result<Vec<Station>, ConversionError> {
    let nearby: Vec<NearbyStationDto> = decode_list(value, STATION_DATA)?;

    let mut stations = Vec::new();
    for dto in nearby {
        let station = Station {
            transport_types: Some(transport_types(&dto.transport_types, STATION_DATA)?),
            id: dto.global_id,
            name: dto.name,
            place: dto.place,
            latitude: dto.latitude,
            longitude: dto.longitude,
        };
        if station.is_served_by_any(filter) {
            stations.push(station);
        }
    }
    if let Some(n) = limit {
        stations.truncate(n);
    }

    trace!(count = stations.len(), "converted nearby stations");
    Ok(stations)
}

/// Convert a single departure entry.
pub fn convert_departure(dto: DepartureDto) -> Result<Departure, ConversionError> {
    let transport_type = transport_type(&dto.transport_type, DEPARTURE_DATA)?;

    Ok(Departure {
        time: millis_to_secs(dto.realtime_departure_time),
        planned: millis_to_secs(dto.planned_departure_time),
        line: dto.label,
        destination: dto.destination,
        transport_type,
        cancelled: dto.cancelled,
        messages: dto.messages,
        realtime: dto.realtime,
        delay_minutes: dto.delay_in_minutes,
        occupancy: dto.occupancy,
        platform: scalar_to_string(dto.platform.as_ref()),
    })
}

/// Convert a `/departures` response. Order is preserved.
pub fn convert_departures(value: Value) -> Result<Vec<Departure>, ConversionError> {
    let departures = decode_list::<DepartureDto>(value, DEPARTURE_DATA)?
        .into_iter()
        .map(convert_departure)
        .collect::<Result<Vec<_>, _>>()?;

    trace!(count = departures.len(), "converted departures");
    Ok(departures)
}

/// Convert the station id list, sorted.
pub fn convert_station_ids(value: Value) -> Result<Vec<String>, ConversionError> {
    let mut ids: Vec<String> = decode_list(value, STATION_DATA)?;
    ids.sort();
    Ok(ids)
}

/// Convert the station directory.
pub fn convert_directory_stations(value: Value) -> Result<Vec<Station>, ConversionError> {
    decode_list::<DirectoryStationDto>(value, STATION_DATA)?
        .into_iter()
        .map(|dto| {
            Ok(Station {
                transport_types: Some(transport_types(&dto.products, STATION_DATA)?),
                id: dto.id,
                name: dto.name,
                place: dto.place,
                latitude: dto.latitude,
                longitude: dto.longitude,
            })
        })
        .collect()
}

/// Convert the line directory.
pub fn convert_lines(value: Value) -> Result<Vec<Line>, ConversionError> {
    decode_list::<LineDto>(value, LINE_DATA)?
        .into_iter()
        .map(|dto| {
            Ok(Line {
                transport_type: transport_type(&dto.transport_type, LINE_DATA)?,
                label: dto.label,
                network: dto.network,
                diva_id: scalar_to_string(dto.diva_id.as_ref()),
            })
        })
        .collect()
}

/// Sorted, de-duplicated values picked out of a departure board.
pub fn distinct_sorted<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values.into_iter().map(str::to_string).collect();
    out.sort();
    out.dedup();
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn board(types: &[Vec<&'static str>]) -> Value {
        Value::Array(
            types
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    json!({
                        "globalId": format!("de:09162:{i}"),
                        "name": "n",
                        "place": "p",
                        "latitude": 48.1,
                        "longitude": 11.5,
                        "transportTypes": t,
                    })
                })
                .collect(),
        )
    }

    fn codes() -> impl Strategy<Value = Vec<&'static str>> {
        proptest::sample::subsequence(vec!["BAHN", "UBAHN", "TRAM", "BUS", "SEV"], 0..=3)
    }

    proptest! {
        /// A limited result is a prefix of the unlimited one
        #[test]
        fn limit_is_prefix(types in proptest::collection::vec(codes(), 0..12), n in 0usize..15) {
            let value = board(&types);
            let full = convert_nearby_stations(value.clone(), &TransportType::all(), None).unwrap();
            let limited = convert_nearby_stations(value, &TransportType::all(), Some(n)).unwrap();

            prop_assert!(limited.len() <= n);
            prop_assert_eq!(limited.len(), full.len().min(n));
            for (a, b) in limited.iter().zip(full.iter()) {
                prop_assert_eq!(&a.id, &b.id);
            }
        }

        /// Milliseconds always truncate to the containing second
        #[test]
        fn millis_to_secs_truncates(ms in 0i64..4_000_000_000_000) {
            let s = millis_to_secs(ms);
            prop_assert!(s * 1000 <= ms && ms < (s + 1) * 1000);
        }
    }
}
