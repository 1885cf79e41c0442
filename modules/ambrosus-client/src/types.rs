//! Gateway data model: event records, search results, and queries.
//!
//! The gateway omits nested fields freely, so every level of an event
//! record is optional, with `#[serde(flatten)]` maps carrying whatever
//! unknown fields ride along. A record round-trips through
//! deserialize/serialize unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single gateway event record. Assets share the same content shape
/// minus the `data` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "eventId", skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<EventContent>,
    /// Normalized timestamp attached by `parse_events`; absent on input records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventRecord {
    /// `content.idData`, or `None` when either level is absent.
    pub fn id_data(&self) -> Option<&IdData> {
        self.content.as_ref()?.id_data.as_ref()
    }

    /// `content.data`, or `None` when either level is absent.
    pub fn data_entries(&self) -> Option<&[DataEntry]> {
        self.content.as_ref()?.data.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventContent {
    #[serde(rename = "idData", skip_serializing_if = "Option::is_none")]
    pub id_data: Option<IdData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<DataEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdData {
    #[serde(rename = "assetId", skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(rename = "accessLevel", skip_serializing_if = "Option::is_none")]
    pub access_level: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One typed entry in an event's `content.data` section, e.g.
/// `{"type": "ambrosus.asset.identifier", "name": "...", "identifiers": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataEntry {
    #[serde(rename = "type", default)]
    pub entry_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The raw shape of a `GET /events` search response.
///
/// `results: None` means the field was absent entirely, which is an
/// input-validation failure for parsing; an empty vec is a valid,
/// empty search result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsSearchResult {
    #[serde(rename = "resultCount", skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<EventRecord>>,
}

/// Denormalized output of `parse_events`. Rebuilt on every call, owned by
/// the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedSummary {
    pub info: AssetInfo,
    pub identifiers: IdentifierSummary,
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentifierSummary {
    #[serde(rename = "type")]
    pub identifier_type: String,
}

/// Query parameters for `GET /assets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetQuery {
    #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "fromTimestamp", skip_serializing_if = "Option::is_none")]
    pub from_timestamp: Option<i64>,
    #[serde(rename = "toTimestamp", skip_serializing_if = "Option::is_none")]
    pub to_timestamp: Option<i64>,
}

impl AssetQuery {
    pub fn to_query_string(&self) -> String {
        query_string(self)
    }
}

/// Query parameters for `GET /events`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventQuery {
    #[serde(rename = "assetId", skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Entry-type filter, e.g. `ambrosus.asset.identifier`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "fromTimestamp", skip_serializing_if = "Option::is_none")]
    pub from_timestamp: Option<i64>,
    #[serde(rename = "toTimestamp", skip_serializing_if = "Option::is_none")]
    pub to_timestamp: Option<i64>,
}

impl EventQuery {
    pub fn to_query_string(&self) -> String {
        query_string(self)
    }
}

/// Serialize set query fields to `k=v&k=v`, in stable (alphabetical) key
/// order. Values pass through unencoded; the gateway rejects malformed
/// ones with a 400.
fn query_string<T: Serialize>(query: &T) -> String {
    let Ok(Value::Object(fields)) = serde_json::to_value(query) else {
        return String::new();
    };
    fields
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{key}={s}"),
            other => format!("{key}={other}"),
        })
        .collect::<Vec<_>>()
        .join("&")
}
