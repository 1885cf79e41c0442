//! Event parsing: flattens a raw `GET /events` search result into a
//! denormalized summary usable without knowledge of the gateway schema.

use chrono::Utc;
use serde_json::Value;

use crate::response::{reject_response, success_response, ApiResult};
use crate::types::{
    AssetInfo, DataEntry, EventRecord, EventsSearchResult, IdentifierSummary, ParsedSummary,
};

/// Timestamp for a single record: `content.idData.timestamp` when the
/// gateway supplied one, otherwise the current wall clock in unix seconds.
pub fn check_timestamp(event: &EventRecord) -> i64 {
    event
        .id_data()
        .and_then(|id| id.timestamp)
        .unwrap_or_else(|| Utc::now().timestamp())
}

/// Entry types look like `ambrosus.asset.identifier`; the final dot-segment
/// names the kind.
fn entry_kind(entry: &DataEntry) -> &str {
    entry.entry_type.rsplit('.').next().unwrap_or("")
}

/// Flatten a search result into a [`ParsedSummary`].
///
/// The first identifier-typed entry anywhere in the results supplies the
/// asset display name and identifier kind; both default to empty strings,
/// so callers always receive a string. Every output record carries a
/// normalized `timestamp`. A record with no `content.data` is structurally
/// invalid and fails the whole parse; an empty `results` array parses to
/// an empty summary.
pub fn parse_events(search: &EventsSearchResult) -> ApiResult<ParsedSummary> {
    let Some(results) = search.results.as_ref() else {
        return Err(reject_response("Results array is missing"));
    };

    let mut info = AssetInfo::default();
    let mut identifiers = IdentifierSummary::default();
    let mut found_identifier = false;
    let mut events = Vec::with_capacity(results.len());

    for record in results {
        let Some(entries) = record.data_entries() else {
            return Err(reject_response(
                "Invalid data: No content found at content.data",
            ));
        };

        if !found_identifier {
            if let Some(entry) = entries
                .iter()
                .find(|e| matches!(entry_kind(e), "identifier" | "identifiers"))
            {
                info.name = entry.name.clone().unwrap_or_default();
                identifiers.identifier_type = entry
                    .identifiers
                    .as_ref()
                    .and_then(|v| v.get("type"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                found_identifier = true;
            }
        }

        let mut normalized = record.clone();
        normalized.timestamp = Some(check_timestamp(record));
        events.push(normalized);
    }

    Ok(success_response(ParsedSummary {
        info,
        identifiers,
        events,
    }))
}
