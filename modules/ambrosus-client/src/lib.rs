//! Client SDK for the Ambrosus gateway.
//!
//! Exposes asset and event operations over the gateway REST API, plus the
//! local event-parsing pipeline. Every operation resolves to the uniform
//! envelope contract: `Ok(ApiSuccess)` with the response data, or
//! `Err(ApiFailure)` carrying a status and reason. Client-side validation
//! failures reject with a 400 before any network call; transport failures
//! surface as 503.

pub mod events;
pub mod response;
pub mod settings;
pub mod signature;
pub mod transport;
pub mod types;

pub use events::{check_timestamp, parse_events};
pub use response::{
    handle_response, reject_response, success_response, ApiFailure, ApiResult, ApiSuccess,
    RawResponse,
};
pub use settings::Settings;
pub use signature::SignError;
pub use transport::{HttpTransport, Method, Transport};
pub use types::{
    AssetInfo, AssetQuery, DataEntry, EventContent, EventQuery, EventRecord, EventsSearchResult,
    IdData, IdentifierSummary, ParsedSummary,
};

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info};

/// Gateway client. Cheap to clone; safe to share across tasks.
#[derive(Clone)]
pub struct AmbrosusClient {
    settings: Settings,
    transport: Arc<dyn Transport>,
}

impl AmbrosusClient {
    /// Client over the default HTTP transport.
    pub fn new(settings: Settings) -> Self {
        Self::with_transport(settings, Arc::new(HttpTransport::new()))
    }

    /// Client over an injected transport (tests, alternative stacks).
    pub fn with_transport(mut settings: Settings, transport: Arc<dyn Transport>) -> Self {
        settings.api_endpoint = settings.api_endpoint.trim_end_matches('/').to_string();
        Self {
            settings,
            transport,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch a single asset by id.
    pub async fn get_asset_by_id(&self, asset_id: &str) -> ApiResult {
        if asset_id.trim().is_empty() {
            return Err(reject_response("Asset ID is missing"));
        }
        debug!(asset_id, "Fetching asset");
        let url = format!("{}/assets/{}", self.settings.api_endpoint, asset_id);
        self.get(&url).await
    }

    /// Fetch assets matching a query.
    pub async fn get_assets(&self, query: &AssetQuery) -> ApiResult {
        let url = with_query(
            format!("{}/assets", self.settings.api_endpoint),
            &query.to_query_string(),
        );
        debug!(url = url.as_str(), "Fetching assets");
        self.get(&url).await
    }

    /// Register a new asset. Builds and signs the asset's `idData` section
    /// with the configured secret.
    pub async fn create_asset(&self, asset: &EventRecord) -> ApiResult {
        let secret = self.secret()?;
        let created_by = self.created_by(&secret)?;

        let id_data = json!({
            "createdBy": created_by,
            "timestamp": check_timestamp(asset),
            "sequenceNumber": 0,
        });
        let signed = signature::sign(&secret, &id_data)
            .map_err(|_| reject_response("Invalid private key format"))?;
        let body = json!({
            "content": {
                "idData": id_data,
                "signature": signed,
            }
        });

        info!("Creating asset");
        let url = format!("{}/assets", self.settings.api_endpoint);
        self.post(&url, &body).await
    }

    /// Fetch a single event by id.
    pub async fn get_event_by_id(&self, event_id: &str) -> ApiResult {
        if event_id.trim().is_empty() {
            return Err(reject_response("Event ID is missing"));
        }
        debug!(event_id, "Fetching event");
        let url = format!("{}/events/{}", self.settings.api_endpoint, event_id);
        self.get(&url).await
    }

    /// Fetch events matching a query.
    pub async fn get_events(&self, query: &EventQuery) -> ApiResult {
        let url = with_query(
            format!("{}/events", self.settings.api_endpoint),
            &query.to_query_string(),
        );
        debug!(url = url.as_str(), "Fetching events");
        self.get(&url).await
    }

    /// Attach a new event to an asset. The event must carry a
    /// `content.data` section; its hash and the signed `idData` are built
    /// here.
    pub async fn create_event(&self, asset_id: &str, event: &EventRecord) -> ApiResult {
        if asset_id.trim().is_empty() {
            return Err(reject_response("Asset ID is missing"));
        }
        let Some(entries) = event.data_entries() else {
            return Err(reject_response(
                "Invalid data: No content found at content.data",
            ));
        };
        let data = serde_json::to_value(entries).map_err(|_| {
            reject_response("Invalid data: No content found at content.data")
        })?;

        let secret = self.secret()?;
        let created_by = self.created_by(&secret)?;
        let access_level = event.id_data().and_then(|id| id.access_level).unwrap_or(0);

        let id_data = json!({
            "assetId": asset_id,
            "createdBy": created_by,
            "timestamp": check_timestamp(event),
            "accessLevel": access_level,
            "dataHash": signature::hash_data(&data),
        });
        let signed = signature::sign(&secret, &id_data)
            .map_err(|_| reject_response("Invalid private key format"))?;
        let body = json!({
            "content": {
                "idData": id_data,
                "data": data,
                "signature": signed,
            }
        });

        info!(asset_id, "Creating event");
        let url = format!("{}/assets/{}/events", self.settings.api_endpoint, asset_id);
        self.post(&url, &body).await
    }

    /// Parse a search result into a [`ParsedSummary`]. Local computation,
    /// no network call; async only to keep the envelope contract uniform.
    pub async fn parse_events(&self, search: &EventsSearchResult) -> ApiResult<ParsedSummary> {
        events::parse_events(search)
    }

    async fn get(&self, url: &str) -> ApiResult {
        self.request(Method::Get, url, None).await
    }

    async fn post(&self, url: &str, body: &Value) -> ApiResult {
        self.request(Method::Post, url, Some(body)).await
    }

    async fn request(&self, method: Method, url: &str, body: Option<&Value>) -> ApiResult {
        let headers = if body.is_some() {
            vec![("Content-Type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };

        let raw = self
            .transport
            .send(method, url, &headers, body)
            .await
            .map_err(|e| ApiFailure {
                status: 503,
                message: format!("Network error: {e}"),
            })?;

        handle_response(raw)
    }

    fn secret(&self) -> Result<String, ApiFailure> {
        self.settings
            .secret
            .clone()
            .ok_or_else(|| reject_response("Invalid private key format"))
    }

    /// `createdBy` for write payloads: the configured address, or the one
    /// derived from the secret.
    fn created_by(&self, secret: &str) -> Result<String, ApiFailure> {
        match &self.settings.address {
            Some(address) => Ok(address.clone()),
            None => signature::address(secret)
                .map_err(|_| reject_response("Invalid private key format")),
        }
    }
}

fn with_query(base: String, query: &str) -> String {
    if query.is_empty() {
        base
    } else {
        format!("{base}?{query}")
    }
}
