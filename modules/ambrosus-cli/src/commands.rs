//! Command handlers: build queries, invoke the client, print envelopes.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use ambrosus_client::{
    AmbrosusClient, ApiResult, AssetQuery, EventQuery, EventRecord, EventsSearchResult,
};

#[derive(Subcommand)]
pub enum AssetCommand {
    /// Fetch one asset by id
    Get { asset_id: String },

    /// Search assets
    List(ListArgs),

    /// Register a new asset (requires --secret)
    Create {
        /// Asset JSON; its content.idData.timestamp is honored when present
        #[arg(long)]
        data: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum EventCommand {
    /// Fetch one event by id
    Get { event_id: String },

    /// Search events
    List(EventListArgs),

    /// Attach an event to an asset (requires --secret)
    Create {
        asset_id: String,
        /// Event JSON with a content.data section
        #[arg(long)]
        data: String,
    },

    /// Search events and parse them into an asset summary
    Summary(EventListArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long)]
    created_by: Option<String>,
    #[arg(long)]
    per_page: Option<u32>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    from_timestamp: Option<i64>,
    #[arg(long)]
    to_timestamp: Option<i64>,
}

#[derive(Args)]
pub struct EventListArgs {
    #[command(flatten)]
    common: ListArgs,
    #[arg(long)]
    asset_id: Option<String>,
    /// Entry-type filter, e.g. ambrosus.asset.identifier
    #[arg(long)]
    data: Option<String>,
}

impl ListArgs {
    fn into_query(self) -> AssetQuery {
        AssetQuery {
            created_by: self.created_by,
            per_page: self.per_page,
            page: self.page,
            from_timestamp: self.from_timestamp,
            to_timestamp: self.to_timestamp,
        }
    }
}

impl EventListArgs {
    fn into_query(self) -> EventQuery {
        EventQuery {
            asset_id: self.asset_id,
            created_by: self.common.created_by,
            data: self.data,
            per_page: self.common.per_page,
            page: self.common.page,
            from_timestamp: self.common.from_timestamp,
            to_timestamp: self.common.to_timestamp,
        }
    }
}

pub async fn run_asset(client: &AmbrosusClient, cmd: AssetCommand) -> Result<bool> {
    match cmd {
        AssetCommand::Get { asset_id } => render(client.get_asset_by_id(&asset_id).await),
        AssetCommand::List(args) => render(client.get_assets(&args.into_query()).await),
        AssetCommand::Create { data } => {
            let asset = parse_record(data.as_deref())?;
            render(client.create_asset(&asset).await)
        }
    }
}

pub async fn run_event(client: &AmbrosusClient, cmd: EventCommand) -> Result<bool> {
    match cmd {
        EventCommand::Get { event_id } => render(client.get_event_by_id(&event_id).await),
        EventCommand::List(args) => render(client.get_events(&args.into_query()).await),
        EventCommand::Create { asset_id, data } => {
            let event = parse_record(Some(&data))?;
            render(client.create_event(&asset_id, &event).await)
        }
        EventCommand::Summary(args) => {
            let response = match client.get_events(&args.into_query()).await {
                Ok(success) => success,
                Err(failure) => return render::<Value>(Err(failure)),
            };
            let search: EventsSearchResult = serde_json::from_value(response.data)
                .context("events response is not a search result")?;
            render(client.parse_events(&search).await)
        }
    }
}

fn parse_record(data: Option<&str>) -> Result<EventRecord> {
    match data {
        Some(raw) => serde_json::from_str(raw).context("record JSON is malformed"),
        None => Ok(EventRecord::default()),
    }
}

/// Print the envelope as pretty JSON; the flag reports whether it was a
/// success.
fn render<T: Serialize>(result: ApiResult<T>) -> Result<bool> {
    match result {
        Ok(success) => {
            println!("{}", serde_json::to_string_pretty(&success)?);
            Ok(true)
        }
        Err(failure) => {
            println!("{}", serde_json::to_string_pretty(&failure)?);
            Ok(false)
        }
    }
}
