//! CLI command implementations

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::Subcommand;
use tokio_util::sync::CancellationToken;
use tvsource_core::{ItemId, MediaSourceProvider, OpenToken, SourceConfig, SourceError};
use tvsource_sim::{Lineup, SimulatedLiveTv, SimulationConfig};
use uuid::Uuid;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the media sources of a lineup item
    Resolve {
        /// Item id (32 hex digits or hyphenated UUID)
        item_id: String,
    },
    /// Open a live stream from an open token
    Open {
        /// Token returned by `resolve`
        token: String,
    },
    /// Encode or decode open tokens
    Token {
        #[command(subcommand)]
        action: TokenCommand,
    },
}

/// Token subcommands; these do not need a lineup
#[derive(Subcommand)]
pub enum TokenCommand {
    /// Build an open token
    Encode {
        /// Item type name, e.g. LiveTvChannel
        type_name: String,
        /// Item id
        item_id: String,
        /// Media source id
        source_id: Option<String>,
    },
    /// Split an open token into its fields
    Decode {
        /// Token to decode
        token: String,
    },
}

/// Handle the CLI command, returning the text to print.
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands, lineup: Option<&Path>) -> Result<String> {
    match command {
        Commands::Resolve { item_id } => resolve_sources(load_live_tv(lineup)?, &item_id).await,
        Commands::Open { token } => open_stream(load_live_tv(lineup)?, &token).await,
        Commands::Token { action } => handle_token(action),
    }
}

fn load_live_tv(lineup: Option<&Path>) -> Result<SimulatedLiveTv> {
    let path = lineup.ok_or_else(|| anyhow!("--lineup is required for this command"))?;
    let lineup = Lineup::load(path)?;
    tracing::info!(
        items = lineup.items.len(),
        channels = lineup.channels.len(),
        "Loaded lineup {}",
        path.display()
    );

    Ok(SimulatedLiveTv::new(lineup, SimulationConfig::default())?)
}

fn parse_item_id(item_id: &str) -> Result<ItemId> {
    let id = Uuid::parse_str(item_id).with_context(|| format!("Invalid item id: {item_id}"))?;
    Ok(ItemId::new(id))
}

/// Resolve media sources for an item and render them as JSON.
///
/// # Errors
/// - Item id is not a UUID or is not in the lineup
/// - Resolution failed in a simulated subsystem
pub async fn resolve_sources(live_tv: SimulatedLiveTv, item_id: &str) -> Result<String> {
    let item_id = parse_item_id(item_id)?;
    let item = live_tv
        .lineup()
        .item(&item_id)
        .cloned()
        .ok_or_else(|| anyhow!("Item {item_id} not found in lineup"))?;

    let provider = live_tv.provider(SourceConfig::from_env());
    let sources = provider
        .media_sources(&item, &CancellationToken::new())
        .await
        .map_err(with_user_message)?;

    Ok(serde_json::to_string_pretty(&sources)?)
}

/// Open a stream from a token and render the handle as JSON.
///
/// # Errors
/// - Token is malformed
/// - Channel could not provide a stream
pub async fn open_stream(live_tv: SimulatedLiveTv, token: &str) -> Result<String> {
    let provider = live_tv.provider(SourceConfig::from_env());
    let stream = provider
        .open_media_source(token, &[], &CancellationToken::new())
        .await
        .map_err(with_user_message)?;

    Ok(serde_json::to_string_pretty(&stream)?)
}

fn with_user_message(error: SourceError) -> anyhow::Error {
    let message = error.user_message();
    anyhow::Error::new(error).context(message)
}

fn handle_token(action: TokenCommand) -> Result<String> {
    match action {
        TokenCommand::Encode {
            type_name,
            item_id,
            source_id,
        } => {
            let item_id = parse_item_id(&item_id)?;
            Ok(OpenToken::new(type_name, &item_id, source_id.as_deref())?.encode())
        }
        TokenCommand::Decode { token } => {
            let token = OpenToken::decode(&token)?;
            Ok(format!(
                "type_name: {}\nitem_id: {}\nsource_id: {}",
                token.type_name,
                token.item_id,
                token.source_id.as_deref().unwrap_or("<none>")
            ))
        }
    }
}
