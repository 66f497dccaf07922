//! Media source resolution for live TV items.
//!
//! Picks the upstream provider for an item (in-progress recording or live
//! channel), falls back to static sources when the channel cannot enumerate,
//! and normalizes every resulting descriptor so it can be played or opened.

use tokio_util::sync::CancellationToken;

use crate::config::SourceConfig;
use crate::errors::SourceError;
use crate::media::{
    ActiveRecordingContext, MediaProtocol, MediaSourceDescriptor, MediaSourceType, PlayableItem,
};
use crate::token::OpenToken;
use crate::traits::{ChannelSources, LiveTvCollaborators, until_cancelled};

/// Resolves the viable media sources for live TV items.
///
/// Stateless between calls; concurrent resolutions of the same item are
/// independent.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    collaborators: LiveTvCollaborators,
    config: SourceConfig,
}

/// Sources fetched upstream, before normalization.
struct FetchedSources {
    sources: Vec<MediaSourceDescriptor>,
    force_requires_opening: bool,
}

impl SourceResolver {
    /// Creates a resolver over the given collaborators.
    pub fn new(collaborators: LiveTvCollaborators, config: SourceConfig) -> Self {
        Self {
            collaborators,
            config,
        }
    }

    /// Resolves the media sources for an item.
    ///
    /// Returns an empty list for anything that is not live TV, and for live
    /// TV items that have a path but are not being recorded right now.
    ///
    /// # Errors
    /// - `SourceError::Cancelled` - `cancel` fired before resolution finished
    /// - `SourceError::Recording` - Recording storage failed
    /// - `SourceError::Channel` - Channel subsystem failed
    /// - `SourceError::InvalidToken` - Item type name cannot be carried in an open token
    pub async fn resolve_sources(
        &self,
        item: &PlayableItem,
        cancel: &CancellationToken,
    ) -> Result<Vec<MediaSourceDescriptor>, SourceError> {
        if !item.is_live_tv() {
            return Ok(Vec::new());
        }

        if cancel.is_cancelled() {
            return Err(SourceError::Cancelled);
        }

        let recording = self
            .collaborators
            .recordings
            .active_recording(item.path.as_deref());

        if !item.has_empty_path() && recording.is_none() {
            return Ok(Vec::new());
        }

        let fetched = self.fetch_sources(item, recording.as_ref(), cancel).await?;

        let sources = fetched
            .sources
            .into_iter()
            .map(|source| self.finalize_source(item, source, fetched.force_requires_opening))
            .collect::<Result<Vec<_>, _>>()?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let media_sources = serde_json::to_string(&sources)
                .unwrap_or_else(|e| format!("<unserializable: {e}>"));
            tracing::debug!(
                item_id = %item.id,
                count = sources.len(),
                media_sources = %media_sources,
                "Resolved media sources"
            );
        }

        Ok(sources)
    }

    async fn fetch_sources(
        &self,
        item: &PlayableItem,
        recording: Option<&ActiveRecordingContext>,
        cancel: &CancellationToken,
    ) -> Result<FetchedSources, SourceError> {
        if let Some(recording) = recording {
            let sources = until_cancelled(
                cancel,
                self.collaborators
                    .recordings
                    .recording_sources(recording, cancel),
            )
            .await?;

            return Ok(FetchedSources {
                sources,
                force_requires_opening: false,
            });
        }

        let channel_sources = until_cancelled(
            cancel,
            self.collaborators.channels.channel_sources(item, cancel),
        )
        .await?;

        match channel_sources {
            ChannelSources::Sources(sources) => Ok(FetchedSources {
                sources,
                force_requires_opening: false,
            }),
            ChannelSources::Unsupported => {
                tracing::debug!(
                    item_id = %item.id,
                    "Channel cannot enumerate sources, falling back to static sources"
                );

                Ok(FetchedSources {
                    sources: self.collaborators.static_sources.static_sources(item, false),
                    force_requires_opening: true,
                })
            }
        }
    }

    fn finalize_source(
        &self,
        item: &PlayableItem,
        mut source: MediaSourceDescriptor,
        force_requires_opening: bool,
    ) -> Result<MediaSourceDescriptor, SourceError> {
        source.source_type = MediaSourceType::Default;
        source.buffer_ms = source.buffer_ms.or(Some(self.config.default_buffer_ms));
        source.requires_opening |= force_requires_opening;

        source.open_token = if source.requires_opening {
            let token = OpenToken::new(item.type_name.as_str(), &item.id, source.id.as_deref())?;
            Some(token.encode())
        } else {
            None
        };

        // Direct play checks only look at path presence and protocol.
        if self.config.fill_http_placeholder
            && source.has_empty_path()
            && source.protocol == MediaProtocol::Http
        {
            source.path = Some(self.collaborators.app_host.local_api_base_url());
        }

        Ok(source)
    }
}
