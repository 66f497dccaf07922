//! Collaborator abstractions consumed by the resolver and the opener.
//!
//! The core never talks to tuners, recording storage, or the media registry
//! directly. Each subsystem sits behind one of these traits, with one
//! implementation per concrete subsystem.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::SourceError;
use crate::media::{
    ActiveRecordingContext, ChannelStreamInfo, LiveStreamHandle, MediaSourceDescriptor,
    PlayableItem,
};

/// Outcome of asking the channel subsystem for an item's sources.
///
/// `Unsupported` is a capability answer, not a failure: the channel cannot
/// enumerate sources for this item and the caller should fall back.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelSources {
    Sources(Vec<MediaSourceDescriptor>),
    Unsupported,
}

/// Recording storage subsystem.
#[async_trait]
pub trait RecordingProvider: Send + Sync + Debug {
    /// Looks up the in-progress recording writing to `path`, if any.
    fn active_recording(&self, path: Option<&str>) -> Option<ActiveRecordingContext>;

    /// Lists the sources serving an in-progress recording.
    ///
    /// # Errors
    /// - `SourceError::Recording` - Recording storage failed
    /// - `SourceError::Cancelled` - Request cancelled
    async fn recording_sources(
        &self,
        recording: &ActiveRecordingContext,
        cancel: &CancellationToken,
    ) -> Result<Vec<MediaSourceDescriptor>, SourceError>;
}

/// Live channel and tuner subsystem.
///
/// Owns tuner allocation and the one-live-stream-per-source guarantee.
#[async_trait]
pub trait ChannelProvider: Send + Sync + Debug {
    /// Enumerates the sources for a channel or program.
    ///
    /// # Errors
    /// - `SourceError::Channel` - Channel subsystem failed
    /// - `SourceError::Cancelled` - Request cancelled
    async fn channel_sources(
        &self,
        item: &PlayableItem,
        cancel: &CancellationToken,
    ) -> Result<ChannelSources, SourceError>;

    /// Gets an existing shareable stream or creates a new one.
    ///
    /// `current_streams` lists the live streams open right now; the provider
    /// decides whether one of them can be reused.
    ///
    /// # Errors
    /// - `SourceError::Channel` - Channel unknown or no tuner available
    /// - `SourceError::Cancelled` - Request cancelled
    async fn channel_stream(
        &self,
        channel_id: &str,
        media_source_id: Option<&str>,
        current_streams: &[LiveStreamHandle],
        cancel: &CancellationToken,
    ) -> Result<ChannelStreamInfo, SourceError>;
}

/// Generic media source registry, used for static fallback sources.
pub trait StaticSourceProvider: Send + Sync + Debug {
    /// Lists the item's static sources. `dynamic_only` is forwarded as-is.
    fn static_sources(
        &self,
        item: &PlayableItem,
        dynamic_only: bool,
    ) -> Vec<MediaSourceDescriptor>;
}

/// Server reachability information.
pub trait AppHost: Send + Sync + Debug {
    /// Base API URL reachable from the local host.
    fn local_api_base_url(&self) -> String;
}

/// The collaborator set shared by the resolver and the opener.
#[derive(Debug, Clone)]
pub struct LiveTvCollaborators {
    pub recordings: Arc<dyn RecordingProvider>,
    pub channels: Arc<dyn ChannelProvider>,
    pub static_sources: Arc<dyn StaticSourceProvider>,
    pub app_host: Arc<dyn AppHost>,
}

/// Runs a collaborator call, aborting promptly once `cancel` fires.
pub(crate) async fn until_cancelled<T, F>(
    cancel: &CancellationToken,
    call: F,
) -> Result<T, SourceError>
where
    F: Future<Output = Result<T, SourceError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(SourceError::Cancelled),
        result = call => result,
    }
}
