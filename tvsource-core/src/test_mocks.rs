//! Mock collaborators for testing source resolution and stream opening.
//!
//! Every mock records how it was called so tests can assert which subsystem
//! a request was routed to.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::errors::SourceError;
use crate::media::{
    ActiveRecordingContext, ChannelStreamInfo, ItemId, LiveStreamHandle, MediaProtocol,
    MediaSourceDescriptor, PlayableItem, SourceType,
};
use crate::traits::{
    AppHost, ChannelProvider, ChannelSources, LiveTvCollaborators, RecordingProvider,
    StaticSourceProvider,
};

/// Creates a live TV channel item with the given path.
pub fn test_item(path: Option<&str>) -> PlayableItem {
    PlayableItem {
        id: ItemId::generate(),
        type_name: "LiveTvChannel".to_string(),
        name: "Test Channel".to_string(),
        path: path.map(str::to_string),
        source_type: SourceType::LiveTv,
    }
}

/// Mock recording storage.
#[derive(Debug, Default)]
pub struct MockRecordingProvider {
    active_paths: Mutex<Vec<String>>,
    sources: Mutex<Vec<MediaSourceDescriptor>>,
    lookup_calls: Mutex<usize>,
    source_calls: Mutex<usize>,
}

impl MockRecordingProvider {
    /// Creates a mock with no active recordings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `path` as being recorded right now.
    pub fn add_active_recording(&self, path: &str) {
        self.active_paths.lock().push(path.to_string());
    }

    /// Sets the sources returned for any active recording.
    pub fn set_sources(&self, sources: Vec<MediaSourceDescriptor>) {
        *self.sources.lock() = sources;
    }

    /// Number of active recording lookups.
    pub fn lookup_calls(&self) -> usize {
        *self.lookup_calls.lock()
    }

    /// Number of recording source requests.
    pub fn source_calls(&self) -> usize {
        *self.source_calls.lock()
    }
}

#[async_trait]
impl RecordingProvider for MockRecordingProvider {
    fn active_recording(&self, path: Option<&str>) -> Option<ActiveRecordingContext> {
        *self.lookup_calls.lock() += 1;

        let path = path?;
        self.active_paths
            .lock()
            .iter()
            .find(|active| active.as_str() == path)
            .map(|active| ActiveRecordingContext {
                recording_id: format!("rec-{active}"),
                path: active.clone(),
                channel_id: None,
                started_at: Utc::now(),
            })
    }

    async fn recording_sources(
        &self,
        _recording: &ActiveRecordingContext,
        _cancel: &CancellationToken,
    ) -> Result<Vec<MediaSourceDescriptor>, SourceError> {
        *self.source_calls.lock() += 1;
        Ok(self.sources.lock().clone())
    }
}

#[derive(Debug, Clone)]
enum ChannelBehavior {
    Sources(Vec<MediaSourceDescriptor>),
    Unsupported,
    Failure(String),
}

/// A recorded `channel_stream` call.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamCall {
    pub channel_id: String,
    pub media_source_id: Option<String>,
    pub current_stream_ids: Vec<String>,
}

/// Mock channel subsystem.
#[derive(Debug)]
pub struct MockChannelProvider {
    behavior: Mutex<ChannelBehavior>,
    source_calls: Mutex<usize>,
    stream_calls: Mutex<Vec<StreamCall>>,
}

impl Default for MockChannelProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChannelProvider {
    /// Creates a mock that enumerates no sources and opens every stream.
    pub fn new() -> Self {
        Self {
            behavior: Mutex::new(ChannelBehavior::Sources(Vec::new())),
            source_calls: Mutex::new(0),
            stream_calls: Mutex::new(Vec::new()),
        }
    }

    /// Sets the sources returned by `channel_sources`.
    pub fn set_sources(&self, sources: Vec<MediaSourceDescriptor>) {
        *self.behavior.lock() = ChannelBehavior::Sources(sources);
    }

    /// Makes `channel_sources` report that enumeration is unsupported.
    pub fn set_unsupported(&self) {
        *self.behavior.lock() = ChannelBehavior::Unsupported;
    }

    /// Makes every call fail with a channel error.
    pub fn set_failure(&self, reason: &str) {
        *self.behavior.lock() = ChannelBehavior::Failure(reason.to_string());
    }

    /// Number of `channel_sources` calls.
    pub fn source_calls(&self) -> usize {
        *self.source_calls.lock()
    }

    /// Recorded `channel_stream` calls, in order.
    pub fn stream_calls(&self) -> Vec<StreamCall> {
        self.stream_calls.lock().clone()
    }
}

#[async_trait]
impl ChannelProvider for MockChannelProvider {
    async fn channel_sources(
        &self,
        _item: &PlayableItem,
        _cancel: &CancellationToken,
    ) -> Result<ChannelSources, SourceError> {
        *self.source_calls.lock() += 1;

        match self.behavior.lock().clone() {
            ChannelBehavior::Sources(sources) => Ok(ChannelSources::Sources(sources)),
            ChannelBehavior::Unsupported => Ok(ChannelSources::Unsupported),
            ChannelBehavior::Failure(reason) => Err(SourceError::Channel { reason }),
        }
    }

    async fn channel_stream(
        &self,
        channel_id: &str,
        media_source_id: Option<&str>,
        current_streams: &[LiveStreamHandle],
        _cancel: &CancellationToken,
    ) -> Result<ChannelStreamInfo, SourceError> {
        let call_index = {
            let mut calls = self.stream_calls.lock();
            calls.push(StreamCall {
                channel_id: channel_id.to_string(),
                media_source_id: media_source_id.map(str::to_string),
                current_stream_ids: current_streams
                    .iter()
                    .map(|stream| stream.unique_id.clone())
                    .collect(),
            });
            calls.len()
        };

        if let ChannelBehavior::Failure(reason) = self.behavior.lock().clone() {
            return Err(SourceError::Channel { reason });
        }

        let mut media_source = MediaSourceDescriptor::new(MediaProtocol::Http);
        media_source.id = media_source_id.map(str::to_string);

        Ok(ChannelStreamInfo {
            media_source: media_source.clone(),
            stream: LiveStreamHandle {
                unique_id: format!("{channel_id}-{call_index}"),
                channel_id: channel_id.to_string(),
                media_source,
                consumer_count: 1,
                opened_at: Utc::now(),
            },
        })
    }
}

/// Mock media source registry.
#[derive(Debug, Default)]
pub struct MockStaticSourceProvider {
    sources: Mutex<Vec<MediaSourceDescriptor>>,
    dynamic_only_args: Mutex<Vec<bool>>,
}

impl MockStaticSourceProvider {
    /// Sets the static sources returned for every item.
    pub fn set_sources(&self, sources: Vec<MediaSourceDescriptor>) {
        *self.sources.lock() = sources;
    }

    /// The `dynamic_only` argument of every call, in order.
    pub fn dynamic_only_args(&self) -> Vec<bool> {
        self.dynamic_only_args.lock().clone()
    }
}

impl StaticSourceProvider for MockStaticSourceProvider {
    fn static_sources(
        &self,
        _item: &PlayableItem,
        dynamic_only: bool,
    ) -> Vec<MediaSourceDescriptor> {
        self.dynamic_only_args.lock().push(dynamic_only);
        self.sources.lock().clone()
    }
}

/// Mock server host with a fixed local URL.
#[derive(Debug)]
pub struct MockAppHost {
    local_url: String,
}

impl AppHost for MockAppHost {
    fn local_api_base_url(&self) -> String {
        self.local_url.clone()
    }
}

/// A full set of mocks, kept so tests can inspect them after the call.
#[derive(Debug, Clone)]
pub struct MockCollaborators {
    pub recordings: Arc<MockRecordingProvider>,
    pub channels: Arc<MockChannelProvider>,
    pub static_sources: Arc<MockStaticSourceProvider>,
    pub app_host: Arc<MockAppHost>,
}

impl MockCollaborators {
    /// Creates mocks whose app host reports `local_url`.
    pub fn new(local_url: &str) -> Self {
        Self {
            recordings: Arc::new(MockRecordingProvider::new()),
            channels: Arc::new(MockChannelProvider::new()),
            static_sources: Arc::new(MockStaticSourceProvider::default()),
            app_host: Arc::new(MockAppHost {
                local_url: local_url.to_string(),
            }),
        }
    }

    /// Builds the trait-object collaborator set over these mocks.
    pub fn collaborators(&self) -> LiveTvCollaborators {
        LiveTvCollaborators {
            recordings: self.recordings.clone(),
            channels: self.channels.clone(),
            static_sources: self.static_sources.clone(),
            app_host: self.app_host.clone(),
        }
    }
}
