//! Simulated channel and tuner subsystem.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tvsource_core::{
    ChannelProvider, ChannelSources, ChannelStreamInfo, LiveStreamHandle, MediaProtocol,
    MediaSourceDescriptor, PlayableItem, SourceError,
};
use uuid::Uuid;

use crate::lineup::LineupChannel;

/// Channel subsystem backed by a lineup.
///
/// Streams already open for the same channel and media source are shared
/// instead of taking another tuner.
#[derive(Debug)]
pub struct SimulatedChannelProvider {
    channels: HashMap<String, LineupChannel>,
    tuner_count: usize,
    latency: Duration,
}

impl SimulatedChannelProvider {
    /// Creates a provider over the given channels.
    pub fn new(channels: Vec<LineupChannel>, tuner_count: usize, latency: Duration) -> Self {
        let channels = channels
            .into_iter()
            .map(|channel| (channel.item_id.to_hex(), channel))
            .collect();

        Self {
            channels,
            tuner_count,
            latency,
        }
    }

    fn channel(&self, channel_id: &str) -> Result<&LineupChannel, SourceError> {
        self.channels
            .get(channel_id)
            .ok_or_else(|| SourceError::Channel {
                reason: format!("Channel {channel_id} not found"),
            })
    }

    async fn simulate_latency(&self, cancel: &CancellationToken) -> Result<(), SourceError> {
        if self.latency.is_zero() {
            return Ok(());
        }

        tokio::select! {
            () = cancel.cancelled() => Err(SourceError::Cancelled),
            () = tokio::time::sleep(self.latency) => Ok(()),
        }
    }

    fn stream_source(
        channel: &LineupChannel,
        media_source_id: Option<&str>,
    ) -> Result<MediaSourceDescriptor, SourceError> {
        let Some(media_source_id) = media_source_id else {
            return Ok(channel
                .sources
                .first()
                .cloned()
                .unwrap_or_else(|| MediaSourceDescriptor::new(MediaProtocol::Http)));
        };

        channel
            .sources
            .iter()
            .find(|source| source.id.as_deref() == Some(media_source_id))
            .cloned()
            .ok_or_else(|| SourceError::Channel {
                reason: format!("Media source {media_source_id} not found"),
            })
    }
}

#[async_trait]
impl ChannelProvider for SimulatedChannelProvider {
    async fn channel_sources(
        &self,
        item: &PlayableItem,
        cancel: &CancellationToken,
    ) -> Result<ChannelSources, SourceError> {
        self.simulate_latency(cancel).await?;

        let channel = self.channel(&item.id.to_hex())?;
        if !channel.enumerable {
            return Ok(ChannelSources::Unsupported);
        }

        Ok(ChannelSources::Sources(channel.sources.clone()))
    }

    async fn channel_stream(
        &self,
        channel_id: &str,
        media_source_id: Option<&str>,
        current_streams: &[LiveStreamHandle],
        cancel: &CancellationToken,
    ) -> Result<ChannelStreamInfo, SourceError> {
        self.simulate_latency(cancel).await?;

        let channel = self.channel(channel_id)?;
        let media_source = Self::stream_source(channel, media_source_id)?;

        let shared = current_streams.iter().find(|stream| {
            stream.channel_id == channel_id && stream.media_source.id == media_source.id
        });

        if let Some(shared) = shared {
            tracing::debug!(stream_id = %shared.unique_id, "Sharing existing live stream");

            let mut stream = shared.clone();
            stream.consumer_count += 1;
            return Ok(ChannelStreamInfo {
                media_source,
                stream,
            });
        }

        if current_streams.len() >= self.tuner_count {
            return Err(SourceError::Channel {
                reason: format!("No tuners available ({} in use)", current_streams.len()),
            });
        }

        let stream = LiveStreamHandle {
            unique_id: Uuid::new_v4().simple().to_string(),
            channel_id: channel_id.to_string(),
            media_source: media_source.clone(),
            consumer_count: 1,
            opened_at: Utc::now(),
        };
        tracing::debug!(stream_id = %stream.unique_id, channel_id, "Opened new live stream");

        Ok(ChannelStreamInfo {
            media_source,
            stream,
        })
    }
}
