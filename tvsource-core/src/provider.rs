//! Registry-facing media source provider for live TV.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::config::SourceConfig;
use crate::errors::SourceError;
use crate::media::{LiveStreamHandle, MediaSourceDescriptor, PlayableItem};
use crate::opener::StreamOpener;
use crate::resolver::SourceResolver;
use crate::traits::LiveTvCollaborators;

/// A provider the media source registry can ask for sources and streams.
///
/// Providers that have nothing to offer for an item return an empty list
/// rather than an error.
#[async_trait]
pub trait MediaSourceProvider: Send + Sync + std::fmt::Debug {
    /// Lists the media sources this provider can serve for an item.
    ///
    /// # Errors
    /// - `SourceError::Cancelled` - Request cancelled
    /// - Any collaborator failure, unchanged
    async fn media_sources(
        &self,
        item: &PlayableItem,
        cancel: &CancellationToken,
    ) -> Result<Vec<MediaSourceDescriptor>, SourceError>;

    /// Opens a source previously returned with an open token.
    ///
    /// # Errors
    /// - `SourceError::InvalidToken` - Token could not be decoded
    /// - `SourceError::Cancelled` - Request cancelled
    /// - Any collaborator failure, unchanged
    async fn open_media_source(
        &self,
        open_token: &str,
        current_streams: &[LiveStreamHandle],
        cancel: &CancellationToken,
    ) -> Result<LiveStreamHandle, SourceError>;
}

/// Live TV provider composed of a resolver and an opener over one
/// collaborator set.
#[derive(Debug, Clone)]
pub struct LiveTvMediaSourceProvider {
    resolver: SourceResolver,
    opener: StreamOpener,
}

impl LiveTvMediaSourceProvider {
    /// Creates the provider.
    pub fn new(collaborators: LiveTvCollaborators, config: SourceConfig) -> Self {
        let opener = StreamOpener::new(collaborators.channels.clone());
        Self {
            resolver: SourceResolver::new(collaborators, config),
            opener,
        }
    }

    /// Returns the underlying resolver.
    pub fn resolver(&self) -> &SourceResolver {
        &self.resolver
    }

    /// Returns the underlying opener.
    pub fn opener(&self) -> &StreamOpener {
        &self.opener
    }
}

#[async_trait]
impl MediaSourceProvider for LiveTvMediaSourceProvider {
    async fn media_sources(
        &self,
        item: &PlayableItem,
        cancel: &CancellationToken,
    ) -> Result<Vec<MediaSourceDescriptor>, SourceError> {
        self.resolver.resolve_sources(item, cancel).await
    }

    async fn open_media_source(
        &self,
        open_token: &str,
        current_streams: &[LiveStreamHandle],
        cancel: &CancellationToken,
    ) -> Result<LiveStreamHandle, SourceError> {
        self.opener
            .open_stream(open_token, current_streams, cancel)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaProtocol;
    use crate::test_mocks::{MockCollaborators, test_item};

    #[tokio::test]
    async fn test_resolve_then_open_round_trip() {
        let mocks = MockCollaborators::new("http://127.0.0.1:8096");
        mocks.channels.set_sources(vec![
            MediaSourceDescriptor::new(MediaProtocol::Http)
                .with_id("tuner-a")
                .requiring_opening(),
        ]);
        let provider: Box<dyn MediaSourceProvider> = Box::new(LiveTvMediaSourceProvider::new(
            mocks.collaborators(),
            SourceConfig::default(),
        ));
        let cancel = CancellationToken::new();
        let item = test_item(None);

        let sources = provider.media_sources(&item, &cancel).await.unwrap();
        let token = sources[0].open_token.clone().unwrap();
        let stream = provider
            .open_media_source(&token, &[], &cancel)
            .await
            .unwrap();

        assert_eq!(stream.channel_id, item.id.to_hex());
        let calls = mocks.channels.stream_calls();
        assert_eq!(calls[0].media_source_id.as_deref(), Some("tuner-a"));
    }

    #[tokio::test]
    async fn test_token_can_be_opened_repeatedly() {
        let mocks = MockCollaborators::new("http://127.0.0.1:8096");
        let provider =
            LiveTvMediaSourceProvider::new(mocks.collaborators(), SourceConfig::default());
        let cancel = CancellationToken::new();

        for _ in 0..3 {
            tokio_test::assert_ok!(
                provider
                    .open_media_source("LiveTvChannel_abc_src1", &[], &cancel)
                    .await
            );
        }

        assert_eq!(mocks.channels.stream_calls().len(), 3);
    }
}
