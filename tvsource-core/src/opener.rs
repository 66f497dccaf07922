//! Turns open tokens back into live streams.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::errors::SourceError;
use crate::media::LiveStreamHandle;
use crate::token::OpenToken;
use crate::traits::{ChannelProvider, until_cancelled};

/// Opens live streams from tokens issued by the resolver.
///
/// Tokens may be opened any number of times. Whether an open reuses an
/// existing stream is decided by the channel provider.
#[derive(Debug, Clone)]
pub struct StreamOpener {
    channels: Arc<dyn ChannelProvider>,
}

impl StreamOpener {
    /// Creates an opener backed by the given channel provider.
    pub fn new(channels: Arc<dyn ChannelProvider>) -> Self {
        Self { channels }
    }

    /// Opens the stream a token refers to.
    ///
    /// The token's item id is used as the channel id and its source id, when
    /// present, selects the media source.
    ///
    /// # Errors
    /// - `SourceError::InvalidToken` - Token has fewer than two fields
    /// - `SourceError::Cancelled` - `cancel` fired before the stream opened
    /// - `SourceError::Channel` - Channel subsystem could not provide a stream
    pub async fn open_stream(
        &self,
        token: &str,
        current_streams: &[LiveStreamHandle],
        cancel: &CancellationToken,
    ) -> Result<LiveStreamHandle, SourceError> {
        let token = OpenToken::decode(token)?;

        if cancel.is_cancelled() {
            return Err(SourceError::Cancelled);
        }

        tracing::debug!(
            channel_id = %token.item_id,
            media_source_id = ?token.source_id,
            current_streams = current_streams.len(),
            "Opening channel stream"
        );

        let info = until_cancelled(
            cancel,
            self.channels.channel_stream(
                &token.item_id,
                token.source_id.as_deref(),
                current_streams,
                cancel,
            ),
        )
        .await?;

        Ok(info.stream)
    }
}
