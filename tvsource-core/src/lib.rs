//! TvSource Core - Live TV media source negotiation
//!
//! This crate decides which media sources are viable for a live TV item
//! (a live channel stream, an in-progress recording, or a static fallback
//! file), normalizes their playback metadata, and issues open tokens that a
//! later call can turn back into a live stream.

pub mod config;
pub mod errors;
pub mod media;
pub mod opener;
pub mod provider;
pub mod resolver;
pub mod token;
pub mod tracing_setup;
pub mod traits;

#[cfg(test)]
pub mod test_mocks;

// Re-export main types for convenient access
pub use config::SourceConfig;
pub use errors::SourceError;
pub use media::{
    ActiveRecordingContext, ChannelStreamInfo, ItemId, LiveStreamHandle, MediaProtocol,
    MediaSourceDescriptor, MediaSourceType, PlayableItem, SourceType,
};
pub use opener::StreamOpener;
pub use provider::{LiveTvMediaSourceProvider, MediaSourceProvider};
pub use resolver::SourceResolver;
pub use token::{OpenToken, TOKEN_DELIMITER, TokenError};
pub use traits::{
    AppHost, ChannelProvider, ChannelSources, LiveTvCollaborators, RecordingProvider,
    StaticSourceProvider,
};

/// Convenience type alias for Results with SourceError.
pub type Result<T> = std::result::Result<T, SourceError>;
