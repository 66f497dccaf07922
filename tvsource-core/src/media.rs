//! Playable items, media source descriptors, and live stream handles.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a playable item.
///
/// Rendered in open tokens as 32 lowercase hex digits without separators,
/// so the rendering can never contain the token delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Creates ItemId from a UUID.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generates a random item id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Fixed-width hex rendering used inside open tokens; same as `Display`.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl From<Uuid> for ItemId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Where an item's playback content comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Regular library content on disk.
    Library,
    /// Live TV channels, programs, and recordings.
    LiveTv,
    /// Content from an external channel plugin.
    Channel,
}

/// An item a client wants to play. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayableItem {
    pub id: ItemId,
    /// Concrete item kind, e.g. `LiveTvChannel` or `LiveTvProgram`.
    pub type_name: String,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    pub source_type: SourceType,
}

impl PlayableItem {
    /// Returns true when the item has no storage path (missing or empty).
    pub fn has_empty_path(&self) -> bool {
        self.path.as_deref().is_none_or(str::is_empty)
    }

    /// Returns true when the item belongs to live TV.
    pub fn is_live_tv(&self) -> bool {
        self.source_type == SourceType::LiveTv
    }
}

/// Transport used to reach a media source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaProtocol {
    File,
    Http,
    Rtmp,
    Rtsp,
    Udp,
    Rtp,
    Ftp,
}

/// Classification of a media source. Live TV sources are always `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MediaSourceType {
    #[default]
    Default,
    Grouping,
    Placeholder,
}

/// One playable candidate for an item.
///
/// `requires_opening` sources must carry an `open_token` once they leave the
/// resolver; the token is what a later open call consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSourceDescriptor {
    /// Provider-scoped identifier.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub protocol: MediaProtocol,
    /// URI or file path; may be missing until the stream is opened.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default)]
    pub buffer_ms: Option<u32>,
    #[serde(default)]
    pub requires_opening: bool,
    #[serde(default)]
    pub open_token: Option<String>,
    #[serde(default)]
    pub source_type: MediaSourceType,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub is_infinite_stream: bool,
    #[serde(default)]
    pub supports_direct_play: bool,
    #[serde(default)]
    pub supports_direct_stream: bool,
}

impl MediaSourceDescriptor {
    /// Creates a bare descriptor for the given protocol.
    pub fn new(protocol: MediaProtocol) -> Self {
        Self {
            id: None,
            name: None,
            protocol,
            path: None,
            container: None,
            buffer_ms: None,
            requires_opening: false,
            open_token: None,
            source_type: MediaSourceType::Default,
            is_remote: false,
            is_infinite_stream: false,
            supports_direct_play: false,
            supports_direct_stream: false,
        }
    }

    /// Sets the provider-scoped identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the path or URI.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets an explicit buffer size.
    pub fn with_buffer_ms(mut self, buffer_ms: u32) -> Self {
        self.buffer_ms = Some(buffer_ms);
        self
    }

    /// Marks the source as needing an explicit open step.
    pub fn requiring_opening(mut self) -> Self {
        self.requires_opening = true;
        self
    }

    /// Returns true when the path is missing or empty.
    pub fn has_empty_path(&self) -> bool {
        self.path.as_deref().is_none_or(str::is_empty)
    }
}

/// Marks an item as currently being recorded.
///
/// Looked up by item path; its presence redirects resolution to the
/// recording subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRecordingContext {
    pub recording_id: String,
    pub path: String,
    #[serde(default)]
    pub channel_id: Option<String>,
    pub started_at: DateTime<Utc>,
}

/// A live stream produced by the channel subsystem.
///
/// Streams may be shared by several consumers; `consumer_count` reflects how
/// many opens currently point at this stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStreamHandle {
    pub unique_id: String,
    pub channel_id: String,
    pub media_source: MediaSourceDescriptor,
    pub consumer_count: u32,
    pub opened_at: DateTime<Utc>,
}

/// Result of asking the channel subsystem for a stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStreamInfo {
    /// Source metadata describing the opened stream.
    pub media_source: MediaSourceDescriptor,
    pub stream: LiveStreamHandle,
}
