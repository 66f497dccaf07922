//! Lineup description loaded from JSON.
//!
//! A lineup lists the playable items, the channels that can stream them,
//! recordings in progress, and the static fallback sources the media
//! registry knows about.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tvsource_core::{ItemId, MediaSourceDescriptor, PlayableItem};

/// Errors that can occur while loading a lineup.
#[derive(Debug, thiserror::Error)]
pub enum LineupError {
    #[error("Failed to read lineup {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid lineup: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid server address: {reason}")]
    InvalidServer { reason: String },
}

/// Address clients use to reach the server locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerAddress {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub base_path: String,
}

impl Default for ServerAddress {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8096,
            base_path: String::new(),
        }
    }
}

/// A tunable channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupChannel {
    pub item_id: ItemId,
    /// False for tuners that cannot list sources ahead of opening.
    #[serde(default = "default_true")]
    pub enumerable: bool,
    #[serde(default)]
    pub sources: Vec<MediaSourceDescriptor>,
}

/// A recording currently being written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupRecording {
    pub recording_id: String,
    pub path: String,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub sources: Vec<MediaSourceDescriptor>,
}

/// Static sources registered for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupStaticSources {
    pub item_id: ItemId,
    pub sources: Vec<MediaSourceDescriptor>,
}

/// Full lineup description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    #[serde(default)]
    pub server: ServerAddress,
    /// Number of tuners shared by all channels
    #[serde(default = "default_tuner_count")]
    pub tuner_count: usize,
    #[serde(default)]
    pub items: Vec<PlayableItem>,
    #[serde(default)]
    pub channels: Vec<LineupChannel>,
    #[serde(default)]
    pub recordings: Vec<LineupRecording>,
    #[serde(default)]
    pub static_sources: Vec<LineupStaticSources>,
}

fn default_true() -> bool {
    true
}

fn default_tuner_count() -> usize {
    2
}

impl Lineup {
    /// Parses a lineup from JSON text.
    ///
    /// # Errors
    /// - `LineupError::Parse` - Text is not a valid lineup
    pub fn from_json(json: &str) -> Result<Self, LineupError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a lineup from a JSON file.
    ///
    /// # Errors
    /// - `LineupError::Io` - File could not be read
    /// - `LineupError::Parse` - File is not a valid lineup
    pub fn load(path: &Path) -> Result<Self, LineupError> {
        let json = std::fs::read_to_string(path).map_err(|source| LineupError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Finds an item by id.
    pub fn item(&self, id: &ItemId) -> Option<&PlayableItem> {
        self.items.iter().find(|item| item.id == *id)
    }
}

#[cfg(test)]
mod tests {
    use tvsource_core::{MediaProtocol, SourceType};

    use super::*;

    const SAMPLE: &str = r#"{
        "items": [{
            "id": "1a2b0000000000000000000000000000",
            "type_name": "LiveTvChannel",
            "name": "News",
            "source_type": "LiveTv"
        }],
        "channels": [{
            "item_id": "1a2b0000000000000000000000000000",
            "sources": [{ "id": "src1", "protocol": "Http", "requires_opening": true }]
        }]
    }"#;

    #[test]
    fn test_parse_sample_lineup() {
        let lineup = Lineup::from_json(SAMPLE).unwrap();

        assert_eq!(lineup.server, ServerAddress::default());
        assert_eq!(lineup.tuner_count, 2);
        assert_eq!(lineup.items[0].source_type, SourceType::LiveTv);
        assert!(lineup.items[0].has_empty_path());

        let channel = &lineup.channels[0];
        assert!(channel.enumerable);
        assert_eq!(channel.sources[0].protocol, MediaProtocol::Http);
        assert!(lineup.item(&channel.item_id).is_some());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            Lineup::from_json("{ not json"),
            Err(LineupError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Lineup::load(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(LineupError::Io { .. })));
    }
}
