//! Simulated media registry and server host.

use std::collections::HashMap;

use tvsource_core::{AppHost, ItemId, MediaSourceDescriptor, PlayableItem, StaticSourceProvider};
use url::Url;

use crate::lineup::{LineupError, LineupStaticSources, ServerAddress};

/// Static media sources keyed by item.
#[derive(Debug, Default)]
pub struct SimulatedMediaRegistry {
    sources: HashMap<ItemId, Vec<MediaSourceDescriptor>>,
}

impl SimulatedMediaRegistry {
    /// Creates a registry from lineup entries.
    pub fn new(entries: Vec<LineupStaticSources>) -> Self {
        let sources = entries
            .into_iter()
            .map(|entry| (entry.item_id, entry.sources))
            .collect();

        Self { sources }
    }
}

impl StaticSourceProvider for SimulatedMediaRegistry {
    fn static_sources(
        &self,
        item: &PlayableItem,
        dynamic_only: bool,
    ) -> Vec<MediaSourceDescriptor> {
        // Lineup sources are all static
        if dynamic_only {
            return Vec::new();
        }

        self.sources.get(&item.id).cloned().unwrap_or_default()
    }
}

/// Server host reporting a fixed local API URL.
#[derive(Debug, Clone)]
pub struct LocalAppHost {
    base_url: Url,
}

impl LocalAppHost {
    /// Builds the local API URL from a server address.
    ///
    /// # Errors
    /// - `LineupError::InvalidServer` - Host or base path do not form a valid URL
    pub fn new(server: &ServerAddress) -> Result<Self, LineupError> {
        let mut base_url = Url::parse(&format!("http://{}:{}", server.host, server.port))
            .map_err(|e| LineupError::InvalidServer {
                reason: e.to_string(),
            })?;

        let base_path = server.base_path.trim_matches('/');
        if !base_path.is_empty() {
            base_url.set_path(base_path);
        }

        Ok(Self { base_url })
    }
}

impl AppHost for LocalAppHost {
    fn local_api_base_url(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}
