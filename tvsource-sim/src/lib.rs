//! TvSource Simulation - In-memory live TV lineup
//!
//! Implements every collaborator the source resolver and stream opener need
//! on top of a JSON lineup, so resolution and opening can be exercised
//! without tuners, recording storage, or a media library.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use tokio_util::sync::CancellationToken;
//! use tvsource_core::MediaSourceProvider;
//! use tvsource_sim::{Lineup, SimulatedLiveTv, SimulationConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let lineup = Lineup::load(Path::new("lineup.json"))?;
//! let live_tv = SimulatedLiveTv::new(lineup, SimulationConfig::default())?;
//!
//! let provider = live_tv.provider(Default::default());
//! for item in live_tv.lineup().items.iter() {
//!     let sources = provider.media_sources(item, &CancellationToken::new()).await?;
//!     println!("{}: {} sources", item.name, sources.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod lineup;
pub mod recordings;
pub mod registry;

use std::sync::Arc;
use std::time::Duration;

pub use channels::SimulatedChannelProvider;
pub use lineup::{
    Lineup, LineupChannel, LineupError, LineupRecording, LineupStaticSources, ServerAddress,
};
pub use recordings::SimulatedRecordingProvider;
pub use registry::{LocalAppHost, SimulatedMediaRegistry};
use tvsource_core::{LiveTvCollaborators, LiveTvMediaSourceProvider, SourceConfig};

/// Simulation parameters.
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    /// Delay applied to every channel subsystem call
    pub channel_latency: Duration,
}

impl SimulationConfig {
    /// Creates a configuration with simulated tuner latency.
    pub fn with_channel_latency(latency: Duration) -> Self {
        Self {
            channel_latency: latency,
        }
    }
}

/// A lineup wired up as a full collaborator set.
#[derive(Debug, Clone)]
pub struct SimulatedLiveTv {
    lineup: Lineup,
    collaborators: LiveTvCollaborators,
}

impl SimulatedLiveTv {
    /// Builds the simulated subsystems for a lineup.
    ///
    /// # Errors
    /// - `LineupError::InvalidServer` - Server address does not form a valid URL
    pub fn new(lineup: Lineup, config: SimulationConfig) -> Result<Self, LineupError> {
        let app_host = LocalAppHost::new(&lineup.server)?;

        let collaborators = LiveTvCollaborators {
            recordings: Arc::new(SimulatedRecordingProvider::new(lineup.recordings.clone())),
            channels: Arc::new(SimulatedChannelProvider::new(
                lineup.channels.clone(),
                lineup.tuner_count,
                config.channel_latency,
            )),
            static_sources: Arc::new(SimulatedMediaRegistry::new(lineup.static_sources.clone())),
            app_host: Arc::new(app_host),
        };

        Ok(Self {
            lineup,
            collaborators,
        })
    }

    /// The lineup this simulation was built from.
    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    /// The simulated collaborator set.
    pub fn collaborators(&self) -> LiveTvCollaborators {
        self.collaborators.clone()
    }

    /// Creates a live TV provider over the simulated collaborators.
    pub fn provider(&self, config: SourceConfig) -> LiveTvMediaSourceProvider {
        LiveTvMediaSourceProvider::new(self.collaborators(), config)
    }
}
