//! Simulated recording storage.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tvsource_core::{
    ActiveRecordingContext, MediaSourceDescriptor, RecordingProvider, SourceError,
};

use crate::lineup::LineupRecording;

/// Recording storage backed by a lineup's in-progress recordings.
#[derive(Debug)]
pub struct SimulatedRecordingProvider {
    recordings: HashMap<String, LineupRecording>,
    started_at: DateTime<Utc>,
}

impl SimulatedRecordingProvider {
    /// Creates a provider; every recording is treated as started now.
    pub fn new(recordings: Vec<LineupRecording>) -> Self {
        let recordings = recordings
            .into_iter()
            .map(|recording| (recording.path.clone(), recording))
            .collect();

        Self {
            recordings,
            started_at: Utc::now(),
        }
    }
}

#[async_trait]
impl RecordingProvider for SimulatedRecordingProvider {
    fn active_recording(&self, path: Option<&str>) -> Option<ActiveRecordingContext> {
        let recording = self.recordings.get(path?)?;

        Some(ActiveRecordingContext {
            recording_id: recording.recording_id.clone(),
            path: recording.path.clone(),
            channel_id: recording.channel_id.clone(),
            started_at: self.started_at,
        })
    }

    async fn recording_sources(
        &self,
        recording: &ActiveRecordingContext,
        cancel: &CancellationToken,
    ) -> Result<Vec<MediaSourceDescriptor>, SourceError> {
        if cancel.is_cancelled() {
            return Err(SourceError::Cancelled);
        }

        self.recordings
            .get(&recording.path)
            .map(|recording| recording.sources.clone())
            .ok_or_else(|| SourceError::Recording {
                reason: format!("Recording {} is no longer active", recording.recording_id),
            })
    }
}
