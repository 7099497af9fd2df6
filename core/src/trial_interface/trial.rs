use crate::trial_interface::gaze::GazeTrace;
use serde::{Deserialize, Serialize};

/// Experiment metadata accompanying each trial, as produced by the
/// PsychoPy-metadata ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialAncillary {
    pub video: String,
    pub participant: u32,
    pub session: u32,
    pub trial_started: f64,
    pub trial_stopped: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A trial's gaze trace plus its ancillary metadata, the unit of work the
/// workflow driver hands to the processing core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialPayload {
    pub trace: GazeTrace,
    pub ancillary: TrialAncillary,
}

impl TrialPayload {
    pub fn new(trace: GazeTrace, ancillary: TrialAncillary) -> Self {
        Self { trace, ancillary }
    }
}
