use serde::{Deserialize, Serialize};

/// Normalization parameters for the min-max rescale of fixation coordinates.
///
/// `invert_y` preserves the vertical-axis flip between the gaze coordinate
/// convention (y grows upward) and the video convention (y grows downward).
/// It is intentional behavior, not a correction target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NormalizeParams {
    pub margin_x: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub invert_y: bool,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            margin_x: 0.011,
            scale_x: 1.22,
            scale_y: 1.15,
            invert_y: true,
        }
    }
}

/// Shared configuration for each processing stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    /// Coarse dispersion threshold for the first clustering pass.
    pub t1: f64,
    /// Refinement threshold for the second (outlier-rejection) pass.
    pub t2: f64,
    /// Minimum retained fixation duration, same units as the timestamps.
    pub min_dur: f64,
    /// Frame rate used to align fixation intervals to the video timeline.
    pub frame_rate: f64,
    /// Hard cap on the number of frames visited by the distance computation.
    pub max_frames: usize,
    /// Whether the trailing in-progress cluster is flushed at end-of-trace.
    pub flush_trailing: bool,
    pub normalize: NormalizeParams,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            t1: 0.01,
            t2: 0.01,
            min_dur: 0.001,
            frame_rate: 24.0,
            max_frames: 150,
            flush_trailing: false,
            normalize: NormalizeParams::default(),
        }
    }
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub fixation_count: Option<usize>,
    pub discarded_clusters: Option<usize>,
    pub notes: Vec<String>,
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput<T> {
    pub payload: T,
    pub metadata: StageMetadata,
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("empty input: {0}")]
    EmptyInput(String),
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    #[error("sink unavailable: {0}")]
    SinkUnavailable(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// Trait describing the lifecycle of a gaze-processing stage.
pub trait PipelineStage {
    type Input;
    type Output;

    fn initialize(&mut self, config: &StageConfig) -> StageResult<()>;
    fn execute(&mut self, input: Self::Input) -> StageResult<Self::Output>;
    fn cleanup(&mut self);
}
