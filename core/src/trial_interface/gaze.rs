use crate::prelude::{StageError, StageResult};
use serde::{Deserialize, Serialize};

/// One instantaneous gaze reading. Timestamps are assumed non-decreasing
/// within a trial; upstream ingestion does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl GazeSample {
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }
}

/// Chronologically ordered gaze samples for a single trial.
///
/// Non-empty by construction: the extraction pass seeds its running center
/// from the first sample, so an empty trace is an upstream data problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GazeTrace {
    samples: Vec<GazeSample>,
}

impl GazeTrace {
    pub fn new(samples: Vec<GazeSample>) -> StageResult<Self> {
        if samples.is_empty() {
            return Err(StageError::EmptyInput("gaze trace has no samples".into()));
        }
        Ok(Self { samples })
    }

    /// Builds a trace from the three parallel columns produced by the raw
    /// gaze CSV ingestion.
    pub fn from_columns(xs: &[f64], ys: &[f64], ts: &[f64]) -> StageResult<Self> {
        if xs.len() != ys.len() || xs.len() != ts.len() {
            return Err(StageError::Internal(format!(
                "column length mismatch: x={} y={} t={}",
                xs.len(),
                ys.len(),
                ts.len()
            )));
        }
        let samples = xs
            .iter()
            .zip(ys)
            .zip(ts)
            .map(|((&x, &y), &t)| GazeSample::new(x, y, t))
            .collect();
        Self::new(samples)
    }

    pub fn samples(&self) -> &[GazeSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Per-frame object locations extracted from a mask video: one normalized
/// `(x, y)` gravity center per frame at a fixed frame rate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectCenterTrace {
    centers: Vec<(f64, f64)>,
}

impl ObjectCenterTrace {
    pub fn new(centers: Vec<(f64, f64)>) -> Self {
        Self { centers }
    }

    pub fn centers(&self) -> &[(f64, f64)] {
        &self.centers
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}
