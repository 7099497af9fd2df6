use crate::math::geometry::GeometryHelper;
use crate::prelude::{
    PipelineStage, StageConfig, StageError, StageMetadata, StageOutput, StageResult,
};
use crate::telemetry::log::LogManager;
use crate::timeline::clock::{FrameClock, FrameCursor};
use crate::trial_interface::{FixationSequence, ObjectCenterTrace};

/// A normalized fixation sequence paired with the object-center trace of the
/// trial's stimulus video.
#[derive(Debug, Clone)]
pub struct DistanceInput {
    pub fixations: FixationSequence,
    pub centers: ObjectCenterTrace,
}

/// Per-frame squared distance between gaze fixation and object center.
///
/// Frames never reached by a fixation interval hold `None`; the legacy
/// output wrote 0.0 there, which is indistinguishable from a true
/// zero-distance reading. [`DistanceTrace::fill_default`] reproduces that
/// form when parity is needed.
#[derive(Debug, Clone, Default)]
pub struct DistanceTrace {
    values: Vec<Option<f64>>,
}

impl DistanceTrace {
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fill_default(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.unwrap_or(0.0)).collect()
    }
}

/// Walks fixations along the frame timeline and writes the squared distance
/// to the per-frame object center for every frame a fixation covers.
pub struct DistanceStage {
    config: Option<StageConfig>,
    logger: LogManager,
}

impl DistanceStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new(),
        }
    }
}

impl Default for DistanceStage {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStage for DistanceStage {
    type Input = DistanceInput;
    type Output = StageOutput<DistanceTrace>;

    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: DistanceInput) -> StageResult<Self::Output> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        if input.fixations.is_empty() {
            return Err(StageError::EmptyInput(
                "no fixations to align against the object trace".into(),
            ));
        }

        let cap = input.centers.len().min(config.max_frames);
        let mut values = vec![None; cap];
        let mut cursor = FrameCursor::new(FrameClock::new(config.frame_rate));
        let centers = input.centers.centers();

        for fixation in input.fixations.iter() {
            for index in cursor.advance_while_before(fixation.end, cap) {
                let (cx, cy) = centers[index];
                values[index] = Some(GeometryHelper::dist2p_squared(
                    cx, cy, fixation.x, fixation.y,
                ));
            }
        }

        let visited = values.iter().filter(|v| v.is_some()).count();
        self.logger.record(&format!(
            "DistanceStage visited {} of {} frames",
            visited, cap
        ));

        let metadata = StageMetadata {
            notes: vec![format!("visited {} of {} frames", visited, cap)],
            ..Default::default()
        };

        Ok(StageOutput {
            payload: DistanceTrace { values },
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}
