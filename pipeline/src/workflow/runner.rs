use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use gazecore::detection::{ExtractStage, NormalizeStage};
use gazecore::overlay::{FixationOverlay, FrameSource, RawVideoSink};
use gazecore::prelude::PipelineStage;
use gazecore::telemetry::MetricsRecorder;
use gazecore::timeline::{DistanceInput, DistanceStage, DistanceTrace};
use gazecore::trial_interface::{FixationSequence, ObjectCenterTrace, TrialPayload};
use std::path::Path;
use std::sync::Arc;

pub struct TrialResult {
    pub fixations: FixationSequence,
    pub distances: DistanceTrace,
    pub notes: Vec<String>,
    pub discarded_clusters: usize,
}

/// Chains the extraction, normalization, and distance stages for one trial.
/// Cloneable so independent trials can run on separate workers; the metrics
/// recorder is the only shared state.
#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    /// `(trials_processed, trials_failed)` so far.
    pub fn metrics_snapshot(&self) -> (usize, usize) {
        self.metrics.snapshot()
    }

    pub fn execute(
        &self,
        payload: &TrialPayload,
        centers: &ObjectCenterTrace,
    ) -> anyhow::Result<TrialResult> {
        match self.run_stages(payload, centers) {
            Ok(result) => {
                self.metrics.record_trial();
                Ok(result)
            }
            Err(err) => {
                self.metrics.record_failure();
                Err(err)
            }
        }
    }

    fn run_stages(
        &self,
        payload: &TrialPayload,
        centers: &ObjectCenterTrace,
    ) -> anyhow::Result<TrialResult> {
        let stage_config = self.config.to_stage_config();

        let mut extract_stage = ExtractStage::new();
        extract_stage
            .initialize(&stage_config)
            .context("initializing extract stage")?;
        let extract_output = extract_stage
            .execute(payload.trace.clone())
            .context("executing extract stage")?;
        extract_stage.cleanup();

        let mut normalize_stage = NormalizeStage::new();
        normalize_stage
            .initialize(&stage_config)
            .context("initializing normalize stage")?;
        let normalize_output = normalize_stage
            .execute(extract_output.payload.clone())
            .context("executing normalize stage")?;
        normalize_stage.cleanup();

        let mut distance_stage = DistanceStage::new();
        distance_stage
            .initialize(&stage_config)
            .context("initializing distance stage")?;
        let distance_output = distance_stage
            .execute(DistanceInput {
                fixations: normalize_output.payload.clone(),
                centers: centers.clone(),
            })
            .context("executing distance stage")?;
        distance_stage.cleanup();

        let mut notes = extract_output.metadata.notes.clone();
        notes.extend(normalize_output.metadata.notes.clone());
        notes.extend(distance_output.metadata.notes.clone());

        Ok(TrialResult {
            fixations: normalize_output.payload,
            distances: distance_output.payload,
            notes,
            discarded_clusters: extract_output.metadata.discarded_clusters.unwrap_or(0),
        })
    }

    /// Renders the annotated video artifact for one trial's fixations.
    pub fn render_overlay<S: FrameSource>(
        &self,
        source: &mut S,
        fixations: &FixationSequence,
        output_path: &Path,
    ) -> anyhow::Result<usize> {
        let mut sink = RawVideoSink::create(output_path)
            .with_context(|| format!("opening overlay sink {}", output_path.display()))?;
        let mut overlay = FixationOverlay::new(self.config.frame_rate);
        let written = overlay
            .run(source, &mut sink, fixations)
            .context("rendering fixation overlay")?;
        Ok(written)
    }
}
