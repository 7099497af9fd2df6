use crate::detection::cluster::ClusterBuffer;
use crate::math::geometry::GeometryHelper;
use crate::prelude::{
    PipelineStage, StageConfig, StageError, StageMetadata, StageOutput, StageResult,
};
use crate::telemetry::log::LogManager;
use crate::trial_interface::{FixationSequence, GazeTrace};

/// Dispersion-threshold fixation extraction, two passes per cluster.
///
/// Pass one grows a candidate cluster around a drifting running mean: a
/// sample joins while its distance to the current center stays under `t1`,
/// and the center is recomputed from all members after every acceptance. A
/// sample that breaks the threshold closes the cluster and becomes the seed
/// center of the next one without joining it. Pass two runs at flush time
/// inside [`ClusterBuffer::flush`].
pub struct ExtractStage {
    config: Option<StageConfig>,
    logger: LogManager,
}

impl ExtractStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new(),
        }
    }
}

impl Default for ExtractStage {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStage for ExtractStage {
    type Input = GazeTrace;
    type Output = StageOutput<FixationSequence>;

    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        if config.t1 <= 0.0 || config.t2 <= 0.0 || config.min_dur <= 0.0 {
            return Err(StageError::DegenerateInput(format!(
                "thresholds must be positive: t1={} t2={} min_dur={}",
                config.t1, config.t2, config.min_dur
            )));
        }
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: GazeTrace) -> StageResult<Self::Output> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        let samples = input.samples();
        let first = samples
            .first()
            .ok_or_else(|| StageError::EmptyInput("gaze trace has no samples".into()))?;

        // The first sample sits at distance zero from its own seed, so it
        // always joins the opening cluster.
        let mut center = (first.x, first.y);
        let mut cluster = ClusterBuffer::new();
        let mut fixations = FixationSequence::default();
        let mut discarded = 0usize;

        for &sample in samples {
            let dist = GeometryHelper::dist2p(center.0, center.1, sample.x, sample.y);
            if dist < config.t1 {
                cluster.push(sample);
                if let Some(drifted) = cluster.center() {
                    center = drifted;
                }
            } else {
                if !cluster.is_empty() {
                    match cluster.flush(config.t2, config.min_dur) {
                        Some(fixation) => fixations.push(fixation),
                        None => discarded += 1,
                    }
                }
                cluster.clear();
                center = (sample.x, sample.y);
            }
        }

        // The trailing in-progress cluster is dropped unless configured
        // otherwise, matching the legacy extraction exactly.
        if !cluster.is_empty() {
            if config.flush_trailing {
                match cluster.flush(config.t2, config.min_dur) {
                    Some(fixation) => fixations.push(fixation),
                    None => discarded += 1,
                }
            } else {
                discarded += 1;
            }
        }

        self.logger.record(&format!(
            "ExtractStage fixations {} from {} samples",
            fixations.len(),
            samples.len()
        ));

        let metadata = StageMetadata {
            fixation_count: Some(fixations.len()),
            discarded_clusters: Some(discarded),
            notes: vec![format!(
                "extracted {} fixations, discarded {} clusters",
                fixations.len(),
                discarded
            )],
        };

        Ok(StageOutput {
            payload: fixations,
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial_interface::GazeSample;

    fn config(t1: f64, t2: f64, min_dur: f64) -> StageConfig {
        StageConfig {
            t1,
            t2,
            min_dur,
            ..Default::default()
        }
    }

    fn trace(points: &[(f64, f64, f64)]) -> GazeTrace {
        GazeTrace::new(
            points
                .iter()
                .map(|&(x, y, t)| GazeSample::new(x, y, t))
                .collect(),
        )
        .unwrap()
    }

    fn extract(points: &[(f64, f64, f64)], cfg: StageConfig) -> StageOutput<FixationSequence> {
        let mut stage = ExtractStage::new();
        stage.initialize(&cfg).unwrap();
        let output = stage.execute(trace(points)).unwrap();
        stage.cleanup();
        output
    }

    #[test]
    fn single_sample_trace_yields_no_fixations() {
        let output = extract(&[(0.5, 0.5, 0.0)], config(0.05, 0.05, 0.05));
        assert!(output.payload.is_empty());
        assert_eq!(output.metadata.discarded_clusters, Some(1));
    }

    #[test]
    fn stable_gaze_followed_by_saccade_emits_one_fixation() {
        let points = [
            (0.0, 0.0, 0.0),
            (0.001, 0.001, 0.1),
            (0.002, 0.0, 0.2),
            (5.0, 5.0, 0.3),
        ];
        let output = extract(&points, config(0.05, 0.05, 0.05));

        let fixations = output.payload.fixations();
        assert_eq!(fixations.len(), 1);
        let fix = &fixations[0];
        assert!((fix.x - 0.001).abs() < 1e-12);
        assert!((fix.y - 0.001 / 3.0).abs() < 1e-12);
        assert_eq!(fix.start, 0.0);
        assert_eq!(fix.end, 0.2);
        assert_eq!(fix.sample_count, 3);
        // The saccade target seeds a trailing cluster that is never flushed.
        assert_eq!(output.metadata.discarded_clusters, Some(1));
    }

    #[test]
    fn duration_equals_span_and_respects_min_dur_boundary() {
        let points = [
            (0.0, 0.0, 0.0),
            (0.001, 0.0, 0.05),
            (5.0, 5.0, 0.1),
            (5.001, 5.0, 0.2),
        ];
        let output = extract(&points, config(0.05, 0.05, 0.05));
        let fixations = output.payload.fixations();
        assert_eq!(fixations.len(), 1);
        assert_eq!(fixations[0].duration, fixations[0].end - fixations[0].start);
        assert_eq!(fixations[0].duration, 0.05);
    }

    #[test]
    fn extraction_is_deterministic() {
        let points = [
            (0.1, 0.1, 0.0),
            (0.101, 0.1, 0.04),
            (0.102, 0.101, 0.09),
            (0.9, 0.9, 0.15),
            (0.901, 0.9, 0.2),
            (0.9, 0.901, 0.26),
            (0.1, 0.1, 0.31),
        ];
        let cfg = config(0.05, 0.05, 0.05);
        let a = extract(&points, cfg.clone());
        let b = extract(&points, cfg);
        assert_eq!(a.payload.fixations(), b.payload.fixations());
    }

    #[test]
    fn breaking_sample_is_not_pre_added_to_the_new_cluster() {
        // The break at (1,1) seeds the next center; only the following
        // sample joins, so the second fixation spans t=0.2..0.3.
        let points = [
            (0.0, 0.0, 0.0),
            (0.001, 0.0, 0.1),
            (1.0, 1.0, 0.15),
            (1.001, 1.0, 0.2),
            (1.0, 1.001, 0.3),
            (9.0, 9.0, 0.4),
        ];
        let output = extract(&points, config(0.05, 0.05, 0.05));
        let fixations = output.payload.fixations();
        assert_eq!(fixations.len(), 2);
        assert_eq!(fixations[1].start, 0.2);
        assert_eq!(fixations[1].end, 0.3);
        assert_eq!(fixations[1].sample_count, 2);
    }

    #[test]
    fn flush_trailing_recovers_the_final_cluster() {
        let points = [
            (0.0, 0.0, 0.0),
            (0.001, 0.0, 0.05),
            (5.0, 5.0, 0.1),
            (5.001, 5.0, 0.2),
            (5.0, 5.001, 0.3),
        ];
        let mut cfg = config(0.05, 0.05, 0.05);

        let discard = extract(&points, cfg.clone());
        assert_eq!(discard.payload.len(), 1);

        cfg.flush_trailing = true;
        let kept = extract(&points, cfg);
        assert_eq!(kept.payload.len(), 2);
        assert_eq!(kept.payload.fixations()[1].end, 0.3);
    }

    #[test]
    fn tiny_t2_empties_every_cluster() {
        let points = [(0.0, 0.0, 0.0), (0.01, 0.01, 0.1), (5.0, 5.0, 0.2)];
        let mut cfg = config(0.05, 0.05, 0.05);
        cfg.t2 = 1e-12;
        let output = extract(&points, cfg);
        assert!(output.payload.is_empty());
    }

    #[test]
    fn non_positive_thresholds_are_rejected_at_initialize() {
        let mut stage = ExtractStage::new();
        assert!(stage.initialize(&config(0.0, 0.05, 0.05)).is_err());
        assert!(stage.initialize(&config(0.05, -1.0, 0.05)).is_err());
    }
}
