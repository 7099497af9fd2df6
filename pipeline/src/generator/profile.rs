use gazecore::trial_interface::{GazeTrace, ObjectCenterTrace, TrialAncillary, TrialPayload};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic gaze trial.
///
/// The trace is a sequence of dwell periods at well-separated targets,
/// jittered per sample, with the saccade between dwells appearing as a
/// spatial jump. Target positions are laid out on a deterministic sweep so
/// a default extraction finds one fixation per completed dwell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub dwell_points: usize,
    pub samples_per_dwell: usize,
    /// Seconds between consecutive gaze samples (120 Hz tracker).
    pub sample_interval: f64,
    /// Spatial jitter radius within a dwell, in normalized units.
    pub jitter: f64,
    pub seed: u64,
    /// Length of the synthetic object-center trace, in frames.
    pub frame_count: usize,
    pub participant: u32,
    pub session: u32,
    pub description: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dwell_points: 5,
            samples_per_dwell: 40,
            sample_interval: 1.0 / 120.0,
            jitter: 0.002,
            seed: 0,
            frame_count: 150,
            participant: 1,
            session: 0,
            description: None,
        }
    }
}

impl GeneratorConfig {
    fn normalized_dwells(&self) -> usize {
        self.dwell_points.max(1)
    }

    fn normalized_samples(&self) -> usize {
        self.samples_per_dwell.max(1)
    }

    fn dwell_target(&self, dwell_index: usize) -> (f64, f64) {
        let dwells = self.normalized_dwells();
        let fraction = if dwells > 1 {
            dwell_index as f64 / (dwells - 1) as f64
        } else {
            0.0
        };
        let x = 0.1 + 0.8 * fraction;
        let y = if dwell_index % 2 == 0 { 0.3 } else { 0.7 };
        (x, y)
    }
}

fn build_gaze_columns(config: &GeneratorConfig) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let dwells = config.normalized_dwells();
    let per_dwell = config.normalized_samples();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut xs = Vec::with_capacity(dwells * per_dwell);
    let mut ys = Vec::with_capacity(dwells * per_dwell);
    let mut ts = Vec::with_capacity(dwells * per_dwell);

    let mut t = 0.0;
    for dwell_index in 0..dwells {
        let (tx, ty) = config.dwell_target(dwell_index);
        for _ in 0..per_dwell {
            xs.push(tx + rng.gen_range(-config.jitter..config.jitter));
            ys.push(ty + rng.gen_range(-config.jitter..config.jitter));
            ts.push(t);
            t += config.sample_interval;
        }
    }

    (xs, ys, ts)
}

pub fn build_trial_payload_from_config(config: &GeneratorConfig) -> anyhow::Result<TrialPayload> {
    let (xs, ys, ts) = build_gaze_columns(config);
    let trial_stopped = ts.last().copied().unwrap_or(0.0);
    let trace = GazeTrace::from_columns(&xs, &ys, &ts)?;

    let ancillary = TrialAncillary {
        video: format!("synthetic://trial/{}", config.seed),
        participant: config.participant,
        session: config.session,
        trial_started: 0.0,
        trial_stopped,
        description: config.description.clone(),
    };

    Ok(TrialPayload::new(trace, ancillary))
}

pub fn build_trial_payload(seed: u64) -> anyhow::Result<TrialPayload> {
    let config = GeneratorConfig {
        seed,
        ..Default::default()
    };
    build_trial_payload_from_config(&config)
}

/// Synthetic object-center trace: a target drifting left-to-right with a
/// slow vertical oscillation, one normalized position per frame.
pub fn build_object_centers(config: &GeneratorConfig) -> ObjectCenterTrace {
    let frames = config.frame_count;
    let centers = (0..frames)
        .map(|i| {
            let fraction = if frames > 1 {
                i as f64 / (frames - 1) as f64
            } else {
                0.0
            };
            let x = 0.2 + 0.6 * fraction;
            let y = 0.5 + 0.2 * (fraction * std::f64::consts::TAU).sin();
            (x, y)
        })
        .collect();
    ObjectCenterTrace::new(centers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_builds_expected_sample_count() {
        let payload = build_trial_payload(7).unwrap();
        assert_eq!(payload.trace.len(), 5 * 40);
        assert_eq!(payload.ancillary.participant, 1);
    }

    #[test]
    fn generator_is_deterministic_per_seed() {
        let a = build_trial_payload(3).unwrap();
        let b = build_trial_payload(3).unwrap();
        assert_eq!(a.trace.samples(), b.trace.samples());

        let c = build_trial_payload(4).unwrap();
        assert_ne!(a.trace.samples(), c.trace.samples());
    }

    #[test]
    fn dwell_targets_are_well_separated() {
        let config = GeneratorConfig::default();
        for i in 1..config.dwell_points {
            let (x0, _) = config.dwell_target(i - 1);
            let (x1, _) = config.dwell_target(i);
            assert!((x1 - x0).abs() > 0.1);
        }
    }

    #[test]
    fn object_centers_cover_the_frame_count() {
        let config = GeneratorConfig {
            frame_count: 96,
            ..Default::default()
        };
        let centers = build_object_centers(&config);
        assert_eq!(centers.len(), 96);
        let first = centers.centers()[0];
        let last = centers.centers()[95];
        assert!(first.0 < last.0);
    }
}
