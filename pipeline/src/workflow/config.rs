use anyhow::Context;
use gazecore::prelude::{NormalizeParams, StageConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub t1: f64,
    pub t2: f64,
    pub min_dur: f64,
    pub frame_rate: f64,
    pub max_frames: usize,
    pub flush_trailing: bool,
    pub margin_x: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub invert_y: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let stage = StageConfig::default();
        Self {
            t1: stage.t1,
            t2: stage.t2,
            min_dur: stage.min_dur,
            frame_rate: stage.frame_rate,
            max_frames: stage.max_frames,
            flush_trailing: stage.flush_trailing,
            margin_x: stage.normalize.margin_x,
            scale_x: stage.normalize.scale_x,
            scale_y: stage.normalize.scale_y,
            invert_y: stage.normalize.invert_y,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(t1: f64, t2: f64, min_dur: f64, frame_rate: f64) -> Self {
        Self {
            t1,
            t2,
            min_dur,
            frame_rate,
            ..Default::default()
        }
    }

    pub fn to_stage_config(&self) -> StageConfig {
        StageConfig {
            t1: self.t1,
            t2: self.t2,
            min_dur: self.min_dur,
            frame_rate: self.frame_rate,
            max_frames: self.max_frames,
            flush_trailing: self.flush_trailing,
            normalize: NormalizeParams {
                margin_x: self.margin_x,
                scale_x: self.scale_x,
                scale_y: self.scale_y,
                invert_y: self.invert_y,
            },
        }
    }
}
