use anyhow::Context;
use gazecore::trial_interface::Fixation;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Per-trial slice of the offline report.
#[derive(Debug, Serialize)]
pub struct TrialReport {
    pub video: String,
    pub participant: u32,
    pub session: u32,
    pub fixations: Vec<Fixation>,
    /// Zero-filled parity form of the distance trace.
    pub distances: Vec<f64>,
    pub discarded_clusters: usize,
    pub notes: Vec<String>,
}

/// JSON report written at the end of an offline run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub trials: Vec<TrialReport>,
    pub trials_processed: usize,
    pub trials_failed: usize,
}

impl RunReport {
    pub fn write<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
        let contents =
            serde_json::to_string_pretty(self).context("serializing offline report")?;
        fs::write(path_ref, contents)
            .with_context(|| format!("writing offline report {}", path_ref.display()))?;
        Ok(())
    }
}
