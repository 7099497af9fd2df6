use crate::math::geometry::GeometryHelper;
use crate::math::stats::{mean, RunningMean};
use crate::trial_interface::{Fixation, GazeSample};

/// Flat accumulator for the in-progress fixation candidate.
///
/// Holds the samples currently assigned to the candidate as three parallel
/// columns, plus running means so the drifting cluster center is O(1) to
/// read after every accepted sample.
#[derive(Debug, Default)]
pub struct ClusterBuffer {
    xs: Vec<f64>,
    ys: Vec<f64>,
    ts: Vec<f64>,
    mean_x: RunningMean,
    mean_y: RunningMean,
}

impl ClusterBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: GazeSample) {
        self.xs.push(sample.x);
        self.ys.push(sample.y);
        self.ts.push(sample.t);
        self.mean_x.push(sample.x);
        self.mean_y.push(sample.y);
    }

    /// Mean position of the accumulated samples, `None` while empty.
    pub fn center(&self) -> Option<(f64, f64)> {
        Some((self.mean_x.mean()?, self.mean_y.mean()?))
    }

    pub fn len(&self) -> usize {
        self.ts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ts.is_empty()
    }

    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
        self.ts.clear();
        self.mean_x.reset();
        self.mean_y.reset();
    }

    /// Closes the candidate: refines the center with a second pass keeping
    /// only samples within `t2` of the cluster mean, then emits a fixation
    /// if the surviving span lasts at least `min_dur`.
    ///
    /// A cluster whose samples are all rejected by the second pass, or whose
    /// surviving span is too short, contributes nothing. Timestamps are
    /// taken in insertion order, so start/end are the first and last
    /// surviving samples.
    pub fn flush(&self, t2: f64, min_dur: f64) -> Option<Fixation> {
        let (cx, cy) = self.center()?;

        let mut xs = Vec::new();
        let mut ys = Vec::new();
        let mut ts = Vec::new();
        for ((&x, &y), &t) in self.xs.iter().zip(&self.ys).zip(&self.ts) {
            if GeometryHelper::dist2p(cx, cy, x, y) < t2 {
                xs.push(x);
                ys.push(y);
                ts.push(t);
            }
        }

        let fx = mean(&xs)?;
        let fy = mean(&ys)?;
        let start = *ts.first()?;
        let end = *ts.last()?;
        if end - start >= min_dur {
            Some(Fixation::new(fx, fy, start, end, ts.len()))
        } else {
            None
        }
    }
}
