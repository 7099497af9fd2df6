use serde::{Deserialize, Serialize};

/// A period of sustained, spatially stable gaze.
///
/// `(x, y)` is the refined mean position after the second clustering pass;
/// `sample_count` is the number of samples that survived it. This is the
/// stable interchange shape downstream consumers rely on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixation {
    pub x: f64,
    pub y: f64,
    pub duration: f64,
    pub start: f64,
    pub end: f64,
    pub sample_count: usize,
}

impl Fixation {
    pub fn new(x: f64, y: f64, start: f64, end: f64, sample_count: usize) -> Self {
        Self {
            x,
            y,
            duration: end - start,
            start,
            end,
            sample_count,
        }
    }
}

/// Chronologically ordered fixations (by `start`) for a single trial.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixationSequence {
    fixations: Vec<Fixation>,
}

impl FixationSequence {
    pub fn new(fixations: Vec<Fixation>) -> Self {
        Self { fixations }
    }

    pub fn push(&mut self, fixation: Fixation) {
        self.fixations.push(fixation);
    }

    pub fn fixations(&self) -> &[Fixation] {
        &self.fixations
    }

    pub fn len(&self) -> usize {
        self.fixations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fixation> {
        self.fixations.iter()
    }
}

impl IntoIterator for FixationSequence {
    type Item = Fixation;
    type IntoIter = std::vec::IntoIter<Fixation>;

    fn into_iter(self) -> Self::IntoIter {
        self.fixations.into_iter()
    }
}
