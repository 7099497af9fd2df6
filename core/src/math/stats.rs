/// Running arithmetic mean over an append-only sample set.
///
/// The clustering pass recomputes its center on every accepted sample; a
/// running sum keeps that O(1) per sample while staying numerically
/// equivalent to a full recomputation.
#[derive(Debug, Clone, Default)]
pub struct RunningMean {
    sum: f64,
    count: usize,
}

impl RunningMean {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn reset(&mut self) {
        self.sum = 0.0;
        self.count = 0;
    }
}

/// Mean of a slice, `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_mean_starts_empty() {
        let acc = RunningMean::new();
        assert_eq!(acc.mean(), None);
        assert_eq!(acc.count(), 0);
    }

    #[test]
    fn running_mean_tracks_slice_mean() {
        let values = [0.25, 0.5, 0.75, 1.0];
        let mut acc = RunningMean::new();
        for &v in &values {
            acc.push(v);
        }
        assert_eq!(acc.mean(), mean(&values));
    }

    #[test]
    fn reset_clears_the_accumulator() {
        let mut acc = RunningMean::new();
        acc.push(2.0);
        acc.reset();
        assert_eq!(acc.mean(), None);
    }

    #[test]
    fn slice_mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }
}
