use crate::prelude::{
    PipelineStage, StageConfig, StageError, StageMetadata, StageOutput, StageResult,
};
use crate::telemetry::log::LogManager;
use crate::trial_interface::{Fixation, FixationSequence};
use ndarray::Array2;

const COL_X: usize = 0;
const COL_Y: usize = 1;
const COL_START: usize = 2;
const COL_END: usize = 3;

/// Rescales a fixation sequence into the canonical coordinate frame used by
/// the object-center traces and the video overlay.
///
/// x is min-max normalized with a configurable margin and scale. y uses the
/// same scale family but with its reference points swapped, flipping the
/// vertical axis; see [`crate::prelude::NormalizeParams::invert_y`]. The
/// time axis is shifted so the first fixation starts at 0.
pub struct NormalizeStage {
    config: Option<StageConfig>,
    logger: LogManager,
}

impl NormalizeStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new(),
        }
    }

    fn column_range(matrix: &Array2<f64>, col: usize) -> (f64, f64) {
        let column = matrix.column(col);
        let min = column.fold(f64::INFINITY, |acc, &v| acc.min(v));
        let max = column.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        (min, max)
    }
}

impl Default for NormalizeStage {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStage for NormalizeStage {
    type Input = FixationSequence;
    type Output = StageOutput<FixationSequence>;

    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: FixationSequence) -> StageResult<Self::Output> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;
        let params = config.normalize;

        if input.is_empty() {
            return Err(StageError::EmptyInput(
                "cannot normalize an empty fixation sequence".into(),
            ));
        }

        let mut matrix = Array2::<f64>::zeros((input.len(), 4));
        for (row, fix) in input.iter().enumerate() {
            matrix[[row, COL_X]] = fix.x;
            matrix[[row, COL_Y]] = fix.y;
            matrix[[row, COL_START]] = fix.start;
            matrix[[row, COL_END]] = fix.end;
        }

        let (xmin, xmax) = Self::column_range(&matrix, COL_X);
        let (ymin, ymax) = Self::column_range(&matrix, COL_Y);
        if xmax - xmin == 0.0 {
            return Err(StageError::DegenerateInput("x range collapsed to zero".into()));
        }
        if ymax - ymin == 0.0 {
            return Err(StageError::DegenerateInput("y range collapsed to zero".into()));
        }

        let x_denom = (xmax - xmin) * params.scale_x;
        let y_denom = (ymax - ymin) * params.scale_y;
        let time_origin = matrix[[0, COL_START]];

        let mut output = FixationSequence::default();
        for (row, fix) in input.iter().enumerate() {
            let x = (matrix[[row, COL_X]] - xmin + params.margin_x) / x_denom;
            let y = if params.invert_y {
                (ymax - matrix[[row, COL_Y]]) / y_denom
            } else {
                (matrix[[row, COL_Y]] - ymin) / y_denom
            };
            output.push(Fixation::new(
                x,
                y,
                matrix[[row, COL_START]] - time_origin,
                matrix[[row, COL_END]] - time_origin,
                fix.sample_count,
            ));
        }

        self.logger.record(&format!(
            "NormalizeStage rescaled {} fixations (x range {:.4}, y range {:.4})",
            output.len(),
            xmax - xmin,
            ymax - ymin
        ));

        let metadata = StageMetadata {
            fixation_count: Some(output.len()),
            notes: vec![format!("time origin {:.4}", time_origin)],
            ..Default::default()
        };

        Ok(StageOutput {
            payload: output,
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

    fn sequence(points: &[(f64, f64, f64, f64)]) -> FixationSequence {
        FixationSequence::new(
            points
                .iter()
                .map(|&(x, y, start, end)| Fixation::new(x, y, start, end, 10))
                .collect(),
        )
    }

    fn normalize(input: FixationSequence) -> StageResult<StageOutput<FixationSequence>> {
        let mut stage = NormalizeStage::new();
        stage.initialize(&StageConfig::default())?;
        let result = stage.execute(input);
        stage.cleanup();
        result
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let result = normalize(FixationSequence::default());
        assert!(matches!(result, Err(StageError::EmptyInput(_))));
    }

    #[test]
    fn collapsed_x_range_is_degenerate() {
        let input = sequence(&[(0.5, 0.1, 0.0, 0.1), (0.5, 0.9, 0.2, 0.3)]);
        let result = normalize(input);
        assert!(matches!(result, Err(StageError::DegenerateInput(_))));
    }

    #[test]
    fn minimum_x_maps_to_scaled_margin() {
        let input = sequence(&[(0.2, 0.1, 1.0, 1.2), (0.6, 0.5, 1.4, 1.7)]);
        let output = normalize(input).unwrap().payload;
        let expected = 0.011 / ((0.6 - 0.2) * 1.22);
        assert!((output.fixations()[0].x - expected).abs() < 1e-12);
    }

    #[test]
    fn x_order_is_preserved_and_y_is_inverted() {
        let input = sequence(&[
            (0.2, 0.1, 0.0, 0.1),
            (0.4, 0.5, 0.2, 0.3),
            (0.6, 0.9, 0.4, 0.5),
        ]);
        let output = normalize(input).unwrap().payload;
        let fixations = output.fixations();
        assert!(fixations[0].x < fixations[1].x && fixations[1].x < fixations[2].x);
        assert!(fixations[0].y > fixations[1].y && fixations[1].y > fixations[2].y);
        // The largest raw y lands on the inverted minimum.
        assert_eq!(fixations[2].y, 0.0);
    }

    #[test]
    fn invert_y_disabled_keeps_y_order() {
        let input = sequence(&[(0.2, 0.1, 0.0, 0.1), (0.6, 0.9, 0.2, 0.3)]);
        let mut config = StageConfig::default();
        config.normalize.invert_y = false;
        let mut stage = NormalizeStage::new();
        stage.initialize(&config).unwrap();
        let output = stage.execute(input).unwrap().payload;
        assert!(output.fixations()[0].y < output.fixations()[1].y);
        assert_eq!(output.fixations()[0].y, 0.0);
    }

    #[test]
    fn time_axis_starts_at_zero() {
        let input = sequence(&[(0.2, 0.1, 3.5, 3.7), (0.6, 0.9, 4.0, 4.4)]);
        let output = normalize(input).unwrap().payload;
        let fixations = output.fixations();
        assert_eq!(fixations[0].start, 0.0);
        assert!((fixations[0].end - 0.2).abs() < 1e-12);
        assert!((fixations[1].start - 0.5).abs() < 1e-12);
    }

    #[test]
    fn input_sequence_is_not_mutated() {
        let input = sequence(&[(0.2, 0.1, 1.0, 1.2), (0.6, 0.5, 1.4, 1.7)]);
        let before = input.fixations().to_vec();
        let _ = normalize(input.clone()).unwrap();
        assert_eq!(input.fixations(), before.as_slice());
    }
}
