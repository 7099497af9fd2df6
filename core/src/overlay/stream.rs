use crate::overlay::io::{Frame, FrameSink, FrameSource};
use crate::overlay::pool::FramePool;
use crate::overlay::render::{Painter, MARKER_COLOR, PATH_COLOR};
use crate::prelude::{StageError, StageResult};
use crate::telemetry::log::LogManager;
use crate::timeline::clock::FrameClock;
use crate::trial_interface::FixationSequence;

const MARKER_RADIUS: i64 = 2;
const RING_RADIUS: i64 = 20;
/// The trailing gaze path shows at most this many recent fixations.
const WINDOW_SIZE: usize = 3;
/// One canvas in flight plus one spare held for reuse.
const POOL_CAPACITY: usize = 2;

/// Renders a rolling window of fixation markers onto a frame stream.
///
/// Each output frame shows the up-to-three most recent fixations as a small
/// filled marker plus a larger ring at the denormalized pixel position, with
/// connecting lines forming the gaze path. The window advances once the
/// frame timestamp passes the newest windowed fixation's end. When the
/// sequence is exhausted the remaining frames pass through unmarked.
pub struct FixationOverlay {
    clock: FrameClock,
    pool: FramePool,
    logger: LogManager,
}

impl FixationOverlay {
    pub fn new(frame_rate: f64) -> Self {
        Self {
            clock: FrameClock::new(frame_rate),
            pool: FramePool::with_capacity(POOL_CAPACITY),
            logger: LogManager::new(),
        }
    }

    /// Streams every frame from `source` into `sink`, drawing markers along
    /// the way. Returns the number of frames written; source exhaustion is
    /// normal termination.
    pub fn run<S, K>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        fixations: &FixationSequence,
    ) -> StageResult<usize>
    where
        S: FrameSource,
        K: FrameSink,
    {
        if fixations.is_empty() {
            return Err(StageError::EmptyInput(
                "no fixations to overlay onto the frame stream".into(),
            ));
        }

        let width = source.width() as f64;
        let height = source.height() as f64;
        let all = fixations.fixations();

        let mut fix_index = 0usize;
        let mut frame_number = 0usize;

        while let Some(frame) = source.next_frame() {
            // Compose onto a pooled canvas; the buffer goes back to the
            // pool once the sink write is done.
            let mut buffer = self.pool.checkout(frame.data.len())?;
            buffer.copy_from_slice(&frame.data);
            let mut canvas = Frame::from_buffer(frame.width, frame.height, buffer)?;

            if fix_index < all.len() {
                let window = &all[fix_index.saturating_sub(WINDOW_SIZE - 1)..=fix_index];
                let mut previous: Option<(i64, i64)> = None;
                for fixation in window {
                    let px = (fixation.x * width) as i64;
                    let py = (fixation.y * height) as i64;
                    Painter::draw_disc(&mut canvas, px, py, MARKER_RADIUS, MARKER_COLOR);
                    Painter::draw_ring(&mut canvas, px, py, RING_RADIUS, MARKER_COLOR);
                    if let Some((qx, qy)) = previous {
                        Painter::draw_line(&mut canvas, qx, qy, px, py, PATH_COLOR);
                    }
                    previous = Some((px, py));
                }
            }

            sink.write_frame(&canvas)?;
            self.pool.release(canvas.data);
            frame_number += 1;

            if fix_index < all.len() && self.clock.frame_time(frame_number) > all[fix_index].end {
                fix_index += 1;
            }
        }

        self.logger.record(&format!(
            "FixationOverlay wrote {} frames, consumed {} of {} fixations",
            frame_number,
            fix_index.min(all.len()),
            all.len()
        ));

        Ok(frame_number)
    }
}
