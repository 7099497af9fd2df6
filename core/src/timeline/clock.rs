/// Maps frame indices to timestamps on a fixed-frame-rate timeline.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    frame_rate: f64,
}

impl FrameClock {
    pub fn new(frame_rate: f64) -> Self {
        Self { frame_rate }
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn frame_time(&self, frame_index: usize) -> f64 {
        frame_index as f64 / self.frame_rate
    }
}

/// Monotone frame index used to align fixation intervals to frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameCursor {
    clock: FrameClock,
    index: usize,
}

impl FrameCursor {
    pub fn new(clock: FrameClock) -> Self {
        Self { clock, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn time(&self) -> f64 {
        self.clock.frame_time(self.index)
    }

    /// Advances while the frame timestamp stays before `end` and the index
    /// stays under `cap`; returns the range of indices stepped over.
    pub fn advance_while_before(&mut self, end: f64, cap: usize) -> std::ops::Range<usize> {
        let from = self.index;
        while self.index < cap && self.clock.frame_time(self.index) < end {
            self.index += 1;
        }
        from..self.index
    }
}
