use crate::prelude::{StageError, StageResult};

/// Bounded reuse pool for frame byte-buffers.
///
/// The overlay loop composes each annotated frame into a pooled buffer and
/// returns it after the sink write, so a run touches at most `max_checkouts`
/// live buffers regardless of stream length.
pub struct FramePool {
    buffers: Vec<Vec<u8>>,
    checked_out: usize,
    max_checkouts: usize,
}

impl FramePool {
    pub fn with_capacity(max_checkouts: usize) -> Self {
        Self {
            buffers: Vec::with_capacity(max_checkouts),
            checked_out: 0,
            max_checkouts,
        }
    }

    /// Hands out a buffer of exactly `length` bytes, reusing a released one
    /// when available.
    pub fn checkout(&mut self, length: usize) -> StageResult<Vec<u8>> {
        if self.checked_out >= self.max_checkouts {
            return Err(StageError::Internal("frame pool depleted".into()));
        }
        self.checked_out += 1;
        let mut buffer = self.buffers.pop().unwrap_or_default();
        buffer.resize(length, 0);
        Ok(buffer)
    }

    /// Returns a buffer back to the pool for reuse.
    pub fn release(&mut self, mut buffer: Vec<u8>) {
        buffer.clear();
        self.checked_out = self.checked_out.saturating_sub(1);
        if self.buffers.len() < self.max_checkouts {
            self.buffers.push(buffer);
        }
    }

    pub fn reset(&mut self) {
        self.buffers.clear();
        self.checked_out = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_sizes_the_buffer() {
        let mut pool = FramePool::with_capacity(2);
        let buffer = pool.checkout(48).unwrap();
        assert_eq!(buffer.len(), 48);
    }

    #[test]
    fn released_buffers_are_reused() {
        let mut pool = FramePool::with_capacity(1);
        let mut buffer = pool.checkout(16).unwrap();
        buffer.reserve(1024);
        let capacity = buffer.capacity();
        pool.release(buffer);
        let again = pool.checkout(16).unwrap();
        assert_eq!(again.capacity(), capacity);
    }

    #[test]
    fn pool_limits_outstanding_checkouts() {
        let mut pool = FramePool::with_capacity(1);
        let held = pool.checkout(8).unwrap();
        assert!(pool.checkout(8).is_err());
        pool.release(held);
        assert!(pool.checkout(8).is_ok());
    }

    #[test]
    fn reset_forgets_outstanding_buffers() {
        let mut pool = FramePool::with_capacity(1);
        let _held = pool.checkout(8).unwrap();
        pool.reset();
        assert!(pool.checkout(8).is_ok());
    }
}
