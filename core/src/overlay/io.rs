use crate::prelude::{StageError, StageResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A single RGB24 frame, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn filled(width: usize, height: usize, color: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_buffer(width: usize, height: usize, data: Vec<u8>) -> StageResult<Self> {
        if data.len() != width * height * 3 {
            return Err(StageError::Internal(format!(
                "frame buffer is {} bytes, expected {}",
                data.len(),
                width * height * 3
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

/// Sequential frame producer. Decoding lives upstream; the core only pulls
/// frames one at a time.
pub trait FrameSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn frame_rate(&self) -> f64;
    /// `None` marks end-of-stream, which is normal termination.
    fn next_frame(&mut self) -> Option<Frame>;
}

/// Sequential frame consumer.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &Frame) -> StageResult<()>;
}

/// Synthetic source emitting a fixed number of solid-color frames. Stands in
/// for decoded stimulus video in the offline driver and in tests.
pub struct SolidFrameSource {
    width: usize,
    height: usize,
    frame_rate: f64,
    color: [u8; 3],
    remaining: usize,
}

impl SolidFrameSource {
    pub fn new(width: usize, height: usize, frame_rate: f64, color: [u8; 3], frames: usize) -> Self {
        Self {
            width,
            height,
            frame_rate,
            color,
            remaining: frames,
        }
    }
}

impl FrameSource for SolidFrameSource {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn next_frame(&mut self) -> Option<Frame> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(Frame::filled(self.width, self.height, self.color))
    }
}

/// Streams raw RGB24 frames to a file. Encoding is out of scope; the
/// artifact is a headerless frame stream at the source's resolution.
pub struct RawVideoSink {
    writer: BufWriter<File>,
    frames_written: usize,
}

impl RawVideoSink {
    pub fn create<P: AsRef<Path>>(path: P) -> StageResult<Self> {
        let path_ref = path.as_ref();
        let file = File::create(path_ref).map_err(|e| {
            StageError::SinkUnavailable(format!(
                "cannot open output video {}: {}",
                path_ref.display(),
                e
            ))
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            frames_written: 0,
        })
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl FrameSink for RawVideoSink {
    fn write_frame(&mut self, frame: &Frame) -> StageResult<()> {
        self.writer
            .write_all(&frame.data)
            .map_err(|e| StageError::SinkUnavailable(format!("writing frame failed: {}", e)))?;
        self.frames_written += 1;
        Ok(())
    }
}

/// Collects frames in memory; test and inspection sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<Frame>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for MemorySink {
    fn write_frame(&mut self, frame: &Frame) -> StageResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
