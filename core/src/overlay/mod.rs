pub mod io;
pub mod pool;
pub mod render;
pub mod stream;

pub use io::{Frame, FrameSink, FrameSource, MemorySink, RawVideoSink, SolidFrameSource};
pub use pool::FramePool;
pub use render::Painter;
pub use stream::FixationOverlay;
