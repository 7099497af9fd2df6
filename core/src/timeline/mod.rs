pub mod clock;
pub mod distance;

pub use clock::{FrameClock, FrameCursor};
pub use distance::{DistanceInput, DistanceStage, DistanceTrace};
