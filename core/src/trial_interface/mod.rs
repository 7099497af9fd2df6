pub mod fixation;
pub mod gaze;
pub mod trial;

pub use fixation::{Fixation, FixationSequence};
pub use gaze::{GazeSample, GazeTrace, ObjectCenterTrace};
pub use trial::{TrialAncillary, TrialPayload};
