//! Core fixation-detection and timeline-alignment library for the Rust gaze
//! analytics platform.
//!
//! The modules mirror the legacy pupil-lab analysis pipeline while providing
//! safe abstractions, an explicit error taxonomy, and well-defined processing
//! stages.

pub mod detection;
pub mod math;
pub mod overlay;
pub mod prelude;
pub mod telemetry;
pub mod timeline;
pub mod trial_interface;

pub use prelude::{PipelineStage, StageConfig, StageOutput};
