use log::info;

/// Thin facade the processing stages use to note per-trial progress
/// (fixation counts, frames visited, frames written).
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
