pub mod cluster;
pub mod extract;
pub mod normalize;

pub use cluster::ClusterBuffer;
pub use extract::ExtractStage;
pub use normalize::NormalizeStage;
