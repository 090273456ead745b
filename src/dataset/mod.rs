pub mod split;
pub mod config;
pub mod dataset;
pub mod sampler;
pub mod summary;

pub use split::Split;
pub use config::{DatasetConfig, IMAGE_SIDE};
pub use dataset::{normalize_pixels, Dataset, Sample};
pub use sampler::Sampler;
pub use summary::DatasetSummary;
