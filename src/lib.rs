pub mod error;
pub mod format;
pub mod tensor;
pub mod dataset;
pub mod export;

// Convenience re-exports
pub use error::{ErrorKind, FormatError, Result, Sn3Error};
pub use format::element::ElementType;
pub use format::decoder::{read_sn3_file, Sn3File, Sn3Header};
pub use tensor::{Tensor, TensorView};
pub use dataset::{Dataset, DatasetConfig, DatasetSummary, Sampler, Split};
