use std::path::{Path, PathBuf};

use crate::dataset::split::Split;

/// Side length of the images in the classic digit corpus.
pub const IMAGE_SIDE: usize = 28;

/// Where to find a dataset and what its images must look like.
///
/// # Fields
/// - `root`         — directory holding the `{prefix}-images-idx3-ubyte` and
///                    `{prefix}-labels-idx1-ubyte` pair
/// - `split`        — which prefix pair to load
/// - `image_height` — required image height (default 28)
/// - `image_width`  — required image width (default 28)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub root: PathBuf,
    pub split: Split,
    pub image_height: usize,
    pub image_width: usize,
}

impl DatasetConfig {
    /// Config for 28×28 images.
    pub fn new(root: impl Into<PathBuf>, split: Split) -> Self {
        DatasetConfig {
            root: root.into(),
            split,
            image_height: IMAGE_SIDE,
            image_width: IMAGE_SIDE,
        }
    }

    /// Overrides the required image shape, for corpus variants with other
    /// image sizes.
    pub fn with_image_shape(mut self, height: usize, width: usize) -> Self {
        self.image_height = height;
        self.image_width = width;
        self
    }

    pub fn image_path(&self) -> PathBuf {
        self.root.join(self.split.image_file_name())
    }

    pub fn label_path(&self) -> PathBuf {
        self.root.join(self.split.label_file_name())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
