use std::path::Path;

use tracing::info;

use crate::dataset::config::DatasetConfig;
use crate::dataset::split::Split;
use crate::error::{Result, Sn3Error};
use crate::format::decoder::{read_sn3_file, Sn3File};
use crate::format::element::ElementType;
use crate::tensor::{Tensor, TensorView};

/// One sample: `(image, label)` views into the dataset's buffers.
pub type Sample<'a> = (TensorView<'a>, TensorView<'a>);

/// An image/label SN3 pair loaded eagerly into memory.
///
/// Construction decodes both files, checks that they agree, and converts the
/// uint8 pixels to float32 in [0, 1]. After that the dataset is immutable:
/// [`Dataset::get`] hands out views that borrow `self`, so any number of
/// threads can read samples concurrently without locking.
#[derive(Debug)]
pub struct Dataset {
    split: Split,
    image_file: Sn3File,
    label_file: Sn3File,
    image_sample_dims: Vec<usize>,
    label_sample_dims: Vec<usize>,
}

/// Converts raw 8-bit intensities to floats in [0, 1].
pub fn normalize_pixels(raw: &[u8]) -> Vec<f32> {
    raw.iter().map(|&p| f32::from(p) / 255.0).collect()
}

fn leading_dim(file: &Sn3File) -> Result<usize> {
    file.sample_count().ok_or_else(|| {
        Sn3Error::shape(&file.path, "file has rank 0; expected a leading sample dimension")
    })
}

/// View of sample `index` in a file holding `count` equally sized samples.
fn sample_view<'a>(
    file: &'a Sn3File,
    index: usize,
    count: usize,
    dims: &'a [usize],
) -> Option<TensorView<'a>> {
    let bytes_per_sample = file.tensor.size_in_bytes() / count;
    file.tensor.view(index * bytes_per_sample, dims)
}

impl Dataset {
    /// Loads the train (`is_train == true`) or test split from `dir`.
    pub fn new(dir: impl AsRef<Path>, is_train: bool) -> Result<Dataset> {
        Dataset::from_config(&DatasetConfig::new(dir.as_ref(), Split::from_is_train(is_train)))
    }

    pub fn from_config(config: &DatasetConfig) -> Result<Dataset> {
        let image_file = read_sn3_file(config.image_path())?;
        let label_file = read_sn3_file(config.label_path())?;
        Dataset::from_files(config, image_file, label_file)
    }

    /// Validates and normalizes an already decoded image/label pair.
    pub fn from_files(
        config: &DatasetConfig,
        mut image_file: Sn3File,
        label_file: Sn3File,
    ) -> Result<Dataset> {
        let images = leading_dim(&image_file)?;
        let labels = leading_dim(&label_file)?;
        if images != labels {
            return Err(Sn3Error::SampleCountMismatch {
                image_path: image_file.path.clone(),
                label_path: label_file.path.clone(),
                images,
                labels,
            });
        }
        if images == 0 {
            return Err(Sn3Error::shape(&image_file.path, "file contains no samples"));
        }

        if image_file.element_type() != ElementType::UInt8 {
            return Err(Sn3Error::shape(
                &image_file.path,
                format!("expected uint8 pixels, found {}", image_file.element_type()),
            ));
        }
        let expected = [images, config.image_height, config.image_width];
        if image_file.dims() != &expected[..] {
            return Err(Sn3Error::shape(
                &image_file.path,
                format!("expected image dims {:?}, found {:?}", expected, image_file.dims()),
            ));
        }

        // ── One-time uint8 → float32 pass ─────────────────────────────────
        // The normalized Vec becomes the new buffer as is; the uint8 buffer is
        // dropped on assignment.
        let normalized = image_file
            .tensor
            .as_slice::<u8>()
            .map(normalize_pixels)
            .and_then(|pixels| Tensor::from_f32_vec(expected.to_vec(), pixels))
            .ok_or_else(|| {
                Sn3Error::shape(&image_file.path, "pixel buffer does not match its dims")
            })?;
        image_file.tensor = normalized;

        let image_sample_dims = image_file.dims()[1..].to_vec();
        let label_sample_dims = label_file.dims()[1..].to_vec();

        info!(
            split = %config.split,
            samples = images,
            image_dims = ?image_sample_dims,
            label_dims = ?label_sample_dims,
            label_type = %label_file.element_type(),
            "loaded dataset"
        );

        Ok(Dataset {
            split: config.split,
            image_file,
            label_file,
            image_sample_dims,
            label_sample_dims,
        })
    }

    /// Number of samples.
    pub fn size(&self) -> usize {
        self.image_file.dims()[0]
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns zero-copy `(image, label)` views for sample `index`.
    ///
    /// The image view is a float32 `image_height × image_width` slice; the
    /// label view keeps whatever element type and per-sample shape the label
    /// file declared (usually a uint8 scalar).
    pub fn get(&self, index: usize) -> Result<Sample<'_>> {
        let size = self.size();
        let out_of_range = || Sn3Error::IndexOutOfRange { index, size };
        if index >= size {
            return Err(out_of_range());
        }
        let image = sample_view(&self.image_file, index, size, &self.image_sample_dims)
            .ok_or_else(out_of_range)?;
        let label = sample_view(&self.label_file, index, size, &self.label_sample_dims)
            .ok_or_else(out_of_range)?;
        Ok((image, label))
    }

    /// All samples in index order.
    pub fn iter(&self) -> impl Iterator<Item = Sample<'_>> + '_ {
        (0..self.size()).filter_map(move |i| self.get(i).ok())
    }

    pub fn split(&self) -> Split {
        self.split
    }

    /// The normalized float32 image file.
    pub fn images(&self) -> &Sn3File {
        &self.image_file
    }

    pub fn labels(&self) -> &Sn3File {
        &self.label_file
    }

    pub fn image_sample_dims(&self) -> &[usize] {
        &self.image_sample_dims
    }

    pub fn label_sample_dims(&self) -> &[usize] {
        &self.label_sample_dims
    }
}
