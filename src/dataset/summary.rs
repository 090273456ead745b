use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::dataset::Dataset;
use crate::dataset::split::Split;
use crate::format::element::ElementType;

/// A serializable description of a loaded dataset.
///
/// `label_histogram` is only filled in when each label is a single integer
/// (the usual class-index layout); it maps class value to sample count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub split: Split,
    pub samples: usize,
    pub image_dims: Vec<usize>,
    pub image_type: ElementType,
    pub label_dims: Vec<usize>,
    pub label_type: ElementType,
    #[serde(default)]
    pub label_histogram: Option<BTreeMap<i64, usize>>,
}

impl DatasetSummary {
    pub fn from_dataset(ds: &Dataset) -> DatasetSummary {
        let label_histogram = if ds.label_sample_dims().is_empty() {
            let mut counts = BTreeMap::new();
            let all_integer = ds.iter().all(|(_, label)| match label.scalar_i64() {
                Some(class) => {
                    *counts.entry(class).or_insert(0) += 1;
                    true
                }
                None => false,
            });
            all_integer.then_some(counts)
        } else {
            None
        };

        DatasetSummary {
            split: ds.split(),
            samples: ds.size(),
            image_dims: ds.image_sample_dims().to_vec(),
            image_type: ds.images().element_type(),
            label_dims: ds.label_sample_dims().to_vec(),
            label_type: ds.labels().element_type(),
            label_histogram,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the summary to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        writer.flush()
    }

    /// Deserializes a summary previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> std::io::Result<DatasetSummary> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
