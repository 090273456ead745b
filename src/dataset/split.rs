use std::fmt;

use serde::{Deserialize, Serialize};

/// Which half of the corpus to load.
///
/// - `Train` — files prefixed `train`
/// - `Test`  — files prefixed `t10k`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn from_is_train(is_train: bool) -> Split {
        if is_train { Split::Train } else { Split::Test }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "t10k",
        }
    }

    pub fn image_file_name(self) -> String {
        format!("{}-images-idx3-ubyte", self.prefix())
    }

    pub fn label_file_name(self) -> String {
        format!("{}-labels-idx1-ubyte", self.prefix())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Split::Train => f.write_str("train"),
            Split::Test => f.write_str("test"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_convention() {
        assert_eq!(Split::Train.image_file_name(), "train-images-idx3-ubyte");
        assert_eq!(Split::Train.label_file_name(), "train-labels-idx1-ubyte");
        assert_eq!(Split::Test.image_file_name(), "t10k-images-idx3-ubyte");
        assert_eq!(Split::Test.label_file_name(), "t10k-labels-idx1-ubyte");
    }

    #[test]
    fn from_flag() {
        assert_eq!(Split::from_is_train(true), Split::Train);
        assert_eq!(Split::from_is_train(false), Split::Test);
    }
}
