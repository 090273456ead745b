//! Error types for ferrite-sn3.
//!
//! Byte-level problems found while parsing a buffer are [`FormatError`]s.
//! Everything surfaced to callers is an [`Sn3Error`], which attaches the
//! offending path where there is one.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures found while parsing raw SN3 bytes, before any path is known.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("unsupported SN3 type code {0} (expected one of 8, 9, 11, 12, 13, 14)")]
    UnsupportedTypeCode(u8),

    #[error("truncated data: needed {needed} bytes at offset {offset}, only {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("payload size for dims {dims:?} overflows usize")]
    PayloadOverflow { dims: Vec<usize> },

    #[error("payload is {actual} bytes, expected exactly {expected}")]
    PayloadLength { expected: usize, actual: usize },

    #[error("rank {0} exceeds the SN3 limit of 255 dimensions")]
    TooManyDims(usize),

    #[error("dimension {0} does not fit in a u32")]
    DimensionTooLarge(usize),
}

/// Coarse classification of an [`Sn3Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotFound,
    TruncatedFile,
    UnsupportedTypeCode,
    SampleCountMismatch,
    UnexpectedShape,
    IndexOutOfRange,
    Io,
}

/// Top-level error for decoding files and assembling datasets.
#[derive(Error, Debug)]
pub enum Sn3Error {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed SN3 file {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error(
        "sample count mismatch: {} holds {images} images but {} holds {labels} labels",
        image_path.display(),
        label_path.display()
    )]
    SampleCountMismatch {
        image_path: PathBuf,
        label_path: PathBuf,
        images: usize,
        labels: usize,
    },

    #[error("unexpected shape in {}: {reason}", path.display())]
    UnexpectedShape { path: PathBuf, reason: String },

    #[error("sample index {index} out of range for dataset of {size} samples")]
    IndexOutOfRange { index: usize, size: usize },
}

impl Sn3Error {
    pub(crate) fn format(path: impl Into<PathBuf>, source: FormatError) -> Self {
        Sn3Error::Format { path: path.into(), source }
    }

    pub(crate) fn shape(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Sn3Error::UnexpectedShape { path: path.into(), reason: reason.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Sn3Error::FileNotFound { .. } => ErrorKind::FileNotFound,
            Sn3Error::Io { .. } => ErrorKind::Io,
            Sn3Error::Format { source, .. } => match source {
                FormatError::UnsupportedTypeCode(_) => ErrorKind::UnsupportedTypeCode,
                FormatError::Truncated { .. } => ErrorKind::TruncatedFile,
                FormatError::PayloadOverflow { .. }
                | FormatError::PayloadLength { .. }
                | FormatError::TooManyDims(_)
                | FormatError::DimensionTooLarge(_) => ErrorKind::UnexpectedShape,
            },
            Sn3Error::SampleCountMismatch { .. } => ErrorKind::SampleCountMismatch,
            Sn3Error::UnexpectedShape { .. } => ErrorKind::UnexpectedShape,
            Sn3Error::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
        }
    }

    /// True when the error points at a bug in the caller rather than at bad
    /// input files.
    pub fn is_contract_violation(&self) -> bool {
        self.kind() == ErrorKind::IndexOutOfRange
    }
}

pub type Result<T> = std::result::Result<T, Sn3Error>;
