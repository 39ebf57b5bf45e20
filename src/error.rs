//! Error type shared by all conversions.
//!
//! Every failure aborts the single call that raised it. Variants fall into two
//! families, reported by [`Error::kind`]:
//!
//! - **Shape** - the input has a dimensionality the operation cannot handle.
//! - **Dimension** - explicit width/height are missing, or disagree with the data.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Shape,
    Dimension,
}

/// One side of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDimension {
    Width,
    Height,
}

impl fmt::Display for ImageDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => write!(f, "width"),
            Self::Height => write!(f, "height"),
        }
    }
}

/// Which of width/height were absent for a flat input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDimensions {
    Width,
    Height,
    Both,
}

impl MissingDimensions {
    /// Returns `None` when both dimensions are present.
    pub fn from_options(width: Option<u32>, height: Option<u32>) -> Option<Self> {
        match (width, height) {
            (Some(_), Some(_)) => None,
            (None, Some(_)) => Some(Self::Width),
            (Some(_), None) => Some(Self::Height),
            (None, None) => Some(Self::Both),
        }
    }
}

impl fmt::Display for MissingDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => write!(f, "width is"),
            Self::Height => write!(f, "height is"),
            Self::Both => write!(f, "width and height are"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expected a 2D grayscale image; got shape {0:?}")]
    ImageShape(Vec<usize>),

    #[error("expected a 2D array of grayscale pixels; got shape {0:?}")]
    ArrayShape(Vec<usize>),

    #[error("only 1D or 2D arrays are supported for grayscale images; got shape {0:?}")]
    UnsupportedRank(Vec<usize>),

    #[error("{0} required when passing a 1D array")]
    MissingDimensions(MissingDimensions),

    #[error("flat array length {len} does not equal width*height {expected}")]
    LengthMismatch { len: usize, expected: u64 },

    #[error("provided {dimension} {provided} does not match array {dimension} {actual}")]
    DimensionMismatch {
        dimension: ImageDimension,
        provided: u32,
        actual: usize,
    },

    #[error("array {dimension} {actual} exceeds the largest supported image {dimension}")]
    DimensionTooLarge {
        dimension: ImageDimension,
        actual: usize,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ImageShape(_) | Self::ArrayShape(_) | Self::UnsupportedRank(_) => {
                ErrorKind::Shape
            }
            Self::MissingDimensions(_)
            | Self::LengthMismatch { .. }
            | Self::DimensionMismatch { .. }
            | Self::DimensionTooLarge { .. } => ErrorKind::Dimension,
        }
    }
}

#[cfg(feature = "python")]
impl From<Error> for pyo3::PyErr {
    fn from(err: Error) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
