//! Pixel array to grayscale image reconstruction.
//!
//! Flat (1D) input needs explicit width and height and is laid out row-major:
//! element `i` lands at row `i / width`, column `i % width`. 2D input carries its
//! own (height, width); explicit values are only checked against it.

use image::{DynamicImage, GrayImage};
use log::warn;
use ndarray::{ArrayBase, Data, Dimension};

use crate::error::{Error, ImageDimension, MissingDimensions, Result};
use crate::luma::image_side;
use crate::pixel::{any_out_of_range, PixelValue};

/// Options for [`array_to_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayToImageOptions {
    /// Required for 1D input; checked against the array for 2D input.
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Report out-of-range values before clamping them.
    pub validate_range: bool,
}

impl Default for ArrayToImageOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            validate_range: true,
        }
    }
}

impl ArrayToImageOptions {
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_dimensions(self, width: u32, height: u32) -> Self {
        self.with_width(width).with_height(height)
    }

    pub fn validate_range(mut self, validate: bool) -> Self {
        self.validate_range = validate;
        self
    }
}

/// Result of [`reconstruct`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    /// Always `DynamicImage::ImageLuma8`.
    pub image: DynamicImage,
    /// Range validation found values outside 0..=255.
    pub clamped: bool,
}

/// Build a grayscale image and report whether values were clamped.
///
/// Emits nothing; see [`array_to_image`] for the logging variant.
pub fn reconstruct<T, S, D>(
    input: &ArrayBase<S, D>,
    options: &ArrayToImageOptions,
) -> Result<Reconstruction>
where
    T: PixelValue,
    S: Data<Elem = T>,
    D: Dimension,
{
    let (width, height) = match input.shape() {
        &[len] => flat_dimensions(len, options)?,
        &[rows, cols] => grid_dimensions(rows, cols, options)?,
        shape => return Err(Error::UnsupportedRank(shape.to_vec())),
    };

    let clamped = options.validate_range && any_out_of_range(input);

    // Out-of-range values are clamped by the cast whether or not they were reported
    let data: Vec<u8> = input.iter().map(|v| v.to_u8_clamped()).collect();
    let expected = width as u64 * height as u64;
    let len = data.len();
    let gray = GrayImage::from_raw(width, height, data)
        .ok_or(Error::LengthMismatch { len, expected })?;

    Ok(Reconstruction {
        image: DynamicImage::ImageLuma8(gray),
        clamped,
    })
}

/// Create a grayscale image from a 1D or 2D array.
///
/// When `validate_range` is set and any value lies outside 0..=255, a single
/// warning is logged and all values are clamped.
///
/// # Errors
/// - [`Error::MissingDimensions`] for 1D input without width and height
/// - [`Error::LengthMismatch`] when a 1D length is not `width * height`
/// - [`Error::DimensionMismatch`] when explicit dimensions contradict a 2D shape
/// - [`Error::UnsupportedRank`] for any other rank
pub fn array_to_image<T, S, D>(
    input: &ArrayBase<S, D>,
    options: &ArrayToImageOptions,
) -> Result<DynamicImage>
where
    T: PixelValue,
    S: Data<Elem = T>,
    D: Dimension,
{
    let reconstruction = reconstruct(input, options)?;
    if reconstruction.clamped {
        warn!("pixel values clipped to [0,255]");
    }
    Ok(reconstruction.image)
}

fn flat_dimensions(len: usize, options: &ArrayToImageOptions) -> Result<(u32, u32)> {
    let (width, height) = match (options.width, options.height) {
        (Some(width), Some(height)) => (width, height),
        (width, height) => {
            // from_options only returns None when both are present
            let missing = MissingDimensions::from_options(width, height)
                .unwrap_or(MissingDimensions::Both);
            return Err(Error::MissingDimensions(missing));
        }
    };

    let expected = width as u64 * height as u64;
    if len as u64 != expected {
        return Err(Error::LengthMismatch { len, expected });
    }
    Ok((width, height))
}

fn grid_dimensions(rows: usize, cols: usize, options: &ArrayToImageOptions) -> Result<(u32, u32)> {
    check_dimension(ImageDimension::Width, options.width, cols)?;
    check_dimension(ImageDimension::Height, options.height, rows)?;
    Ok((
        image_side(ImageDimension::Width, cols)?,
        image_side(ImageDimension::Height, rows)?,
    ))
}

fn check_dimension(dimension: ImageDimension, provided: Option<u32>, actual: usize) -> Result<()> {
    match provided {
        Some(provided) if provided as usize != actual => Err(Error::DimensionMismatch {
            dimension,
            provided,
            actual,
        }),
        _ => Ok(()),
    }
}
