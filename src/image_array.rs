//! Image to pixel array conversion.
//!
//! Produces a (height, width) `u8` array indexed `[[row, col]]`.

use image::{DynamicImage, GrayImage};
use ndarray::Array2;

use crate::error::{Error, Result};
use crate::luma::{is_luminance, to_grayscale};
use crate::pixel::PixelValue;

/// Options for [`get_image_array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageArrayOptions {
    /// Convert non-luminance images to luminance before reading pixels.
    pub ensure_grayscale: bool,
}

impl Default for ImageArrayOptions {
    fn default() -> Self {
        Self {
            ensure_grayscale: true,
        }
    }
}

impl ImageArrayOptions {
    /// Read the decoded buffer as-is; multi-channel images will fail.
    pub fn raw() -> Self {
        Self {
            ensure_grayscale: false,
        }
    }
}

/// Return the image as a 2D `u8` array of shape (height, width).
///
/// With `ensure_grayscale` set, color and alpha images are converted to
/// luminance first. Without it, the decoded buffer must already be single
/// channel. 16-bit luminance is clamped into 0..=255 either way.
///
/// # Errors
/// [`Error::ImageShape`] with `[height, width, channels]` when the buffer is
/// still multi-channel.
pub fn get_image_array(image: &DynamicImage, options: ImageArrayOptions) -> Result<Array2<u8>> {
    if options.ensure_grayscale && !is_luminance(image) {
        return gray_to_array(&to_grayscale(image));
    }

    match image {
        DynamicImage::ImageLuma8(gray) => gray_to_array(gray),
        DynamicImage::ImageLuma16(gray) => {
            buffer_to_array(gray.width(), gray.height(), gray.as_raw())
        }
        other => Err(Error::ImageShape(vec![
            other.height() as usize,
            other.width() as usize,
            other.color().channel_count() as usize,
        ])),
    }
}

fn gray_to_array(gray: &GrayImage) -> Result<Array2<u8>> {
    buffer_to_array(gray.width(), gray.height(), gray.as_raw())
}

/// Read the first `width * height` samples; `from_raw` accepts longer buffers.
fn buffer_to_array<T: PixelValue>(width: u32, height: u32, raw: &[T]) -> Result<Array2<u8>> {
    let shape = (height as usize, width as usize);
    let pixels = raw
        .get(..shape.0 * shape.1)
        .ok_or_else(|| Error::ImageShape(vec![shape.0, shape.1]))?;
    let data = pixels.iter().map(|v| v.to_u8_clamped()).collect();
    Array2::from_shape_vec(shape, data).map_err(|_| Error::ImageShape(vec![shape.0, shape.1]))
}
