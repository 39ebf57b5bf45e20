//! WebAssembly exports.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images cross
//! the boundary as flat, row-major byte arrays with an explicit channel count
//! (1 = L, 2 = LA, 3 = RGB, 4 = RGBA).

use ndarray::{Array1, Array3};
use wasm_bindgen::prelude::*;

use crate::histogram::{get_hist, HistogramOptions};
use crate::image_array::{get_image_array, ImageArrayOptions};
use crate::luma::image_from_array;
use crate::reconstruct::{array_to_image, ArrayToImageOptions};

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn channels_array(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<Array3<u8>, JsValue> {
    Array3::from_shape_vec((height, width, channels), data.to_vec()).map_err(to_js)
}

// ============================================================================
// Image -> Array
// ============================================================================

/// Decode an interleaved image into a flat (height * width) luminance array.
///
/// # Arguments
/// * `data` - Flat array of bytes (length = width * height * channels)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1 to 4
/// * `ensure_grayscale` - Convert color images instead of rejecting them
#[wasm_bindgen]
pub fn get_image_array_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    ensure_grayscale: bool,
) -> Result<Vec<u8>, JsValue> {
    let input = channels_array(data, width, height, channels)?;
    let image = image_from_array(&input).map_err(to_js)?;
    let result = get_image_array(&image, ImageArrayOptions { ensure_grayscale }).map_err(to_js)?;
    Ok(result.into_raw_vec_and_offset().0)
}

// ============================================================================
// Histogram
// ============================================================================

/// Compute the 256-bin histogram of an interleaved image.
///
/// Color images (3 or 4 channels) are converted to luminance first.
/// Returns counts, or densities when `as_density` is set.
#[wasm_bindgen]
pub fn get_hist_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    as_density: bool,
) -> Result<Vec<f64>, JsValue> {
    let options = HistogramOptions { as_density };
    let hist = if channels == 1 {
        let grid = Array3::from_shape_vec((height, width, 1), data.to_vec())
            .map_err(to_js)?
            .remove_axis(ndarray::Axis(2));
        get_hist(&grid, options)
    } else {
        get_hist(&channels_array(data, width, height, channels)?, options)
    }
    .map_err(to_js)?;
    Ok(hist.to_vec())
}

// ============================================================================
// Array -> Image
// ============================================================================

/// Build a grayscale image from flat pixel values.
///
/// Values outside 0..=255 are clamped; with `validate_range` set this also
/// logs a warning.
///
/// # Returns
/// Flat array of luminance bytes (length = width * height)
#[wasm_bindgen]
pub fn array_to_image_wasm(
    data: &[f64],
    width: u32,
    height: u32,
    validate_range: bool,
) -> Result<Vec<u8>, JsValue> {
    let input = Array1::from(data.to_vec());
    let options = ArrayToImageOptions::default()
        .with_dimensions(width, height)
        .validate_range(validate_range);
    let image = array_to_image(&input, &options).map_err(to_js)?;
    Ok(image.into_luma8().into_raw())
}
