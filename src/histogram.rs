//! 256-bin intensity histograms.
//!
//! Sources are either images (always converted to luminance) or arrays:
//!
//! - 2D arrays are binned directly after clamping to 0..=255.
//! - 3D arrays whose last axis is 3 or 4 are read as RGB/RGBA, promoted to an
//!   image and converted to luminance first.
//! - Anything else is rejected.
//!
//! Large grids are counted in parallel chunks with rayon; the counts are the
//! same as a serial pass.

use image::DynamicImage;
use log::debug;
use ndarray::{Array2, ArrayBase, Data, Dimension, Ix2};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::image_array::{get_image_array, ImageArrayOptions};
use crate::luma::image_from_array;
use crate::pixel::{ensure_u8, PixelValue};

/// Number of bins, one per 8-bit intensity.
pub const BINS: usize = 256;

/// Grids smaller than this are counted serially.
const PARALLEL_THRESHOLD: usize = 1 << 16;
const CHUNK_SIZE: usize = 1 << 14;

/// Options for [`get_hist`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistogramOptions {
    /// Normalize counts so they sum to 1.0.
    pub as_density: bool,
}

impl HistogramOptions {
    pub fn density() -> Self {
        Self { as_density: true }
    }
}

/// Intensity histogram. Index `i` holds the value for intensity `i`.
#[derive(Debug, Clone, PartialEq)]
pub enum Histogram {
    Counts([u64; BINS]),
    Density([f64; BINS]),
}

impl Histogram {
    /// Count every pixel of a `u8` slice.
    pub fn from_pixels(pixels: &[u8]) -> Self {
        Self::Counts(count_intensities(pixels))
    }

    /// Always 256.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        BINS
    }

    pub fn is_density(&self) -> bool {
        matches!(self, Self::Density(_))
    }

    pub fn get(&self, intensity: u8) -> f64 {
        match self {
            Self::Counts(counts) => counts[intensity as usize] as f64,
            Self::Density(density) => density[intensity as usize],
        }
    }

    pub fn as_counts(&self) -> Option<&[u64; BINS]> {
        match self {
            Self::Counts(counts) => Some(counts),
            Self::Density(_) => None,
        }
    }

    pub fn as_density(&self) -> Option<&[f64; BINS]> {
        match self {
            Self::Counts(_) => None,
            Self::Density(density) => Some(density),
        }
    }

    /// Sum of all bins: the pixel count, or 1.0 for a non-empty density.
    pub fn sum(&self) -> f64 {
        match self {
            Self::Counts(counts) => counts.iter().sum::<u64>() as f64,
            Self::Density(density) => density.iter().sum(),
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        (0..=u8::MAX).map(|i| self.get(i)).collect()
    }

    /// Normalize counts by the total; an empty histogram stays all zero.
    pub fn into_density(self) -> Self {
        let counts = match self {
            Self::Counts(counts) => counts,
            density => return density,
        };
        let total: u64 = counts.iter().sum();
        let mut density = [0.0f64; BINS];
        if total > 0 {
            for (d, &c) in density.iter_mut().zip(counts.iter()) {
                *d = c as f64 / total as f64;
            }
        }
        Self::Density(density)
    }
}

/// Anything a histogram can be computed from.
pub trait HistogramSource {
    /// Reduce the source to a (height, width) grid of intensities.
    fn to_pixel_array(&self) -> Result<Array2<u8>>;
}

impl HistogramSource for DynamicImage {
    fn to_pixel_array(&self) -> Result<Array2<u8>> {
        get_image_array(self, ImageArrayOptions::default())
    }
}

impl<T, S, D> HistogramSource for ArrayBase<S, D>
where
    T: PixelValue,
    S: Data<Elem = T>,
    D: Dimension,
{
    fn to_pixel_array(&self) -> Result<Array2<u8>> {
        let shape = self.shape();
        if shape.len() == 3 && matches!(shape[2], 3 | 4) {
            debug!("treating {:?} array as color image", shape);
            let image = image_from_array(self)?;
            return get_image_array(&image, ImageArrayOptions::default());
        }

        let grid = self
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| Error::ArrayShape(shape.to_vec()))?;
        Ok(ensure_u8(&grid))
    }
}

/// Return the 256-bin histogram of an image or array.
///
/// # Errors
/// [`Error::ArrayShape`] for arrays that are neither 2D nor RGB/RGBA.
pub fn get_hist<S>(source: &S, options: HistogramOptions) -> Result<Histogram>
where
    S: HistogramSource + ?Sized,
{
    let pixels = source.to_pixel_array()?;
    let histogram = match pixels.as_slice() {
        Some(slice) => Histogram::from_pixels(slice),
        None => Histogram::Counts(count_serial(pixels.iter().copied())),
    };

    if options.as_density {
        Ok(histogram.into_density())
    } else {
        Ok(histogram)
    }
}

fn count_serial(pixels: impl Iterator<Item = u8>) -> [u64; BINS] {
    let mut hist = [0u64; BINS];
    for v in pixels {
        hist[v as usize] += 1;
    }
    hist
}

fn count_intensities(pixels: &[u8]) -> [u64; BINS] {
    if pixels.len() < PARALLEL_THRESHOLD {
        return count_serial(pixels.iter().copied());
    }

    pixels
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| count_serial(chunk.iter().copied()))
        .reduce(
            || [0u64; BINS],
            |mut acc, part| {
                for (a, p) in acc.iter_mut().zip(part.iter()) {
                    *a += p;
                }
                acc
            },
        )
}
