//! Grayscale conversion and array-to-image promotion.
//!
//! Luminance weighting is delegated to `image`'s `to_luma8`, which uses the
//! ITU-R BT.709 / sRGB coefficients (R 0.2126, G 0.7152, B 0.0722) and ignores
//! alpha.
//!
//! Arrays are promoted to images by channel count:
//!
//! | Shape | Image |
//! |-------|-------|
//! | (H, W) | `ImageLuma8` |
//! | (H, W, 1) | `ImageLuma8` |
//! | (H, W, 2) | `ImageLumaA8` |
//! | (H, W, 3) | `ImageRgb8` |
//! | (H, W, 4) | `ImageRgba8` |

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use log::debug;
use ndarray::{ArrayBase, Data, Dimension};

use crate::error::{Error, ImageDimension, Result};
use crate::pixel::PixelValue;

/// Luminosity coefficients of `image`'s `to_luma8`.
///
/// Reference values only; the conversion itself is done by `image`.
pub const LUMA_R: f32 = 0.2126;
pub const LUMA_G: f32 = 0.7152;
pub const LUMA_B: f32 = 0.0722;

/// Whether the image already holds 8-bit luminance only.
pub fn is_luma8(image: &DynamicImage) -> bool {
    matches!(image, DynamicImage::ImageLuma8(_))
}

/// Whether the image is single-channel luminance (8 or 16 bit).
///
/// Such images are read directly and clamped rather than rescaled.
pub fn is_luminance(image: &DynamicImage) -> bool {
    matches!(
        image,
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageLuma16(_)
    )
}

/// Convert any image to 8-bit luminance.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return gray.clone();
    }
    debug!(
        "converting {:?} image ({}x{}) to luminance",
        image.color(),
        image.width(),
        image.height()
    );
    image.to_luma8()
}

/// Check that an array extent fits an image side.
pub(crate) fn image_side(dimension: ImageDimension, actual: usize) -> Result<u32> {
    u32::try_from(actual).map_err(|_| Error::DimensionTooLarge { dimension, actual })
}

/// Build an 8-bit image from a (H, W) or (H, W, C) array.
///
/// Element values pass through the clamp contract of [`PixelValue`].
pub fn image_from_array<T, S, D>(input: &ArrayBase<S, D>) -> Result<DynamicImage>
where
    T: PixelValue,
    S: Data<Elem = T>,
    D: Dimension,
{
    let shape = input.shape().to_vec();
    let channels = match shape.len() {
        2 => 1,
        3 if (1..=4).contains(&shape[2]) => shape[2],
        _ => return Err(Error::ImageShape(shape)),
    };

    let height = image_side(ImageDimension::Height, shape[0])?;
    let width = image_side(ImageDimension::Width, shape[1])?;
    // Logical iteration order is row-major, channel-last
    let data: Vec<u8> = input.iter().map(|v| v.to_u8_clamped()).collect();

    let image = match channels {
        1 => GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, data).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        _ => RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
    };
    image.ok_or(Error::ImageShape(shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array3};

    #[test]
    fn test_red_luminance() {
        let mut img = Array3::<u8>::zeros((1, 1, 3));
        img[[0, 0, 0]] = 255;

        let image = image_from_array(&img).unwrap();
        let gray = to_grayscale(&image);

        let expected = (LUMA_R * 255.0) as i32;
        assert!((gray.get_pixel(0, 0)[0] as i32 - expected).abs() <= 1);
    }

    #[test]
    fn test_green_luminance() {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 1]] = 255;
        img[[0, 0, 3]] = 255;

        let image = image_from_array(&img).unwrap();
        let gray = to_grayscale(&image);

        let expected = (LUMA_G * 255.0) as i32;
        assert!((gray.get_pixel(0, 0)[0] as i32 - expected).abs() <= 1);
    }

    #[test]
    fn test_white_stays_white() {
        let img = Array3::<u8>::from_elem((2, 2, 3), 255);
        let gray = to_grayscale(&image_from_array(&img).unwrap());
        assert!(gray.pixels().all(|p| p[0] >= 254));
    }

    #[test]
    fn test_promotion_by_channel_count() {
        let two_d = arr2(&[[1u8, 2, 3], [4, 5, 6]]);
        let image = image_from_array(&two_d).unwrap();
        assert!(is_luma8(&image));
        assert_eq!((image.width(), image.height()), (3, 2));

        let la = Array3::<u8>::zeros((2, 3, 2));
        assert!(matches!(
            image_from_array(&la).unwrap(),
            DynamicImage::ImageLumaA8(_)
        ));

        let rgba = Array3::<u8>::zeros((2, 3, 4));
        assert!(matches!(
            image_from_array(&rgba).unwrap(),
            DynamicImage::ImageRgba8(_)
        ));
    }

    #[test]
    fn test_promotion_keeps_row_major_layout() {
        let two_d = arr2(&[[1u8, 2, 3], [4, 5, 6]]);
        let gray = to_grayscale(&image_from_array(&two_d).unwrap());
        // get_pixel takes (x, y)
        assert_eq!(gray.get_pixel(2, 0)[0], 3);
        assert_eq!(gray.get_pixel(0, 1)[0], 4);
    }

    #[test]
    fn test_promotion_clamps_values() {
        let two_d = arr2(&[[-4.0f64, 300.0]]);
        let gray = to_grayscale(&image_from_array(&two_d).unwrap());
        assert_eq!(gray.as_raw(), &vec![0u8, 255]);
    }

    #[test]
    fn test_rejects_unsupported_shapes() {
        let five = Array3::<u8>::zeros((2, 2, 5));
        assert_eq!(
            image_from_array(&five).unwrap_err(),
            Error::ImageShape(vec![2, 2, 5])
        );

        let flat = ndarray::arr1(&[1u8, 2, 3]);
        assert_eq!(
            image_from_array(&flat).unwrap_err(),
            Error::ImageShape(vec![3])
        );
    }

    #[test]
    fn test_luminance_variants() {
        let luma16 = DynamicImage::ImageLuma16(image::ImageBuffer::new(1, 1));
        assert!(is_luminance(&luma16));
        assert!(!is_luma8(&luma16));

        let rgb = DynamicImage::ImageRgb8(RgbImage::new(1, 1));
        assert!(!is_luminance(&rgb));

        let la = DynamicImage::ImageLumaA8(GrayAlphaImage::new(1, 1));
        assert!(!is_luminance(&la));
    }

    #[test]
    fn test_coefficients_sum_to_one() {
        assert!((LUMA_R + LUMA_G + LUMA_B - 1.0).abs() < 1e-6);
    }
}
