//! Pixel value coercion.
//!
//! Arrays handed to this crate may hold any integer or float element type.
//! All of them are normalized to `u8` through one contract:
//!
//! | Source | Rule |
//! |--------|------|
//! | `u8` | unchanged |
//! | unsigned ints | values above 255 become 255 |
//! | signed ints | clamped to 0..=255 |
//! | `f32` / `f64` | clamped to 0.0..=255.0, then truncated; NaN becomes 0 |

use ndarray::{Array, ArrayBase, Data, Dimension};

/// Element types that can be stored as an 8-bit intensity.
pub trait PixelValue: Copy + Send + Sync {
    /// Clamp into 0..=255 and cast.
    fn to_u8_clamped(self) -> u8;

    /// Whether the value is representable as `u8` without clamping.
    fn in_u8_range(self) -> bool;
}

impl PixelValue for u8 {
    #[inline]
    fn to_u8_clamped(self) -> u8 {
        self
    }

    #[inline]
    fn in_u8_range(self) -> bool {
        true
    }
}

impl PixelValue for i8 {
    #[inline]
    fn to_u8_clamped(self) -> u8 {
        self.max(0) as u8
    }

    #[inline]
    fn in_u8_range(self) -> bool {
        self >= 0
    }
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl PixelValue for $t {
            #[inline]
            fn to_u8_clamped(self) -> u8 {
                self.min(255) as u8
            }

            #[inline]
            fn in_u8_range(self) -> bool {
                self <= 255
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl PixelValue for $t {
            #[inline]
            fn to_u8_clamped(self) -> u8 {
                self.clamp(0, 255) as u8
            }

            #[inline]
            fn in_u8_range(self) -> bool {
                (0..=255).contains(&self)
            }
        }
    )*};
}

macro_rules! impl_float {
    ($($t:ty),*) => {$(
        impl PixelValue for $t {
            #[inline]
            fn to_u8_clamped(self) -> u8 {
                // `as` saturates and maps NaN to 0
                self.clamp(0.0, 255.0) as u8
            }

            #[inline]
            fn in_u8_range(self) -> bool {
                (0.0..=255.0).contains(&self)
            }
        }
    )*};
}

impl_unsigned!(u16, u32, u64, usize);
impl_signed!(i16, i32, i64, isize);
impl_float!(f32, f64);

/// Coerce an array of any pixel type to `u8`, keeping its shape.
pub fn ensure_u8<T, S, D>(input: &ArrayBase<S, D>) -> Array<u8, D>
where
    T: PixelValue,
    S: Data<Elem = T>,
    D: Dimension,
{
    input.mapv(T::to_u8_clamped)
}

/// True if any element would be changed by [`ensure_u8`].
pub fn any_out_of_range<T, S, D>(input: &ArrayBase<S, D>) -> bool
where
    T: PixelValue,
    S: Data<Elem = T>,
    D: Dimension,
{
    input.iter().any(|v| !v.in_u8_range())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_integer_clamping() {
        assert_eq!(300i32.to_u8_clamped(), 255);
        assert_eq!((-5i64).to_u8_clamped(), 0);
        assert_eq!(128i16.to_u8_clamped(), 128);
        assert_eq!(70000u32.to_u8_clamped(), 255);
        assert_eq!((-1i8).to_u8_clamped(), 0);
        assert_eq!(127i8.to_u8_clamped(), 127);
    }

    #[test]
    fn test_float_truncates_after_clamp() {
        assert_eq!(12.9f64.to_u8_clamped(), 12);
        assert_eq!(255.7f32.to_u8_clamped(), 255);
        assert_eq!((-0.5f64).to_u8_clamped(), 0);
        assert_eq!(f64::NAN.to_u8_clamped(), 0);
        assert_eq!(f64::INFINITY.to_u8_clamped(), 255);
    }

    #[test]
    fn test_range_checks() {
        assert!(255u16.in_u8_range());
        assert!(!256u16.in_u8_range());
        assert!(!(-1i32).in_u8_range());
        assert!(!f32::NAN.in_u8_range());
        assert!(254.5f64.in_u8_range());
    }

    #[test]
    fn test_ensure_u8_keeps_shape() {
        let input = arr2(&[[-10i32, 20], [300, 40]]);
        let out = ensure_u8(&input);
        assert_eq!(out, arr2(&[[0u8, 20], [255, 40]]));
    }

    #[test]
    fn test_any_out_of_range() {
        assert!(!any_out_of_range(&arr1(&[0i32, 255])));
        assert!(any_out_of_range(&arr1(&[0i32, 256])));
        assert!(!any_out_of_range(&arr1(&[0u8, 255])));
    }
}
