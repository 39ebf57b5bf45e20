//! Image Array & Histogram
//!
//! Converts between grayscale images and their pixel-intensity arrays and
//! computes 256-bin intensity histograms, with optional Python bindings via
//! PyO3 and WASM bindings for JavaScript.
//!
//! ## Array Layout
//! Pixel arrays follow the conventional image layout:
//! - **Grid**: (height, width), indexed `[[row, col]]`
//! - **Flat**: row-major, element `i` at row `i / width`, column `i % width`
//! - **Color**: (height, width, channels) with 3 (RGB) or 4 (RGBA) channels
//!
//! Any integer or float element type is accepted; values are clamped to
//! 0-255 and cast to `u8` (see [`pixel::PixelValue`]).
//!
//! ## Operations
//! - [`get_image_array`] - image to (height, width) `u8` array
//! - [`get_hist`] - 256-bin counts or density from an image or array
//! - [`array_to_image`] - 1D or 2D array to grayscale image
//!
//! ```
//! use image_array_histogram::{array_to_image, get_hist, ArrayToImageOptions, HistogramOptions};
//! use ndarray::arr2;
//!
//! let pixels = arr2(&[[0u8, 128], [128, 255]]);
//! let hist = get_hist(&pixels, HistogramOptions::default()).unwrap();
//! assert_eq!(hist.get(128), 2.0);
//!
//! let image = array_to_image(&pixels, &ArrayToImageOptions::default()).unwrap();
//! assert_eq!((image.width(), image.height()), (2, 2));
//! ```

pub mod error;
pub mod histogram;
pub mod image_array;
pub mod luma;
pub mod pixel;
pub mod reconstruct;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, ErrorKind, ImageDimension, MissingDimensions, Result};
pub use histogram::{get_hist, Histogram, HistogramOptions, HistogramSource, BINS};
pub use image_array::{get_image_array, ImageArrayOptions};
pub use luma::{image_from_array, to_grayscale};
pub use pixel::{ensure_u8, PixelValue};
pub use reconstruct::{array_to_image, reconstruct, ArrayToImageOptions, Reconstruction};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArrayDyn, PyArrayMethods, PyReadonlyArrayDyn};
    use pyo3::exceptions::PyRuntimeWarning;
    use pyo3::prelude::*;

    use crate::histogram::{get_hist as hist_impl, Histogram, HistogramOptions};
    use crate::image_array::{get_image_array as image_array_impl, ImageArrayOptions};
    use crate::luma::image_from_array;
    use crate::reconstruct::{reconstruct, ArrayToImageOptions};

    /// Array accepted from Python, by dtype.
    enum InputArray<'py> {
        U8(PyReadonlyArrayDyn<'py, u8>),
        I64(PyReadonlyArrayDyn<'py, i64>),
        F64(PyReadonlyArrayDyn<'py, f64>),
    }

    impl<'py> InputArray<'py> {
        fn extract(obj: &Bound<'py, PyAny>) -> PyResult<Self> {
            if let Ok(arr) = obj.extract::<PyReadonlyArrayDyn<'py, u8>>() {
                return Ok(Self::U8(arr));
            }
            if let Ok(arr) = obj.extract::<PyReadonlyArrayDyn<'py, i64>>() {
                return Ok(Self::I64(arr));
            }
            if let Ok(arr) = obj.extract::<PyReadonlyArrayDyn<'py, f64>>() {
                return Ok(Self::F64(arr));
            }
            // Lists and other dtypes go through numpy
            let np = obj.py().import("numpy")?;
            let coerced = np.call_method1("asarray", (obj, "float64"))?;
            let arr = coerced.downcast::<PyArrayDyn<f64>>()?.readonly();
            Ok(Self::F64(arr))
        }
    }

    fn histogram_to_py<'py>(py: Python<'py>, hist: Histogram) -> PyResult<Bound<'py, PyAny>> {
        match hist {
            Histogram::Counts(counts) => Ok(counts.to_vec().into_pyobject(py)?.into_any()),
            Histogram::Density(density) => Ok(density.to_vec().into_pyobject(py)?.into_any()),
        }
    }

    /// Return the image as a 2D uint8 array (height, width).
    ///
    /// The image is given as a decoded array of shape (H, W) or (H, W, C)
    /// with C in 1..=4. Non-uint8 samples are clamped to [0, 255].
    #[pyfunction]
    #[pyo3(signature = (image, ensure_grayscale=true))]
    pub fn get_image_array<'py>(
        py: Python<'py>,
        image: &Bound<'py, PyAny>,
        ensure_grayscale: bool,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let decoded = match InputArray::extract(image)? {
            InputArray::U8(arr) => image_from_array(&arr.as_array())?,
            InputArray::I64(arr) => image_from_array(&arr.as_array())?,
            InputArray::F64(arr) => image_from_array(&arr.as_array())?,
        };
        let result = image_array_impl(&decoded, ImageArrayOptions { ensure_grayscale })?;
        Ok(result.into_pyarray(py))
    }

    /// Return the 256-bin histogram of a grayscale array or RGB(A) image array.
    ///
    /// Counts are returned as ints; with `as_density` as floats summing to 1.0.
    #[pyfunction]
    #[pyo3(signature = (image_or_array, *, as_density=false))]
    pub fn get_hist<'py>(
        py: Python<'py>,
        image_or_array: &Bound<'py, PyAny>,
        as_density: bool,
    ) -> PyResult<Bound<'py, PyAny>> {
        let options = HistogramOptions { as_density };
        let hist = match InputArray::extract(image_or_array)? {
            InputArray::U8(arr) => hist_impl(&arr.as_array(), options)?,
            InputArray::I64(arr) => hist_impl(&arr.as_array(), options)?,
            InputArray::F64(arr) => hist_impl(&arr.as_array(), options)?,
        };
        histogram_to_py(py, hist)
    }

    /// Create a grayscale image from a 1D or 2D array.
    ///
    /// Returns the image as a 2D uint8 array. Emits a RuntimeWarning when
    /// values are clipped to [0, 255].
    #[pyfunction]
    #[pyo3(signature = (arr, width=None, height=None, *, validate_range=true))]
    pub fn array_to_image<'py>(
        py: Python<'py>,
        arr: &Bound<'py, PyAny>,
        width: Option<u32>,
        height: Option<u32>,
        validate_range: bool,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let options = ArrayToImageOptions {
            width,
            height,
            validate_range,
        };
        let result = match InputArray::extract(arr)? {
            InputArray::U8(arr) => reconstruct(&arr.as_array(), &options)?,
            InputArray::I64(arr) => reconstruct(&arr.as_array(), &options)?,
            InputArray::F64(arr) => reconstruct(&arr.as_array(), &options)?,
        };
        if result.clamped {
            let category = py.get_type::<PyRuntimeWarning>();
            PyErr::warn(py, category.as_any(), c"Pixel values clipped to [0,255]", 1)?;
        }
        let pixels = image_array_impl(&result.image, ImageArrayOptions::default())?;
        Ok(pixels.into_pyarray(py))
    }

    #[pymodule]
    pub fn image_array_histogram(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(get_image_array, m)?)?;
        m.add_function(wrap_pyfunction!(get_hist, m)?)?;
        m.add_function(wrap_pyfunction!(array_to_image, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::image_array_histogram;
