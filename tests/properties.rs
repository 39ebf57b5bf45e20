use image_array_histogram::{
    array_to_image, get_hist, get_image_array, ArrayToImageOptions, ErrorKind, HistogramOptions,
    ImageArrayOptions, BINS,
};
use ndarray::{Array1, Array2};
use proptest::prelude::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn grid_strategy() -> impl Strategy<Value = Array2<u8>> {
    (0usize..24, 0usize..24).prop_flat_map(|(h, w)| {
        prop::collection::vec(any::<u8>(), h * w)
            .prop_map(move |data| Array2::from_shape_vec((h, w), data).unwrap())
    })
}

proptest! {
    #[test]
    fn round_trip_preserves_pixels(grid in grid_strategy()) {
        init();
        let image = array_to_image(&grid, &ArrayToImageOptions::default()).unwrap();
        let back = get_image_array(&image, ImageArrayOptions::default()).unwrap();
        prop_assert_eq!(back, grid);
    }

    #[test]
    fn counts_sum_to_pixel_count(grid in grid_strategy()) {
        let hist = get_hist(&grid, HistogramOptions::default()).unwrap();
        prop_assert_eq!(hist.len(), BINS);
        prop_assert_eq!(hist.sum() as usize, grid.len());
    }

    #[test]
    fn density_sums_to_one(grid in grid_strategy()) {
        let hist = get_hist(&grid, HistogramOptions::density()).unwrap();
        prop_assert_eq!(hist.to_vec().len(), BINS);
        if grid.is_empty() {
            prop_assert!(hist.to_vec().iter().all(|&v| v == 0.0));
        } else {
            prop_assert!((hist.sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn wide_integers_count_like_clamped(values in prop::collection::vec(-1000i32..1000, 1..200)) {
        let len = values.len();
        let grid = Array2::from_shape_vec((1, len), values.clone()).unwrap();
        let hist = get_hist(&grid, HistogramOptions::default()).unwrap();

        let below = values.iter().filter(|&&v| v <= 0).count();
        let above = values.iter().filter(|&&v| v >= 255).count();
        prop_assert_eq!(hist.get(0) as usize, below);
        prop_assert_eq!(hist.get(255) as usize, above);
        prop_assert_eq!(hist.sum() as usize, len);
    }

    #[test]
    fn flat_input_is_row_major(width in 1u32..16, height in 1u32..16) {
        let len = (width * height) as usize;
        let flat: Array1<u32> = (0..len as u32).map(|i| i % 256).collect();
        let options = ArrayToImageOptions::default().with_dimensions(width, height);

        let image = array_to_image(&flat, &options).unwrap();
        let back = get_image_array(&image, ImageArrayOptions::default()).unwrap();

        prop_assert_eq!(back.dim(), (height as usize, width as usize));
        for ((row, col), &v) in back.indexed_iter() {
            prop_assert_eq!(v as usize, (row * width as usize + col) % 256);
        }
    }

    #[test]
    fn wrong_flat_length_is_dimension_error(width in 1u32..16, height in 1u32..16, extra in 1usize..5) {
        let flat = Array1::<u8>::zeros((width * height) as usize + extra);
        let options = ArrayToImageOptions::default().with_dimensions(width, height);

        let err = array_to_image(&flat, &options).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Dimension);
    }
}
