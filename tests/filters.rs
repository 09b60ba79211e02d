mod common;

use common::{checkerboard, gradient_rgb};
use rasterlab::filters::color_adjust::brightness;
use rasterlab::filters::convolve::{blur, convolve};
use rasterlab::filters::edge::{horizontal_derivative, sobel_magnitude, vertical_derivative};
use rasterlab::filters::grayscale::grayscale;
use rasterlab::{Filter, Kernel, Raster};

#[test]
fn uniform_raster_survives_brightness_blur_and_grayscale() {
    let _ = env_logger::builder().is_test(true).try_init();
    let raster = Raster::filled(3, 3, [100, 100, 100]).unwrap();

    let bright = brightness(&raster, 10).unwrap();
    assert_eq!(bright, raster);

    let blurred = blur(&bright, 0).unwrap();
    assert_eq!(blurred, raster);

    let gray = grayscale(&blurred).unwrap();
    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(gray.pixel(y, x), vec![100, 100, 100]);
        }
    }
}

#[test]
fn blur_kernel_radius_one_matches_power_rule() {
    let kernel = Kernel::blur(1).unwrap();
    let w = kernel.weights();
    assert_eq!(w[[1, 1]], 4.0);
    for (y, x) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
        assert_eq!(w[[y, x]], 1.0);
    }
    for (y, x) in [(0, 1), (1, 0), (1, 2), (2, 1)] {
        assert_eq!(w[[y, x]], 2.0);
    }
}

#[test]
fn normalized_convolution_keeps_flat_images_flat() {
    let _ = env_logger::builder().is_test(true).try_init();
    for value in [0u8, 1, 77, 128, 254, 255] {
        let raster = Raster::filled(6, 9, [value, 255 - value, value / 2]).unwrap();
        for radius in 1..=3 {
            assert_eq!(blur(&raster, radius).unwrap(), raster);
        }
        let box_kernel = Kernel::new(ndarray::Array2::ones((5, 5))).unwrap();
        assert_eq!(convolve(&raster, &box_kernel, true).unwrap(), raster);
    }
}

#[test]
fn sobel_on_flat_image_is_all_zero() {
    let raster = Raster::filled(8, 8, [12, 200, 45]).unwrap();
    let grid = sobel_magnitude(&raster).unwrap();
    assert!(grid.iter().all(|&v| v == 0));
}

#[test]
fn sobel_peaks_at_255_on_checkerboard() {
    let grid = sobel_magnitude(&checkerboard(16, 16, 4)).unwrap();
    assert_eq!(grid.iter().copied().max(), Some(255));
    // Cell interiors far from any edge have no response
    assert_eq!(grid[[1, 1]], 0);
}

#[test]
fn derivative_border_lines_are_zero() {
    for raster in [gradient_rgb(7, 11), checkerboard(9, 9, 2)] {
        let h = horizontal_derivative(&raster).unwrap();
        for y in 0..h.height() {
            assert_eq!(h.pixel(y, 0), vec![0, 0, 0]);
            assert_eq!(h.pixel(y, h.width() - 1), vec![0, 0, 0]);
        }

        let v = vertical_derivative(&raster).unwrap();
        for x in 0..v.width() {
            assert_eq!(v.pixel(0, x), vec![0, 0, 0]);
            assert_eq!(v.pixel(v.height() - 1, x), vec![0, 0, 0]);
        }
    }
}

#[test]
fn derivative_never_lights_green() {
    let out = horizontal_derivative(&gradient_rgb(10, 10)).unwrap();
    let data = out.into_array();
    assert!(data.index_axis(ndarray::Axis(2), 1).iter().all(|&g| g == 0));
}

#[test]
fn grayscale_is_a_fixed_point() {
    let raster = gradient_rgb(12, 13);
    let once = grayscale(&raster).unwrap();
    assert_eq!(grayscale(&once).unwrap(), once);
}

#[test]
fn brightness_is_monotonic() {
    let raster = gradient_rgb(5, 7);
    let outputs: Vec<Raster> = (0..=20).map(|a| brightness(&raster, a).unwrap()).collect();
    for pair in outputs.windows(2) {
        for (lo, hi) in pair[0].view().iter().zip(pair[1].view().iter()) {
            assert!(hi >= lo);
        }
    }
}

#[test]
fn filters_never_mutate_their_input() {
    let raster = gradient_rgb(6, 6);
    let snapshot = raster.clone();
    for filter in [
        Filter::Grayscale,
        Filter::HorizontalDerivative,
        Filter::VerticalDerivative,
        Filter::Sobel,
        Filter::Blur { radius: 2 },
        Filter::Brightness { amount: 17 },
    ] {
        let _ = filter.apply(&raster).unwrap();
        assert_eq!(raster, snapshot, "{} changed its input", filter);
    }
}

#[test]
fn oversized_blur_radius_averages_the_whole_image() {
    let raster = Raster::filled(3, 3, [100, 100, 100]).unwrap();
    for radius in [600, i32::MAX] {
        let out = Filter::Blur { radius }.apply(&raster).unwrap();
        assert_eq!(out.pixel(1, 1), vec![100, 100, 100]);
    }

    let image = gradient_rgb(5, 6);
    let full = blur(&image, 5).unwrap();
    assert_eq!(blur(&image, 1_000_000).unwrap(), full);
}
