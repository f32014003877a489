// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(dead_code)]

use card_raster::peniko::color::{palette, AlphaColor, Srgb};
use card_raster::{CardComposer, CardFamily, Pixmap};
use image::{load_from_memory, Rgba, RgbaImage};
use once_cell::sync::Lazy;
use std::cmp::max;
use std::path::PathBuf;

const REPLACE: bool = false;

static REFS_PATH: Lazy<PathBuf> = Lazy::new(|| {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("refs");
    let _ = std::fs::create_dir_all(&path);
    path
});
static DIFFS_PATH: Lazy<PathBuf> = Lazy::new(|| {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("diffs");
    let _ = std::fs::remove_dir_all(&path);
    let _ = std::fs::create_dir_all(&path);
    path
});

pub const WHITE: AlphaColor<Srgb> = palette::css::WHITE;
pub const BLACK: AlphaColor<Srgb> = palette::css::BLACK;

pub fn composer() -> CardComposer {
    CardComposer::new(&CardFamily::default()).unwrap()
}

pub fn white_canvas(width: usize, height: usize) -> Pixmap {
    Pixmap::filled(width, height, WHITE)
}

pub fn is_white(px: [u8; 4]) -> bool {
    px == [255, 255, 255, 255]
}

/// Number of pixels that differ between two pixmaps of equal size.
pub fn count_diff(a: &Pixmap, b: &Pixmap) -> usize {
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    a.data()
        .chunks_exact(4)
        .zip(b.data().chunks_exact(4))
        .filter(|(a, b)| a != b)
        .count()
}

pub fn encode_png(pixmap: &Pixmap) -> Vec<u8> {
    let mut pixmap = pixmap.clone();
    pixmap.unpremultiply();

    let mut out = vec![];
    let mut encoder = png::Encoder::new(&mut out, pixmap.width() as u32, pixmap.height() as u32);
    encoder.set_color(png::ColorType::Rgba);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(pixmap.data()).unwrap();
    writer.finish().unwrap();

    out
}

/// Compare `pixmap` against the stored reference image `name`.
///
/// A missing reference is recorded from the current output and fails the test, so new
/// references are always reviewed before they are committed.
pub fn check_ref(pixmap: &Pixmap, name: &str) {
    let encoded_image = encode_png(pixmap);
    let ref_path = REFS_PATH.join(format!("{}.png", name));

    let write_ref_image = || {
        let optimized =
            oxipng::optimize_from_memory(&encoded_image, &oxipng::Options::max_compression())
                .unwrap();
        std::fs::write(&ref_path, optimized).unwrap();
    };

    if !ref_path.exists() {
        write_ref_image();
        panic!("new reference image was created");
    }

    let ref_image = load_from_memory(&std::fs::read(&ref_path).unwrap())
        .unwrap()
        .into_rgba8();
    let actual = load_from_memory(&encoded_image).unwrap().into_rgba8();

    if let Some(diff_image) = get_diff(&ref_image, &actual) {
        if REPLACE {
            write_ref_image();
            panic!("test was replaced");
        }

        let diff_path = DIFFS_PATH.join(format!("{}.png", name));
        diff_image
            .save_with_format(&diff_path, image::ImageFormat::Png)
            .unwrap();

        panic!("test didnt match reference image");
    }
}

fn get_diff(expected_image: &RgbaImage, actual_image: &RgbaImage) -> Option<RgbaImage> {
    let width = max(expected_image.width(), actual_image.width());
    let height = max(expected_image.height(), actual_image.height());

    let mut diff_image = RgbaImage::new(width * 3, height);
    let mut pixel_diff = 0;

    for x in 0..width {
        for y in 0..height {
            let actual_pixel = actual_image.get_pixel_checked(x, y);
            let expected_pixel = expected_image.get_pixel_checked(x, y);

            match (actual_pixel, expected_pixel) {
                (Some(actual), Some(expected)) => {
                    diff_image.put_pixel(x, y, *expected);
                    diff_image.put_pixel(x + 2 * width, y, *actual);
                    if actual != expected {
                        pixel_diff += 1;
                        diff_image.put_pixel(x + width, y, Rgba([255, 0, 0, 255]));
                    } else {
                        diff_image.put_pixel(x + width, y, Rgba([0, 0, 0, 255]))
                    }
                }
                (Some(actual), None) => {
                    pixel_diff += 1;
                    diff_image.put_pixel(x + 2 * width, y, *actual);
                    diff_image.put_pixel(x + width, y, Rgba([255, 0, 0, 255]));
                }
                (None, Some(expected)) => {
                    pixel_diff += 1;
                    diff_image.put_pixel(x, y, *expected);
                    diff_image.put_pixel(x + width, y, Rgba([255, 0, 0, 255]));
                }
                _ => {}
            }
        }
    }

    if pixel_diff > 0 {
        Some(diff_image)
    } else {
        None
    }
}
