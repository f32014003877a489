// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Downsampling of supersampled pixmaps.

use crate::pixmap::Pixmap;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// The filter used to shrink a supersampled shape to its output size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resample {
    /// Average each `aa`x`aa` block. Exact coverage, never rings.
    #[default]
    Area,
    /// Lanczos with a window of 3 lobes.
    Lanczos3,
}

/// Shrink `src` to `width`x`height`. Both operate on premultiplied pixels.
pub fn downsample(src: &Pixmap, width: usize, height: usize, resample: Resample) -> Pixmap {
    match resample {
        Resample::Area => area(src, width, height),
        Resample::Lanczos3 => lanczos3(src, width, height),
    }
}

fn area(src: &Pixmap, width: usize, height: usize) -> Pixmap {
    let mut out = Pixmap::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let fx = src.width / width;
    let fy = src.height / height;
    let count = (fx * fy) as u32;
    if count == 0 {
        return out;
    }

    for y in 0..height {
        for x in 0..width {
            let mut sum = [0u32; 4];
            for sy in y * fy..(y + 1) * fy {
                let row = sy * src.width;
                for sx in x * fx..(x + 1) * fx {
                    let ix = (row + sx) * 4;
                    for (acc, c) in sum.iter_mut().zip(&src.buf[ix..ix + 4]) {
                        *acc += *c as u32;
                    }
                }
            }

            let ix = (y * width + x) * 4;
            for (dst, acc) in out.buf[ix..ix + 4].iter_mut().zip(sum) {
                *dst = ((acc + count / 2) / count) as u8;
            }
        }
    }

    out
}

fn lanczos3(src: &Pixmap, width: usize, height: usize) -> Pixmap {
    let Some(image) = RgbaImage::from_raw(src.width as u32, src.height as u32, src.buf.clone())
    else {
        return area(src, width, height);
    };

    let resized = imageops::resize(&image, width as u32, height as u32, FilterType::Lanczos3);
    let mut buf = resized.into_raw();

    // Ringing may push a channel above its alpha, which is not a valid premultiplied color.
    for px in buf.chunks_exact_mut(4) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = (*c).min(a);
        }
    }

    Pixmap { width, height, buf }
}
