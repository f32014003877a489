// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simple pixmap type

use peniko::color::{AlphaColor, Srgb};

/// A premultiplied RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) buf: Vec<u8>,
}

impl Pixmap {
    /// Create a fully transparent pixmap.
    pub fn new(width: usize, height: usize) -> Self {
        let buf = vec![0; width * height * 4];
        Self { width, height, buf }
    }

    /// Create a pixmap where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: AlphaColor<Srgb>) -> Self {
        let mut pixmap = Self::new(width, height);
        let premul = premul_rgba8(color);
        for px in pixmap.buf.chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }

        pixmap
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// The premultiplied pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let ix = (y * self.width + x) * 4;
        let mut px = [0; 4];
        px.copy_from_slice(&self.buf[ix..ix + 4]);

        Some(px)
    }

    /// The smallest rectangle `(x0, y0, x1, y1)` (exclusive end) containing every
    /// pixel for which `pred` holds.
    pub fn bounds_where(
        &self,
        pred: impl Fn([u8; 4]) -> bool,
    ) -> Option<(usize, usize, usize, usize)> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;

        for (i, px) in self.buf.chunks_exact(4).enumerate() {
            if !pred([px[0], px[1], px[2], px[3]]) {
                continue;
            }

            let (x, y) = (i % self.width, i / self.width);
            bounds = Some(match bounds {
                None => (x, y, x + 1, y + 1),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
            });
        }

        bounds
    }

    /// Composite `src` with its top-left corner at `(x, y)` using source-over.
    ///
    /// Pixels falling outside of `self` are clipped.
    pub fn draw_pixmap(&mut self, src: &Pixmap, x: i32, y: i32) {
        for sy in 0..src.height {
            let dy = y as i64 + sy as i64;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }

            for sx in 0..src.width {
                let dx = x as i64 + sx as i64;
                if dx < 0 || dx >= self.width as i64 {
                    continue;
                }

                let s_ix = (sy * src.width + sx) * 4;
                let d_ix = (dy as usize * self.width + dx as usize) * 4;
                src_over(&mut self.buf[d_ix..d_ix + 4], &src.buf[s_ix..s_ix + 4]);
            }
        }
    }

    /// Convert from premultiplied to separate alpha.
    ///
    /// Not fast, but useful for saving to PNG etc.
    pub fn unpremultiply(&mut self) {
        for rgba in self.buf.chunks_exact_mut(4) {
            let alpha = rgba[3] as f32 * (1.0 / 255.0);
            if alpha != 0.0 {
                rgba[0] = (rgba[0] as f32 / alpha).round().min(255.0) as u8;
                rgba[1] = (rgba[1] as f32 / alpha).round().min(255.0) as u8;
                rgba[2] = (rgba[2] as f32 / alpha).round().min(255.0) as u8;
            }
        }
    }
}

pub(crate) fn premul_rgba8(color: AlphaColor<Srgb>) -> [u8; 4] {
    color.premultiply().to_rgba8().to_u8_array()
}

#[inline(always)]
pub(crate) const fn div_255(val: u16) -> u16 {
    (val + 1 + (val >> 8)) >> 8
}

/// Composite using `SrcOver` (Cs + Cb * (1 – αs)), both premultiplied.
#[inline(always)]
fn src_over(cb: &mut [u8], cs: &[u8]) {
    let inv_as = (255 - cs[3]) as u16;
    if inv_as == 255 {
        return;
    }

    for i in 0..4 {
        cb[i] = cs[i].saturating_add(div_255(cb[i] as u16 * inv_as) as u8);
    }
}
