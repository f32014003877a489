// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-sampled scanline filling.
//!
//! Every pixel is either fully inside or fully outside of a path, decided by the winding
//! number at the pixel center. This gives the exact, aliased fills that the supersampler
//! averages down afterwards.
//!
//! Filling runs in the same three steps as tile generation: every line is split into the
//! rows whose sample centers it crosses, the crossings are sorted by location, and finally
//! each row is walked left to right, accumulating winding and filling active spans.

use crate::pixmap::Pixmap;
use crate::FillRule;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from(value: [f32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

/// This is just Line but f32
#[derive(Clone, Copy, Debug)]
pub struct FlatLine {
    pub p0: Point,
    pub p1: Point,
}

impl FlatLine {
    pub fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }
}

/// A line crossing the sample center of one row.
#[derive(Clone, Copy, Debug)]
pub struct Crossing {
    pub row: u32,
    pub x: f32,
    /// +1 for downward lines, -1 for upward ones.
    pub winding: i32,
}

impl Crossing {
    pub(crate) fn cmp(&self, b: &Crossing) -> std::cmp::Ordering {
        self.row.cmp(&b.row).then(self.x.total_cmp(&b.x))
    }
}

/// Compute the row crossings of `lines` for a target of the given height.
pub fn make_crossings(lines: &[FlatLine], height: usize, crossing_buf: &mut Vec<Crossing>) {
    crossing_buf.clear();

    for line in lines {
        let (top, bottom, winding) = if line.p0.y < line.p1.y {
            (line.p0, line.p1, 1)
        } else if line.p0.y > line.p1.y {
            (line.p1, line.p0, -1)
        } else {
            // Horizontal lines never cross a sample center.
            continue;
        };

        // Rows whose center `y + 0.5` lies in `[top.y, bottom.y)`.
        let first = (top.y - 0.5).ceil().max(0.0);
        let last = (bottom.y - 0.5).ceil().min(height as f32);
        if first >= last {
            continue;
        }

        let slope = (bottom.x - top.x) / (bottom.y - top.y);
        for row in first as u32..last as u32 {
            let sample_y = row as f32 + 0.5;
            crossing_buf.push(Crossing {
                row,
                x: top.x + (sample_y - top.y) * slope,
                winding,
            });
        }
    }

    crossing_buf.sort_unstable_by(Crossing::cmp);
}

/// Fill the area enclosed by `lines` with the premultiplied `color`, replacing whatever
/// was there before.
pub fn fill_lines(
    lines: &[FlatLine],
    fill_rule: FillRule,
    color: [u8; 4],
    pixmap: &mut Pixmap,
    crossing_buf: &mut Vec<Crossing>,
) {
    make_crossings(lines, pixmap.height, crossing_buf);

    let width = pixmap.width;
    let mut i = 0;
    while i < crossing_buf.len() {
        let row = crossing_buf[i].row;
        let mut winding = 0;

        while i < crossing_buf.len() && crossing_buf[i].row == row {
            let crossing = crossing_buf[i];
            winding += crossing.winding;
            i += 1;

            let Some(next) = crossing_buf.get(i).filter(|c| c.row == row) else {
                break;
            };

            if fill_rule.active_fill(winding) {
                fill_span(pixmap, width, row as usize, crossing.x, next.x, color);
            }
        }
    }
}

/// Fill every pixel of `row` whose center lies in `[x0, x1)`.
fn fill_span(pixmap: &mut Pixmap, width: usize, row: usize, x0: f32, x1: f32, color: [u8; 4]) {
    let start = (x0 - 0.5).ceil().clamp(0.0, width as f32) as usize;
    let end = (x1 - 0.5).ceil().clamp(0.0, width as f32) as usize;
    if start >= end {
        return;
    }

    let line = &mut pixmap.buf[row * width * 4..(row + 1) * width * 4];
    for px in line[start * 4..end * 4].chunks_exact_mut(4) {
        px.copy_from_slice(&color);
    }
}

#[cfg(test)]
mod tests {
    use super::{fill_lines, make_crossings, FlatLine, Point};
    use crate::{FillRule, Pixmap};

    fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<FlatLine> {
        vec![
            FlatLine::new(Point::new(x0, y0), Point::new(x1, y0)),
            FlatLine::new(Point::new(x1, y0), Point::new(x1, y1)),
            FlatLine::new(Point::new(x1, y1), Point::new(x0, y1)),
            FlatLine::new(Point::new(x0, y1), Point::new(x0, y0)),
        ]
    }

    fn covered(pixmap: &Pixmap) -> usize {
        pixmap.data().chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    #[test]
    fn crossings_skip_horizontal_lines() {
        let mut buf = vec![];
        make_crossings(&square(1.0, 1.0, 3.0, 3.0), 8, &mut buf);

        // Two vertical edges, two rows each.
        assert_eq!(buf.len(), 4);
        assert!(buf.windows(2).all(|w| w[0].row <= w[1].row));
    }

    #[test]
    fn integer_square_covers_exact_pixels() {
        let mut pixmap = Pixmap::new(8, 8);
        let mut buf = vec![];
        fill_lines(
            &square(2.0, 1.0, 5.0, 4.0),
            FillRule::NonZero,
            [255; 4],
            &mut pixmap,
            &mut buf,
        );

        assert_eq!(covered(&pixmap), 9);
        assert_eq!(pixmap.bounds_where(|px| px[3] != 0), Some((2, 1, 5, 4)));
    }

    #[test]
    fn even_odd_ring() {
        let mut lines = square(0.0, 0.0, 6.0, 6.0);
        lines.extend(square(1.0, 1.0, 5.0, 5.0));

        let mut pixmap = Pixmap::new(6, 6);
        let mut buf = vec![];
        fill_lines(&lines, FillRule::EvenOdd, [255; 4], &mut pixmap, &mut buf);

        assert_eq!(covered(&pixmap), 36 - 16);
        assert_eq!(pixmap.pixel(3, 3), Some([0; 4]));
    }

    #[test]
    fn clipped_to_pixmap() {
        let mut pixmap = Pixmap::new(4, 4);
        let mut buf = vec![];
        fill_lines(
            &square(-10.0, -10.0, 10.0, 10.0),
            FillRule::NonZero,
            [255; 4],
            &mut pixmap,
            &mut buf,
        );

        assert_eq!(covered(&pixmap), 16);
    }
}
