// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utilities for flattening

use peniko::kurbo::{self, Affine, BezPath, Point};

use crate::scanline::FlatLine;

/// The flattening tolerance, in supersampled pixels.
const TOL: f64 = 0.25;

/// Flatten `path` into line segments, appending them to `line_buf`.
///
/// Every subpath is closed implicitly, so the output is suitable for filling.
pub fn fill(path: &BezPath, affine: Affine, line_buf: &mut Vec<FlatLine>) {
    let mut start = Point::default();
    let mut p0 = Point::default();
    let mut open = false;
    let iter = path.iter().map(|el| affine * el);

    kurbo::flatten(iter, TOL, |el| match el {
        kurbo::PathEl::MoveTo(p) => {
            if open {
                close(p0, start, line_buf);
            }
            start = p;
            p0 = p;
            open = true;
        }
        kurbo::PathEl::LineTo(p) => {
            push(p0, p, line_buf);
            p0 = p;
        }
        kurbo::PathEl::QuadTo(_, _) => unreachable!(),
        kurbo::PathEl::CurveTo(_, _, _) => unreachable!(),
        kurbo::PathEl::ClosePath => {
            close(p0, start, line_buf);
            p0 = start;
            open = false;
        }
    });

    if open {
        close(p0, start, line_buf);
    }
}

fn push(p0: Point, p1: Point, line_buf: &mut Vec<FlatLine>) {
    let pt0 = [p0.x as f32, p0.y as f32];
    let pt1 = [p1.x as f32, p1.y as f32];
    if pt0 != pt1 {
        line_buf.push(FlatLine::new(pt0.into(), pt1.into()));
    }
}

fn close(p0: Point, start: Point, line_buf: &mut Vec<FlatLine>) {
    push(p0, start, line_buf);
}
