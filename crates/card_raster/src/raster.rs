// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Antialiased shape primitives.
//!
//! Every primitive is drawn the same way: the silhouette is filled into a transparent
//! buffer `aa` times larger than the output in each dimension, the buffer is shrunk to the
//! output size and the result is composited onto the target canvas, centered on the
//! requested point.
//!
//! Borders are drawn inward, so they never change the outer size of a shape. The border
//! band is built by stroking the outline, then the outline inset by one supersampled
//! pixel, and so on, until the band is as wide as the border. The silhouette inset by the
//! full border width is then filled with the interior color.

use crate::color::validate;
use crate::error::{Error, Result};
use crate::fill::FillSpec;
use crate::flatten;
use crate::layout::Point;
use crate::pixmap::{premul_rgba8, Pixmap};
use crate::resample::{downsample, Resample};
use crate::scanline::{fill_lines, Crossing, FlatLine};
use crate::FillRule;
use log::trace;
use peniko::kurbo::{self, Affine, BezPath, Circle, Rect, RoundedRect, Shape};
use std::f64::consts::PI;

/// The tolerance used when converting curved outlines to paths.
const PATH_TOL: f64 = 0.1;

/// Upper bound on the size in bytes of a supersampled buffer.
const MAX_BUFFER_BYTES: usize = 1 << 30;

/// A shape to rasterize, in output pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// A rectangle whose corner radius is `rounding * min(width, height) / 2`.
    ///
    /// `rounding` is clamped to `[0, 1]`: `0` gives sharp corners, `1` a capsule.
    RoundedRect { width: f64, height: f64, rounding: f64 },
    /// A rhombus `2 * radius` wide and `2 * radius * stretch` tall.
    Diamond { radius: f64, stretch: f64 },
    Circle { radius: f64 },
    /// An axis-aligned square with half side length `radius`.
    Square { radius: f64 },
    /// An equilateral triangle with circumradius `radius`, point-up unless `flip` is set.
    Triangle { radius: f64, flip: bool },
}

impl Primitive {
    fn name(&self) -> &'static str {
        match self {
            Primitive::RoundedRect { .. } => "rounded rect",
            Primitive::Diamond { .. } => "diamond",
            Primitive::Circle { .. } => "circle",
            Primitive::Square { .. } => "square",
            Primitive::Triangle { .. } => "triangle",
        }
    }

    /// Validate the parameters and compute the output size in pixels.
    fn output_size(&self) -> Result<(usize, usize)> {
        let (width, height, ok) = match *self {
            Primitive::RoundedRect { width, height, .. } => (width, height, true),
            Primitive::Diamond { radius, stretch } => {
                (radius * 2.0, radius * 2.0 * stretch, stretch > 0.0)
            }
            Primitive::Circle { radius }
            | Primitive::Square { radius }
            | Primitive::Triangle { radius, .. } => (radius * 2.0, radius * 2.0, true),
        };

        let invalid = || Error::InvalidDimensions {
            shape: self.name(),
            width,
            height,
        };

        if !ok || !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(invalid());
        }

        let (out_w, out_h) = (width.round(), height.round());
        if out_w < 1.0 || out_h < 1.0 {
            return Err(invalid());
        }

        // Saturates for huge sizes, which `supersampled_size` then rejects.
        Ok((out_w as usize, out_h as usize))
    }

    /// The silhouette in a supersampled buffer of `size`, scaled by `aa`.
    fn silhouette(&self, (out_w, out_h): (usize, usize), aa: u32) -> Silhouette {
        let aa = aa as f64;
        let (bw, bh) = (out_w as f64 * aa, out_h as f64 * aa);

        match *self {
            Primitive::RoundedRect { rounding, .. } => {
                let max_radius = bw.min(bh) / 2.0;
                Silhouette::RoundedRect {
                    bounds: Rect::new(0.0, 0.0, bw, bh),
                    radius: rounding.clamp(0.0, 1.0) * max_radius,
                }
            }
            Primitive::Diamond { radius, stretch } => Silhouette::Diamond {
                center: kurbo::Point::new(bw / 2.0, bh / 2.0),
                half_width: radius * aa,
                half_height: radius * stretch * aa,
            },
            Primitive::Circle { .. } => Silhouette::Circle {
                center: kurbo::Point::new(bw / 2.0, bh / 2.0),
                radius: bw / 2.0,
            },
            Primitive::Square { .. } => Silhouette::RoundedRect {
                bounds: Rect::new(0.0, 0.0, bw, bh),
                radius: 0.0,
            },
            Primitive::Triangle { flip, .. } => Silhouette::Triangle {
                center: kurbo::Point::new(bw / 2.0, bh / 2.0),
                radius: bw / 2.0,
                flip,
            },
        }
    }
}

/// A silhouette in supersampled coordinates that can be shrunk inward.
#[derive(Clone, Copy, Debug)]
enum Silhouette {
    RoundedRect { bounds: Rect, radius: f64 },
    Diamond {
        center: kurbo::Point,
        half_width: f64,
        half_height: f64,
    },
    Circle { center: kurbo::Point, radius: f64 },
    Triangle {
        center: kurbo::Point,
        radius: f64,
        flip: bool,
    },
}

impl Silhouette {
    /// The outline shrunk by `inset`, or `None` once nothing is left of it.
    fn inset_path(&self, inset: f64) -> Option<BezPath> {
        match *self {
            Silhouette::RoundedRect { bounds, radius } => {
                let rect = bounds.inset(-inset);
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return None;
                }

                let radius = (radius - inset).max(0.0).min(rect.width().min(rect.height()) / 2.0);
                if radius > 0.0 {
                    Some(RoundedRect::from_rect(rect, radius).to_path(PATH_TOL))
                } else {
                    Some(rect.to_path(PATH_TOL))
                }
            }
            Silhouette::Diamond {
                center,
                half_width,
                half_height,
            } => {
                let (hw, hh) = (half_width - inset, half_height - inset);
                if hw <= 0.0 || hh <= 0.0 {
                    return None;
                }

                Some(polygon(&[
                    (center.x, center.y - hh),
                    (center.x + hw, center.y),
                    (center.x, center.y + hh),
                    (center.x - hw, center.y),
                ]))
            }
            Silhouette::Circle { center, radius } => {
                let r = radius - inset;
                (r > 0.0).then(|| Circle::new(center, r).to_path(PATH_TOL))
            }
            Silhouette::Triangle {
                center,
                radius,
                flip,
            } => {
                let r = radius - inset;
                if r <= 0.0 {
                    return None;
                }

                let sign = if flip { -1.0 } else { 1.0 };
                let points = [-90.0f64, 30.0, 150.0].map(|deg| {
                    let t = deg * PI / 180.0;
                    (center.x + r * t.cos(), center.y + sign * r * t.sin())
                });

                Some(polygon(&points))
            }
        }
    }
}

fn polygon(points: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(*p);
        } else {
            path.line_to(*p);
        }
    }
    path.close_path();

    path
}

/// A rasterized shape waiting to be composited, with the canvas position of its top-left
/// corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub pixmap: Pixmap,
    pub x: i32,
    pub y: i32,
}

impl Layer {
    /// Blend the layer onto `canvas`.
    pub fn composite(&self, canvas: &mut Pixmap) {
        canvas.draw_pixmap(&self.pixmap, self.x, self.y);
    }
}

/// Geometry of the barbell that stands in for the squiggle: two rounded squares joined
/// by a horizontal bar.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BarbellGeometry {
    /// Side length of each square.
    pub square: f64,
    /// Gap between the two squares.
    pub between: f64,
    pub bar_height: f64,
    pub rounding: f64,
}

impl Default for BarbellGeometry {
    fn default() -> Self {
        Self {
            square: 56.0,
            between: 30.0,
            bar_height: 16.0,
            rounding: 0.1,
        }
    }
}

impl BarbellGeometry {
    pub fn width(&self) -> f64 {
        self.square * 2.0 + self.between
    }

    pub fn height(&self) -> f64 {
        self.square
    }
}

/// Draws antialiased primitives by supersampling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeRasterizer {
    aa: u32,
    resample: Resample,
}

impl Default for ShapeRasterizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_AA, Resample::Area)
    }
}

impl ShapeRasterizer {
    pub const DEFAULT_AA: u32 = 4;
    pub const MAX_AA: u32 = 16;

    /// Create a rasterizer with the supersampling factor `aa`, clamped to `2..=16`.
    pub fn new(aa: u32, resample: Resample) -> Self {
        Self {
            aa: aa.clamp(2, Self::MAX_AA),
            resample,
        }
    }

    pub fn aa(&self) -> u32 {
        self.aa
    }

    pub fn resample(&self) -> Resample {
        self.resample
    }

    pub fn rounded_rect(
        &self,
        canvas: &mut Pixmap,
        center: Point,
        width: f64,
        height: f64,
        rounding: f64,
        style: &FillSpec,
    ) -> Result<()> {
        let primitive = Primitive::RoundedRect {
            width,
            height,
            rounding,
        };
        self.layer(&primitive, center, style)?.composite(canvas);

        Ok(())
    }

    pub fn diamond(
        &self,
        canvas: &mut Pixmap,
        center: Point,
        radius: f64,
        stretch: f64,
        style: &FillSpec,
    ) -> Result<()> {
        self.layer(&Primitive::Diamond { radius, stretch }, center, style)?
            .composite(canvas);

        Ok(())
    }

    pub fn circle(
        &self,
        canvas: &mut Pixmap,
        center: Point,
        radius: f64,
        style: &FillSpec,
    ) -> Result<()> {
        self.layer(&Primitive::Circle { radius }, center, style)?
            .composite(canvas);

        Ok(())
    }

    pub fn square(
        &self,
        canvas: &mut Pixmap,
        center: Point,
        radius: f64,
        style: &FillSpec,
    ) -> Result<()> {
        self.layer(&Primitive::Square { radius }, center, style)?
            .composite(canvas);

        Ok(())
    }

    pub fn triangle(
        &self,
        canvas: &mut Pixmap,
        center: Point,
        radius: f64,
        flip: bool,
        style: &FillSpec,
    ) -> Result<()> {
        self.layer(&Primitive::Triangle { radius, flip }, center, style)?
            .composite(canvas);

        Ok(())
    }

    /// Draw the barbell. The squares carry the border of `style`; the bar is edged with
    /// rails `rail` pixels high when `style` has a border.
    pub fn barbell(
        &self,
        canvas: &mut Pixmap,
        center: Point,
        geometry: &BarbellGeometry,
        rail: f64,
        style: &FillSpec,
    ) -> Result<()> {
        for layer in self.barbell_layers(center, geometry, rail, style)? {
            layer.composite(canvas);
        }

        Ok(())
    }

    /// Rasterize the parts of a barbell without touching any canvas.
    pub fn barbell_layers(
        &self,
        center: Point,
        geometry: &BarbellGeometry,
        rail: f64,
        style: &FillSpec,
    ) -> Result<Vec<Layer>> {
        let BarbellGeometry {
            square,
            between,
            bar_height,
            rounding,
        } = *geometry;

        let arm = (square / 2.0 + between / 2.0).round() as i32;
        let square_shape = Primitive::RoundedRect {
            width: square,
            height: square,
            rounding,
        };

        let mut layers = vec![
            self.layer(&square_shape, center.offset(-arm, 0), style)?,
            self.layer(&square_shape, center.offset(arm, 0), style)?,
        ];

        // The bar reaches into both squares far enough to cover their inner borders.
        let overlap = if style.has_border() {
            style.border_thickness as f64 * 2.0 + 4.0
        } else {
            4.0
        };
        let bar = Primitive::RoundedRect {
            width: between + overlap,
            height: bar_height,
            rounding: 0.0,
        };
        layers.push(self.layer(&bar, center, &FillSpec::solid(style.fill))?);

        if style.has_border() && rail > 0.0 {
            let rail_shape = Primitive::RoundedRect {
                width: between,
                height: rail,
                rounding: 0.0,
            };
            let rail_style = FillSpec::solid(style.border_color);
            let dy = (bar_height / 2.0 + rail / 2.0).round() as i32;

            layers.push(self.layer(&rail_shape, center.offset(0, -dy), &rail_style)?);
            layers.push(self.layer(&rail_shape, center.offset(0, dy), &rail_style)?);
        }

        Ok(layers)
    }

    /// Rasterize `primitive` centered on `center`, without touching any canvas.
    ///
    /// All validation happens here, so compositing the returned layer cannot fail.
    pub fn layer(&self, primitive: &Primitive, center: Point, style: &FillSpec) -> Result<Layer> {
        let size = primitive.output_size()?;
        let hi_size = self
            .supersampled_size(size)
            .ok_or(Error::InvalidDimensions {
                shape: primitive.name(),
                width: size.0 as f64,
                height: size.1 as f64,
            })?;
        validate_style(style, primitive.name())?;

        trace!(
            "rasterizing {} at ({}, {}), {}x{} px, border {}",
            primitive.name(),
            center.x,
            center.y,
            size.0,
            size.1,
            style.border_thickness
        );

        let silhouette = primitive.silhouette(size, self.aa);
        let pixmap = self.render(&silhouette, size, hi_size, style);

        Ok(Layer {
            pixmap,
            x: center.x.saturating_sub((size.0 / 2) as i32),
            y: center.y.saturating_sub((size.1 / 2) as i32),
        })
    }

    /// The size of the supersampled buffer for an output of `size`, or `None` when it
    /// would exceed [`MAX_BUFFER_BYTES`].
    fn supersampled_size(&self, (out_w, out_h): (usize, usize)) -> Option<(usize, usize)> {
        let aa = self.aa as usize;
        let (w, h) = (out_w.checked_mul(aa)?, out_h.checked_mul(aa)?);
        let bytes = w.checked_mul(h)?.checked_mul(4)?;

        (bytes <= MAX_BUFFER_BYTES && i32::try_from(out_w.max(out_h)).is_ok()).then_some((w, h))
    }

    fn render(
        &self,
        silhouette: &Silhouette,
        (out_w, out_h): (usize, usize),
        (hi_w, hi_h): (usize, usize),
        style: &FillSpec,
    ) -> Pixmap {
        let mut hi = Pixmap::new(hi_w, hi_h);
        let mut ctx = FillContext::default();
        let fill = premul_rgba8(style.fill);

        let border = style.supersampled_border(self.aa);
        if border > 0 {
            let border_color = premul_rgba8(style.border_color);

            for i in 0..border {
                let outer = silhouette.inset_path(i as f64);
                let inner = silhouette.inset_path((i + 1) as f64);

                match (outer, inner) {
                    (Some(outer), Some(inner)) => {
                        ctx.fill_ring(&outer, &inner, border_color, &mut hi)
                    }
                    (Some(outer), None) => {
                        ctx.fill(&outer, border_color, &mut hi);
                        break;
                    }
                    (None, _) => break,
                }
            }

            if let Some(inner) = silhouette.inset_path(border as f64) {
                ctx.fill(&inner, fill, &mut hi);
            }
        } else if let Some(outline) = silhouette.inset_path(0.0) {
            ctx.fill(&outline, fill, &mut hi);
        }

        downsample(&hi, out_w, out_h, self.resample)
    }
}

fn validate_style(style: &FillSpec, shape: &'static str) -> Result<()> {
    validate(&style.fill)?;

    let thickness = style.border_thickness;
    if !thickness.is_finite() || thickness < 0.0 {
        return Err(Error::InvalidDimensions {
            shape,
            width: thickness as f64,
            height: thickness as f64,
        });
    }

    if style.has_border() {
        validate(&style.border_color)?;
    }

    Ok(())
}

/// Scratch buffers for filling paths.
#[derive(Default)]
struct FillContext {
    line_buf: Vec<FlatLine>,
    crossing_buf: Vec<Crossing>,
}

impl FillContext {
    fn fill(&mut self, path: &BezPath, color: [u8; 4], target: &mut Pixmap) {
        self.line_buf.clear();
        flatten::fill(path, Affine::IDENTITY, &mut self.line_buf);
        fill_lines(
            &self.line_buf,
            FillRule::NonZero,
            color,
            target,
            &mut self.crossing_buf,
        );
    }

    /// Fill the band between `outer` and the nested `inner` outline.
    fn fill_ring(
        &mut self,
        outer: &BezPath,
        inner: &BezPath,
        color: [u8; 4],
        target: &mut Pixmap,
    ) {
        self.line_buf.clear();
        flatten::fill(outer, Affine::IDENTITY, &mut self.line_buf);
        flatten::fill(inner, Affine::IDENTITY, &mut self.line_buf);
        fill_lines(
            &self.line_buf,
            FillRule::EvenOdd,
            color,
            target,
            &mut self.crossing_buf,
        );
    }
}
