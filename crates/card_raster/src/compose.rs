// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card composition.

use crate::card::{CardAttributes, CardColor, ShapeKind};
use crate::color::parse_hex;
use crate::config::{CardFamily, PipShape, ShapeGeometry};
use crate::error::{Error, Result};
use crate::fill::{resolve_fill, FillParams, FillSpec};
use crate::layout::{Layout, Point};
use crate::pixmap::Pixmap;
use crate::raster::ShapeRasterizer;
use log::debug;
use peniko::color::{AlphaColor, Srgb};

/// Largest supported card width or height in pixels.
const MAX_CARD_SIDE: usize = 1 << 14;

/// Renders cards of one family.
///
/// The composer is immutable once built, so it can be shared between threads and used to
/// render any number of cards concurrently.
#[derive(Clone, Debug)]
pub struct CardComposer {
    width: usize,
    height: usize,
    background: AlphaColor<Srgb>,
    border_color: AlphaColor<Srgb>,
    palette: [AlphaColor<Srgb>; 3],
    shapes: ShapeGeometry,
    fill: FillParams,
    layout: Layout,
    rasterizer: ShapeRasterizer,
}

impl CardComposer {
    /// Resolve the colors of `family` and build a composer for it.
    ///
    /// Fails when a color does not parse, the card size is out of range, or the spacing
    /// moves pips outside of the coordinate range.
    pub fn new(family: &CardFamily) -> Result<Self> {
        let sides = 1..=MAX_CARD_SIDE;
        if !sides.contains(&family.width) || !sides.contains(&family.height) {
            return Err(Error::InvalidDimensions {
                shape: "card",
                width: family.width as f64,
                height: family.height as f64,
            });
        }

        let [red, purple, green] = &family.palette;
        let composer = Self {
            width: family.width,
            height: family.height,
            background: parse_hex(&family.background)?,
            border_color: parse_hex(&family.border_color)?,
            palette: [parse_hex(red)?, parse_hex(purple)?, parse_hex(green)?],
            shapes: family.shapes,
            fill: family.fill,
            layout: Layout::new(family.spacing, family.count_policy),
            rasterizer: ShapeRasterizer::new(family.antialias, family.resample),
        };
        composer.layout.centers(composer.center(), 3)?;

        Ok(composer)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> AlphaColor<Srgb> {
        self.background
    }

    pub fn color(&self, color: CardColor) -> AlphaColor<Srgb> {
        self.palette[color.index() as usize]
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn rasterizer(&self) -> &ShapeRasterizer {
        &self.rasterizer
    }

    /// The center of the card canvas.
    pub fn center(&self) -> Point {
        Point::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// The paint used for the pips of `card`.
    ///
    /// Borders are corrected for the primitive the pips are drawn with, which may differ
    /// from the card's shape kind.
    pub fn fill_spec(&self, card: &CardAttributes) -> Result<FillSpec> {
        resolve_fill(
            self.shapes.pip(card.shape).border_kind(),
            card.fill,
            self.color(card.color),
            self.background,
            &self.fill,
        )
    }

    /// Render `card`.
    pub fn compose(&self, card: &CardAttributes) -> Result<Pixmap> {
        self.compose_with_count(card, card.count.value())
    }

    /// Render `card` with an explicit, possibly out-of-range, pip count.
    ///
    /// The count is resolved by the family's [`crate::CountPolicy`].
    pub fn compose_with_count(&self, card: &CardAttributes, count: u32) -> Result<Pixmap> {
        debug!("composing {} ({card}) with {count} pip(s)", card.code());

        let centers = self.layout.centers(self.center(), count)?;
        let style = self.fill_spec(card)?;

        let mut canvas = self.blank()?;
        for center in centers {
            self.draw_pip(&mut canvas, card.shape, center, &style)?;
        }

        Ok(canvas)
    }

    /// A card without pips: the background with a 1px outline.
    pub fn blank(&self) -> Result<Pixmap> {
        let mut canvas = Pixmap::filled(self.width, self.height, self.background);
        let outline = FillSpec::bordered(self.background, 1.0, self.border_color);
        self.rasterizer.rounded_rect(
            &mut canvas,
            self.center(),
            self.width as f64,
            self.height as f64,
            0.0,
            &outline,
        )?;

        Ok(canvas)
    }

    /// Draw one pip of `shape` centered on `center`, with the primitive the family's
    /// [`crate::PipStrategy`] selects for it.
    pub fn draw_pip(
        &self,
        canvas: &mut Pixmap,
        shape: ShapeKind,
        center: Point,
        style: &FillSpec,
    ) -> Result<()> {
        let r = &self.rasterizer;
        match self.shapes.pip(shape) {
            PipShape::Capsule => {
                let oval = self.shapes.oval;
                r.rounded_rect(canvas, center, oval.width, oval.height, oval.rounding, style)
            }
            PipShape::Rhombus => {
                let diamond = self.shapes.diamond;
                r.diamond(canvas, center, diamond.radius(), diamond.stretch(), style)
            }
            PipShape::Rectangle => {
                let rect = self.shapes.rectangle;
                r.rounded_rect(canvas, center, rect.width, rect.height, rect.rounding, style)
            }
            PipShape::Barbell => {
                let rail = self.fill.correction.rail(style.border_thickness) as f64;
                r.barbell(canvas, center, &self.shapes.squiggle, rail, style)
            }
        }
    }
}
