// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic rasterization of playing-card images.
//!
//! A card is described by four [`CardAttributes`]: color, shape, fill style and pip count.
//! [`CardComposer`] turns them into a [`Pixmap`] by laying out one to three pips along the
//! vertical axis and drawing each with [`ShapeRasterizer`], a supersampling rasterizer
//! whose borders grow inward from the shape's silhouette.
//!
//! ```no_run
//! use card_raster::{CardAttributes, CardComposer, CardFamily};
//!
//! let composer = CardComposer::new(&CardFamily::default())?;
//! let card: CardAttributes = "RDS2".parse()?;
//! let pixmap = composer.compose(&card)?;
//! assert_eq!((pixmap.width(), pixmap.height()), (200, 290));
//! # Ok::<(), card_raster::Error>(())
//! ```

pub mod card;
pub mod code;
pub mod color;
pub mod compose;
pub mod config;
pub mod error;
pub mod fill;
pub mod flatten;
pub mod layout;
pub mod pixmap;
pub mod raster;
pub mod resample;
pub mod scanline;

pub use peniko;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

impl FillRule {
    pub(crate) fn active_fill(&self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

pub use card::{CardAttributes, CardColor, Count, FillStyle, ShapeKind};
pub use code::{normalize, Code};
pub use color::{lighten, lighten_hex};
pub use compose::CardComposer;
pub use config::{
    CardFamily, DiamondGeometry, OvalGeometry, PipShape, PipStrategy, RectangleGeometry,
    ShapeGeometry, ShapeSpec,
};
pub use error::{Error, Result};
pub use fill::{resolve_fill, resolve_named, BorderCorrection, FillParams, FillSpec};
pub use layout::{CountPolicy, Layout, Point};
pub use pixmap::Pixmap;
pub use raster::{BarbellGeometry, Layer, Primitive, ShapeRasterizer};
pub use resample::Resample;
