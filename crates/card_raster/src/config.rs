// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card family configuration.
//!
//! Everything that is shared by all cards of a family lives here: canvas size, colors,
//! shape geometry, pip spacing, border widths and rendering quality. The defaults describe
//! the production card set. A family is plain data and can be loaded from JSON; colors are
//! only parsed when a [`crate::CardComposer`] is built from it.

use crate::card::ShapeKind;
use crate::fill::FillParams;
use crate::layout::CountPolicy;
use crate::raster::BarbellGeometry;
use crate::resample::Resample;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFamily {
    pub width: usize,
    pub height: usize,
    pub background: String,
    /// Color of the 1px outline around the card.
    pub border_color: String,
    /// Pip colors, indexed by [`crate::CardColor::index`].
    pub palette: [String; 3],
    pub shapes: ShapeGeometry,
    /// Vertical distance `d` between pip centers, see [`crate::Layout`].
    pub spacing: i32,
    pub fill: FillParams,
    /// Supersampling factor.
    pub antialias: u32,
    pub resample: Resample,
    pub count_policy: CountPolicy,
}

impl Default for CardFamily {
    fn default() -> Self {
        Self {
            width: 200,
            height: 290,
            background: "#FFFFFF".to_string(),
            border_color: "#FF0000".to_string(),
            palette: [
                "#9C3327".to_string(),
                "#2D34A1".to_string(),
                "#3D713D".to_string(),
            ],
            shapes: ShapeGeometry::default(),
            spacing: 37,
            fill: FillParams::default(),
            antialias: 4,
            resample: Resample::Area,
            count_policy: CountPolicy::Clamp,
        }
    }
}

/// Nominal pip sizes, and how each shape kind is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeGeometry {
    pub oval: OvalGeometry,
    pub diamond: DiamondGeometry,
    pub rectangle: RectangleGeometry,
    pub squiggle: BarbellGeometry,
    pub strategy: PipStrategy,
}

impl ShapeGeometry {
    /// The drawing strategy used for pips of `shape`.
    pub fn pip(&self, shape: ShapeKind) -> PipShape {
        match shape {
            ShapeKind::Oval => self.strategy.oval,
            ShapeKind::Diamond => self.strategy.diamond,
            ShapeKind::Squiggle => self.strategy.squiggle,
        }
    }

    /// The outer size of one pip of `shape`.
    pub fn spec(&self, shape: ShapeKind) -> ShapeSpec {
        let (width, height) = match self.pip(shape) {
            PipShape::Capsule => (self.oval.width, self.oval.height),
            PipShape::Rhombus => (self.diamond.width, self.diamond.height),
            PipShape::Rectangle => (self.rectangle.width, self.rectangle.height),
            PipShape::Barbell => (self.squiggle.width(), self.squiggle.height()),
        };

        ShapeSpec {
            kind: shape,
            width,
            height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvalGeometry {
    pub width: f64,
    pub height: f64,
    pub rounding: f64,
}

impl Default for OvalGeometry {
    fn default() -> Self {
        Self {
            width: 142.0,
            height: 58.0,
            rounding: 1.0,
        }
    }
}

/// The diamond is drawn as a rhombus spanning `width` x `height`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiamondGeometry {
    pub width: f64,
    pub height: f64,
}

impl Default for DiamondGeometry {
    fn default() -> Self {
        Self {
            width: 144.0,
            height: 60.0,
        }
    }
}

impl DiamondGeometry {
    pub fn radius(&self) -> f64 {
        self.width / 2.0
    }

    pub fn stretch(&self) -> f64 {
        self.height / self.width
    }
}

/// A rounded rectangle, an alternative drawing of the diamond.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleGeometry {
    pub width: f64,
    pub height: f64,
    pub rounding: f64,
}

impl Default for RectangleGeometry {
    fn default() -> Self {
        Self {
            width: 142.0,
            height: 51.0,
            rounding: 0.2,
        }
    }
}

/// The primitive a pip is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipShape {
    /// A rounded rectangle with the oval geometry.
    Capsule,
    /// A rhombus with the diamond geometry.
    Rhombus,
    /// A rounded rectangle with the rectangle geometry.
    Rectangle,
    /// Two rounded squares joined by a bar, with the squiggle geometry.
    Barbell,
}

impl PipShape {
    /// The shape kind whose border correction applies when drawing this primitive.
    pub fn border_kind(self) -> ShapeKind {
        match self {
            PipShape::Capsule | PipShape::Rectangle => ShapeKind::Oval,
            PipShape::Rhombus => ShapeKind::Diamond,
            PipShape::Barbell => ShapeKind::Squiggle,
        }
    }
}

/// The [`PipShape`] of every shape kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipStrategy {
    pub oval: PipShape,
    pub diamond: PipShape,
    pub squiggle: PipShape,
}

impl Default for PipStrategy {
    fn default() -> Self {
        Self {
            oval: PipShape::Capsule,
            diamond: PipShape::Rhombus,
            squiggle: PipShape::Barbell,
        }
    }
}

/// Outer geometry of a pip, independent of color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub width: f64,
    pub height: f64,
}
