// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of fill styles into concrete colors and border widths.

use crate::card::{FillStyle, ShapeKind};
use crate::color::lighten;
use crate::error::{Error, Result};
use peniko::color::{AlphaColor, Srgb};
use serde::{Deserialize, Serialize};

/// How a shape is painted: interior color plus an optional inward border.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillSpec {
    pub fill: AlphaColor<Srgb>,
    /// Border width in output pixels. `0` means no border.
    pub border_thickness: f32,
    /// Ignored when `border_thickness` is `0`.
    pub border_color: AlphaColor<Srgb>,
}

impl FillSpec {
    /// A plain fill without border.
    pub fn solid(fill: AlphaColor<Srgb>) -> Self {
        Self {
            fill,
            border_thickness: 0.0,
            border_color: fill,
        }
    }

    pub fn bordered(
        fill: AlphaColor<Srgb>,
        border_thickness: f32,
        border_color: AlphaColor<Srgb>,
    ) -> Self {
        Self {
            fill,
            border_thickness,
            border_color,
        }
    }

    pub fn has_border(&self) -> bool {
        self.border_thickness > 0.0
    }

    /// The border width in supersampled pixels.
    pub(crate) fn supersampled_border(&self, aa: u32) -> u32 {
        if self.has_border() {
            (self.border_thickness * aa as f32).round() as u32
        } else {
            0
        }
    }
}

/// Multiplier applied to the nominal border thickness of each shape kind.
///
/// Insetting a diamond by the same distance on both axes thins its edges more than it
/// thins a rectangle's, so diamonds get a thicker nominal border to look equally heavy.
/// The squiggle's rounded squares use the nominal width; the bar joining them is edged
/// with rails of `thickness * rail_ratio + rail_extra`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderCorrection {
    pub oval: f32,
    pub diamond: f32,
    pub squiggle: f32,
    pub rail_ratio: f32,
    pub rail_extra: f32,
}

impl Default for BorderCorrection {
    fn default() -> Self {
        Self {
            oval: 1.0,
            diamond: 1.4,
            squiggle: 1.0,
            rail_ratio: 0.5,
            rail_extra: 1.0,
        }
    }
}

impl BorderCorrection {
    pub fn factor(&self, shape: ShapeKind) -> f32 {
        match shape {
            ShapeKind::Oval => self.oval,
            ShapeKind::Diamond => self.diamond,
            ShapeKind::Squiggle => self.squiggle,
        }
    }

    /// The corrected border width of `shape`, rounded to whole pixels.
    pub fn apply(&self, shape: ShapeKind, thickness: f32) -> f32 {
        (thickness * self.factor(shape)).round()
    }

    /// The height of the rails edging the squiggle's connecting bar.
    pub fn rail(&self, thickness: f32) -> f32 {
        if thickness > 0.0 {
            (thickness * self.rail_ratio + self.rail_extra).max(1.0)
        } else {
            0.0
        }
    }
}

/// Border widths and stripe tone shared by the whole card family.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillParams {
    pub hollow_thickness: f32,
    pub stripe_thickness: f32,
    /// How far the striped interior is blended toward white.
    pub stripe_lighten: f32,
    pub correction: BorderCorrection,
}

impl Default for FillParams {
    fn default() -> Self {
        Self {
            hollow_thickness: 10.0,
            stripe_thickness: 8.0,
            stripe_lighten: 0.6,
            correction: BorderCorrection::default(),
        }
    }
}

/// Resolve the paint for a pip of `shape` drawn with `fill_style`.
///
/// | style   | fill                  | border                  |
/// |---------|-----------------------|-------------------------|
/// | hollow  | `background`          | hollow width, `color`   |
/// | striped | `color` lightened     | stripe width, `color`   |
/// | solid   | `color`               | none                    |
pub fn resolve_fill(
    shape: ShapeKind,
    fill_style: FillStyle,
    color: AlphaColor<Srgb>,
    background: AlphaColor<Srgb>,
    params: &FillParams,
) -> Result<FillSpec> {
    let spec = match fill_style {
        FillStyle::Hollow => FillSpec::bordered(
            background,
            params.correction.apply(shape, params.hollow_thickness),
            color,
        ),
        FillStyle::Striped => FillSpec::bordered(
            lighten(color, params.stripe_lighten)?,
            params.correction.apply(shape, params.stripe_thickness),
            color,
        ),
        FillStyle::Solid => FillSpec::solid(color),
    };

    Ok(spec)
}

/// Like [`resolve_fill`], for shape and fill style given by name.
pub fn resolve_named(
    shape: &str,
    fill_style: &str,
    color: AlphaColor<Srgb>,
    background: AlphaColor<Srgb>,
    params: &FillParams,
) -> Result<FillSpec> {
    match (shape.parse::<ShapeKind>(), fill_style.parse::<FillStyle>()) {
        (Ok(shape), Ok(fill_style)) => resolve_fill(shape, fill_style, color, background, params),
        _ => Err(Error::UnsupportedCombination {
            shape: shape.to_string(),
            fill: fill_style.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::color::palette;

    const RED: AlphaColor<Srgb> = AlphaColor::from_rgba8(0x9C, 0x33, 0x27, 0xFF);
    const WHITE: AlphaColor<Srgb> = palette::css::WHITE;

    fn resolve(shape: ShapeKind, style: FillStyle) -> FillSpec {
        resolve_fill(shape, style, RED, WHITE, &FillParams::default()).unwrap()
    }

    #[test]
    fn hollow() {
        let spec = resolve(ShapeKind::Oval, FillStyle::Hollow);
        assert_eq!(spec.fill, WHITE);
        assert_eq!(spec.border_color, RED);
        assert_eq!(spec.border_thickness, 10.0);
    }

    #[test]
    fn striped() {
        let spec = resolve(ShapeKind::Oval, FillStyle::Striped);
        assert_eq!(spec.fill, lighten(RED, 0.6).unwrap());
        assert_eq!(spec.border_color, RED);
        assert_eq!(spec.border_thickness, 8.0);
    }

    #[test]
    fn solid_has_no_border() {
        for shape in ShapeKind::ALL {
            let spec = resolve(shape, FillStyle::Solid);
            assert_eq!(spec.fill, RED);
            assert!(!spec.has_border());
            assert_eq!(spec.supersampled_border(4), 0);
        }
    }

    #[test]
    fn hollow_is_heavier_than_striped() {
        for shape in ShapeKind::ALL {
            assert!(
                resolve(shape, FillStyle::Hollow).border_thickness
                    > resolve(shape, FillStyle::Striped).border_thickness
            );
        }
    }

    #[test]
    fn diamond_correction() {
        assert_eq!(resolve(ShapeKind::Diamond, FillStyle::Hollow).border_thickness, 14.0);
        assert_eq!(resolve(ShapeKind::Diamond, FillStyle::Striped).border_thickness, 11.0);
        assert_eq!(resolve(ShapeKind::Squiggle, FillStyle::Hollow).border_thickness, 10.0);
    }

    #[test]
    fn rails() {
        let correction = BorderCorrection::default();
        assert_eq!(correction.rail(10.0), 6.0);
        assert_eq!(correction.rail(8.0), 5.0);
        assert_eq!(correction.rail(0.0), 0.0);
    }

    #[test]
    fn named() {
        let params = FillParams::default();
        assert!(resolve_named("oval", "stripe", RED, WHITE, &params).is_ok());
        assert_eq!(
            resolve_named("star", "solid", RED, WHITE, &params),
            Err(Error::UnsupportedCombination {
                shape: "star".to_string(),
                fill: "solid".to_string(),
            })
        );
        assert!(matches!(
            resolve_named("oval", "dotted", RED, WHITE, &params),
            Err(Error::UnsupportedCombination { .. })
        ));
    }
}
