// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color helpers used to derive the striped fill tone.

use crate::error::{Error, Result};
use peniko::color::{parse_color, AlphaColor, Srgb};

/// Blend `color` toward white.
///
/// Each color channel moves linearly toward its maximum by `amount`, so `0.0` returns
/// the input unchanged and `1.0` returns white. Alpha is preserved. `amount` is clamped
/// into `[0, 1]`; a NaN amount is treated as `0`.
pub fn lighten(color: AlphaColor<Srgb>, amount: f32) -> Result<AlphaColor<Srgb>> {
    validate(&color)?;

    let amount = if amount.is_nan() {
        0.0
    } else {
        amount.clamp(0.0, 1.0)
    };

    let [r, g, b, a] = color.components;
    let towards_white = |c: f32| c.mul_add(1.0 - amount, amount);

    Ok(AlphaColor::new([
        towards_white(r),
        towards_white(g),
        towards_white(b),
        a,
    ]))
}

/// Same as [`lighten`], but on `#RRGGBB` strings.
pub fn lighten_hex(color: &str, amount: f32) -> Result<String> {
    let parsed = parse_hex(color)?;

    Ok(to_hex(lighten(parsed, amount)?))
}

/// Parse a CSS color string, usually of the form `#RRGGBB`.
pub fn parse_hex(color: &str) -> Result<AlphaColor<Srgb>> {
    let trimmed = color.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidColorFormat(color.to_string()));
    }

    parse_color(trimmed)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| Error::InvalidColorFormat(color.to_string()))
        .and_then(|c| validate(&c).map(|_| c))
}

/// Format the color channels as `#RRGGBB`, dropping alpha.
pub fn to_hex(color: AlphaColor<Srgb>) -> String {
    let rgba = color.to_rgba8();

    format!("#{:02X}{:02X}{:02X}", rgba.r, rgba.g, rgba.b)
}

/// Check that every component is finite and inside `[0, 1]`.
pub fn validate(color: &AlphaColor<Srgb>) -> Result<()> {
    if color
        .components
        .iter()
        .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    {
        Ok(())
    } else {
        Err(Error::InvalidColorFormat(format!("{:?}", color.components)))
    }
}
