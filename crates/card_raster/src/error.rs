// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the rasterizer and the card composer.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A width, height or radius was zero, negative or not finite.
    #[error("invalid dimensions for {shape}: {width}x{height}")]
    InvalidDimensions {
        shape: &'static str,
        width: f64,
        height: f64,
    },
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),
    #[error("no drawing strategy for shape {shape:?} with fill style {fill:?}")]
    UnsupportedCombination { shape: String, fill: String },
    #[error("unsupported pip count {0}, expected 1, 2 or 3")]
    UnsupportedCount(u32),
    /// The pip spacing moves pips outside of the representable coordinate range.
    #[error("invalid pip spacing {0}")]
    InvalidSpacing(i32),
    #[error("unknown {kind} {value:?}")]
    UnknownAttribute { kind: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
