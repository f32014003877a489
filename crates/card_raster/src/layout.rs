// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical placement of pips on a card.

use crate::error::{Error, Result};
use log::warn;
use serde::{Deserialize, Serialize};

/// An integer canvas coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point moved by `(dx, dy)`, saturating at the `i32` range.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// What to do with a pip count outside of `1..=3`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountPolicy {
    /// Silently move the count into range.
    #[default]
    Clamp,
    /// Fail with [`Error::UnsupportedCount`].
    Reject,
}

/// Maps pip counts to vertical offsets from the card center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    spacing: i32,
    policy: CountPolicy,
}

impl Layout {
    pub fn new(spacing: i32, policy: CountPolicy) -> Self {
        Self { spacing, policy }
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// The vertical offsets of `count` pips, top to bottom.
    ///
    /// One pip sits at the center, two at `±d`, three at `-2d, 0, 2d`, where `d` is the
    /// family spacing. Fails with [`Error::InvalidSpacing`] when `2d` does not fit in an
    /// `i32`.
    pub fn offsets_for(&self, count: u32) -> Result<Vec<i32>> {
        let d = self.spacing;
        let count = self.resolve_count(count)?;
        let invalid = || Error::InvalidSpacing(d);

        let offsets = match count {
            1 => vec![0],
            2 => vec![d.checked_neg().ok_or_else(invalid)?, d],
            _ => {
                let d2 = d.checked_mul(2).ok_or_else(invalid)?;
                vec![d2.checked_neg().ok_or_else(invalid)?, 0, d2]
            }
        };

        Ok(offsets)
    }

    /// The centers of `count` pips on a canvas whose center is `center`.
    pub fn centers(&self, center: Point, count: u32) -> Result<Vec<Point>> {
        self.offsets_for(count)?
            .into_iter()
            .map(|dy| -> Result<Point> {
                let y = center.y.checked_add(dy).ok_or(Error::InvalidSpacing(self.spacing))?;
                Ok(Point::new(center.x, y))
            })
            .collect()
    }

    fn resolve_count(&self, count: u32) -> Result<u32> {
        if (1..=3).contains(&count) {
            return Ok(count);
        }

        match self.policy {
            CountPolicy::Clamp => {
                let clamped = count.clamp(1, 3);
                warn!("pip count {count} out of range, clamped to {clamped}");
                Ok(clamped)
            }
            CountPolicy::Reject => Err(Error::UnsupportedCount(count)),
        }
    }
}
