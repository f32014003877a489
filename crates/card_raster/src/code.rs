// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card codes.
//!
//! A code is the four attribute letters in the fixed order color, shape, fill, count,
//! e.g. `RDT2` for two striped red diamonds. Codes are used to name rendered artifacts.

use crate::card::{CardAttributes, CardColor, Count, FillStyle, ShapeKind};
use std::fmt;

/// Map a digit string of attribute indices (color, shape, fill, count) to its code.
///
/// `"0121"` becomes `"RDS2"`. Anything that is not exactly four digits in `0..=2` is
/// returned unchanged, since it is either already a code or not a card at all.
pub fn normalize(indices: &str) -> String {
    match parse_indices(indices).and_then(CardAttributes::from_indices) {
        Some(card) => Code::from_attributes(&card).0,
        None => indices.to_string(),
    }
}

fn parse_indices(indices: &str) -> Option<[u8; 4]> {
    let bytes = indices.as_bytes();
    if bytes.len() != 4 {
        return None;
    }

    let mut out = [0; 4];
    for (o, b) in out.iter_mut().zip(bytes) {
        *o = match b {
            b'0'..=b'2' => b - b'0',
            _ => return None,
        };
    }

    Some(out)
}

/// The canonical identifier of one card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(String);

impl Code {
    pub fn from_attributes(card: &CardAttributes) -> Self {
        Self(
            [
                card.color.letter(),
                card.shape.letter(),
                card.fill.letter(),
                card.count.letter(),
            ]
            .into_iter()
            .collect(),
        )
    }

    /// Decode a positional code back into attribute indices (color, shape, fill, count).
    pub fn decode(code: &str) -> Option<[u8; 4]> {
        let mut chars = code.chars();
        let color = CardColor::from_letter(chars.next()?)?;
        let shape = ShapeKind::from_letter(chars.next()?)?;
        let fill = FillStyle::from_letter(chars.next()?)?;
        let count = Count::from_letter(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }

        Some([color.index(), shape.index(), fill.index(), count.index()])
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
