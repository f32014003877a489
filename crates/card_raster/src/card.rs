// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card attributes.
//!
//! A card is identified by four independent attributes, each drawn from a closed set of
//! three values. The full family is their Cartesian product: 81 cards.
//!
//! Every attribute value has a name (`"squiggle"`) and a single-letter code (`'Q'`). The
//! letters are unique across all attributes, which is what allows codes like `ROS2` to be
//! parsed regardless of letter order.

use crate::code::Code;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! attribute_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $letter:literal, [$($alias:literal),+]),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All values, in index order.
            pub const ALL: [Self; 3] = [$(Self::$variant),+];

            /// The position of this value in [`Self::ALL`].
            pub fn index(self) -> u8 {
                self as u8
            }

            pub fn from_index(index: u8) -> Option<Self> {
                Self::ALL.get(index as usize).copied()
            }

            /// The single-letter code of this value.
            pub fn letter(self) -> char {
                match self {
                    $(Self::$variant => $letter),+
                }
            }

            pub fn from_letter(letter: char) -> Option<Self> {
                let letter = letter.to_ascii_uppercase();
                Self::ALL.into_iter().find(|v| v.letter() == letter)
            }

            /// The canonical lowercase name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => [$($alias),+][0]),+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                let name = name.to_ascii_lowercase();
                $(
                    if [$($alias),+].contains(&name.as_str()) {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let s = s.trim();
                let mut chars = s.chars();
                let by_letter = match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_letter(c),
                    _ => None,
                };

                by_letter.or_else(|| Self::from_name(s)).ok_or_else(|| Error::UnknownAttribute {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

attribute_enum! {
    /// The pip color. The concrete RGB value comes from the family palette.
    CardColor, "color" {
        Red => 'R', ["red"],
        Purple => 'P', ["purple", "blue"],
        Green => 'G', ["green"],
    }
}

attribute_enum! {
    /// The pip shape.
    ShapeKind, "shape" {
        Oval => 'O', ["oval"],
        Diamond => 'D', ["diamond"],
        Squiggle => 'Q', ["squiggle", "barbell"],
    }
}

attribute_enum! {
    /// How the inside of a pip is painted.
    FillStyle, "fill style" {
        Hollow => 'H', ["hollow", "empty"],
        Striped => 'T', ["striped", "stripe", "stripped"],
        Solid => 'S', ["solid", "filled"],
    }
}

attribute_enum! {
    /// The number of pips.
    Count, "count" {
        One => '1', ["one", "1"],
        Two => '2', ["two", "2"],
        Three => '3', ["three", "3"],
    }
}

impl Count {
    /// The number of pips drawn.
    pub fn value(self) -> u32 {
        self.index() as u32 + 1
    }

    /// Exact conversion; `None` outside of `1..=3`.
    pub fn from_value(value: u32) -> Option<Self> {
        value.checked_sub(1).and_then(|i| Self::from_index(i as u8))
    }
}

/// The sole input identifying one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardAttributes {
    pub color: CardColor,
    pub shape: ShapeKind,
    pub fill: FillStyle,
    pub count: Count,
}

impl CardAttributes {
    pub fn new(count: Count, color: CardColor, shape: ShapeKind, fill: FillStyle) -> Self {
        Self {
            color,
            shape,
            fill,
            count,
        }
    }

    /// Every card of the family, ordered by (color, shape, fill, count) indices.
    pub fn all() -> impl Iterator<Item = CardAttributes> {
        CardColor::ALL.into_iter().flat_map(|color| {
            ShapeKind::ALL.into_iter().flat_map(move |shape| {
                FillStyle::ALL.into_iter().flat_map(move |fill| {
                    Count::ALL
                        .into_iter()
                        .map(move |count| CardAttributes::new(count, color, shape, fill))
                })
            })
        })
    }

    /// The attribute indices in code order: color, shape, fill, count.
    pub fn indices(&self) -> [u8; 4] {
        [
            self.color.index(),
            self.shape.index(),
            self.fill.index(),
            self.count.index(),
        ]
    }

    pub fn from_indices(indices: [u8; 4]) -> Option<Self> {
        Some(Self {
            color: CardColor::from_index(indices[0])?,
            shape: ShapeKind::from_index(indices[1])?,
            fill: FillStyle::from_index(indices[2])?,
            count: Count::from_index(indices[3])?,
        })
    }

    /// The indices as a digit string, e.g. `"0121"`.
    pub fn index_string(&self) -> String {
        self.indices().iter().map(|i| char::from(b'0' + i)).collect()
    }

    pub fn code(&self) -> Code {
        Code::from_attributes(self)
    }

    /// Parse from single letters given in any order, e.g. `"q2gt"`.
    fn from_letters(s: &str) -> Option<Self> {
        let mut color = None;
        let mut shape = None;
        let mut fill = None;
        let mut count = None;

        for c in s.chars() {
            // Letters are unique across attributes, so at most one of these matches.
            if let Some(v) = CardColor::from_letter(c) {
                set_once(&mut color, v)?;
            } else if let Some(v) = ShapeKind::from_letter(c) {
                set_once(&mut shape, v)?;
            } else if let Some(v) = FillStyle::from_letter(c) {
                set_once(&mut fill, v)?;
            } else if let Some(v) = Count::from_letter(c) {
                set_once(&mut count, v)?;
            } else {
                return None;
            }
        }

        Some(Self::new(count?, color?, shape?, fill?))
    }

    /// Parse from names separated by `-` or `:`, in any order, e.g. `"Red-Oval-Solid-Two"`.
    fn from_names(s: &str) -> Option<Self> {
        let mut color = None;
        let mut shape = None;
        let mut fill = None;
        let mut count = None;

        for part in s.split(['-', ':']).filter(|p| !p.is_empty()) {
            if let Ok(v) = part.parse::<CardColor>() {
                set_once(&mut color, v)?;
            } else if let Ok(v) = part.parse::<ShapeKind>() {
                set_once(&mut shape, v)?;
            } else if let Ok(v) = part.parse::<FillStyle>() {
                set_once(&mut fill, v)?;
            } else if let Ok(v) = part.parse::<Count>() {
                set_once(&mut count, v)?;
            } else {
                return None;
            }
        }

        Some(Self::new(count?, color?, shape?, fill?))
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> Option<()> {
    if slot.is_some() {
        return None;
    }
    *slot = Some(value);

    Some(())
}

impl FromStr for CardAttributes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        let parsed = if compact.chars().count() == 4 {
            Self::from_letters(&compact)
        } else {
            None
        };

        parsed
            .or_else(|| Self::from_names(&compact))
            .ok_or_else(|| Error::UnknownAttribute {
                kind: "card",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for CardAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}-{}", self.color, self.shape, self.fill, self.count)
    }
}
