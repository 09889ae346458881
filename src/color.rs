//! The cell palette.

use serde::{Deserialize, Serialize};
use strum::{FromRepr, VariantArray};

/// Palette index of a cell. [`Black`](Color::Black) blocks paths and [`White`](Color::White) is the neutral filler.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray, FromRepr, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    /// Blocks paths, and turns any merge containing it black.
    Black = 0,
    /// Digit `1`.
    Red,
    /// Digit `2`.
    Orange,
    /// Digit `3`.
    Yellow,
    /// Digit `4`.
    Green,
    /// Digit `5`.
    Indigo,
    /// Digit `6`.
    Magenta,
    /// Neutral filler; it only wins a merge when nothing else is present.
    #[default]
    White,
}

impl Color {
    /// Number of palette entries.
    pub const COUNT: usize = Self::VARIANTS.len();

    /// Colors a generated cell may take: everything but black.
    pub fn playable() -> &'static [Self] {
        &Self::VARIANTS[1..]
    }

    /// Colors a symbol may target: neither black nor white.
    pub fn symbol_colors() -> &'static [Self] {
        &Self::VARIANTS[1..Self::COUNT - 1]
    }

    /// Position in the palette, equal to the level file digit.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_repr)
    }

    /// Parse the single-digit code used by level files.
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::from_index(d as usize))
    }

    /// The level file digit for this color.
    pub fn digit(self) -> char {
        (b'0' + self as u8) as char
    }

    /// Whether this is [`Black`](Self::Black).
    pub fn is_blocked(self) -> bool {
        self == Self::Black
    }

    /// Whether this is [`White`](Self::White).
    pub fn is_neutral(self) -> bool {
        self == Self::White
    }

    /// Fill color for renderers, as `[r, g, b, a]`.
    pub fn rgba(self) -> [u8; 4] {
        match self {
            Self::Black => [24, 24, 24, 0xff],
            Self::Red => [0xd4, 0x19, 0x29, 0xff],
            Self::Orange => [0xe3, 0x62, 0x27, 0xff],
            Self::Yellow => [0xfa, 0xb2, 0x23, 0xff],
            Self::Green => [0x1d, 0x47, 0x2f, 0xff],
            Self::Indigo => [0x40, 0x32, 0x70, 0xff],
            Self::Magenta => [0x8a, 0x1c, 0x5f, 0xff],
            Self::White => [0xd0, 0xd0, 0xd0, 0xd0],
        }
    }
}
