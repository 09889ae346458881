//! Lettered start/end pairs placed on a board.

use serde::Serialize;

use crate::color::Color;
use crate::location::Location;

/// Index of a symbol on its board; also its bit in [`PathFlags`](crate::cell::PathFlags).
pub type SymbolID = usize;

/// The most symbols a single board may hold.
pub const MAX_SYMBOLS: usize = 16;

/// A start/end pair which must be joined by a region of its color.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Symbol {
    pub(crate) ident: SymbolID,
    pub(crate) color: Color,
    pub(crate) start: Location,
    pub(crate) end: Location,
}

/// Which end of a [`Symbol`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Where the path begins; its flood decides satisfaction.
    Start,
    /// Where the path must arrive.
    End,
}

impl Symbol {
    /// Identifier, also the index of this symbol's path flag.
    pub fn ident(&self) -> SymbolID {
        self.ident
    }

    /// The color a region must have to carry this symbol's path.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The start cell.
    pub fn start(&self) -> Location {
        self.start
    }

    /// The end cell.
    pub fn end(&self) -> Location {
        self.end
    }

    /// Either endpoint's cell.
    pub fn endpoint(&self, which: Endpoint) -> Location {
        match which {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    pub(crate) fn endpoint_mut(&mut self, which: Endpoint) -> &mut Location {
        match which {
            Endpoint::Start => &mut self.start,
            Endpoint::End => &mut self.end,
        }
    }

    /// The letter this symbol is drawn and saved as.
    pub fn display(&self) -> char {
        display_of(self.ident)
    }
}

pub(crate) fn display_of(ident: SymbolID) -> char {
    (b'A' + ident as u8) as char
}

pub(crate) fn ident_of(display: char) -> Option<SymbolID> {
    display.is_ascii_uppercase().then(|| display as usize - 'A' as usize)
}
