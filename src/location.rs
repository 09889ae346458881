//! Cell coordinates and region dimensions.

use std::ops::{Add, Sub};

use ndarray::Ix;
use serde::{Deserialize, Serialize};

pub(crate) type Coord = usize;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Default, Serialize, Deserialize)]
/// A location `(x, y)` on a board. The top left corner is `Location(0, 0)`.
///
/// Region dimensions are expressed as locations too, so a single cell has dimension `Location(1, 1)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The dimension of a single, unmerged cell.
    pub const UNIT: Self = Self(1, 1);

    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    /// Step by `rhs`. Stepping off the top or left edge wraps to a huge coordinate, which no board contains.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Component-wise minimum and maximum of two corners, i.e. the top-left and bottom-right of the rectangle they span.
    pub fn span(a: Self, b: Self) -> (Self, Self) {
        (Self(a.0.min(b.0), a.1.min(b.1)), Self(a.0.max(b.0), a.1.max(b.1)))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl Add for Location {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Location {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0, self.1 - rhs.1)
    }
}
