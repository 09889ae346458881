//! Steps between square cells, and the cells bordering a rectangle.

use itertools::Itertools;
use serde::Serialize;
use strum::VariantArray;

use crate::location::Location;

/// The four directions a square cell can be left by.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareStep {
    /// Toward row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Toward column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl SquareStep {
    /// Directions which, stepping from one location to another, increase the row-major index.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    /// The locations directly outside the `self` side of the rectangle spanning `pos` to `opp` inclusive.
    ///
    /// Locations past the top or left edge of a board wrap around and are never in bounds; callers filter them.
    pub fn ring(&self, pos: Location, opp: Location) -> Vec<Location> {
        match self {
            Self::Up => (pos.0..=opp.0).map(|x| self.attempt_from(Location(x, pos.1))).collect_vec(),
            Self::Down => (pos.0..=opp.0).map(|x| self.attempt_from(Location(x, opp.1))).collect_vec(),
            Self::Left => (pos.1..=opp.1).map(|y| self.attempt_from(Location(pos.0, y))).collect_vec(),
            Self::Right => (pos.1..=opp.1).map(|y| self.attempt_from(Location(opp.0, y))).collect_vec(),
        }
    }
}
