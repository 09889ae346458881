//! The board: a region tree behind a per-cell lookup array, with merging and splitting.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;

use crate::cell::{CellNode, NodeArena, NodeId};
use crate::color::Color;
use crate::error::BoardError;
use crate::location::{Coord, Location};
use crate::shape::SquareStep;
use crate::symbol::{Endpoint, Symbol, SymbolID, MAX_SYMBOLS};

/// A board of colored cells, some of which may be merged into larger rectangular regions.
///
/// Every grid location maps, through a lookup array, to the top-level region covering it.
/// Regions are created by [`combine`](Self::combine) and undone by [`split`](Self::split);
/// neither recomputes connectivity, call [`update_path`](Self::update_path) afterwards.
///
/// Boards are usually built with [`generate`](Self::generate) or [`parse_level`](crate::level::parse_level).
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) arena: NodeArena,
    // row major, indexed (y, x)
    pub(crate) lookup: Array2<NodeId>,
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) caption: String,
}

impl Board {
    /// Build a `rows` by `cols` board of unmerged cells colored by `color_at`, with `num_symbols` symbols all placed at `(0, 0)`.
    ///
    /// Symbol identifiers are assigned `0..num_symbols` in order.
    pub fn init(
        rows: Coord,
        cols: Coord,
        num_symbols: usize,
        caption: impl Into<String>,
        mut color_at: impl FnMut(Location) -> Color,
    ) -> Result<Self, BoardError> {
        if num_symbols > MAX_SYMBOLS {
            return Err(BoardError::TooManySymbols { requested: num_symbols });
        }
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyGrid { rows, cols });
        }
        let cells = rows.checked_mul(cols).ok_or(BoardError::TooLarge { rows, cols })?;

        let mut arena = NodeArena::with_capacity(cells);
        let lookup = Array2::from_shape_fn((rows, cols), |ind| {
            let location = Location::from(ind);
            arena.alloc(CellNode::leaf(location, color_at(location)))
        });

        Ok(Self {
            arena,
            lookup,
            symbols: (0..num_symbols)
                .map(|ident| Symbol { ident, ..Default::default() })
                .collect_vec(),
            caption: caption.into(),
        })
    }

    /// Number of rows, i.e. the board height.
    pub fn rows(&self) -> Coord {
        self.lookup.nrows()
    }

    /// Number of columns, i.e. the board width.
    pub fn cols(&self) -> Coord {
        self.lookup.ncols()
    }

    /// Free text shown with the board.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Symbols in identifier order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Whether `location` is a cell of this board.
    pub fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.cols() && location.1 < self.rows()
    }

    /// Map an arbitrary, possibly negative, cell coordinate onto the nearest location on the board.
    pub fn clamp(&self, x: isize, y: isize) -> Location {
        let clamp_axis = |v: isize, len: Coord| v.clamp(0, len as isize - 1) as Coord;
        Location(clamp_axis(x, self.cols()), clamp_axis(y, self.rows()))
    }

    /// The top-level region covering `location`.
    ///
    /// # Panics
    /// If `location` is off the board.
    pub fn at(&self, location: Location) -> NodeId {
        self.lookup[location.as_index()]
    }

    /// [`at`](Self::at) taking separate coordinates.
    pub fn at_xy(&self, x: Coord, y: Coord) -> NodeId {
        self.at(Location(x, y))
    }

    /// Overwrite the lookup entry for `location`. Keeping the lookup consistent with the region tree is up to the caller.
    pub(crate) fn put(&mut self, location: Location, node: NodeId) {
        self.lookup[location.as_index()] = node;
    }

    /// The region behind a handle taken from this board.
    pub fn node(&self, id: NodeId) -> &CellNode {
        &self.arena[id]
    }

    /// The top-level region covering `location`. Panics off the board, like [`at`](Self::at).
    pub fn node_at(&self, location: Location) -> &CellNode {
        self.node(self.at(location))
    }

    /// Every top-level region once, in row-major order of their top-left corners.
    pub fn top_level(&self) -> Vec<NodeId> {
        self.lookup.iter().copied().unique().collect_vec()
    }

    /// Distinct regions touching any of the four sides of region `id`.
    pub fn adjacent(&self, id: NodeId) -> Vec<NodeId> {
        let node = self.node(id);
        SquareStep::VARIANTS.iter()
            .flat_map(|side| side.ring(node.pos, node.opp()))
            // ndarray refuses the wrapped coordinates left of or above the board
            .filter_map(|location| self.lookup.get(location.as_index()).copied())
            .unique()
            .collect_vec()
    }

    /// All locations in the rectangle `low..=high`, row major.
    pub(crate) fn cells(low: Location, high: Location) -> impl Iterator<Item = Location> {
        (low.1..=high.1)
            .cartesian_product(low.0..=high.0)
            .map(|(y, x)| Location(x, y))
    }

    /// Turn two arbitrary corners of a drag into a selection suitable for [`combine`](Self::combine).
    ///
    /// The corners are ordered, then widened so that the regions under them are wholly selected.
    pub fn selection(&self, a: Location, b: Location) -> (Location, Location) {
        let (low, high) = Location::span(a, b);
        (self.node_at(low).pos, self.node_at(high).opp())
    }

    /// Merge every region within `low..=high` into one.
    ///
    /// Refuses, leaving the board untouched, if the selection lies within a single region,
    /// or if it cuts through a region or holds regions of differing sizes.
    pub fn combine(&mut self, low: Location, high: Location) -> bool {
        if !self.in_bounds(low) || !self.in_bounds(high) || low.0 > high.0 || low.1 > high.1 {
            return false;
        }

        let anchor = self.node_at(low);
        if anchor.pos == self.node_at(high).pos {
            return false;
        }

        let dim = anchor.dim;
        let tiles = Self::cells(low, high).all(|location| {
            let node = self.node_at(location);
            let opp = node.opp();
            node.dim == dim && node.pos.0 >= low.0 && node.pos.1 >= low.1 && opp.0 <= high.0 && opp.1 <= high.1
        });
        if !tiles {
            return false;
        }

        let color = self.result_color(low, high);
        let children = Self::cells(low, high).map(|location| self.at(location)).unique().collect_vec();
        let parent = self.arena.alloc(CellNode {
            pos: low,
            dim: high - low + Location::UNIT,
            color,
            paths: Default::default(),
            children,
        });

        for location in Self::cells(low, high) {
            self.put(location, parent);
        }

        true
    }

    /// The color a merge of `low..=high` would take.
    ///
    /// Each location votes with the color of its region. Any black makes the result black.
    /// White counts at most once, so it only wins when no other color is present.
    /// Ties go to the lowest palette index.
    pub fn result_color(&self, low: Location, high: Location) -> Color {
        let mut tally = [0usize; Color::COUNT];
        for location in Self::cells(low, high) {
            match self.node_at(location).color {
                Color::Black => return Color::Black,
                Color::White => tally[Color::White.index()] = 1,
                color => tally[color.index()] += 1,
            }
        }

        Color::VARIANTS.iter()
            .copied()
            .fold(Color::Black, |best, color| if tally[color.index()] > tally[best.index()] { color } else { best })
    }

    /// Undo the merge which produced the region at `location`, reinstating its children.
    ///
    /// Returns `false`, doing nothing, if that region is a single cell.
    pub fn split(&mut self, location: Location) -> bool {
        if !self.in_bounds(location) {
            return false;
        }

        let id = self.at(location);
        if self.node(id).children.is_empty() {
            return false;
        }

        let Some(parent) = self.arena.free(id) else {
            return false;
        };
        for child in parent.children {
            let (pos, opp) = (self.node(child).pos, self.node(child).opp());
            for covered in Self::cells(pos, opp) {
                self.put(covered, child);
            }
        }

        true
    }

    /// Repaint the single cell at `location`. Merged regions are left alone.
    pub fn set_color(&mut self, location: Location, color: Color) -> bool {
        if !self.in_bounds(location) {
            return false;
        }

        let id = self.at(location);
        match self.arena.get_mut(id) {
            Some(node) if node.is_leaf() => {
                node.color = color;
                true
            }
            _ => false,
        }
    }

    /// The first symbol endpoint placed at `location`, as an index into [`symbols`](Self::symbols).
    pub fn endpoint_at(&self, location: Location) -> Option<(usize, Endpoint)> {
        self.symbols.iter().enumerate().find_map(|(index, symbol)| {
            [Endpoint::Start, Endpoint::End]
                .into_iter()
                .find(|which| symbol.endpoint(*which) == location)
                .map(|which| (index, which))
        })
    }

    /// Relocate one endpoint of the symbol at `index`.
    pub fn move_endpoint(&mut self, index: usize, which: Endpoint, location: Location) -> bool {
        if !self.in_bounds(location) {
            return false;
        }

        match self.symbols.get_mut(index) {
            Some(symbol) => {
                *symbol.endpoint_mut(which) = location;
                true
            }
            None => false,
        }
    }

    /// Place a symbol and give it a target color, as level loading and generation do.
    pub(crate) fn place_symbol(&mut self, index: usize, ident: SymbolID, start: Location, end: Location, color: Color) {
        if let Some(symbol) = self.symbols.get_mut(index) {
            *symbol = Symbol { ident, color, start, end };
        }
    }

    /// The color of every cell, walking each region down to its original cells.
    pub fn colors(&self) -> Array2<Color> {
        let mut colors = Array2::from_elem(self.lookup.raw_dim(), Color::default());
        for id in self.top_level() {
            self.node(id).write_colors(&self.arena, &mut colors);
        }
        colors
    }

    fn display_at(&self, location: Location) -> char {
        let color = self.node_at(location).color;
        match self.endpoint_at(location) {
            Some((index, _)) if self.symbols[index].color == color => self.symbols[index].display(),
            // blocked endpoint
            Some(_) => '!',
            None => color.digit(),
        }
    }
}

impl Drop for Board {
    fn drop(&mut self) {
        for id in self.top_level() {
            self.arena.destroy_subtree(id);
        }
        debug_assert_eq!(self.arena.live(), 0, "regions unreachable from the lookup array");
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.rows() * (self.cols() + 1));

        for y in 0..self.rows() {
            for x in 0..self.cols() {
                out.push(self.display_at(Location(x, y)));
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
