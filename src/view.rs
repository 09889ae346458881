//! Render-ready snapshots of a board.

use itertools::Itertools;
use serde::Serialize;

use crate::board::Board;
use crate::cell::PathFlags;
use crate::color::Color;
use crate::connectivity::Connectivity;
use crate::location::Location;
use crate::shape::SquareStep;
use crate::symbol::SymbolID;

/// One top-level region as a renderer needs it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RegionView {
    /// Top-left cell.
    pub pos: Location,
    /// Width and height in cells.
    pub dim: Location,
    /// Fill color.
    pub color: Color,
    /// Symbols whose paths reach this region.
    pub paths: PathFlags,
    /// Reached by any symbol; drawn with a dark border.
    pub connected: bool,
}

/// A cell edge between two different regions of the same color, drawn as a connector.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SeamView {
    /// The cell on the top or left side of the edge.
    pub from: Location,
    /// Always [`Right`](SquareStep::Right) or [`Down`](SquareStep::Down).
    pub direction: SquareStep,
    /// Shared color of both sides.
    pub color: Color,
}

/// A symbol and its current state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SymbolView {
    /// Index of the symbol's path flag.
    pub ident: SymbolID,
    /// Letter drawn on both endpoints.
    pub display: char,
    /// The symbol's color.
    pub color: Color,
    /// Start cell.
    pub start: Location,
    /// End cell.
    pub end: Location,
    /// The endpoint's cell is not the symbol's color; drawn as `!`.
    pub start_blocked: bool,
    /// As `start_blocked`, for the end.
    pub end_blocked: bool,
    /// Start and end are joined.
    pub satisfied: bool,
}

/// Everything needed to draw a board, detached from it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BoardView {
    /// Board height.
    pub rows: usize,
    /// Board width.
    pub cols: usize,
    /// Top-level regions in reading order of their top-left cells.
    pub regions: Vec<RegionView>,
    /// Same-color connectors.
    pub seams: Vec<SeamView>,
    /// One entry per symbol.
    pub symbols: Vec<SymbolView>,
    /// Every symbol is satisfied.
    pub won: bool,
}

impl BoardView {
    /// Snapshot `board` as of `connectivity`, which should come from its latest [`update_path`](Board::update_path).
    pub fn capture(board: &Board, connectivity: &Connectivity) -> Self {
        let regions = board.top_level()
            .into_iter()
            .map(|id| {
                let node = board.node(id);
                RegionView {
                    pos: node.pos(),
                    dim: node.dim(),
                    color: node.color(),
                    paths: node.paths(),
                    connected: node.paths().any(),
                }
            })
            .collect_vec();

        let seams = Board::cells(Location(0, 0), Location(board.cols() - 1, board.rows() - 1))
            .cartesian_product(SquareStep::FORWARD_VARIANTS)
            .filter_map(|(from, direction)| {
                let to = direction.attempt_from(from);
                if !board.in_bounds(to) || board.at(from) == board.at(to) {
                    return None;
                }
                let color = board.node_at(from).color();
                (color == board.node_at(to).color()).then_some(SeamView { from, direction: *direction, color })
            })
            .collect_vec();

        let symbols = board.symbols()
            .iter()
            .enumerate()
            .map(|(index, symbol)| SymbolView {
                ident: symbol.ident(),
                display: symbol.display(),
                color: symbol.color(),
                start: symbol.start(),
                end: symbol.end(),
                start_blocked: board.node_at(symbol.start()).color() != symbol.color(),
                end_blocked: board.node_at(symbol.end()).color() != symbol.color(),
                satisfied: connectivity.satisfied.get(index).copied().unwrap_or(false),
            })
            .collect_vec();

        Self {
            rows: board.rows(),
            cols: board.cols(),
            regions,
            seams,
            symbols,
            won: connectivity.won,
        }
    }
}
