//! Seeded random boards and the parameters that describe them.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::color::Color;
use crate::error::BoardError;
use crate::location::{Coord, Location};
use crate::symbol::{Endpoint, MAX_SYMBOLS};

/// Parameters for [`Board::generate`]. The same parameters always produce the same board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateParams {
    /// Board height.
    pub rows: Coord,
    /// Board width.
    pub cols: Coord,
    /// Symbols to place.
    pub symbols: usize,
    /// Seed for the board's RNG.
    pub seed: u64,
}

impl GenerateParams {
    /// Smallest side [`clamped`](Self::clamped) allows.
    pub const MIN_SIDE: Coord = 4;
    /// Largest side which still leaves cells a usable size in the reference 600 pixel board area.
    pub const MAX_SIDE: Coord = 37;

    /// Pull every parameter into its supported range; at most one symbol per eight cells.
    pub fn clamped(self) -> Self {
        let rows = self.rows.clamp(Self::MIN_SIDE, Self::MAX_SIDE);
        let cols = self.cols.clamp(Self::MIN_SIDE, Self::MAX_SIDE);
        Self {
            rows,
            cols,
            symbols: self.symbols.clamp(1, MAX_SYMBOLS).min(rows * cols / 8),
            seed: self.seed,
        }
    }

    /// The caption of a generated board: one `name: value` line per parameter.
    pub fn caption(&self) -> String {
        format!("rows: {}\ncols: {}\nsymbols: {}\nseed: {}\n", self.rows, self.cols, self.symbols, self.seed)
    }
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            rows: 24,
            cols: 24,
            symbols: 4,
            seed: 0,
        }
    }
}

impl Board {
    /// Generate a random board. Random levels are not guaranteed to be solvable.
    ///
    /// Every cell gets a random non-black color. Each symbol's endpoints land on cells no earlier endpoint took,
    /// and both are painted the symbol's randomly chosen, neither black nor white, color.
    pub fn generate(params: &GenerateParams) -> Result<Self, BoardError> {
        let (rows, cols) = (params.rows, params.cols);
        let cells = rows.checked_mul(cols).ok_or(BoardError::TooLarge { rows, cols })?;
        // two endpoints per symbol, each on its own cell
        if params.symbols > cells / 2 {
            return Err(BoardError::Crowded { symbols: params.symbols, cells });
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut board = Self::init(params.rows, params.cols, params.symbols, params.caption(), |_| {
            *Color::playable().choose(&mut rng).unwrap_or(&Color::White)
        })?;

        for index in 0..board.symbols.len() {
            let ident = board.symbols[index].ident;
            let mut placed = [Location::default(); 2];
            for (which, slot) in [Endpoint::Start, Endpoint::End].into_iter().zip(placed.iter_mut()) {
                let location = loop {
                    let candidate = Location(rng.gen_range(0..params.cols), rng.gen_range(0..params.rows));
                    if !board.node_at(candidate).paths.any() {
                        break candidate;
                    }
                };
                // claim it now so no later endpoint lands here
                let id = board.at(location);
                if let Some(node) = board.arena.get_mut(id) {
                    node.paths.set(ident);
                }
                board.move_endpoint(index, which, location);
                *slot = location;
            }

            let color = *Color::symbol_colors().choose(&mut rng).unwrap_or(&Color::Red);
            for location in placed {
                board.set_color(location, color);
            }
            board.symbols[index].color = color;
        }

        board.update_path();
        Ok(board)
    }
}
