//! Error types for board construction, level loading and command parsing.

use thiserror::Error;

use crate::symbol::MAX_SYMBOLS;

/// Reasons a board cannot be constructed.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum BoardError {
    /// More symbols than [`PathFlags`](crate::cell::PathFlags) has bits for.
    #[error("{requested} symbols requested, at most {} are supported", MAX_SYMBOLS)]
    TooManySymbols {
        /// The symbol count asked for.
        requested: usize,
    },
    /// A zero dimension.
    #[error("a board needs at least one row and one column, got {rows}x{cols}")]
    EmptyGrid {
        /// Requested height.
        rows: usize,
        /// Requested width.
        cols: usize,
    },
    /// The cell count does not fit in a `usize`.
    #[error("a {rows}x{cols} board has more cells than can be addressed")]
    TooLarge {
        /// Requested height.
        rows: usize,
        /// Requested width.
        cols: usize,
    },
    /// Too few cells to give every endpoint its own.
    #[error("{symbols} symbols need {} distinct endpoints but the board only has {cells} cells", .symbols.saturating_mul(2))]
    Crowded {
        /// Symbols requested.
        symbols: usize,
        /// Cells available.
        cells: usize,
    },
}

/// Reasons a level description could not be read. Line numbers start at 1.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The file could not be read.
    #[error("could not open level: {0}")]
    Io(#[from] std::io::Error),
    /// The text is empty.
    #[error("level is empty")]
    MissingHeader,
    /// The first line does not start with three usable counts.
    #[error("line 1: expected `rows cols symbols caption`, got `{0}`")]
    BadHeader(String),
    /// A row is missing or has the wrong number of colors.
    #[error("line {line}: expected a row of {cols} colors")]
    MissingRow {
        /// Offending line, or one past the last line when the text ran out.
        line: usize,
        /// Colors expected per row.
        cols: usize,
    },
    /// A row holds something other than a digit 0-7.
    #[error("line {line}: `{found}` is not a color code 0-7")]
    BadColor {
        /// Offending line.
        line: usize,
        /// The character found.
        found: String,
    },
    /// The text ran out before every symbol was listed.
    #[error("line {line}: expected a symbol line")]
    MissingSymbol {
        /// One past the last line.
        line: usize,
    },
    /// A symbol line is not a letter followed by four coordinates.
    #[error("line {line}: expected `Letter startX startY endX endY`, got `{found}`")]
    BadSymbol {
        /// Offending line.
        line: usize,
        /// The whole line.
        found: String,
    },
    /// A symbol letter was used twice or exceeds the declared count.
    #[error("line {line}: symbol `{display}` is repeated or beyond the symbol count")]
    UnknownSymbol {
        /// Offending line.
        line: usize,
        /// The letter found.
        display: char,
    },
    /// An endpoint lies outside the grid.
    #[error("line {line}: endpoint ({x}, {y}) is off the board")]
    OutOfBounds {
        /// Offending line.
        line: usize,
        /// Column given.
        x: usize,
        /// Row given.
        y: usize,
    },
    /// The header describes a board that cannot be built.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Reasons a textual command could not be understood.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum CommandError {
    /// Nothing but whitespace.
    #[error("empty command")]
    Empty,
    /// The first word names no command.
    #[error("unknown command `{0}`")]
    Unknown(String),
    /// Wrong number of arguments.
    #[error("`{command}` expects {expected} arguments")]
    Arity {
        /// The command word.
        command: String,
        /// Arguments it takes.
        expected: usize,
    },
    /// A coordinate is not a non-negative integer.
    #[error("`{0}` is not a number")]
    NotANumber(String),
    /// A color argument is not a digit 0-7.
    #[error("`{0}` is not a color code 0-7")]
    BadColor(String),
}
