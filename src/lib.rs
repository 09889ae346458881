#![warn(missing_docs)]

//! # `gerryboxes`
//!
//! The board model behind a merge-and-split color puzzle.
//! A board is a grid of colored cells carrying a handful of lettered symbols, each with a start and an end cell.
//! The player merges rectangles of equally sized regions into larger regions, which take the majority color of what they cover,
//! and splits them apart again. A symbol is satisfied once its start and end are joined through adjacent regions of the symbol's color;
//! the board is won when every symbol is satisfied.
//!
//! Begin with a [`Board`], either read from the flat level format with [`parse_level`](level::parse_level)
//! or generated from a seed with [`Board::generate`]. Drive it directly through [`combine`](Board::combine),
//! [`split`](Board::split) and [`update_path`](Board::update_path), or hand it to a [`Session`] which maps player [`Command`]s onto it.
//! Renderers take a [`BoardView`](view::BoardView) snapshot.
//!
//! # Internals
//! Regions form a tree. Leaves are the original cells; a merge allocates a parent owning the regions it covers, and a split frees
//! that parent again. Nodes live in an arena and are addressed by [`NodeId`](cell::NodeId). A lookup array, one entry per cell,
//! names the top-level region covering that cell, and is the only way regions are found by position.
//!
//! Connectivity is recomputed from scratch: top-level regions become vertices of a graph, joined wherever two adjacent regions share
//! a color, and each symbol floods its path flag outward from its endpoints.

pub use board::Board;
pub use color::Color;
pub use connectivity::Connectivity;
pub use error::{BoardError, CommandError, LevelError};
pub use location::Location;
pub use session::{Command, Session};

pub(crate) mod board;
mod tests;
pub mod cell;
pub mod color;
pub mod connectivity;
pub mod error;
pub mod generate;
pub mod level;
pub(crate) mod location;
pub mod logging;
pub mod session;
pub mod shape;
pub mod symbol;
pub mod view;
#[cfg(feature = "wasm")]
pub mod wasm;
