//! A game in progress, driven by discrete player commands.

use std::str::FromStr;

use itertools::Itertools;

use crate::board::Board;
use crate::color::Color;
use crate::connectivity::Connectivity;
use crate::error::CommandError;
use crate::location::Location;
use crate::logging::{LogEvent, LogLevel, Logger};
use crate::symbol::Endpoint;

/// A single player action. Each one maps onto at most one board mutation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Anchor a selection at a cell.
    SelectStart(Location),
    /// Close the selection at a cell and merge it.
    SelectConfirm(Location),
    /// Split the region under a cell.
    SplitAt(Location),
    /// Repaint a single cell.
    SetCellColor(Location, Color),
    /// Choose the brush color used by [`PaintAt`](Command::PaintAt).
    PickColor(Color),
    /// Repaint a single cell with the brush color.
    PaintAt(Location),
    /// Pick up the endpoint under a cell, or drop the one being carried.
    GrabEndpoint(Location),
    /// Follow the pointer; a carried endpoint moves along.
    MoveCursor(Location),
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parse `select x y`, `confirm x y`, `split x y`, `paint x y c`, `color c`, `brush x y`, `grab x y` or `move x y`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words = s.split_whitespace().collect_vec();
        let (&name, args) = words.split_first().ok_or(CommandError::Empty)?;

        let arity = |expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(CommandError::Arity { command: name.to_string(), expected })
            }
        };
        let number = |word: &str| word.parse::<usize>().map_err(|_| CommandError::NotANumber(word.to_string()));
        let color = |word: &str| {
            word.chars()
                .exactly_one()
                .ok()
                .and_then(Color::from_digit)
                .ok_or_else(|| CommandError::BadColor(word.to_string()))
        };
        let location = || -> Result<Location, CommandError> { Ok(Location(number(args[0])?, number(args[1])?)) };

        match name {
            "select" => arity(2).and_then(|_| location()).map(Self::SelectStart),
            "confirm" => arity(2).and_then(|_| location()).map(Self::SelectConfirm),
            "split" => arity(2).and_then(|_| location()).map(Self::SplitAt),
            "brush" => arity(2).and_then(|_| location()).map(Self::PaintAt),
            "grab" => arity(2).and_then(|_| location()).map(Self::GrabEndpoint),
            "move" => arity(2).and_then(|_| location()).map(Self::MoveCursor),
            "paint" => {
                arity(3)?;
                Ok(Self::SetCellColor(location()?, color(args[2])?))
            }
            "color" => {
                arity(1)?;
                Ok(Self::PickColor(color(args[0])?))
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// One game in progress: a board plus the input state driving it.
///
/// Every command that changes the board is followed by exactly one connectivity recomputation.
#[derive(Debug)]
pub struct Session {
    board: Board,
    connectivity: Connectivity,
    anchor: Option<Location>,
    brush: Color,
    carrying: Option<(usize, Endpoint)>,
    won: bool,
    logger: Logger,
}

impl Session {
    /// Start playing `board`, logging through `logger`.
    pub fn new(mut board: Board, logger: Logger) -> Self {
        let connectivity = board.update_path();
        Self {
            won: connectivity.won,
            board,
            connectivity,
            anchor: None,
            brush: Color::Black,
            carrying: None,
            logger,
        }
    }

    /// Replace the board, forgetting all input state and the win.
    pub fn load(&mut self, mut board: Board) {
        self.connectivity = board.update_path();
        self.won = self.connectivity.won;
        self.board = board;
        self.anchor = None;
        self.carrying = None;
        self.logger.info("session", "board loaded");
    }

    /// The board being played.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Connectivity as of the last change to the board.
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Whether the board has been won at any point since it was loaded.
    pub fn won(&self) -> bool {
        self.won
    }

    /// The corner recorded by [`SelectStart`](Command::SelectStart), until the selection is confirmed.
    pub fn anchor(&self) -> Option<Location> {
        self.anchor
    }

    /// Color used by [`PaintAt`](Command::PaintAt).
    pub fn brush(&self) -> Color {
        self.brush
    }

    /// The endpoint picked up by [`GrabEndpoint`](Command::GrabEndpoint), as a symbol index and end.
    pub fn carrying(&self) -> Option<(usize, Endpoint)> {
        self.carrying
    }

    fn clamp(&self, location: Location) -> Location {
        let axis = |v: usize| isize::try_from(v).unwrap_or(isize::MAX);
        self.board.clamp(axis(location.0), axis(location.1))
    }

    /// Carry out `command` and return [`won`](Self::won).
    pub fn apply(&mut self, command: Command) -> bool {
        let changed = match command {
            Command::SelectStart(location) => {
                self.anchor = Some(self.clamp(location));
                false
            }
            Command::SelectConfirm(location) => {
                let location = self.clamp(location);
                let anchor = self.anchor.take().unwrap_or(location);
                let (low, high) = self.board.selection(anchor, location);
                let merged = self.board.combine(low, high);
                self.logger.log_event(
                    LogEvent::new(LogLevel::Debug, "session", if merged { "merged" } else { "merge refused" })
                        .with_field("low", vec![low.0, low.1])
                        .with_field("high", vec![high.0, high.1]),
                );
                merged
            }
            Command::SplitAt(location) => {
                let location = self.clamp(location);
                let split = self.board.split(location);
                if split {
                    self.logger.log_event(
                        LogEvent::new(LogLevel::Debug, "session", "split").with_field("at", vec![location.0, location.1]),
                    );
                }
                split
            }
            Command::SetCellColor(location, color) => {
                let location = self.clamp(location);
                self.board.set_color(location, color)
            }
            Command::PickColor(color) => {
                self.brush = color;
                false
            }
            Command::PaintAt(location) => {
                let location = self.clamp(location);
                self.board.set_color(location, self.brush)
            }
            Command::GrabEndpoint(location) => {
                let location = self.clamp(location);
                self.carrying = match self.carrying {
                    Some(_) => None,
                    None => self.board.endpoint_at(location),
                };
                false
            }
            Command::MoveCursor(location) => {
                let location = self.clamp(location);
                match self.carrying {
                    Some((index, which)) => self.board.move_endpoint(index, which, location),
                    None => false,
                }
            }
        };

        if changed {
            self.refresh();
        }

        self.won
    }

    fn refresh(&mut self) {
        self.connectivity = self.board.update_path();
        if self.connectivity.won && !self.won {
            self.logger.info("session", "won");
        }
        self.won |= self.connectivity.won;
    }
}
