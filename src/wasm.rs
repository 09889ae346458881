//! Browser bindings. A host canvas forwards pointer positions in cell units and repaints from [`WebSession::view_json`] or [`WebSession::rgba`].

use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::color::Color;
use crate::generate::GenerateParams;
use crate::level::parse_level;
use crate::location::Location;
use crate::logging::Logger;
use crate::session::{Command, Session};
use crate::view::BoardView;

/// A [`Session`] exported to JavaScript.
#[wasm_bindgen]
pub struct WebSession {
    inner: Session,
}

impl WebSession {
    fn cell(&self, x: i32, y: i32) -> Location {
        self.inner.board().clamp(x as isize, y as isize)
    }
}

#[wasm_bindgen]
impl WebSession {
    /// Start on a freshly generated board. Out of range parameters are clamped.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, cols: usize, symbols: usize, seed: u32) -> Result<WebSession, JsError> {
        let params = GenerateParams { rows, cols, symbols, seed: u64::from(seed) }.clamped();
        let board = Board::generate(&params).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { inner: Session::new(board, Logger::disabled()) })
    }

    /// Start on a board read from level text.
    pub fn from_level(text: &str) -> Result<WebSession, JsError> {
        let board = parse_level(text).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { inner: Session::new(board, Logger::disabled()) })
    }

    /// Board height.
    pub fn rows(&self) -> usize {
        self.inner.board().rows()
    }

    /// Board width.
    pub fn cols(&self) -> usize {
        self.inner.board().cols()
    }

    /// The level's caption.
    pub fn caption(&self) -> String {
        self.inner.board().caption().to_string()
    }

    /// Pointer pressed over cell `(x, y)`.
    pub fn select(&mut self, x: i32, y: i32) -> bool {
        let location = self.cell(x, y);
        self.inner.apply(Command::SelectStart(location))
    }

    /// Pointer released over cell `(x, y)`.
    pub fn confirm(&mut self, x: i32, y: i32) -> bool {
        let location = self.cell(x, y);
        self.inner.apply(Command::SelectConfirm(location))
    }

    /// Split the region under cell `(x, y)`.
    pub fn split(&mut self, x: i32, y: i32) -> bool {
        let location = self.cell(x, y);
        self.inner.apply(Command::SplitAt(location))
    }

    /// Repaint one cell with palette index `color`; indices past the palette are ignored.
    pub fn paint(&mut self, x: i32, y: i32, color: u8) -> bool {
        let location = self.cell(x, y);
        match Color::from_index(usize::from(color)) {
            Some(color) => self.inner.apply(Command::SetCellColor(location, color)),
            None => self.inner.won(),
        }
    }

    /// Pick up the endpoint on cell `(x, y)`, or drop the one being carried.
    pub fn grab(&mut self, x: i32, y: i32) -> bool {
        let location = self.cell(x, y);
        self.inner.apply(Command::GrabEndpoint(location))
    }

    /// Pointer moved over cell `(x, y)`; drags a carried endpoint.
    pub fn hover(&mut self, x: i32, y: i32) -> bool {
        let location = self.cell(x, y);
        self.inner.apply(Command::MoveCursor(location))
    }

    /// Whether the level has been won.
    pub fn won(&self) -> bool {
        self.inner.won()
    }

    /// The level text for the current board.
    pub fn export(&self) -> String {
        self.inner.board().to_level_string()
    }

    /// A [`BoardView`] as JSON.
    pub fn view_json(&self) -> String {
        serde_json::to_string(&BoardView::capture(self.inner.board(), self.inner.connectivity())).unwrap_or_default()
    }

    /// RGBA bytes, row major, of the region covering each cell.
    pub fn rgba(&self) -> Uint8Array {
        let board = self.inner.board();
        let mut bytes = Vec::with_capacity(board.rows() * board.cols() * 4);
        for y in 0..board.rows() {
            for x in 0..board.cols() {
                bytes.extend_from_slice(&board.node_at(Location(x, y)).color().rgba());
            }
        }
        Uint8Array::from(bytes.as_slice())
    }
}
