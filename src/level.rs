//! The flat text level format and the level list which orders levels into tiers.
//!
//! A level looks like this, with `rows` lines of `cols` color digits and one line per symbol:
//! ```text
//! 3 3 1 a caption
//! 1 1 1
//! 0 0 1
//! 1 1 1
//! A 0 0 0 2
//! ```

use std::fmt::Write;
use std::path::Path;

use itertools::Itertools;
use serde::Serialize;
use strum::{Display, EnumString, VariantArray};

use crate::board::Board;
use crate::color::Color;
use crate::error::LevelError;
use crate::location::Location;
use crate::symbol::{display_of, ident_of};

/// Parse a level description into a board with connectivity already computed.
pub fn parse_level(text: &str) -> Result<Board, LevelError> {
    // 1-based line numbers for error messages
    let eof = text.lines().count() + 1;
    let mut lines = text.lines().enumerate().map(|(n, line)| (n + 1, line));

    let (_, header) = lines.next().ok_or(LevelError::MissingHeader)?;
    let mut words = header.split_whitespace();
    let mut dimension = || words.next().and_then(|w| w.parse::<usize>().ok());
    let (Some(rows), Some(cols), Some(num_symbols)) = (dimension(), dimension(), dimension()) else {
        return Err(LevelError::BadHeader(header.to_string()));
    };
    let caption = words.join(" ");
    if rows.checked_mul(cols).is_none() {
        return Err(LevelError::BadHeader(header.to_string()));
    }

    // grows with the rows actually present, not the header's claim
    let mut colors = Vec::new();
    for _ in 0..rows {
        let (line, row) = lines.find(|(_, l)| !l.trim().is_empty()).ok_or(LevelError::MissingRow { line: eof, cols })?;
        let row = row.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Color::from_digit(c).ok_or_else(|| LevelError::BadColor { line, found: c.to_string() }))
            .collect::<Result<Vec<Color>, LevelError>>()?;
        if row.len() != cols {
            return Err(LevelError::MissingRow { line, cols });
        }
        colors.extend(row);
    }

    let mut board = Board::init(rows, cols, num_symbols, caption, |l| colors[l.1 * cols + l.0])?;
    let mut seen = Vec::with_capacity(num_symbols);
    for index in 0..num_symbols {
        let (line, entry) = lines.find(|(_, l)| !l.trim().is_empty()).ok_or(LevelError::MissingSymbol { line: eof })?;
        let bad = || LevelError::BadSymbol { line, found: entry.to_string() };

        let mut words = entry.split_whitespace();
        let display = words.next().and_then(|w| w.chars().exactly_one().ok()).ok_or_else(bad)?;
        let coords = words.map(|w| w.parse::<usize>()).collect::<Result<Vec<usize>, _>>().map_err(|_| bad())?;
        let &[sx, sy, ex, ey] = &coords[..] else {
            return Err(bad());
        };

        let ident = ident_of(display)
            .filter(|ident| *ident < num_symbols && !seen.contains(ident))
            .ok_or(LevelError::UnknownSymbol { line, display })?;
        seen.push(ident);

        let (start, end) = (Location(sx, sy), Location(ex, ey));
        for Location(x, y) in [start, end] {
            if !board.in_bounds(Location(x, y)) {
                return Err(LevelError::OutOfBounds { line, x, y });
            }
        }
        let color = board.node_at(start).color();
        board.place_symbol(index, ident, start, end, color);
    }

    board.update_path();
    Ok(board)
}

/// Read and parse the level stored at `path`.
pub fn read_level(path: impl AsRef<Path>) -> Result<Board, LevelError> {
    parse_level(&std::fs::read_to_string(path)?)
}

impl Board {
    /// Serialize the current colors and symbols in the level format.
    ///
    /// Merged regions are written out as the colors of their original cells, and the caption is replaced with a placeholder.
    pub fn to_level_string(&self) -> String {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = writeln!(out, "{} {} {} caption", self.rows(), self.cols(), self.symbols().len());

        for row in self.colors().rows() {
            for color in row {
                out.push(color.digit());
                out.push(' ');
            }
            out.push('\n');
        }

        for symbol in self.symbols() {
            let _ = writeln!(out, "{} {} {} {} {}", display_of(symbol.ident()),
                             symbol.start().0, symbol.start().1, symbol.end().0, symbol.end().1);
        }

        out
    }
}

/// Difficulty tiers of the level list, in play order.
#[derive(Copy, Clone, Debug, Display, EnumString, Eq, Hash, PartialEq, VariantArray, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Introduces merging and splitting.
    Tutorial,
    /// First real puzzles.
    Easy,
    /// Several symbols at once.
    Medium,
    /// Nested merges.
    Hard,
}

impl Tier {
    fn index(self) -> usize {
        self as usize
    }
}

/// Level names grouped by [`Tier`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LevelList {
    tiers: [Vec<String>; 4],
}

impl LevelList {
    /// Parse a level list: a `tutorial:` header line, level names one per line, with `easy:`, `medium:` and `hard:` lines starting each later tier.
    pub fn parse(text: &str) -> Self {
        let mut list = Self::default();
        let mut tier = Tier::Tutorial;

        // the first line is always the tutorial header
        for line in text.lines().skip(1).map(str::trim).filter(|l| !l.is_empty()) {
            match line.strip_suffix(':').and_then(|name| name.parse::<Tier>().ok()) {
                Some(next) => tier = next,
                None => list.tiers[tier.index()].push(line.to_string()),
            }
        }

        list
    }

    /// Read and parse the level list stored at `path`.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }

    /// Names of the levels in `tier`, in play order.
    pub fn levels(&self, tier: Tier) -> &[String] {
        &self.tiers[tier.index()]
    }

    /// The level played after `index` in `tier`: the next in the same tier, otherwise the first of the next non-empty tier.
    pub fn next_after(&self, tier: Tier, index: usize) -> Option<(Tier, usize)> {
        if index + 1 < self.levels(tier).len() {
            return Some((tier, index + 1));
        }

        Tier::VARIANTS.iter()
            .skip(tier.index() + 1)
            .find(|later| !self.levels(**later).is_empty())
            .map(|later| (*later, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = "3 4 2 join the reds
1 1 1 3
0 0 1 3
1 1 1 3
A 0 0 0 2
B 3 0 3 2
";

    #[test]
    fn parse_and_display() {
        let board = parse_level(LEVEL).unwrap();
        assert_eq!(board.caption(), "join the reds");
        assert_eq!(format!("{}", board), "A11B
0013
A11B
");
        assert_eq!(board.symbols()[0].color(), Color::Red);
        assert_eq!(board.symbols()[1].color(), Color::Yellow);
    }

    #[test]
    fn export_uses_placeholder_caption() {
        let board = parse_level(LEVEL).unwrap();
        assert_eq!(board.to_level_string(), "3 4 2 caption
1 1 1 3 \n0 0 1 3 \n1 1 1 3 \nA 0 0 0 2
B 3 0 3 2
");
    }

    #[test]
    fn export_writes_through_merges() {
        let mut board = parse_level(LEVEL).unwrap();
        assert!(board.combine(Location(0, 0), Location(1, 1)));
        let reread = parse_level(&board.to_level_string()).unwrap();
        assert_eq!(reread.colors(), board.colors());
        assert_eq!(reread.symbols(), board.symbols());
    }

    #[test]
    fn rejects_bad_digit() {
        let err = parse_level("1 2 0 x\n1 9\n").unwrap_err();
        assert!(matches!(err, LevelError::BadColor { line: 2, .. }), "{err}");
    }

    #[test]
    fn rejects_short_row() {
        let err = parse_level("2 2 0 x\n1 1\n1\n").unwrap_err();
        assert!(matches!(err, LevelError::MissingRow { line: 3, cols: 2 }), "{err}");
    }

    #[test]
    fn rejects_bad_header() {
        assert!(matches!(parse_level("").unwrap_err(), LevelError::MissingHeader));
        assert!(matches!(parse_level("three 3 1\n").unwrap_err(), LevelError::BadHeader(_)));
    }

    #[test]
    fn rejects_overflowing_header() {
        let err = parse_level("4294967296 4294967296 0 x\n1\n").unwrap_err();
        assert!(matches!(err, LevelError::BadHeader(_)), "{err}");

        // huge but addressable: fails on the first short row without reserving the grid
        let err = parse_level("1000000 1000000 0 x\n1\n").unwrap_err();
        assert!(matches!(err, LevelError::MissingRow { line: 2, cols: 1000000 }), "{err}");
    }

    #[test]
    fn rejects_symbol_problems() {
        let err = parse_level("1 2 1 x\n1 1\nA 0 0 5 0\n").unwrap_err();
        assert!(matches!(err, LevelError::OutOfBounds { line: 3, x: 5, y: 0 }), "{err}");

        let err = parse_level("1 2 1 x\n1 1\nC 0 0 1 0\n").unwrap_err();
        assert!(matches!(err, LevelError::UnknownSymbol { display: 'C', .. }), "{err}");

        let err = parse_level("1 2 1 x\n1 1\nA 0 0 1\n").unwrap_err();
        assert!(matches!(err, LevelError::BadSymbol { line: 3, .. }), "{err}");

        let err = parse_level("1 2 1 x\n1 1\n").unwrap_err();
        assert!(matches!(err, LevelError::MissingSymbol { .. }), "{err}");
    }

    #[test]
    fn too_many_symbols() {
        let err = parse_level("1 1 17 x\n1\n").unwrap_err();
        assert!(matches!(err, LevelError::Board(_)), "{err}");
    }

    #[test]
    fn missing_file() {
        assert!(matches!(read_level("/nonexistent/level").unwrap_err(), LevelError::Io(_)));
    }

    #[test]
    fn level_list_tiers() {
        let list = LevelList::parse("tutorial:\nintro\nmerging\neasy:\nfirst\nmedium:\nhard:\nlast\n");
        assert_eq!(list.levels(Tier::Tutorial), &["intro", "merging"]);
        assert_eq!(list.levels(Tier::Easy), &["first"]);
        assert!(list.levels(Tier::Medium).is_empty());

        assert_eq!(list.next_after(Tier::Tutorial, 0), Some((Tier::Tutorial, 1)));
        assert_eq!(list.next_after(Tier::Tutorial, 1), Some((Tier::Easy, 0)));
        // empty medium tier is skipped
        assert_eq!(list.next_after(Tier::Easy, 0), Some((Tier::Hard, 0)));
        assert_eq!(list.next_after(Tier::Hard, 0), None);
    }

    fn resources() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("resources")
    }

    fn solve(name: &str, merges: &[(Location, Location)]) {
        let mut board = read_level(resources().join(name)).unwrap();
        assert!(!board.update_path().won, "{name} starts solved");
        for (low, high) in merges {
            assert!(board.combine(*low, *high), "{name}: merge {low:?}..{high:?} refused");
        }
        assert!(board.update_path().won, "{name} not solved:\n{board}");
    }

    #[test]
    fn bundled_levels_are_listed() {
        let list = LevelList::read(resources().join("levels")).unwrap();
        assert_eq!(list.levels(Tier::Tutorial), &["first-merge", "checker"]);
        for tier in Tier::VARIANTS {
            for name in list.levels(*tier) {
                assert!(read_level(resources().join(name)).is_ok(), "{name} does not load");
            }
        }
    }

    #[test]
    fn bundled_levels_can_be_won() {
        let quarters = |x: usize| [
            (Location(x, 0), Location(x + 1, 1)),
            (Location(x + 2, 0), Location(x + 3, 1)),
            (Location(x, 2), Location(x + 1, 3)),
            (Location(x + 2, 2), Location(x + 3, 3)),
        ];

        solve("first-merge", &[(Location(0, 0), Location(1, 1))]);
        solve("checker", &quarters(0));
        solve("two-at-once", &[(Location(0, 0), Location(1, 1)), (Location(2, 1), Location(3, 2))]);
        solve("twins", &[quarters(0), quarters(4)].concat());
        solve("nested", &[&quarters(0)[..], &[(Location(0, 0), Location(3, 3))][..]].concat());
    }
}
