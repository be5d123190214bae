use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PuzzleError;

pub const MAX_SIDE: usize = 6;
pub const MAX_TILES: usize = MAX_SIDE * MAX_SIDE;
pub const DEFAULT_SIDE: usize = 4;

/// Direction the blank travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Fixed expansion order; the search relies on it for reproducible tie-breaks.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Up => "UP",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" | "U" => Ok(Move::Up),
            "DOWN" | "D" => Ok(Move::Down),
            "LEFT" | "L" => Ok(Move::Left),
            "RIGHT" | "R" => Ok(Move::Right),
            _ => Err(PuzzleError::Parse { what: "move", value: s.to_string() }),
        }
    }
}

/// A permutation of `0..side²` laid out row-major, `0` being the blank.
///
/// Tiles live inline in a fixed `[u8; MAX_TILES]` so the whole state is `Copy`
/// and hashes by value; cells past `side²` are always zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    side: u8,
    blank: u8,
    tiles: [u8; MAX_TILES],
}

pub(crate) fn check_side(side: usize) -> Result<(), PuzzleError> {
    if (2..=MAX_SIDE).contains(&side) {
        Ok(())
    } else {
        Err(PuzzleError::InvalidSize { size: side, max: MAX_SIDE })
    }
}

impl PuzzleState {
    /// Validates that `tiles` holds each of `0..side²` exactly once.
    pub fn from_tiles(side: usize, tiles: &[u8]) -> Result<Self, PuzzleError> {
        check_side(side)?;
        let cells = side * side;
        if tiles.len() != cells {
            return Err(PuzzleError::invalid_state(format!(
                "expected {} tiles for side {}, got {}",
                cells,
                side,
                tiles.len()
            )));
        }
        let mut seen = [false; MAX_TILES];
        let mut packed = [0u8; MAX_TILES];
        let mut blank = None;
        for (i, &v) in tiles.iter().enumerate() {
            let vi = v as usize;
            if vi >= cells {
                return Err(PuzzleError::invalid_state(format!("tile {} out of range 0..{}", v, cells)));
            }
            if seen[vi] {
                return Err(PuzzleError::invalid_state(format!("tile {} appears more than once", v)));
            }
            seen[vi] = true;
            packed[i] = v;
            if v == 0 {
                blank = Some(i as u8);
            }
        }
        // A full-length permutation without duplicates always contains 0.
        let blank = blank.ok_or_else(|| PuzzleError::invalid_state("missing blank tile"))?;
        Ok(Self { side: side as u8, blank, tiles: packed })
    }

    /// Canonical solved layout: `1..side²` row-major, blank in the last cell.
    pub fn goal(side: usize) -> Result<Self, PuzzleError> {
        check_side(side)?;
        let cells = side * side;
        let mut tiles = [0u8; MAX_TILES];
        for (i, t) in tiles.iter_mut().enumerate().take(cells - 1) {
            *t = (i + 1) as u8;
        }
        Ok(Self { side: side as u8, blank: (cells - 1) as u8, tiles })
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side as usize
    }

    #[inline]
    pub fn cells(&self) -> usize {
        self.side() * self.side()
    }

    #[inline]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles[..self.cells()]
    }

    #[inline]
    pub fn blank_index(&self) -> usize {
        self.blank as usize
    }

    #[inline]
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.side(), index % self.side())
    }

    /// Slides the blank one cell in `mv`, or `None` when that leaves the grid.
    pub fn apply(&self, mv: Move) -> Option<Self> {
        let side = self.side() as isize;
        let (row, col) = self.position(self.blank_index());
        let (dr, dc) = mv.offset();
        let nr = row as isize + dr;
        let nc = col as isize + dc;
        if nr < 0 || nr >= side || nc < 0 || nc >= side {
            return None;
        }
        let target = (nr * side + nc) as usize;
        let mut next = *self;
        next.tiles.swap(self.blank_index(), target);
        next.blank = target as u8;
        Some(next)
    }

    /// Applies moves in order; fails on the first one that would leave the grid.
    pub fn apply_all<I: IntoIterator<Item = Move>>(&self, moves: I) -> Option<Self> {
        moves.into_iter().try_fold(*self, |s, m| s.apply(m))
    }

    /// Legal successors in `Move::ALL` order: 2 at a corner, 3 on an edge, 4 inside.
    pub fn neighbours(&self) -> impl Iterator<Item = (PuzzleState, Move)> + '_ {
        Move::ALL.into_iter().filter_map(move |m| self.apply(m).map(|s| (s, m)))
    }

    /// Pairs of non-blank tiles appearing in reading order with the larger first.
    pub fn inversions(&self) -> usize {
        let tiles = self.tiles();
        tiles
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(|(i, &v)| tiles[i + 1..].iter().filter(|&&w| w != 0 && w < v).count())
            .sum()
    }
}

impl fmt::Debug for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleState")
            .field("side", &self.side)
            .field("tiles", &self.tiles())
            .finish()
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cells() - 1).to_string().len();
        for row in self.tiles().chunks(self.side()) {
            let line: Vec<String> = row
                .iter()
                .map(|&v| if v == 0 { format!("{:>w$}", ".", w = width) } else { format!("{:>w$}", v, w = width) })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Parses a comma or whitespace separated tile list; the side is inferred
/// from the tile count.
impl FromStr for PuzzleState {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(|t| t.parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|_| PuzzleError::Parse { what: "puzzle state", value: s.to_string() })?;
        let side = (1..=MAX_SIDE).find(|k| k * k == tiles.len()).ok_or_else(|| {
            PuzzleError::invalid_state(format!("{} tiles do not form a square board", tiles.len()))
        })?;
        PuzzleState::from_tiles(side, &tiles)
    }
}
