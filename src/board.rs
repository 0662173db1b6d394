//! Board, mark and move types.
//!
//! A [`Board`] is a plain `Copy` value: every move application in
//! [`rules`](crate::rules) produces a fresh board and never touches its input.
//! Cells are `Option<Mark>`, with `None` meaning empty.

use std::fmt;
use std::str::FromStr;

use crate::constants::{CELLS, N};
use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Mark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "x" | "X" => Ok(Mark::X),
            "o" | "O" => Ok(Mark::O),
            other => Err(Error::InvalidMark(other.to_string())),
        }
    }
}

/// A cell coordinate. Both fields are in `0..N`.
///
/// Text form is a column letter followed by a 1-based row number,
/// so `A1` is the top-left cell and `C3` the bottom-right one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// Create a move, rejecting coordinates that fall off the board.
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row >= N || col >= N {
            return Err(Error::OutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    /// Construct from indices already known to be on the board.
    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn row(self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major cell index in `0..CELLS`.
    #[inline]
    pub fn index(self) -> usize {
        self.row * N + self.col
    }

    pub fn from_index(idx: usize) -> Result<Self> {
        Self::new(idx / N, idx % N)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'A' + self.col as u8) as char;
        write!(f, "{letter}{}", self.row + 1)
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_coord(s)
    }
}

/// Parse a coordinate string.
///
/// Accepts the lettered form (`B2`, case-insensitive) or a numeric
/// `row,col` pair with 0-based indices (`1,1`).
pub fn parse_coord(s: &str) -> Result<Move> {
    let trimmed = s.trim();
    let invalid = || Error::InvalidCoordinate(trimmed.to_string());

    if let Some((row, col)) = trimmed.split_once(',') {
        let row = row.trim().parse::<usize>().map_err(|_| invalid())?;
        let col = col.trim().parse::<usize>().map_err(|_| invalid())?;
        return Move::new(row, col);
    }

    let bytes = trimmed.as_bytes();
    if bytes.len() != 2 {
        return Err(invalid());
    }

    let col = match bytes[0].to_ascii_uppercase() {
        c @ b'A'..=b'C' => (c - b'A') as usize,
        _ => return Err(invalid()),
    };
    let row = match bytes[1] {
        r @ b'1'..=b'3' => (r - b'1') as usize,
        _ => return Err(invalid()),
    };

    Move::new(row, col)
}

/// A 3x3 grid of cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Mark>; N]; N],
}

impl Board {
    /// The empty starting board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit rows. No reachability check is applied;
    /// use [`rules::validate`](crate::rules::validate) for that.
    pub fn from_rows(cells: [[Option<Mark>; N]; N]) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn get(&self, mv: Move) -> Option<Mark> {
        self.cells[mv.row][mv.col]
    }

    #[inline]
    pub fn is_empty_at(&self, mv: Move) -> bool {
        self.get(mv).is_none()
    }

    /// Return a copy of this board with `mark` written at `mv`.
    /// Callers are responsible for checking that the cell is empty.
    pub(crate) fn with_mark(mut self, mv: Move, mark: Mark) -> Self {
        self.cells[mv.row][mv.col] = Some(mark);
        self
    }

    /// All cells in row-major order, paired with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (Move, Option<Mark>)> + '_ {
        (0..N).flat_map(move |row| {
            (0..N).map(move |col| (Move::at(row, col), self.cells[row][col]))
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Compact single-line form, rows separated by `/` (e.g. `XX./OO./...`).
    pub fn to_compact(&self) -> String {
        let mut s = String::with_capacity(CELLS + N - 1);
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                s.push('/');
            }
            for cell in cells {
                s.push(cell_char(*cell));
            }
        }
        s
    }
}

fn cell_char(cell: Option<Mark>) -> char {
    match cell {
        Some(mark) => mark.to_char(),
        None => '.',
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  A B C")?;
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{}", row + 1)?;
            for cell in cells {
                write!(f, " {}", cell_char(*cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parse nine cells in row-major order.
    ///
    /// `X`/`O` (either case) are marks; `.`, `_`, `-` and spaces are empty.
    /// `/`, `|`, `,`, newlines and tabs are separators and are skipped.
    /// Counts and winners are not checked here.
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = [[None; N]; N];
        let mut count = 0;

        for ch in s.trim_matches(|c| c == '\n' || c == '\r').chars() {
            let cell = match ch {
                '/' | '|' | ',' | '\n' | '\r' | '\t' => continue,
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '_' | '-' | ' ' => None,
                other => {
                    return Err(Error::InvalidCellCharacter {
                        character: other,
                        position: count,
                        context: s.to_string(),
                    });
                }
            };
            if count < CELLS {
                cells[count / N][count % N] = cell;
            }
            count += 1;
        }

        if count != CELLS {
            return Err(Error::InvalidBoardLength {
                expected: CELLS,
                got: count,
                context: s.to_string(),
            });
        }

        Ok(Self { cells })
    }
}
