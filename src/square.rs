//! Board squares and coordinate conversion.
//!
//! A [`Square`] is an index `0..=63`, bijective with a `(file, rank)`
//! coordinate pair (file 0..=7 is `a`..`h`, rank 0..=7 is `1`..`8`) and with
//! a two-character algebraic string (`"a1"`..`"h8"`). All three
//! representations convert losslessly into one another; none of the
//! conversions consult board state.

use std::fmt;

use crate::errors::ChessError;

/// One of the 64 squares of the board, stored as `file + 8 * rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 64;

    /// Builds a square from zero-based file and rank indices.
    ///
    /// # Returns
    /// * `Some(Square)` if both indices are within `0..=7`.
    /// * `None` otherwise.
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<Self> {
        if file > 7 || rank > 7 {
            None
        } else {
            Some(Square(file + 8 * rank))
        }
    }

    /// Builds a square from a raw index `0..=63`.
    pub const fn from_index(index: u8) -> Option<Self> {
        if index > 63 {
            None
        } else {
            Some(Square(index))
        }
    }

    /// Parses a two-character algebraic position such as `"e4"`.
    ///
    /// # Returns
    /// * `Ok(Square)` on success.
    /// * `Err(ChessError::InvalidPosition)` for any other input, including
    ///   extra characters, wrong case, or out-of-range file/rank.
    pub fn from_algebraic(text: &str) -> Result<Self, ChessError> {
        let invalid = || ChessError::InvalidPosition(text.to_string());
        let mut chars = text.chars();
        let file_char = chars.next().ok_or_else(invalid)?;
        let rank_char = chars.next().ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }
        let file = match file_char {
            'a'..='h' => file_char as u8 - b'a',
            _ => return Err(invalid()),
        };
        let rank = match rank_char {
            '1'..='8' => rank_char as u8 - b'1',
            _ => return Err(invalid()),
        };
        Ok(Square(file + 8 * rank))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based file, `0` for the `a`-file.
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Zero-based rank, `0` for rank `1`.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// The algebraic position string, `"a1"`..`"h8"`.
    pub fn algebraic(self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        format!("{}{}", file, rank)
    }

    /// Moves this square by a file and rank offset.
    ///
    /// # Returns
    /// * `Some(Square)` if the result stays on the board.
    /// * `None` if the offset walks off an edge.
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        let file = self.file() as i8 + d_file;
        let rank = self.rank() as i8 + d_rank;
        if (file < 0) | (file > 7) | (rank < 0) | (rank > 7) {
            None
        } else {
            Some(Square((file + 8 * rank) as u8))
        }
    }

    /// Iterates over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.algebraic())
    }
}
