//! The eight symmetries of the square board (the dihedral group D4).

use crate::types::{BOARD_SIZE, Move};

const LAST: u8 = BOARD_SIZE as u8 - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symmetry {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    /// Mirror top to bottom.
    FlipRows,
    /// Mirror left to right.
    FlipCols,
    /// Mirror across the main diagonal.
    Transpose,
    /// Mirror across the anti-diagonal.
    AntiTranspose,
}

impl Symmetry {
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::Rotate90,
        Symmetry::Rotate180,
        Symmetry::Rotate270,
        Symmetry::FlipRows,
        Symmetry::FlipCols,
        Symmetry::Transpose,
        Symmetry::AntiTranspose,
    ];

    /// Maps a (row, col) coordinate to its image.
    #[inline]
    pub fn apply(self, row: u8, col: u8) -> (u8, u8) {
        match self {
            Symmetry::Identity => (row, col),
            Symmetry::Rotate90 => (col, LAST - row),
            Symmetry::Rotate180 => (LAST - row, LAST - col),
            Symmetry::Rotate270 => (LAST - col, row),
            Symmetry::FlipRows => (LAST - row, col),
            Symmetry::FlipCols => (row, LAST - col),
            Symmetry::Transpose => (col, row),
            Symmetry::AntiTranspose => (LAST - col, LAST - row),
        }
    }

    pub fn apply_move(self, mv: Move) -> Move {
        let (row, col) = self.apply(mv.row, mv.col);
        Move::new(row, col)
    }
}
