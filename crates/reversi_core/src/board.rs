use crate::error::BoardError;
use crate::symmetry::Symmetry;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    side_to_move: Color,
    moves_played: Vec<Move>,
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    pub fn startpos() -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = Cell::Black;
        cells[4][4] = Cell::Black;
        cells[3][4] = Cell::White;
        cells[4][3] = Cell::White;
        Board {
            cells,
            side_to_move: Color::Black,
            moves_played: Vec::new(),
        }
    }

    /// Builds a board from eight rows of text, used by tests and tooling.
    ///
    /// `X`/`B` mark black discs, `O`/`W` white discs and `.`/`-` empty cells.
    /// Whitespace inside a row is ignored. The move history starts empty.
    pub fn from_rows(rows: &[&str], side_to_move: Color) -> Result<Self, BoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::Parse(format!(
                "expected {} rows, got {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, text) in rows.iter().enumerate() {
            let symbols: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return Err(BoardError::Parse(format!(
                    "row {} has {} cells",
                    row,
                    symbols.len()
                )));
            }
            for (col, ch) in symbols.into_iter().enumerate() {
                cells[row][col] = match ch {
                    'X' | 'B' | 'x' | 'b' => Cell::Black,
                    'O' | 'W' | 'o' | 'w' => Cell::White,
                    '.' | '-' => Cell::Empty,
                    other => {
                        return Err(BoardError::Parse(format!(
                            "invalid cell '{}' at ({}, {})",
                            other, row, col
                        )));
                    }
                };
            }
        }

        Ok(Board {
            cells,
            side_to_move,
            moves_played: Vec::new(),
        })
    }

    /// Replays `moves` from the starting position, rejecting illegal ones.
    pub fn from_moves(moves: &[Move]) -> Result<Self, BoardError> {
        let mut board = Board::startpos();
        for &mv in moves {
            board.play(mv)?;
        }
        Ok(board)
    }

    #[inline]
    pub fn cell(&self, row: u8, col: u8) -> Cell {
        self.cells[row as usize][col as usize]
    }

    pub fn set_cell(&mut self, row: u8, col: u8, cell: Cell) {
        self.cells[row as usize][col as usize] = cell;
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn moves_played(&self) -> &[Move] {
        &self.moves_played
    }

    pub fn count(&self, color: Color) -> u32 {
        let target = color.to_cell();
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == target)
            .count() as u32
    }

    pub fn empties(&self) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Empty)
            .count() as u32
    }

    /// Number of discs `color` would flip in one direction by playing at (row, col).
    fn flips_in_direction(&self, color: Color, row: u8, col: u8, dr: i8, dc: i8) -> u8 {
        let own = color.to_cell();
        let opponent = color.other().to_cell();

        let mut r = row as i8 + dr;
        let mut c = col as i8 + dc;
        let mut count = 0u8;
        while on_board(r, c) {
            match self.cells[r as usize][c as usize] {
                cell if cell == opponent => count += 1,
                cell if cell == own => return count,
                _ => return 0,
            }
            r += dr;
            c += dc;
        }
        0
    }

    pub fn is_legal_for(&self, color: Color, mv: Move) -> bool {
        if mv.row as usize >= BOARD_SIZE || mv.col as usize >= BOARD_SIZE {
            return false;
        }
        if self.cell(mv.row, mv.col) != Cell::Empty {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.flips_in_direction(color, mv.row, mv.col, dr, dc) > 0)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.is_legal_for(self.side_to_move, mv)
    }

    /// Appends the legal moves of `color` in row-major order.
    pub fn legal_moves_for_into(&self, color: Color, out: &mut Vec<Move>) {
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let mv = Move::new(row, col);
                if self.is_legal_for(color, mv) {
                    out.push(mv);
                }
            }
        }
    }

    pub fn has_moves(&self, color: Color) -> bool {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Move::new(row, col)))
            .any(|mv| self.is_legal_for(color, mv))
    }

    /// Legal moves for the side to move, in row-major order.
    pub fn possible_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(32);
        self.legal_moves_for_into(self.side_to_move, &mut moves);
        moves
    }

    /// Places a disc for the side to move and flips the captured lines.
    ///
    /// The move is assumed legal. Afterwards the turn passes to the opponent,
    /// unless the opponent has no reply and the mover does, in which case the
    /// mover plays again.
    pub fn perform_move(&mut self, mv: Move) {
        let mover = self.side_to_move;
        let own = mover.to_cell();

        for (dr, dc) in DIRECTIONS {
            let n = self.flips_in_direction(mover, mv.row, mv.col, dr, dc);
            let (mut r, mut c) = (mv.row as i8, mv.col as i8);
            for _ in 0..n {
                r += dr;
                c += dc;
                self.cells[r as usize][c as usize] = own;
            }
        }
        self.cells[mv.row as usize][mv.col as usize] = own;
        self.moves_played.push(mv);

        let opponent = mover.other();
        self.side_to_move = if self.has_moves(opponent) || !self.has_moves(mover) {
            opponent
        } else {
            mover
        };
    }

    /// Validating variant of [`Board::perform_move`] for harness use.
    pub fn play(&mut self, mv: Move) -> Result<(), BoardError> {
        if !self.is_legal(mv) {
            return Err(BoardError::IllegalMove(mv));
        }
        self.perform_move(mv);
        Ok(())
    }

    pub fn is_game_over(&self) -> bool {
        !self.has_moves(Color::Black) && !self.has_moves(Color::White)
    }

    /// Winner by disc count once the game is over (None for a draw or a game in progress).
    pub fn winner(&self) -> Option<Color> {
        if !self.is_game_over() {
            return None;
        }
        let black = self.count(Color::Black);
        let white = self.count(Color::White);
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Board mapped through one of the eight square symmetries.
    pub fn transformed(&self, sym: Symmetry) -> Board {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let (r, c) = sym.apply(row, col);
                cells[r as usize][c as usize] = self.cell(row, col);
            }
        }
        Board {
            cells,
            side_to_move: self.side_to_move,
            moves_played: self.moves_played.iter().map(|&mv| sym.apply_move(mv)).collect(),
        }
    }

    /// Same position with every disc and the side to move switched to the other colour.
    pub fn with_colors_swapped(&self) -> Board {
        let mut cells = self.cells;
        for cell in cells.iter_mut().flatten() {
            *cell = cell.swapped();
        }
        Board {
            cells,
            side_to_move: self.side_to_move.other(),
            moves_played: self.moves_played.clone(),
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
