use crate::board::Board;

/// Pure perft node count.
/// Counts all move sequences of exactly `depth` plies from the current position.
/// Passes are folded into `perform_move`, so a finished game contributes nothing.
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0u64;
    for mv in board.possible_moves() {
        let mut next = board.clone();
        next.perform_move(mv);
        nodes += perft(&next, depth - 1);
    }
    nodes
}
