use thiserror::Error;

use crate::types::Move;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("illegal move {0}")]
    IllegalMove(Move),
    #[error("invalid board: {0}")]
    Parse(String),
}
