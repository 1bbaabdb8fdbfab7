use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates ({row}, {col}) are outside the board")]
    OutOfBounds { row: Coord, col: Coord },
    #[error("Board shape does not match declared size")]
    DimensionMismatch,
    #[error("Board position ({row}, {col}) must hold a non-empty tile")]
    InvalidTile { row: Coord, col: Coord },
    #[error("Unknown tile value {0}")]
    UnknownTileValue(u8),
    #[error("Board must be at least {min} cells on each side")]
    BoardTooSmall { min: Coord },
    #[error("Board must be at most {max} cells on each side")]
    BoardTooLarge { max: Coord },
    #[error("Round time must be positive and within the timer range")]
    InvalidTime,
}

pub type Result<T> = core::result::Result<T, GameError>;
