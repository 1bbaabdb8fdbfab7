use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Kind of a board cell. `Empty` marks a cleared cell, every other value is a playable tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Empty,
    T1,
    T2,
    T3,
    T4,
}

impl TileType {
    /// Playable tile kinds, in cycling order.
    pub const NON_EMPTY: [TileType; 4] = [Self::T1, Self::T2, Self::T3, Self::T4];

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Next kind along `T1 -> T2 -> T3 -> T4 -> T1`. `Empty` never gains a kind.
    pub const fn next(self) -> Self {
        use TileType::*;
        match self {
            Empty => Empty,
            T1 => T2,
            T2 => T3,
            T3 => T4,
            T4 => T1,
        }
    }

    pub const fn as_u8(self) -> u8 {
        use TileType::*;
        match self {
            Empty => 0,
            T1 => 1,
            T2 => 2,
            T3 => 3,
            T4 => 4,
        }
    }
}

impl TryFrom<u8> for TileType {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self> {
        use TileType::*;
        Ok(match value {
            0 => Empty,
            1 => T1,
            2 => T2,
            3 => T3,
            4 => T4,
            other => return Err(GameError::UnknownTileValue(other)),
        })
    }
}

impl From<TileType> for u8 {
    fn from(tile: TileType) -> Self {
        tile.as_u8()
    }
}

impl core::fmt::Display for TileType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
