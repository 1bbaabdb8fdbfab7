use crate::*;
pub use random::*;

mod random;

pub trait GridGenerator {
    fn generate(self, size: Coord2) -> Grid;
}

/// Initial fill of a round's board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardSetup {
    /// Every cell drawn uniformly from the non-empty kinds.
    Random { seed: u64 },
    /// Explicit rows of tiles; every cell must be non-empty.
    Layout(Vec<Vec<TileType>>),
}

impl BoardSetup {
    pub fn build(self, size: Coord2) -> Result<Grid> {
        match self {
            Self::Random { seed } => Grid::random(size, seed),
            Self::Layout(rows) => Grid::from_layout(size, &rows),
        }
    }
}
