use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size arrangement of tiles, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridCells")]
pub struct Grid {
    cells: Array2<TileType>,
}

/// Unchecked wire form of a [`Grid`]. Cells may be `Empty` since a saved board can be mid-round.
#[derive(Deserialize)]
struct GridCells {
    cells: Array2<TileType>,
}

impl TryFrom<GridCells> for Grid {
    type Error = GameError;

    fn try_from(GridCells { cells }: GridCells) -> Result<Self> {
        let (rows, cols) = cells.dim();
        GameConfig::check_size((side(rows), side(cols)))?;
        Ok(Self { cells })
    }
}

/// Saturates so oversized dimensions still fail the size check.
fn side(len: usize) -> Coord {
    Coord::try_from(len).unwrap_or(Coord::MAX)
}

impl Grid {
    /// Fills every cell uniformly from the non-empty tile kinds.
    pub fn random(size: Coord2, seed: u64) -> Result<Self> {
        GameConfig::check_size(size)?;
        Ok(RandomGridGenerator::new(seed).generate(size))
    }

    /// Builds a grid from an explicit layout, row by row.
    ///
    /// Rejects layouts whose shape differs from `size` and layouts holding any `Empty` cell.
    pub fn from_layout<R: AsRef<[TileType]>>(size: Coord2, layout: &[R]) -> Result<Self> {
        GameConfig::check_size(size)?;
        if layout.len() != usize::from(size.0) {
            return Err(GameError::DimensionMismatch);
        }

        let mut cells = Array2::default(size.to_nd_index());
        for (row, row_tiles) in (0..size.0).zip(layout) {
            let row_tiles = row_tiles.as_ref();
            if row_tiles.len() != usize::from(size.1) {
                return Err(GameError::DimensionMismatch);
            }
            for (col, &tile) in (0..size.1).zip(row_tiles) {
                if tile.is_empty() {
                    return Err(GameError::InvalidTile { row, col });
                }
                cells[(row, col).to_nd_index()] = tile;
            }
        }

        Ok(Self { cells })
    }

    /// Same as [`Grid::from_layout`] but from the numeric encoding `1..=4`.
    pub fn from_raw_rows<R: AsRef<[u8]>>(size: Coord2, layout: &[R]) -> Result<Self> {
        let layout = layout
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&value| TileType::try_from(value))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_layout(size, &layout)
    }

    pub(crate) fn from_cells(cells: Array2<TileType>) -> Self {
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (side(rows), side(cols))
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row: coords.0,
                col: coords.1,
            })
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<TileType> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Overwrites a cell unconditionally.
    pub fn set(&mut self, coords: Coord2, tile: TileType) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.cells[coords.to_nd_index()] = tile;
        Ok(())
    }

    /// Empties every listed cell. Nothing is changed if any coordinate is out of bounds.
    pub fn remove(&mut self, coords: &[Coord2]) -> Result<()> {
        self.validate_all(coords)?;
        for &pos in coords {
            self.cells[pos.to_nd_index()] = TileType::Empty;
        }
        Ok(())
    }

    /// Advances every listed non-empty cell one step along the tile cycle; empty cells stay empty.
    /// Nothing is changed if any coordinate is out of bounds.
    pub fn increment(&mut self, coords: &[Coord2]) -> Result<()> {
        self.validate_all(coords)?;
        for &pos in coords {
            let cell = &mut self.cells[pos.to_nd_index()];
            *cell = cell.next();
        }
        Ok(())
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn non_empty_count(&self) -> CellCount {
        let count = self.cells.iter().filter(|tile| !tile.is_empty()).count();
        CellCount::try_from(count).unwrap_or(CellCount::MAX)
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    fn validate_all(&self, coords: &[Coord2]) -> Result<()> {
        coords
            .iter()
            .try_for_each(|&pos| self.validate_coords(pos).map(|_| ()))
    }
}

impl Index<Coord2> for Grid {
    type Output = TileType;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl core::fmt::Display for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                if col > 0 {
                    f.write_str("\t")?;
                }
                write!(f, "{}", self[(row, col)])?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use TileType::*;

    fn checkerboard() -> Grid {
        Grid::from_layout(
            (4, 4),
            &[
                [T1, T2, T1, T2],
                [T2, T1, T2, T1],
                [T1, T2, T1, T2],
                [T2, T1, T2, T1],
            ],
        )
        .unwrap()
    }

    #[test]
    fn get_and_set_are_bounds_checked() {
        let mut grid = checkerboard();

        assert_eq!(grid.get((1, 1)), Ok(T1));
        assert_eq!(grid.get((4, 0)), Err(GameError::OutOfBounds { row: 4, col: 0 }));

        grid.set((1, 1), T4).unwrap();
        assert_eq!(grid[(1, 1)], T4);
        assert_eq!(
            grid.set((0, 9), T1),
            Err(GameError::OutOfBounds { row: 0, col: 9 })
        );
    }

    #[test]
    fn remove_empties_cells_and_tolerates_empty() {
        let mut grid = checkerboard();

        grid.remove(&[(0, 0), (0, 1)]).unwrap();
        grid.remove(&[(0, 0)]).unwrap();

        assert_eq!(grid[(0, 0)], Empty);
        assert_eq!(grid[(0, 1)], Empty);
        assert_eq!(grid.non_empty_count(), 14);
    }

    #[test]
    fn increment_wraps_and_skips_empty_cells() {
        let mut grid = checkerboard();
        grid.set((0, 0), T4).unwrap();
        grid.set((0, 1), Empty).unwrap();

        grid.increment(&[(0, 0), (0, 1), (0, 2)]).unwrap();

        assert_eq!(grid[(0, 0)], T1);
        assert_eq!(grid[(0, 1)], Empty);
        assert_eq!(grid[(0, 2)], T2);
    }

    #[test]
    fn bulk_operations_are_all_or_nothing() {
        let mut grid = checkerboard();

        assert!(grid.remove(&[(0, 0), (7, 7)]).is_err());
        assert!(grid.increment(&[(1, 1), (7, 7)]).is_err());

        assert_eq!(grid, checkerboard());
    }

    #[test]
    fn layout_rejects_shape_mismatch() {
        let short_rows = Grid::from_layout((4, 4), &[[T1; 4], [T1; 4], [T1; 4]]);
        assert_eq!(short_rows, Err(GameError::DimensionMismatch));

        let ragged = Grid::from_layout(
            (4, 4),
            &[
                alloc::vec![T1; 4],
                alloc::vec![T1; 4],
                alloc::vec![T1; 3],
                alloc::vec![T1; 4],
            ],
        );
        assert_eq!(ragged, Err(GameError::DimensionMismatch));
    }

    #[test]
    fn layout_rejects_empty_cells() {
        let layout = [[T1; 4], [T1, T1, Empty, T1], [T1; 4], [T1; 4]];
        assert_eq!(
            Grid::from_layout((4, 4), &layout),
            Err(GameError::InvalidTile { row: 1, col: 2 })
        );
    }

    #[test]
    fn raw_layout_rejects_unknown_values() {
        let layout = [[1, 2, 3, 4], [1, 2, 3, 4], [1, 2, 9, 4], [1, 2, 3, 4]];
        assert_eq!(
            Grid::from_raw_rows((4, 4), &layout),
            Err(GameError::UnknownTileValue(9))
        );

        let zero = [[1, 2, 3, 4], [0, 2, 3, 4], [1, 2, 3, 4], [1, 2, 3, 4]];
        assert_eq!(
            Grid::from_raw_rows((4, 4), &zero),
            Err(GameError::InvalidTile { row: 1, col: 0 })
        );
    }

    #[test]
    fn random_fill_is_non_empty_and_seeded() {
        let grid = Grid::random((6, 5), 7).unwrap();

        assert_eq!(grid.size(), (6, 5));
        assert_eq!(grid.non_empty_count(), 30);
        assert_eq!(grid, Grid::random((6, 5), 7).unwrap());
    }

    #[test]
    fn size_limits_are_enforced() {
        assert_eq!(
            Grid::random((3, 8), 0),
            Err(GameError::BoardTooSmall { min: MIN_SIDE })
        );
        assert_eq!(
            Grid::random((8, 21), 0),
            Err(GameError::BoardTooLarge { max: MAX_SIDE })
        );
    }

    #[test]
    fn iter_coords_is_row_major() {
        let grid = checkerboard();
        let coords: Vec<_> = grid.iter_coords().take(5).collect();
        assert_eq!(coords, [(0, 0), (0, 1), (0, 2), (0, 3), (1, 0)]);
    }

    #[test]
    fn deserialize_keeps_mid_round_boards() {
        let mut grid = checkerboard();
        grid.remove(&[(2, 2)]).unwrap();

        let json = serde_json::to_value(&grid).unwrap();
        let restored: Grid = serde_json::from_value(json).unwrap();

        assert_eq!(restored, grid);
    }

    #[test]
    fn deserialize_rejects_out_of_range_sizes() {
        let tiny = serde_json::json!({
            "cells": { "v": 1, "dim": [2, 2], "data": ["T1", "T2", "T2", "T1"] }
        });
        let err = serde_json::from_value::<Grid>(tiny).unwrap_err();
        assert!(err.to_string().contains(&GameError::BoardTooSmall { min: MIN_SIDE }.to_string()));

        let wide = serde_json::json!({
            "cells": { "v": 1, "dim": [4, 300], "data": alloc::vec!["T3"; 1200] }
        });
        let err = serde_json::from_value::<Grid>(wide).unwrap_err();
        assert!(err.to_string().contains(&GameError::BoardTooLarge { max: MAX_SIDE }.to_string()));
    }

    #[test]
    fn display_prints_one_line_per_row() {
        let text = checkerboard().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "1\t2\t1\t2");
        assert_eq!(text.lines().count(), 4);
    }
}
