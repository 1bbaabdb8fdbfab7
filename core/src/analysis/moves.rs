use crate::*;

/// Whether any non-empty cell has a 4-neighbor of the same kind.
///
/// Agrees with [`find_group`]: true exactly when some cell's group holds at least two tiles.
pub fn any_legal_move(grid: &Grid) -> bool {
    grid.iter_coords().any(|pos| {
        let tile = grid[pos];
        !tile.is_empty() && grid.iter_neighbors(pos).any(|other| grid[other] == tile)
    })
}

/// Number of clearable groups on the board, each counted once.
pub fn count_legal_moves(grid: &Grid) -> usize {
    let mut seen: hashbrown::HashSet<Coord2> = hashbrown::HashSet::new();
    let mut moves = 0;
    for pos in grid.iter_coords() {
        if grid[pos].is_empty() || seen.contains(&pos) {
            continue;
        }
        let Ok(scan) = find_group(grid, pos) else {
            continue;
        };
        if scan.is_clearable() {
            moves += 1;
        }
        seen.extend(scan.group);
    }
    moves
}
