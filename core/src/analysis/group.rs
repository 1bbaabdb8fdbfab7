use alloc::collections::VecDeque;
use alloc::vec::Vec;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Connected same-kind region around a seed, together with the differently-kinded cells
/// bordering it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupScan {
    /// Cells sharing the seed's kind, in discovery order. Always starts with the seed.
    pub group: Vec<Coord2>,
    /// Distinct 4-neighbors of the group holding any other kind, `Empty` included.
    pub perimeter: Vec<Coord2>,
}

impl GroupScan {
    pub fn len(&self) -> usize {
        self.group.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty()
    }

    /// Whether clearing this group is a legal move.
    pub fn is_clearable(&self) -> bool {
        self.group.len() > 1
    }

    /// Group sorted row-major, for order-independent comparisons.
    pub fn canonical_group(&self) -> Vec<Coord2> {
        let mut group = self.group.clone();
        group.sort_unstable();
        group
    }

    /// Perimeter sorted row-major.
    pub fn canonical_perimeter(&self) -> Vec<Coord2> {
        let mut perimeter = self.perimeter.clone();
        perimeter.sort_unstable();
        perimeter
    }
}

/// Breadth-first search from `seed` over 4-connected neighbors.
///
/// Neighbors are explored up, left, right, down. Each cell is enqueued at most once, so the
/// search visits every group member a single time. An empty seed is not rejected here; callers
/// filter those out since a group of empty cells has no meaning for play.
pub fn find_group(grid: &Grid, seed: Coord2) -> Result<GroupScan> {
    let seed = grid.validate_coords(seed)?;
    let target = grid[seed];

    let mut group = Vec::from([seed]);
    let mut perimeter = Vec::new();
    let mut in_group: HashSet<_> = HashSet::from([seed]);
    let mut in_perimeter = HashSet::new();
    let mut queue = VecDeque::from([seed]);

    while let Some(node) = queue.pop_front() {
        for pos in grid.iter_neighbors(node) {
            if grid[pos] == target {
                if in_group.insert(pos) {
                    group.push(pos);
                    queue.push_back(pos);
                }
            } else if in_perimeter.insert(pos) {
                perimeter.push(pos);
            }
        }
    }

    log::trace!(
        "Group from {:?}: {} cells, perimeter {} cells",
        seed,
        group.len(),
        perimeter.len()
    );
    Ok(GroupScan { group, perimeter })
}
