use super::*;

/// Purely random generation strategy, reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, size: Coord2) -> Grid {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let cells = Array2::from_shape_simple_fn(size.to_nd_index(), || {
            TileType::NON_EMPTY[rng.random_range(0..TileType::NON_EMPTY.len())]
        });
        log::debug!("Generated {}x{} grid from seed {}", size.0, size.1, self.seed);
        Grid::from_cells(cells)
    }
}
