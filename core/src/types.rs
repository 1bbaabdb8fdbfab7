/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for tile counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// One orthogonal step on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Right,
    Down,
}

impl Direction {
    /// Scan order shared by group search and the move oracle.
    pub const ALL: [Self; 4] = [Self::Up, Self::Left, Self::Right, Self::Down];

    /// Cell one step away from `(row, col)`, or `None` when it falls off a `rows x cols` board.
    pub fn step((row, col): Coord2, (rows, cols): Coord2) -> impl Fn(Self) -> Option<Coord2> {
        move |dir| {
            let target = match dir {
                Self::Up => (row.checked_sub(1)?, col),
                Self::Left => (row, col.checked_sub(1)?),
                Self::Right => (row, col.checked_add(1)?),
                Self::Down => (row.checked_add(1)?, col),
            };
            (target.0 < rows && target.1 < cols).then_some(target)
        }
    }
}

/// In-bounds 4-neighbors of a cell, in [`Direction::ALL`] order.
/// Edge and corner cells yield fewer than four.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    pending: core::array::IntoIter<Direction, 4>,
}

impl Neighbors {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            pending: Direction::ALL.into_iter(),
        }
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let step = Direction::step(self.center, self.bounds);
        self.pending.by_ref().find_map(step)
    }
}
