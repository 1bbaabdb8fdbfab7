pub use group::*;
pub use moves::*;

mod group;
mod moves;
