#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use round::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod engine;
mod error;
mod generator;
mod grid;
mod round;
mod tile;
mod types;

/// Smallest playable board side.
pub const MIN_SIDE: Coord = 4;

/// Largest board side offered by the menu.
pub const MAX_SIDE: Coord = 20;

/// Longest timer the menu accepts, in seconds (99:59).
pub const MAX_TOTAL_TIME: f64 = 99.0 * 60.0 + 59.0;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board size as `(rows, cols)`.
    pub size: Coord2,
    /// Round length in seconds.
    pub total_time: f64,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, total_time: f64) -> Self {
        Self { size, total_time }
    }

    pub fn new(size: Coord2, total_time: f64) -> Result<Self> {
        let config = Self::new_unchecked(size, total_time);
        config.validate()?;
        Ok(config)
    }

    /// Checks a config built by hand or through [`GameConfig::new_unchecked`].
    pub fn validate(&self) -> Result<()> {
        Self::check_size(self.size)?;
        let time = self.total_time;
        if !time.is_finite() || time <= 0.0 || time > MAX_TOTAL_TIME {
            return Err(GameError::InvalidTime);
        }
        Ok(())
    }

    /// Timer given the way the menu asks for it: minutes `0..=99`, seconds `0..=59`.
    pub fn from_minutes_seconds(size: Coord2, minutes: u8, seconds: u8) -> Result<Self> {
        if minutes > 99 || seconds > 59 {
            return Err(GameError::InvalidTime);
        }
        Self::new(size, f64::from(minutes) * 60.0 + f64::from(seconds))
    }

    pub fn check_size((rows, cols): Coord2) -> Result<()> {
        if rows < MIN_SIDE || cols < MIN_SIDE {
            Err(GameError::BoardTooSmall { min: MIN_SIDE })
        } else if rows > MAX_SIDE || cols > MAX_SIDE {
            Err(GameError::BoardTooLarge { max: MAX_SIDE })
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}
