use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> RoundOver
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    /// Moves are accepted
    Playing,
    /// Timer expired or the board ran out of moves
    RoundOver,
}

impl EngineState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::RoundOver)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectKind {
    /// Round over, out of bounds, or empty cell
    Ignored,
    /// Tile without a same-kind neighbor, nothing changed on the board
    SingleTile,
    /// Group removed and its perimeter advanced
    Cleared,
}

/// What a renderer needs to animate a selection.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOutcome {
    pub kind: SelectKind,
    pub cleared: Vec<Coord2>,
    /// Perimeter cells whose kind was advanced; empty neighbors are left out.
    pub perimeter_touched: Vec<Coord2>,
    pub score_delta: u32,
    pub message: Option<RoundMessage>,
    pub game_over: bool,
}

impl SelectOutcome {
    /// Whether this outcome could have caused an update to the round
    pub const fn has_update(&self) -> bool {
        match self.kind {
            SelectKind::Ignored => false,
            SelectKind::SingleTile => true,
            SelectKind::Cleared => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HoverOutcome {
    pub highlight_changed: bool,
    /// Highlighted group after the hover, row-major.
    pub group: Vec<Coord2>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickOutcome {
    pub time_remaining: f64,
    pub message: Option<RoundMessage>,
    pub game_over: bool,
}

/// Fields handed to the leaderboard once a round ends.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub size: Coord2,
    pub total_time: f64,
    pub time_remaining: f64,
    pub elapsed: f64,
    pub score: u32,
}

/// Represents a round from board setup to timer expiry or move exhaustion.
///
/// Serializes for snapshots only; a round is always rebuilt through [`Engine::new`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Engine {
    config: GameConfig,
    grid: Grid,
    round: RoundState,
    state: EngineState,
}

impl Engine {
    pub fn new(config: GameConfig, setup: BoardSetup) -> Result<Self> {
        Self::with_rules(config, setup, RoundRules::default())
    }

    pub fn with_rules(config: GameConfig, setup: BoardSetup, rules: RoundRules) -> Result<Self> {
        config.validate()?;
        let grid = setup.build(config.size)?;
        if !any_legal_move(&grid) {
            log::warn!("Round starts without any legal move");
        }
        log::debug!(
            "New round {}x{}, {}s on the clock",
            config.size.0,
            config.size.1,
            config.total_time
        );
        Ok(Self {
            config,
            grid,
            round: RoundState::new(config.total_time, rules),
            state: Default::default(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn score(&self) -> u32 {
        self.round.score()
    }

    /// Read-only cell access for rendering.
    pub fn cell_type(&self, coords: Coord2) -> Result<TileType> {
        self.grid.get(coords)
    }

    /// Number of distinct groups that could be cleared right now.
    pub fn available_moves(&self) -> usize {
        count_legal_moves(&self.grid)
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            size: self.config.size,
            total_time: self.round.total_time(),
            time_remaining: self.round.time_remaining(),
            elapsed: self.round.elapsed(),
            score: self.round.score(),
        }
    }

    /// Clears the group under `(row, col)` when it holds at least two tiles.
    ///
    /// Coordinates outside the board, empty cells, and a finished round are ignored.
    pub fn select(&mut self, row: i32, col: i32) -> SelectOutcome {
        if self.state.is_over() {
            return self.ignored_select();
        }
        let Some(coords) = self.resolve_tile(row, col) else {
            return self.ignored_select();
        };
        let scan = match find_group(&self.grid, coords) {
            Ok(scan) => scan,
            Err(err) => {
                log::warn!("Group lookup failed at {:?}: {}", coords, err);
                return self.ignored_select();
            }
        };

        let mut outcome = if scan.is_clearable() {
            match self.clear_group(&scan) {
                Ok(outcome) => outcome,
                Err(err) => {
                    log::warn!("Clearing group at {:?} failed: {}", coords, err);
                    return self.ignored_select();
                }
            }
        } else {
            log::debug!("Only one tile at {:?}", coords);
            self.round.set_message(RoundMessage::OnlyOneTile);
            SelectOutcome {
                kind: SelectKind::SingleTile,
                cleared: Vec::new(),
                perimeter_touched: Vec::new(),
                score_delta: 0,
                message: None,
                game_over: false,
            }
        };

        if !any_legal_move(&self.grid) {
            log::debug!("No legal moves left");
            self.round.flag_no_moves();
            self.end_round();
        }

        outcome.message = self.round.message();
        outcome.game_over = self.state.is_over();
        outcome
    }

    /// Highlights the group under `(row, col)`. Hovering the same group again changes nothing.
    pub fn hover(&mut self, row: i32, col: i32) -> HoverOutcome {
        let scan = self
            .resolve_tile(row, col)
            .and_then(|coords| find_group(&self.grid, coords).ok());

        let highlight_changed = match scan {
            Some(scan) => self.round.set_highlight(scan.group),
            None => false,
        };

        HoverOutcome {
            highlight_changed,
            group: self.round.highlighted_group().to_vec(),
        }
    }

    /// Advances the clocks by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> TickOutcome {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("Ignoring invalid frame time {}", dt);
            0.0
        };

        self.round.tick(dt);
        if self.round.time_remaining() < 0.0 {
            self.end_round();
        }

        TickOutcome {
            time_remaining: self.round.time_remaining(),
            message: self.round.message(),
            game_over: self.state.is_over(),
        }
    }

    fn clear_group(&mut self, scan: &GroupScan) -> Result<SelectOutcome> {
        let perimeter_touched: Vec<_> = scan
            .perimeter
            .iter()
            .copied()
            .filter(|&pos| !self.grid[pos].is_empty())
            .collect();

        self.grid.remove(&scan.group)?;
        self.grid.increment(&perimeter_touched)?;
        self.round.unhighlight(&scan.group);
        let score_delta = self.round.apply_clear(&scan.group);
        log::debug!(
            "Cleared {} tiles, advanced {}, +{} points",
            scan.len(),
            perimeter_touched.len(),
            score_delta
        );

        Ok(SelectOutcome {
            kind: SelectKind::Cleared,
            cleared: scan.canonical_group(),
            perimeter_touched,
            score_delta,
            message: None,
            game_over: false,
        })
    }

    /// Maps raw input coordinates to a non-empty cell on the board.
    fn resolve_tile(&self, row: i32, col: i32) -> Option<Coord2> {
        let coords = (Coord::try_from(row).ok()?, Coord::try_from(col).ok()?);
        let coords = self.grid.validate_coords(coords).ok()?;
        (!self.grid[coords].is_empty()).then_some(coords)
    }

    fn ignored_select(&self) -> SelectOutcome {
        SelectOutcome {
            kind: SelectKind::Ignored,
            cleared: Vec::new(),
            perimeter_touched: Vec::new(),
            score_delta: 0,
            message: self.round.message(),
            game_over: self.state.is_over(),
        }
    }

    fn end_round(&mut self) {
        if self.state.is_over() {
            return;
        }
        self.state = EngineState::RoundOver;
        log::debug!(
            "Round over with {} points, {:.2}s left",
            self.round.score(),
            self.round.time_remaining()
        );
    }
}
