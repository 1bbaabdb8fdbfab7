use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Scoring and timing constants for a round.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRules {
    /// Points per cleared tile.
    pub base_tile_score: u32,
    /// Points per tile above `bonus_threshold` in a single clear.
    pub bonus_points: u32,
    pub bonus_threshold: usize,
    /// Seconds a transient message stays visible.
    pub message_duration: f64,
    /// Highlight animation phase gained per second.
    pub highlight_speed: f64,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            base_tile_score: 100,
            bonus_points: 50,
            bonus_threshold: 4,
            message_duration: 2.0,
            highlight_speed: 9.0,
        }
    }
}

impl RoundRules {
    /// Points for clearing `group_size` tiles at once, split as `(base, bonus)`.
    pub fn clear_score(&self, group_size: usize) -> (u32, u32) {
        let size = u32::try_from(group_size).unwrap_or(u32::MAX);
        let base = self.base_tile_score.saturating_mul(size);
        let excess = group_size.saturating_sub(self.bonus_threshold);
        let bonus = self
            .bonus_points
            .saturating_mul(u32::try_from(excess).unwrap_or(u32::MAX));
        (base, bonus)
    }
}

/// Transient text shown to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundMessage {
    OnlyOneTile,
    Bonus(u32),
    /// Terminal; never expires.
    NoMoreMoves,
}

impl RoundMessage {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::NoMoreMoves)
    }
}

impl fmt::Display for RoundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnlyOneTile => f.write_str("Only one tile!"),
            Self::Bonus(points) => write!(f, "Bonus {points} points!"),
            Self::NoMoreMoves => f.write_str("No more moves!"),
        }
    }
}

/// Score, countdown, message and highlight bookkeeping for one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    rules: RoundRules,
    total_time: f64,
    score: u32,
    time_remaining: f64,
    message: Option<RoundMessage>,
    message_timer: f64,
    highlighted_group: Vec<Coord2>,
    highlight_phase: f64,
    game_over: bool,
}

impl RoundState {
    pub fn new(total_time: f64, rules: RoundRules) -> Self {
        Self {
            rules,
            total_time,
            score: 0,
            time_remaining: total_time,
            message: None,
            message_timer: rules.message_duration,
            highlighted_group: Vec::new(),
            highlight_phase: 0.0,
            game_over: false,
        }
    }

    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Seconds left; negative once the timer has expired.
    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    /// Seconds played, clamped to the round length.
    pub fn elapsed(&self) -> f64 {
        (self.total_time - self.time_remaining).clamp(0.0, self.total_time)
    }

    pub fn message(&self) -> Option<RoundMessage> {
        self.message
    }

    pub fn message_timer(&self) -> f64 {
        self.message_timer
    }

    pub fn highlighted_group(&self) -> &[Coord2] {
        &self.highlighted_group
    }

    pub fn highlight_phase(&self) -> f64 {
        self.highlight_phase
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Adds the points for clearing `group` and returns them. Larger clears set a bonus message.
    ///
    /// Only the group size matters, so the grid may be cleared before or after.
    pub fn apply_clear(&mut self, group: &[Coord2]) -> u32 {
        let (base, bonus) = self.rules.clear_score(group.len());
        let delta = base.saturating_add(bonus);
        self.score = self.score.saturating_add(delta);
        if bonus > 0 {
            self.set_message(RoundMessage::Bonus(bonus));
        }
        delta
    }

    pub fn set_message(&mut self, message: RoundMessage) {
        self.message = Some(message);
        self.message_timer = self.rules.message_duration;
    }

    /// Ends the round because the board ran out of moves.
    pub fn flag_no_moves(&mut self) {
        self.set_message(RoundMessage::NoMoreMoves);
        self.game_over = true;
    }

    pub fn tick(&mut self, dt: f64) {
        self.time_remaining -= dt;
        self.highlight_phase += dt * self.rules.highlight_speed;

        if let Some(message) = self.message
            && !message.is_terminal()
        {
            self.message_timer -= dt;
            if self.message_timer <= 0.0 {
                self.message = None;
                self.message_timer = self.rules.message_duration;
            }
        }

        if self.time_remaining < 0.0 {
            self.game_over = true;
        }
    }

    /// Replaces the highlighted group when it differs from `group` (compared row-major).
    /// Returns whether it changed; a change restarts the highlight animation.
    pub fn set_highlight(&mut self, mut group: Vec<Coord2>) -> bool {
        group.sort_unstable();
        if group == self.highlighted_group {
            return false;
        }
        self.highlighted_group = group;
        self.highlight_phase = 0.0;
        true
    }

    /// Drops `cells` from the highlighted group.
    pub fn unhighlight(&mut self, cells: &[Coord2]) {
        self.highlighted_group.retain(|pos| !cells.contains(pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn cells(n: u8) -> Vec<Coord2> {
        (0..n).map(|i| (0, i)).collect()
    }

    #[test]
    fn small_clear_scores_base_points_only() {
        let mut round = RoundState::new(60.0, RoundRules::default());

        assert_eq!(round.apply_clear(&cells(3)), 300);
        assert_eq!(round.score(), 300);
        assert_eq!(round.message(), None);
    }

    #[test]
    fn bonus_is_proportional_to_excess_over_four() {
        let mut round = RoundState::new(60.0, RoundRules::default());

        assert_eq!(round.apply_clear(&cells(4)), 400);
        assert_eq!(round.message(), None);

        assert_eq!(round.apply_clear(&cells(6)), 700);
        assert_eq!(round.score(), 1100);
        assert_eq!(round.message(), Some(RoundMessage::Bonus(100)));
        assert_eq!(round.message().unwrap().to_string(), "Bonus 100 points!");
    }

    #[test]
    fn message_expires_after_its_duration() {
        let mut round = RoundState::new(60.0, RoundRules::default());
        round.set_message(RoundMessage::OnlyOneTile);

        round.tick(1.5);
        assert_eq!(round.message(), Some(RoundMessage::OnlyOneTile));
        assert_eq!(round.message_timer(), 0.5);

        round.tick(0.5);
        assert_eq!(round.message(), None);
        assert_eq!(round.message_timer(), 2.0);
    }

    #[test]
    fn new_message_restarts_the_message_timer() {
        let mut round = RoundState::new(60.0, RoundRules::default());
        round.set_message(RoundMessage::OnlyOneTile);
        round.tick(1.5);

        round.set_message(RoundMessage::Bonus(50));

        assert_eq!(round.message_timer(), 2.0);
    }

    #[test]
    fn no_moves_message_never_expires() {
        let mut round = RoundState::new(60.0, RoundRules::default());
        round.flag_no_moves();

        round.tick(10.0);

        assert_eq!(round.message(), Some(RoundMessage::NoMoreMoves));
        assert!(round.is_game_over());
    }

    #[test]
    fn timer_expiry_ends_the_round() {
        let mut round = RoundState::new(1.0, RoundRules::default());

        round.tick(1.0);
        assert!(!round.is_game_over());

        round.tick(0.25);
        assert!(round.time_remaining() < 0.0);
        assert!(round.is_game_over());
        assert_eq!(round.elapsed(), 1.0);
    }

    #[test]
    fn highlight_changes_only_for_a_different_group() {
        let mut round = RoundState::new(60.0, RoundRules::default());

        assert!(round.set_highlight(vec![(1, 0), (0, 0)]));
        assert_eq!(round.highlighted_group(), [(0, 0), (1, 0)]);

        round.tick(0.5);
        assert_eq!(round.highlight_phase(), 4.5);

        assert!(!round.set_highlight(vec![(0, 0), (1, 0)]));
        assert_eq!(round.highlight_phase(), 4.5);

        assert!(round.set_highlight(vec![(2, 2)]));
        assert_eq!(round.highlight_phase(), 0.0);
    }

    #[test]
    fn unhighlight_drops_cleared_cells() {
        let mut round = RoundState::new(60.0, RoundRules::default());
        round.set_highlight(vec![(0, 0), (0, 1), (3, 3)]);

        round.unhighlight(&[(0, 0), (0, 1)]);

        assert_eq!(round.highlighted_group(), [(3, 3)]);
    }
}
