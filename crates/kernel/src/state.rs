//! Score, lives, wave number and the terminal state machine.
//!
//! # Invariants
//! - `lives` never exceeds `max_lives` and never underflows.
//! - `Playing -> GameOver` happens at most once; once terminal, every
//!   mutator is a no-op.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOverCause {
    /// Lives depleted by enemy fire.
    Destroyed,
    /// Hit the ground or a building.
    Crashed,
}

impl fmt::Display for GameOverCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Destroyed => f.write_str("destroyed"),
            Self::Crashed => f.write_str("crashed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Playing,
    GameOver(GameOverCause),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    score: u64,
    lives: u32,
    max_lives: u32,
    wave: u32,
    /// Enemies promised to the current wave that have not yet been destroyed.
    pending: u32,
    phase: GamePhase,
}

impl GameState {
    pub fn new(max_lives: u32) -> Self {
        Self {
            score: 0,
            lives: max_lives,
            max_lives,
            wave: 1,
            pending: 0,
            phase: GamePhase::Playing,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn cause(&self) -> Option<GameOverCause> {
        match self.phase {
            GamePhase::GameOver(cause) => Some(cause),
            GamePhase::Playing => None,
        }
    }

    pub fn award(&mut self, points: u64) {
        if !self.is_terminal() {
            self.score = self.score.saturating_add(points);
        }
    }

    /// Apply damage, saturating at zero. Returns the remaining lives.
    pub fn damage(&mut self, amount: u32) -> u32 {
        if !self.is_terminal() {
            self.lives = self.lives.saturating_sub(amount);
        }
        self.lives
    }

    /// Heal up to the cap. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.is_terminal() {
            return 0;
        }
        let before = self.lives;
        self.lives = self.lives.saturating_add(amount).min(self.max_lives);
        self.lives - before
    }

    /// Start the next wave. Returns the new wave number.
    pub fn advance_wave(&mut self) -> u32 {
        if !self.is_terminal() {
            self.wave += 1;
        }
        self.wave
    }

    pub fn set_pending(&mut self, count: u32) {
        if !self.is_terminal() {
            self.pending = count;
        }
    }

    pub fn promise_enemy(&mut self) {
        if !self.is_terminal() {
            self.pending += 1;
        }
    }

    pub fn resolve_enemy(&mut self) {
        if !self.is_terminal() {
            self.pending = self.pending.saturating_sub(1);
        }
    }

    /// Enter the terminal state. Crashing zeroes lives. Returns false when
    /// the game was already over.
    pub fn end(&mut self, cause: GameOverCause) -> bool {
        if self.is_terminal() {
            return false;
        }
        if cause == GameOverCause::Crashed {
            self.lives = 0;
        }
        self.phase = GamePhase::GameOver(cause);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_playing_at_wave_one() {
        let state = GameState::new(100);
        assert_eq!(state.lives(), 100);
        assert_eq!(state.wave(), 1);
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn damage_saturates_and_heal_caps() {
        let mut state = GameState::new(100);
        assert_eq!(state.damage(95), 5);
        assert_eq!(state.damage(10), 0);
        let mut state = GameState::new(100);
        state.damage(10);
        assert_eq!(state.heal(25), 10);
        assert_eq!(state.lives(), 100);
    }

    #[test]
    fn pending_never_underflows() {
        let mut state = GameState::new(100);
        state.resolve_enemy();
        assert_eq!(state.pending(), 0);
        state.promise_enemy();
        state.promise_enemy();
        state.resolve_enemy();
        assert_eq!(state.pending(), 1);
    }

    #[test]
    fn game_over_happens_once() {
        let mut state = GameState::new(100);
        assert!(state.end(GameOverCause::Destroyed));
        assert!(!state.end(GameOverCause::Crashed));
        assert_eq!(state.cause(), Some(GameOverCause::Destroyed));
    }

    #[test]
    fn crash_zeroes_lives() {
        let mut state = GameState::new(100);
        state.end(GameOverCause::Crashed);
        assert_eq!(state.lives(), 0);
    }

    #[test]
    fn terminal_state_is_frozen() {
        let mut state = GameState::new(100);
        state.award(500);
        state.end(GameOverCause::Destroyed);
        state.award(100);
        state.heal(10);
        state.advance_wave();
        assert_eq!(state.score(), 500);
        assert_eq!(state.wave(), 1);
    }
}
