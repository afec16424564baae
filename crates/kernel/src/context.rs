use skyraid_common::{EntityId, RandomSource, SessionId, WorldGeometry};

use crate::config::SimConfig;
use crate::entities::{Bullet, Enemy, PlayerState, RecoveryItem};
use crate::events::SimEvent;
use crate::handoff::ScoreSubmission;
use crate::state::{GameOverCause, GameState};

/// Everything one simulation owns.
///
/// Systems are free functions over `&mut SimContext`. Collections are only
/// mutated from within the tick, so iteration order is insertion order and
/// the same inputs with the same random draws give the same outcome.
pub struct SimContext {
    pub(crate) config: SimConfig,
    pub(crate) geometry: WorldGeometry,
    pub(crate) session: SessionId,
    pub(crate) player: PlayerState,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) bullets: Vec<Bullet>,
    pub(crate) items: Vec<RecoveryItem>,
    pub(crate) state: GameState,
    pub(crate) events: Vec<SimEvent>,
    pub(crate) rng: Box<dyn RandomSource>,
    pub(crate) tick: u64,
    next_id: u64,
}

impl SimContext {
    pub(crate) fn new(
        config: SimConfig,
        geometry: WorldGeometry,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let player = PlayerState::new(&config.flight);
        let state = GameState::new(config.max_lives);
        Self {
            config,
            geometry,
            session: SessionId::new(),
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            items: Vec::new(),
            state,
            events: Vec::new(),
            rng,
            tick: 0,
            next_id: 1,
        }
    }

    pub(crate) fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Simulated seconds since start.
    pub(crate) fn elapsed(&self) -> f32 {
        self.tick as f32 * self.config.tick_seconds
    }

    pub(crate) fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub(crate) fn submission(&self) -> ScoreSubmission {
        ScoreSubmission {
            session: self.session,
            score: self.state.score(),
            wave: self.state.wave(),
        }
    }

    /// Enter the terminal state and announce the final result.
    pub(crate) fn finish(&mut self, cause: GameOverCause) -> bool {
        if !self.state.end(cause) {
            return false;
        }
        let result = self.submission();
        tracing::info!(
            tick = self.tick,
            %cause,
            score = result.score,
            wave = result.wave,
            "game over"
        );
        self.emit(SimEvent::GameOver { cause, result });
        true
    }
}

#[cfg(test)]
pub(crate) fn test_context(geometry: WorldGeometry, draws: Vec<f32>) -> SimContext {
    SimContext::new(
        SimConfig::default(),
        geometry,
        Box::new(skyraid_common::ScriptedRandom::new(draws)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential() {
        let mut ctx = test_context(WorldGeometry::flat(0.0), vec![]);
        assert_eq!(ctx.next_id(), EntityId(1));
        assert_eq!(ctx.next_id(), EntityId(2));
    }

    #[test]
    fn finish_emits_one_game_over() {
        let mut ctx = test_context(WorldGeometry::flat(0.0), vec![]);
        ctx.state.award(300);
        assert!(ctx.finish(GameOverCause::Destroyed));
        assert!(!ctx.finish(GameOverCause::Crashed));
        let overs: Vec<_> = ctx
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs.len(), 1);
        match overs[0] {
            SimEvent::GameOver { cause, result } => {
                assert_eq!(*cause, GameOverCause::Destroyed);
                assert_eq!(result.score, 300);
                assert_eq!(result.session, ctx.session);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
