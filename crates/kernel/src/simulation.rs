use skyraid_common::{RandomSource, SessionId, SplitMix64, WorldGeometry};
use skyraid_input::ControlInput;

use crate::config::SimConfig;
use crate::context::SimContext;
use crate::entities::{Bullet, Enemy, PlayerState, RecoveryItem};
use crate::error::ConfigError;
use crate::events::SimEvent;
use crate::flight::{self, FlightOutcome};
use crate::handoff::{HudSnapshot, ScoreSubmission};
use crate::state::{GameOverCause, GameState};
use crate::waves::WaveDirector;
use crate::{enemy, pickups, projectile};

/// The authoritative game simulation.
///
/// Owns the context and the wave director, and advances them one fixed
/// tick at a time in a fixed stage order:
///
/// 1. flight (may crash and end the tick)
/// 2. player fire
/// 3. bullets (may end the game)
/// 4. enemies
/// 5. recovery items
/// 6. wave director
/// 7. terminal check
///
/// Given the same config, geometry, random draws and inputs, two
/// simulations produce identical states and events.
pub struct Simulation {
    ctx: SimContext,
    director: WaveDirector,
}

impl Simulation {
    /// Seeded simulation with the default wave director.
    pub fn with_seed(
        config: SimConfig,
        geometry: WorldGeometry,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(config, geometry, Box::new(SplitMix64::new(seed)))
    }

    pub fn new(
        config: SimConfig,
        geometry: WorldGeometry,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(
            buildings = geometry.buildings().len(),
            max_lives = config.max_lives,
            "simulation created"
        );
        Ok(Self {
            ctx: SimContext::new(config, geometry, rng),
            director: WaveDirector::new(),
        })
    }

    /// Replace the wave director, e.g. to skip or delay the formation.
    pub fn with_director(mut self, director: WaveDirector) -> Self {
        self.director = director;
        self
    }

    /// Attach the result to an existing play session.
    pub fn with_session(mut self, session: SessionId) -> Self {
        self.ctx.session = session;
        self
    }

    /// Advance one tick. A no-op once the game is over.
    pub fn step(&mut self, input: &ControlInput) {
        if self.ctx.state.is_terminal() {
            return;
        }
        self.ctx.tick += 1;
        let _span = tracing::info_span!("sim_step", tick = self.ctx.tick).entered();
        let input = input.clamped();
        let ctx = &mut self.ctx;

        if flight::update(ctx, &input) == FlightOutcome::Crashed {
            return;
        }
        projectile::fire_player(ctx, &input);
        projectile::update(ctx);
        if ctx.state.is_terminal() {
            return;
        }
        enemy::update(ctx);
        pickups::update(ctx);
        self.director.update(ctx);

        if ctx.state.lives() == 0 {
            ctx.finish(GameOverCause::Destroyed);
        }
        tracing::trace!(
            enemies = ctx.enemies.len(),
            bullets = ctx.bullets.len(),
            score = ctx.state.score(),
            "tick complete"
        );
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.ctx.events)
    }

    pub fn hud(&self) -> HudSnapshot {
        let ctx = &self.ctx;
        HudSnapshot {
            tick: ctx.tick,
            score: ctx.state.score(),
            lives: ctx.state.lives(),
            wave: ctx.state.wave(),
            live_enemies: ctx.enemies.len(),
            speed_percent: (ctx.player.throttle * 100.0).round() as u32,
            altitude: ctx.player.position.y - ctx.geometry.ground_level(),
            rear_view: ctx.player.rear_view,
            auto_aim: ctx
                .player
                .auto_aim_active(ctx.config.weapons.auto_aim_hold_ticks),
            phase: ctx.state.phase(),
        }
    }

    /// The score hand-off, available once the game is over.
    pub fn final_result(&self) -> Option<ScoreSubmission> {
        self.ctx
            .state
            .is_terminal()
            .then(|| self.ctx.submission())
    }

    pub fn is_over(&self) -> bool {
        self.ctx.state.is_terminal()
    }

    pub fn tick(&self) -> u64 {
        self.ctx.tick
    }

    pub fn session(&self) -> SessionId {
        self.ctx.session
    }

    pub fn config(&self) -> &SimConfig {
        &self.ctx.config
    }

    pub fn geometry(&self) -> &WorldGeometry {
        &self.ctx.geometry
    }

    pub fn state(&self) -> &GameState {
        &self.ctx.state
    }

    pub fn player(&self) -> &PlayerState {
        &self.ctx.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.ctx.enemies
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.ctx.bullets
    }

    pub fn items(&self) -> &[RecoveryItem] {
        &self.ctx.items
    }

    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    #[cfg(test)]
    pub(crate) fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }
}
