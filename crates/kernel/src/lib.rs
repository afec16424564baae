//! Skyraid kernel: authoritative flight-combat simulation.
//!
//! One [`Simulation`] owns the player, enemies, bullets, recovery items and
//! game state, and advances them one fixed tick per [`Simulation::step`].
//! Presentation consumes [`HudSnapshot`]s and drained [`SimEvent`]s; it
//! never mutates simulation state.
//!
//! # Invariants
//! - Stepping is deterministic given config, geometry, random draws and inputs.
//! - All state mutations flow through the tick stages; nothing else writes.
//! - Once the game is over, further steps are no-ops.

pub mod config;
pub mod context;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod events;
pub mod flight;
pub mod formation;
pub mod handoff;
pub mod pickups;
pub mod projectile;
pub mod simulation;
pub mod state;
pub mod targeting;
pub mod waves;

pub use config::SimConfig;
pub use entities::{Archetype, BehaviorPhase, Bullet, Enemy, PlayerState, RecoveryItem, Side};
pub use error::ConfigError;
pub use events::SimEvent;
pub use formation::{AssetPoll, FormationLayout, GlyphAssets};
pub use handoff::{HudSnapshot, ScoreSubmission};
pub use simulation::Simulation;
pub use state::{GameOverCause, GamePhase, GameState};
pub use waves::WaveDirector;

pub fn crate_info() -> &'static str {
    "skyraid-kernel v0.1.0"
}
