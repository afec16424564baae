use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyraid_common::EntityId;

use crate::entities::{Archetype, Side};
use crate::handoff::ScoreSubmission;
use crate::state::GameOverCause;

/// Something that happened during a tick.
///
/// The presentation layer drains these after every step to drive
/// explosions, screen flashes, the auto-aim reticle and the game-over
/// screen. The simulation never waits on a consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    ShotFired {
        side: Side,
        position: Vec3,
    },
    /// Reticle state after a player shot.
    AutoAim {
        active: bool,
        target: Option<EntityId>,
    },
    EnemyHit {
        id: EntityId,
        remaining: u32,
    },
    EnemyDestroyed {
        id: EntityId,
        archetype: Archetype,
        position: Vec3,
        points: u64,
    },
    Explosion {
        position: Vec3,
        size: f32,
    },
    /// The player took damage.
    DamageFlash {
        lives: u32,
    },
    ItemDropped {
        position: Vec3,
    },
    ItemCollected {
        healed: u32,
        lives: u32,
    },
    EnemyActivated {
        id: EntityId,
        archetype: Archetype,
    },
    FormationMaterialized {
        count: usize,
    },
    /// Glyph assets failed; play continues with procedural waves.
    FormationSkipped {
        reason: String,
    },
    WaveScheduled {
        wave: u32,
        size: u32,
    },
    EnemySpawned {
        id: EntityId,
        archetype: Archetype,
    },
    GameOver {
        cause: GameOverCause,
        result: ScoreSubmission,
    },
}
