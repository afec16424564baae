//! Wave progression: the opening formation, then endless procedural waves.
//!
//! # Invariants
//! - A procedural wave is scheduled only when no enemy is alive, nothing
//!   is pending and the spawn queue is empty.
//! - Queued spawns fire in tick order and are dropped once the game is over.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyraid_common::RandomSource;

use crate::config::WaveConfig;
use crate::context::SimContext;
use crate::entities::{Archetype, BehaviorPhase, Enemy};
use crate::events::SimEvent;
use crate::formation::{self, AssetPoll, FormationLayout, GlyphAssets, Preloaded};

/// A deferred enemy spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSpawn {
    pub fire_at: u64,
    pub archetype: Archetype,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationStage {
    NotStarted,
    Loading,
    Complete,
}

/// Enemies in the wave that follows `wave`.
pub fn wave_size(wave: u32, cfg: &WaveConfig) -> u32 {
    cfg.base_size + cfg.size_per_wave * wave
}

/// Archetype for one spawn of `wave`, given a uniform roll in `[0, 1)`.
pub fn roll_archetype(wave: u32, roll: f32, cfg: &WaveConfig) -> Archetype {
    if wave >= cfg.boss_min_wave && roll < cfg.boss_chance {
        Archetype::Boss
    } else if wave >= cfg.tank_min_wave && roll < cfg.tank_chance {
        Archetype::Tank
    } else if wave >= cfg.hunter_min_wave && roll < cfg.hunter_chance {
        Archetype::Hunter
    } else {
        Archetype::Drone
    }
}

pub struct WaveDirector {
    stage: FormationStage,
    layout: FormationLayout,
    assets: Box<dyn GlyphAssets>,
    queue: VecDeque<ScheduledSpawn>,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveDirector {
    /// New-year formation with assets already loaded.
    pub fn new() -> Self {
        Self::with_formation(FormationLayout::new_year(), Box::new(Preloaded))
    }

    pub fn with_formation(layout: FormationLayout, assets: Box<dyn GlyphAssets>) -> Self {
        Self {
            stage: FormationStage::NotStarted,
            layout,
            assets,
            queue: VecDeque::new(),
        }
    }

    /// Start straight with procedural waves.
    pub fn without_formation() -> Self {
        Self {
            stage: FormationStage::Complete,
            ..Self::new()
        }
    }

    pub fn stage(&self) -> FormationStage {
        self.stage
    }

    pub fn queued(&self) -> &VecDeque<ScheduledSpawn> {
        &self.queue
    }

    pub fn update(&mut self, ctx: &mut SimContext) {
        self.release_due(ctx);

        match self.stage {
            FormationStage::NotStarted | FormationStage::Loading => {
                self.stage = FormationStage::Loading;
                self.poll_formation(ctx);
                return;
            }
            FormationStage::Complete => {}
        }

        if ctx.state.is_terminal() {
            return;
        }
        if ctx.enemies.is_empty() && ctx.state.pending() == 0 && self.queue.is_empty() {
            self.schedule_wave(ctx);
        }
    }

    fn poll_formation(&mut self, ctx: &mut SimContext) {
        match self.assets.poll() {
            AssetPoll::Pending => {}
            AssetPoll::Ready => {
                formation::materialize(ctx, &self.layout);
                self.stage = FormationStage::Complete;
            }
            AssetPoll::Failed(reason) => {
                tracing::warn!(%reason, "glyph assets failed, skipping letter formation");
                ctx.emit(SimEvent::FormationSkipped { reason });
                self.stage = FormationStage::Complete;
            }
        }
    }

    fn schedule_wave(&mut self, ctx: &mut SimContext) {
        let cfg = &ctx.config.waves;
        let size = wave_size(ctx.state.wave(), cfg);
        let interval = cfg.spawn_interval_ticks(ctx.config.tick_seconds);
        let wave = ctx.state.advance_wave();
        for i in 0..size {
            let archetype = roll_archetype(wave, ctx.rng.next_f32(), cfg);
            self.queue.push_back(ScheduledSpawn {
                fire_at: ctx.tick + u64::from(i) * interval,
                archetype,
            });
        }
        tracing::info!(wave, size, "wave scheduled");
        ctx.emit(SimEvent::WaveScheduled { wave, size });
    }

    fn release_due(&mut self, ctx: &mut SimContext) {
        while let Some(next) = self.queue.front().copied() {
            if next.fire_at > ctx.tick {
                break;
            }
            self.queue.pop_front();
            if ctx.state.is_terminal() {
                tracing::trace!(archetype = %next.archetype, "spawn dropped after game over");
                continue;
            }
            spawn(ctx, next.archetype);
        }
    }
}

/// Place a procedural enemy on the spawn ring, already active.
fn spawn(ctx: &mut SimContext, archetype: Archetype) {
    let id = ctx.next_id();
    let cfg = &ctx.config.waves;
    let rng: &mut dyn RandomSource = &mut *ctx.rng;
    let angle = rng.range(0.0, TAU);
    let distance = cfg.spawn_distance.sample(rng);
    let altitude = cfg.spawn_altitude.sample(rng);
    let position = Vec3::new(angle.cos() * distance, altitude, angle.sin() * distance);

    let mut enemy = Enemy::new(id, archetype, archetype.wave_health(), position);
    enemy.phase = BehaviorPhase::Active;
    enemy.shot_timer = cfg.shot_delay.sample(rng);
    enemy.bob_phase = rng.range(0.0, TAU);
    enemy.fly_angle = rng.range(0.0, TAU);
    enemy.apply_wave_intensity(ctx.state.wave(), ctx.config.enemies.intensity_full_wave);

    tracing::debug!(%id, %archetype, ?position, "enemy spawned");
    ctx.enemies.push(enemy);
    ctx.state.promise_enemy();
    ctx.emit(SimEvent::EnemySpawned { id, archetype });
}
