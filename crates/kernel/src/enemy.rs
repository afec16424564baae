//! Enemy behaviour: dormant bob, activation, approach, hiding, evasion,
//! facing and shooting.
//!
//! # Invariants
//! - A dormant enemy only bobs; it neither moves horizontally nor shoots.
//! - Evasion takes priority over hiding; the hide timer keeps running
//!   while evading.
//! - Bosses never hide.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use skyraid_common::{RandomSource, WorldGeometry};

use crate::config::EnemyConfig;
use crate::context::SimContext;
use crate::entities::{Archetype, BehaviorPhase, Enemy, HideTarget, PlayerState};
use crate::events::SimEvent;
use crate::projectile;

/// How hard enemies dodge when the player checks six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EvasionTier {
    /// Sideways jink.
    Light,
    /// Faster jink with vertical weave.
    Moderate,
    /// Jink, weave, close in and break away from the player's heading.
    Aggressive,
}

impl EvasionTier {
    pub fn for_wave(wave: u32, full_wave: f32) -> Self {
        let level = (wave as f32 / full_wave).min(1.0);
        if level < 0.4 {
            Self::Light
        } else if level < 0.8 {
            Self::Moderate
        } else {
            Self::Aggressive
        }
    }
}

/// Read-only inputs shared by every enemy this tick.
struct Surroundings<'a> {
    player: &'a PlayerState,
    geometry: &'a WorldGeometry,
    cfg: &'a EnemyConfig,
    elapsed: f32,
    dt: f32,
    wave: u32,
}

pub fn update(ctx: &mut SimContext) {
    let elapsed = ctx.elapsed();
    let wave = ctx.state.wave();
    let SimContext {
        config,
        geometry,
        player,
        enemies,
        events,
        rng,
        ..
    } = &mut *ctx;
    let env = Surroundings {
        player,
        geometry,
        cfg: &config.enemies,
        elapsed,
        dt: config.tick_seconds,
        wave,
    };

    let shots: Vec<Vec3> = enemies
        .iter_mut()
        .filter_map(|enemy| step(enemy, &env, &mut **rng, events))
        .collect();
    for origin in shots {
        projectile::fire_enemy(ctx, origin);
    }
}

/// Advance one enemy. Returns the muzzle position when it fires.
fn step(
    enemy: &mut Enemy,
    env: &Surroundings<'_>,
    rng: &mut dyn RandomSource,
    events: &mut Vec<SimEvent>,
) -> Option<Vec3> {
    let cfg = env.cfg;
    let player = env.player;
    let to_player = player.position - enemy.position;
    let distance = to_player.length();
    let direction = to_player.normalize_or_zero();

    if enemy.is_dormant() {
        enemy.position.y = enemy.base_altitude
            + (env.elapsed * cfg.bob_frequency + enemy.bob_phase).sin() * cfg.bob_amplitude;
        if distance < cfg.activation_distance {
            enemy.phase = BehaviorPhase::Active;
            enemy.apply_wave_intensity(env.wave, cfg.intensity_full_wave);
            tracing::debug!(id = %enemy.id, archetype = %enemy.archetype, "enemy activated");
            events.push(SimEvent::EnemyActivated {
                id: enemy.id,
                archetype: enemy.archetype,
            });
        }
        return None;
    }

    enemy.fly_angle += cfg.fly_angle_step;
    let fa = enemy.fly_angle;
    let wobble = Vec2::new(
        fa.sin() * cfg.wobble_x,
        (fa * cfg.wobble_y_frequency).cos() * cfg.wobble_y,
    );

    tick_hide(enemy, env, rng);

    let behind = player.heading().dot(-direction) < cfg.behind_threshold;
    let evading = player.rear_view && behind && distance < cfg.evade_range;
    let speed = enemy.archetype.speed();

    if evading {
        enemy.phase = BehaviorPhase::Evading;
        let tier = EvasionTier::for_wave(env.wave, cfg.intensity_full_wave);
        evade(enemy, player, direction, speed, tier, env);
    } else if let Some(hide) = enemy.hide {
        enemy.phase = BehaviorPhase::Hiding;
        shelter(enemy, hide, env);
    } else {
        enemy.phase = BehaviorPhase::Active;
        if distance > cfg.close_distance {
            enemy.position.x += direction.x * speed + wobble.x;
            enemy.position.y += direction.y * speed * cfg.climb_factor + wobble.y;
            enemy.position.z += direction.z * speed;
        } else {
            enemy.position.x += wobble.x * 2.0;
            enemy.position.y += wobble.y * 2.0;
        }
    }

    if enemy.hide.is_some_and(|h| h.remaining <= 0.0) {
        enemy.hide = None;
        enemy.hide_cooldown = cfg.hide_cooldown.sample(rng);
        tracing::trace!(id = %enemy.id, "enemy left cover");
    }

    enemy.yaw = (player.position.x - enemy.position.x).atan2(player.position.z - enemy.position.z);
    enemy.pitch = (player.position.y - enemy.position.y).atan2(distance) * 0.3;

    enemy.shot_timer -= env.dt;
    if enemy.shot_timer <= 0.0 && distance < cfg.firing_range {
        enemy.shot_timer = enemy.archetype.shot_interval();
        return Some(enemy.position);
    }
    None
}

/// Count down hide timers and maybe pick a building to shelter behind.
fn tick_hide(enemy: &mut Enemy, env: &Surroundings<'_>, rng: &mut dyn RandomSource) {
    match enemy.hide.as_mut() {
        Some(hide) => hide.remaining -= env.dt,
        None => enemy.hide_cooldown -= env.dt,
    }

    let cfg = env.cfg;
    if enemy.archetype == Archetype::Boss
        || enemy.hide.is_some()
        || enemy.hide_cooldown > 0.0
        || !rng.chance(cfg.hide_chance)
    {
        return;
    }
    if let Some(building) = env.geometry.nearest_within(enemy.position, cfg.hide_search_radius) {
        let remaining = cfg.hide_duration.sample(rng);
        tracing::trace!(id = %enemy.id, building, remaining, "enemy taking cover");
        enemy.hide = Some(HideTarget { building, remaining });
    }
}

/// Ease towards the far side of the hide building, as seen from the player.
fn shelter(enemy: &mut Enemy, hide: HideTarget, env: &Surroundings<'_>) {
    let Some(building) = env.geometry.building(hide.building) else {
        return;
    };
    let cfg = env.cfg;
    let player = Vec2::new(env.player.position.x, env.player.position.z);
    let away = (player - building.center()).normalize_or_zero();
    let spot = building.center() - away * cfg.hide_offset;
    let altitude = env.geometry.ground_level()
        + (building.height * cfg.hide_altitude_ratio).min(cfg.hide_altitude_cap);
    let target = Vec3::new(spot.x, altitude, spot.y);
    enemy.position += (target - enemy.position) * cfg.hide_easing;
}

/// Compass escape heading perpendicular to the player's yaw.
fn escape_heading(player_yaw: f32, side: f32) -> f32 {
    player_yaw + side * FRAC_PI_2
}

fn evade(
    enemy: &mut Enemy,
    player: &PlayerState,
    to_player: Vec3,
    speed: f32,
    tier: EvasionTier,
    env: &Surroundings<'_>,
) {
    let level = (env.wave as f32 / env.cfg.intensity_full_wave).min(1.0);
    let evade_speed = speed * (1.0 + level * 2.0);
    let fa = enemy.fly_angle;
    let side = |k: f32| if (fa * k).sin() > 0.0 { 1.0 } else { -1.0 };
    let across = Vec3::new(-to_player.z, 0.0, to_player.x);

    match tier {
        EvasionTier::Light => {
            enemy.position += across * side(5.0) * evade_speed * 0.3;
        }
        EvasionTier::Moderate => {
            enemy.position += across * side(8.0) * evade_speed * 0.6;
            enemy.position.y += (fa * 6.0).sin() * 1.5;
        }
        EvasionTier::Aggressive => {
            let s = side(10.0);
            enemy.position.x += across.x * s * evade_speed + to_player.x * evade_speed * 0.3;
            enemy.position.z += across.z * s * evade_speed + to_player.z * evade_speed * 0.3;
            enemy.position.y += (fa * 8.0).sin() * 3.0;
            let escape = escape_heading(player.yaw, s);
            enemy.position.x += escape.sin() * evade_speed * 0.5;
            enemy.position.z += escape.cos() * evade_speed * 0.5;
        }
    }
}
