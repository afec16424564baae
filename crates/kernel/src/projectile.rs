//! Bullets: player fire, enemy fire, flight, expiry, occlusion and hits.
//!
//! # Invariants
//! - A bullet resolves at most one collision and is removed when it does.
//! - Building occlusion is checked before any hit test.
//! - Processing stops as soon as the game turns terminal.

use glam::Vec3;
use skyraid_input::ControlInput;

use crate::context::SimContext;
use crate::entities::{Archetype, Bullet, Enemy, Side};
use crate::events::SimEvent;
use crate::pickups;
use crate::state::GameOverCause;
use crate::targeting;

/// Count down the shot cooldown and fire if the trigger is held.
///
/// Returns true when a shot left the gun.
pub fn fire_player(ctx: &mut SimContext, input: &ControlInput) -> bool {
    let weapons = &ctx.config.weapons;
    let player = &mut ctx.player;
    player.shot_cooldown = player.shot_cooldown.saturating_sub(1);
    if !input.fire || player.shot_cooldown > 0 {
        return false;
    }

    let origin = player.position;
    let view = player.view_direction();
    let target = targeting::select(origin, view, &ctx.enemies, weapons);
    let direction = target
        .and_then(|t| (t.position - origin).try_normalize())
        .unwrap_or(view);

    player.shot_cooldown = weapons.fire_cooldown_ticks;
    player.aim_locked = target.is_some();
    ctx.bullets.push(Bullet::new(
        Side::Player,
        origin,
        direction,
        weapons.player_bullet_speed,
        weapons.player_bullet_life,
    ));
    tracing::trace!(?origin, target = ?target.map(|t| t.id), "player fired");
    ctx.emit(SimEvent::ShotFired {
        side: Side::Player,
        position: origin,
    });
    ctx.emit(SimEvent::AutoAim {
        active: target.is_some(),
        target: target.map(|t| t.id),
    });
    true
}

/// Launch an enemy bullet from `origin` towards the player's current position.
pub fn fire_enemy(ctx: &mut SimContext, origin: Vec3) {
    let Some(direction) = (ctx.player.position - origin).try_normalize() else {
        return;
    };
    let weapons = &ctx.config.weapons;
    ctx.bullets.push(Bullet::new(
        Side::Enemy,
        origin,
        direction,
        weapons.enemy_bullet_speed,
        weapons.enemy_bullet_life,
    ));
    ctx.emit(SimEvent::ShotFired {
        side: Side::Enemy,
        position: origin,
    });
}

/// Advance every bullet one tick and resolve expiry, occlusion and hits.
pub fn update(ctx: &mut SimContext) {
    let mut i = 0;
    while i < ctx.bullets.len() {
        if ctx.state.is_terminal() {
            return;
        }
        let bullet = &mut ctx.bullets[i];
        bullet.position += bullet.velocity;
        bullet.life = bullet.life.saturating_sub(1);
        let Bullet { side, position, life, .. } = *bullet;

        let weapons = &ctx.config.weapons;
        let spent = if life == 0
            || position.y < weapons.volume_floor
            || position.y > weapons.volume_ceiling
        {
            true
        } else if let Some(building) = ctx.geometry.occluding(position) {
            tracing::trace!(?side, building, "bullet stopped by building");
            true
        } else {
            match side {
                Side::Player => hit_enemy(ctx, position),
                Side::Enemy => hit_player(ctx, position),
            }
        };

        if spent {
            ctx.bullets.remove(i);
        } else {
            i += 1;
        }
    }
}

fn hit_enemy(ctx: &mut SimContext, position: Vec3) -> bool {
    let Some(index) = ctx
        .enemies
        .iter()
        .position(|e| e.position.distance(position) < e.archetype.hit_radius())
    else {
        return false;
    };

    if ctx.enemies[index].take_hit() {
        let enemy = ctx.enemies.remove(index);
        destroy(ctx, enemy);
    } else {
        let enemy = &ctx.enemies[index];
        let (id, remaining) = (enemy.id, enemy.health);
        ctx.emit(SimEvent::EnemyHit { id, remaining });
    }
    true
}

fn destroy(ctx: &mut SimContext, enemy: Enemy) {
    let points = enemy.archetype.score_value();
    ctx.state.award(points);

    let pickups_cfg = &ctx.config.pickups;
    let drop_chance = if enemy.archetype == Archetype::Boss {
        pickups_cfg.boss_drop_chance
    } else {
        pickups_cfg.drop_chance
    };
    if ctx.rng.chance(drop_chance) {
        pickups::spawn(ctx, enemy.position);
    }

    tracing::debug!(
        id = %enemy.id,
        archetype = %enemy.archetype,
        points,
        score = ctx.state.score(),
        "enemy destroyed"
    );
    ctx.emit(SimEvent::Explosion {
        position: enemy.position,
        size: enemy.archetype.explosion_size(),
    });
    ctx.emit(SimEvent::EnemyDestroyed {
        id: enemy.id,
        archetype: enemy.archetype,
        position: enemy.position,
        points,
    });
    ctx.state.resolve_enemy();
}

fn hit_player(ctx: &mut SimContext, position: Vec3) -> bool {
    let weapons = &ctx.config.weapons;
    if position.distance(ctx.player.position) >= weapons.player_hit_radius {
        return false;
    }
    let lives = ctx.state.damage(weapons.enemy_hit_damage);
    tracing::debug!(lives, "player hit");
    ctx.emit(SimEvent::DamageFlash { lives });
    if lives == 0 {
        ctx.finish(GameOverCause::Destroyed);
    }
    true
}
