//! Recovery items: drop, float, spin and pickup.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::context::SimContext;
use crate::entities::RecoveryItem;
use crate::events::SimEvent;

/// Drop a recovery item where an enemy died, never below the minimum altitude.
pub fn spawn(ctx: &mut SimContext, at: Vec3) {
    let cfg = &ctx.config.pickups;
    let position = Vec3::new(at.x, at.y.max(cfg.min_altitude), at.z);
    let spin_rate = cfg.spin.sample(&mut *ctx.rng);
    let float_phase = ctx.rng.range(0.0, TAU);
    ctx.items.push(RecoveryItem {
        position,
        heading: 0.0,
        spin_rate,
        float_phase,
    });
    ctx.emit(SimEvent::ItemDropped { position });
}

/// Animate items and hand out the ones the player flies through.
pub fn update(ctx: &mut SimContext) {
    let elapsed = ctx.elapsed();
    let SimContext {
        config,
        player,
        items,
        state,
        events,
        ..
    } = &mut *ctx;
    let cfg = &config.pickups;

    items.retain_mut(|item| {
        item.heading += item.spin_rate;
        item.position.y +=
            (elapsed * cfg.float_frequency + item.float_phase).sin() * cfg.float_amplitude;

        if item.position.distance(player.position) >= cfg.pickup_radius {
            return true;
        }
        let healed = state.heal(cfg.heal);
        tracing::debug!(healed, lives = state.lives(), "recovery item collected");
        events.push(SimEvent::ItemCollected {
            healed,
            lives: state.lives(),
        });
        false
    });
}
