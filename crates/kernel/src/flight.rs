//! Player flight model: steering, throttle, crash detection, altitude
//! ceiling and toroidal wrap.
//!
//! # Invariants
//! - After a non-crashing update, `|x| <= boundary` and `|z| <= boundary`.
//! - Throttle stays within `[min_throttle, max_throttle]`, pitch within
//!   `[-pitch_limit, pitch_limit]`.
//! - A crash ends the game in the same tick; nothing further moves.

use skyraid_input::ControlInput;

use crate::context::SimContext;
use crate::events::SimEvent;
use crate::state::GameOverCause;

const CRASH_EXPLOSION_SIZE: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    Flying,
    Crashed,
}

/// Map a coordinate that left `[-bound, bound]` to the opposite edge.
pub fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value > bound {
        -bound
    } else if value < -bound {
        bound
    } else {
        value
    }
}

pub fn update(ctx: &mut SimContext, input: &ControlInput) -> FlightOutcome {
    let cfg = &ctx.config.flight;
    let player = &mut ctx.player;

    player.pitch += input.pitch * cfg.pitch_rate + input.look.y;
    player.yaw += input.look.x - input.turn * cfg.yaw_rate;
    if input.is_turning() {
        player.roll = (player.roll - input.turn * cfg.roll_rate).clamp(-cfg.max_roll, cfg.max_roll);
    } else {
        player.roll *= cfg.roll_decay;
    }

    if input.boosting() {
        player.throttle += cfg.throttle_step;
    } else if input.braking() {
        player.throttle -= cfg.throttle_step;
    }
    player.throttle = player.throttle.clamp(cfg.min_throttle, cfg.max_throttle);
    player.pitch = player.pitch.clamp(-cfg.pitch_limit, cfg.pitch_limit);
    player.rear_view = input.rear_view;

    let speed = player.speed(cfg);
    player.position += player.forward() * speed;

    let position = player.position;
    let ground = ctx.geometry.ground_level();
    let obstacle = ctx
        .geometry
        .obstructing(position, cfg.building_margin, cfg.building_clearance);
    if position.y < ground + cfg.crash_altitude || obstacle.is_some() {
        tracing::debug!(?position, ?obstacle, "player crashed");
        ctx.emit(SimEvent::Explosion {
            position,
            size: CRASH_EXPLOSION_SIZE,
        });
        ctx.finish(GameOverCause::Crashed);
        return FlightOutcome::Crashed;
    }

    if player.position.y > cfg.ceiling {
        player.position.y = cfg.ceiling;
        if player.pitch > 0.0 {
            player.pitch *= cfg.ceiling_pitch_damping;
        }
    }

    player.position.x = wrap_axis(player.position.x, cfg.boundary);
    player.position.z = wrap_axis(player.position.z, cfg.boundary);
    FlightOutcome::Flying
}
