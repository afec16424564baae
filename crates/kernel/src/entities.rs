//! Entity records owned by the simulation context.
//!
//! # Invariants
//! - Enemy health is unsigned; hits saturate at zero and a zero-health
//!   enemy is removed in the same tick it reached zero.
//! - Wave intensity is applied to an enemy at most once.
//! - The hide target of an enemy is an index into the world geometry,
//!   which is immutable for the lifetime of a simulation.

use std::fmt;

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use skyraid_common::EntityId;

use crate::config::FlightConfig;

/// Enemy variety. Drives speed, hit radius, score value and fire rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Drone,
    Hunter,
    Tank,
    Boss,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [Self::Drone, Self::Hunter, Self::Tank, Self::Boss];

    /// Movement per tick while approaching.
    pub fn speed(self) -> f32 {
        match self {
            Self::Drone => 0.5,
            Self::Hunter => 0.8,
            Self::Tank => 0.4,
            Self::Boss => 0.3,
        }
    }

    /// Distance under which a player bullet counts as a hit.
    pub fn hit_radius(self) -> f32 {
        match self {
            Self::Boss => 8.0,
            Self::Tank => 5.0,
            Self::Drone | Self::Hunter => 3.0,
        }
    }

    pub fn score_value(self) -> u64 {
        match self {
            Self::Drone => 100,
            Self::Hunter => 150,
            Self::Tank => 300,
            Self::Boss => 1000,
        }
    }

    /// Seconds between shots once the first shot has been fired.
    pub fn shot_interval(self) -> f32 {
        match self {
            Self::Boss => 0.5,
            Self::Tank => 1.0,
            Self::Drone | Self::Hunter => 1.5,
        }
    }

    /// Starting health for procedurally spawned enemies.
    pub fn wave_health(self) -> u32 {
        match self {
            Self::Drone => 1,
            Self::Hunter => 2,
            Self::Tank => 8,
            Self::Boss => 30,
        }
    }

    /// Starting health for formation glyph enemies.
    pub fn formation_health(self) -> u32 {
        match self {
            Self::Drone => 1,
            Self::Hunter => 5,
            Self::Tank => 10,
            Self::Boss => 20,
        }
    }

    /// Archetype for a formation glyph: numerals are bosses, the letters
    /// H, N, Y and R are tanks, everything else is a hunter.
    pub fn from_glyph(glyph: char) -> Self {
        match glyph {
            c if c.is_ascii_digit() => Self::Boss,
            'H' | 'N' | 'Y' | 'R' => Self::Tank,
            _ => Self::Hunter,
        }
    }

    /// Explosion size when destroyed.
    pub fn explosion_size(self) -> f32 {
        match self {
            Self::Boss => 3.0,
            _ => 1.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Drone => "drone",
            Self::Hunter => "hunter",
            Self::Tank => "tank",
            Self::Boss => "boss",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The player aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub throttle: f32,
    /// Ticks until the next shot is accepted.
    pub shot_cooldown: u32,
    /// Whether the most recent shot was steered by auto-aim.
    pub aim_locked: bool,
    pub rear_view: bool,
}

impl PlayerState {
    pub fn new(config: &FlightConfig) -> Self {
        Self {
            position: config.start_position,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            throttle: config.initial_throttle,
            shot_cooldown: 0,
            aim_locked: false,
            rear_view: false,
        }
    }

    /// Linear speed per tick derived from throttle.
    pub fn speed(&self, config: &FlightConfig) -> f32 {
        config.min_speed + self.throttle * (config.max_speed - config.min_speed)
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll)
    }

    /// Unit nose direction. Yaw 0 faces -z.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Where the pilot is looking: the nose, or the tail in rear view.
    pub fn view_direction(&self) -> Vec3 {
        if self.rear_view {
            -self.forward()
        } else {
            self.forward()
        }
    }

    /// Horizontal heading ignoring pitch and roll.
    pub fn heading(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn auto_aim_active(&self, hold_ticks: u32) -> bool {
        self.aim_locked && self.shot_cooldown > hold_ticks
    }
}

/// What an enemy is doing this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorPhase {
    /// Formation glyph bobbing in place until the player comes close.
    Dormant,
    Active,
    Hiding,
    Evading,
}

/// A building an enemy is sheltering behind and the seconds left there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HideTarget {
    pub building: usize,
    pub remaining: f32,
}

/// Cosmetic escalation applied once per enemy from the current wave number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveIntensity {
    pub wave: u32,
    /// 0..=1, reaching 1 at the configured full wave.
    pub level: f32,
    pub scale: f32,
    pub glow: f32,
    pub aura: bool,
    pub particles: bool,
}

impl WaveIntensity {
    pub fn for_wave(wave: u32, full_wave: f32) -> Self {
        let level = (wave as f32 / full_wave).min(1.0);
        Self {
            wave,
            level,
            scale: 1.0 + level * 0.3,
            glow: if wave >= 3 { level * 0.3 } else { 0.0 },
            aura: wave >= 3,
            particles: wave >= 4,
        }
    }
}

/// A hostile aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub archetype: Archetype,
    /// The formation glyph this enemy was shaped as, if any.
    pub glyph: Option<char>,
    pub health: u32,
    pub phase: BehaviorPhase,
    pub position: Vec3,
    /// Resting altitude for the dormant bob.
    pub base_altitude: f32,
    pub bob_phase: f32,
    pub fly_angle: f32,
    /// Seconds until the next shot.
    pub shot_timer: f32,
    pub hide: Option<HideTarget>,
    /// Seconds until a hide attempt is allowed.
    pub hide_cooldown: f32,
    pub yaw: f32,
    pub pitch: f32,
    intensity: Option<WaveIntensity>,
}

impl Enemy {
    /// An active enemy at `position` with full health for its source.
    pub fn new(id: EntityId, archetype: Archetype, health: u32, position: Vec3) -> Self {
        Self {
            id,
            archetype,
            glyph: None,
            health,
            phase: BehaviorPhase::Active,
            position,
            base_altitude: position.y,
            bob_phase: 0.0,
            fly_angle: 0.0,
            shot_timer: 0.0,
            hide: None,
            hide_cooldown: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            intensity: None,
        }
    }

    pub fn is_dormant(&self) -> bool {
        self.phase == BehaviorPhase::Dormant
    }

    pub fn intensity(&self) -> Option<&WaveIntensity> {
        self.intensity.as_ref()
    }

    /// Apply wave intensity once. Returns false if already applied.
    pub fn apply_wave_intensity(&mut self, wave: u32, full_wave: f32) -> bool {
        if self.intensity.is_some() {
            return false;
        }
        self.intensity = Some(WaveIntensity::for_wave(wave, full_wave));
        true
    }

    /// Remove one health point. Returns true when this hit destroyed it.
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub side: Side,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Ticks left before expiry.
    pub life: u32,
}

impl Bullet {
    pub fn new(side: Side, position: Vec3, direction: Vec3, speed: f32, life: u32) -> Self {
        Self {
            side,
            position,
            velocity: direction * speed,
            life,
        }
    }
}

/// Health pickup dropped by destroyed enemies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoveryItem {
    pub position: Vec3,
    pub heading: f32,
    pub spin_rate: f32,
    pub float_phase: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_archetypes() {
        assert_eq!(Archetype::from_glyph('2'), Archetype::Boss);
        assert_eq!(Archetype::from_glyph('0'), Archetype::Boss);
        assert_eq!(Archetype::from_glyph('H'), Archetype::Tank);
        assert_eq!(Archetype::from_glyph('R'), Archetype::Tank);
        assert_eq!(Archetype::from_glyph('A'), Archetype::Hunter);
        assert_eq!(Archetype::from_glyph('今'), Archetype::Hunter);
    }

    #[test]
    fn speed_follows_throttle() {
        let config = FlightConfig::default();
        let mut player = PlayerState::new(&config);
        player.throttle = 0.0;
        assert!((player.speed(&config) - 0.3).abs() < 1e-6);
        player.throttle = 1.0;
        assert!((player.speed(&config) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn yaw_zero_faces_negative_z() {
        let player = PlayerState::new(&FlightConfig::default());
        let forward = player.forward();
        assert!(forward.abs_diff_eq(Vec3::NEG_Z, 1e-6), "{forward}");
        assert!(player.heading().abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn rear_view_flips_view_direction() {
        let mut player = PlayerState::new(&FlightConfig::default());
        player.rear_view = true;
        assert!(player.view_direction().abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn positive_pitch_climbs() {
        let mut player = PlayerState::new(&FlightConfig::default());
        player.pitch = 0.5;
        assert!(player.forward().y > 0.0);
    }

    #[test]
    fn intensity_scales_with_wave() {
        let early = WaveIntensity::for_wave(1, 5.0);
        assert!(!early.aura && !early.particles);
        assert_eq!(early.glow, 0.0);

        let late = WaveIntensity::for_wave(9, 5.0);
        assert_eq!(late.level, 1.0);
        assert!((late.scale - 1.3).abs() < 1e-6);
        assert!(late.aura && late.particles);
    }

    #[test]
    fn intensity_applies_once() {
        let mut enemy = Enemy::new(EntityId(1), Archetype::Drone, 1, Vec3::ZERO);
        assert!(enemy.apply_wave_intensity(2, 5.0));
        assert!(!enemy.apply_wave_intensity(7, 5.0));
        assert_eq!(enemy.intensity().unwrap().wave, 2);
    }

    #[test]
    fn hits_saturate_at_zero() {
        let mut enemy = Enemy::new(EntityId(1), Archetype::Hunter, 2, Vec3::ZERO);
        assert!(!enemy.take_hit());
        assert!(enemy.take_hit());
        assert!(enemy.take_hit());
        assert_eq!(enemy.health, 0);
    }
}
