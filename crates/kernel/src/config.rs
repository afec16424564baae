use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyraid_common::RandomSource;

use crate::error::ConfigError;

/// Inclusive-exclusive `[min, max)` range of a tunable drawn at random.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut dyn RandomSource) -> f32 {
        rng.range(self.min, self.max)
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// All simulation tunables.
///
/// Every section has a `Default` carrying the tuned values, and partial
/// config files only override what they name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated seconds per tick. Timers (shots, hiding) count down by this.
    pub tick_seconds: f32,
    /// Starting lives and the heal cap.
    pub max_lives: u32,
    pub flight: FlightConfig,
    pub weapons: WeaponConfig,
    pub enemies: EnemyConfig,
    pub pickups: PickupConfig,
    pub waves: WaveConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_seconds: 0.016,
            max_lives: 100,
            flight: FlightConfig::default(),
            weapons: WeaponConfig::default(),
            enemies: EnemyConfig::default(),
            pickups: PickupConfig::default(),
            waves: WaveConfig::default(),
        }
    }
}

impl SimConfig {
    /// Reject tunables the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tick_seconds", self.tick_seconds)?;
        if !(1..=100).contains(&self.max_lives) {
            return Err(ConfigError::LivesOutOfRange(self.max_lives));
        }

        let f = &self.flight;
        if f.min_speed > f.max_speed {
            return Err(ConfigError::InvertedRange {
                field: "flight.speed",
                min: f.min_speed,
                max: f.max_speed,
            });
        }
        if f.min_throttle > f.max_throttle {
            return Err(ConfigError::InvertedRange {
                field: "flight.throttle",
                min: f.min_throttle,
                max: f.max_throttle,
            });
        }
        positive("flight.boundary", f.boundary)?;
        positive("flight.pitch_limit", f.pitch_limit)?;

        let w = &self.weapons;
        positive("weapons.player_bullet_speed", w.player_bullet_speed)?;
        positive("weapons.enemy_bullet_speed", w.enemy_bullet_speed)?;
        if w.volume_floor > w.volume_ceiling {
            return Err(ConfigError::InvertedRange {
                field: "weapons.volume",
                min: w.volume_floor,
                max: w.volume_ceiling,
            });
        }

        let e = &self.enemies;
        probability("enemies.hide_chance", e.hide_chance)?;
        e.hide_duration.check("enemies.hide_duration")?;
        e.hide_cooldown.check("enemies.hide_cooldown")?;
        e.formation_shot_delay.check("enemies.formation_shot_delay")?;
        positive("enemies.intensity_full_wave", e.intensity_full_wave)?;

        let p = &self.pickups;
        probability("pickups.drop_chance", p.drop_chance)?;
        probability("pickups.boss_drop_chance", p.boss_drop_chance)?;
        p.spin.check("pickups.spin")?;

        let v = &self.waves;
        positive("waves.spawn_interval_seconds", v.spawn_interval_seconds)?;
        probability("waves.boss_chance", v.boss_chance)?;
        probability("waves.tank_chance", v.tank_chance)?;
        probability("waves.hunter_chance", v.hunter_chance)?;
        v.spawn_distance.check("waves.spawn_distance")?;
        v.spawn_altitude.check("waves.spawn_altitude")?;
        v.shot_delay.check("waves.shot_delay")?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::NotAProbability { field, value })
    }
}

/// Player flight model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub start_position: Vec3,
    pub initial_throttle: f32,
    pub min_throttle: f32,
    pub max_throttle: f32,
    /// Throttle change per tick while boost or brake is held.
    pub throttle_step: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Radians per tick at full stick.
    pub pitch_rate: f32,
    pub yaw_rate: f32,
    pub roll_rate: f32,
    pub max_roll: f32,
    /// Roll multiplier per tick when not turning.
    pub roll_decay: f32,
    pub pitch_limit: f32,
    /// Crash when below ground level plus this.
    pub crash_altitude: f32,
    /// Horizontal safety margin around building footprints.
    pub building_margin: f32,
    /// Vertical clearance needed above a roof.
    pub building_clearance: f32,
    pub ceiling: f32,
    pub ceiling_pitch_damping: f32,
    /// Half-extent of the toroidal horizontal world.
    pub boundary: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(0.0, 150.0, 300.0),
            initial_throttle: 0.25,
            min_throttle: 0.1,
            max_throttle: 1.0,
            throttle_step: 0.02,
            min_speed: 0.3,
            max_speed: 2.0,
            pitch_rate: 0.03,
            yaw_rate: 0.02,
            roll_rate: 0.04,
            max_roll: 0.5,
            roll_decay: 0.9,
            pitch_limit: std::f32::consts::FRAC_PI_3,
            crash_altitude: 5.0,
            building_margin: 3.0,
            building_clearance: 5.0,
            ceiling: 400.0,
            ceiling_pitch_damping: 0.9,
            boundary: 400.0,
        }
    }
}

/// Bullets, auto-aim and damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub fire_cooldown_ticks: u32,
    /// The auto-aim indicator stays lit while the cooldown is above this.
    pub auto_aim_hold_ticks: u32,
    pub player_bullet_speed: f32,
    pub player_bullet_life: u32,
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_life: u32,
    pub player_hit_radius: f32,
    pub enemy_hit_damage: u32,
    pub volume_floor: f32,
    pub volume_ceiling: f32,
    pub aim_range: f32,
    /// Minimum cosine between view direction and target (0.5 = 60° half-cone).
    pub aim_min_alignment: f32,
    pub aim_alignment_weight: f32,
    pub aim_distance_weight: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            fire_cooldown_ticks: 6,
            auto_aim_hold_ticks: 3,
            player_bullet_speed: 4.0,
            player_bullet_life: 150,
            enemy_bullet_speed: 1.2,
            enemy_bullet_life: 200,
            player_hit_radius: 3.0,
            enemy_hit_damage: 10,
            volume_floor: -100.0,
            volume_ceiling: 400.0,
            aim_range: 200.0,
            aim_min_alignment: 0.5,
            aim_alignment_weight: 100.0,
            aim_distance_weight: 0.3,
        }
    }
}

/// Enemy behaviour tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub activation_distance: f32,
    /// Inside this distance enemies circle instead of closing in.
    pub close_distance: f32,
    pub firing_range: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub fly_angle_step: f32,
    pub wobble_x: f32,
    pub wobble_y: f32,
    pub wobble_y_frequency: f32,
    /// Vertical share of the approach vector.
    pub climb_factor: f32,
    pub hide_chance: f32,
    pub hide_search_radius: f32,
    pub hide_offset: f32,
    pub hide_altitude_ratio: f32,
    pub hide_altitude_cap: f32,
    pub hide_easing: f32,
    pub hide_duration: Span,
    pub hide_cooldown: Span,
    pub evade_range: f32,
    /// Dot product below which an enemy counts as behind the player.
    pub behind_threshold: f32,
    /// Wave at which intensity and evasion reach their maximum.
    pub intensity_full_wave: f32,
    pub formation_shot_delay: Span,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            activation_distance: 100.0,
            close_distance: 30.0,
            firing_range: 150.0,
            bob_amplitude: 2.0,
            bob_frequency: 2.0,
            fly_angle_step: 0.02,
            wobble_x: 0.3,
            wobble_y: 0.2,
            wobble_y_frequency: 0.7,
            climb_factor: 0.5,
            hide_chance: 0.002,
            hide_search_radius: 100.0,
            hide_offset: 25.0,
            hide_altitude_ratio: 0.7,
            hide_altitude_cap: 80.0,
            hide_easing: 0.03,
            hide_duration: Span::new(2.0, 5.0),
            hide_cooldown: Span::new(5.0, 10.0),
            evade_range: 100.0,
            behind_threshold: -0.3,
            intensity_full_wave: 5.0,
            formation_shot_delay: Span::new(2.0, 5.0),
        }
    }
}

/// Recovery item drops and pickup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    pub drop_chance: f32,
    pub boss_drop_chance: f32,
    pub pickup_radius: f32,
    pub heal: u32,
    pub min_altitude: f32,
    /// Heading change per tick.
    pub spin: Span,
    pub float_amplitude: f32,
    pub float_frequency: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            drop_chance: 0.2,
            boss_drop_chance: 0.5,
            pickup_radius: 10.0,
            heal: 25,
            min_altitude: 30.0,
            spin: Span::new(0.02, 0.04),
            float_amplitude: 0.05,
            float_frequency: 3.0,
        }
    }
}

/// Procedural wave sizing, gating and placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub base_size: u32,
    pub size_per_wave: u32,
    pub spawn_interval_seconds: f32,
    pub boss_min_wave: u32,
    pub boss_chance: f32,
    pub tank_min_wave: u32,
    pub tank_chance: f32,
    pub hunter_min_wave: u32,
    pub hunter_chance: f32,
    /// Distance from the world origin.
    pub spawn_distance: Span,
    pub spawn_altitude: Span,
    pub shot_delay: Span,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_size: 5,
            size_per_wave: 2,
            spawn_interval_seconds: 0.5,
            boss_min_wave: 5,
            boss_chance: 0.08,
            tank_min_wave: 3,
            tank_chance: 0.2,
            hunter_min_wave: 2,
            hunter_chance: 0.45,
            spawn_distance: Span::new(150.0, 250.0),
            spawn_altitude: Span::new(20.0, 120.0),
            shot_delay: Span::new(1.0, 3.0),
        }
    }
}

impl WaveConfig {
    /// Inter-spawn delay expressed in whole ticks.
    pub fn spawn_interval_ticks(&self, tick_seconds: f32) -> u64 {
        (self.spawn_interval_seconds / tick_seconds).round().max(0.0) as u64
    }
}
