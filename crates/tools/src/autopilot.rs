use std::f32::consts::{PI, TAU};

use glam::Vec3;
use skyraid_input::Action;
use skyraid_kernel::{Enemy, Simulation};

/// Scripted pilot for headless runs and soak tests.
///
/// Chases the nearest enemy, holds a safe altitude band, pulls up in front
/// of buildings and checks six when something is on its tail. Emits the
/// same [`Action`]s a keyboard layer would.
#[derive(Debug, Clone)]
pub struct Autopilot {
    pub min_altitude: f32,
    pub max_altitude: f32,
    pub fire_range: f32,
    /// Minimum cosine between view and target before pulling the trigger.
    pub fire_alignment: f32,
    /// Look-ahead distance for building avoidance.
    pub look_ahead: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            min_altitude: 60.0,
            max_altitude: 250.0,
            fire_range: 180.0,
            fire_alignment: 0.8,
            look_ahead: 40.0,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions for the next tick.
    pub fn actions(&self, sim: &Simulation) -> Vec<Action> {
        let player = sim.player();
        let ground = sim.geometry().ground_level();
        let mut actions = Vec::new();

        let target = nearest(sim.enemies(), player.position);
        let mut wanted_altitude = (self.min_altitude + self.max_altitude) / 2.0;

        if let Some(enemy) = target {
            let offset = enemy.position - player.position;
            wanted_altitude = enemy.position.y;

            let wanted_yaw = (-offset.x).atan2(-offset.z);
            let error = wrap_angle(wanted_yaw - player.yaw);
            // Positive turn decreases yaw.
            actions.push(Action::Turn((-error * 2.0).clamp(-1.0, 1.0)));

            let distance = offset.length();
            if distance > 150.0 {
                actions.push(Action::Boost);
            } else if distance < 40.0 {
                actions.push(Action::Brake);
            }

            let direction = offset.normalize_or_zero();
            let behind = player.heading().dot(direction) < -0.5 && distance < 80.0;
            if behind != player.rear_view {
                tracing::trace!(id = %enemy.id, distance, behind, "autopilot switching view");
                actions.push(Action::ToggleRearView);
            }
            let view = if behind { -player.forward() } else { player.forward() };
            if distance < self.fire_range && view.dot(direction) > self.fire_alignment {
                actions.push(Action::Fire);
            }
        } else if player.rear_view {
            actions.push(Action::ToggleRearView);
        }

        let ahead = player.position + player.heading() * self.look_ahead;
        let blocked = sim.geometry().obstructing(ahead, 6.0, 20.0).is_some();
        let altitude = ground
            + if blocked {
                self.max_altitude
            } else {
                wanted_altitude.clamp(self.min_altitude, self.max_altitude)
            };
        let wanted_pitch = ((altitude - player.position.y) * 0.01).clamp(-0.4, 0.4);
        actions.push(Action::Pitch(((wanted_pitch - player.pitch) * 5.0).clamp(-1.0, 1.0)));
        actions
    }
}

fn nearest(enemies: &[Enemy], from: Vec3) -> Option<&Enemy> {
    enemies
        .iter()
        .min_by(|a, b| a.position.distance(from).total_cmp(&b.position.distance(from)))
}

/// Normalise to `[-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    let a = (angle + PI).rem_euclid(TAU) - PI;
    if a < -PI { a + TAU } else { a }
}

#[cfg(test)]
mod tests {
    use skyraid_common::{Building, WorldGeometry};
    use skyraid_input::InputState;
    use skyraid_kernel::{GameOverCause, SimConfig};

    use super::*;

    fn fly(sim: &mut Simulation, ticks: u32) {
        let pilot = Autopilot::new();
        let mut input = InputState::new();
        for _ in 0..ticks {
            let control = input.snapshot(&pilot.actions(sim));
            sim.step(&control);
            assert_eq!(sim.player().rear_view, input.rear_view());
            if sim.is_over() {
                break;
            }
        }
    }

    #[test]
    fn wrap_angle_range() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert_eq!(wrap_angle(0.5), 0.5);
    }

    #[test]
    fn chases_formation_ahead() {
        let mut sim =
            Simulation::with_seed(SimConfig::default(), WorldGeometry::flat(0.0), 4).unwrap();
        sim.step(&Default::default());
        let actions = Autopilot::new().actions(&sim);
        assert!(actions.contains(&Action::Boost));
        assert!(!actions.contains(&Action::Fire));
        assert!(!actions.contains(&Action::ToggleRearView));
    }

    #[test]
    fn never_crashes_on_open_terrain() {
        let mut sim =
            Simulation::with_seed(SimConfig::default(), WorldGeometry::flat(0.0), 21).unwrap();
        fly(&mut sim, 3_000);
        assert_ne!(sim.state().cause(), Some(GameOverCause::Crashed));
        assert!(sim.player().position.y > 5.0);
    }

    #[test]
    fn climbs_over_buildings() {
        let geometry =
            WorldGeometry::new(0.0, vec![Building::new(0.0, 200.0, 60.0, 20.0, 150.0)]).unwrap();
        let mut sim = Simulation::with_seed(SimConfig::default(), geometry, 9).unwrap();
        fly(&mut sim, 300);
        assert_ne!(sim.state().cause(), Some(GameOverCause::Crashed));
    }
}
