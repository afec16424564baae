//! Auto-aim target selection.
//!
//! Stateless: a fresh selection is made for every shot from the current
//! view direction.

use glam::Vec3;
use skyraid_common::EntityId;

use crate::config::WeaponConfig;
use crate::entities::Enemy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimCandidate {
    pub id: EntityId,
    pub position: Vec3,
    /// Cosine between the view direction and the direction to the enemy.
    pub alignment: f32,
    pub distance: f32,
    pub score: f32,
}

/// Favour alignment; penalise distance.
pub fn aim_score(alignment: f32, distance: f32, cfg: &WeaponConfig) -> f32 {
    alignment * cfg.aim_alignment_weight - distance * cfg.aim_distance_weight
}

/// Highest-scoring candidate inside range and cone. Ties keep the earlier one.
pub fn best<I>(candidates: I, cfg: &WeaponConfig) -> Option<AimCandidate>
where
    I: IntoIterator<Item = AimCandidate>,
{
    candidates
        .into_iter()
        .filter(|c| c.distance <= cfg.aim_range && c.alignment >= cfg.aim_min_alignment)
        .map(|c| AimCandidate {
            score: aim_score(c.alignment, c.distance, cfg),
            ..c
        })
        .fold(None, |best: Option<AimCandidate>, c| match best {
            Some(b) if b.score >= c.score => Some(b),
            _ => Some(c),
        })
}

/// Pick the enemy to steer a shot towards from `origin` looking along `view`.
pub fn select(
    origin: Vec3,
    view: Vec3,
    enemies: &[Enemy],
    cfg: &WeaponConfig,
) -> Option<AimCandidate> {
    let candidates = enemies.iter().filter_map(|enemy| {
        let offset = enemy.position - origin;
        let distance = offset.length();
        let direction = offset.try_normalize()?;
        Some(AimCandidate {
            id: enemy.id,
            position: enemy.position,
            alignment: view.dot(direction),
            distance,
            score: 0.0,
        })
    });
    best(candidates, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Archetype;

    fn candidate(id: u64, alignment: f32, distance: f32) -> AimCandidate {
        AimCandidate {
            id: EntityId(id),
            position: Vec3::ZERO,
            alignment,
            distance,
            score: 0.0,
        }
    }

    #[test]
    fn alignment_outweighs_proximity() {
        let cfg = WeaponConfig::default();
        let chosen = best([candidate(1, 0.98, 50.0), candidate(2, 0.55, 10.0)], &cfg).unwrap();
        assert_eq!(chosen.id, EntityId(1));
        assert!((chosen.score - 83.0).abs() < 1e-3);
        assert!((aim_score(0.55, 10.0, &cfg) - 52.0).abs() < 1e-3);
    }

    #[test]
    fn outside_cone_or_range_is_ignored() {
        let cfg = WeaponConfig::default();
        assert!(best([candidate(1, 0.49, 10.0)], &cfg).is_none());
        assert!(best([candidate(1, 1.0, 200.5)], &cfg).is_none());
        assert!(best([candidate(1, 0.5, 200.0)], &cfg).is_some());
    }

    #[test]
    fn ties_keep_first() {
        let cfg = WeaponConfig::default();
        let chosen = best([candidate(4, 0.9, 20.0), candidate(5, 0.9, 20.0)], &cfg).unwrap();
        assert_eq!(chosen.id, EntityId(4));
    }

    #[test]
    fn selects_from_enemy_positions() {
        let cfg = WeaponConfig::default();
        let ahead = Enemy::new(EntityId(1), Archetype::Drone, 1, Vec3::new(0.0, 0.0, -60.0));
        let behind = Enemy::new(EntityId(2), Archetype::Drone, 1, Vec3::new(0.0, 0.0, 20.0));
        let off_axis = Enemy::new(EntityId(3), Archetype::Drone, 1, Vec3::new(30.0, 0.0, -30.0));
        let enemies = [behind, off_axis, ahead];

        let chosen = select(Vec3::ZERO, Vec3::NEG_Z, &enemies, &cfg).unwrap();
        assert_eq!(chosen.id, EntityId(1));

        let rear = select(Vec3::ZERO, Vec3::Z, &enemies, &cfg).unwrap();
        assert_eq!(rear.id, EntityId(2));
    }

    #[test]
    fn no_enemies_no_target() {
        let cfg = WeaponConfig::default();
        assert!(select(Vec3::ZERO, Vec3::NEG_Z, &[], &cfg).is_none());
    }
}
