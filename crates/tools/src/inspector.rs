use skyraid_common::EntityId;
use skyraid_kernel::{Archetype, BehaviorPhase, Simulation};

/// Read-only queries against a running simulation for debugging and
/// headless reports.
pub struct SimInspector;

impl SimInspector {
    /// Produce a summary of the simulation state.
    pub fn summary(sim: &Simulation) -> SimSummary {
        let state = sim.state();
        SimSummary {
            tick: sim.tick(),
            elapsed_secs: sim.tick() as f32 * sim.config().tick_seconds,
            score: state.score(),
            lives: state.lives(),
            max_lives: state.max_lives(),
            wave: state.wave(),
            enemies: sim.enemies().len(),
            dormant: sim.enemies().iter().filter(|e| e.is_dormant()).count(),
            pending: state.pending(),
            queued_spawns: sim.director().queued().len(),
            bullets: sim.bullets().len(),
            items: sim.items().len(),
        }
    }

    pub fn inspect_enemy(sim: &Simulation, id: EntityId) -> Option<EnemyInfo> {
        sim.enemies().iter().find(|e| e.id == id).map(|e| EnemyInfo {
            id: e.id,
            archetype: e.archetype,
            glyph: e.glyph,
            phase: e.phase,
            health: e.health,
            position: e.position.to_array(),
            distance: e.position.distance(sim.player().position),
        })
    }

    /// Enemy ids in spawn order.
    pub fn list_enemies(sim: &Simulation) -> Vec<EntityId> {
        sim.enemies().iter().map(|e| e.id).collect()
    }

    /// Live enemy count per archetype.
    pub fn archetype_counts(sim: &Simulation) -> Vec<(Archetype, usize)> {
        Archetype::ALL
            .iter()
            .map(|&a| (a, sim.enemies().iter().filter(|e| e.archetype == a).count()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimSummary {
    pub tick: u64,
    pub elapsed_secs: f32,
    pub score: u64,
    pub lives: u32,
    pub max_lives: u32,
    pub wave: u32,
    pub enemies: usize,
    pub dormant: usize,
    pub pending: u32,
    pub queued_spawns: usize,
    pub bullets: usize,
    pub items: usize,
}

impl std::fmt::Display for SimSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sim: tick={} ({:.1}s) score={} lives={}/{} wave={}",
            self.tick, self.elapsed_secs, self.score, self.lives, self.max_lives, self.wave
        )?;
        write!(
            f,
            " enemies={} (dormant={}) pending={} queued={} bullets={} items={}",
            self.enemies,
            self.dormant,
            self.pending,
            self.queued_spawns,
            self.bullets,
            self.items
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyInfo {
    pub id: EntityId,
    pub archetype: Archetype,
    pub glyph: Option<char>,
    pub phase: BehaviorPhase,
    pub health: u32,
    pub position: [f32; 3],
    /// Distance to the player.
    pub distance: f32,
}

impl std::fmt::Display for EnemyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enemy {} {}", self.id, self.archetype)?;
        if let Some(glyph) = self.glyph {
            write!(f, " '{glyph}'")?;
        }
        let [x, y, z] = self.position;
        write!(
            f,
            " {:?} hp={} pos=({x:.2}, {y:.2}, {z:.2}) dist={:.1}",
            self.phase, self.health, self.distance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyraid_common::WorldGeometry;
    use skyraid_input::ControlInput;
    use skyraid_kernel::{SimConfig, WaveDirector};

    fn sim() -> Simulation {
        Simulation::with_seed(SimConfig::default(), WorldGeometry::flat(0.0), 42).unwrap()
    }

    #[test]
    fn summary_fresh_simulation() {
        let sim = sim();
        let summary = SimInspector::summary(&sim);
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.enemies, 0);
        assert_eq!(summary.lives, 100);
    }

    #[test]
    fn summary_after_formation() {
        let mut sim = sim();
        sim.step(&ControlInput::idle());
        let summary = SimInspector::summary(&sim);
        assert_eq!(summary.tick, 1);
        assert!((summary.elapsed_secs - 0.016).abs() < 1e-6);
        assert_eq!(summary.enemies, 29);
        assert_eq!(summary.dormant, 29);
        assert_eq!(summary.pending, 29);
    }

    #[test]
    fn inspect_enemy_found() {
        let mut sim = sim();
        sim.step(&ControlInput::idle());
        let id = SimInspector::list_enemies(&sim)[0];
        let info = SimInspector::inspect_enemy(&sim, id).unwrap();
        assert_eq!(info.glyph, Some('H'));
        assert_eq!(info.archetype, Archetype::Tank);
        assert_eq!(info.phase, BehaviorPhase::Dormant);
        assert!(info.to_string().contains("'H'"));
    }

    #[test]
    fn inspect_enemy_not_found() {
        let sim = sim();
        assert!(SimInspector::inspect_enemy(&sim, EntityId(999)).is_none());
    }

    #[test]
    fn archetype_counts_cover_queue_release() {
        let mut sim = sim().with_director(WaveDirector::without_formation());
        sim.step(&ControlInput::idle());
        assert_eq!(SimInspector::summary(&sim).queued_spawns, 7);
        sim.step(&ControlInput::idle());
        let total: usize = SimInspector::archetype_counts(&sim).iter().map(|(_, n)| n).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn summary_display() {
        let sim = sim();
        let s = format!("{}", SimInspector::summary(&sim));
        assert!(s.contains("tick=0 (0.0s)"));
        assert!(s.contains("lives=100/100"));
    }
}
