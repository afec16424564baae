//! The opening letter formation.
//!
//! Each glyph of a greeting becomes one dormant enemy hovering in place.
//! Glyph assets may load asynchronously, so the director polls them every
//! tick until they are ready or have failed.

use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::context::SimContext;
use crate::entities::{Archetype, BehaviorPhase, Enemy};
use crate::events::SimEvent;

/// A line of glyphs centred on x = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationRow {
    pub text: String,
    pub altitude: f32,
    pub depth: f32,
    pub spacing: f32,
}

impl FormationRow {
    pub fn new(text: impl Into<String>, altitude: f32, depth: f32, spacing: f32) -> Self {
        Self {
            text: text.into(),
            altitude,
            depth,
            spacing,
        }
    }
}

/// One glyph and where it hovers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSlot {
    pub glyph: char,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationLayout {
    pub rows: Vec<FormationRow>,
}

impl Default for FormationLayout {
    fn default() -> Self {
        Self::new_year()
    }
}

impl FormationLayout {
    pub fn new_year() -> Self {
        Self {
            rows: vec![
                FormationRow::new("HAPPY NEW YEAR", 200.0, -100.0, 12.0),
                FormationRow::new("2026", 160.0, -100.0, 12.0),
                FormationRow::new("今年もよろしくお願いします", 140.0, -150.0, 10.0),
            ],
        }
    }

    /// Slot positions for every non-space glyph, row by row.
    pub fn slots(&self) -> Vec<GlyphSlot> {
        let mut slots = Vec::new();
        for row in &self.rows {
            let glyphs: Vec<char> = row.text.chars().filter(|c| !c.is_whitespace()).collect();
            let start = -((glyphs.len().saturating_sub(1)) as f32 * row.spacing) / 2.0;
            slots.extend(glyphs.into_iter().enumerate().map(|(i, glyph)| GlyphSlot {
                glyph,
                position: Vec3::new(start + i as f32 * row.spacing, row.altitude, row.depth),
            }));
        }
        slots
    }

    pub fn len(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.text.chars().filter(|c| !c.is_whitespace()).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Progress of the glyph asset load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetPoll {
    Pending,
    Ready,
    Failed(String),
}

/// Source of the glyph shapes the formation enemies wear.
pub trait GlyphAssets {
    fn poll(&mut self) -> AssetPoll;
}

/// Assets already in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preloaded;

impl GlyphAssets for Preloaded {
    fn poll(&mut self) -> AssetPoll {
        AssetPoll::Ready
    }
}

/// Becomes ready after a fixed number of pending polls.
#[derive(Debug, Clone)]
pub struct LoadAfter {
    remaining: u32,
}

impl LoadAfter {
    pub fn new(polls: u32) -> Self {
        Self { remaining: polls }
    }
}

impl GlyphAssets for LoadAfter {
    fn poll(&mut self) -> AssetPoll {
        if self.remaining == 0 {
            return AssetPoll::Ready;
        }
        self.remaining -= 1;
        AssetPoll::Pending
    }
}

/// Always fails with the given reason.
#[derive(Debug, Clone)]
pub struct Unavailable(pub String);

impl GlyphAssets for Unavailable {
    fn poll(&mut self) -> AssetPoll {
        AssetPoll::Failed(self.0.clone())
    }
}

/// Spawn one dormant enemy per glyph and make them the pending set.
pub fn materialize(ctx: &mut SimContext, layout: &FormationLayout) -> usize {
    let slots = layout.slots();
    for slot in &slots {
        let id = ctx.next_id();
        let archetype = Archetype::from_glyph(slot.glyph);
        let mut enemy = Enemy::new(id, archetype, archetype.formation_health(), slot.position);
        enemy.glyph = Some(slot.glyph);
        enemy.phase = BehaviorPhase::Dormant;
        enemy.shot_timer = ctx.config.enemies.formation_shot_delay.sample(&mut *ctx.rng);
        enemy.bob_phase = ctx.rng.range(0.0, TAU);
        enemy.fly_angle = ctx.rng.range(0.0, TAU);
        ctx.enemies.push(enemy);
    }
    let count = slots.len();
    ctx.state.set_pending(count as u32);
    tracing::info!(count, "letter formation materialized");
    ctx.emit(SimEvent::FormationMaterialized { count });
    count
}

#[cfg(test)]
mod tests {
    use skyraid_common::WorldGeometry;

    use super::*;
    use crate::context::test_context;

    #[test]
    fn rows_are_centred_and_skip_spaces() {
        let layout = FormationLayout {
            rows: vec![FormationRow::new("A B", 100.0, -10.0, 12.0)],
        };
        let slots = layout.slots();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].position, Vec3::new(-6.0, 100.0, -10.0));
        assert_eq!(slots[1].position, Vec3::new(6.0, 100.0, -10.0));
    }

    #[test]
    fn new_year_layout_counts() {
        let layout = FormationLayout::new_year();
        // 12 letters + 4 numerals + 13 kana/kanji
        assert_eq!(layout.len(), 29);
        let numerals: Vec<_> = layout
            .slots()
            .into_iter()
            .filter(|s| s.position.y == 160.0)
            .collect();
        assert_eq!(numerals.len(), 4);
        assert_eq!(numerals[0].position.x, -18.0);
    }

    #[test]
    fn materialized_glyphs_are_dormant_and_pending() {
        let mut ctx = test_context(WorldGeometry::flat(0.0), vec![0.5]);
        let count = materialize(&mut ctx, &FormationLayout::new_year());
        assert_eq!(count, 29);
        assert_eq!(ctx.enemies.len(), 29);
        assert_eq!(ctx.state.pending(), 29);
        assert!(ctx.enemies.iter().all(|e| e.is_dormant() && e.intensity().is_none()));

        let bosses = ctx.enemies.iter().filter(|e| e.archetype == Archetype::Boss).count();
        let tanks = ctx.enemies.iter().filter(|e| e.archetype == Archetype::Tank).count();
        assert_eq!(bosses, 4);
        // H, N, Y, R in HAPPY NEW YEAR
        assert_eq!(tanks, 5);
        let boss = ctx.enemies.iter().find(|e| e.glyph == Some('2')).unwrap();
        assert_eq!(boss.health, 20);
        let kana = ctx.enemies.iter().find(|e| e.glyph == Some('今')).unwrap();
        assert_eq!((kana.archetype, kana.health), (Archetype::Hunter, 5));
        assert!((kana.shot_timer - 3.5).abs() < 1e-6);
    }

    #[test]
    fn delayed_assets_report_pending_first() {
        let mut assets = LoadAfter::new(2);
        assert_eq!(assets.poll(), AssetPoll::Pending);
        assert_eq!(assets.poll(), AssetPoll::Pending);
        assert_eq!(assets.poll(), AssetPoll::Ready);
    }
}
