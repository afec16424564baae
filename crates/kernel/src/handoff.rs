//! Read-only views handed to the presentation layer and the leaderboard.

use std::fmt;

use serde::{Deserialize, Serialize};
use skyraid_common::SessionId;

use crate::state::GamePhase;

/// Per-tick HUD values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub tick: u64,
    pub score: u64,
    pub lives: u32,
    pub wave: u32,
    pub live_enemies: usize,
    /// Throttle as a whole percentage.
    pub speed_percent: u32,
    pub altitude: f32,
    pub rear_view: bool,
    pub auto_aim: bool,
    pub phase: GamePhase,
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {} | score {} | lives {} | wave {} | enemies {} | speed {}% | alt {:.0}",
            self.tick,
            self.score,
            self.lives,
            self.wave,
            self.live_enemies,
            self.speed_percent,
            self.altitude
        )?;
        if self.rear_view {
            f.write_str(" | REAR")?;
        }
        if self.auto_aim {
            f.write_str(" | LOCK")?;
        }
        Ok(())
    }
}

/// Final result submitted to the external score service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub session: SessionId,
    pub score: u64,
    pub wave: u32,
}

impl ScoreSubmission {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
