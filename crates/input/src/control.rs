use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One tick worth of pilot intent.
///
/// `pitch` and `turn` are stick axes in `[-1, 1]` (positive pitch = nose up,
/// positive turn = bank right). `throttle` only matters by sign: positive
/// boosts, negative brakes. `look` carries direct orientation deltas in
/// radians (x = yaw, y = pitch) from pointer-style devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub pitch: f32,
    pub turn: f32,
    pub throttle: f32,
    pub look: Vec2,
    pub fire: bool,
    pub rear_view: bool,
}

impl ControlInput {
    /// Hands off the stick: level flight, no fire, forward view.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Copy with stick axes clamped to `[-1, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            pitch: self.pitch.clamp(-1.0, 1.0),
            turn: self.turn.clamp(-1.0, 1.0),
            throttle: self.throttle.clamp(-1.0, 1.0),
            ..self
        }
    }

    pub fn is_turning(&self) -> bool {
        self.turn != 0.0
    }

    pub fn boosting(&self) -> bool {
        self.throttle > 0.0
    }

    pub fn braking(&self) -> bool {
        self.throttle < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_is_neutral() {
        let c = ControlInput::idle();
        assert!(!c.fire);
        assert!(!c.rear_view);
        assert!(!c.is_turning());
        assert!(!c.boosting() && !c.braking());
    }

    #[test]
    fn clamped_limits_axes() {
        let c = ControlInput {
            pitch: 3.0,
            turn: -2.0,
            throttle: 0.5,
            ..ControlInput::default()
        }
        .clamped();
        assert_eq!(c.pitch, 1.0);
        assert_eq!(c.turn, -1.0);
        assert_eq!(c.throttle, 0.5);
    }
}
