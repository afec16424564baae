use crate::control::ControlInput;
use glam::Vec2;

/// A discrete pilot action produced by any device layer (keyboard, touch,
/// gamepad, autopilot).
///
/// Device layers emit actions; [`InputState`] folds them into the
/// [`ControlInput`] snapshot the simulation consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Stick pitch axis for this tick.
    Pitch(f32),
    /// Stick turn axis for this tick.
    Turn(f32),
    /// Direct orientation delta in radians (x = yaw, y = pitch).
    Look(Vec2),
    /// Throttle up while held.
    Boost,
    /// Throttle down while held.
    Brake,
    /// Trigger held.
    Fire,
    /// Flip between forward and rear view.
    ToggleRearView,
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

/// Latched input state carried across ticks.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    rear_view: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rear_view(&self) -> bool {
        self.rear_view
    }

    /// Fold this tick's actions into a control snapshot.
    ///
    /// Axis actions accumulate and are clamped; boost and brake held together
    /// cancel out.
    pub fn snapshot(&mut self, actions: &[Action]) -> ControlInput {
        let mut input = ControlInput::idle();
        for action in actions {
            match *action {
                Action::Pitch(v) => input.pitch += v,
                Action::Turn(v) => input.turn += v,
                Action::Look(delta) => input.look += delta,
                Action::Boost => input.throttle += 1.0,
                Action::Brake => input.throttle -= 1.0,
                Action::Fire => input.fire = true,
                Action::ToggleRearView => {
                    self.rear_view = !self.rear_view;
                    tracing::debug!(rear_view = self.rear_view, "view toggled");
                }
                Action::Noop => {}
            }
        }
        input.rear_view = self.rear_view;
        input.clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_actions_give_idle_snapshot() {
        let mut state = InputState::new();
        assert_eq!(state.snapshot(&[]), ControlInput::idle());
    }

    #[test]
    fn axes_accumulate_and_clamp() {
        let mut state = InputState::new();
        let c = state.snapshot(&[Action::Pitch(0.8), Action::Pitch(0.8), Action::Turn(-0.5)]);
        assert_eq!(c.pitch, 1.0);
        assert_eq!(c.turn, -0.5);
    }

    #[test]
    fn boost_and_brake_cancel() {
        let mut state = InputState::new();
        let c = state.snapshot(&[Action::Boost, Action::Brake]);
        assert!(!c.boosting());
        assert!(!c.braking());
    }

    #[test]
    fn rear_view_toggle_latches() {
        let mut state = InputState::new();
        assert!(state.snapshot(&[Action::ToggleRearView]).rear_view);
        assert!(state.rear_view());
        assert!(state.snapshot(&[Action::Fire]).rear_view);
        assert!(!state.snapshot(&[Action::ToggleRearView]).rear_view);
        assert!(!state.rear_view());
    }

    #[test]
    fn fire_and_look_pass_through() {
        let mut state = InputState::new();
        let look = Action::Look(Vec2::new(0.01, -0.02));
        let c = state.snapshot(&[Action::Fire, look, Action::Noop]);
        assert!(c.fire);
        assert_eq!(c.look, Vec2::new(0.01, -0.02));
    }
}
