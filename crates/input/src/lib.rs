//! Control input: the normalized per-tick snapshot the simulation consumes.
//!
//! # Invariants
//! - The simulation never sees raw device events, only [`ControlInput`].
//! - Axis values are clamped to `[-1, 1]` before they reach the core.
//! - Rear view is a latched mode, toggled by [`Action::ToggleRearView`].

pub mod action;
pub mod control;

pub use action::{Action, InputState};
pub use control::ControlInput;

pub fn crate_info() -> &'static str {
    "skyraid-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
