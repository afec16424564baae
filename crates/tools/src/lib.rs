//! Developer tooling: simulation inspector and a scripted autopilot for
//! headless runs.
//!
//! # Invariants
//! - Tools only read simulation state; input goes through [`skyraid_input::Action`]s.

pub mod autopilot;
pub mod inspector;

pub use autopilot::Autopilot;
pub use inspector::{EnemyInfo, SimInspector, SimSummary};

pub fn crate_info() -> &'static str {
    "skyraid-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
