//! Shared types for the skyraid core: entity ids, static world geometry, random sources.
//!
//! # Invariants
//! - World geometry is read-only once handed to the simulation.
//! - Random sources yield draws in `[0, 1)`.

pub mod geometry;
pub mod random;
pub mod types;

pub use geometry::{Building, GeometryError, WorldGeometry};
pub use random::{RandomSource, ScriptedRandom, SplitMix64};
pub use types::{EntityId, SessionId};

pub fn crate_info() -> &'static str {
    "skyraid-common v0.1.0"
}
