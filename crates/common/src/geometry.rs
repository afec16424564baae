//! Static world obstacles.
//!
//! Buildings are axis-aligned boxes standing on the ground plane. The world
//! generator owns their creation; the simulation only queries them.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Errors from building or loading world geometry.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("building {index} has a non-positive extent")]
    InvalidBuilding { index: usize },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An axis-aligned building footprint on the horizontal (x, z) plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub x: f32,
    pub z: f32,
    pub half_width: f32,
    pub half_depth: f32,
    pub height: f32,
}

impl Building {
    /// Build from full width/depth extents.
    pub fn new(x: f32, z: f32, width: f32, depth: f32, height: f32) -> Self {
        Self {
            x,
            z,
            half_width: width / 2.0,
            half_depth: depth / 2.0,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    /// Strict containment of `(x, z)` in the footprint grown by `margin` on every side.
    pub fn contains_xz(&self, x: f32, z: f32, margin: f32) -> bool {
        x > self.x - self.half_width - margin
            && x < self.x + self.half_width + margin
            && z > self.z - self.half_depth - margin
            && z < self.z + self.half_depth + margin
    }

    fn is_valid(&self) -> bool {
        self.half_width > 0.0 && self.half_depth > 0.0 && self.height > 0.0
    }
}

#[derive(Deserialize)]
struct GeometryFile {
    #[serde(default)]
    ground_level: f32,
    #[serde(default)]
    buildings: Vec<Building>,
}

/// Read-only view of the static world: ground plane plus buildings.
///
/// Building indices are stable for the lifetime of the geometry, so enemies
/// may hold one as a hide target.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorldGeometry {
    ground_level: f32,
    buildings: Vec<Building>,
}

impl WorldGeometry {
    pub fn new(ground_level: f32, buildings: Vec<Building>) -> Result<Self, GeometryError> {
        if let Some(index) = buildings.iter().position(|b| !b.is_valid()) {
            return Err(GeometryError::InvalidBuilding { index });
        }
        Ok(Self {
            ground_level,
            buildings,
        })
    }

    /// Open terrain with no buildings.
    pub fn flat(ground_level: f32) -> Self {
        Self {
            ground_level,
            buildings: Vec::new(),
        }
    }

    /// Parse `{ "ground_level": f32, "buildings": [...] }`.
    pub fn from_json(json: &str) -> Result<Self, GeometryError> {
        let file: GeometryFile = serde_json::from_str(json)?;
        Self::new(file.ground_level, file.buildings)
    }

    pub fn ground_level(&self) -> f32 {
        self.ground_level
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building(&self, index: usize) -> Option<&Building> {
        self.buildings.get(index)
    }

    /// The building whose solid volume contains `point`, if any.
    ///
    /// Used for projectile occlusion: footprint without margin, strictly above
    /// ground and strictly below the roof.
    pub fn occluding(&self, point: Vec3) -> Option<usize> {
        self.buildings.iter().position(|b| {
            b.contains_xz(point.x, point.z, 0.0)
                && point.y < self.ground_level + b.height
                && point.y > self.ground_level
        })
    }

    /// The building `point` is too close to, using a horizontal `margin` and a
    /// vertical `clearance` above the roof.
    pub fn obstructing(&self, point: Vec3, margin: f32, clearance: f32) -> Option<usize> {
        self.buildings.iter().position(|b| {
            b.contains_xz(point.x, point.z, margin)
                && point.y < self.ground_level + b.height + clearance
        })
    }

    /// Nearest building by horizontal center distance, strictly within `radius`.
    pub fn nearest_within(&self, point: Vec3, radius: f32) -> Option<usize> {
        let here = Vec2::new(point.x, point.z);
        self.buildings
            .iter()
            .enumerate()
            .map(|(i, b)| (i, b.center().distance(here)))
            .filter(|(_, d)| *d < radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tower() -> Building {
        Building::new(0.0, 0.0, 20.0, 10.0, 50.0)
    }

    #[test]
    fn footprint_containment_is_strict() {
        let b = tower();
        assert!(b.contains_xz(9.9, 4.9, 0.0));
        assert!(!b.contains_xz(10.0, 0.0, 0.0));
        assert!(b.contains_xz(12.0, 0.0, 3.0));
    }

    #[test]
    fn occlusion_respects_roof_and_ground() {
        let geo = WorldGeometry::new(0.0, vec![tower()]).unwrap();
        assert_eq!(geo.occluding(Vec3::new(0.0, 25.0, 0.0)), Some(0));
        assert_eq!(geo.occluding(Vec3::new(0.0, 50.5, 0.0)), None);
        assert_eq!(geo.occluding(Vec3::new(0.0, -1.0, 0.0)), None);
        assert_eq!(geo.occluding(Vec3::new(30.0, 25.0, 0.0)), None);
    }

    #[test]
    fn obstruction_includes_clearance() {
        let geo = WorldGeometry::new(0.0, vec![tower()]).unwrap();
        assert_eq!(geo.obstructing(Vec3::new(11.0, 54.0, 0.0), 3.0, 5.0), Some(0));
        assert_eq!(geo.obstructing(Vec3::new(11.0, 56.0, 0.0), 3.0, 5.0), None);
    }

    #[test]
    fn nearest_within_radius() {
        let geo = WorldGeometry::new(
            0.0,
            vec![
                Building::new(50.0, 0.0, 10.0, 10.0, 30.0),
                Building::new(20.0, 0.0, 10.0, 10.0, 30.0),
                Building::new(500.0, 0.0, 10.0, 10.0, 30.0),
            ],
        )
        .unwrap();
        assert_eq!(geo.nearest_within(Vec3::new(0.0, 80.0, 0.0), 100.0), Some(1));
        assert_eq!(geo.nearest_within(Vec3::new(0.0, 80.0, 0.0), 10.0), None);
    }

    #[test]
    fn rejects_degenerate_buildings() {
        let err = WorldGeometry::new(0.0, vec![tower(), Building::new(0.0, 0.0, 0.0, 5.0, 5.0)])
            .unwrap_err();
        assert!(matches!(err, GeometryError::InvalidBuilding { index: 1 }));
    }

    #[test]
    fn loads_from_json() {
        let json = r#"{
            "ground_level": 0.0,
            "buildings": [
                { "x": 10.0, "z": -5.0, "half_width": 4.0, "half_depth": 6.0, "height": 40.0 }
            ]
        }"#;
        let geo = WorldGeometry::from_json(json).unwrap();
        assert_eq!(geo.buildings().len(), 1);
        assert_eq!(geo.building(0).unwrap().height, 40.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            WorldGeometry::from_json("{ not json"),
            Err(GeometryError::Json(_))
        ));
    }
}
