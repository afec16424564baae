use skyraid_common::{Building, GeometryError, WorldGeometry};

/// A small grid of city blocks used when no geometry file is given.
///
/// Rooftops stay below the start altitude and the start corridor along
/// x = 0 is left open.
pub fn city() -> Result<WorldGeometry, GeometryError> {
    let mut buildings = Vec::new();
    for i in -3i32..=3 {
        for j in -3i32..=3 {
            if i == 0 {
                continue;
            }
            let height = 40.0 + ((i * 37 + j * 53).rem_euclid(90)) as f32;
            let width = 20.0 + (i + j).rem_euclid(3) as f32 * 8.0;
            buildings.push(Building::new(
                i as f32 * 100.0,
                j as f32 * 100.0,
                width,
                width,
                height,
            ));
        }
    }
    WorldGeometry::new(0.0, buildings)
}
