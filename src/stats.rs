//! Headless tessellation statistics.
use std::error::Error;

use strata_mesh_cpu::{RecordingBackend, TerrainMesh, Tessellation};
use strata_terrain::HeightFieldLoader;

use crate::config::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrategyStats {
    pub tessellation: Tessellation,
    pub primitives: usize,
    pub emissions: usize,
    pub triangles: usize,
}

pub fn collect(mesh: &TerrainMesh) -> Vec<StrategyStats> {
    let mut rec = RecordingBackend::new();
    Tessellation::ALL
        .iter()
        .map(|&t| {
            rec.clear();
            t.render(mesh, &mut rec);
            StrategyStats {
                tessellation: t,
                primitives: rec.primitives.len(),
                emissions: rec.vertex_emissions(),
                triangles: rec.triangles().len(),
            }
        })
        .collect()
}

pub fn run(cfg: &Config) -> Result<(), Box<dyn Error>> {
    let t = &cfg.terrain;
    let field = HeightFieldLoader::new(t.scale).load(&t.description, t.method)?;
    let mesh = TerrainMesh::build(&field);
    println!(
        "{} x {} nodes, {} triangles in the full grid",
        mesh.num_rows(),
        mesh.num_cols(),
        mesh.triangle_count()
    );
    println!(
        "{:<8} {:>10} {:>10} {:>10}",
        "strategy", "primitives", "vertices", "triangles"
    );
    for s in collect(&mesh) {
        println!(
            "{:<8} {:>10} {:>10} {:>10}",
            s.tessellation.name(),
            s.primitives,
            s.emissions,
            s.triangles
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_terrain::HeightField;

    #[test]
    fn three_by_three_grid() {
        let f = HeightField::from_samples(0.0, 0.0, 1.0, 1.0, 3, 3, vec![0.0; 9]).unwrap();
        let stats = collect(&TerrainMesh::build(&f));
        let by = |t: Tessellation| stats.iter().find(|s| s.tessellation == t).copied().unwrap();
        assert_eq!(by(Tessellation::List).emissions, 24);
        assert_eq!(by(Tessellation::Fan).emissions, 10);
        assert_eq!(by(Tessellation::Strip).emissions, 13);
        assert!(stats.iter().all(|s| s.triangles == 8 && s.primitives == 1));
    }
}
