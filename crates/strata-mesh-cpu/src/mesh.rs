use strata_geom::{Aabb, Vec2, Vec3};
use strata_terrain::HeightField;

/// One grid node ready for emission.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    pub uv: Vec2,
}

/// Row-major vertex buffer with one vertex per heightfield node.
///
/// Texture coordinates span `[0, 1]` across the grid: `u = col / (cols - 1)`,
/// `v = row / (rows - 1)`. A single-node axis maps to `0`.
#[derive(Clone, Debug, Default)]
pub struct TerrainMesh {
    num_rows: usize,
    num_cols: usize,
    vertices: Vec<Vertex>,
}

impl TerrainMesh {
    pub fn build(field: &HeightField) -> Self {
        let rows = field.num_rows();
        let cols = field.num_cols();
        if field.is_empty() {
            return Self::default();
        }
        let du = if cols > 1 { 1.0 / (cols - 1) as f32 } else { 0.0 };
        let dv = if rows > 1 { 1.0 / (rows - 1) as f32 } else { 0.0 };
        let mut vertices = Vec::with_capacity(rows * cols);
        for (i, &h) in field.samples().iter().enumerate() {
            let (row, col) = (i / cols, i % cols);
            vertices.push(Vertex {
                pos: Vec3::new(
                    field.origin_x() + col as f32 * field.cell_size_x(),
                    h,
                    field.origin_z() + row as f32 * field.cell_size_z(),
                ),
                uv: Vec2::new(col as f32 * du, row as f32 * dv),
            });
        }
        log::debug!("terrain mesh built: {} vertices ({}x{})", vertices.len(), cols, rows);
        Self {
            num_rows: rows,
            num_cols: cols,
            vertices,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Vertex at grid node `(row, col)`.
    ///
    /// Panics when the node is outside the grid; emitters derive their loop bounds from the
    /// grid dimensions so they never ask for one.
    #[inline]
    pub fn vertex(&self, row: usize, col: usize) -> &Vertex {
        debug_assert!(row < self.num_rows && col < self.num_cols);
        &self.vertices[row * self.num_cols + col]
    }

    /// Triangles covering the grid when every cell is split in two.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        2 * self.num_rows.saturating_sub(1) * self.num_cols.saturating_sub(1)
    }

    pub fn bounds(&self) -> Option<Aabb> {
        let first = self.vertices.first()?.pos;
        let (min, max) = self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (
                Vec3::new(lo.x.min(v.pos.x), lo.y.min(v.pos.y), lo.z.min(v.pos.z)),
                Vec3::new(hi.x.max(v.pos.x), hi.y.max(v.pos.y), hi.z.max(v.pos.z)),
            )
        });
        Some(Aabb::new(min, max))
    }
}
