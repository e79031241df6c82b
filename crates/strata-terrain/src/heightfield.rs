use strata_geom::{Aabb, Vec3};

/// Grid cell containing a world point plus the point's offset inside that cell.
///
/// `frac_col` runs along +X (columns), `frac_row` along +Z (rows); both lie in `[0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelativePosition {
    pub row: usize,
    pub col: usize,
    pub frac_col: f32,
    pub frac_row: f32,
}

/// The triangle of a cell that a relative position falls into.
///
/// ```text
///  A (row, col)     ------------- B (row, col + 1)
///     |                             |
///  D (row + 1, col) ------------- C (row + 1, col + 1)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellTriangle {
    Abc,
    Acd,
}

impl CellTriangle {
    /// Split along the A–C diagonal; points on the diagonal belong to ACD.
    #[inline]
    pub fn select(frac_col: f32, frac_row: f32) -> Self {
        if frac_col > frac_row {
            CellTriangle::Abc
        } else {
            CellTriangle::Acd
        }
    }
}

/// Regular grid of elevation samples mapped onto the world XZ plane.
///
/// Row `r` sits at `z = origin_z + r * cell_size_z`, column `c` at `x = origin_x + c * cell_size_x`.
/// Samples are stored row-major. A default-constructed field is empty and answers no queries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeightField {
    origin_x: f32,
    origin_z: f32,
    cell_size_x: f32,
    cell_size_z: f32,
    num_rows: usize,
    num_cols: usize,
    min_height: f32,
    max_height: f32,
    scale: f32,
    samples: Vec<f32>,
}

impl HeightField {
    /// Builds a field from already-scaled values. Returns `None` when the sample count does not
    /// match the dimensions, a dimension is zero, or a cell size is not positive.
    pub fn from_samples(
        origin_x: f32,
        origin_z: f32,
        cell_size_x: f32,
        cell_size_z: f32,
        num_rows: usize,
        num_cols: usize,
        samples: Vec<f32>,
    ) -> Option<Self> {
        Self::with_scale(
            origin_x,
            origin_z,
            cell_size_x,
            cell_size_z,
            num_rows,
            num_cols,
            samples,
            1.0,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn with_scale(
        origin_x: f32,
        origin_z: f32,
        cell_size_x: f32,
        cell_size_z: f32,
        num_rows: usize,
        num_cols: usize,
        samples: Vec<f32>,
        scale: f32,
    ) -> Option<Self> {
        if num_rows == 0 || num_cols == 0 || num_rows.checked_mul(num_cols) != Some(samples.len()) {
            return None;
        }
        if !(cell_size_x > 0.0 && cell_size_z > 0.0) {
            return None;
        }
        let (min_height, max_height) = samples
            .iter()
            .fold((f32::MAX, -f32::MAX), |(lo, hi), &h| (lo.min(h), hi.max(h)));
        Some(Self {
            origin_x,
            origin_z,
            cell_size_x,
            cell_size_z,
            num_rows,
            num_cols,
            min_height,
            max_height,
            scale,
            samples,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn origin_x(&self) -> f32 {
        self.origin_x
    }

    #[inline]
    pub fn origin_z(&self) -> f32 {
        self.origin_z
    }

    #[inline]
    pub fn cell_size_x(&self) -> f32 {
        self.cell_size_x
    }

    #[inline]
    pub fn cell_size_z(&self) -> f32 {
        self.cell_size_z
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    #[inline]
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Uniform scale the field was loaded with.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Inclusive upper X bound of the covered rectangle.
    #[inline]
    pub fn max_x(&self) -> f32 {
        self.origin_x + self.cell_size_x * self.num_cols.saturating_sub(1) as f32
    }

    /// Inclusive upper Z bound of the covered rectangle.
    #[inline]
    pub fn max_z(&self) -> f32 {
        self.origin_z + self.cell_size_z * self.num_rows.saturating_sub(1) as f32
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec3::new(self.origin_x, self.min_height, self.origin_z),
            Vec3::new(self.max_x(), self.max_height, self.max_z()),
        )
    }

    /// World position of grid node `(row, col)`, or `None` outside the grid.
    pub fn node_position(&self, row: usize, col: usize) -> Option<Vec3> {
        let y = self.node_height(row, col)?;
        Some(Vec3::new(
            self.origin_x + col as f32 * self.cell_size_x,
            y,
            self.origin_z + row as f32 * self.cell_size_z,
        ))
    }

    /// Stored sample at `(row, col)`; `None` outside `[0, rows) x [0, cols)`.
    #[inline]
    pub fn node_height(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.num_rows || col >= self.num_cols {
            return None;
        }
        self.samples.get(row * self.num_cols + col).copied()
    }

    /// Cell corner A must be a node; the other corners are then at most one past the grid.
    #[inline]
    fn contains_node(&self, row: usize, col: usize) -> bool {
        row < self.num_rows && col < self.num_cols
    }

    /// Finds the cell containing world point `(x, z)`.
    ///
    /// Only the low edge is checked: points before the origin fail, points past `max_x`/`max_z`
    /// still locate to a cell whose nodes may lie outside the grid. Height and normal
    /// evaluation reject those cells when they read a missing node. Non-finite input fails.
    pub fn locate(&self, x: f32, z: f32) -> Option<RelativePosition> {
        if self.is_empty() || !x.is_finite() || !z.is_finite() {
            return None;
        }
        let dx = x - self.origin_x;
        let dz = z - self.origin_z;
        if dx < 0.0 || dz < 0.0 {
            return None;
        }
        let gx = dx / self.cell_size_x;
        let gz = dz / self.cell_size_z;
        let col = gx.trunc();
        let row = gz.trunc();
        Some(RelativePosition {
            row: row as usize,
            col: col as usize,
            frac_col: gx - col,
            frac_row: gz - row,
        })
    }

    /// Interpolated elevation on the plane of the cell triangle containing `pos`.
    ///
    /// A node with a zero coefficient is never read, so exact node positions on the far
    /// edges evaluate to their stored sample.
    pub fn height_at_position(&self, pos: &RelativePosition) -> Option<f32> {
        let RelativePosition {
            row,
            col,
            frac_col,
            frac_row,
        } = *pos;
        if !self.contains_node(row, col) {
            return None;
        }
        let h = |r: usize, c: usize| self.node_height(r, c);
        let term = |coef: f32, hi: (usize, usize), lo: (usize, usize)| -> Option<f32> {
            if coef == 0.0 {
                return Some(0.0);
            }
            Some(coef * (h(hi.0, hi.1)? - h(lo.0, lo.1)?))
        };
        let a = (row, col);
        let b = (row, col + 1);
        let c = (row + 1, col + 1);
        let d = (row + 1, col);
        let ha = h(a.0, a.1)?;
        match CellTriangle::select(frac_col, frac_row) {
            CellTriangle::Abc => Some(ha + term(frac_col, b, a)? + term(frac_row, c, b)?),
            CellTriangle::Acd => Some(ha + term(frac_col, c, d)? + term(frac_row, d, a)?),
        }
    }

    /// Unit normal of the cell triangle containing `pos`, built from the triangle's edges.
    pub fn normal_at_position(&self, pos: &RelativePosition) -> Option<Vec3> {
        let (row, col) = (pos.row, pos.col);
        if !self.contains_node(row, col) {
            return None;
        }
        let ha = self.node_height(row, col)?;
        let hc = self.node_height(row + 1, col + 1)?;
        let (v0, v1) = match CellTriangle::select(pos.frac_col, pos.frac_row) {
            CellTriangle::Abc => {
                let hb = self.node_height(row, col + 1)?;
                (
                    Vec3::new(-self.cell_size_x, ha - hb, 0.0),
                    Vec3::new(0.0, hc - hb, self.cell_size_z),
                )
            }
            CellTriangle::Acd => {
                let hd = self.node_height(row + 1, col)?;
                (
                    Vec3::new(self.cell_size_x, hc - hd, 0.0),
                    Vec3::new(0.0, ha - hd, -self.cell_size_z),
                )
            }
        };
        Some(v0.cross(v1).normalized())
    }

    /// Elevation at world `(x, z)`; `None` when the point is outside the grid.
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        self.height_at_position(&self.locate(x, z)?)
    }

    /// Surface normal at world `(x, z)`; `None` when the point is outside the grid.
    pub fn normal_at(&self, x: f32, z: f32) -> Option<Vec3> {
        self.normal_at_position(&self.locate(x, z)?)
    }
}
