use std::str::FromStr;

use serde::Deserialize;

use crate::backend::{PrimitiveKind, RenderBackend};
use crate::mesh::TerrainMesh;

/// A traversal of the mesh grid that emits triangles in one primitive topology.
/// Emitters never mutate the mesh and emit nothing for an empty one.
pub trait Tessellator {
    fn kind(&self) -> PrimitiveKind;
    fn description(&self) -> &'static str;
    fn emit<B: RenderBackend + ?Sized>(&self, mesh: &TerrainMesh, backend: &mut B);
}

/// Two independent triangles per cell, all in one triangle-list primitive.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListTessellator;

impl Tessellator for ListTessellator {
    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::TriangleList
    }

    fn description(&self) -> &'static str {
        "Simple brute force rendering using immediate mode and triangle list"
    }

    fn emit<B: RenderBackend + ?Sized>(&self, mesh: &TerrainMesh, backend: &mut B) {
        if mesh.is_empty() {
            return;
        }
        let max_r = mesh.num_rows() - 1;
        let max_c = mesh.num_cols() - 1;
        backend.begin_primitive(PrimitiveKind::TriangleList);
        for r in 0..max_r {
            for c in 0..max_c {
                backend.emit_vertex(mesh.vertex(r, c));
                backend.emit_vertex(mesh.vertex(r + 1, c));
                backend.emit_vertex(mesh.vertex(r + 1, c + 1));

                backend.emit_vertex(mesh.vertex(r, c));
                backend.emit_vertex(mesh.vertex(r + 1, c + 1));
                backend.emit_vertex(mesh.vertex(r, c + 1));
            }
        }
        backend.end_primitive();
    }
}

/// One 8-triangle fan per 2x2-cell block, centred on the block's middle node.
///
/// Blocks start at even rows/columns and must fit entirely inside the grid, so with an even
/// node count the last row or column of cells is not drawn.
#[derive(Clone, Copy, Debug, Default)]
pub struct FanTessellator;

impl FanTessellator {
    /// Nodes around the block centre, relative to the block's low corner, closing on the start.
    const RING: [(usize, usize); 9] = [
        (0, 0),
        (1, 0),
        (2, 0),
        (2, 1),
        (2, 2),
        (1, 2),
        (0, 2),
        (0, 1),
        (0, 0),
    ];
}

impl Tessellator for FanTessellator {
    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::TriangleFan
    }

    fn description(&self) -> &'static str {
        "Simple brute force rendering using immediate mode and triangle fan"
    }

    fn emit<B: RenderBackend + ?Sized>(&self, mesh: &TerrainMesh, backend: &mut B) {
        if mesh.is_empty() {
            return;
        }
        let max_r = mesh.num_rows().saturating_sub(2);
        let max_c = mesh.num_cols().saturating_sub(2);
        for r in (0..max_r).step_by(2) {
            for c in (0..max_c).step_by(2) {
                backend.begin_primitive(PrimitiveKind::TriangleFan);
                backend.emit_vertex(mesh.vertex(r + 1, c + 1));
                for (dr, dc) in Self::RING {
                    backend.emit_vertex(mesh.vertex(r + dr, c + dc));
                }
                backend.end_primitive();
            }
        }
    }
}

/// The whole grid as one triangle strip.
///
/// Each iteration covers two cell rows: left to right across rows `r, r+1`, then right to left
/// across rows `r+1, r+2`. A repeated vertex (degenerate triangle) joins the two sweeps and
/// each iteration to the next; nothing trails the final sweep. Like the fan, only rows
/// reachable in steps of two are covered.
#[derive(Clone, Copy, Debug, Default)]
pub struct StripTessellator;

impl Tessellator for StripTessellator {
    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::TriangleStrip
    }

    fn description(&self) -> &'static str {
        "Simple brute force rendering using immediate mode and triangle strip"
    }

    fn emit<B: RenderBackend + ?Sized>(&self, mesh: &TerrainMesh, backend: &mut B) {
        if mesh.is_empty() {
            return;
        }
        let cols = mesh.num_cols();
        let max_r = mesh.num_rows().saturating_sub(2);
        backend.begin_primitive(PrimitiveKind::TriangleStrip);
        for r in (0..max_r).step_by(2) {
            for c in 0..cols {
                backend.emit_vertex(mesh.vertex(r, c));
                backend.emit_vertex(mesh.vertex(r + 1, c));
            }
            backend.emit_vertex(mesh.vertex(r + 1, cols - 1));

            for c in (0..cols).rev() {
                backend.emit_vertex(mesh.vertex(r + 1, c));
                backend.emit_vertex(mesh.vertex(r + 2, c));
            }
            if r + 2 < max_r {
                backend.emit_vertex(mesh.vertex(r + 2, 0));
            }
        }
        backend.end_primitive();
    }
}

/// Tessellation strategy chosen when a terrain is constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tessellation {
    List,
    Fan,
    #[default]
    Strip,
}

impl Tessellation {
    pub const ALL: [Tessellation; 3] = [Tessellation::List, Tessellation::Fan, Tessellation::Strip];

    pub fn kind(self) -> PrimitiveKind {
        match self {
            Tessellation::List => ListTessellator.kind(),
            Tessellation::Fan => FanTessellator.kind(),
            Tessellation::Strip => StripTessellator.kind(),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tessellation::List => ListTessellator.description(),
            Tessellation::Fan => FanTessellator.description(),
            Tessellation::Strip => StripTessellator.description(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tessellation::List => "list",
            Tessellation::Fan => "fan",
            Tessellation::Strip => "strip",
        }
    }

    /// List -> Fan -> Strip -> List.
    pub fn next(self) -> Self {
        match self {
            Tessellation::List => Tessellation::Fan,
            Tessellation::Fan => Tessellation::Strip,
            Tessellation::Strip => Tessellation::List,
        }
    }

    pub fn render<B: RenderBackend + ?Sized>(self, mesh: &TerrainMesh, backend: &mut B) {
        match self {
            Tessellation::List => ListTessellator.emit(mesh, backend),
            Tessellation::Fan => FanTessellator.emit(mesh, backend),
            Tessellation::Strip => StripTessellator.emit(mesh, backend),
        }
    }
}

impl FromStr for Tessellation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" | "triangles" => Ok(Tessellation::List),
            "fan" => Ok(Tessellation::Fan),
            "strip" => Ok(Tessellation::Strip),
            other => Err(format!("unknown tessellation '{}' (list, fan, strip)", other)),
        }
    }
}

impl std::fmt::Display for Tessellation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
