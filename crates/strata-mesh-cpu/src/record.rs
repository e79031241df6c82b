use crate::backend::{PrimitiveKind, RenderBackend, TextureHandle};
use crate::mesh::Vertex;
use crate::topology::triangulate;

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedPrimitive {
    pub kind: PrimitiveKind,
    pub vertices: Vec<Vertex>,
}

/// Backend that keeps every emitted primitive in memory. Used for headless statistics and for
/// checking emitter output exactly.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    pub bound: Vec<TextureHandle>,
    pub primitives: Vec<RecordedPrimitive>,
    open: Option<RecordedPrimitive>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.bound.clear();
        self.primitives.clear();
        self.open = None;
    }

    /// Total `emit_vertex` calls across finished primitives.
    pub fn vertex_emissions(&self) -> usize {
        self.primitives.iter().map(|p| p.vertices.len()).sum()
    }

    /// Non-degenerate triangles described by the recorded primitives.
    pub fn triangles(&self) -> Vec<[Vertex; 3]> {
        let mut out = Vec::new();
        for p in &self.primitives {
            triangulate(p.kind, &p.vertices, &mut out);
        }
        out
    }
}

impl RenderBackend for RecordingBackend {
    fn bind_texture(&mut self, texture: TextureHandle) {
        self.bound.push(texture);
    }

    fn begin_primitive(&mut self, kind: PrimitiveKind) {
        debug_assert!(self.open.is_none(), "begin_primitive inside an open primitive");
        self.open = Some(RecordedPrimitive {
            kind,
            vertices: Vec::new(),
        });
    }

    fn emit_vertex(&mut self, vertex: &Vertex) {
        if let Some(p) = self.open.as_mut() {
            p.vertices.push(*vertex);
        } else {
            log::warn!(target: "render", "vertex emitted outside a primitive; dropped");
        }
    }

    fn end_primitive(&mut self) {
        if let Some(p) = self.open.take() {
            self.primitives.push(p);
        }
    }
}
