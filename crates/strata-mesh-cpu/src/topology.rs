use crate::backend::PrimitiveKind;
use crate::mesh::Vertex;

/// Expands one primitive's vertex sequence into independent triangles.
///
/// Strip triangles alternate winding so every output triangle keeps the strip's facing.
/// Triangles with two coincident positions are dropped.
pub fn triangulate(kind: PrimitiveKind, verts: &[Vertex], out: &mut Vec<[Vertex; 3]>) {
    match kind {
        PrimitiveKind::TriangleList => {
            for t in verts.chunks_exact(3) {
                push_unless_degenerate(out, [t[0], t[1], t[2]]);
            }
        }
        PrimitiveKind::TriangleFan => {
            if let Some((&center, rest)) = verts.split_first() {
                for w in rest.windows(2) {
                    push_unless_degenerate(out, [center, w[0], w[1]]);
                }
            }
        }
        PrimitiveKind::TriangleStrip => {
            for (i, w) in verts.windows(3).enumerate() {
                let tri = if i % 2 == 0 {
                    [w[0], w[1], w[2]]
                } else {
                    [w[1], w[0], w[2]]
                };
                push_unless_degenerate(out, tri);
            }
        }
    }
}

#[inline]
pub fn is_degenerate(tri: &[Vertex; 3]) -> bool {
    tri[0].pos == tri[1].pos || tri[1].pos == tri[2].pos || tri[0].pos == tri[2].pos
}

#[inline]
fn push_unless_degenerate(out: &mut Vec<[Vertex; 3]>, tri: [Vertex; 3]) {
    if !is_degenerate(&tri) {
        out.push(tri);
    }
}
