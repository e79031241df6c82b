//! CPU terrain meshing: vertex buffer, tessellation strategies and backend seams (engine-only).
#![forbid(unsafe_code)]

pub mod backend;
pub mod mesh;
pub mod record;
pub mod terrain;
pub mod tessellate;
pub mod topology;

pub use backend::{PrimitiveKind, RenderBackend, TextureError, TextureHandle, TextureOrigin, TextureStore};
pub use mesh::{TerrainMesh, Vertex};
pub use record::{RecordedPrimitive, RecordingBackend};
pub use terrain::{Terrain, TerrainDesc};
pub use tessellate::{FanTessellator, ListTessellator, StripTessellator, Tessellation, Tessellator};
pub use topology::triangulate;
