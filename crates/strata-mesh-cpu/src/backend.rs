//! Seams to the rendering backend: primitive emission and texture management.
use std::path::{Path, PathBuf};

use crate::mesh::Vertex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    TriangleList,
    TriangleFan,
    TriangleStrip,
}

/// Opaque texture id handed out by a [`TextureStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Where texture coordinate `(0, 0)` lands on the source image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureOrigin {
    TopLeft,
    #[default]
    BottomLeft,
}

/// Immediate-mode vertex sink. Calls arrive as `begin_primitive`, any number of
/// `emit_vertex`, then `end_primitive`.
pub trait RenderBackend {
    fn bind_texture(&mut self, texture: TextureHandle);
    fn begin_primitive(&mut self, kind: PrimitiveKind);
    fn emit_vertex(&mut self, vertex: &Vertex);
    fn end_primitive(&mut self);
}

pub trait TextureStore {
    fn create_texture_from_image(
        &mut self,
        path: &Path,
        origin: TextureOrigin,
    ) -> Result<TextureHandle, TextureError>;
    fn destroy_texture(&mut self, texture: TextureHandle);
}

#[derive(Debug)]
pub struct TextureError {
    pub path: PathBuf,
    pub reason: String,
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot create texture from {}: {}", self.path.display(), self.reason)
    }
}

impl std::error::Error for TextureError {}
