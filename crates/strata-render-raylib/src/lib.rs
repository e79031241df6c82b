//! Raylib-based rendering: conversions, texture store and an rlgl immediate-mode backend.
// Unsafe is required for rlgl immediate-mode calls in this crate.

use std::collections::HashMap;
use std::path::Path;

use raylib::prelude::*;
use strata_mesh_cpu::{
    PrimitiveKind, RenderBackend, TextureError, TextureHandle, TextureOrigin, TextureStore, Vertex,
    triangulate,
};

pub mod conv {
    use strata_geom::{Aabb, Vec3};

    pub fn vec3_to_rl(v: Vec3) -> raylib::prelude::Vector3 {
        raylib::prelude::Vector3::new(v.x, v.y, v.z)
    }

    pub fn aabb_to_rl(bb: Aabb) -> raylib::core::math::BoundingBox {
        raylib::core::math::BoundingBox::new(vec3_to_rl(bb.min), vec3_to_rl(bb.max))
    }
}

/// rlgl draw mode for independent triangles (`RL_TRIANGLES`).
const RL_TRIANGLES: i32 = 0x0004;

/// Triangles submitted per `rlBegin`/`rlEnd` pair.
const TRIANGLES_PER_BATCH: usize = 1024;

/// GPU textures owned by handle. Dropping a texture unloads it.
#[derive(Default)]
pub struct TextureCache {
    map: HashMap<TextureHandle, raylib::core::texture::Texture2D>,
    next: u32,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_ref(&self, handle: TextureHandle) -> Option<&raylib::core::texture::Texture2D> {
        self.map.get(&handle)
    }

    pub fn insert(&mut self, tex: raylib::core::texture::Texture2D) -> TextureHandle {
        self.next += 1;
        let handle = TextureHandle(self.next);
        self.map.insert(handle, tex);
        handle
    }

    pub fn remove(&mut self, handle: TextureHandle) -> bool {
        self.map.remove(&handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// [`TextureStore`] backed by raylib. Borrowed for the duration of a load or release.
pub struct RaylibTextureStore<'a> {
    pub rl: &'a mut RaylibHandle,
    pub thread: &'a RaylibThread,
    pub cache: &'a mut TextureCache,
}

impl TextureStore for RaylibTextureStore<'_> {
    fn create_texture_from_image(
        &mut self,
        path: &Path,
        origin: TextureOrigin,
    ) -> Result<TextureHandle, TextureError> {
        let err = |reason: String| TextureError {
            path: path.to_path_buf(),
            reason,
        };
        let file = path
            .to_str()
            .ok_or_else(|| err("path is not valid UTF-8".into()))?;
        let mut img =
            raylib::core::texture::Image::load_image(file).map_err(|e| err(e.to_string()))?;
        // Raylib images start at the top row; uv (0, 0) must land on the bottom-left pixel.
        if origin == TextureOrigin::BottomLeft {
            img.flip_vertical();
        }
        let tex = self
            .rl
            .load_texture_from_image(self.thread, &img)
            .map_err(|e| err(e.to_string()))?;
        tex.set_texture_filter(
            self.thread,
            raylib::consts::TextureFilter::TEXTURE_FILTER_BILINEAR,
        );
        tex.set_texture_wrap(self.thread, raylib::consts::TextureWrap::TEXTURE_WRAP_REPEAT);
        let handle = self.cache.insert(tex);
        log::debug!(target: "render", "texture {:?} <- {}", handle, path.display());
        Ok(handle)
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        if !self.cache.remove(texture) {
            log::warn!(target: "render", "destroy of unknown texture {:?}", texture);
        }
    }
}

/// Immediate-mode backend over rlgl. Must be driven inside a 3D draw mode.
///
/// rlgl only draws independent triangles, so each primitive is buffered until
/// `end_primitive` and then expanded with [`triangulate`].
pub struct RlglBackend<'c> {
    cache: &'c TextureCache,
    texture_id: u32,
    kind: Option<PrimitiveKind>,
    pending: Vec<Vertex>,
    scratch: Vec<[Vertex; 3]>,
    triangles_drawn: usize,
}

impl<'c> RlglBackend<'c> {
    pub fn new(cache: &'c TextureCache) -> Self {
        Self {
            cache,
            texture_id: 0,
            kind: None,
            pending: Vec::new(),
            scratch: Vec::new(),
            triangles_drawn: 0,
        }
    }

    pub fn triangles_drawn(&self) -> usize {
        self.triangles_drawn
    }

    fn submit(&self, tris: &[[Vertex; 3]]) {
        unsafe {
            raylib::ffi::rlSetTexture(self.texture_id);
            for batch in tris.chunks(TRIANGLES_PER_BATCH) {
                raylib::ffi::rlCheckRenderBatchLimit((batch.len() * 3) as i32);
                raylib::ffi::rlBegin(RL_TRIANGLES);
                raylib::ffi::rlColor4ub(255, 255, 255, 255);
                for tri in batch {
                    for v in tri {
                        raylib::ffi::rlTexCoord2f(v.uv.x, v.uv.y);
                        raylib::ffi::rlVertex3f(v.pos.x, v.pos.y, v.pos.z);
                    }
                }
                raylib::ffi::rlEnd();
            }
            raylib::ffi::rlSetTexture(0);
        }
    }
}

impl RenderBackend for RlglBackend<'_> {
    fn bind_texture(&mut self, texture: TextureHandle) {
        self.texture_id = match self.cache.get_ref(texture) {
            Some(t) => t.as_ref().id,
            None => {
                log::warn!(target: "render", "bind of unknown texture {:?}", texture);
                0
            }
        };
    }

    fn begin_primitive(&mut self, kind: PrimitiveKind) {
        self.kind = Some(kind);
        self.pending.clear();
    }

    fn emit_vertex(&mut self, vertex: &Vertex) {
        if self.kind.is_some() {
            self.pending.push(*vertex);
        }
    }

    fn end_primitive(&mut self) {
        let Some(kind) = self.kind.take() else {
            return;
        };
        self.scratch.clear();
        triangulate(kind, &self.pending, &mut self.scratch);
        if !self.scratch.is_empty() {
            self.submit(&self.scratch);
            self.triangles_drawn += self.scratch.len();
        }
        self.pending.clear();
    }
}
