use std::path::PathBuf;

use strata_geom::{Aabb, Vec3};
use strata_terrain::{HeightField, HeightFieldLoader, HeightImageSource, ImageFileSource, LoadError, LoadMethod};

use crate::backend::{RenderBackend, TextureHandle, TextureOrigin, TextureStore};
use crate::mesh::TerrainMesh;
use crate::tessellate::Tessellation;

/// Everything needed to construct a [`Terrain`].
#[derive(Clone, Debug)]
pub struct TerrainDesc {
    pub description: PathBuf,
    pub method: LoadMethod,
    pub texture: Option<PathBuf>,
    pub texture_origin: TextureOrigin,
    pub scale: f32,
    pub tessellation: Tessellation,
}

/// Owns a heightfield, the mesh derived from it, its texture and the tessellation strategy.
///
/// A terrain is never reloaded in place; loading produces a new one and [`Terrain::replace`]
/// swaps it in.
#[derive(Debug, Default)]
pub struct Terrain {
    field: HeightField,
    mesh: TerrainMesh,
    texture: Option<TextureHandle>,
    tessellation: Tessellation,
}

impl Terrain {
    pub fn new(field: HeightField, tessellation: Tessellation) -> Self {
        let mesh = TerrainMesh::build(&field);
        Self {
            field,
            mesh,
            texture: None,
            tessellation,
        }
    }

    pub fn load(desc: &TerrainDesc, textures: &mut impl TextureStore) -> Result<Self, LoadError> {
        Self::load_with(desc, ImageFileSource, textures)
    }

    /// Loads the heightfield first; the texture is only created once that succeeded. A texture
    /// failure is logged and the terrain renders untextured.
    pub fn load_with<S: HeightImageSource>(
        desc: &TerrainDesc,
        images: S,
        textures: &mut impl TextureStore,
    ) -> Result<Self, LoadError> {
        let loader = HeightFieldLoader::with_image_source(desc.scale, images);
        let field = loader.load(&desc.description, desc.method)?;
        let mut terrain = Self::new(field, desc.tessellation);
        if let Some(path) = &desc.texture {
            match textures.create_texture_from_image(path, desc.texture_origin) {
                Ok(handle) => terrain.texture = Some(handle),
                Err(e) => log::warn!("{}; rendering untextured", e),
            }
        }
        log::info!(
            "terrain ready: {} triangles, {}",
            terrain.triangle_count(),
            terrain.tessellation.description()
        );
        Ok(terrain)
    }

    /// Releases this terrain's texture, then takes over `next`.
    pub fn replace(&mut self, next: Terrain, textures: &mut impl TextureStore) {
        if let Some(old) = self.texture.take() {
            textures.destroy_texture(old);
        }
        *self = next;
    }

    /// Releases the texture. The buffers go with `self`.
    pub fn release(mut self, textures: &mut impl TextureStore) {
        if let Some(t) = self.texture.take() {
            textures.destroy_texture(t);
        }
    }

    /// Emits the terrain with its strategy. Does nothing if the mesh is empty.
    pub fn render<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        if self.mesh.is_empty() {
            return;
        }
        if let Some(t) = self.texture {
            backend.bind_texture(t);
        }
        self.tessellation.render(&self.mesh, backend);
    }

    #[inline]
    pub fn field(&self) -> &HeightField {
        &self.field
    }

    #[inline]
    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    #[inline]
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    #[inline]
    pub fn tessellation(&self) -> Tessellation {
        self.tessellation
    }

    pub fn set_tessellation(&mut self, tessellation: Tessellation) {
        if tessellation != self.tessellation {
            log::info!("tessellation -> {}", tessellation.description());
            self.tessellation = tessellation;
        }
    }

    pub fn description(&self) -> &'static str {
        self.tessellation.description()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    pub fn bounds(&self) -> Aabb {
        self.field.bounds()
    }

    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        self.field.height_at(x, z)
    }

    pub fn normal_at(&self, x: f32, z: f32) -> Option<Vec3> {
        self.field.normal_at(x, z)
    }
}
