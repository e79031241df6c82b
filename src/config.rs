use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use strata_mesh_cpu::{TerrainDesc, Tessellation, TextureOrigin};
use strata_terrain::LoadMethod;

pub const DEFAULT_CONFIG: &str = "strata.toml";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub terrain: TerrainSection,
    #[serde(default)]
    pub window: WindowSection,
    #[serde(default)]
    pub camera: CameraSection,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TerrainSection {
    pub description: PathBuf,
    pub method: LoadMethod,
    pub texture: Option<PathBuf>,
    pub scale: f32,
    pub tessellation: Tessellation,
    pub texture_origin: TextureOrigin,
}

impl Default for TerrainSection {
    fn default() -> Self {
        Self {
            description: PathBuf::from("assets/terrain/hills.txt"),
            method: LoadMethod::Samples,
            texture: Some(PathBuf::from("assets/terrain/grass.png")),
            scale: 1.0,
            tessellation: Tessellation::default(),
            texture_origin: TextureOrigin::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub width: i32,
    pub height: i32,
    pub title: String,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "strata".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CameraSection {
    pub move_speed: f32,
}

impl Default for CameraSection {
    fn default() -> Self {
        Self { move_speed: 20.0 }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Clone, Debug, Default)]
pub struct TerrainOverrides {
    pub description: Option<PathBuf>,
    pub method: Option<LoadMethod>,
    pub texture: Option<PathBuf>,
    pub scale: Option<f32>,
    pub tessellation: Option<Tessellation>,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s).map_err(|e| format!("{}: {}", path.display(), e).into())
    }

    /// Missing file: defaults with a warning. Unreadable or malformed file: error.
    pub fn load_or_default(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !path.exists() {
            log::warn!("config {} not found; using defaults", path.display());
            return Ok(Self::default());
        }
        let cfg = Self::load(path)?;
        log::info!("loaded config {}", path.display());
        Ok(cfg)
    }

    pub fn apply(&mut self, o: &TerrainOverrides) {
        let t = &mut self.terrain;
        if let Some(d) = &o.description {
            t.description = d.clone();
        }
        if let Some(m) = o.method {
            t.method = m;
        }
        if let Some(tex) = &o.texture {
            t.texture = Some(tex.clone());
        }
        if let Some(s) = o.scale {
            t.scale = s;
        }
        if let Some(ts) = o.tessellation {
            t.tessellation = ts;
        }
    }

    pub fn terrain_desc(&self) -> TerrainDesc {
        let t = &self.terrain;
        TerrainDesc {
            description: t.description.clone(),
            method: t.method,
            texture: t.texture.clone(),
            texture_origin: t.texture_origin,
            scale: t.scale,
            tessellation: t.tessellation,
        }
    }
}
