use std::fs;
use std::path::{Path, PathBuf};
use std::str::{FromStr, SplitWhitespace};

use serde::Deserialize;

use crate::error::LoadError;
use crate::heightfield::HeightField;
use crate::image_source::{HeightImageSource, ImageFileSource};

/// Largest grid (in nodes) a samples description may declare.
pub const MAX_GRID_NODES: usize = 1 << 26;

/// Which description format a file uses.
///
/// `Samples` files carry `originX originZ cellSizeX cellSizeZ numCols numRows baseHeight`
/// followed by `numRows * numCols` row-major elevations. `Image` files carry
/// `originX originZ cellSizeX cellSizeZ heightUnit imagePath`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "MethodRepr")]
pub enum LoadMethod {
    Samples,
    Image,
}

impl LoadMethod {
    /// Numeric codes used by older scene descriptions: 1 = samples, 2 = image.
    pub fn from_code(code: i64) -> Result<Self, LoadError> {
        match code {
            1 => Ok(LoadMethod::Samples),
            2 => Ok(LoadMethod::Image),
            other => Err(LoadError::UnknownMethod(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LoadMethod::Samples => "samples",
            LoadMethod::Image => "image",
        }
    }
}

impl FromStr for LoadMethod {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "samples" | "txt" | "text" => Ok(LoadMethod::Samples),
            "image" | "bmp" | "bitmap" => Ok(LoadMethod::Image),
            other => match other.parse::<i64>() {
                Ok(code) => LoadMethod::from_code(code),
                Err(_) => Err(LoadError::UnknownMethod(s.to_string())),
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MethodRepr {
    Code(i64),
    Name(String),
}

impl TryFrom<MethodRepr> for LoadMethod {
    type Error = LoadError;

    fn try_from(value: MethodRepr) -> Result<Self, Self::Error> {
        match value {
            MethodRepr::Code(c) => LoadMethod::from_code(c),
            MethodRepr::Name(s) => s.parse(),
        }
    }
}

/// Whitespace-separated field reader over a description file.
struct Fields<'a> {
    it: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            it: text.split_whitespace(),
        }
    }

    fn token(&mut self, field: &'static str) -> Result<&'a str, LoadError> {
        self.it.next().ok_or(LoadError::MissingField(field))
    }

    fn parse<T: FromStr>(&mut self, field: &'static str) -> Result<T, LoadError> {
        let tok = self.token(field)?;
        tok.parse().map_err(|_| LoadError::InvalidField {
            field,
            value: tok.to_string(),
        })
    }
}

/// Origin and cell size shared by both description formats, already scaled.
struct GridPlacement {
    origin_x: f32,
    origin_z: f32,
    cell_size_x: f32,
    cell_size_z: f32,
}

impl GridPlacement {
    fn read(fields: &mut Fields<'_>, scale: f32) -> Result<Self, LoadError> {
        let origin_x: f32 = fields.parse("origin_x")?;
        let origin_z: f32 = fields.parse("origin_z")?;
        let cell_size_x: f32 = fields.parse("cell_size_x")?;
        let cell_size_z: f32 = fields.parse("cell_size_z")?;
        let placement = Self {
            origin_x: origin_x * scale,
            origin_z: origin_z * scale,
            cell_size_x: cell_size_x * scale,
            cell_size_z: cell_size_z * scale,
        };
        if !(placement.cell_size_x > 0.0 && placement.cell_size_z > 0.0) {
            return Err(LoadError::InvalidCellSize {
                x: placement.cell_size_x,
                z: placement.cell_size_z,
            });
        }
        Ok(placement)
    }
}

/// Populates a [`HeightField`] from a description file, applying a uniform scale to origin,
/// cell sizes and every elevation.
#[derive(Clone, Debug)]
pub struct HeightFieldLoader<S = ImageFileSource> {
    scale: f32,
    images: S,
}

impl HeightFieldLoader<ImageFileSource> {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            images: ImageFileSource,
        }
    }
}

impl<S: HeightImageSource> HeightFieldLoader<S> {
    pub fn with_image_source(scale: f32, images: S) -> Self {
        Self { scale, images }
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Reads and parses `path`. Nothing is produced on failure; callers keep whatever field
    /// they already had.
    pub fn load(&self, path: impl AsRef<Path>, method: LoadMethod) -> Result<HeightField, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(target: "terrain", "loading {} as {}", path.display(), method.name());
        let field = match method {
            LoadMethod::Samples => self.parse_samples(&text)?,
            LoadMethod::Image => self.parse_image_description(&text, path.parent())?,
        };
        log::info!(
            target: "terrain",
            "loaded {}: {}x{} nodes, origin ({}, {}), cell ({}, {}), heights [{}, {}], scale {}",
            path.display(),
            field.num_cols(),
            field.num_rows(),
            field.origin_x(),
            field.origin_z(),
            field.cell_size_x(),
            field.cell_size_z(),
            field.min_height(),
            field.max_height(),
            self.scale
        );
        Ok(field)
    }

    fn check_scale(&self) -> Result<(), LoadError> {
        if self.scale > 0.0 && self.scale.is_finite() {
            Ok(())
        } else {
            Err(LoadError::InvalidScale(self.scale))
        }
    }

    /// Parses the inline-samples format. Unparsable or missing samples read as `0.0`.
    pub fn parse_samples(&self, text: &str) -> Result<HeightField, LoadError> {
        self.check_scale()?;
        let mut fields = Fields::new(text);
        let placement = GridPlacement::read(&mut fields, self.scale)?;
        let num_cols: usize = fields.parse("num_cols")?;
        let num_rows: usize = fields.parse("num_rows")?;
        // Base height is part of the format but carries no meaning.
        let _base_height: f32 = fields.parse("base_height")?;
        if num_rows == 0 || num_cols == 0 {
            return Err(LoadError::InvalidDimensions {
                rows: num_rows,
                cols: num_cols,
            });
        }

        let count = num_rows
            .checked_mul(num_cols)
            .filter(|&n| n <= MAX_GRID_NODES)
            .ok_or(LoadError::InvalidDimensions {
                rows: num_rows,
                cols: num_cols,
            })?;
        // Missing samples are padded, so only reserve what the text can actually hold.
        let mut samples = Vec::with_capacity(count.min(text.len() / 2 + 1));
        let mut bad = 0usize;
        for _ in 0..count {
            let h = match fields.it.next().map(str::parse::<f32>) {
                Some(Ok(h)) => h,
                _ => {
                    bad += 1;
                    0.0
                }
            };
            samples.push(h * self.scale);
        }
        if bad > 0 {
            log::warn!(
                target: "terrain",
                "{} of {} samples missing or unparsable; read as 0",
                bad,
                count
            );
        }
        self.finish(placement, num_rows, num_cols, samples)
    }

    /// Parses the image-header format. The image path is tried as written, then relative to
    /// `base_dir`.
    pub fn parse_image_description(
        &self,
        text: &str,
        base_dir: Option<&Path>,
    ) -> Result<HeightField, LoadError> {
        self.check_scale()?;
        let mut fields = Fields::new(text);
        let placement = GridPlacement::read(&mut fields, self.scale)?;
        let height_unit: f32 = fields.parse("height_unit")?;
        let image_path = resolve_image_path(fields.token("image_path")?, base_dir);

        let image = self
            .images
            .load(&image_path)
            .map_err(|reason| LoadError::Image {
                path: image_path.clone(),
                reason,
            })?;
        if image.width == 0 || image.height == 0 {
            return Err(LoadError::InvalidDimensions {
                rows: image.height,
                cols: image.width,
            });
        }
        log::debug!(
            target: "terrain",
            "heightmap image {} is {}x{}",
            image_path.display(),
            image.width,
            image.height
        );
        let samples = image
            .pixels
            .iter()
            .map(|&p| (p as f32 * height_unit) * self.scale)
            .collect();
        self.finish(placement, image.height, image.width, samples)
    }

    fn finish(
        &self,
        placement: GridPlacement,
        num_rows: usize,
        num_cols: usize,
        samples: Vec<f32>,
    ) -> Result<HeightField, LoadError> {
        HeightField::with_scale(
            placement.origin_x,
            placement.origin_z,
            placement.cell_size_x,
            placement.cell_size_z,
            num_rows,
            num_cols,
            samples,
            self.scale,
        )
        .ok_or(LoadError::InvalidDimensions {
            rows: num_rows,
            cols: num_cols,
        })
    }
}

fn resolve_image_path(raw: &str, base_dir: Option<&Path>) -> PathBuf {
    let as_written = PathBuf::from(raw);
    if as_written.exists() || as_written.is_absolute() {
        return as_written;
    }
    match base_dir {
        Some(dir) => {
            let candidate = dir.join(&as_written);
            if candidate.exists() { candidate } else { as_written }
        }
        None => as_written,
    }
}
