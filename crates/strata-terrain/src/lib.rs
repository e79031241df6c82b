//! Heightfield data model, point queries and description-file loading.
#![forbid(unsafe_code)]

pub mod error;
pub mod heightfield;
pub mod image_source;
pub mod loader;

pub use error::LoadError;
pub use heightfield::{CellTriangle, HeightField, RelativePosition};
pub use image_source::{HeightImage, HeightImageSource, ImageFileSource};
pub use loader::{HeightFieldLoader, LoadMethod};
