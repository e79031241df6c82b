use std::path::Path;

/// Decoded single-channel heightmap: `pixels.len() == width * height`, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl HeightImage {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Decodes heightmap images referenced from image-style description files.
pub trait HeightImageSource {
    fn load(&self, path: &Path) -> Result<HeightImage, String>;
}

/// Decodes any format the `image` crate understands and converts it to 8-bit luma.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageFileSource;

impl HeightImageSource for ImageFileSource {
    fn load(&self, path: &Path) -> Result<HeightImage, String> {
        let img = image::open(path).map_err(|e| e.to_string())?;
        let gray = img.into_luma8();
        let (w, h) = gray.dimensions();
        HeightImage::new(w as usize, h as usize, gray.into_raw())
            .ok_or_else(|| "decoded buffer size does not match dimensions".to_string())
    }
}
