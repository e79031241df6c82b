use std::path::PathBuf;

#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    MissingField(&'static str),
    InvalidField {
        field: &'static str,
        value: String,
    },
    InvalidDimensions {
        rows: usize,
        cols: usize,
    },
    InvalidCellSize {
        x: f32,
        z: f32,
    },
    InvalidScale(f32),
    Image {
        path: PathBuf,
        reason: String,
    },
    UnknownMethod(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot open {}: {}", path.display(), source)
            }
            LoadError::MissingField(name) => write!(f, "missing field '{}'", name),
            LoadError::InvalidField { field, value } => {
                write!(f, "invalid value '{}' for field '{}'", value, field)
            }
            LoadError::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {}x{} (rows x cols)", rows, cols)
            }
            LoadError::InvalidCellSize { x, z } => {
                write!(f, "cell size must be positive, got ({}, {})", x, z)
            }
            LoadError::InvalidScale(s) => write!(f, "scale must be positive, got {}", s),
            LoadError::Image { path, reason } => {
                write!(f, "cannot load heightmap image {}: {}", path.display(), reason)
            }
            LoadError::UnknownMethod(m) => write!(f, "unknown load method '{}'", m),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
