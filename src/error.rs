//! Error handling for the stitcher
//!
//! Every fatal condition of a stitch pass surfaces as a `StitchError` at the
//! `stitch()` boundary. Nothing in this crate panics on bad input.

use thiserror::Error;

/// Main error type for the stitcher
#[derive(Debug, Error)]
pub enum StitchError {
    // Specification errors
    #[error("Invalid texture spec for block {block}: {reason}")]
    InvalidSpec { block: u16, reason: String },

    #[error("Block id {id} exceeds entity table capacity {capacity}")]
    EntityOverflow { id: usize, capacity: usize },

    // Packing errors
    #[error("Texture atlas full: cannot place '{name}' ({width}x{height}) in {atlas_size}x{atlas_size} atlas")]
    AtlasFull {
        name: String,
        width: u32,
        height: u32,
        atlas_size: u32,
    },

    // Resolver errors
    #[error("Texture '{name}' is not square: {width}x{height}")]
    NonSquareTexture {
        name: String,
        width: u32,
        height: u32,
    },

    #[error("Texture '{name}' edge {size} is not a power of two")]
    NonPowerOfTwo { name: String, size: u32 },

    #[error("Texture '{name}' edge {size} is smaller than the {tile_size}px index grid")]
    TileTooSmall {
        name: String,
        size: u32,
        tile_size: u32,
    },

    #[error("Textures '{first}' and '{second}' resolve to the same index {index}")]
    IndexCollision {
        first: String,
        second: String,
        index: u32,
    },

    #[error("Texture '{name}' index {index} exceeds index capacity {capacity}")]
    IndexOverflow {
        name: String,
        index: u32,
        capacity: u32,
    },

    // Loading errors
    #[error("Failed to fetch {} texture(s): {}", .names.len(), .names.join(", "))]
    FetchFailed { names: Vec<String> },

    #[error("A stitch session is already in flight")]
    SessionActive,

    // Output errors
    #[error("Texture upload failed: {0}")]
    TextureUpload(String),

    // Configuration errors
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Registry parse error: {0}")]
    RegistryParse(#[from] serde_json::Error),

    // System errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error for {path}: {error}")]
    Io { path: String, error: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Type alias for Results in the stitcher
pub type StitchResult<T> = Result<T, StitchError>;

impl From<std::io::Error> for StitchError {
    fn from(error: std::io::Error) -> Self {
        StitchError::Io {
            path: String::new(),
            error: error.to_string(),
        }
    }
}

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> StitchResult<T>;
    fn with_context<F>(self, f: F) -> StitchResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> StitchResult<T> {
        self.map_err(|e| StitchError::Internal {
            message: format!("{}: {}", msg, e),
        })
    }

    fn with_context<F>(self, f: F) -> StitchResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| StitchError::Internal {
            message: format!("{}: {}", f(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StitchError::IndexOverflow {
            name: "dirt".to_string(),
            index: 70000,
            capacity: 65536,
        };
        assert_eq!(
            err.to_string(),
            "Texture 'dirt' index 70000 exceeds index capacity 65536"
        );
    }

    #[test]
    fn test_fetch_failed_lists_names() {
        let err = StitchError::FetchFailed {
            names: vec!["dirt".to_string(), "stone".to_string()],
        };
        assert_eq!(err.to_string(), "Failed to fetch 2 texture(s): dirt, stone");
    }

    #[test]
    fn test_error_context() {
        let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let err = result.context("loading atlas").unwrap_err();
        assert!(err.to_string().contains("loading atlas"));
        assert!(err.to_string().contains("file not found"));
    }
}
