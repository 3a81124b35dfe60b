// Asset loading
//
// Sprite frames come from directories of numbered PNG files. Black is the
// transparency colour key of the art.

mod loader;

pub use loader::{AssetLoader, FRAME_EXTENSIONS};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Animation has no frames: {0}")]
    EmptyFrameSet(String),

    #[error("Missing animation {entity}/{action}")]
    MissingAnimation { entity: String, action: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
