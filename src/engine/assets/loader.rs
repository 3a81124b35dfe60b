// Asset loading functionality

use super::AssetError;
use crate::engine::renderer::Frame;
use log::debug;
use std::path::{Path, PathBuf};

/// File extensions accepted as animation frames
pub const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Colour treated as transparent in frame images
const COLOR_KEY: [u8; 3] = [0, 0, 0];

/// Asset loader responsible for finding and loading asset files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the full path for an asset directory
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        self.base_path.join(relative)
    }

    /// Load every frame image in `relative`, sorted by file name
    pub fn load_frames(&self, relative: &str) -> Result<Vec<Frame>, AssetError> {
        let dir = self.resolve_path(relative);
        if !dir.is_dir() {
            return Err(AssetError::NotFound(dir.to_string_lossy().to_string()));
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            let is_frame = path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| FRAME_EXTENSIONS.contains(&ext.as_str()));
            if path.is_file() && is_frame {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(AssetError::EmptyFrameSet(relative.to_string()));
        }

        let frames = paths
            .iter()
            .map(|path| {
                let image = image::open(path).map_err(|e| {
                    AssetError::LoadError(format!("Failed to decode {}: {}", path.display(), e))
                })?;
                Ok(Frame::with_color_key(image.to_rgba8(), COLOR_KEY))
            })
            .collect::<Result<Vec<_>, AssetError>>()?;

        debug!("Loaded {} frames from {}", frames.len(), dir.display());
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("slime-platformer-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/data/images");
        let path = loader.resolve_path("entities/player/idle");
        assert_eq!(
            path.to_str().unwrap(),
            "/game/data/images/entities/player/idle"
        );
    }

    #[test]
    fn test_missing_directory() {
        let loader = AssetLoader::new(scratch_dir("missing"));
        let err = loader.load_frames("nope").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn test_frames_sorted_and_color_keyed() {
        let base = scratch_dir("frames");
        let anim = base.join("walk");
        std::fs::create_dir_all(&anim).unwrap();

        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]))
            .save(anim.join("01.png"))
            .unwrap();
        RgbaImage::from_pixel(3, 2, Rgba([200, 10, 10, 255]))
            .save(anim.join("00.png"))
            .unwrap();
        std::fs::write(anim.join("notes.txt"), "ignored").unwrap();

        let loader = AssetLoader::new(&base);
        let frames = loader.load_frames("walk").unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].width(), 3);
        assert_eq!(frames[1].mask(false).count(), 0, "black is the colour key");

        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn test_empty_directory() {
        let base = scratch_dir("empty");
        std::fs::create_dir_all(base.join("idle")).unwrap();
        let loader = AssetLoader::new(&base);
        let err = loader.load_frames("idle").unwrap_err();
        assert!(matches!(err, AssetError::EmptyFrameSet(_)));
        let _ = std::fs::remove_dir_all(&base);
    }
}
