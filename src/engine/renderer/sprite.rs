// Sprite frames: pixels plus the silhouettes used for melee hit tests

use super::mask::Mask;
use image::{Rgba, RgbaImage};

/// A single sprite image with precomputed opacity masks
///
/// Both orientations are cached so that hit tests against a flipped entity
/// never rebuild a mask.
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbaImage,
    mask: Mask,
    mask_flipped: Mask,
}

impl Frame {
    pub fn new(image: RgbaImage) -> Self {
        let mask = Mask::from_image(&image, false);
        let mask_flipped = Mask::from_image(&image, true);
        Self {
            image,
            mask,
            mask_flipped,
        }
    }

    /// Create a fully opaque single-colour frame (placeholder art, tests)
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    /// Make every pixel matching `key` transparent
    pub fn with_color_key(mut image: RgbaImage, key: [u8; 3]) -> Self {
        for pixel in image.pixels_mut() {
            if pixel[0] == key[0] && pixel[1] == key[1] && pixel[2] == key[2] {
                pixel[3] = 0;
            }
        }
        Self::new(image)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Silhouette in the requested orientation
    pub fn mask(&self, flip_x: bool) -> &Mask {
        if flip_x {
            &self.mask_flipped
        } else {
            &self.mask
        }
    }
}
