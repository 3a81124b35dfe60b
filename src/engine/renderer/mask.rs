// Opacity masks for silhouette (pixel-perfect) overlap tests

use glam::IVec2;
use image::RgbaImage;

/// Pixels with alpha above this value count as opaque
const ALPHA_THRESHOLD: u8 = 127;

/// One bit of opacity per pixel of a sprite frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Build the mask of an RGBA image, optionally mirrored horizontally
    pub fn from_image(image: &RgbaImage, flip_x: bool) -> Self {
        let (width, height) = image.dimensions();
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let src_x = if flip_x { width - 1 - x } else { x };
                bits.push(image.get_pixel(src_x, y)[3] > ALPHA_THRESHOLD);
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at (x, y) is opaque; out-of-range pixels are not
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Number of opaque pixels
    pub fn count(&self) -> u32 {
        self.bits.iter().filter(|bit| **bit).count() as u32
    }

    /// Count pixels that are opaque in both masks when `other`'s top-left
    /// corner sits at `offset` relative to this mask's top-left corner
    pub fn overlap_area(&self, other: &Mask, offset: IVec2) -> u32 {
        let x_start = offset.x.max(0);
        let y_start = offset.y.max(0);
        let x_end = (offset.x + other.width as i32).min(self.width as i32);
        let y_end = (offset.y + other.height as i32).min(self.height as i32);

        let mut area = 0;
        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    area += 1;
                }
            }
        }
        area
    }
}
