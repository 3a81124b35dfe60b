// Software render target backed by an RGBA image

use super::Surface;
use crate::core::Rect;
use anyhow::Result;
use glam::IVec2;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// CPU-side framebuffer
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width() && y < self.height() {
            Some(self.pixels.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Fill the whole canvas with one colour
    pub fn clear(&mut self, color: [u8; 4]) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba(color);
        }
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.pixels.save(path.as_ref())?;
        Ok(())
    }

    fn blend(&mut self, x: i32, y: i32, src: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        let alpha = src[3] as u32;
        if alpha == 0 {
            return;
        }
        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        if alpha == 255 {
            *dst = Rgba(src);
            return;
        }
        for channel in 0..3 {
            let blended = (src[channel] as u32 * alpha + dst[channel] as u32 * (255 - alpha)) / 255;
            dst[channel] = blended as u8;
        }
        dst[3] = dst[3].max(src[3]);
    }
}

impl Surface for Canvas {
    fn blit(&mut self, image: &RgbaImage, at: IVec2, flip_x: bool) {
        let (width, height) = image.dimensions();
        for y in 0..height {
            for x in 0..width {
                let src_x = if flip_x { width - 1 - x } else { x };
                let color = image.get_pixel(src_x, y).0;
                self.blend(at.x + x as i32, at.y + y as i32, color);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: [u8; 4]) {
        let x0 = rect.left().floor() as i32;
        let y0 = rect.top().floor() as i32;
        let x1 = rect.right().floor() as i32;
        let y1 = rect.bottom().floor() as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blit_flipped() {
        let mut canvas = Canvas::new(4, 1);
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

        canvas.blit(&image, IVec2::new(1, 0), false);
        assert_eq!(canvas.pixel(1, 0), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(2, 0), Some([0, 0, 0, 0]));

        canvas.clear([0, 0, 0, 0]);
        canvas.blit(&image, IVec2::new(1, 0), true);
        assert_eq!(canvas.pixel(2, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_blit_clips_offscreen() {
        let mut canvas = Canvas::new(2, 2);
        let image = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 255]));
        canvas.blit(&image, IVec2::new(-2, -2), false);
        assert_eq!(canvas.pixel(0, 0), Some([1, 2, 3, 255]));
        assert_eq!(canvas.pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(5, 5), None);
    }

    #[test]
    fn test_fill_rect_blends_translucent() {
        let mut canvas = Canvas::new(2, 1);
        canvas.clear([0, 0, 0, 255]);
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), [255, 255, 255, 255]);
        canvas.fill_rect(Rect::new(1.0, 0.0, 1.0, 1.0), [255, 0, 0, 51]);
        assert_eq!(canvas.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(1, 0), Some([51, 0, 0, 255]));
    }
}
