// Rendering: software surfaces, sprite frames, silhouettes and the camera

mod camera;
mod canvas;
mod mask;
mod sprite;

pub use camera::Camera;
pub use canvas::Canvas;
pub use mask::Mask;
pub use sprite::Frame;

use crate::core::Rect;
use glam::{IVec2, Vec2};
use image::RgbaImage;

/// Anything entities can draw themselves onto
pub trait Surface {
    /// Copy an image with its top-left corner at `at`, mirrored if `flip_x`
    fn blit(&mut self, image: &RgbaImage, at: IVec2, flip_x: bool);

    /// Fill a rectangle given in surface pixels
    fn fill_rect(&mut self, rect: Rect, color: [u8; 4]);
}

/// Draw a frame at `position + anim_offset - camera`
pub fn draw_frame(
    surface: &mut dyn Surface,
    frame: &Frame,
    position: Vec2,
    anim_offset: Vec2,
    flip_x: bool,
    camera: IVec2,
) {
    let at = (position + anim_offset).floor().as_ivec2() - camera;
    surface.blit(frame.image(), at, flip_x);
}
