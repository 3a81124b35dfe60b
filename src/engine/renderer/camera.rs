// Scrolling camera for the 2D view

use glam::{IVec2, Vec2};

/// Fraction of the remaining distance the camera closes each frame
const FOLLOW_EASING: f32 = 0.1;

/// Camera that eases toward a target, expressed as a world-space scroll
#[derive(Debug, Clone)]
pub struct Camera {
    /// World position of the top-left corner of the view
    pub scroll: Vec2,
    /// View size in pixels
    viewport: Vec2,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            scroll: Vec2::ZERO,
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Snap the view so `target` is centred
    pub fn center_on(&mut self, target: Vec2) {
        self.scroll = target - self.viewport / 2.0;
    }

    /// Move a tenth of the way toward centring `target`
    pub fn follow(&mut self, target: Vec2) {
        let desired = target - self.viewport / 2.0;
        self.scroll += (desired - self.scroll) * FOLLOW_EASING;
    }

    /// Integer offset subtracted from world positions when drawing
    pub fn render_offset(&self) -> IVec2 {
        self.scroll.as_ivec2()
    }
}
