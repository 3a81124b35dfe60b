use super::collision::TileQuery;
use crate::core::Rect;
use glam::Vec2;

/// Downward acceleration added to `velocity.y` every update (pixels/tick²)
pub const GRAVITY: f32 = 0.1;

/// Terminal fall speed (pixels/tick)
pub const MAX_FALL_SPEED: f32 = 5.0;

/// Which sides of the body touched solid tiles during the last update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    pub fn vertical(&self) -> bool {
        self.up || self.down
    }
}

/// Kinematic box shared by every entity
///
/// Position is the top-left corner of the bounding box. The body integrates
/// its own velocity plus an instantaneous requested delta, resolving the X
/// axis fully before the Y axis against the tiles around it.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    pub position: Vec2,
    pub velocity: Vec2,
    size: Vec2,
    collisions: CollisionFlags,
    facing_left: bool,
    last_movement: Vec2,
}

impl PhysicsBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            collisions: CollisionFlags::default(),
            facing_left: false,
            last_movement: Vec2::ZERO,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn collisions(&self) -> CollisionFlags {
        self.collisions
    }

    pub fn facing_left(&self) -> bool {
        self.facing_left
    }

    pub fn set_facing_left(&mut self, facing_left: bool) {
        self.facing_left = facing_left;
    }

    /// Requested (input) movement of the last update
    pub fn last_movement(&self) -> Vec2 {
        self.last_movement
    }

    /// Advance one tick: gravity, axis-separated movement, tile resolution
    pub fn integrate_and_resolve(&mut self, requested_delta: Vec2, tiles: &dyn TileQuery) {
        self.collisions = CollisionFlags::default();

        self.velocity.y = (self.velocity.y + GRAVITY).min(MAX_FALL_SPEED);

        let frame_movement = requested_delta + self.velocity;

        self.position.x += frame_movement.x;
        let mut entity_rect = self.rect();
        for rect in tiles.solid_rects_near(self.position) {
            if entity_rect.intersects(&rect) {
                if frame_movement.x > 0.0 {
                    entity_rect.set_right(rect.left());
                    self.collisions.right = true;
                }
                if frame_movement.x < 0.0 {
                    entity_rect.set_left(rect.right());
                    self.collisions.left = true;
                }
                self.position.x = entity_rect.x;
            }
        }

        self.position.y += frame_movement.y;
        let mut entity_rect = self.rect();
        for rect in tiles.solid_rects_near(self.position) {
            if entity_rect.intersects(&rect) {
                if frame_movement.y > 0.0 {
                    entity_rect.set_bottom(rect.top());
                    self.collisions.down = true;
                }
                if frame_movement.y < 0.0 {
                    entity_rect.set_top(rect.bottom());
                    self.collisions.up = true;
                }
                self.position.y = entity_rect.y;
            }
        }

        // Facing follows input only, so knockback and dash drift keep it
        if requested_delta.x > 0.0 {
            self.facing_left = false;
        }
        if requested_delta.x < 0.0 {
            self.facing_left = true;
        }

        self.last_movement = requested_delta;

        if self.collisions.vertical() {
            self.velocity.y = 0.0;
        }
    }
}
