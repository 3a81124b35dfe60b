// Experience pickups dropped by slimes

use super::animation::{Animation, SpriteSet};
use super::player::Player;
use super::state::PickupAction;
use super::stats::PickupStats;
use crate::engine::physics::PhysicsBody;
use crate::engine::renderer::{draw_frame, Surface};
use crate::game::events::SimContext;
use glam::{IVec2, Vec2};
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// A small orb that pops out, settles, and drifts into the player
pub struct Experience {
    body: PhysicsBody,
    stats: PickupStats,
    animation: Animation,
    has_landed: bool,
}

impl Experience {
    /// Spawn with a random upward launch
    pub fn new(position: Vec2, sprites: &SpriteSet<PickupAction>, rng: &mut dyn RngCore) -> Self {
        Self::with_stats(position, sprites, rng, PickupStats::default())
    }

    pub fn with_stats(
        position: Vec2,
        sprites: &SpriteSet<PickupAction>,
        rng: &mut dyn RngCore,
        stats: PickupStats,
    ) -> Self {
        let mut body = PhysicsBody::new(position, Vec2::splat(stats.size));
        let angle = PI / 2.0 * rng.gen::<f32>() + PI * 5.0 / 4.0;
        let speed = rng.gen::<f32>() * 0.5 + 1.0;
        body.velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

        Self {
            body,
            stats,
            animation: sprites.animation(PickupAction::Idle),
            has_landed: false,
        }
    }

    pub fn body(&self) -> &PhysicsBody {
        &self.body
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn exp_value(&self) -> u32 {
        self.stats.exp_value
    }

    pub fn has_landed(&self) -> bool {
        self.has_landed
    }

    /// Advance one tick; returns true once collected
    pub fn update(&mut self, ctx: &mut SimContext, player: &mut Player) -> bool {
        // Collision flags still describe the previous tick here
        if self.body.collisions().down {
            self.body.velocity.x = 0.0;
            self.has_landed = true;
        }

        if self.has_landed {
            if let Some(pull) = self.pull_toward(player.position()) {
                self.body.velocity = pull;
            }
        }

        self.body.integrate_and_resolve(Vec2::ZERO, ctx.tiles);
        self.animation.advance();

        let delta = player.position() - self.body.position;
        if delta.x.abs() < self.stats.collect_range
            && delta.y.abs() < self.stats.collect_range
            && self.body.rect().intersects(&player.body().rect())
        {
            player.gain_exp(self.stats.exp_value);
            return true;
        }
        false
    }

    /// Velocity toward the player's chest, if close enough to be pulled
    fn pull_toward(&self, player_position: Vec2) -> Option<Vec2> {
        let delta = player_position - self.body.position;
        let chest_dy = delta.y + self.stats.chest_offset;
        if delta.x.abs() >= self.stats.pull_range_x || chest_dy.abs() >= self.stats.pull_range_y {
            return None;
        }
        if delta.x == 0.0 || delta.y == 0.0 {
            return None;
        }

        let x = if delta.x.abs() > self.stats.snap_distance {
            self.stats.pull_strength / delta.x
        } else {
            self.stats.snap_speed * delta.x.signum()
        };
        let y = if chest_dy.abs() > self.stats.vertical_dead_zone {
            (1.0 / delta.y).clamp(-self.stats.max_vertical_pull, self.stats.max_vertical_pull)
        } else {
            0.0
        };
        Some(Vec2::new(x, y))
    }

    pub fn render(&self, surface: &mut dyn Surface, camera: IVec2) {
        draw_frame(
            surface,
            self.animation.current_frame(),
            self.body.position,
            Vec2::ZERO,
            false,
            camera,
        );
    }
}
