// Slime enemy: hop AI, silhouette hit test, contact damage, death and drops

use super::animation::{Animation, SpriteSet};
use super::player::{Player, Strike};
use super::state::{DirectionalTimer, HorizontalDir, SlimeAction};
use super::stats::SlimeStats;
use crate::core::Rect;
use crate::engine::physics::{PhysicsBody, MAX_FALL_SPEED};
use crate::engine::renderer::{draw_frame, Surface};
use crate::game::events::{
    DamageNumber, HitCircle, SimContext, SoundEffect, SpawnRequest, STRIKE_TEXT_COLOR,
};
use glam::{IVec2, Vec2};
use log::{debug, info};
use rand::Rng;
use std::f32::consts::PI;
use std::rc::Rc;

/// Sparks (and particles) thrown when a slime touches the player
const CONTACT_SPARKS: usize = 5;
const CONTACT_SPARK_COLOR: [u8; 3] = [100, 200, 255];

const HEALTH_BAR_BACK: [u8; 4] = [0, 0, 0, 255];
const HEALTH_BAR_FILL: [u8; 4] = [150, 0, 0, 255];

/// A hopping slime
pub struct Slime {
    body: PhysicsBody,
    stats: SlimeStats,
    sprites: Rc<SpriteSet<SlimeAction>>,
    action: SlimeAction,
    animation: Animation,

    hp: u32,
    jump_timer: DirectionalTimer,
    /// Ticks spent grounded since the last hop
    ground_time: u32,
    immunity_timer: u32,
    dead: bool,
    /// Ticks since death
    death_timer: u32,
}

impl Slime {
    pub fn new(position: Vec2, sprites: Rc<SpriteSet<SlimeAction>>) -> Self {
        Self::with_stats(position, sprites, SlimeStats::default())
    }

    pub fn with_stats(
        position: Vec2,
        sprites: Rc<SpriteSet<SlimeAction>>,
        stats: SlimeStats,
    ) -> Self {
        let animation = sprites.animation(SlimeAction::Idle);
        Self {
            body: PhysicsBody::new(position, Vec2::new(stats.width, stats.height)),
            sprites,
            action: SlimeAction::Idle,
            animation,
            hp: stats.max_hp,
            jump_timer: DirectionalTimer::default(),
            ground_time: 0,
            immunity_timer: stats.hit_immunity,
            dead: false,
            death_timer: 0,
            stats,
        }
    }

    pub fn body(&self) -> &PhysicsBody {
        &self.body
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn action(&self) -> SlimeAction {
        self.action
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.max_hp
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn death_timer(&self) -> u32 {
        self.death_timer
    }

    pub fn ground_time(&self) -> u32 {
        self.ground_time
    }

    pub fn jump_timer(&self) -> DirectionalTimer {
        self.jump_timer
    }

    pub fn immunity_timer(&self) -> u32 {
        self.immunity_timer
    }

    pub fn exp_value(&self) -> u32 {
        self.stats.exp_value
    }

    /// Advance one tick; returns true once the slime should be removed
    pub fn update(&mut self, ctx: &mut SimContext, player: &mut Player) -> bool {
        if !self.dead {
            self.think(ctx, player.position());
        }

        self.body.integrate_and_resolve(Vec2::ZERO, ctx.tiles);
        self.animation.advance();

        if self.dead {
            self.set_action(SlimeAction::Death);
            self.death_timer += 1;
            if self.death_timer >= self.stats.death_ticks {
                for _ in 0..self.stats.exp_value {
                    ctx.events.spawn(SpawnRequest::Experience {
                        position: self.body.position,
                    });
                }
                debug!("Slime removed, dropping {} exp", self.stats.exp_value);
                return true;
            }
            return false;
        }

        if self.body.collisions().down {
            self.ground_time += 1;
        }

        let action = if self.jump_timer.remaining() > self.stats.hop_drift_until {
            SlimeAction::Jump
        } else if self.ground_time < self.stats.splash_ground_time {
            SlimeAction::Splash
        } else {
            SlimeAction::Idle
        };
        self.set_action(action);

        self.immunity_timer = self.immunity_timer.saturating_sub(1);

        if let Some(strike) = player.strike() {
            self.receive_strike(&strike, ctx);
        }

        if !self.dead
            && player.is_vulnerable()
            && self.body.rect().intersects(&player.body().rect())
        {
            self.touch_player(ctx, player);
        }

        if self.body.velocity.y >= MAX_FALL_SPEED {
            info!("Slime fell out of the world at {:?}", self.body.position);
            return true;
        }

        false
    }

    /// Hop decisions and drift
    fn think(&mut self, ctx: &mut SimContext, player_position: Vec2) {
        if self.jump_timer.remaining() > self.stats.hop_drift_until {
            self.body.velocity.x = self.jump_timer.sign() * self.stats.hop_drift_speed;
            self.jump_timer.tick();
            return;
        }

        let dx = player_position.x - self.body.position.x;
        let chance = if dx.abs() > self.stats.far_distance {
            self.stats.far_hop_chance
        } else {
            self.stats.near_hop_chance
        };
        let direction = HorizontalDir::from_sign(dx);

        match direction {
            Some(direction)
                if self.ground_time > self.stats.hop_ground_time
                    && ctx.rng.gen::<f32>() < chance =>
            {
                self.jump_timer = DirectionalTimer::start(direction, self.stats.hop_ticks);
                self.body.velocity = Vec2::new(
                    direction.sign() * self.stats.hop_velocity.x,
                    self.stats.hop_velocity.y,
                );
                self.ground_time = 0;
            }
            _ => self.body.velocity.x = 0.0,
        }
    }

    fn set_action(&mut self, action: SlimeAction) {
        if action != self.action {
            self.action = action;
            self.animation = self.sprites.animation(action);
        }
    }

    /// World position of the current frame's top-left corner
    fn draw_origin(&self) -> Vec2 {
        self.body.position + self.stats.anim_offset
    }

    /// Apply a player attack if its silhouette overlaps ours; returns
    /// whether it landed
    pub fn receive_strike(&mut self, strike: &Strike, ctx: &mut SimContext) -> bool {
        if self.dead || self.immunity_timer > 0 {
            return false;
        }

        let own = self
            .animation
            .current_frame()
            .mask(self.body.facing_left());
        let theirs = strike.frame.mask(strike.flipped);
        let offset = (strike.origin.floor() - self.draw_origin().floor()).as_ivec2();
        if own.overlap_area(theirs, offset) <= self.stats.min_strike_overlap {
            return false;
        }

        ctx.events.circle(HitCircle {
            position: self.body.center(),
            radius: 5.0,
            width: 5.0,
            color: STRIKE_TEXT_COLOR,
        });
        ctx.events.damage_number(DamageNumber::new(
            strike.damage,
            self.body.position,
            STRIKE_TEXT_COLOR,
        ));
        ctx.events.play(SoundEffect::Hit);
        self.hp = self.hp.saturating_sub(strike.damage);
        self.immunity_timer = self.stats.hit_immunity;
        debug!("Slime hit for {}, {} hp left", strike.damage, self.hp);

        if self.hp == 0 {
            self.dead = true;
            info!("Slime killed at {:?}", self.body.position);
        }
        true
    }

    fn touch_player(&mut self, ctx: &mut SimContext, player: &mut Player) {
        player.knock_back(self.body.center());

        let delta = player.position() - self.body.position;
        let skew = if delta.x != 0.0 {
            (delta.y / delta.x).atan()
        } else {
            0.0
        };
        let center = self.body.center();
        for _ in 0..CONTACT_SPARKS {
            let angle = ctx.rng.gen::<f32>() * PI - skew;
            let speed = ctx.rng.gen::<f32>() * 5.0;
            ctx.events.spark(
                center,
                angle,
                2.0 + ctx.rng.gen::<f32>(),
                Some(CONTACT_SPARK_COLOR),
            );
            ctx.events.particle(
                center,
                Vec2::new((angle + PI).cos(), (angle + PI).sin()) * speed * 0.5,
                ctx.rng.gen_range(0..=7),
            );
        }

        player.take_contact_hit(self.stats.contact_damage, ctx);
    }

    pub fn render(&self, surface: &mut dyn Surface, camera: IVec2) {
        draw_frame(
            surface,
            self.animation.current_frame(),
            self.body.position,
            self.stats.anim_offset,
            self.body.facing_left(),
            camera,
        );

        if self.hp < self.stats.max_hp {
            let origin = self.draw_origin() + self.stats.health_bar_offset - camera.as_vec2();
            let size = self.stats.health_bar_size;
            surface.fill_rect(Rect::from_position_size(origin, size), HEALTH_BAR_BACK);
            let fill = size.x * self.hp as f32 / self.stats.max_hp as f32;
            surface.fill_rect(Rect::new(origin.x, origin.y, fill, size.y), HEALTH_BAR_FILL);
        }
    }
}
