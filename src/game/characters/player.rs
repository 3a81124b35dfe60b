// The player: movement, jumps, dash, melee combo and health

use super::animation::{Animation, SpriteSet};
use super::state::{DirectionalTimer, HorizontalDir, PlayerAction};
use super::stats::PlayerStats;
use crate::core::math::approach_zero;
use crate::engine::physics::PhysicsBody;
use crate::engine::renderer::{draw_frame, Frame, Surface};
use crate::game::events::{DamageNumber, FrameEvents, SimContext, SoundEffect, WOUND_COLOR};
use glam::{IVec2, Vec2};
use log::{debug, info};
use rand::Rng;
use std::f32::consts::PI;
use std::rc::Rc;

/// Sparks in the burst raised when the player dies
const DEATH_SPARKS: usize = 30;

/// Damage a projectile deals
pub const PROJECTILE_DAMAGE: u32 = 4;

/// An attack frame able to hurt enemies this tick
#[derive(Debug, Clone, Copy)]
pub struct Strike<'a> {
    pub damage: u32,
    pub frame: &'a Frame,
    pub flipped: bool,
    /// World position of the frame's top-left corner
    pub origin: Vec2,
}

/// The player character
pub struct Player {
    body: PhysicsBody,
    stats: PlayerStats,
    sprites: Rc<SpriteSet<PlayerAction>>,
    action: PlayerAction,
    animation: Animation,

    hp: u32,
    /// Ticks since the player last stood on ground
    air_time: u32,
    jumps_remaining: u32,
    running: bool,
    wall_sliding: bool,
    attack_timer: u32,
    combo_count: u8,
    dash_timer: DirectionalTimer,
    immunity_timer: u32,
    current_damage: u32,
    exp: u32,
    /// Nonzero while dead; counts up until the level reloads
    death_ticks: u32,
}

impl Player {
    pub fn new(position: Vec2, sprites: Rc<SpriteSet<PlayerAction>>) -> Self {
        Self::with_stats(position, sprites, PlayerStats::default())
    }

    pub fn with_stats(
        position: Vec2,
        sprites: Rc<SpriteSet<PlayerAction>>,
        stats: PlayerStats,
    ) -> Self {
        let body = PhysicsBody::new(position, Vec2::new(stats.width, stats.height));
        let animation = sprites.animation(PlayerAction::Idle);
        Self {
            body,
            sprites,
            action: PlayerAction::Idle,
            animation,
            hp: stats.max_hp,
            air_time: 0,
            jumps_remaining: 1,
            running: false,
            wall_sliding: false,
            attack_timer: 0,
            combo_count: 0,
            dash_timer: DirectionalTimer::default(),
            immunity_timer: stats.spawn_immunity,
            current_damage: stats.combo_damage,
            exp: 0,
            death_ticks: 0,
            stats,
        }
    }

    pub fn body(&self) -> &PhysicsBody {
        &self.body
    }

    #[cfg(test)]
    pub(crate) fn body_mut(&mut self) -> &mut PhysicsBody {
        &mut self.body
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn action(&self) -> PlayerAction {
        self.action
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.max_hp
    }

    pub fn air_time(&self) -> u32 {
        self.air_time
    }

    pub fn jumps_remaining(&self) -> u32 {
        self.jumps_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_wall_sliding(&self) -> bool {
        self.wall_sliding
    }

    pub fn attack_timer(&self) -> u32 {
        self.attack_timer
    }

    pub fn combo_count(&self) -> u8 {
        self.combo_count
    }

    pub fn dash_timer(&self) -> DirectionalTimer {
        self.dash_timer
    }

    pub fn immunity_timer(&self) -> u32 {
        self.immunity_timer
    }

    pub fn current_damage(&self) -> u32 {
        self.current_damage
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    pub fn is_dead(&self) -> bool {
        self.death_ticks > 0
    }

    pub fn death_ticks(&self) -> u32 {
        self.death_ticks
    }

    /// The attack timer must drop below this before the next attack; above
    /// it the attack pose is shown
    fn attack_window(&self) -> u32 {
        self.stats
            .attack_cooldown
            .saturating_sub(self.stats.combo_cooldown_step * self.combo_count as u32)
    }

    /// Whether the attack pose is showing (movement input is ignored)
    pub fn in_attack_pose(&self) -> bool {
        self.attack_timer > self.attack_window()
    }

    /// Dash speed is forced while the timer is above the drive threshold
    fn is_dash_driven(&self) -> bool {
        self.dash_timer.remaining() > self.stats.dash_drive_until
    }

    /// Early dash frames shrug off contact and projectile hits
    pub fn is_dash_protected(&self) -> bool {
        self.dash_timer.remaining() >= self.stats.dash_protection_until
    }

    /// Whether contact damage can land right now
    pub fn is_vulnerable(&self) -> bool {
        !self.is_dash_protected() && self.immunity_timer == 0
    }

    /// Requested movement for a horizontal input axis in `[-1, 1]`
    ///
    /// Input is ignored until the attack timer drops below the window, one
    /// tick longer than the pose lasts.
    pub fn movement_for(&self, axis: f32) -> Vec2 {
        if self.attack_timer >= self.attack_window() {
            return Vec2::ZERO;
        }
        let speed = if self.running {
            self.stats.run_multiplier
        } else {
            1.0
        };
        Vec2::new(axis * speed, 0.0)
    }

    /// Start running; only possible when (nearly) grounded
    pub fn start_running(&mut self) {
        if self.air_time < self.stats.run_start_air_time {
            self.running = true;
        }
    }

    pub fn stop_running(&mut self) {
        self.running = false;
    }

    /// Advance one tick with the given requested movement
    pub fn update(&mut self, ctx: &mut SimContext, movement: Vec2) {
        self.body.integrate_and_resolve(movement, ctx.tiles);
        self.animation.advance();

        self.air_time += 1;
        self.immunity_timer = self.immunity_timer.saturating_sub(1);

        if self.air_time > self.stats.fall_death_air_time
            && self.body.velocity.y > self.stats.fall_death_speed
            && !self.is_dead()
        {
            info!("Player fell out of the world");
            ctx.events.shake(self.stats.hit_shake);
            self.death_ticks = 1;
        }

        let collisions = self.body.collisions();
        if collisions.down {
            self.air_time = 0;
            self.jumps_remaining = 1;
        }

        self.wall_sliding = false;
        if collisions.horizontal() && self.air_time > self.stats.wall_slide_air_time {
            self.wall_sliding = true;
            self.body.velocity.y = self.body.velocity.y.min(self.stats.wall_slide_speed);
            self.body.set_facing_left(!collisions.right);
            self.set_action(PlayerAction::WallSlide);
        } else {
            let action = self.pick_action(movement);
            self.set_action(action);
        }

        self.dash_timer.tick();
        let dash_driven = self.is_dash_driven();
        if dash_driven {
            self.body.velocity.x = self.dash_timer.sign() * self.stats.dash_speed;
            if self.dash_timer.remaining() == self.stats.dash_drive_until + 1 {
                self.body.velocity.x *= self.stats.dash_release_factor;
            }
        }

        if self.attack_timer > 0 {
            self.attack_timer -= 1;
        } else if self.combo_count > 0 {
            self.combo_count = 0;
        }
        if self.combo_count == self.stats.max_combo && self.attack_timer < self.attack_window() {
            self.combo_count = 0;
        }

        if !dash_driven {
            self.body.velocity.x = approach_zero(self.body.velocity.x, self.stats.friction);
        }
    }

    fn pick_action(&self, movement: Vec2) -> PlayerAction {
        if self.in_attack_pose() {
            PlayerAction::attack(self.combo_count)
        } else if self.is_dash_driven() {
            PlayerAction::Dash
        } else if self.air_time > self.stats.wall_slide_air_time {
            if self.body.velocity.y > 0.0 {
                PlayerAction::Fall
            } else {
                PlayerAction::Jump
            }
        } else if movement.x != 0.0 {
            if self.running {
                PlayerAction::Run
            } else {
                PlayerAction::Walk
            }
        } else {
            PlayerAction::Idle
        }
    }

    fn set_action(&mut self, action: PlayerAction) {
        if action != self.action {
            self.action = action;
            self.animation = self.sprites.animation(action);
        }
    }

    /// Ground jump or wall jump; returns whether a jump happened
    pub fn jump(&mut self, events: &mut FrameEvents) -> bool {
        if self.wall_sliding {
            let facing_left = self.body.facing_left();
            let last_x = self.body.last_movement().x;
            if facing_left && last_x < 0.0 {
                self.body.velocity.x = self.stats.wall_jump_velocity.x;
            } else if !facing_left && last_x > 0.0 {
                self.body.velocity.x = -self.stats.wall_jump_velocity.x;
            }
            self.body.velocity.y = self.stats.wall_jump_velocity.y;
            self.air_time = self.stats.jump_air_time;
            self.jumps_remaining = self.jumps_remaining.saturating_sub(1);
            events.play(SoundEffect::Jump);
            debug!("Wall jump");
            return true;
        }

        if self.jumps_remaining > 0 && self.air_time < self.stats.coyote_ticks {
            self.body.velocity.y = self.stats.jump_velocity;
            self.jumps_remaining -= 1;
            self.air_time = self.stats.jump_air_time;
            events.play(SoundEffect::Jump);
            debug!("Jump");
            return true;
        }

        false
    }

    fn facing(&self) -> HorizontalDir {
        if self.body.facing_left() {
            HorizontalDir::Left
        } else {
            HorizontalDir::Right
        }
    }

    /// Dash the way the player faces; ignored while a dash is running
    pub fn dash(&mut self, events: &mut FrameEvents) -> bool {
        if self.dash_timer.is_active() {
            return false;
        }
        let direction = self.facing();
        self.dash_timer = DirectionalTimer::start(direction, self.stats.dash_ticks);
        events.play(SoundEffect::Dash);
        debug!("Dash {:?}", direction);
        true
    }

    /// Swing, chaining into the combo when still mid-attack
    pub fn attack(&mut self, ctx: &mut SimContext) -> bool {
        let ready = self.dash_timer.remaining() < self.stats.dash_drive_until
            && self.air_time < self.stats.attack_air_time
            && !self.wall_sliding
            && self.attack_timer < self.attack_window();
        if !ready {
            return false;
        }

        self.combo_count = if self.attack_timer > 0 {
            (self.combo_count + 1).min(self.stats.max_combo)
        } else {
            0
        };
        self.attack_timer = self.stats.attack_ticks;
        self.current_damage = if self.combo_count < self.stats.max_combo {
            self.stats.combo_damage
        } else {
            self.stats.finisher_damage
        };
        ctx.events.shake(self.stats.attack_shake);

        let facing_left = self.body.facing_left();
        let rect = self.body.rect();
        let spark_x = rect.right() - if facing_left { 20.0 } else { -12.0 };
        for _ in 0..self.stats.attack_sparks {
            let y = rect.bottom() - ctx.rng.gen_range(0..=7) as f32;
            let angle = ctx.rng.gen::<f32>() * PI / 6.0 + if facing_left { PI } else { 0.0 };
            let speed = 1.0 + ctx.rng.gen::<f32>() * 0.5;
            ctx.events.spark(Vec2::new(spark_x, y), angle, speed, None);
        }

        debug!(
            "Attack combo {} for {} damage",
            self.combo_count, self.current_damage
        );
        true
    }

    /// The current attack frame while it can still land
    pub fn strike(&self) -> Option<Strike<'_>> {
        if self.attack_timer < self.stats.hit_window_from {
            return None;
        }
        Some(Strike {
            damage: self.current_damage,
            frame: self.animation.current_frame(),
            flipped: self.body.facing_left(),
            origin: self.body.position + self.anim_offset(),
        })
    }

    /// Push the player away from `source` (a world position)
    pub fn knock_back(&mut self, source: Vec2) {
        let direction = HorizontalDir::from_sign(self.body.center().x - source.x)
            .unwrap_or_else(|| self.facing().opposite());
        self.body.velocity.x = direction.sign() * self.stats.knockback_speed;
    }

    /// Body contact with an enemy: immunity plus damage
    pub fn take_contact_hit(&mut self, damage: u32, ctx: &mut SimContext) {
        self.immunity_timer = self.stats.contact_immunity;
        self.wound(damage, ctx);
    }

    /// A projectile reached the player
    pub fn take_projectile_hit(&mut self, ctx: &mut SimContext) {
        self.wound(PROJECTILE_DAMAGE, ctx);
    }

    fn wound(&mut self, damage: u32, ctx: &mut SimContext) {
        ctx.events.shake(self.stats.hit_shake);
        ctx.events.play(SoundEffect::Hit);
        self.hp = self.hp.saturating_sub(damage);
        ctx.events.damage_number(DamageNumber::new(
            damage,
            self.body.position,
            WOUND_COLOR,
        ));
        debug!("Player took {} damage, {} hp left", damage, self.hp);

        if self.hp == 0 && !self.is_dead() {
            info!("Player died");
            self.death_ticks = 1;
            let center = self.body.center();
            for _ in 0..DEATH_SPARKS {
                let angle = ctx.rng.gen::<f32>() * PI * 2.0;
                let speed = ctx.rng.gen::<f32>() * 5.0;
                ctx.events
                    .spark(center, angle, 2.0 + ctx.rng.gen::<f32>(), None);
                ctx.events.particle(
                    center,
                    Vec2::new((angle + PI).cos(), (angle + PI).sin()) * speed * 0.5,
                    ctx.rng.gen_range(0..=7),
                );
            }
        }
    }

    pub fn gain_exp(&mut self, amount: u32) {
        self.exp += amount;
        debug!("Player exp {}", self.exp);
    }

    /// Count one tick of the death sequence; true once the level should
    /// reload
    pub fn tick_death(&mut self) -> bool {
        if !self.is_dead() {
            return false;
        }
        self.death_ticks += 1;
        self.death_ticks > self.stats.death_reload_after
    }

    /// Put the player back at a spawn point with full health
    pub fn reset_for_level(&mut self, position: Vec2) {
        self.body.position = position;
        self.body.velocity = Vec2::ZERO;
        self.hp = self.stats.max_hp;
        self.air_time = 0;
        self.death_ticks = 0;
        self.attack_timer = 0;
        self.combo_count = 0;
        self.dash_timer = DirectionalTimer::default();
        self.immunity_timer = self.stats.spawn_immunity;
        self.wall_sliding = false;
        self.set_action(PlayerAction::Idle);
    }

    /// Draw offset for the current pose
    pub fn anim_offset(&self) -> Vec2 {
        if !self.in_attack_pose() {
            self.stats.anim_offset
        } else if self.body.facing_left() {
            self.stats.attack_anim_offset_flipped
        } else {
            self.stats.attack_anim_offset
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, camera: IVec2) {
        draw_frame(
            surface,
            self.animation.current_frame(),
            self.body.position,
            self.anim_offset(),
            self.body.facing_left(),
            camera,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::TileGrid;
    use crate::game::characters::animation::AnimationLibrary;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sprites() -> Rc<SpriteSet<PlayerAction>> {
        Rc::new(SpriteSet::from_library(&AnimationLibrary::placeholder()).unwrap())
    }

    fn floor() -> TileGrid {
        let mut grid = TileGrid::new(16.0);
        grid.fill_row(5, -10, 10);
        grid
    }

    /// Player standing on the floor at y = 80
    fn grounded_player() -> Player {
        Player::new(Vec2::new(40.0, 64.0), sprites())
    }

    struct Harness {
        tiles: TileGrid,
        events: FrameEvents,
        rng: StdRng,
    }

    impl Harness {
        fn new(tiles: TileGrid) -> Self {
            Self {
                tiles,
                events: FrameEvents::new(),
                rng: StdRng::seed_from_u64(7),
            }
        }

        fn ctx(&mut self) -> SimContext<'_> {
            SimContext::new(&self.tiles, &mut self.events, &mut self.rng)
        }
    }

    #[test]
    fn test_resting_player_stays_grounded() {
        let mut h = Harness::new(floor());
        let mut player = grounded_player();

        player.update(&mut h.ctx(), Vec2::ZERO);

        assert!(player.body().collisions().down);
        assert_eq!(player.body().velocity.y, 0.0);
        assert_relative_eq!(player.position().y, 64.0);
        assert_eq!(player.air_time(), 0);
        assert_eq!(player.action(), PlayerAction::Idle);
    }

    #[test]
    fn test_ground_jump_consumes_jump() {
        let mut h = Harness::new(floor());
        let mut player = grounded_player();
        player.update(&mut h.ctx(), Vec2::ZERO);

        assert!(player.jump(&mut h.events));
        assert_eq!(player.jumps_remaining(), 0);
        assert_eq!(player.body().velocity.y, -3.0);
        assert_eq!(player.air_time(), 5);
        assert_eq!(h.events.sounds, vec![SoundEffect::Jump]);

        assert!(!player.jump(&mut h.events));
        assert_eq!(player.jumps_remaining(), 0);
    }

    #[test]
    fn test_jump_refused_after_grace() {
        let mut h = Harness::new(TileGrid::new(16.0));
        let mut player = Player::new(Vec2::ZERO, sprites());
        for _ in 0..10 {
            player.update(&mut h.ctx(), Vec2::ZERO);
        }
        assert!(player.air_time() >= 10);
        assert_eq!(player.jumps_remaining(), 1);
        assert!(!player.jump(&mut h.events));
        assert_eq!(player.jumps_remaining(), 1);
    }

    #[test]
    fn test_wall_jump_never_goes_negative() {
        let mut grid = floor();
        grid.insert(IVec2::new(4, 2));
        grid.insert(IVec2::new(4, 3));
        let mut h = Harness::new(grid);
        // Airborne next to the wall at x = 64
        let mut player = Player::new(Vec2::new(54.0, 30.0), sprites());
        player.jumps_remaining = 0;
        for _ in 0..6 {
            player.update(&mut h.ctx(), Vec2::new(1.0, 0.0));
        }
        assert!(player.is_wall_sliding());
        assert!(player.body().velocity.y <= 1.0);
        assert_eq!(player.action(), PlayerAction::WallSlide);

        assert!(player.jump(&mut h.events));
        assert_eq!(player.jumps_remaining(), 0);
        assert_eq!(player.body().velocity.x, -3.5);
        assert_eq!(player.body().velocity.y, -2.5);
    }

    #[test]
    fn test_dash_drive_and_release() {
        let mut h = Harness::new(floor());
        let mut player = grounded_player();
        player.update(&mut h.ctx(), Vec2::ZERO);

        assert!(player.dash(&mut h.events));
        assert_eq!(player.dash_timer().remaining(), 60);
        assert!(!player.dash(&mut h.events), "no re-trigger mid-dash");

        for _ in 0..10 {
            player.update(&mut h.ctx(), Vec2::ZERO);
            let remaining = player.dash_timer().remaining();
            let speed = player.body().velocity.x.abs();
            if remaining == 51 {
                assert_relative_eq!(speed, 0.8);
            } else if remaining > 50 {
                assert_relative_eq!(speed, 8.0);
            }
        }
        assert_eq!(player.dash_timer().remaining(), 50);
        assert_eq!(h.events.sounds, vec![SoundEffect::Dash]);
    }

    #[test]
    fn test_dash_follows_facing() {
        let mut h = Harness::new(floor());
        let mut player = grounded_player();
        player.update(&mut h.ctx(), Vec2::new(-1.0, 0.0));
        player.dash(&mut h.events);
        player.update(&mut h.ctx(), Vec2::ZERO);
        assert_eq!(player.body().velocity.x, -8.0);
        assert_eq!(player.action(), PlayerAction::Dash);
    }

    #[test]
    fn test_dash_protects_early_frames() {
        let mut h = Harness::new(floor());
        let mut player = grounded_player();
        player.immunity_timer = 0;
        assert!(player.is_vulnerable());

        player.dash(&mut h.events);
        assert!(!player.is_vulnerable());
        for _ in 0..10 {
            player.update(&mut h.ctx(), Vec2::ZERO);
        }
        assert!(player.is_dash_protected());
        player.update(&mut h.ctx(), Vec2::ZERO);
        assert!(player.is_vulnerable());
    }

    #[test]
    fn test_combo_climbs_to_finisher() {
        let mut h = Harness::new(floor());
        let mut player = grounded_player();
        player.update(&mut h.ctx(), Vec2::ZERO);

        assert!(player.attack(&mut h.ctx()));
        assert_eq!(player.combo_count(), 0);
        assert_eq!(player.current_damage(), 5);
        assert_eq!(h.events.sparks.len(), 3);
        assert_eq!(h.events.screenshake, 16.0);
        assert!(!player.attack(&mut h.ctx()), "still inside the window");

        for _ in 0..16 {
            player.update(&mut h.ctx(), Vec2::ZERO);
        }
        assert!(player.attack(&mut h.ctx()));
        assert_eq!(player.combo_count(), 1);

        for _ in 0..21 {
            player.update(&mut h.ctx(), Vec2::ZERO);
        }
        assert!(player.attack(&mut h.ctx()));
        assert_eq!(player.combo_count(), 2);
        assert_eq!(player.current_damage(), 8);

        for _ in 0..200 {
            player.update(&mut h.ctx(), Vec2::ZERO);
            player.attack(&mut h.ctx());
            assert!(player.combo_count() <= 2);
        }
    }

    #[test]
    fn test_combo_resets_when_timer_runs_out() {
        let mut h = Harness::new(floor());
        let mut player = grounded_player();
        player.update(&mut h.ctx(), Vec2::ZERO);
        player.attack(&mut h.ctx());
        for _ in 0..16 {
            player.update(&mut h.ctx(), Vec2::ZERO);
        }
        player.attack(&mut h.ctx());
        assert_eq!(player.combo_count(), 1);

        while player.attack_timer() > 0 {
            player.update(&mut h.ctx(), Vec2::ZERO);
        }
        assert_eq!(player.combo_count(), 1);
        player.update(&mut h.ctx(), Vec2::ZERO);
        assert_eq!(player.combo_count(), 0);
    }

    #[test]
    fn test_finisher_expires_early() {
        let mut h = Harness::new(floor());
        let mut player = grounded_player();
        player.update(&mut h.ctx(), Vec2::ZERO);
        player.attack_timer = 10;
        player.combo_count = 1;
        player.attack(&mut h.ctx());
        assert_eq!(player.combo_count(), 2);

        for _ in 0..25 {
            player.update(&mut h.ctx(), Vec2::ZERO);
        }
        assert_eq!(player.attack_timer(), 20);
        assert_eq!(player.combo_count(), 2);
        player.update(&mut h.ctx(), Vec2::ZERO);
        assert_eq!(player.combo_count(), 0);
    }

    #[test]
    fn test_attack_pose_blocks_movement() {
        let mut h = Harness::new(floor());
        let mut player = grounded_player();
        player.update(&mut h.ctx(), Vec2::ZERO);
        player.start_running();
        assert_eq!(player.movement_for(1.0), Vec2::new(2.0, 0.0));

        player.attack(&mut h.ctx());
        assert_eq!(player.movement_for(1.0), Vec2::ZERO);
        player.update(&mut h.ctx(), Vec2::ZERO);
        assert_eq!(player.action(), PlayerAction::Attack1);
        assert!(player.strike().is_some());
        assert_eq!(player.anim_offset(), Vec2::new(-16.0, -16.0));
    }

    #[test]
    fn test_movement_frozen_until_below_window() {
        let mut player = grounded_player();
        player.attack_timer = 30;
        assert!(!player.in_attack_pose());
        assert_eq!(player.movement_for(1.0), Vec2::ZERO);

        player.attack_timer = 29;
        assert_eq!(player.movement_for(1.0), Vec2::new(1.0, 0.0));

        player.combo_count = 2;
        player.attack_timer = 20;
        assert_eq!(player.movement_for(-1.0), Vec2::ZERO);
        player.attack_timer = 19;
        assert_eq!(player.movement_for(-1.0), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_running_needs_ground() {
        let mut h = Harness::new(TileGrid::new(16.0));
        let mut player = Player::new(Vec2::ZERO, sprites());
        for _ in 0..12 {
            player.update(&mut h.ctx(), Vec2::ZERO);
        }
        player.start_running();
        assert!(!player.is_running());
    }

    #[test]
    fn test_friction_decays_velocity() {
        let mut h = Harness::new(floor());
        let mut player = grounded_player();
        player.body_mut().velocity.x = 0.25;
        player.update(&mut h.ctx(), Vec2::ZERO);
        assert_relative_eq!(player.body().velocity.x, 0.15);
        player.update(&mut h.ctx(), Vec2::ZERO);
        player.update(&mut h.ctx(), Vec2::ZERO);
        assert_eq!(player.body().velocity.x, 0.0);
    }

    #[test]
    fn test_contact_hit_and_death() {
        let mut h = Harness::new(floor());
        let mut player = grounded_player();
        player.hp = 3;
        player.knock_back(Vec2::new(60.0, 70.0));
        assert_eq!(player.body().velocity.x, -2.0);

        player.take_contact_hit(3, &mut h.ctx());
        assert_eq!(player.hp(), 0);
        assert_eq!(player.immunity_timer(), 20);
        assert!(player.is_dead());
        assert_eq!(h.events.sparks.len(), 30);
        assert_eq!(h.events.damage_numbers[0].color, WOUND_COLOR);

        let mut reloads = 0;
        for _ in 0..40 {
            if player.tick_death() {
                reloads += 1;
            }
        }
        assert_eq!(reloads, 1);
    }

    #[test]
    fn test_knock_back_tie_pushes_against_facing() {
        let mut player = grounded_player();
        let center = player.body().center();
        player.knock_back(center);
        assert_eq!(player.body().velocity.x, -2.0);

        player.body_mut().set_facing_left(true);
        player.knock_back(center);
        assert_eq!(player.body().velocity.x, 2.0);
    }

    #[test]
    fn test_fell_out_of_world() {
        let mut h = Harness::new(TileGrid::new(16.0));
        let mut player = Player::new(Vec2::ZERO, sprites());
        for _ in 0..130 {
            player.update(&mut h.ctx(), Vec2::ZERO);
        }
        assert!(player.is_dead());
        assert_eq!(h.events.screenshake, 16.0);

        player.reset_for_level(Vec2::new(40.0, 64.0));
        assert!(!player.is_dead());
        assert_eq!(player.hp(), player.max_hp());
        assert_eq!(player.body().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_gain_exp() {
        let mut player = grounded_player();
        player.gain_exp(2);
        player.gain_exp(1);
        assert_eq!(player.exp(), 3);
    }
}
