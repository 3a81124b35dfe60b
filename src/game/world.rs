// The level in play: entity collections, step order, rendering

use crate::core::Rect;
use crate::engine::assets::AssetError;
use crate::engine::input::{Action, PlayerInput};
use crate::engine::renderer::{Camera, Surface};
use crate::game::characters::{
    AnimationLibrary, Experience, PickupAction, Player, Slime, SlimeAction, SpriteSet,
};
use crate::game::events::{FrameEvents, SimContext, SpawnRequest};
use crate::game::level::Level;
use glam::{IVec2, Vec2};
use log::{info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;
use std::rc::Rc;

/// Size of the rendered view in pixels
pub const VIEW_WIDTH: u32 = 192;
pub const VIEW_HEIGHT: u32 = 120;

/// Slimes further than this from the player are frozen
const ACTIVATION_RANGE: Vec2 = Vec2::new(120.0, 100.0);

/// Projectiles vanish after this many ticks
const PROJECTILE_LIFETIME: u32 = 360;
const PROJECTILE_IMPACT_SPARKS: usize = 4;
const PROJECTILE_SIZE: Vec2 = Vec2::new(4.0, 2.0);

const TILE_COLOR: [u8; 4] = [70, 60, 80, 255];
const PROJECTILE_COLOR: [u8; 4] = [255, 120, 60, 255];
const HUD_BAR: Rect = Rect::new(10.0, 90.0, 50.0, 5.0);
const HUD_BACK: [u8; 4] = [0, 0, 0, 255];
const HUD_FILL: [u8; 4] = [150, 0, 0, 255];

/// A bullet travelling horizontally
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    /// Signed horizontal speed in pixels/tick
    pub speed: f32,
    pub age: u32,
}

/// An entity plus its removal flag
///
/// Entities that signal removal stay one more step so they render a last
/// time; they are dropped at the start of the next step.
#[derive(Debug)]
struct Slot<E> {
    entity: E,
    expired: bool,
}

impl<E> Slot<E> {
    fn new(entity: E) -> Self {
        Self {
            entity,
            expired: false,
        }
    }
}

/// Owns a level and everything in it
pub struct World {
    level: Level,
    player: Player,
    slimes: Vec<Slot<Slime>>,
    projectiles: Vec<Slot<Projectile>>,
    pickups: Vec<Slot<Experience>>,
    slime_sprites: Rc<SpriteSet<SlimeAction>>,
    pickup_sprites: SpriteSet<PickupAction>,
    camera: Camera,
    events: FrameEvents,
    rng: StdRng,
    screenshake: f32,
    tick: u64,
}

impl World {
    /// Populate a level; fails if any animation the entities need is missing
    pub fn new(level: Level, library: &AnimationLibrary, seed: u64) -> Result<Self, AssetError> {
        let player_sprites = Rc::new(SpriteSet::from_library(library)?);
        let slime_sprites = Rc::new(SpriteSet::from_library(library)?);
        let pickup_sprites = SpriteSet::from_library(library)?;

        let player = Player::new(level.player_spawn(), player_sprites);
        let mut camera = Camera::new(VIEW_WIDTH as f32, VIEW_HEIGHT as f32);
        camera.center_on(player.body().center());

        let mut world = Self {
            level,
            player,
            slimes: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            slime_sprites,
            pickup_sprites,
            camera,
            events: FrameEvents::new(),
            rng: StdRng::seed_from_u64(seed),
            screenshake: 0.0,
            tick: 0,
        };
        world.spawn_enemies();
        Ok(world)
    }

    fn spawn_enemies(&mut self) {
        self.slimes = self
            .level
            .slime_spawns()
            .iter()
            .map(|spawn| Slot::new(Slime::new(*spawn, Rc::clone(&self.slime_sprites))))
            .collect();
        info!("Level loaded with {} slimes", self.slimes.len());
    }

    /// Restart the level: fresh enemies, player back at the spawn
    pub fn reload(&mut self) {
        info!("Reloading level");
        self.spawn_enemies();
        self.projectiles.clear();
        self.pickups.clear();
        self.player.reset_for_level(self.level.player_spawn());
        self.camera.center_on(self.player.body().center());
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn slimes(&self) -> impl Iterator<Item = &Slime> {
        self.slimes.iter().map(|slot| &slot.entity)
    }

    pub fn pickups(&self) -> impl Iterator<Item = &Experience> {
        self.pickups.iter().map(|slot| &slot.entity)
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().map(|slot| &slot.entity)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn screenshake(&self) -> f32 {
        self.screenshake
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// True once every slime is gone
    pub fn is_cleared(&self) -> bool {
        self.slimes.is_empty()
    }

    /// Fire a projectile from `position` with a signed horizontal speed
    pub fn spawn_projectile(&mut self, position: Vec2, speed: f32) {
        self.projectiles.push(Slot::new(Projectile {
            position,
            speed,
            age: 0,
        }));
    }

    /// Hand everything raised since the last drain to the presentation layer
    pub fn drain_events(&mut self) -> FrameEvents {
        self.events.take()
    }

    /// Advance the simulation one tick
    pub fn step(&mut self, input: &PlayerInput) {
        self.tick += 1;

        self.slimes.retain(|slot| !slot.expired);
        self.projectiles.retain(|slot| !slot.expired);
        self.pickups.retain(|slot| !slot.expired);

        self.screenshake = (self.screenshake - 1.0).max(0.0);

        let mut reload = false;
        {
            let mut ctx = SimContext::new(self.level.tiles(), &mut self.events, &mut self.rng);
            let player = &mut self.player;

            if !player.is_dead() {
                if input.just_pressed(Action::Jump) {
                    player.jump(ctx.events);
                }
                if input.just_pressed(Action::Dash) {
                    player.dash(ctx.events);
                }
                if input.just_pressed(Action::Attack) {
                    player.attack(&mut ctx);
                }
            }
            if input.just_pressed(Action::Run) {
                player.start_running();
            }
            if input.just_released(Action::Run) {
                player.stop_running();
            }

            let player_position = player.position();
            for slot in self.slimes.iter_mut().filter(|slot| !slot.expired) {
                let distance = (slot.entity.position() - player_position).abs();
                if distance.x > ACTIVATION_RANGE.x || distance.y > ACTIVATION_RANGE.y {
                    continue;
                }
                if slot.entity.update(&mut ctx, player) {
                    slot.expired = true;
                }
            }

            for request in std::mem::take(&mut ctx.events.spawns) {
                match request {
                    SpawnRequest::Experience { position } => {
                        let pickup =
                            Experience::new(position, &self.pickup_sprites, &mut *ctx.rng);
                        self.pickups.push(Slot::new(pickup));
                    }
                }
            }

            if player.is_dead() {
                reload = player.tick_death();
            } else {
                let movement = player.movement_for(input.horizontal());
                player.update(&mut ctx, movement);
            }

            for slot in self.projectiles.iter_mut().filter(|slot| !slot.expired) {
                let projectile = &mut slot.entity;
                projectile.position.x += projectile.speed;
                projectile.age += 1;

                if ctx.tiles.is_solid_point(projectile.position) {
                    slot.expired = true;
                    let base = if projectile.speed > 0.0 { PI } else { 0.0 };
                    for _ in 0..PROJECTILE_IMPACT_SPARKS {
                        let angle = ctx.rng.gen::<f32>() - 0.5 + base;
                        let speed = 2.0 + ctx.rng.gen::<f32>();
                        ctx.events.spark(projectile.position, angle, speed, None);
                    }
                } else if projectile.age > PROJECTILE_LIFETIME {
                    slot.expired = true;
                } else if !player.is_dash_protected()
                    && player.body().rect().contains_point(projectile.position)
                {
                    slot.expired = true;
                    player.take_projectile_hit(&mut ctx);
                }
            }

            for slot in self.pickups.iter_mut().filter(|slot| !slot.expired) {
                if slot.entity.update(&mut ctx, player) {
                    slot.expired = true;
                }
            }
        }

        if self.events.screenshake > 0.0 {
            trace!("Screenshake pulse {}", self.events.screenshake);
            self.screenshake = self.screenshake.max(self.events.screenshake);
            self.events.screenshake = 0.0;
        }

        self.camera.follow(self.player.body().center());

        if reload {
            self.reload();
        }
    }

    /// Draw tiles, entities and the HUD; `shake` comes from [`World::shake_offset`]
    pub fn render(&self, surface: &mut dyn Surface, shake: IVec2) {
        let camera = self.camera.render_offset() + shake;
        let shift = camera.as_vec2();

        for rect in self.level.tiles().solid_rects() {
            surface.fill_rect(
                Rect::new(rect.x - shift.x, rect.y - shift.y, rect.width, rect.height),
                TILE_COLOR,
            );
        }

        for slot in &self.slimes {
            slot.entity.render(surface, camera);
        }

        if !self.player.is_dead() {
            self.player.render(surface, camera);
        }

        for slot in &self.projectiles {
            let origin = slot.entity.position - PROJECTILE_SIZE / 2.0 - shift;
            surface.fill_rect(Rect::from_position_size(origin, PROJECTILE_SIZE), PROJECTILE_COLOR);
        }

        for slot in &self.pickups {
            slot.entity.render(surface, camera);
        }

        self.render_hud(surface);
    }

    fn render_hud(&self, surface: &mut dyn Surface) {
        surface.fill_rect(HUD_BAR, HUD_BACK);
        let fill = HUD_BAR.width * self.player.hp() as f32 / self.player.max_hp() as f32;
        surface.fill_rect(
            Rect::new(HUD_BAR.x, HUD_BAR.y, fill, HUD_BAR.height),
            HUD_FILL,
        );
    }

    /// Screen-space offset for the current screenshake
    pub fn shake_offset(&mut self) -> IVec2 {
        if self.screenshake <= 0.0 {
            return IVec2::ZERO;
        }
        let s = self.screenshake;
        let x = self.rng.gen::<f32>() * s - s / 3.0;
        let y = self.rng.gen::<f32>() * s - s / 3.0;
        Vec2::new(x, y).as_ivec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::Canvas;
    use crate::game::events::SoundEffect;

    const ARENA: &str = "\
#..................#
#..................#
#..................#
#..P.....S.........#
####################
";

    fn world(map: &str) -> World {
        let level: Level = map.parse().unwrap();
        World::new(level, &AnimationLibrary::placeholder(), 5).unwrap()
    }

    fn idle() -> PlayerInput {
        PlayerInput::new()
    }

    #[test]
    fn test_new_world_spawns_level() {
        let world = world(ARENA);
        assert_eq!(world.slimes().count(), 1);
        assert_eq!(world.player().position(), Vec2::new(48.0, 48.0));
        assert!(!world.is_cleared());
    }

    #[test]
    fn test_missing_animation_fails_startup() {
        let level: Level = ARENA.parse().unwrap();
        let result = World::new(level, &AnimationLibrary::new(), 0);
        assert!(matches!(result, Err(AssetError::MissingAnimation { .. })));
    }

    #[test]
    fn test_jump_input_plays_sound() {
        let mut world = world(ARENA);
        world.step(&idle());

        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        world.step(&input);

        let events = world.drain_events();
        assert!(events.sounds.contains(&SoundEffect::Jump));
        assert!(world.player().body().velocity.y < 0.0);
    }

    #[test]
    fn test_far_slimes_are_frozen() {
        let mut world = world(
            "\
#..........................#
#.........................S#
#..P.......................#
############################
",
        );
        let start = world.slimes().next().unwrap().position();
        for _ in 0..10 {
            world.step(&idle());
        }
        assert_eq!(world.slimes().next().unwrap().position(), start);
    }

    #[test]
    fn test_dead_slime_drops_pickups_and_is_removed_after_render() {
        let mut world = world(ARENA);
        world.slimes[0].entity = Slime::with_stats(
            Vec2::new(144.0, 54.0),
            Rc::clone(&world.slime_sprites),
            crate::game::characters::SlimeStats {
                max_hp: 1,
                hit_immunity: 0,
                ..Default::default()
            },
        );
        // Walk the player next to the slime and swing
        world.player.body_mut().position = Vec2::new(126.0, 48.0);
        world.step(&idle());
        let mut attack = PlayerInput::new();
        attack.press(Action::Attack);
        world.step(&attack);
        // The swing frame is on screen from the next step
        world.step(&idle());
        assert!(world.slimes().next().unwrap().is_dead());

        let mut removal_step = None;
        for step in 0..40 {
            world.step(&idle());
            if world.slimes[0].expired {
                removal_step = Some(step);
                break;
            }
        }
        assert!(removal_step.is_some());
        assert_eq!(world.pickups().count(), 2, "pickups exist in the removal step");
        assert_eq!(world.slimes().count(), 1, "still there to render");

        world.step(&idle());
        assert_eq!(world.slimes().count(), 0);
        assert!(world.is_cleared());
    }

    #[test]
    fn test_projectile_hits_wall() {
        let mut world = world(ARENA);
        world.spawn_projectile(Vec2::new(300.0, 40.0), 3.0);
        for _ in 0..10 {
            world.step(&idle());
        }
        assert!(world.projectiles().all(|p| p.position.x <= 320.0));
        let events = world.drain_events();
        assert_eq!(events.sparks.len(), 4);
        world.step(&idle());
        assert_eq!(world.projectiles().count(), 0);
    }

    #[test]
    fn test_projectile_hits_player() {
        let mut world = world(ARENA);
        world.step(&idle());
        world.step(&idle());
        world.drain_events();
        let center = world.player().body().center();
        world.spawn_projectile(center - Vec2::new(1.0, 0.0), 1.0);
        world.step(&idle());

        assert_eq!(world.player().hp(), world.player().max_hp() - 4);
        assert_eq!(world.screenshake(), 16.0);
        let events = world.drain_events();
        assert!(events.sounds.contains(&SoundEffect::Hit));
        assert_eq!(events.damage_numbers.len(), 1);
    }

    #[test]
    fn test_projectile_expires() {
        let mut world = world(ARENA);
        world.spawn_projectile(Vec2::new(40.0, -400.0), 0.0);
        for _ in 0..361 {
            world.step(&idle());
        }
        assert!(world.projectiles.iter().all(|slot| slot.expired));
    }

    #[test]
    fn test_screenshake_decays() {
        let mut world = world(ARENA);
        world.step(&idle());
        let mut attack = PlayerInput::new();
        attack.press(Action::Attack);
        world.step(&attack);
        assert_eq!(world.screenshake(), 16.0);
        world.step(&idle());
        assert_eq!(world.screenshake(), 15.0);

        for _ in 0..20 {
            let offset = world.shake_offset();
            assert!(offset.x.abs() <= 15 && offset.y.abs() <= 15);
        }
        for _ in 0..15 {
            world.step(&idle());
        }
        assert_eq!(world.shake_offset(), IVec2::ZERO);
    }

    #[test]
    fn test_death_reloads_level() {
        let mut world = world(
            "\
#....#
#.P..#
#....#
",
        );
        let spawn = world.level().player_spawn();
        let mut reloaded = false;
        for _ in 0..400 {
            world.step(&idle());
            if world.player().position() == spawn && world.tick() > 1 {
                reloaded = true;
                break;
            }
        }
        assert!(reloaded);
        assert!(!world.player().is_dead());
        assert_eq!(world.player().hp(), world.player().max_hp());
    }

    #[test]
    fn test_render_draws_hud() {
        let mut world = world(ARENA);
        world.step(&idle());
        let mut canvas = Canvas::new(VIEW_WIDTH, VIEW_HEIGHT);
        world.render(&mut canvas, IVec2::ZERO);
        assert_eq!(canvas.pixel(10, 90), Some(HUD_FILL));
        assert_eq!(canvas.pixel(59, 94), Some(HUD_FILL));
    }
}
