// Requests entities raise during a step, and the context they update with

use crate::engine::physics::TileQuery;
use glam::Vec2;
use rand::RngCore;

/// Colour of strike damage numbers
pub const STRIKE_TEXT_COLOR: [u8; 3] = [255, 255, 255];

/// Colour of damage taken by the player
pub const WOUND_COLOR: [u8; 3] = [150, 0, 0];

/// Ticks a damage number stays alive
pub const DAMAGE_NUMBER_LIFETIME: u32 = 40;

/// Floating number shown where damage landed
#[derive(Debug, Clone, PartialEq)]
pub struct DamageNumber {
    pub text: String,
    pub position: Vec2,
    pub color: [u8; 3],
    pub lifetime: u32,
}

impl DamageNumber {
    pub fn new(amount: impl ToString, position: Vec2, color: [u8; 3]) -> Self {
        Self {
            text: amount.to_string(),
            position,
            color,
            lifetime: DAMAGE_NUMBER_LIFETIME,
        }
    }
}

/// Short-lived streak; `None` colour means the default white
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub position: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub color: Option<[u8; 3]>,
}

/// Drifting dust particle
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleRequest {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Frame of the particle animation to start on
    pub start_frame: u32,
}

/// Expanding ring drawn where a strike connected
#[derive(Debug, Clone, PartialEq)]
pub struct HitCircle {
    pub position: Vec2,
    pub radius: f32,
    pub width: f32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Jump,
    Dash,
    Hit,
}

impl SoundEffect {
    /// Sample name under the sound directory
    pub fn name(self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Dash => "dash",
            Self::Hit => "hit",
        }
    }
}

/// Entities an update asks the owner to create
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnRequest {
    Experience { position: Vec2 },
}

/// Everything raised during one step
///
/// The simulation only writes here; whoever owns the presentation layer
/// drains it after the step.
#[derive(Debug, Default)]
pub struct FrameEvents {
    pub damage_numbers: Vec<DamageNumber>,
    pub sparks: Vec<Spark>,
    pub particles: Vec<ParticleRequest>,
    pub circles: Vec<HitCircle>,
    pub sounds: Vec<SoundEffect>,
    pub spawns: Vec<SpawnRequest>,
    /// Largest screenshake pulse requested this step
    pub screenshake: f32,
}

impl FrameEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a screenshake pulse; pulses merge by maximum
    pub fn shake(&mut self, amount: f32) {
        self.screenshake = self.screenshake.max(amount);
    }

    pub fn play(&mut self, sound: SoundEffect) {
        self.sounds.push(sound);
    }

    pub fn damage_number(&mut self, number: DamageNumber) {
        self.damage_numbers.push(number);
    }

    pub fn spark(&mut self, position: Vec2, angle: f32, speed: f32, color: Option<[u8; 3]>) {
        self.sparks.push(Spark {
            position,
            angle,
            speed,
            color,
        });
    }

    pub fn particle(&mut self, position: Vec2, velocity: Vec2, start_frame: u32) {
        self.particles.push(ParticleRequest {
            position,
            velocity,
            start_frame,
        });
    }

    pub fn circle(&mut self, circle: HitCircle) {
        self.circles.push(circle);
    }

    pub fn spawn(&mut self, request: SpawnRequest) {
        self.spawns.push(request);
    }

    pub fn is_empty(&self) -> bool {
        self.damage_numbers.is_empty()
            && self.sparks.is_empty()
            && self.particles.is_empty()
            && self.circles.is_empty()
            && self.sounds.is_empty()
            && self.spawns.is_empty()
            && self.screenshake == 0.0
    }

    /// Move everything out, leaving the queue empty
    pub fn take(&mut self) -> FrameEvents {
        std::mem::take(self)
    }
}

/// What an entity may touch while it updates
///
/// Narrow on purpose: tiles to collide with, a queue to write requests into
/// and a random source.
pub struct SimContext<'a> {
    pub tiles: &'a dyn TileQuery,
    pub events: &'a mut FrameEvents,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> SimContext<'a> {
    pub fn new(
        tiles: &'a dyn TileQuery,
        events: &'a mut FrameEvents,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self { tiles, events, rng }
    }
}
