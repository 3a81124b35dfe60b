// Animation states and small timers shared by entities

use super::animation::ActionKind;

/// Visual state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerAction {
    #[default]
    Idle,
    Walk,
    Run,
    Attack1,
    Attack2,
    Attack3,
    Jump,
    Fall,
    Dash,
    WallSlide,
}

impl PlayerAction {
    /// Attack pose for a combo step (0, 1 or 2)
    pub fn attack(combo: u8) -> Self {
        match combo {
            0 => Self::Attack1,
            1 => Self::Attack2,
            _ => Self::Attack3,
        }
    }
}

impl ActionKind for PlayerAction {
    const ENTITY: &'static str = "player";
    const ALL: &'static [Self] = &[
        Self::Idle,
        Self::Walk,
        Self::Run,
        Self::Attack1,
        Self::Attack2,
        Self::Attack3,
        Self::Jump,
        Self::Fall,
        Self::Dash,
        Self::WallSlide,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Attack1 => "attack_1",
            Self::Attack2 => "attack_2",
            Self::Attack3 => "attack_3",
            Self::Jump => "jump",
            Self::Fall => "fall",
            Self::Dash => "dash",
            Self::WallSlide => "wall_slide",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Visual state of a slime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlimeAction {
    #[default]
    Idle,
    Jump,
    Splash,
    Death,
}

impl ActionKind for SlimeAction {
    const ENTITY: &'static str = "blue_slime";
    const ALL: &'static [Self] = &[Self::Idle, Self::Jump, Self::Splash, Self::Death];

    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Jump => "jump",
            Self::Splash => "splash",
            Self::Death => "death",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Experience pickups only ever idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PickupAction {
    #[default]
    Idle,
}

impl ActionKind for PickupAction {
    const ENTITY: &'static str = "experience";
    const ALL: &'static [Self] = &[Self::Idle];

    fn name(self) -> &'static str {
        "idle"
    }

    fn index(self) -> usize {
        0
    }
}

/// Left or right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalDir {
    Left,
    Right,
}

impl HorizontalDir {
    /// Direction of a signed value; `None` for zero
    pub fn from_sign(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(Self::Right)
        } else if value < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A countdown that remembers which way it was started
///
/// Replaces a signed counter whose sign carried the direction: the
/// direction survives even after the magnitude reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionalTimer {
    direction: Option<HorizontalDir>,
    remaining: u32,
}

impl DirectionalTimer {
    pub fn start(direction: HorizontalDir, ticks: u32) -> Self {
        Self {
            direction: Some(direction),
            remaining: ticks,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn direction(&self) -> Option<HorizontalDir> {
        self.direction
    }

    /// Signed direction, or 0 before the timer was ever started
    pub fn sign(&self) -> f32 {
        self.direction.map_or(0.0, HorizontalDir::sign)
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Count one tick towards zero
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}
