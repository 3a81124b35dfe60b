// Sprite animation: clips, per-entity clocks and the animation table

use crate::engine::assets::{AssetError, AssetLoader};
use crate::engine::renderer::Frame;
use log::info;
use std::collections::HashMap;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::path::Path;
use std::rc::Rc;

/// An ordered run of frames with its timing
///
/// Frames are shared: cloning a clip only bumps a reference count.
#[derive(Debug, Clone)]
pub struct Clip {
    frames: Rc<[Frame]>,
    /// Ticks each frame stays on screen
    frame_duration: u32,
    looping: bool,
}

impl Clip {
    /// Callers guarantee `frames` is non-empty
    pub fn new(frames: Vec<Frame>, frame_duration: u32, looping: bool) -> Self {
        Self {
            frames: frames.into(),
            frame_duration: frame_duration.max(1),
            looping,
        }
    }

    /// Create a looping clip
    pub fn looping(frames: Vec<Frame>, frame_duration: u32) -> Self {
        Self::new(frames, frame_duration, true)
    }

    /// Create a clip that plays once and holds its last frame
    pub fn one_shot(frames: Vec<Frame>, frame_duration: u32) -> Self {
        Self::new(frames, frame_duration, false)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_duration(&self) -> u32 {
        self.frame_duration
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Length of one full cycle in ticks
    pub fn total_ticks(&self) -> u32 {
        self.frame_duration * self.frames.len() as u32
    }
}

/// Per-entity playback of a clip
///
/// Entities sharing a clip each own an `Animation`, so their timing is
/// independent while the frames stay shared.
#[derive(Debug, Clone)]
pub struct Animation {
    clip: Clip,
    cursor: u32,
    finished: bool,
}

impl Animation {
    pub fn new(clip: &Clip) -> Self {
        Self {
            clip: clip.clone(),
            cursor: 0,
            finished: false,
        }
    }

    /// Advance one tick
    pub fn advance(&mut self) {
        let total = self.clip.total_ticks();
        if self.clip.looping {
            self.cursor = (self.cursor + 1) % total;
        } else {
            self.cursor = (self.cursor + 1).min(total - 1);
            if self.cursor >= total - 1 {
                self.finished = true;
            }
        }
    }

    pub fn current_frame(&self) -> &Frame {
        &self.clip.frames[self.current_frame_index()]
    }

    pub fn current_frame_index(&self) -> usize {
        (self.cursor / self.clip.frame_duration) as usize
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn clip(&self) -> &Clip {
        &self.clip
    }
}

/// An entity kind's set of animation states
///
/// `ALL` must list the variants in declaration order so that `index()` can
/// address a dense table.
pub trait ActionKind: Copy + Eq + Debug + 'static {
    /// Entity-kind half of the animation table key
    const ENTITY: &'static str;
    const ALL: &'static [Self];

    /// Action half of the animation table key
    fn name(self) -> &'static str;

    /// Position of the variant in `ALL`
    fn index(self) -> usize;
}

/// Every clip one entity kind needs, resolved once at startup
#[derive(Debug)]
pub struct SpriteSet<A: ActionKind> {
    clips: Vec<Clip>,
    _actions: PhantomData<A>,
}

impl<A: ActionKind> SpriteSet<A> {
    /// Resolve every action of `A`, failing on the first missing entry
    pub fn from_library(library: &AnimationLibrary) -> Result<Self, AssetError> {
        let clips = A::ALL
            .iter()
            .map(|action| {
                library
                    .get(A::ENTITY, action.name())
                    .cloned()
                    .ok_or_else(|| AssetError::MissingAnimation {
                        entity: A::ENTITY.to_string(),
                        action: action.name().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            clips,
            _actions: PhantomData,
        })
    }

    pub fn clip(&self, action: A) -> &Clip {
        &self.clips[action.index()]
    }

    /// Fresh playback of an action's clip
    pub fn animation(&self, action: A) -> Animation {
        Animation::new(self.clip(action))
    }
}

/// One row of the animation table: where the frames live and how they play
#[derive(Debug, Clone, Copy)]
pub struct ClipSpec {
    pub entity: &'static str,
    pub action: &'static str,
    /// Frame directory relative to the image root
    pub directory: &'static str,
    pub frame_duration: u32,
    pub looping: bool,
    /// Size of generated stand-in frames when no art is available
    pub placeholder_size: (u32, u32),
    pub placeholder_color: [u8; 4],
}

const PLAYER_COLOR: [u8; 4] = [220, 220, 240, 255];
const SWING_COLOR: [u8; 4] = [255, 255, 255, 255];
const SLIME_COLOR: [u8; 4] = [90, 160, 255, 255];
const EXPERIENCE_COLOR: [u8; 4] = [255, 230, 80, 255];

const fn spec(
    entity: &'static str,
    action: &'static str,
    directory: &'static str,
    frame_duration: u32,
    looping: bool,
    placeholder_size: (u32, u32),
    placeholder_color: [u8; 4],
) -> ClipSpec {
    ClipSpec {
        entity,
        action,
        directory,
        frame_duration,
        looping,
        placeholder_size,
        placeholder_color,
    }
}

/// The game's animation table
pub const CLIP_MANIFEST: &[ClipSpec] = &[
    spec("blue_slime", "jump", "entities/blue_slime/jump", 4, false, (16, 16), SLIME_COLOR),
    spec("blue_slime", "splash", "entities/blue_slime/splash", 6, false, (16, 16), SLIME_COLOR),
    spec("blue_slime", "idle", "entities/blue_slime/idle", 6, true, (16, 16), SLIME_COLOR),
    spec("blue_slime", "death", "entities/blue_slime/death", 6, false, (16, 16), SLIME_COLOR),
    spec("player", "idle", "entities/player/idle", 6, true, (17, 16), PLAYER_COLOR),
    spec("player", "walk", "entities/player/run", 6, true, (17, 16), PLAYER_COLOR),
    spec("player", "run", "entities/player/run", 3, true, (17, 16), PLAYER_COLOR),
    spec("player", "attack_1", "entities/player/attack_1", 5, false, (48, 32), SWING_COLOR),
    spec("player", "attack_2", "entities/player/attack_2", 5, false, (48, 32), SWING_COLOR),
    spec("player", "attack_3", "entities/player/attack_3", 5, false, (48, 32), SWING_COLOR),
    spec("player", "jump", "entities/player/jump", 5, true, (17, 16), PLAYER_COLOR),
    spec("player", "dash", "entities/player/dash", 4, false, (17, 16), PLAYER_COLOR),
    spec("player", "fall", "entities/player/fall", 5, true, (17, 16), PLAYER_COLOR),
    spec("player", "wall_slide", "entities/player/wall_slide", 5, true, (17, 16), PLAYER_COLOR),
    spec("experience", "idle", "entities/experience", 5, true, (3, 3), EXPERIENCE_COLOR),
];

/// Frames generated per placeholder clip
const PLACEHOLDER_FRAMES: usize = 4;

/// Asset table addressed by `(entity-kind, action-name)`
#[derive(Debug, Default, Clone)]
pub struct AnimationLibrary {
    clips: HashMap<(String, String), Clip>,
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: &str, action: &str, clip: Clip) {
        self.clips
            .insert((entity.to_string(), action.to_string()), clip);
    }

    pub fn get(&self, entity: &str, action: &str) -> Option<&Clip> {
        self.clips.get(&(entity.to_string(), action.to_string()))
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Load every clip of the manifest from an image root directory
    pub fn load<P: AsRef<Path>>(image_root: P) -> Result<Self, AssetError> {
        let loader = AssetLoader::new(image_root);
        let mut library = Self::new();
        for spec in CLIP_MANIFEST {
            let frames = loader.load_frames(spec.directory)?;
            library.insert(
                spec.entity,
                spec.action,
                Clip::new(frames, spec.frame_duration, spec.looping),
            );
        }
        info!(
            "Loaded {} animations from {}",
            library.len(),
            loader.base_path().display()
        );
        Ok(library)
    }

    /// Solid-rectangle stand-ins for every clip of the manifest
    pub fn placeholder() -> Self {
        let mut library = Self::new();
        for spec in CLIP_MANIFEST {
            let (width, height) = spec.placeholder_size;
            let frames = (0..PLACEHOLDER_FRAMES)
                .map(|_| Frame::solid(width, height, spec.placeholder_color))
                .collect();
            library.insert(
                spec.entity,
                spec.action,
                Clip::new(frames, spec.frame_duration, spec.looping),
            );
        }
        library
    }
}
