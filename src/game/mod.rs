// Game layer: entities, events, levels and the world that runs them

pub mod characters;
pub mod events;
pub mod level;
pub mod world;

pub use events::{FrameEvents, SimContext, SoundEffect};
pub use level::{Level, LevelError};
pub use world::World;
