// Entities
//
// Everything that lives in a level and moves:
// - Player controller (movement, dash, combo, health)
// - Slime enemy (hop AI, silhouette hits, drops)
// - Experience pickups
// - Tuning stats, animation states and sprite animation

pub mod animation;
pub mod experience;
pub mod player;
pub mod slime;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{ActionKind, Animation, AnimationLibrary, Clip, SpriteSet};
pub use experience::Experience;
pub use player::{Player, Strike};
pub use slime::Slime;
pub use state::{DirectionalTimer, HorizontalDir, PickupAction, PlayerAction, SlimeAction};
pub use stats::{PickupStats, PlayerStats, SlimeStats};
