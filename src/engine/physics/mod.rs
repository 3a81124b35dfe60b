// Tile physics: kinematic boxes resolved axis by axis against solid tiles

pub mod body;
mod collision;

pub use body::{CollisionFlags, PhysicsBody, GRAVITY, MAX_FALL_SPEED};
pub use collision::{TileGrid, TileQuery};
