//! Slime platformer simulation core
//!
//! A fixed-tick 2D platformer: a player with jumps, dashes and a melee
//! combo, slimes that hop and hurt on contact, and the experience they drop.
//! Rendering goes to any [`engine::renderer::Surface`]; sound and visual
//! effects are emitted as requests in [`game::FrameEvents`].

pub mod core;
pub mod engine;
pub mod game;
