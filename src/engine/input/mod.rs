// Input state fed to the simulation
//
// Window/keyboard polling happens outside the simulation core. The caller
// translates device events into `Action` presses and releases on a
// `PlayerInput`, hands it to the world for one step, then calls
// `end_frame()` so edge-triggered presses only count once.
//
// ```rust
// use slime_platformer::engine::input::{Action, PlayerInput};
//
// let mut input = PlayerInput::new();
// input.press(Action::Jump);
// // world.step(&input);
// input.end_frame();
// ```

pub mod action;
pub mod player;

pub use action::Action;
pub use player::PlayerInput;
