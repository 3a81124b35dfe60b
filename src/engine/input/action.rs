// Game action definitions

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,
    /// Held modifier doubling horizontal speed
    Run,

    // Combat
    Dash,
    Attack,
}
