/// Keys the simulation reacts to, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Exit the application
    Quit,

    /// Empty the board
    Clear,

    /// Fill the board with random cells
    Randomize,

    /// Enter or leave edit mode
    Pause,

    /// Shorten the delay between generations
    SpeedUp,

    /// Lengthen the delay between generations
    SlowDown,

    Move(Direction),

    /// Bring the cell under the cursor to life
    Add,

    /// Kill the cell under the cursor
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}
